//! Test helpers

use std::io::Write;

use serde_json::Value;
use tempfile::NamedTempFile;

/// 把事故数据写入临时文件，返回的句柄在 drop 时删除文件
pub fn write_incident_file(value: &Value) -> NamedTempFile {
    write_raw_incident_file(&value.to_string())
}

pub fn write_raw_incident_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp incident file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp incident file");
    file
}
