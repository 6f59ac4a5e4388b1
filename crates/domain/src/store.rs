use std::path::{Path, PathBuf};

use rideguard_errors::{RelayError, RelayResult};
use tracing::debug;

use crate::entities::IncidentRecord;

/// 基于JSON文件的事故数据源，每次请求重新读取
#[derive(Debug, Clone)]
pub struct IncidentStore {
    path: PathBuf,
}

impl IncidentStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> RelayResult<IncidentRecord> {
        debug!("读取事故数据: {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RelayError::store_error(format!("无法读取 {}: {e}", self.path.display()))
        })?;

        IncidentRecord::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "passenger": {"name": "Jane Doe", "phone": "+15551234567"},
        "driver": {"name": "John Smith", "phone": "+15557654321", "license": "D1234"},
        "vehicle": {"year": 2020, "make": "Toyota", "model": "Camry", "color": "blue", "plate": "ABC123"},
        "location": {"address": "123 Main St", "gps_lat": 37.77, "gps_lng": -122.41}
    }"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = IncidentStore::new(file.path());
        let record = store.load().await.unwrap();
        assert_eq!(record.driver.license, "D1234");
    }

    #[tokio::test]
    async fn test_missing_file_is_store_error() {
        let store = IncidentStore::new("/nonexistent/rideguard/test_data.json");
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, RelayError::Store(_)));
    }

    #[tokio::test]
    async fn test_incomplete_file_names_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"passenger": {"name": "Jane Doe"}}"#).unwrap();

        let store = IncidentStore::new(file.path());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, RelayError::MissingField { ref field } if field == "passenger.phone"));
    }
}
