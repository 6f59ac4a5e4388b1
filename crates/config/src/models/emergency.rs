use serde::{Deserialize, Serialize};

use crate::validation::{ConfigValidator, ValidationUtils};

fn default_incident_data_path() -> String {
    "test_data.json".to_string()
}

/// 紧急呼叫目标及事故数据来源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// 接听紧急呼叫的电话号码
    #[serde(default)]
    pub phone: String,
    /// 事故记录JSON文件路径
    #[serde(default = "default_incident_data_path")]
    pub incident_data_path: String,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            phone: String::new(),
            incident_data_path: default_incident_data_path(),
        }
    }
}

impl ConfigValidator for EmergencyConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.phone, "emergency.phone")?;
        ValidationUtils::validate_not_empty(
            &self.incident_data_path,
            "emergency.incident_data_path",
        )?;
        Ok(())
    }
}
