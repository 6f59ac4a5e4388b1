use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INCIDENT_TYPE: &str = "medical_emergency";

/// 事故类型，开放字符串枚举，只用于展示格式化
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentType(String);

impl IncidentType {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 下划线替换为空格，每个单词首字母大写
    ///
    /// `medical_emergency` -> `Medical Emergency`
    pub fn display_name(&self) -> String {
        self.0
            .replace('_', " ")
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for IncidentType {
    fn default() -> Self {
        Self::new(DEFAULT_INCIDENT_TYPE)
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IncidentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for IncidentType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 呼叫脚本的两种形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptVariant {
    /// 分段完整报告，适合单次语音播报
    Detailed,
    /// 简短口语段落，适合带交互提示的呼叫流程
    Simplified,
}

/// 服务商在派发链中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Primary,
    Fallback,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Primary => f.write_str("primary"),
            ProviderKind::Fallback => f.write_str("fallback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(
            IncidentType::new("medical_emergency").display_name(),
            "Medical Emergency"
        );
        assert_eq!(IncidentType::new("ASSAULT").display_name(), "Assault");
        assert_eq!(
            IncidentType::new("road_traffic_accident").display_name(),
            "Road Traffic Accident"
        );
        assert_eq!(IncidentType::new("").display_name(), "");
    }

    #[test]
    fn test_open_enum_accepts_anything() {
        let custom = IncidentType::from("driver_left_route");
        assert_eq!(custom.as_str(), "driver_left_route");
        assert_eq!(custom.display_name(), "Driver Left Route");
    }

    #[test]
    fn test_default_incident_type() {
        assert_eq!(IncidentType::default().as_str(), "medical_emergency");
    }

    #[test]
    fn test_provider_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::Primary).unwrap(),
            "\"primary\""
        );
        assert_eq!(
            serde_json::to_string(&ProviderKind::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(ProviderKind::Fallback.to_string(), "fallback");
    }
}
