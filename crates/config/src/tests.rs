use std::collections::HashMap;
use std::io::Write;

use crate::models::legacy_env_overrides;
use crate::*;

const FULL_TOML: &str = r#"
[emergency]
phone = "+15550001111"
incident_data_path = "data/incident.json"

[primary]
api_key = "bland-test-key"
voice = "maya"
max_duration_seconds = 120

[fallback]
account_sid = "AC123"
auth_token = "secret"
from_phone = "+15559998888"
gather_timeout_seconds = 15

[api]
bind_address = "127.0.0.1:9000"

[observability]
log_level = "debug"
log_format = "json"
"#;

#[test]
fn test_from_toml_full() {
    let config = AppConfig::from_toml(FULL_TOML).unwrap();

    assert_eq!(config.emergency.phone, "+15550001111");
    assert_eq!(config.emergency.incident_data_path, "data/incident.json");
    assert_eq!(config.primary.api_key(), Some("bland-test-key"));
    assert_eq!(config.primary.max_duration_seconds, 120);
    // 未写出的字段使用默认值
    assert_eq!(config.primary.base_url, "https://api.bland.ai");
    assert_eq!(config.primary.request_timeout_seconds, 30);
    assert!(config.fallback.is_configured());
    assert_eq!(config.fallback.gather_timeout_seconds, 15);
    assert_eq!(config.fallback.pause_seconds, 2);
    assert_eq!(config.fallback.voice, "alice");
    assert_eq!(config.api.bind_address, "127.0.0.1:9000");
    assert_eq!(config.observability.log_format, LogFormat::Json);
    assert!(config.credential_warnings().is_empty());
}

#[test]
fn test_missing_emergency_phone_is_rejected() {
    let toml = r#"
[primary]
api_key = "k"
"#;
    let err = AppConfig::from_toml(toml).unwrap_err();
    assert!(format!("{err:#}").contains("emergency.phone"));
}

#[test]
fn test_no_usable_provider_is_rejected() {
    let toml = r#"
[emergency]
phone = "+15550001111"

[fallback]
account_sid = "AC123"
"#;
    let err = AppConfig::from_toml(toml).unwrap_err();
    assert!(format!("{err:#}").contains("没有可用的呼叫服务商"));
}

#[test]
fn test_partial_fallback_credentials_only_warn() {
    let toml = r#"
[emergency]
phone = "+15550001111"

[primary]
api_key = "k"

[fallback]
account_sid = "AC123"
auth_token = ""
"#;
    let config = AppConfig::from_toml(toml).unwrap();
    assert!(!config.fallback.is_configured());
    assert_eq!(
        config.fallback.missing_credentials(),
        vec!["fallback.auth_token", "fallback.from_phone"]
    );

    let warnings = config.credential_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("fallback.auth_token"));
}

#[test]
fn test_fallback_only_configuration_is_valid() {
    let toml = r#"
[emergency]
phone = "+15550001111"

[fallback]
account_sid = "AC123"
auth_token = "secret"
from_phone = "+15559998888"
"#;
    let config = AppConfig::from_toml(toml).unwrap();
    assert!(!config.primary.is_configured());
    assert_eq!(config.credential_warnings().len(), 1);
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_timeout = FULL_TOML.replace("gather_timeout_seconds = 15", "gather_timeout_seconds = 0");
    assert!(AppConfig::from_toml(&bad_timeout).is_err());

    let bad_address = FULL_TOML.replace("127.0.0.1:9000", "not-an-address");
    assert!(AppConfig::from_toml(&bad_address).is_err());

    let bad_level = FULL_TOML.replace("log_level = \"debug\"", "log_level = \"verbose\"");
    assert!(AppConfig::from_toml(&bad_level).is_err());
}

#[test]
fn test_toml_roundtrip_keeps_credentials() {
    let config = AppConfig::from_toml(FULL_TOML).unwrap();
    let rendered = config.to_toml().unwrap();
    let reloaded = AppConfig::from_toml(&rendered).unwrap();

    assert_eq!(reloaded.primary.api_key(), Some("bland-test-key"));
    assert_eq!(reloaded.fallback.from_phone(), Some("+15559998888"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(FULL_TOML.as_bytes()).unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(config.emergency.phone, "+15550001111");
    // 电话号码保持字符串，不被解析为数字
    assert!(config.fallback.from_phone().unwrap().starts_with('+'));
}

#[test]
fn test_load_missing_file_fails() {
    let err = AppConfig::load(Some("/nonexistent/rideguard.toml")).unwrap_err();
    assert!(err.to_string().contains("配置文件不存在"));
}

#[test]
fn test_legacy_env_overrides() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("BLAND_API_KEY", "legacy-key"),
        ("EMERGENCY_PHONE", "+15551112222"),
        ("TWILIO_ACCOUNT_SID", "AC999"),
        ("TWILIO_PHONE", ""),
        ("PORT", "8123"),
    ]);
    let overrides = legacy_env_overrides(|name| env.get(name).map(|v| v.to_string()));

    assert!(overrides.contains(&("primary.api_key", "legacy-key".to_string())));
    assert!(overrides.contains(&("emergency.phone", "+15551112222".to_string())));
    assert!(overrides.contains(&("fallback.account_sid", "AC999".to_string())));
    assert!(overrides.contains(&("api.bind_address", "0.0.0.0:8123".to_string())));
    assert!(!overrides.iter().any(|(key, _)| *key == "fallback.from_phone"));
}

#[test]
fn test_prefixed_env_wins_over_legacy() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("BLAND_API_KEY", "legacy-key"),
        ("RIDEGUARD__PRIMARY__API_KEY", "prefixed-key"),
        ("PORT", "8123"),
        ("RIDEGUARD__API__BIND_ADDRESS", "127.0.0.1:7000"),
    ]);
    let overrides = legacy_env_overrides(|name| env.get(name).map(|v| v.to_string()));

    assert!(overrides.is_empty());
}

#[test]
fn test_log_format_from_str() {
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    assert!("xml".parse::<LogFormat>().is_err());
}
