use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    api_observability::{ApiConfig, ObservabilityConfig},
    emergency::EmergencyConfig,
    providers::{FallbackProviderConfig, PrimaryProviderConfig},
};
use crate::validation::ConfigValidator;

/// 环境变量前缀，层级分隔符为 `__`
pub const ENV_PREFIX: &str = "RIDEGUARD";

/// 部署平台沿用的扁平环境变量 -> (配置键, 对应的带前缀变量)
const LEGACY_ENV_KEYS: [(&str, &str, &str); 5] = [
    ("BLAND_API_KEY", "primary.api_key", "RIDEGUARD__PRIMARY__API_KEY"),
    ("EMERGENCY_PHONE", "emergency.phone", "RIDEGUARD__EMERGENCY__PHONE"),
    (
        "TWILIO_ACCOUNT_SID",
        "fallback.account_sid",
        "RIDEGUARD__FALLBACK__ACCOUNT_SID",
    ),
    (
        "TWILIO_AUTH_TOKEN",
        "fallback.auth_token",
        "RIDEGUARD__FALLBACK__AUTH_TOKEN",
    ),
    ("TWILIO_PHONE", "fallback.from_phone", "RIDEGUARD__FALLBACK__FROM_PHONE"),
];

/// System configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub emergency: EmergencyConfig,
    #[serde(default)]
    pub primary: PrimaryProviderConfig,
    #[serde(default)]
    pub fallback: FallbackProviderConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    ///
    /// Load order:
    /// 1. Default configuration
    /// 2. Config file (TOML format)
    /// 3. Legacy flat environment variables (`BLAND_API_KEY`, `EMERGENCY_PHONE`, `PORT`, ...)
    /// 4. Environment variable overrides (prefix: RIDEGUARD__)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // 1. Load config file if provided
        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = [
                "config/rideguard.toml",
                "rideguard.toml",
                "/etc/rideguard/config.toml",
            ];

            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        // 2. Legacy flat variables, skipped when the prefixed form is present
        for (key, value) in legacy_env_overrides(|name| std::env::var(name).ok()) {
            builder = builder.set_override(key, value)?;
        }

        // 3. Environment variable overrides - highest priority
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    /// Validate configuration effectiveness
    ///
    /// 单个服务商凭据缺失不算错误（调用时才失败），但至少要有一个服务商可用。
    pub fn validate(&self) -> Result<()> {
        self.emergency.validate().context("紧急呼叫配置验证失败")?;
        self.primary.validate().context("主服务商配置验证失败")?;
        self.fallback.validate().context("备用服务商配置验证失败")?;
        self.api.validate().context("API配置验证失败")?;
        self.observability
            .validate()
            .context("可观测性配置验证失败")?;

        let fallback_usable = self.fallback.enabled && self.fallback.is_configured();
        if !self.primary.is_configured() && !fallback_usable {
            return Err(anyhow::anyhow!(
                "没有可用的呼叫服务商: 请配置 primary.api_key 或完整的 fallback 凭据"
            ));
        }

        Ok(())
    }

    /// 启动时需要提示的凭据缺失项
    pub fn credential_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.primary.is_configured() {
            warnings.push("primary.api_key 未配置，主服务商将在调用时失败".to_string());
        }
        if self.fallback.enabled {
            let missing = self.fallback.missing_credentials();
            if !missing.is_empty() {
                warnings.push(format!(
                    "备用服务商凭据不完整 ({})，备用呼叫将在调用时失败",
                    missing.join(", ")
                ));
            }
        }
        warnings
    }
}

/// 计算旧式扁平环境变量对应的覆盖项
///
/// `PORT` 映射为 `api.bind_address = 0.0.0.0:{PORT}`。
pub fn legacy_env_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let mut overrides: Vec<(&'static str, String)> = LEGACY_ENV_KEYS
        .iter()
        .filter(|(_, _, prefixed)| present(prefixed).is_none())
        .filter_map(|(legacy, key, _)| present(legacy).map(|value| (*key, value)))
        .collect();

    if present("RIDEGUARD__API__BIND_ADDRESS").is_none() {
        if let Some(port) = present("PORT") {
            overrides.push(("api.bind_address", format!("0.0.0.0:{}", port.trim())));
        }
    }

    overrides
}
