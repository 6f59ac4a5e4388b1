use serde::{Deserialize, Serialize};

use crate::validation::{non_empty, ConfigValidator, ValidationUtils};

/// 主呼叫服务商（AI语音代理）配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub voice: String,
    pub reduce_latency: bool,
    pub wait_for_greeting: bool,
    pub record: bool,
    pub max_duration_seconds: u32,
    pub language: String,
    pub request_timeout_seconds: u64,
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.bland.ai".to_string(),
            voice: "maya".to_string(),
            reduce_latency: true,
            wait_for_greeting: true,
            record: true,
            max_duration_seconds: 180,
            language: "en".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl PrimaryProviderConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl ConfigValidator for PrimaryProviderConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_url(&self.base_url, "primary.base_url")?;
        ValidationUtils::validate_not_empty(&self.voice, "primary.voice")?;
        ValidationUtils::validate_not_empty(&self.language, "primary.language")?;
        ValidationUtils::validate_timeout_seconds(
            self.request_timeout_seconds,
            "primary.request_timeout_seconds",
        )?;
        if self.max_duration_seconds == 0 {
            return Err(crate::ConfigError::Validation(
                "primary.max_duration_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 备用呼叫服务商（TwiML呼叫流程）配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackProviderConfig {
    pub enabled: bool,
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_phone: Option<String>,
    pub base_url: String,
    pub voice: String,
    pub language: String,
    pub gather_action: String,
    pub gather_timeout_seconds: u64,
    pub pause_seconds: u64,
    pub record: bool,
    pub ring_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for FallbackProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            account_sid: None,
            auth_token: None,
            from_phone: None,
            base_url: "https://api.twilio.com".to_string(),
            voice: "alice".to_string(),
            language: "en-US".to_string(),
            gather_action: "/api/twilio/gather".to_string(),
            gather_timeout_seconds: 10,
            pause_seconds: 2,
            record: true,
            ring_timeout_seconds: 30,
            request_timeout_seconds: 30,
        }
    }
}

impl FallbackProviderConfig {
    pub fn account_sid(&self) -> Option<&str> {
        non_empty(&self.account_sid)
    }

    pub fn auth_token(&self) -> Option<&str> {
        non_empty(&self.auth_token)
    }

    pub fn from_phone(&self) -> Option<&str> {
        non_empty(&self.from_phone)
    }

    /// 缺失的凭据字段名
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_sid().is_none() {
            missing.push("fallback.account_sid");
        }
        if self.auth_token().is_none() {
            missing.push("fallback.auth_token");
        }
        if self.from_phone().is_none() {
            missing.push("fallback.from_phone");
        }
        missing
    }

    pub fn is_configured(&self) -> bool {
        self.missing_credentials().is_empty()
    }
}

impl ConfigValidator for FallbackProviderConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_url(&self.base_url, "fallback.base_url")?;
        ValidationUtils::validate_not_empty(&self.voice, "fallback.voice")?;
        ValidationUtils::validate_not_empty(&self.language, "fallback.language")?;
        ValidationUtils::validate_not_empty(&self.gather_action, "fallback.gather_action")?;
        ValidationUtils::validate_timeout_seconds(
            self.gather_timeout_seconds,
            "fallback.gather_timeout_seconds",
        )?;
        ValidationUtils::validate_timeout_seconds(
            self.ring_timeout_seconds,
            "fallback.ring_timeout_seconds",
        )?;
        ValidationUtils::validate_timeout_seconds(
            self.request_timeout_seconds,
            "fallback.request_timeout_seconds",
        )?;
        Ok(())
    }
}
