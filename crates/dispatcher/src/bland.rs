use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use rideguard_config::PrimaryProviderConfig;
use rideguard_domain::{
    CallProvider, ProviderKind, ProviderResult, RelayError, RelayResult, ScriptVariant,
};
use serde::Serialize;
use tracing::{error, info};

const PROVIDER_NAME: &str = "bland";

/// 创建呼叫的请求体
#[derive(Debug, Clone, Serialize)]
pub struct BlandCallRequest<'a> {
    pub phone_number: &'a str,
    /// 语音代理要执行的任务，即完整播报脚本
    pub task: &'a str,
    pub voice: &'a str,
    pub reduce_latency: bool,
    pub wait_for_greeting: bool,
    pub record: bool,
    pub max_duration: u32,
    pub language: &'a str,
}

/// 主呼叫服务商：AI语音代理，直接播报完整脚本
pub struct BlandProvider {
    config: PrimaryProviderConfig,
    client: reqwest::Client,
}

impl BlandProvider {
    pub fn new(config: PrimaryProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn calls_url(&self) -> String {
        format!("{}/v1/calls", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CallProvider for BlandProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Primary
    }

    fn script_variant(&self) -> ScriptVariant {
        ScriptVariant::Detailed
    }

    async fn place_call(&self, phone: &str, script: &str) -> RelayResult<ProviderResult> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| RelayError::config_error("primary.api_key 未配置"))?;

        let payload = BlandCallRequest {
            phone_number: phone,
            task: script,
            voice: &self.config.voice,
            reduce_latency: self.config.reduce_latency,
            wait_for_greeting: self.config.wait_for_greeting,
            record: self.config.record,
            max_duration: self.config.max_duration_seconds,
            language: &self.config.language,
        };

        let url = self.calls_url();
        info!("通过 {} 发起紧急呼叫: url={}", PROVIDER_NAME, url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, api_key)
            .timeout(Duration::from_secs(self.config.request_timeout_seconds))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("{} 请求失败: {}", PROVIDER_NAME, e);
                RelayError::provider_call(PROVIDER_NAME, format!("请求失败: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} 返回错误: HTTP {} - {}", PROVIDER_NAME, status, body);
            return Err(RelayError::provider_call(
                PROVIDER_NAME,
                format!("HTTP {status} - {body}"),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            RelayError::provider_call(PROVIDER_NAME, format!("响应不是合法JSON: {e}"))
        })?;

        let call_id = body
            .get("call_id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RelayError::provider_call(PROVIDER_NAME, "响应缺少 call_id"))?
            .to_string();

        let mut result = ProviderResult::new(call_id);
        if let Some(status) = body.get("status").and_then(serde_json::Value::as_str) {
            result = result.with_status(status);
        }

        info!(
            "{} 已受理紧急呼叫: call_id={}",
            PROVIDER_NAME, result.call_id
        );
        Ok(result.with_raw(body))
    }
}
