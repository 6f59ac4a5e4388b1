use std::time::Duration;

use async_trait::async_trait;
use rideguard_config::FallbackProviderConfig;
use rideguard_domain::{
    CallProvider, IncidentRecord, IncidentType, ProviderKind, ProviderResult, RelayError,
    RelayResult, ScriptVariant,
};
use tracing::{error, info};

use crate::composer::compose;
use crate::twiml::VoiceResponse;

const PROVIDER_NAME: &str = "twilio";

pub const MENU_PROMPT: &str =
    "Press 1 to repeat this message, or stay on the line for emergency services.";
pub const CLOSING_MESSAGE: &str =
    "Thank you. This emergency call has been logged. Emergency services have been notified.";

/// 已校验的备用服务商凭据
struct Credentials<'a> {
    account_sid: &'a str,
    auth_token: &'a str,
    from_phone: &'a str,
}

/// 备用呼叫服务商：提交 TwiML 呼叫流程文档
pub struct TwilioProvider {
    config: FallbackProviderConfig,
    client: reqwest::Client,
}

impl TwilioProvider {
    pub fn new(config: FallbackProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 播报 -> 停顿 -> 菜单提示 -> 收集一位按键 -> 结束语 -> 挂断
    pub fn build_call_flow(&self, narrative: &str) -> VoiceResponse {
        let voice = self.config.voice.as_str();
        let language = self.config.language.as_str();

        VoiceResponse::new()
            .say(narrative, voice, language)
            .pause(self.config.pause_seconds)
            .say(MENU_PROMPT, voice, language)
            .gather(
                self.config.gather_action.as_str(),
                1,
                self.config.gather_timeout_seconds,
            )
            .say(CLOSING_MESSAGE, voice, language)
            .hangup()
    }

    /// 直接针对事故记录发起呼叫，内部生成简化脚本
    pub async fn dispatch_incident(
        &self,
        phone: &str,
        record: &IncidentRecord,
        incident_type: &IncidentType,
    ) -> RelayResult<ProviderResult> {
        let script = compose(record, incident_type, ScriptVariant::Simplified)?;
        self.place_call(phone, &script).await
    }

    fn credentials(&self) -> RelayResult<Credentials<'_>> {
        match (
            self.config.account_sid(),
            self.config.auth_token(),
            self.config.from_phone(),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_phone)) => Ok(Credentials {
                account_sid,
                auth_token,
                from_phone,
            }),
            _ => Err(RelayError::config_error(format!(
                "备用服务商凭据不完整: {}",
                self.config.missing_credentials().join(", ")
            ))),
        }
    }

    fn calls_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.config.base_url.trim_end_matches('/'),
            account_sid
        )
    }
}

#[async_trait]
impl CallProvider for TwilioProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Fallback
    }

    fn script_variant(&self) -> ScriptVariant {
        ScriptVariant::Simplified
    }

    async fn place_call(&self, phone: &str, script: &str) -> RelayResult<ProviderResult> {
        let credentials = self.credentials()?;
        let twiml = self.build_call_flow(script).to_xml();

        let record = self.config.record.to_string();
        let ring_timeout = self.config.ring_timeout_seconds.to_string();
        let form = [
            ("To", phone),
            ("From", credentials.from_phone),
            ("Twiml", twiml.as_str()),
            ("Record", record.as_str()),
            ("Timeout", ring_timeout.as_str()),
        ];

        let url = self.calls_url(credentials.account_sid);
        info!("通过 {} 发起备用紧急呼叫", PROVIDER_NAME);

        let response = self
            .client
            .post(&url)
            .basic_auth(credentials.account_sid, Some(credentials.auth_token))
            .timeout(Duration::from_secs(self.config.request_timeout_seconds))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("{} 请求失败: {}", PROVIDER_NAME, e);
                RelayError::provider_call(PROVIDER_NAME, format!("请求失败: {e}"))
            })?;

        let status = response.status();
        let body: serde_json::Value = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)),
            Err(e) => {
                return Err(RelayError::provider_call(
                    PROVIDER_NAME,
                    format!("读取响应失败: {e}"),
                ))
            }
        };

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            error!("{} 返回错误: HTTP {} - {}", PROVIDER_NAME, status, message);
            return Err(RelayError::provider_call(
                PROVIDER_NAME,
                format!("HTTP {status} - {message}"),
            ));
        }

        let sid = body
            .get("sid")
            .and_then(serde_json::Value::as_str)
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| RelayError::provider_call(PROVIDER_NAME, "响应缺少 sid"))?
            .to_string();

        let mut result = ProviderResult::new(sid);
        if let Some(call_status) = body.get("status").and_then(serde_json::Value::as_str) {
            result = result.with_status(call_status);
        }

        info!(
            "{} 已受理备用紧急呼叫: sid={}, status={:?}",
            PROVIDER_NAME, result.call_id, result.status
        );
        Ok(result.with_raw(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_flow_order() {
        let provider = TwilioProvider::new(FallbackProviderConfig::default());
        let flow = provider.build_call_flow("Narrative");

        let xml = flow.to_xml();
        let say = xml.find("Narrative").unwrap();
        let pause = xml.find(r#"<Pause length="2"/>"#).unwrap();
        let menu = xml.find("Press 1 to repeat").unwrap();
        let gather = xml.find(r#"numDigits="1" timeout="10""#).unwrap();
        let closing = xml.find("This emergency call has been logged").unwrap();
        let hangup = xml.find("<Hangup/>").unwrap();

        assert!(say < pause && pause < menu && menu < gather);
        assert!(gather < closing && closing < hangup);
        assert!(xml.contains(r#"voice="alice""#));
        assert!(xml.contains(r#"language="en-US""#));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let config = FallbackProviderConfig {
            account_sid: Some("AC123".to_string()),
            // 不可达地址：若真的发出请求，错误类型会是 ProviderCall
            base_url: "http://127.0.0.1:1".to_string(),
            ..FallbackProviderConfig::default()
        };
        let provider = TwilioProvider::new(config);

        let err = provider.place_call("+15550001111", "hi").await.unwrap_err();
        match err {
            RelayError::Configuration(msg) => {
                assert!(msg.contains("fallback.auth_token"));
                assert!(msg.contains("fallback.from_phone"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }
}
