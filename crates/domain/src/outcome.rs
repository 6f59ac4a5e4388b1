use serde::Serialize;

use crate::value_objects::ProviderKind;

/// 单个服务商成功受理呼叫后的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderResult {
    /// 服务商分配的呼叫标识
    pub call_id: String,
    /// 服务商报告的呼叫状态
    pub status: Option<String>,
    /// 服务商原始响应
    pub raw: serde_json::Value,
}

impl ProviderResult {
    pub fn new<S: Into<String>>(call_id: S) -> Self {
        Self {
            call_id: call_id.into(),
            status: None,
            raw: serde_json::Value::Null,
        }
    }

    pub fn with_status<S: Into<String>>(mut self, status: S) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }
}

/// 一次派发的统一结果
///
/// 成功时只有 `call_id`，失败时只有 `error`，由构造函数保证。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    success: bool,
    provider: ProviderKind,
    call_id: Option<String>,
    status: Option<String>,
    error: Option<String>,
}

impl DispatchOutcome {
    pub fn succeeded(provider: ProviderKind, result: ProviderResult) -> Self {
        Self {
            success: true,
            provider,
            call_id: Some(result.call_id),
            status: result.status,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(provider: ProviderKind, error: S) -> Self {
        Self {
            success: false,
            provider,
            call_id: None,
            status: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeded_outcome() {
        let result = ProviderResult::new("call-123").with_status("queued");
        let outcome = DispatchOutcome::succeeded(ProviderKind::Primary, result);

        assert!(outcome.is_success());
        assert_eq!(outcome.provider(), ProviderKind::Primary);
        assert_eq!(outcome.call_id(), Some("call-123"));
        assert_eq!(outcome.status(), Some("queued"));
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_failed_outcome() {
        let outcome = DispatchOutcome::failed(ProviderKind::Fallback, "HTTP 401");

        assert!(!outcome.is_success());
        assert_eq!(outcome.provider(), ProviderKind::Fallback);
        assert!(outcome.call_id().is_none());
        assert_eq!(outcome.error(), Some("HTTP 401"));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome =
            DispatchOutcome::succeeded(ProviderKind::Fallback, ProviderResult::new("CA42"));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["provider"], "fallback");
        assert_eq!(json["call_id"], "CA42");
        assert!(json["error"].is_null());
    }
}
