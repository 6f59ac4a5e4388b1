//! In-memory call provider for dispatch tests
//!
//! 记录每一次 `place_call` 的号码和脚本，按预设模式返回成功或失败，
//! 不会发出任何网络请求。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rideguard_domain::{CallProvider, ProviderKind, ProviderResult, ScriptVariant};
use rideguard_errors::{RelayError, RelayResult};

/// 一次被记录的呼叫
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub phone: String,
    pub script: String,
}

#[derive(Debug, Clone)]
enum Behavior {
    Succeed { call_id: String, status: Option<String> },
    Fail(RelayError),
}

#[derive(Debug, Clone)]
pub struct MockCallProvider {
    name: String,
    kind: ProviderKind,
    variant: ScriptVariant,
    behavior: Behavior,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCallProvider {
    fn new(name: &str, kind: ProviderKind, variant: ScriptVariant, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            kind,
            variant,
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 成功的主服务商，使用完整脚本
    pub fn primary_ok(call_id: &str) -> Self {
        Self::new(
            "mock-primary",
            ProviderKind::Primary,
            ScriptVariant::Detailed,
            Behavior::Succeed {
                call_id: call_id.to_string(),
                status: None,
            },
        )
    }

    pub fn primary_failing(message: &str) -> Self {
        Self::new(
            "mock-primary",
            ProviderKind::Primary,
            ScriptVariant::Detailed,
            Behavior::Fail(RelayError::provider_call("mock-primary", message)),
        )
    }

    /// 成功的备用服务商，使用简化脚本
    pub fn fallback_ok(sid: &str, status: &str) -> Self {
        Self::new(
            "mock-fallback",
            ProviderKind::Fallback,
            ScriptVariant::Simplified,
            Behavior::Succeed {
                call_id: sid.to_string(),
                status: Some(status.to_string()),
            },
        )
    }

    pub fn fallback_failing(message: &str) -> Self {
        Self::new(
            "mock-fallback",
            ProviderKind::Fallback,
            ScriptVariant::Simplified,
            Behavior::Fail(RelayError::provider_call("mock-fallback", message)),
        )
    }

    /// 以指定错误失败，例如凭据缺失的配置错误
    pub fn failing_with(mut self, error: RelayError) -> Self {
        self.behavior = Behavior::Fail(error);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CallProvider for MockCallProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn script_variant(&self) -> ScriptVariant {
        self.variant
    }

    async fn place_call(&self, phone: &str, script: &str) -> RelayResult<ProviderResult> {
        self.calls.lock().unwrap().push(RecordedCall {
            phone: phone.to_string(),
            script: script.to_string(),
        });

        match &self.behavior {
            Behavior::Succeed { call_id, status } => {
                let result = ProviderResult::new(call_id.clone());
                Ok(match status {
                    Some(status) => result.with_status(status.clone()),
                    None => result,
                })
            }
            Behavior::Fail(error) => Err(error.clone()),
        }
    }
}
