use async_trait::async_trait;
use rideguard_errors::RelayResult;

use crate::outcome::ProviderResult;
use crate::value_objects::{ProviderKind, ScriptVariant};

/// Interface for outbound voice call providers
///
/// 编排器按优先级依次调用实现，单次调用不做重试。
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// 服务商名称，用于日志和错误信息
    fn name(&self) -> &str;

    /// 在派发链中的角色
    fn kind(&self) -> ProviderKind;

    /// 该服务商消费的脚本形态
    fn script_variant(&self) -> ScriptVariant;

    /// 向 `phone` 发起一次呼叫，播报 `script`
    async fn place_call(&self, phone: &str, script: &str) -> RelayResult<ProviderResult>;
}
