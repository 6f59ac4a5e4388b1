use std::collections::HashMap;
use std::sync::Arc;

use rideguard_config::AppConfig;
use rideguard_domain::{
    CallProvider, DispatchOutcome, IncidentRecord, IncidentType, ProviderKind, RelayError,
    RelayResult, ScriptVariant,
};
use tracing::{error, info, warn};

use crate::bland::BlandProvider;
use crate::composer::compose;
use crate::twilio::TwilioProvider;

/// 按优先级依次尝试呼叫服务商，首个成功即返回
pub struct DispatchOrchestrator {
    providers: Vec<Arc<dyn CallProvider>>,
}

impl DispatchOrchestrator {
    pub fn new(providers: Vec<Arc<dyn CallProvider>>) -> Self {
        Self { providers }
    }

    /// 主服务商始终在链首；备用服务商仅在启用时加入
    pub fn from_config(config: &AppConfig) -> Self {
        let mut providers: Vec<Arc<dyn CallProvider>> =
            vec![Arc::new(BlandProvider::new(config.primary.clone()))];

        if config.fallback.enabled {
            providers.push(Arc::new(TwilioProvider::new(config.fallback.clone())));
        } else {
            info!("备用呼叫服务商已禁用");
        }

        Self::new(providers)
    }

    pub fn providers(&self) -> &[Arc<dyn CallProvider>] {
        &self.providers
    }

    /// 派发一次紧急呼叫
    ///
    /// `Err` 只会是事故记录校验失败（此时不会发出任何呼叫）；
    /// 服务商失败一律折叠进返回的 [`DispatchOutcome`]。
    pub async fn dispatch(
        &self,
        phone: &str,
        record: &IncidentRecord,
        incident_type: &IncidentType,
    ) -> RelayResult<DispatchOutcome> {
        record.validate()?;

        let mut scripts: HashMap<ScriptVariant, String> = HashMap::new();
        for provider in &self.providers {
            let variant = provider.script_variant();
            if !scripts.contains_key(&variant) {
                scripts.insert(variant, compose(record, incident_type, variant)?);
            }
        }

        let Some(first) = self.providers.first() else {
            let err = RelayError::OrchestrationFailure("没有配置任何呼叫服务商".to_string());
            error!("{}", err);
            return Ok(DispatchOutcome::failed(ProviderKind::Primary, err.to_string()));
        };

        let mut last_kind = first.kind();
        let mut last_error = String::new();

        for provider in &self.providers {
            let script = match scripts.get(&provider.script_variant()) {
                Some(script) => script,
                None => continue,
            };

            info!(
                "尝试通过 {} ({}) 派发紧急呼叫: incident_type={}",
                provider.name(),
                provider.kind(),
                incident_type
            );

            match provider.place_call(phone, script).await {
                Ok(result) => {
                    info!(
                        "紧急呼叫派发成功: provider={}, call_id={}",
                        provider.name(),
                        result.call_id
                    );
                    return Ok(DispatchOutcome::succeeded(provider.kind(), result));
                }
                Err(e) => {
                    if e.is_provider_failure() {
                        warn!("呼叫服务商 {} 失败，尝试下一个: {}", provider.name(), e);
                    } else {
                        error!("呼叫服务商 {} 返回意外错误，尝试下一个: {}", provider.name(), e);
                    }
                    last_kind = provider.kind();
                    last_error = e.to_string();
                }
            }
        }

        let failure = RelayError::OrchestrationFailure(last_error.clone());
        error!("所有呼叫服务商均失败: {}", failure);
        Ok(DispatchOutcome::failed(last_kind, last_error))
    }
}
