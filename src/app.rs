use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use rideguard_api::{create_app, response::EmergencyResponse, AppState};
use rideguard_config::AppConfig;
use rideguard_dispatcher::DispatchOrchestrator;
use rideguard_domain::{IncidentStore, IncidentType, RelayResult};
use tokio::net::TcpListener;
use tracing::info;

/// 主应用程序
pub struct Application {
    config: AppConfig,
    orchestrator: Arc<DispatchOrchestrator>,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let orchestrator = Arc::new(DispatchOrchestrator::from_config(&config));
        info!(
            "初始化应用程序，呼叫服务商: {}",
            orchestrator
                .providers()
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            orchestrator: Arc::clone(&self.orchestrator),
            store: IncidentStore::new(&self.config.emergency.incident_data_path),
            emergency_phone: self.config.emergency.phone.clone(),
        }
    }

    /// 不经过HTTP直接派发一次紧急呼叫
    pub async fn trigger(&self, incident_type: &IncidentType) -> RelayResult<EmergencyResponse> {
        let state = self.app_state();
        let record = state.store.load().await?;
        let outcome = self
            .orchestrator
            .dispatch(&state.emergency_phone, &record, incident_type)
            .await?;

        Ok(EmergencyResponse::new(
            outcome,
            &state.emergency_phone,
            incident_type,
            record.summary(),
        ))
    }

    /// 运行HTTP服务，`shutdown` 完成后停止接收新连接并等待进行中的请求完成
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_address = &self.config.api.bind_address;
        let app = create_app(self.app_state(), &self.config.api);

        let listener = TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {bind_address}"))?;

        info!("API服务器启动在 http://{}", bind_address);
        info!("紧急呼叫号码: {}", self.config.emergency.phone);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("API服务器收到关闭信号");
            })
            .await
            .context("API服务器运行失败")?;

        info!("API服务器已停止");
        Ok(())
    }
}
