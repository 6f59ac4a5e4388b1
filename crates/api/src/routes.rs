use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use rideguard_dispatcher::DispatchOrchestrator;
use rideguard_domain::IncidentStore;

use crate::handlers::{
    emergency::trigger_emergency,
    health::{health_check, service_status},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<DispatchOrchestrator>,
    pub store: IncidentStore,
    pub emergency_phone: String,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/test", get(service_status))
        .route("/api/emergency", post(trigger_emergency))
        .with_state(state)
}
