use axum::Json;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "RideGuard Emergency Relay";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 前端用于确认服务在线
pub async fn service_status() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
