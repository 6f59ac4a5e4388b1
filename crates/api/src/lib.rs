//! # RideGuard API
//!
//! 紧急呼叫中继的HTTP接口，基于Axum构建。
//!
//! ## API 端点
//!
//! - `POST /api/emergency` - 读取事故数据并派发紧急呼叫
//! - `GET /api/test` - 服务在线检查
//! - `GET /health` - 健康检查
//!
//! ## 响应格式
//!
//! 派发成功返回 200，所有呼叫服务商均失败返回 502：
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Emergency call initiated successfully",
//!   "provider": "primary",
//!   "call_id": "call-123",
//!   "emergency_phone": "+15550001111",
//!   "incident_type": "medical_emergency",
//!   "data_used": {"passenger": "Jane Doe", "vehicle": "Toyota Camry (ABC123)"}
//! }
//! ```
//!
//! 请求或事故数据错误使用统一的错误包：
//!
//! ```json
//! {"error": {"message": "...", "type": "INCOMPLETE_INCIDENT_RECORD", "code": 422}}
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use rideguard_config::ApiConfig;
use tower::ServiceBuilder;

use middleware::{cors_layer, request_logging, trace_layer};
pub use routes::{create_routes, AppState};

/// 创建完整的API应用
pub fn create_app(state: AppState, api_config: &ApiConfig) -> Router {
    let app = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(axum::middleware::from_fn(request_logging)),
    );

    if api_config.cors_enabled {
        app.layer(cors_layer())
    } else {
        app
    }
}
