use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rideguard_errors::RelayError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("紧急呼叫错误: {0}")]
    Relay(#[from] RelayError),

    #[error("请求参数错误: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_type, suggestions) = match &self {
            ApiError::Relay(RelayError::MissingField { field }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("事故记录缺少必填字段: {}", field),
                "INCOMPLETE_INCIDENT_RECORD",
                vec![
                    "请检查事故数据文件是否包含乘客、司机、车辆和位置的全部字段".to_string(),
                    "未发出任何呼叫".to_string(),
                ],
            ),
            ApiError::Relay(RelayError::InvalidField { field, reason }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("事故记录字段无效: {} ({})", field, reason),
                "INVALID_INCIDENT_RECORD",
                vec![
                    "请检查车辆年份和GPS坐标的取值".to_string(),
                    "未发出任何呼叫".to_string(),
                ],
            ),
            ApiError::Relay(err @ (RelayError::Store(_) | RelayError::Serialization(_))) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "INCIDENT_DATA_UNAVAILABLE",
                vec!["请检查 emergency.incident_data_path 指向的文件".to_string()],
            ),
            ApiError::Relay(RelayError::Configuration(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("配置错误: {}", msg),
                "CONFIGURATION_ERROR",
                vec!["请检查服务配置文件或 RIDEGUARD__ 环境变量".to_string()],
            ),
            ApiError::Relay(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "INTERNAL_ERROR",
                vec!["查看 GET /health 检查系统状态".to_string()],
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("请求参数错误: {}", msg),
                "BAD_REQUEST",
                vec![
                    "请检查JSON格式是否正确".to_string(),
                    "确保Content-Type正确设置".to_string(),
                ],
            ),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
