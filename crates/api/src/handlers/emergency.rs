use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rideguard_domain::{IncidentType, RelayError, DEFAULT_INCIDENT_TYPE};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    response::EmergencyResponse,
    routes::AppState,
};

/// 紧急呼叫触发请求，未携带JSON请求体时全部取默认值
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmergencyRequest {
    pub incident_type: String,
    pub severity: String,
    pub additional_info: Option<String>,
}

impl Default for EmergencyRequest {
    fn default() -> Self {
        Self {
            incident_type: DEFAULT_INCIDENT_TYPE.to_string(),
            severity: "high".to_string(),
            additional_info: None,
        }
    }
}

impl EmergencyRequest {
    fn from_payload(payload: Result<Json<Self>, JsonRejection>) -> ApiResult<Self> {
        match payload {
            Ok(Json(request)) => Ok(request),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self::default()),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// 读取事故数据并派发紧急呼叫
pub async fn trigger_emergency(
    State(state): State<AppState>,
    payload: Result<Json<EmergencyRequest>, JsonRejection>,
) -> ApiResult<EmergencyResponse> {
    let request = EmergencyRequest::from_payload(payload)?;

    if state.emergency_phone.trim().is_empty() {
        return Err(RelayError::config_error("emergency.phone 未配置").into());
    }

    let record = state.store.load().await?;
    let incident_type = IncidentType::new(request.incident_type);

    info!(
        "收到紧急呼叫请求: incident_type={}, severity={}, additional_info={}",
        incident_type,
        request.severity,
        request.additional_info.is_some()
    );

    let outcome = state
        .orchestrator
        .dispatch(&state.emergency_phone, &record, &incident_type)
        .await?;

    if !outcome.is_success() {
        warn!("紧急呼叫派发失败: {:?}", outcome.error());
    }

    Ok(EmergencyResponse::new(
        outcome,
        &state.emergency_phone,
        &incident_type,
        record.summary(),
    ))
}
