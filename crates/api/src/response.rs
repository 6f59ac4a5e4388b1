use axum::{http::StatusCode, response::IntoResponse, Json};
use rideguard_domain::{DispatchOutcome, IncidentSummary, IncidentType, ProviderKind};
use serde::Serialize;

/// 紧急呼叫派发结果
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyResponse {
    pub success: bool,
    pub message: String,
    pub provider: ProviderKind,
    pub call_id: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
    pub emergency_phone: String,
    pub incident_type: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub data_used: IncidentSummary,
}

impl EmergencyResponse {
    pub fn new(
        outcome: DispatchOutcome,
        emergency_phone: &str,
        incident_type: &IncidentType,
        data_used: IncidentSummary,
    ) -> Self {
        let message = if outcome.is_success() {
            "Emergency call initiated successfully"
        } else {
            "Emergency call failed on all providers"
        };

        Self {
            success: outcome.is_success(),
            message: message.to_string(),
            provider: outcome.provider(),
            call_id: outcome.call_id().map(str::to_string),
            status: outcome.status().map(str::to_string),
            error: outcome.error().map(str::to_string),
            emergency_phone: emergency_phone.to_string(),
            incident_type: incident_type.to_string(),
            timestamp: chrono::Utc::now(),
            data_used,
        }
    }
}

impl IntoResponse for EmergencyResponse {
    fn into_response(self) -> axum::response::Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_GATEWAY
        };
        (status, Json(self)).into_response()
    }
}
