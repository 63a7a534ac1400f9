pub mod upload;

use axum::Json;

use crate::models::{HealthResponse, HEALTH_STATUS};

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}
