use serde::{Deserialize, Serialize};

pub const HEALTH_STATUS: &str = "SmokeWatch AI Backend Running";
pub const UPLOAD_SUCCESS: &str = "Upload successful";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub detail: String,
}
