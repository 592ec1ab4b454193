use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatRequest;
use crate::types::media::{AudioClip, SelectedImage};
use crate::types::weather::CurrentWeather;

/// Inputs for one image analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: SelectedImage,
    pub city: String,
    /// Crop the farmer registered with. Only the mock backend reads it; the
    /// HTTP routes infer the plant from the image.
    pub crop_type: Option<String>,
}

/// Crowdsourced field observation sent to `/reports/submit`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FarmerReport {
    pub farmer_name: String,
    pub location: String,
    pub crop_type: String,
    pub disease_observed: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub components: serde_json::Map<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Everything the client asks of the advisory backend.
///
/// Routes with a documented response shape decode into typed records; the
/// auxiliary routes hand back the raw JSON body once its `success` flag has
/// been checked.
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    async fn analyze_image(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError>;

    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ApiError>;

    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError>;

    async fn clear_chat(&self, session_id: &str) -> Result<(), ApiError>;

    async fn risk_prediction(&self, location: &str, crop_type: &str) -> Result<Value, ApiError>;

    async fn crop_twin(&self, farmer_id: &str, crop_type: &str) -> Result<Value, ApiError>;

    async fn update_crop_twin(&self, farmer_id: &str, crop_data: &Value) -> Result<Value, ApiError>;

    async fn heatmap(&self, region: &str) -> Result<Value, ApiError>;

    async fn submit_report(&self, report: &FarmerReport) -> Result<Value, ApiError>;

    async fn treatment(&self, disease_type: &str, severity: &str) -> Result<Value, ApiError>;

    async fn voice_diagnosis(&self, audio: &AudioClip) -> Result<Value, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
