//! Commands the session layer hands to the runner, and the completions that
//! come back. Views never talk to the backend directly.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::api::{AdvisoryBackend, AnalysisRequest, ApiError, FarmerReport, HealthStatus};
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatRequest;
use crate::types::media::AudioClip;
use crate::types::weather::CurrentWeather;

/// Auxiliary advisory panels whose responses are implementation-defined JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Risk,
    CropTwin,
    CropTwinUpdate,
    Heatmap,
    Report,
    Treatment,
    Voice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Analyze(AnalysisRequest),
    Weather { city: String },
    Chat(ChatRequest),
    ClearChat { session_id: String },
    Risk { location: String, crop_type: String },
    CropTwin { farmer_id: String, crop_type: String },
    UpdateCropTwin { farmer_id: String, crop_data: Value },
    Heatmap { region: String },
    SubmitReport(FarmerReport),
    Treatment { disease_type: String, severity: String },
    Voice(AudioClip),
    Health,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Analysis(Result<AnalysisResult, ApiError>),
    Weather(Result<CurrentWeather, ApiError>),
    Chat(Result<String, ApiError>),
    ChatCleared(Result<(), ApiError>),
    Tool(ToolKind, Result<Value, ApiError>),
    Health(Result<HealthStatus, ApiError>),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Analyze(_) => "analyze",
            Request::Weather { .. } => "weather",
            Request::Chat(_) => "chat",
            Request::ClearChat { .. } => "chat-clear",
            Request::Risk { .. } => "risk",
            Request::CropTwin { .. } => "croptwin",
            Request::UpdateCropTwin { .. } => "croptwin-update",
            Request::Heatmap { .. } => "heatmap",
            Request::SubmitReport(_) => "report",
            Request::Treatment { .. } => "treatment",
            Request::Voice(_) => "voice",
            Request::Health => "health",
        }
    }
}

/// Runs one request against the backend and wraps the outcome.
pub async fn execute(backend: Arc<dyn AdvisoryBackend>, request: Request) -> Completion {
    debug!(request = request.name(), "dispatching");
    match request {
        Request::Analyze(req) => Completion::Analysis(backend.analyze_image(&req).await),
        Request::Weather { city } => Completion::Weather(backend.current_weather(&city).await),
        Request::Chat(req) => Completion::Chat(backend.send_chat(&req).await),
        Request::ClearChat { session_id } => Completion::ChatCleared(backend.clear_chat(&session_id).await),
        Request::Risk { location, crop_type } => {
            Completion::Tool(ToolKind::Risk, backend.risk_prediction(&location, &crop_type).await)
        }
        Request::CropTwin { farmer_id, crop_type } => {
            Completion::Tool(ToolKind::CropTwin, backend.crop_twin(&farmer_id, &crop_type).await)
        }
        Request::UpdateCropTwin { farmer_id, crop_data } => Completion::Tool(
            ToolKind::CropTwinUpdate,
            backend.update_crop_twin(&farmer_id, &crop_data).await,
        ),
        Request::Heatmap { region } => Completion::Tool(ToolKind::Heatmap, backend.heatmap(&region).await),
        Request::SubmitReport(report) => Completion::Tool(ToolKind::Report, backend.submit_report(&report).await),
        Request::Treatment { disease_type, severity } => Completion::Tool(
            ToolKind::Treatment,
            backend.treatment(&disease_type, &severity).await,
        ),
        Request::Voice(clip) => Completion::Tool(ToolKind::Voice, backend.voice_diagnosis(&clip).await),
        Request::Health => Completion::Health(backend.health().await),
    }
}
