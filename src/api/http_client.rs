//! HTTP implementation of [`AdvisoryBackend`].
//!
//! Every route returns a JSON envelope with a boolean `success`. Failure
//! envelopes come back with 4xx/5xx statuses, so bodies are decoded
//! regardless of status and the flag decides the outcome.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::api::backend::{AdvisoryBackend, AnalysisRequest, FarmerReport, HealthStatus};
use crate::api::error::ApiError;
use crate::config::AnalyzeRoute;
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatRequest;
use crate::types::media::{AudioClip, MediaFile};
use crate::types::weather::CurrentWeather;

pub struct HttpBackend {
    base_url: Url,
    client: Client,
    analyze_route: AnalyzeRoute,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration, analyze_route: AnalyzeRoute) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Transport(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!("{} cannot be used as a base URL", base_url)));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client, analyze_route })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("{} cannot be used as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        read_envelope(response).await
    }

    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, ApiError> {
        debug!(%url, "POST json");
        let response = self.client.post(url).json(body).send().await?;
        read_envelope(response).await
    }

    async fn post_form(&self, url: Url, form: Form) -> Result<Response, ApiError> {
        debug!(%url, "POST multipart");
        Ok(self.client.post(url).multipart(form).send().await?)
    }
}

fn file_part(file: &MediaFile) -> Result<Part, ApiError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Validation(format!("Unsupported file type {}: {}", file.mime, e)))
}

fn error_text(body: &Value) -> Option<String> {
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Accepts the body only when it carries `success: true`.
pub(crate) fn check_success(body: Value) -> Result<Value, ApiError> {
    match body.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(body),
        _ => Err(ApiError::application(error_text(&body))),
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(body)?)
}

async fn read_envelope(response: Response) -> Result<Value, ApiError> {
    let body: Value = response.json().await?;
    check_success(body)
}

/// Like [`read_envelope`] but refuses anything not labelled as JSON.
async fn read_json_strict(response: Response) -> Result<Value, ApiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.contains("application/json"));
    if !is_json {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::UnexpectedResponse { status, body });
    }
    read_envelope(response).await
}

#[async_trait]
impl AdvisoryBackend for HttpBackend {
    #[instrument(skip(self, request), fields(file = %request.image.file().file_name))]
    async fn analyze_image(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        let image = file_part(request.image.file())?;
        let (url, form) = match self.analyze_route {
            AnalyzeRoute::Primary => (
                self.endpoint(&["analyze"])?,
                Form::new().part("image", image).text("city", request.city.clone()),
            ),
            AnalyzeRoute::Variant => (self.endpoint(&["disease", "analyze"])?, Form::new().part("image", image)),
        };
        let response = self.post_form(url, form).await?;
        let body = read_json_strict(response).await?;
        decode(body)
    }

    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ApiError> {
        let mut url = self.endpoint(&["weather"])?;
        url.query_pairs_mut().append_pair("city", city);
        let body = self.get_json(url).await?;
        match body.get("current") {
            Some(current) if current.is_null() => Err(ApiError::application(Some(format!("No current weather for {}", city)))),
            // The forecaster's own failure is nested inside a successful envelope.
            Some(current) if current.get("success").and_then(Value::as_bool) == Some(false) => {
                Err(ApiError::application(error_text(current)))
            }
            Some(current) => decode(current.clone()),
            None => Err(ApiError::application(Some(format!("No current weather for {}", city)))),
        }
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let body = self.post_json(self.endpoint(&["chat"])?, &serde_json::to_value(request)?).await?;
        body.get("response")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ApiError::Transport("Malformed response: chat reply carried no text".to_string()))
    }

    async fn clear_chat(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_json(self.endpoint(&["chat", "clear"])?, &json!({ "sessionId": session_id }))
            .await
            .map(|_| ())
    }

    async fn risk_prediction(&self, location: &str, crop_type: &str) -> Result<Value, ApiError> {
        self.post_json(
            self.endpoint(&["prediction", "risk"])?,
            &json!({ "location": location, "cropType": crop_type }),
        )
        .await
    }

    async fn crop_twin(&self, farmer_id: &str, crop_type: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["croptwin", farmer_id, crop_type])?).await
    }

    async fn update_crop_twin(&self, farmer_id: &str, crop_data: &Value) -> Result<Value, ApiError> {
        self.post_json(
            self.endpoint(&["croptwin", "update"])?,
            &json!({ "farmerId": farmer_id, "cropData": crop_data }),
        )
        .await
    }

    async fn heatmap(&self, region: &str) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["heatmap", region])?).await
    }

    async fn submit_report(&self, report: &FarmerReport) -> Result<Value, ApiError> {
        self.post_json(self.endpoint(&["reports", "submit"])?, &serde_json::to_value(report)?)
            .await
    }

    async fn treatment(&self, disease_type: &str, severity: &str) -> Result<Value, ApiError> {
        self.post_json(
            self.endpoint(&["treatment", "recommend"])?,
            &json!({ "diseaseType": disease_type, "severity": severity }),
        )
        .await
    }

    async fn voice_diagnosis(&self, audio: &AudioClip) -> Result<Value, ApiError> {
        let form = Form::new().part("audio", file_part(audio.file())?);
        let response = self.post_form(self.endpoint(&["voice", "diagnose"])?, form).await?;
        read_envelope(response).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"])?;
        debug!(%url, "GET");
        let body: Value = self.client.get(url).send().await?.json().await?;
        decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5), AnalyzeRoute::Primary).unwrap()
    }

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let backend = backend("http://localhost:5000/api");
        let url = backend.endpoint(&["croptwin", "Asha Patil", "wheat"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/croptwin/Asha%20Patil/wheat");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let backend = backend("http://localhost:5000/api/");
        assert_eq!(backend.endpoint(&["chat", "clear"]).unwrap().as_str(), "http://localhost:5000/api/chat/clear");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(1), AnalyzeRoute::Primary).is_err());
    }

    #[test]
    fn success_flag_decides_outcome() {
        assert!(check_success(json!({"success": true, "response": "hi"})).is_ok());
        assert_eq!(
            check_success(json!({"success": false, "error": "No message provided"})),
            Err(ApiError::application(Some("No message provided".to_string())))
        );
        assert_eq!(
            check_success(json!({"success": false, "message": "Failed to process voice input"})),
            Err(ApiError::application(Some("Failed to process voice input".to_string())))
        );
        assert_eq!(check_success(json!({"data": 1})), Err(ApiError::application(None)));
    }
}
