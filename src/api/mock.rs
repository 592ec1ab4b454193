//*** START FILE: src/api/mock.rs ***//
// Offline stand-in for the advisory backend. Answers every route with canned
// data after a fixed delay so the UI can be exercised without a server.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::api::backend::{AdvisoryBackend, AnalysisRequest, FarmerReport, HealthStatus};
use crate::api::error::ApiError;
use crate::types::analysis::{AnalysisResult, DiseaseDetection, RiskAssessment, SurvivalOutlook};
use crate::types::chat::ChatRequest;
use crate::types::media::AudioClip;
use crate::types::weather::{CurrentWeather, WeatherReport};

pub struct MockBackend {
    latency: Duration,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

pub fn mock_weather(city: &str) -> CurrentWeather {
    CurrentWeather {
        city: city.to_string(),
        temperature: 28.0,
        humidity: 78.0,
        wind_speed: 3.4,
        description: "Scattered Clouds".to_string(),
        feels_like: Some(31.0),
    }
}

/// The fixed "Late Blight" verdict, reshaped into the canonical record.
pub fn mock_analysis(crop_type: Option<&str>, city: &str) -> AnalysisResult {
    let plant = crop_type.filter(|c| !c.trim().is_empty()).unwrap_or("Potato");
    AnalysisResult {
        disease: DiseaseDetection {
            plant: plant.to_string(),
            disease: "Late Blight".to_string(),
            confidence: 87.5,
            is_healthy: false,
            full_class: None,
        },
        risk: Some(RiskAssessment {
            risk: "moderate".to_string(),
            message: "Humid conditions favour further spread over the next few days.".to_string(),
            factors: vec![
                "Humidity above 75%".to_string(),
                "Leaf wetness from morning dew".to_string(),
            ],
        }),
        survival: Some(SurvivalOutlook {
            survival_days: 5,
            outlook: "concerning".to_string(),
            message: "Treat within the week to protect the remaining canopy.".to_string(),
            recommendation: vec![
                "Remove and destroy infected plant material".to_string(),
                "Improve air circulation between rows".to_string(),
            ],
        }),
        weather: Some(WeatherReport { current: Some(mock_weather(city)), tomorrow: None }),
        severity: Some("Moderate".to_string()),
        affected_area: Some("15-20%".to_string()),
        symptoms: vec![
            "Dark spots on leaves".to_string(),
            "Water-soaked lesions".to_string(),
            "White fungal growth".to_string(),
        ],
        timestamp: Some(Utc::now()),
    }
}

#[async_trait]
impl AdvisoryBackend for MockBackend {
    async fn analyze_image(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        debug!(file = %request.image.file().file_name, "mock analysis");
        self.simulate_latency().await;
        Ok(mock_analysis(request.crop_type.as_deref(), &request.city))
    }

    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ApiError> {
        self.simulate_latency().await;
        Ok(mock_weather(city))
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        self.simulate_latency().await;
        let disease = request
            .context
            .disease_detection
            .as_ref()
            .and_then(|d| d.get("disease"))
            .and_then(Value::as_str);
        let reply = match disease {
            Some(disease) => format!(
                "Based on your latest scan ({disease}), remove affected leaves, avoid overhead watering and apply a copper-based fungicide. You asked: \"{}\"",
                request.message
            ),
            None => format!(
                "I can help with disease management, treatment advice and farming tips. Scan a plant first for specific advice. You asked: \"{}\"",
                request.message
            ),
        };
        Ok(reply)
    }

    async fn clear_chat(&self, _session_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn risk_prediction(&self, location: &str, crop_type: &str) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({
            "success": true,
            "location": location,
            "cropType": crop_type,
            "riskLevel": "Low",
            "forecastDays": 7,
            "message": "Optimal conditions; keep monitoring after rain."
        }))
    }

    async fn crop_twin(&self, farmer_id: &str, crop_type: &str) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({
            "success": true,
            "farmerId": farmer_id,
            "cropType": crop_type,
            "healthScore": 87,
            "growthStage": "Vegetative",
            "yieldForecast": "+15% vs last season"
        }))
    }

    async fn update_crop_twin(&self, farmer_id: &str, crop_data: &Value) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({ "success": true, "farmerId": farmer_id, "cropData": crop_data }))
    }

    async fn heatmap(&self, region: &str) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({
            "success": true,
            "region": region,
            "hotspots": [
                { "area": format!("{region} North"), "disease": "Late Blight", "reports": 12 },
                { "area": format!("{region} East"), "disease": "Leaf Rust", "reports": 4 }
            ]
        }))
    }

    async fn submit_report(&self, report: &FarmerReport) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({ "success": true, "message": "Report received", "report": report }))
    }

    async fn treatment(&self, disease_type: &str, severity: &str) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({
            "success": true,
            "diseaseType": disease_type,
            "severity": severity,
            "recommendations": [
                "Apply copper oxychloride at 3 g/L",
                "Repeat after 10 days if symptoms persist",
                "Rotate crops next season"
            ]
        }))
    }

    async fn voice_diagnosis(&self, audio: &AudioClip) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(json!({
            "success": true,
            "file": audio.file().file_name,
            "transcript": "Leaves have brown spots with yellow rings",
            "likelyDisease": "Early Blight"
        }))
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus { status: "healthy".to_string(), components: serde_json::Map::new() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chat::ChatContext;
    use crate::types::media::{MediaFile, SelectedImage};

    #[test]
    fn mock_analysis_uses_registered_crop() {
        let result = mock_analysis(Some("Wheat"), "Thane");
        assert_eq!(result.disease.plant, "Wheat");
        assert_eq!(result.disease.confidence, 87.5);
        assert_eq!(result.symptoms.len(), 3);
        assert_eq!(result.current_weather().map(|w| w.city.as_str()), Some("Thane"));
    }

    #[test]
    fn mock_analysis_defaults_plant_when_crop_blank() {
        assert_eq!(mock_analysis(Some("  "), "Thane").disease.plant, "Potato");
        assert_eq!(mock_analysis(None, "Thane").disease.plant, "Potato");
    }

    #[tokio::test]
    async fn mock_backend_answers_without_network() {
        let backend = MockBackend::new(Duration::ZERO);
        let image = SelectedImage::from_file(MediaFile::new("leaf.jpg", "image/jpeg", vec![1, 2, 3])).unwrap();
        let request = AnalysisRequest { image, city: "Thane".to_string(), crop_type: Some("Tomato".to_string()) };
        let result = backend.analyze_image(&request).await.unwrap();
        assert_eq!(result.disease.plant, "Tomato");

        let reply = backend
            .send_chat(&ChatRequest {
                message: "How do I treat it?".to_string(),
                session_id: "web-session".to_string(),
                context: ChatContext::default(),
            })
            .await
            .unwrap();
        assert!(reply.contains("How do I treat it?"));
    }
}
//*** END FILE: src/api/mock.rs ***//
