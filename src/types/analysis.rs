//*** START FILE: src/types/analysis.rs ***//
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::chat::ChatContext;
use crate::types::weather::{CurrentWeather, WeatherReport};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DiseaseDetection {
    pub plant: String,
    pub disease: String,
    /// Percentage in `0.0..=100.0`.
    pub confidence: f64,
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_class: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RiskAssessment {
    pub risk: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub factors: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SurvivalOutlook {
    pub survival_days: u32,
    pub outlook: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recommendation: Vec<String>,
}

/// Canonical analysis record. The nested `disease/risk/survival` layout is
/// what the backend's `/analyze` route returns; the flat fields the mock
/// generator used to produce (severity, affected area, symptoms, timestamp)
/// ride along as optional extras.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    pub disease: DiseaseDetection,
    #[serde(default)]
    pub risk: Option<RiskAssessment>,
    #[serde(default)]
    pub survival: Option<SurvivalOutlook>,
    #[serde(default)]
    pub weather: Option<WeatherReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AnalysisResult {
    pub fn current_weather(&self) -> Option<&CurrentWeather> {
        self.weather.as_ref().and_then(|w| w.current.as_ref())
    }

    /// Replaces only the current-conditions half of the weather block.
    pub fn merge_current_weather(&mut self, current: CurrentWeather) {
        self.weather.get_or_insert_with(WeatherReport::default).current = Some(current);
    }

    /// Severity label used by the treatment panel. Falls back to the risk
    /// level when the backend did not grade severity.
    pub fn severity_label(&self) -> String {
        if let Some(severity) = &self.severity {
            return severity.clone();
        }
        match &self.risk {
            Some(risk) => capitalize(&risk.risk),
            None if self.disease.is_healthy => "None".to_string(),
            None => "Moderate".to_string(),
        }
    }

    pub fn chat_context(&self, fallback_weather: Option<&CurrentWeather>) -> ChatContext {
        let weather = self.current_weather().or(fallback_weather);
        ChatContext {
            disease_detection: serde_json::to_value(&self.disease).ok(),
            weather_current: weather.and_then(|w| serde_json::to_value(w).ok()),
            risk_analysis: self.risk.as_ref().and_then(|r| serde_json::to_value(r).ok()),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backend_payload() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "disease": {"plant": "Tomato", "disease": "Early Blight", "full_class": "Tomato___Early_blight", "confidence": 91.2, "is_healthy": false},
            "risk": {"risk": "high", "message": "Humid and warm", "factors": ["Humidity 85%"]},
            "survival": {"survival_days": 3, "outlook": "critical", "message": "Act now", "recommendation": ["Apply fungicide"]},
            "weather": {"current": {"city": "Thane", "temperature": 29.5, "humidity": 85, "wind_speed": 3.1, "description": "Mist"}, "tomorrow": null}
        })
    }

    #[test]
    fn decodes_nested_backend_shape() {
        let result: AnalysisResult = serde_json::from_value(backend_payload()).unwrap();
        assert_eq!(result.disease.plant, "Tomato");
        assert_eq!(result.risk.as_ref().map(|r| r.factors.len()), Some(1));
        assert_eq!(result.survival.as_ref().map(|s| s.survival_days), Some(3));
        assert_eq!(result.current_weather().map(|w| w.city.as_str()), Some("Thane"));
        assert!(result.symptoms.is_empty());
    }

    #[test]
    fn null_risk_and_survival_decode_as_none() {
        let result: AnalysisResult = serde_json::from_value(serde_json::json!({
            "disease": {"plant": "Apple", "disease": "healthy", "confidence": 99.0, "is_healthy": true},
            "risk": null,
            "survival": null,
            "weather": {"current": null}
        }))
        .unwrap();
        assert!(result.risk.is_none());
        assert!(result.current_weather().is_none());
        assert_eq!(result.severity_label(), "None");
    }

    #[test]
    fn severity_falls_back_to_risk_level() {
        let result: AnalysisResult = serde_json::from_value(backend_payload()).unwrap();
        assert_eq!(result.severity_label(), "High");
    }

    #[test]
    fn chat_context_prefers_embedded_weather() {
        let result: AnalysisResult = serde_json::from_value(backend_payload()).unwrap();
        let other = CurrentWeather { city: "Pune".to_string(), ..Default::default() };
        let context = result.chat_context(Some(&other));
        assert_eq!(context.weather_current.unwrap()["city"], "Thane");
        assert_eq!(context.risk_analysis.unwrap()["risk"], "high");
    }

    #[test]
    fn merging_weather_keeps_tomorrow() {
        let mut result = AnalysisResult::default();
        result.weather = Some(WeatherReport {
            current: None,
            tomorrow: Some(CurrentWeather { city: "Thane".to_string(), ..Default::default() }),
        });
        result.merge_current_weather(CurrentWeather { city: "Thane".to_string(), temperature: 30.0, ..Default::default() });
        let weather = result.weather.unwrap();
        assert_eq!(weather.current.map(|c| c.temperature), Some(30.0));
        assert!(weather.tomorrow.is_some());
    }
}
//*** END FILE: src/types/analysis.rs ***//
