use serde::{Deserialize, Serialize};

/// Current conditions as reported by the backend's weather route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
}

/// Weather block embedded in an analysis result. The backend sends `null`
/// for either half when its forecaster call failed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WeatherReport {
    #[serde(default)]
    pub current: Option<CurrentWeather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow: Option<CurrentWeather>,
}
