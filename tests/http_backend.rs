use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use agroscan_rust_gui::api::{AdvisoryBackend, AnalysisRequest, ApiError, FailureKind, HttpBackend};
use agroscan_rust_gui::config::AnalyzeRoute;
use agroscan_rust_gui::types::chat::{ChatContext, ChatRequest};
use agroscan_rust_gui::types::media::{MediaFile, SelectedImage};

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn backend(base: &str, route: AnalyzeRoute) -> HttpBackend {
    HttpBackend::new(base, Duration::from_secs(5), route).unwrap()
}

fn leaf_request(city: &str) -> AnalysisRequest {
    AnalysisRequest {
        image: SelectedImage::from_file(MediaFile::new("leaf.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff, 0xe0])).unwrap(),
        city: city.to_string(),
        crop_type: None,
    }
}

fn analysis_body() -> Value {
    json!({
        "success": true,
        "disease": {"plant": "Tomato", "disease": "Early Blight", "full_class": "Tomato___Early_blight", "confidence": 91.2, "is_healthy": false},
        "risk": {"risk": "high", "message": "Warm and humid.", "factors": ["Humidity 85%"]},
        "survival": {"survival_days": 6, "outlook": "poor", "message": "Act quickly.", "recommendation": ["Spray fungicide"]},
        "weather": {"current": {"city": "Thane", "temperature": 29.0, "humidity": 85.0, "wind_speed": 2.0, "description": "haze"}, "tomorrow": null}
    })
}

/// Multipart check without pulling in axum's multipart extractor.
async fn analyze_handler(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or("");
    let text = String::from_utf8_lossy(&body);
    if !content_type.starts_with("multipart/form-data")
        || !text.contains("name=\"image\"; filename=\"leaf.jpg\"")
        || !text.contains("name=\"city\"")
        || !text.contains("Thane")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"success": false, "error": "No image file provided"})));
    }
    (StatusCode::OK, Json(analysis_body()))
}

#[tokio::test]
async fn analyze_posts_image_and_city_as_multipart() {
    let app = Router::new().route("/api/analyze", post(analyze_handler));
    let base = spawn_server(app).await;

    let result = backend(&base, AnalyzeRoute::Primary).analyze_image(&leaf_request("Thane")).await.unwrap();
    assert_eq!(result.disease.plant, "Tomato");
    assert_eq!(result.disease.confidence, 91.2);
    assert_eq!(result.risk.as_ref().map(|r| r.risk.as_str()), Some("high"));
    assert_eq!(result.current_weather().map(|w| w.city.as_str()), Some("Thane"));
    assert!(result.weather.as_ref().unwrap().tomorrow.is_none());
}

#[tokio::test]
async fn variant_route_sends_image_only() {
    let app = Router::new().route(
        "/api/disease/analyze",
        post(|body: Bytes| async move {
            let text = String::from_utf8_lossy(&body).into_owned();
            if text.contains("name=\"city\"") {
                return (StatusCode::BAD_REQUEST, Json(json!({"success": false, "error": "unexpected city"})));
            }
            (StatusCode::OK, Json(analysis_body()))
        }),
    );
    let base = spawn_server(app).await;

    let result = backend(&base, AnalyzeRoute::Variant).analyze_image(&leaf_request("Thane")).await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn failure_body_is_read_regardless_of_status() {
    let app = Router::new().route(
        "/api/analyze",
        post(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({"success": false, "error": "Uploaded file has unsupported extension."})))
        }),
    );
    let base = spawn_server(app).await;

    let err = backend(&base, AnalyzeRoute::Primary).analyze_image(&leaf_request("Thane")).await.unwrap_err();
    assert_eq!(err, ApiError::application(Some("Uploaded file has unsupported extension.".into())));
    assert_eq!(err.kind(), FailureKind::Application);
}

#[tokio::test]
async fn non_json_analyze_response_is_unexpected() {
    let app = Router::new().route(
        "/api/analyze",
        post(|| async { (StatusCode::BAD_GATEWAY, [(header::CONTENT_TYPE, "text/html")], "<h1>Bad Gateway</h1>") }),
    );
    let base = spawn_server(app).await;

    let err = backend(&base, AnalyzeRoute::Primary).analyze_image(&leaf_request("Thane")).await.unwrap_err();
    assert_eq!(err, ApiError::UnexpectedResponse { status: 502, body: "<h1>Bad Gateway</h1>".into() });
    assert!(err.is_transport());
}

#[tokio::test]
async fn weather_sends_city_query() {
    let app = Router::new().route(
        "/api/weather",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let city = params.get("city").cloned().unwrap_or_default();
            Json(json!({
                "success": true,
                "current": {"city": city, "temperature": 31.5, "humidity": 60.0, "wind_speed": 4.1, "description": "clear sky", "feels_like": 34.0}
            }))
        }),
    );
    let base = spawn_server(app).await;

    let current = backend(&base, AnalyzeRoute::Primary).current_weather("Navi Mumbai").await.unwrap();
    assert_eq!(current.city, "Navi Mumbai");
    assert_eq!(current.feels_like, Some(34.0));
}

#[tokio::test]
async fn forecaster_failure_inside_weather_is_an_application_error() {
    let app = Router::new().route(
        "/api/weather",
        get(|| async {
            Json(json!({
                "success": true,
                "current": {"success": false, "error": "Invalid API key"}
            }))
        }),
    );
    let base = spawn_server(app).await;

    let err = backend(&base, AnalyzeRoute::Primary).current_weather("Thane").await.unwrap_err();
    assert_eq!(err, ApiError::application(Some("Invalid API key".into())));
    assert_eq!(err.kind(), FailureKind::Application);
}

#[tokio::test]
async fn chat_round_trip_uses_session_id() {
    let app = Router::new()
        .route(
            "/api/chat",
            post(|Json(body): Json<Value>| async move {
                let reply = format!("{} asked: {}", body["sessionId"].as_str().unwrap_or("?"), body["message"].as_str().unwrap_or("?"));
                Json(json!({"success": true, "response": reply}))
            }),
        )
        .route(
            "/api/chat/clear",
            post(|Json(body): Json<Value>| async move {
                if body["sessionId"] == "web-session" {
                    Json(json!({"success": true}))
                } else {
                    Json(json!({"success": false, "error": "unknown session"}))
                }
            }),
        );
    let base = spawn_server(app).await;
    let backend = backend(&base, AnalyzeRoute::Primary);

    let request = ChatRequest {
        message: "Is it safe to spray today?".into(),
        session_id: "web-session".into(),
        context: ChatContext::default(),
    };
    let reply = backend.send_chat(&request).await.unwrap();
    assert_eq!(reply, "web-session asked: Is it safe to spray today?");
    assert_eq!(backend.clear_chat("web-session").await, Ok(()));
    assert_eq!(backend.clear_chat("other").await, Err(ApiError::application(Some("unknown session".into()))));
}

#[tokio::test]
async fn crop_twin_path_segments_are_encoded() {
    let app = Router::new().route(
        "/api/croptwin/{farmer}/{crop}",
        get(|Path((farmer, crop)): Path<(String, String)>| async move {
            Json(json!({"success": true, "farmerId": farmer, "cropType": crop}))
        }),
    );
    let base = spawn_server(app).await;

    let body = backend(&base, AnalyzeRoute::Primary).crop_twin("Asha Patil", "wheat").await.unwrap();
    assert_eq!(body["farmerId"], "Asha Patil");
    assert_eq!(body["cropType"], "wheat");
}

#[tokio::test]
async fn missing_success_flag_is_an_application_failure() {
    let app = Router::new().route("/api/heatmap/{region}", get(|| async { Json(json!({"hotspots": []})) }));
    let base = spawn_server(app).await;

    let err = backend(&base, AnalyzeRoute::Primary).heatmap("Thane").await.unwrap_err();
    assert_eq!(err, ApiError::application(None));
    assert_eq!(err.to_string(), "Unknown error.");
}

#[tokio::test]
async fn health_is_decoded_without_success_flag() {
    let app = Router::new().route(
        "/api/health",
        get(|| async {
            Json(json!({
                "status": "healthy",
                "components": {"disease_predictor": true, "weather_service": true, "risk_analyzer": false}
            }))
        }),
    );
    let base = spawn_server(app).await;

    let health = backend(&base, AnalyzeRoute::Primary).health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.components["disease_predictor"], true);
    assert_eq!(health.components["risk_analyzer"], false);
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{}/api", addr), AnalyzeRoute::Primary)
        .current_weather("Thane")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
}
