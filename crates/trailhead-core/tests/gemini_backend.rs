use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use trailhead_core::{
    Difficulty, GeminiClient, RouteRequest, TrailQueryError, TrailService, TripController, View,
};
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn trails_text() -> String {
    json!([
        {
            "id": "sr-1",
            "name": "Misery Ridge",
            "location": "Smith Rock State Park",
            "difficulty": "Hard",
            "rating": 4.8,
            "distance": "3.7 mi",
            "duration": "2h 30m",
            "description": "Switchbacks up to Monkey Face.",
            "coordinates": { "lat": 44.36, "lng": -121.14 }
        },
        {
            "id": "rr-2",
            "name": "Red Rock Canyon Loop",
            "location": "Red Rock Canyon",
            "difficulty": "Moderate",
            "rating": 4.5,
            "distance": "5 mi",
            "duration": "3h",
            "description": "Desert sandstone loop.",
            "coordinates": { "lat": 36.13, "lng": -115.42 }
        }
    ])
    .to_string()
}

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn service_for(server: &MockServer, key: Option<&str>) -> TrailService {
    let client = GeminiClient::new(key).with_base_url(&server.uri());
    TrailService::new(Arc::new(client))
}

#[tokio::test]
async fn returns_trails_from_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&trails_text())))
        .expect(1)
        .mount(&server)
        .await;

    let trails = service_for(&server, Some("test-key"))
        .find_trails("Portland, OR", "Joshua Tree, CA")
        .await;

    assert_eq!(trails.len(), 2);
    assert_eq!(trails[0].id, "sr-1");
    assert_eq!(trails[1].difficulty, Difficulty::Moderate);
}

#[tokio::test]
async fn server_error_falls_back_to_sample_trails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let service = service_for(&server, Some("test-key"));

    let err = service.try_find_trails("A", "B").await.unwrap_err();
    assert!(matches!(err, TrailQueryError::Status { .. }));

    let trails = service.find_trails("A", "B").await;
    let ids: Vec<&str> = trails.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn missing_api_key_never_calls_the_backend() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server, None);

    let err = service.try_find_trails("A", "B").await.unwrap_err();
    assert!(matches!(err, TrailQueryError::MissingApiKey));
    assert_eq!(service.find_trails("A", "B").await.len(), 2);
}

#[tokio::test]
async fn response_without_candidates_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let trails = service_for(&server, Some("test-key")).find_trails("A", "B").await;

    assert!(trails.is_empty());
}

#[tokio::test]
async fn non_json_text_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate_body("Sure! Here are four trails:")),
        )
        .mount(&server)
        .await;

    let trails = service_for(&server, Some("test-key")).find_trails("A", "B").await;

    assert_eq!(trails[0].name, "Lost Coast Trail");
    assert_eq!(trails[1].name, "Emerald Bay Loop");
}

#[tokio::test]
async fn blocked_prompt_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let service = service_for(&server, Some("test-key"));

    let err = service.try_find_trails("A", "B").await.unwrap_err();
    assert!(matches!(err, TrailQueryError::Backend(_)));
}

#[tokio::test]
async fn slow_backend_hits_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_body(&trails_text()))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(Some("test-key"))
        .with_base_url(&server.uri())
        .with_timeout(Some(Duration::from_millis(100)));
    let service = TrailService::new(Arc::new(client));

    let err = service.try_find_trails("A", "B").await.unwrap_err();
    assert!(matches!(err, TrailQueryError::Http(_)));
}

#[tokio::test]
async fn controller_search_against_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&trails_text())))
        .mount(&server)
        .await;

    let service = service_for(&server, Some("test-key"));
    let mut controller = TripController::new();
    let route = RouteRequest::new("Bend, OR", "Las Vegas, NV").unwrap();

    controller.submit_search(route.clone(), &service).await.unwrap();

    let state = controller.state();
    assert_eq!(state.view, View::Map);
    assert_eq!(state.route.as_ref(), Some(&route));
    assert_eq!(state.selected_trail.as_ref().map(|t| t.id.as_str()), Some("sr-1"));
}
