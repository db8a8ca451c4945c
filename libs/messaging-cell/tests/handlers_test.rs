// libs/messaging-cell/tests/handlers_test.rs
// Conversation routes end to end through the router

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use doctor_cell::Catalog;
use messaging_cell::services::classifier::RESCHEDULE_RESPONSE;
use messaging_cell::{conversation_routes, ConversationRegistry};
use shared_utils::test_utils::TestConfig;

fn create_test_app() -> Router {
    let config = TestConfig::default().to_app_config();
    let registry = ConversationRegistry::new(Arc::new(Catalog::builtin().unwrap()), config.messaging);
    conversation_routes(Arc::new(registry))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn test_conversation_lifecycle() {
    let app = create_test_app();

    let (status, opened) = call(
        &app,
        Method::POST,
        "/",
        Some(json!({ "doctor_id": 1, "appointment_id": "APT-42" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(opened["messages"].as_array().unwrap().len(), 2);
    assert_eq!(opened["doctor_name"], "Dr. Aisha Patel");
    let session_id = opened["session_id"].as_str().unwrap().to_string();

    let (status, sent) = call(
        &app,
        Method::POST,
        &format!("/{}/messages", session_id),
        Some(json!({ "text": "I need to reschedule" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["accepted"], true);
    assert_eq!(sent["message"]["direction"], "sent");
    assert_eq!(sent["message"]["status"], "sent");

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let (_, snapshot) = call(&app, Method::GET, &format!("/{}", session_id), None).await;
    let messages = snapshot["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2]["status"], "read");
    assert_eq!(messages[3]["direction"], "received");
    assert_eq!(messages[3]["text"], RESCHEDULE_RESPONSE);
    assert_eq!(snapshot["is_typing"], false);

    let (status, closed) = call(&app, Method::DELETE, &format!("/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["cancelled_effects"], 0);

    let (status, _) = call(&app, Method::GET, &format!("/{}", session_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_message_is_not_accepted() {
    let app = create_test_app();
    let (_, opened) = call(&app, Method::POST, "/", Some(json!({ "doctor_id": 2 }))).await;
    let session_id = opened["session_id"].as_str().unwrap().to_string();

    let (status, sent) = call(
        &app,
        Method::POST,
        &format!("/{}/messages", session_id),
        Some(json!({ "text": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["accepted"], false);
    assert_eq!(sent["message"], Value::Null);

    let (_, snapshot) = call(&app, Method::GET, &format!("/{}", session_id), None).await;
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_doctor_and_session_are_not_found() {
    let app = create_test_app();

    let (status, body) = call(&app, Method::POST, "/", Some(json!({ "doctor_id": 77 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");

    let missing = uuid::Uuid::new_v4();
    let (status, _) = call(&app, Method::GET, &format!("/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, &format!("/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quick_actions() {
    let app = create_test_app();

    let (status, body) = call(&app, Method::GET, "/quick-actions", None).await;

    assert_eq!(status, StatusCode::OK);
    let actions = body["quick_actions"].as_array().unwrap();
    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0]["label"], "Reschedule");
    assert_eq!(actions[0]["draft"], "Tell me about reschedule");
    assert_eq!(actions[2]["draft"], "I need to speak with someone");
}
