use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{OpenConversationRequest, QuickAction, SendMessageRequest, SendOutcome};
use crate::services::ConversationRegistry;

#[axum::debug_handler]
pub async fn open_conversation(
    State(registry): State<Arc<ConversationRegistry>>,
    Json(request): Json<OpenConversationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session = registry.open(request.doctor_id, request.appointment_id).await?;
    let snapshot = session.snapshot().await;

    Ok((StatusCode::CREATED, Json(json!(snapshot))))
}

#[axum::debug_handler]
pub async fn get_conversation(
    State(registry): State<Arc<ConversationRegistry>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = registry.snapshot(session_id).await?;
    Ok(Json(json!(snapshot)))
}

#[axum::debug_handler]
pub async fn send_message(
    State(registry): State<Arc<ConversationRegistry>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = registry.send(session_id, &request.text).await?;

    let message = match &outcome {
        SendOutcome::Sent { message } => Some(message),
        SendOutcome::Ignored => None,
    };

    Ok(Json(json!({
        "accepted": outcome.is_sent(),
        "message": message
    })))
}

#[axum::debug_handler]
pub async fn close_conversation(
    State(registry): State<Arc<ConversationRegistry>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let cancelled = registry.close(session_id).await?;

    Ok(Json(json!({
        "closed": true,
        "cancelled_effects": cancelled
    })))
}

pub async fn list_quick_actions() -> Json<Value> {
    Json(json!({
        "quick_actions": QuickAction::all()
    }))
}
