use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    close_conversation, get_conversation, list_quick_actions, open_conversation, send_message,
};
use crate::services::ConversationRegistry;

pub fn conversation_routes(registry: Arc<ConversationRegistry>) -> Router {
    Router::new()
        .route("/", post(open_conversation))
        .route("/quick-actions", get(list_quick_actions))
        .route("/{session_id}", get(get_conversation).delete(close_conversation))
        .route("/{session_id}/messages", post(send_message))
        .with_state(registry)
}
