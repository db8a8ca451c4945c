use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::{appointment_routes, BookingService, BookingState};
use doctor_cell::{doctor_routes, Catalog, DirectoryState};
use favorites_cell::{favorites_routes, FavoritesState, FavoritesStore, FileStorage};
use messaging_cell::{conversation_routes, ConversationRegistry};
use shared_config::AppConfig;

/// Long-lived services shared by every cell. The favorites store is a
/// single instance: the directory reads it, the favorites routes mutate it.
pub struct AppServices {
    pub catalog: Arc<Catalog>,
    pub favorites: Arc<FavoritesStore>,
    pub conversations: Arc<ConversationRegistry>,
    pub booking: BookingService,
}

impl AppServices {
    pub fn build(config: &AppConfig, catalog: Arc<Catalog>) -> Self {
        let storage = Arc::new(FileStorage::new(config.favorites_path.clone()));

        Self {
            favorites: Arc::new(FavoritesStore::open(storage)),
            conversations: Arc::new(ConversationRegistry::new(catalog.clone(), config.messaging)),
            booking: BookingService::from_config(config),
            catalog,
        }
    }
}

pub fn create_router(services: AppServices) -> Router {
    let directory = DirectoryState::new(services.catalog.clone(), services.favorites.clone());
    let favorites = FavoritesState {
        store: services.favorites.clone(),
        catalog: services.catalog.clone(),
    };
    let booking = BookingState {
        catalog: services.catalog.clone(),
        service: services.booking,
    };

    Router::new()
        .route("/", get(|| async { "Care Directory API is running!" }))
        .nest("/doctors", doctor_routes(Arc::new(directory)))
        .nest("/favorites", favorites_routes(Arc::new(favorites)))
        .nest("/conversations", conversation_routes(services.conversations))
        .nest("/appointments", appointment_routes(Arc::new(booking)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use shared_utils::test_utils::TestConfig;
    use tower::ServiceExt;

    async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_favorite_toggle_is_visible_to_directory() {
        let config = TestConfig::instant();
        let services = AppServices::build(&config.to_app_config(), Arc::new(Catalog::builtin().unwrap()));
        let app = create_router(services);

        let (status, body) = call(&app, Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Care Directory API is running!");

        let (status, _) = call(&app, Method::POST, "/favorites/7/toggle").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::GET, "/doctors?favorites_only=true").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["total"], 1);
        assert_eq!(body["doctors"][0]["id"], 7);

        let (status, body) = call(&app, Method::GET, "/doctors/7").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["is_favorite"], true);

        assert!(config.favorites_path().exists());
    }
}
