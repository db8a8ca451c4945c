// libs/doctor-cell/tests/handlers_test.rs
// Directory routes: search, specializations, profile lookup

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::{doctor_routes, Catalog, DirectoryState};
use shared_models::ids::DoctorId;

fn create_test_app(favorites: &[u32]) -> Router {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let favorites: HashSet<DoctorId> = favorites.iter().copied().map(DoctorId).collect();
    doctor_routes(Arc::new(DirectoryState::new(catalog, Arc::new(favorites))))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<u64> {
    body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_search_without_params_returns_whole_catalog() {
    let (status, body) = get_json(create_test_app(&[]), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["no_results"], false);
    assert_eq!(body["active_filters"], false);
    assert_eq!(ids(&body), (1..=15).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_search_by_text_and_specialization() {
    let (_, body) = get_json(create_test_app(&[]), "/?search=cardio&specialization=all").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = get_json(
        create_test_app(&[]),
        "/?search=clinic&specialization=ENT%20Specialist",
    )
    .await;
    assert_eq!(ids(&body), vec![8]);
}

#[tokio::test]
async fn test_search_zero_results_is_not_an_error() {
    let (status, body) = get_json(create_test_app(&[]), "/?search=nobody-here").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["no_results"], true);
}

#[tokio::test]
async fn test_advanced_query_parameters() {
    let (_, body) = get_json(
        create_test_app(&[]),
        "/?min_price=100&max_price=200&status=booked,unavailable",
    )
    .await;

    assert_eq!(ids(&body), vec![5, 9]);
    assert_eq!(body["active_filters"], true);
}

#[tokio::test]
async fn test_favorites_only_uses_injected_lookup() {
    let (_, body) = get_json(create_test_app(&[14, 2, 404]), "/?favorites_only=true").await;
    assert_eq!(ids(&body), vec![2, 14]);
}

#[tokio::test]
async fn test_invalid_filters_are_bad_requests() {
    let (status, body) = get_json(create_test_app(&[]), "/?status=sleeping").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sleeping"));

    let (status, _) = get_json(create_test_app(&[]), "/?min_price=200&max_price=100").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_query_values_use_error_body() {
    for uri in ["/?min_rating=abc", "/?min_price=-5", "/?favorites_only=maybe"] {
        let (status, body) = get_json(create_test_app(&[]), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_search_text_is_not_trimmed() {
    let (_, body) = get_json(create_test_app(&[]), "/?search=%20patel").await;
    assert_eq!(ids(&body), vec![1]);

    let (status, body) = get_json(create_test_app(&[]), "/?search=patel%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_results"], true);
}

#[tokio::test]
async fn test_specializations_endpoint() {
    let (status, body) = get_json(create_test_app(&[]), "/specializations").await;

    assert_eq!(status, StatusCode::OK);
    let specs = body["specializations"].as_array().unwrap();
    assert_eq!(specs.len(), 15);
    assert_eq!(specs[0], "Cardiologist");
}

#[tokio::test]
async fn test_profile_includes_favorite_and_bookable_flags() {
    let (status, body) = get_json(create_test_app(&[10]), "/10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dr. Miguel Santos");
    assert_eq!(body["is_favorite"], true);
    assert_eq!(body["bookable"], false);

    let (_, body) = get_json(create_test_app(&[]), "/1").await;
    assert_eq!(body["is_favorite"], false);
    assert_eq!(body["bookable"], true);
    assert_eq!(body["time_slots"]["today"][0], "3:00 PM");
}

#[tokio::test]
async fn test_unknown_or_malformed_ids_are_not_found() {
    for uri in ["/99", "/0", "/abc", "/7x"] {
        let (status, body) = get_json(create_test_app(&[]), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
        assert_eq!(body["error"], "Doctor not found");
    }
}
