use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use ridepool_api::auth::{BasicValidator, ValidatorMap};
use ridepool_api::{app, AppState};
use ridepool_core::{Error, Reservation, ReservationService, TripCoordinator};
use ridepool_store::InMemoryReservationStore;

struct OkCoordinator;

#[async_trait]
impl TripCoordinator for OkCoordinator {
    async fn register_reservation(&self, _r: &Reservation) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_reservation(&self, _r: &Reservation) -> Result<(), Error> {
        Ok(())
    }
}

fn state() -> (Arc<InMemoryReservationStore>, AppState) {
    let store = Arc::new(InMemoryReservationStore::new());
    let reservations = Arc::new(ReservationService::new(
        store.clone(),
        Arc::new(OkCoordinator),
    ));

    let mut validators: ValidatorMap = HashMap::new();
    validators.insert(
        "basic".to_string(),
        Arc::new(BasicValidator::new("secret").unwrap()),
    );

    let state = AppState {
        reservations,
        validators: Arc::new(validators),
    };

    (store, state)
}

fn reservation_payload() -> serde_json::Value {
    serde_json::json!({
        "tripId": "7f1e5c60b1d34f2a8c9d0e1f2a3b4c5d",
        "userId": "0a1b2c3d4e5f60718293a4b5c6d7e8f9",
        "sourceId": "11111111222233334444555555555555",
        "destinationId": "66666666777788889999aaaaaaaaaaaa",
        "seats": 3,
    })
}

fn post_reservation(auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/reservations")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn create_reservation_returns_created_with_assigned_id() {
    let (store, state) = state();
    let app = app(state);

    let response = app
        .oneshot(post_reservation(Some("Basic secret"), reservation_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Reservation = serde_json::from_slice(&bytes).unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(created.seats, 3);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn unknown_auth_scheme_is_unauthorized() {
    let (store, state) = state();
    let app = app(state);

    let response = app
        .oneshot(post_reservation(Some("Digest abc"), reservation_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn missing_auth_header_is_unauthorized() {
    let (_store, state) = state();
    let app = app(state);

    let response = app
        .oneshot(post_reservation(None, reservation_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_reservation_is_a_bad_request() {
    let (store, state) = state();
    let app = app(state);
    let mut payload = reservation_payload();
    payload["seats"] = serde_json::json!(0);

    let response = app
        .oneshot(post_reservation(Some("Basic secret"), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn delete_unknown_reservation_is_not_found() {
    let (_store, state) = state();
    let app = app(state);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/reservations/0123456789abcdef0123456789abcdef")
        .header(header::AUTHORIZATION, "Basic secret")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_a_created_reservation() {
    let (store, state) = state();
    let app = app(state);

    let response = app
        .clone()
        .oneshot(post_reservation(Some("Basic secret"), reservation_payload()))
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Reservation = serde_json::from_slice(&bytes).unwrap();

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/reservations/{}", created.id))
        .header(header::AUTHORIZATION, "Basic secret")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty().await);
}
