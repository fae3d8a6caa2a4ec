use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridepool_api::auth::{BasicValidator, TokenValidator, ValidatorMap};
use ridepool_api::{app, AppState};
use ridepool_core::{ReservationService, TripService};
use ridepool_store::{DbClient, PgReservationStore};
use ridepool_trip::RestTripClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridepool_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ridepool_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting ridepool API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let store = Arc::new(PgReservationStore::new(db.pool.clone()));

    let trip_client = RestTripClient::new(&config.trip.base_url, &config.trip.auth_token)
        .expect("Failed to create trip service client");
    let trips = Arc::new(TripService::new(Arc::new(trip_client)));

    let reservations = Arc::new(ReservationService::new(store, trips));

    let mut validators: ValidatorMap = HashMap::new();
    validators.insert(
        "basic".to_string(),
        Arc::new(
            BasicValidator::new(&config.auth.credentials)
                .expect("Failed to create basic auth validator"),
        ),
    );
    validators.insert(
        "bearer".to_string(),
        Arc::new(TokenValidator::new(&config.auth.domain).expect("Failed to create token validator")),
    );

    let state = AppState {
        reservations,
        validators: Arc::new(validators),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}
