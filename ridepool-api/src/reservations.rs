use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Extension, Json, Router,
};
use tracing::info;

use ridepool_core::{Id, Reservation};

use crate::auth::UserInfo;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route("/reservations/{id}", delete(delete_reservation))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Json(reservation): Json<Reservation>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    info!(user = %user.sub, trip = %reservation.trip_id, "creating reservation");

    let created = state.reservations.register(reservation).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    info!(user = %user.sub, %id, "deleting reservation");

    state.reservations.delete(id).await?;

    Ok(StatusCode::OK)
}
