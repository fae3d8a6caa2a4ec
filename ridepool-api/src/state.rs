use std::sync::Arc;

use ridepool_core::ReservationService;

use crate::auth::ValidatorMap;

#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<ReservationService>,
    pub validators: Arc<ValidatorMap>,
}
