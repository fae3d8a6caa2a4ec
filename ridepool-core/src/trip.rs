use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::reservation::Reservation;

/// Wire-level access to the remote trip service. One call per operation, no
/// retries; retry policy, if any, lives in the transport collaborator.
///
/// `create_reservation` returns the reservation as acknowledged by the
/// remote side. A transport failure surfaces as [`Error::Request`]; a
/// non-success remote outcome surfaces as [`Error::Internal`].
#[async_trait]
pub trait TripClient: Send + Sync {
    async fn create_reservation(&self, reservation: &Reservation) -> Result<Reservation, Error>;

    async fn delete_reservation(&self, reservation: &Reservation) -> Result<(), Error>;
}

/// Ability to register and release a reservation against the trip system.
/// This is the seam the orchestrator depends on.
#[async_trait]
pub trait TripCoordinator: Send + Sync {
    async fn register_reservation(&self, reservation: &Reservation) -> Result<(), Error>;

    async fn delete_reservation(&self, reservation: &Reservation) -> Result<(), Error>;
}

/// Trip business logic over a [`TripClient`]. Besides forwarding calls it
/// validates the reservation acknowledged by the remote side before
/// reporting success.
pub struct TripService {
    client: Arc<dyn TripClient>,
}

impl TripService {
    pub fn new(client: Arc<dyn TripClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TripCoordinator for TripService {
    async fn register_reservation(&self, reservation: &Reservation) -> Result<(), Error> {
        let acknowledged = self.client.create_reservation(reservation).await?;
        acknowledged.validate()?;

        Ok(())
    }

    async fn delete_reservation(&self, reservation: &Reservation) -> Result<(), Error> {
        self.client.delete_reservation(reservation).await
    }
}
