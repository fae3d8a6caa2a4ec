use async_trait::async_trait;

use crate::error::Error;
use crate::id::Id;
use crate::reservation::Reservation;

/// Local system of record for reservations.
///
/// `find_by_id` and `delete` fail with [`Error::NotFound`] for unknown
/// identifiers. `create` keeps a caller-supplied non-nil id and generates a
/// fresh one otherwise; it does not enforce uniqueness of pre-supplied ids.
/// That check belongs to the orchestrator.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> Result<Reservation, Error>;

    /// Persists the reservation and returns the id under which it now lives.
    async fn create(&self, reservation: &Reservation) -> Result<Id, Error>;

    async fn update(&self, reservation: &Reservation) -> Result<(), Error>;

    async fn delete(&self, id: Id) -> Result<(), Error>;
}
