use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::Error;
use crate::id::Id;
use crate::reservation::Reservation;
use crate::store::ReservationStore;
use crate::trip::TripCoordinator;

/// Orchestrates reservations across the local store and the remote trip
/// service. Consistency between the two is maintained purely by ordering and
/// compensation: local-then-remote on register (with a compensating local
/// delete when the remote step fails), remote-then-local on delete.
pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
    trips: Arc<dyn TripCoordinator>,
    // Serializes register calls that carry the same pre-supplied id, so the
    // existence check and the create happen under one critical section.
    // Entries are removed again once the last caller for an id is done.
    register_locks: DashMap<Id, Arc<Mutex<()>>>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn ReservationStore>, trips: Arc<dyn TripCoordinator>) -> Self {
        Self {
            store,
            trips,
            register_locks: DashMap::new(),
        }
    }

    /// Creates a reservation locally, then registers it with the remote trip
    /// service. If the remote step fails the local record is deleted again;
    /// if that compensating delete also fails, the delete error replaces the
    /// original one, since it marks the store/trip-service divergence an
    /// operator has to reconcile.
    ///
    /// Calls carrying the same pre-supplied id are serialized, so of two
    /// concurrent submissions exactly one wins and the other sees
    /// [`Error::AlreadyExists`]. On success both systems hold a consistent
    /// record and the returned reservation carries its assigned id.
    pub async fn register(&self, reservation: Reservation) -> Result<Reservation, Error> {
        if reservation.id.is_nil() {
            return self.register_unlocked(reservation).await;
        }

        let id = reservation.id;
        let lock = Arc::clone(
            self.register_locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let guard = lock.lock().await;

        let result = self.register_unlocked(reservation).await;

        drop(guard);
        // One reference held by the map, one by this call: nobody else is
        // waiting on this id, so the entry can go.
        self.register_locks
            .remove_if(&id, |_, lock| Arc::strong_count(lock) == 2);

        result
    }

    async fn register_unlocked(&self, mut reservation: Reservation) -> Result<Reservation, Error> {
        if self.find_by_id(reservation.id).await.is_ok() {
            return Err(Error::AlreadyExists(reservation.id));
        }

        reservation.validate()?;

        reservation.id = self.store.create(&reservation).await?;
        debug!(id = %reservation.id, trip = %reservation.trip_id, "reservation persisted");

        if let Err(err) = self.trips.register_reservation(&reservation).await {
            debug!(id = %reservation.id, error = %err, "trip registration failed, rolling back");

            if let Err(rollback_err) = self.store.delete(reservation.id).await {
                error!(
                    id = %reservation.id,
                    trip = %reservation.trip_id,
                    trip_error = %err,
                    error = %rollback_err,
                    "rollback of local reservation failed; store holds a record the trip service never saw"
                );
                return Err(rollback_err);
            }

            return Err(err);
        }

        Ok(reservation)
    }

    /// Retrieves a reservation; an unknown id is reported as
    /// [`Error::NotFound`].
    pub async fn find_by_id(&self, id: Id) -> Result<Reservation, Error> {
        match self.store.find_by_id(id).await {
            Ok(reservation) => Ok(reservation),
            Err(Error::NotFound(_)) => Err(Error::NotFound(id)),
            Err(err) => Err(err),
        }
    }

    /// Releases the seats on the remote trip service, then deletes the local
    /// record. The remote release comes first on purpose: if it fails the
    /// local record stays intact and a later retry of `delete` is the
    /// recovery path. A failure of the final local delete leaves the
    /// mirror-image inconsistency (remote released, local present) and is
    /// logged accordingly.
    pub async fn delete(&self, id: Id) -> Result<(), Error> {
        let reservation = self.find_by_id(id).await?;

        self.trips.delete_reservation(&reservation).await?;

        if let Err(err) = self.store.delete(id).await {
            error!(
                %id,
                trip = %reservation.trip_id,
                error = %err,
                "trip seats released but local reservation could not be deleted"
            );
            return Err(err);
        }

        Ok(())
    }
}
