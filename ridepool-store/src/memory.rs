use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ridepool_core::{Error, Id, Reservation, ReservationStore};

/// In-memory reservation store for tests and local runs. Honors the same
/// contracts as the Postgres store.
#[derive(Default)]
pub struct InMemoryReservationStore {
    records: RwLock<HashMap<Id, Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn find_by_id(&self, id: Id) -> Result<Reservation, Error> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    async fn create(&self, reservation: &Reservation) -> Result<Id, Error> {
        let id = if reservation.id.is_nil() {
            Id::generate()
        } else {
            reservation.id
        };

        let mut stored = reservation.clone();
        stored.id = id;
        self.records.write().await.insert(id, stored);

        Ok(id)
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), Error> {
        let mut records = self.records.write().await;
        match records.get_mut(&reservation.id) {
            Some(existing) => {
                *existing = reservation.clone();
                Ok(())
            }
            None => Err(Error::NotFound(reservation.id)),
        }
    }

    async fn delete(&self, id: Id) -> Result<(), Error> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound(id))
    }
}
