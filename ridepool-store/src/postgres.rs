use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ridepool_core::{Error, Id, Reservation, ReservationStore};

/// Postgres-backed reservation store.
pub struct PgReservationStore {
    pool: PgPool,
}

impl PgReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    trip_id: Uuid,
    user_id: Uuid,
    source_id: Uuid,
    destination_id: Uuid,
    seats: i32,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id.into(),
            trip_id: row.trip_id.into(),
            user_id: row.user_id.into(),
            source_id: row.source_id.into(),
            destination_id: row.destination_id.into(),
            seats: row.seats,
        }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn find_by_id(&self, id: Id) -> Result<Reservation, Error> {
        let row = sqlx::query_as::<_, ReservationRow>(
            "SELECT id, trip_id, user_id, source_id, destination_id, seats \
             FROM reservations WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;

        row.map(Reservation::from).ok_or(Error::NotFound(id))
    }

    async fn create(&self, reservation: &Reservation) -> Result<Id, Error> {
        let id = if reservation.id.is_nil() {
            Id::generate()
        } else {
            reservation.id
        };

        sqlx::query(
            "INSERT INTO reservations (id, trip_id, user_id, source_id, destination_id, seats) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.as_uuid())
        .bind(reservation.trip_id.as_uuid())
        .bind(reservation.user_id.as_uuid())
        .bind(reservation.source_id.as_uuid())
        .bind(reservation.destination_id.as_uuid())
        .bind(reservation.seats)
        .execute(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;

        Ok(id)
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE reservations \
             SET trip_id = $2, user_id = $3, source_id = $4, destination_id = $5, seats = $6 \
             WHERE id = $1",
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.trip_id.as_uuid())
        .bind(reservation.user_id.as_uuid())
        .bind(reservation.source_id.as_uuid())
        .bind(reservation.destination_id.as_uuid())
        .bind(reservation.seats)
        .execute(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(reservation.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(anyhow::Error::from)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }

        Ok(())
    }
}
