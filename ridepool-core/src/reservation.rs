use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::Id;

/// Fewest seats a reservation may hold.
pub const MIN_SEATS: i32 = 1;

/// Most seats a reservation may hold (one car).
pub const MAX_SEATS: i32 = 10;

/// A booking of seats on a trip, tying together a user, a trip, and
/// source/destination stops. The id stays nil until the store creates the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Id,
    pub trip_id: Id,
    pub user_id: Id,
    pub source_id: Id,
    pub destination_id: Id,
    pub seats: i32,
}

impl Reservation {
    /// Checks the entity invariant: all reference identifiers set and the
    /// seat count within bounds. Fields are checked in a fixed order and the
    /// first failure wins. Pure, no side effects.
    pub fn validate(&self) -> Result<(), Error> {
        if self.trip_id.is_nil() {
            return Err(Error::validation("trip", "trip id is missing"));
        }

        if self.user_id.is_nil() {
            return Err(Error::validation("user", "user id is missing"));
        }

        if self.source_id.is_nil() {
            return Err(Error::validation("source", "source id is missing"));
        }

        if self.destination_id.is_nil() {
            return Err(Error::validation("destination", "destination id is missing"));
        }

        if self.seats < MIN_SEATS || self.seats > MAX_SEATS {
            return Err(Error::validation(
                "seats",
                format!("number of seats must be between {MIN_SEATS} and {MAX_SEATS}"),
            ));
        }

        Ok(())
    }
}
