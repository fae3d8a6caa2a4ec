use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use ridepool_core::{Error, Reservation, TripClient};

/// REST client for the trip service. Calls are single-shot; retry policy is
/// the caller's business.
pub struct RestTripClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl RestTripClient {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        let auth_token = auth_token.into();

        if base_url.is_empty() {
            return Err(Error::Internal(anyhow!("trip service base url is empty")));
        }

        if auth_token.is_empty() {
            return Err(Error::Internal(anyhow!("trip service auth token is empty")));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            client: reqwest::Client::new(),
        })
    }

    fn reservation_url(&self, reservation: &Reservation) -> String {
        format!("{}/trips/{}/reservation", self.base_url, reservation.trip_id)
    }
}

#[async_trait]
impl TripClient for RestTripClient {
    async fn create_reservation(&self, reservation: &Reservation) -> Result<Reservation, Error> {
        let url = self.reservation_url(reservation);
        debug!(%url, trip = %reservation.trip_id, "registering reservation with trip service");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Basic {}", self.auth_token))
            .json(reservation)
            .send()
            .await
            .map_err(|e| Error::Request(format!("failed to reach trip service: {e}")))?;

        if response.status() != StatusCode::CREATED {
            return Err(Error::Internal(anyhow!(
                "trip service rejected reservation creation with status {}",
                response.status()
            )));
        }

        // The trip service echoes the reservation it accepted.
        let acknowledged = response
            .json::<Reservation>()
            .await
            .unwrap_or_else(|_| reservation.clone());

        Ok(acknowledged)
    }

    async fn delete_reservation(&self, reservation: &Reservation) -> Result<(), Error> {
        let url = self.reservation_url(reservation);
        debug!(%url, trip = %reservation.trip_id, "releasing reservation on trip service");

        let response = self
            .client
            .delete(&url)
            .header("Authorization", format!("Basic {}", self.auth_token))
            .json(reservation)
            .send()
            .await
            .map_err(|e| Error::Request(format!("failed to reach trip service: {e}")))?;

        if response.status() != StatusCode::OK {
            return Err(Error::Internal(anyhow!(
                "trip service rejected reservation release with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridepool_core::Id;

    #[test]
    fn new_rejects_empty_base_url() {
        assert!(RestTripClient::new("", "token").is_err());
    }

    #[test]
    fn new_rejects_empty_auth_token() {
        assert!(RestTripClient::new("http://trips", "").is_err());
    }

    #[test]
    fn reservation_url_targets_the_trip() {
        let client = RestTripClient::new("http://trips:8080/", "token").unwrap();
        let reservation = Reservation {
            id: Id::nil(),
            trip_id: Id::generate(),
            user_id: Id::generate(),
            source_id: Id::generate(),
            destination_id: Id::generate(),
            seats: 1,
        };

        assert_eq!(
            client.reservation_url(&reservation),
            format!("http://trips:8080/trips/{}/reservation", reservation.trip_id)
        );
    }
}
