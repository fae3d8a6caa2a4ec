pub mod error;
pub mod id;
pub mod reservation;
pub mod service;
pub mod store;
pub mod trip;

pub use error::Error;
pub use id::Id;
pub use reservation::Reservation;
pub use service::ReservationService;
pub use store::ReservationStore;
pub use trip::{TripClient, TripCoordinator, TripService};
