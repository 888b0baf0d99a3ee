//! Wire types exchanged with the hotel/booking backend.

pub mod booking;
pub mod hotel;
pub mod user;

pub use booking::*;
pub use hotel::*;
pub use user::*;

use serde::Deserialize;

/// The `{ "data": ... }` wrapper most endpoints respond with.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
}
