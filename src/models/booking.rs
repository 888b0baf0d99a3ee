//! Booking records and the payload used to create or change one.

use serde::{Deserialize, Serialize};

use crate::booking::{format_date, StayInterval};

/// A booking as returned by `GET /bookings`. Dates are kept as sent; parse
/// them with [`crate::booking::parse_date`] when they are needed as dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_date: String,
    pub checkout_date: String,
    pub created_at: String,
    #[serde(default)]
    pub user: String,
    pub hotel: HotelSummary,
}

/// Hotel snapshot embedded in a booking. Read-only from the booking's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSummary {
    #[serde(rename = "_id", default)]
    pub object_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tel: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub booking_date: String,
    pub checkout_date: String,
    pub created_at: String,
}

impl BookingRequest {
    pub fn new(interval: &StayInterval, created_at: impl Into<String>) -> Self {
        Self {
            booking_date: format_date(interval.booking_date),
            checkout_date: format_date(interval.checkout_date),
            created_at: created_at.into(),
        }
    }
}
