use chrono::Local;
use reqwest::Method;
use tracing::info;

use super::Gateway;
use crate::auth::{AuthContext, Operation};
use crate::booking::{format_date, StayInterval};
use crate::error::Result;
use crate::models::{Booking, BookingRequest, DataEnvelope};

/// Booking endpoints. Every call needs a session; the backend scopes them to
/// the session's owner.
pub struct Bookings<'a> {
    gateway: &'a Gateway,
}

impl<'a> Bookings<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list_mine(&self, ctx: &AuthContext) -> Result<Vec<Booking>> {
        let operation = Operation::ListMyBookings;
        let token = self.gateway.authorize(ctx, operation)?;
        let envelope: DataEnvelope<Vec<Booking>> = self
            .gateway
            .api()
            .get(operation, &["bookings"], token)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Book `interval` at `hotel_id`. The interval is validated first, and an
    /// invalid one never reaches the network.
    pub async fn create(
        &self,
        ctx: &AuthContext,
        hotel_id: &str,
        interval: &StayInterval,
    ) -> Result<()> {
        let interval = interval.validate()?;
        let operation = Operation::CreateBooking;
        let token = self.gateway.authorize(ctx, operation)?;

        let request = BookingRequest::new(&interval, format_date(Local::now().date_naive()));
        self.gateway
            .api()
            .send(
                operation,
                Method::POST,
                &["hotels", hotel_id, "bookings"],
                token,
                Some(&request),
            )
            .await?;
        info!(hotel = %hotel_id, nights = interval.nights(), "Booking created");
        Ok(())
    }

    /// Move an existing booking to `interval`, re-sending its original
    /// `created_at` unchanged.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        booking_id: &str,
        interval: &StayInterval,
        created_at: &str,
    ) -> Result<()> {
        let interval = interval.validate()?;
        let operation = Operation::UpdateBooking;
        let token = self.gateway.authorize(ctx, operation)?;

        let request = BookingRequest::new(&interval, created_at);
        self.gateway
            .api()
            .send(
                operation,
                Method::PUT,
                &["bookings", booking_id],
                token,
                Some(&request),
            )
            .await?;
        info!(booking = %booking_id, nights = interval.nights(), "Booking updated");
        Ok(())
    }

    pub async fn delete(&self, ctx: &AuthContext, booking_id: &str) -> Result<()> {
        let operation = Operation::DeleteBooking;
        let token = self.gateway.authorize(ctx, operation)?;
        self.gateway
            .api()
            .send::<()>(operation, Method::DELETE, &["bookings", booking_id], token, None)
            .await?;
        info!(booking = %booking_id, "Booking deleted");
        Ok(())
    }
}
