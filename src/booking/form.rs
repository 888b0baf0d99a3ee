use chrono::NaiveDate;

use super::interval::{apply_edit, parse_date, IntervalEdit, StayInterval, ValidationError};
use crate::models::Booking;

/// Dates held by an open create/edit booking form.
///
/// Every edit either moves the form to a new pair or fails and leaves the
/// current pair in place. Submitting never clears the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayForm {
    interval: StayInterval,
}

impl StayForm {
    /// A fresh form for a one-night stay starting on `booking_date`.
    pub fn starting_on(booking_date: NaiveDate) -> Result<Self, ValidationError> {
        let interval = StayInterval::repaired(booking_date, NaiveDate::MIN)?;
        Ok(Self { interval })
    }

    /// Open a form on an existing pair, repairing a reversed one.
    pub fn open(
        booking_date: NaiveDate,
        checkout_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let interval = StayInterval::repaired(booking_date, checkout_date)?;
        Ok(Self { interval })
    }

    pub fn from_booking(booking: &Booking) -> Result<Self, ValidationError> {
        let booking_date = parse_date(&booking.booking_date)?;
        let checkout_date = parse_date(&booking.checkout_date)?;
        Self::open(booking_date, checkout_date)
    }

    pub fn interval(&self) -> StayInterval {
        self.interval
    }

    pub fn edit(&mut self, edit: IntervalEdit) -> Result<StayInterval, ValidationError> {
        let next = apply_edit(&self.interval, edit)?;
        self.interval = next;
        Ok(next)
    }

    pub fn set_booking_date(&mut self, date: NaiveDate) -> Result<StayInterval, ValidationError> {
        self.edit(IntervalEdit::BookingDate(date))
    }

    pub fn set_checkout_date(&mut self, date: NaiveDate) -> Result<StayInterval, ValidationError> {
        self.edit(IntervalEdit::CheckoutDate(date))
    }

    /// The pair ready for submission, or the rule it breaks.
    pub fn submit(&self) -> Result<StayInterval, ValidationError> {
        self.interval.validate()
    }
}
