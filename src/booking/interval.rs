//! Stay interval rules.
//!
//! Pure and synchronous. Dates are calendar dates; time of day never takes
//! part in a comparison, and "today" is never consulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Longest stay a single booking may cover, in nights.
pub const MAX_STAY_NIGHTS: i64 = 3;

/// Date format the backend expects in booking payloads.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a proposed stay is refused. The messages are user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Checkout date cannot be before the booking date.")]
    InvalidRange,

    #[error("You can only book up to {max} nights ({nights} requested).")]
    ExceedsMaxStay { nights: i64, max: i64 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// A check-in / check-out pair. Construction does not validate; call
/// [`StayInterval::validate`] before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayInterval {
    pub booking_date: NaiveDate,
    pub checkout_date: NaiveDate,
}

/// A single change made to an open booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalEdit {
    BookingDate(NaiveDate),
    CheckoutDate(NaiveDate),
}

impl StayInterval {
    pub fn new(booking_date: NaiveDate, checkout_date: NaiveDate) -> Self {
        Self {
            booking_date,
            checkout_date,
        }
    }

    /// Build the pair shown when a stored booking is opened for editing.
    /// A checkout that precedes the booking date is moved to the day after it.
    pub fn repaired(
        booking_date: NaiveDate,
        checkout_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let checkout_date = if booking_date > checkout_date {
            day_after(booking_date)?
        } else {
            checkout_date
        };
        Ok(Self::new(booking_date, checkout_date))
    }

    /// Whole nights between check-in and check-out. Negative when reversed.
    pub fn nights(&self) -> i64 {
        self.checkout_date
            .signed_duration_since(self.booking_date)
            .num_days()
    }

    pub fn validate(&self) -> Result<StayInterval, ValidationError> {
        validate(self.booking_date, self.checkout_date)
    }

    pub fn apply(&self, edit: IntervalEdit) -> Result<StayInterval, ValidationError> {
        apply_edit(self, edit)
    }
}

/// Check a proposed pair against the ordering and length rules.
///
/// Accepts iff `checkout >= booking` and the stay is at most
/// [`MAX_STAY_NIGHTS`] nights. Ordering is checked first, so a reversed pair
/// always reports [`ValidationError::InvalidRange`].
pub fn validate(
    booking_date: NaiveDate,
    checkout_date: NaiveDate,
) -> Result<StayInterval, ValidationError> {
    if checkout_date < booking_date {
        return Err(ValidationError::InvalidRange);
    }

    let interval = StayInterval::new(booking_date, checkout_date);
    let nights = interval.nights();
    if nights > MAX_STAY_NIGHTS {
        return Err(ValidationError::ExceedsMaxStay {
            nights,
            max: MAX_STAY_NIGHTS,
        });
    }

    Ok(interval)
}

/// Transition an open form's pair by one edit.
///
/// Moving the booking date past the current checkout advances the checkout to
/// the day after the new booking date. Moving the checkout before the booking
/// date is refused and the caller keeps its current pair.
///
/// The result only satisfies ordering; the length rule is enforced by
/// [`validate`] on submit.
pub fn apply_edit(
    current: &StayInterval,
    edit: IntervalEdit,
) -> Result<StayInterval, ValidationError> {
    match edit {
        IntervalEdit::BookingDate(booking_date) => {
            let checkout_date = if booking_date > current.checkout_date {
                day_after(booking_date)?
            } else {
                current.checkout_date
            };
            Ok(StayInterval::new(booking_date, checkout_date))
        }
        IntervalEdit::CheckoutDate(checkout_date) => {
            if checkout_date < current.booking_date {
                return Err(ValidationError::InvalidRange);
            }
            Ok(StayInterval::new(current.booking_date, checkout_date))
        }
    }
}

/// Parse a date coming from the user or the backend.
///
/// Accepts `YYYY-MM-DD` and full timestamps (RFC 3339, or naive
/// `YYYY-MM-DDTHH:MM:SS`). Timestamps keep the calendar date in their own
/// offset; the time is discarded.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, WIRE_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(ValidationError::InvalidDate(input.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

fn day_after(date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    date.succ_opt()
        .ok_or_else(|| ValidationError::InvalidDate(format!("no day after {}", date)))
}
