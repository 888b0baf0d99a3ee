//! Booking date rules and the form state that applies them.

pub mod form;
pub mod interval;

pub use form::StayForm;
pub use interval::{
    apply_edit, format_date, parse_date, validate, IntervalEdit, StayInterval, ValidationError,
    MAX_STAY_NIGHTS,
};
