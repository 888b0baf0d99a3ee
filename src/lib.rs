pub mod auth;
pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;

pub use error::{Error, Result};
pub use gateway::Gateway;
