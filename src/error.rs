//! Error taxonomy shared by the session store, the gate, and the gateway.
//!
//! Nothing here is fatal to the process. Every failure leaves the caller's
//! state as it was before the operation started.

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::{Operation, Role};
use crate::booking::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// No usable session where one is required. Raised before any request is sent.
    #[error("Not signed in. Log in first.")]
    Unauthenticated,

    /// The client-side role check refused the operation. The backend remains
    /// the authority; this only avoids requests that are certain to be refused.
    #[error("{operation} requires the {required} role")]
    Forbidden { operation: Operation, required: Role },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{operation} failed: server returned {status}")]
    RemoteOperationFailed {
        operation: Operation,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned an unexpected payload: {reason}")]
    MalformedResponse { operation: Operation, reason: String },

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl Error {
    /// The remote operation this error came from, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Forbidden { operation, .. }
            | Error::RemoteOperationFailed { operation, .. }
            | Error::Transport { operation, .. }
            | Error::MalformedResponse { operation, .. } => Some(*operation),
            Error::Unauthenticated | Error::Validation(_) | Error::Storage(_) => None,
        }
    }

    /// True when the backend rejected the bearer token, e.g. after it expired
    /// server-side or a concurrent logout invalidated it.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Unauthenticated => true,
            Error::RemoteOperationFailed { status, .. } => *status == StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }
}
