//! Client-side authorization gate.
//!
//! The gate decides whether an operation is worth attempting: it refuses
//! calls with no session before anything is sent, and hides hotel management
//! from callers whose role cannot perform it. It mirrors the backend's access
//! control and does not replace it. The real decision is made server-side on
//! every request, which is why every gated call still carries the bearer token.

use tracing::debug;

pub use crate::models::{Role, UserProfile};

use crate::error::{Error, Result};
use crate::session::{Session, SessionStore};

/// Every remote operation the gateway can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    CurrentUser,
    ListHotels,
    CreateHotel,
    UpdateHotel,
    DeleteHotel,
    ListMyBookings,
    CreateBooking,
    UpdateBooking,
    DeleteBooking,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Register => "register",
            Operation::CurrentUser => "current user",
            Operation::ListHotels => "list hotels",
            Operation::CreateHotel => "create hotel",
            Operation::UpdateHotel => "update hotel",
            Operation::DeleteHotel => "delete hotel",
            Operation::ListMyBookings => "list my bookings",
            Operation::CreateBooking => "create booking",
            Operation::UpdateBooking => "update booking",
            Operation::DeleteBooking => "delete booking",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Operation::Login | Operation::Register | Operation::ListHotels
        )
    }

    /// Minimum role for the client to attempt the operation at all.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Operation::CreateHotel | Operation::UpdateHotel | Operation::DeleteHotel => {
                Some(Role::Admin)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication state as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Who is calling, passed explicitly to every gated operation.
///
/// Built once per page load / command from the session store and, when
/// signed in, a fresh profile fetch. Roles are never cached beyond it.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    session: Option<Session>,
    profile: Option<UserProfile>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session, profile: Option<UserProfile>) -> Self {
        Self {
            session: Some(session),
            profile,
        }
    }

    /// Context from the stored session alone, without a role.
    pub fn from_store(store: &SessionStore) -> Self {
        match store.get_session() {
            Some(session) => Self::signed_in(session, None),
            None => Self::anonymous(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref().filter(|s| s.has_token())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn state(&self) -> AuthState {
        match self.session() {
            Some(_) => AuthState::Authenticated,
            None => AuthState::Unauthenticated,
        }
    }

    /// Guest without a session or a fetched profile, otherwise the profile's role.
    pub fn role(&self) -> Role {
        match (self.session(), &self.profile) {
            (Some(_), Some(profile)) => profile.role,
            _ => Role::Guest,
        }
    }

    /// Whether a UI should offer `operation` to this caller.
    pub fn allows(&self, operation: Operation) -> bool {
        self.authorize(operation).is_ok()
    }

    /// Gate `operation`, returning the bearer token to attach when it needs one.
    pub fn authorize(&self, operation: Operation) -> Result<Option<&str>> {
        if !operation.requires_session() {
            return Ok(None);
        }

        let session = match self.session() {
            Some(session) => session,
            None => {
                debug!(%operation, "Refused: no session");
                return Err(Error::Unauthenticated);
            }
        };

        if let Some(required) = operation.required_role() {
            let role = self.role();
            if !role.has_at_least(required) {
                debug!(%operation, %role, %required, "Refused: insufficient role");
                return Err(Error::Forbidden {
                    operation,
                    required,
                });
            }
        }

        Ok(Some(session.token.as_str()))
    }
}
