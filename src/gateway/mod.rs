//! Typed, authenticated access to the hotel and booking backend.
//!
//! Gated operations take an [`AuthContext`] and attach its token as a bearer
//! credential. Calls with no session, or whose session has since left the
//! store, fail with `Unauthenticated` before any request is built.
//!
//! Concurrent calls are independent and unordered. A refresh racing a
//! mutation may observe the state before it; callers converge by refreshing
//! again, never by merging responses locally.

pub mod account;
pub mod bookings;
pub mod catalog;
pub mod client;
pub mod hotels;

pub use bookings::Bookings;
pub use catalog::HotelCatalog;
pub use client::ApiClient;
pub use hotels::Hotels;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{AuthContext, Operation};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{FileStorage, SessionStore};

pub struct Gateway {
    api: ApiClient,
    sessions: SessionStore,
}

impl Gateway {
    pub fn new(api: ApiClient, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Gateway backed by the configured API URL and on-disk session file.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let storage = FileStorage::new(&config.session.path);
        debug!(
            api = %api.base_url(),
            session = %storage.path().display(),
            "Gateway configured"
        );
        Ok(Self::new(api, SessionStore::new(Arc::new(storage))))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn hotels(&self) -> Hotels<'_> {
        Hotels::new(self)
    }

    pub fn bookings(&self) -> Bookings<'_> {
        Bookings::new(self)
    }

    /// Context from the stored session only. The role stays `Guest`.
    pub fn context(&self) -> AuthContext {
        AuthContext::from_store(&self.sessions)
    }

    /// Gate `operation` for `ctx`, returning the bearer token to attach.
    ///
    /// Session-bound operations also re-read the store: a context whose
    /// session was cleared or replaced since it was built is `Unauthenticated`
    /// and nothing is sent.
    pub fn authorize<'c>(
        &self,
        ctx: &'c AuthContext,
        operation: Operation,
    ) -> Result<Option<&'c str>> {
        if operation.requires_session() {
            let stored = self.sessions.get_session();
            let held = ctx.session().map(|session| session.token.as_str());
            match (stored, held) {
                (Some(stored), Some(held)) if stored.token == held => {}
                _ => {
                    debug!(%operation, "Refused: session no longer in the store");
                    return Err(Error::Unauthenticated);
                }
            }
        }
        ctx.authorize(operation)
    }

    /// Context from the stored session plus a fresh `/auth/me` lookup.
    ///
    /// A failed lookup keeps the session with the least-privileged role;
    /// booking calls can still go through and the backend decides.
    pub async fn resolve_context(&self) -> AuthContext {
        let ctx = self.context();
        let session = match ctx.session() {
            Some(session) => session.clone(),
            None => return ctx,
        };

        match self.current_user(&ctx).await {
            Ok(profile) => AuthContext::signed_in(session, Some(profile)),
            Err(e) => {
                warn!(error = %e, "Could not fetch profile, continuing without a role");
                AuthContext::signed_in(session, None)
            }
        }
    }
}
