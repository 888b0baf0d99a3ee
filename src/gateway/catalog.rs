//! Read-through cache of the hotel list.
//!
//! The backend owns hotels. The catalog only remembers the last list it
//! fetched and re-fetches after each change; it never merges a mutation into
//! the cached list except for the optimistic removal after a delete.

use tracing::warn;

use super::Gateway;
use crate::auth::AuthContext;
use crate::error::Result;
use crate::models::{Hotel, HotelDraft};

#[derive(Debug, Default)]
pub struct HotelCatalog {
    hotels: Vec<Hotel>,
    stale: bool,
}

impl HotelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn get(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }

    /// True when a change went through but the follow-up refresh failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Replace the cached list with the backend's. On failure the previous
    /// list is kept.
    pub async fn refresh(&mut self, gateway: &Gateway) -> Result<&[Hotel]> {
        let hotels = gateway.hotels().list().await?;
        self.hotels = hotels;
        self.stale = false;
        Ok(&self.hotels)
    }

    pub async fn create(
        &mut self,
        gateway: &Gateway,
        ctx: &AuthContext,
        draft: &HotelDraft,
    ) -> Result<()> {
        gateway.hotels().create(ctx, draft).await?;
        self.refresh_after_change(gateway).await;
        Ok(())
    }

    pub async fn update(
        &mut self,
        gateway: &Gateway,
        ctx: &AuthContext,
        id: &str,
        draft: &HotelDraft,
    ) -> Result<()> {
        gateway.hotels().update(ctx, id, draft).await?;
        self.refresh_after_change(gateway).await;
        Ok(())
    }

    pub async fn delete(&mut self, gateway: &Gateway, ctx: &AuthContext, id: &str) -> Result<()> {
        gateway.hotels().delete(ctx, id).await?;
        self.forget(id);
        self.refresh_after_change(gateway).await;
        Ok(())
    }

    /// Drop a hotel from the cached list without asking the backend.
    pub fn forget(&mut self, id: &str) -> bool {
        let before = self.hotels.len();
        self.hotels.retain(|hotel| hotel.id != id);
        self.hotels.len() != before
    }

    // The change is already applied remotely; a failed refresh only marks the cache stale.
    async fn refresh_after_change(&mut self, gateway: &Gateway) {
        if let Err(e) = self.refresh(gateway).await {
            warn!(error = %e, "Hotel list refresh failed after a change");
            self.stale = true;
        }
    }
}
