use reqwest::Method;
use tracing::info;

use super::Gateway;
use crate::auth::{AuthContext, Operation};
use crate::error::Result;
use crate::models::{DataEnvelope, Hotel, HotelDraft};

/// Hotel endpoints. Listing is public; changes need an admin session.
pub struct Hotels<'a> {
    gateway: &'a Gateway,
}

impl<'a> Hotels<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// All hotels. A response without `data` is an empty list.
    pub async fn list(&self) -> Result<Vec<Hotel>> {
        let envelope: DataEnvelope<Vec<Hotel>> = self
            .gateway
            .api()
            .get(Operation::ListHotels, &["hotels"], None)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Add a hotel. `tel` and `postalcode` are clipped as by
    /// [`HotelDraft::normalized`] before sending.
    pub async fn create(&self, ctx: &AuthContext, draft: &HotelDraft) -> Result<()> {
        let operation = Operation::CreateHotel;
        let token = self.gateway.authorize(ctx, operation)?;
        let draft = draft.clone().normalized();
        self.gateway
            .api()
            .send(operation, Method::POST, &["hotels"], token, Some(&draft))
            .await?;
        info!(name = %draft.name, "Hotel created");
        Ok(())
    }

    pub async fn update(&self, ctx: &AuthContext, id: &str, draft: &HotelDraft) -> Result<()> {
        let operation = Operation::UpdateHotel;
        let token = self.gateway.authorize(ctx, operation)?;
        let draft = draft.clone().normalized();
        self.gateway
            .api()
            .send(operation, Method::PUT, &["hotels", id], token, Some(&draft))
            .await?;
        info!(hotel = %id, "Hotel updated");
        Ok(())
    }

    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> Result<()> {
        let operation = Operation::DeleteHotel;
        let token = self.gateway.authorize(ctx, operation)?;
        self.gateway
            .api()
            .send::<()>(operation, Method::DELETE, &["hotels", id], token, None)
            .await?;
        info!(hotel = %id, "Hotel deleted");
        Ok(())
    }
}
