//! Login, registration, logout and profile lookup.

use reqwest::Method;
use tracing::info;

use super::Gateway;
use crate::auth::{AuthContext, Operation, UserProfile};
use crate::error::{Error, Result};
use crate::models::{DataEnvelope, LoginRequest, LoginResponse, RegisterRequest};
use crate::session::Session;

impl Gateway {
    /// Exchange credentials for a token and store the resulting session,
    /// replacing any previous one. A failed login leaves the store untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let operation = Operation::Login;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .api()
            .send_json(operation, Method::POST, &["auth", "login"], None, &request)
            .await?;

        if !response.success {
            return Err(Error::MalformedResponse {
                operation,
                reason: "server did not report success".to_string(),
            });
        }

        let token = match response.token {
            Some(token) if !token.trim().is_empty() => token,
            _ => {
                return Err(Error::MalformedResponse {
                    operation,
                    reason: "response carried no token".to_string(),
                })
            }
        };

        let session = Session {
            id: response.id.unwrap_or_default(),
            name: response.name.unwrap_or_default(),
            email: response.email.unwrap_or_else(|| email.to_string()),
            token,
        };
        self.sessions().set_session(&session)?;

        info!(user = %session.email, "Logged in");
        Ok(session)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.api()
            .send(
                Operation::Register,
                Method::POST,
                &["auth", "register"],
                None,
                Some(request),
            )
            .await?;
        info!(user = %request.email, "Registered account");
        Ok(())
    }

    /// Forget the stored session. Safe to call when already signed out.
    pub fn logout(&self) -> Result<()> {
        self.sessions().clear_session()?;
        info!("Logged out");
        Ok(())
    }

    pub async fn current_user(&self, ctx: &AuthContext) -> Result<UserProfile> {
        let operation = Operation::CurrentUser;
        let token = self.authorize(ctx, operation)?;

        let envelope: DataEnvelope<UserProfile> =
            self.api().get(operation, &["auth", "me"], token).await?;

        envelope.data.ok_or_else(|| Error::MalformedResponse {
            operation,
            reason: "missing data".to_string(),
        })
    }
}
