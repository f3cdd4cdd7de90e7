//! Admin auth endpoints.
//!
//! Only site administrators authenticate; visitors never log in. A
//! successful login stores the bearer token in the client's [`Session`],
//! and logout (or a 401 from any endpoint) clears it.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ApiClient;
use crate::error::Result;

/// Admin login credentials.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginCredentials {
    /// Admin account email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Admin account registration data.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterData {
    /// Account email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Admin account as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub user: AdminUser,
}

/// Auth endpoint wrappers.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Access the auth endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// `POST /auth/login` — authenticate and store the token in the session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AdminUser> {
        credentials.validate()?;
        let envelope = self
            .client
            .post_json::<LoginPayload, _>("auth/login", credentials)
            .await?;
        self.client.session().set_token(&envelope.data.token).await;
        tracing::info!(email = %envelope.data.user.email, "admin login");
        Ok(envelope.data.user)
    }

    /// `GET /auth/me` — the currently authenticated account.
    pub async fn me(&self) -> Result<AdminUser> {
        let envelope = self.client.get_json::<AdminUser>("auth/me").await?;
        Ok(envelope.data)
    }

    /// `POST /auth/register` — register a new admin account.
    pub async fn register(&self, data: &RegisterData) -> Result<AdminUser> {
        data.validate()?;
        let envelope = self
            .client
            .post_json::<AdminUser, _>("auth/register", data)
            .await?;
        Ok(envelope.data)
    }

    /// `POST /auth/logout` — end the session and drop the local token.
    ///
    /// The local token is cleared even if the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.client.post_empty("auth/logout").await;
        self.client.session().clear().await;
        result
    }
}
