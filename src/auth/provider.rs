use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::IdentityConfig;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by the external identity provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credentials were rejected or the token is invalid/expired.
    #[error("invalid credentials or expired token")]
    Unauthorized,
    /// An identity is already registered under the email.
    #[error("identity already registered")]
    AlreadyExists,
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected identity provider response: {0}")]
    Unexpected(StatusCode),
}

/// Identity record held by the external provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderIdentity {
    pub id: String,
    pub email: String,
}

/// Token pair issued by the provider for a signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProviderIdentity,
}

#[derive(Debug, Deserialize)]
struct AdminUserList {
    users: Vec<ProviderIdentity>,
}

/// HTTP client for the external identity provider's auth API.
///
/// User-scoped calls carry the anonymous key; `admin_*` calls carry the
/// service-role key and must never be reachable from request input.
#[derive(Clone)]
pub struct IdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<Session> {
        let response = self
            .client
            .post(format!("{}/token?grant_type=password", self.config.url))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::parse_session(response).await
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh(&self, refresh_token: &str) -> ProviderResult<Session> {
        let response = self
            .client
            .post(format!(
                "{}/token?grant_type=refresh_token",
                self.config.url
            ))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        Self::parse_session(response).await
    }

    /// Resolve the identity behind an access token.
    pub async fn get_user(&self, access_token: &str) -> ProviderResult<ProviderIdentity> {
        let response = self
            .client
            .get(format!("{}/user", self.config.url))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
            status => Err(ProviderError::Unexpected(status)),
        }
    }

    /// Revoke the session behind an access token. An already-expired token
    /// counts as signed out.
    pub async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let response = self
            .client
            .post(format!("{}/logout", self.config.url))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            status => Err(ProviderError::Unexpected(status)),
        }
    }

    /// Register an identity with a confirmed email address.
    pub async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<ProviderIdentity> {
        let response = self
            .client
            .post(format!("{}/admin/users", self.config.url))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::CONFLICT => {
                Err(ProviderError::AlreadyExists)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
            status => Err(ProviderError::Unexpected(status)),
        }
    }

    /// Remove the identity registered under `email`, if any.
    pub async fn admin_delete_user(&self, email: &str) -> ProviderResult<()> {
        let response = self
            .client
            .get(format!("{}/admin/users", self.config.url))
            .query(&[("email", email)])
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .send()
            .await?;

        let listing: AdminUserList = match response.status() {
            status if status.is_success() => response.json().await?,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ProviderError::Unauthorized);
            }
            status => return Err(ProviderError::Unexpected(status)),
        };

        let Some(identity) = listing
            .users
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
        else {
            return Ok(());
        };

        let response = self
            .client
            .delete(format!("{}/admin/users/{}", self.config.url, identity.id))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
            status => Err(ProviderError::Unexpected(status)),
        }
    }

    async fn parse_session(response: reqwest::Response) -> ProviderResult<Session> {
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::Unauthorized)
            }
            status => Err(ProviderError::Unexpected(status)),
        }
    }
}
