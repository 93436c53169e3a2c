use serde::Serialize;

use crate::auth::password::hash_password;
use crate::auth::provider::{IdentityProvider, Session};
use crate::domain::user::{NewUser, User};
use crate::forms::auth::LoginForm;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

/// Login/refresh response: the mirrored local user plus the provider
/// session whose tokens the route turns into cookies.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: User,
    pub session: Session,
}

/// Sign in against the external provider, then sync the local mirror row.
///
/// The first successful login for a verified identity creates the local
/// record: role `user`, no store grants, the submitted password stored as
/// the argon2-hashed fallback credential.
pub async fn login<R>(repo: &R, provider: &IdentityProvider, form: LoginForm) -> ServiceResult<AuthData>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let session = provider.sign_in(&form.email, &form.password).await?;

    let email = session.user.email.clone();
    let existing = repo.get_user_by_email(&email).map_err(ServiceError::from)?;

    let user = match existing {
        Some(user) => user,
        None => {
            let password_hash = hash_password(&form.password)
                .map_err(|err| ServiceError::Internal(err.to_string()))?;
            let display_name = email.split('@').next().unwrap_or(&email).to_string();

            repo.create_user(&NewUser::new(email, password_hash, display_name))
                .map_err(ServiceError::from)?
        }
    };

    Ok(AuthData { user, session })
}

/// Rotate the session behind a refresh token and resolve its local user.
pub async fn refresh<R>(
    repo: &R,
    provider: &IdentityProvider,
    refresh_token: &str,
) -> ServiceResult<AuthData>
where
    R: UserReader + ?Sized,
{
    let session = provider.refresh(refresh_token).await?;

    let user = repo
        .get_user_by_email(&session.user.email)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    Ok(AuthData { user, session })
}

/// Revoke the provider session. Best effort: a failure is logged and the
/// cookies are cleared regardless.
pub async fn logout(provider: &IdentityProvider, access_token: Option<&str>) {
    if let Some(token) = access_token {
        if let Err(err) = provider.sign_out(token).await {
            log::warn!("provider sign-out failed: {err}");
        }
    }
}
