use serde::Deserialize;
use validator::Validate;

/// Credentials submitted to the login endpoint. Verified by the external
/// identity provider, never against the local password hash.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
