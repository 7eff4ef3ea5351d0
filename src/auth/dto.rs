use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub id: i64,
}

/// Request body for email/password login.
#[derive(Debug, Deserialize)]
pub struct LoginEmailRequest {
    pub email: String,
    pub password: String,
}

/// Request body for requesting a phone-login OTP.
#[derive(Debug, Deserialize)]
pub struct LoginPhoneRequest {
    pub phone: String,
}

/// Request body for exchanging a phone OTP for a token.
#[derive(Debug, Deserialize)]
pub struct ValidateOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct OtpSentResponse {
    pub success: bool,
}

/// Public part of the user returned by /api/me. Never the password hash or
/// a pending OTP.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub name: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: PublicUser,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            phone: user.phone,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
