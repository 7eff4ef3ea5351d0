use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginEmailRequest, LoginPhoneRequest, MeResponse, OtpSentResponse, RegisterRequest,
            RegisterResponse, TokenResponse, ValidateOtpRequest,
        },
        jwt::{AuthUser, JwtKeys},
        otp, password,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/loginWithEmail", post(login_with_email))
        .route("/loginWithPhone", post(login_with_phone))
        .route("/validateOtp", post(validate_otp))
        .route("/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    payload.validate()?;

    let hash = password::hash_password(&payload.password)?;

    // Duplicate phone/email comes back as the store's unique_violation,
    // mapped to Conflict in the error layer.
    let user = User::create(
        &state.db,
        payload.name.as_deref(),
        &payload.phone,
        &payload.email,
        &hash,
    )
    .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(RegisterResponse {
        success: true,
        id: user.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login_with_email(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginEmailRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validate()?;

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::NotFound("User not found".into())
        })?;

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials("Invalid credentials".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok(Json(TokenResponse {
        success: true,
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login_with_phone(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginPhoneRequest>,
) -> Result<Json<OtpSentResponse>, ApiError> {
    payload.validate()?;

    let user = User::find_by_phone(&state.db, &payload.phone)
        .await?
        .ok_or_else(|| {
            warn!(phone = %payload.phone, "otp request for unknown phone");
            ApiError::NotFound("User not found".into())
        })?;

    let code = otp::generate_otp();
    User::set_otp(&state.db, user.id, &code).await?;

    // Delivery is an out-of-band channel; like the tutorial backend this
    // writes the code to the log instead of an SMS gateway.
    info!(user_id = user.id, phone = %user.phone, %code, "otp issued");
    Ok(Json(OtpSentResponse { success: true }))
}

#[instrument(skip(state, payload))]
pub async fn validate_otp(
    State(state): State<AppState>,
    Json(mut payload): Json<ValidateOtpRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validate()?;

    let user = User::find_by_phone(&state.db, &payload.phone)
        .await?
        .ok_or_else(|| {
            warn!(phone = %payload.phone, "otp validation for unknown phone");
            ApiError::NotFound("User not found".into())
        })?;

    if user.otp.is_none() {
        warn!(user_id = user.id, "otp validation with no pending code");
        return Err(ApiError::InvalidCredentials("Invalid OTP".into()));
    }

    // Single atomic compare-and-clear; a used or stale code cannot match
    // twice even under concurrent attempts.
    let matched = User::take_otp(&state.db, user.id, &payload.otp).await?;
    if !matched {
        warn!(user_id = user.id, "otp mismatch");
        return Err(ApiError::InvalidCredentials("Invalid OTP".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = user.id, "user logged in via otp");
    Ok(Json(TokenResponse {
        success: true,
        token,
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id, "token for missing user");
            ApiError::NotFound("User not found".into())
        })?;

    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}
