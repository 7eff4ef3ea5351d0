use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod jwt;
pub mod otp;
pub mod password;
mod repo;
pub mod repo_types;
mod validate;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
