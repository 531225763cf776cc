//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::core::ServerState;
use crate::db::repository::AdminRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub display_name: String,
}

/// POST /api/auth/login
///
/// Authenticates admin credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let admin = match admin {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }
            if !password::verify_password(&req.password, &a.password_hash)? {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state.jwt_service.generate_token(&admin.id, &admin.username)?;

    tracing::info!(username = %admin.username, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        username: admin.username,
        display_name: admin.display_name,
    }))
}
