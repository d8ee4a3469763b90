use axum::{extract::Json, http::StatusCode};
use contracts::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::error::ApiError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users};

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    let user = users::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = jwt::generate_access_token(&user.id, &user.email, user.is_admin).await?;

    Ok(Json(LoginResponse {
        access_token,
        user: user.to_info(),
    }))
}

/// Logout handler. Tokens are stateless, so the client discards its copy;
/// the endpoint exists so sign-out is an explicit server-visible event.
pub async fn logout(CurrentUser(claims): CurrentUser) -> StatusCode {
    tracing::info!("User {} signed out", claims.email);
    StatusCode::OK
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, ApiError> {
    let user = users::get_by_id(&claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(user.to_info()))
}
