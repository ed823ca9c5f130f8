// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{config::Config, error::AppError, utils::jwt::sign_anonymous_jwt};

/// Anonymous sign-in.
///
/// Issues a bearer token for a brand new identity. The identity is only used
/// as the key of the learner's progress document.
pub async fn sign_in_anonymously(
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let (token, identity) = sign_anonymous_jwt(&config.jwt_secret, config.jwt_expiration)?;

    tracing::debug!(uid = identity.as_str(), "Anonymous identity issued");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "uid": identity,
            "expires_in": config.jwt_expiration
        })),
    ))
}
