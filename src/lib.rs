pub mod controllers;
pub mod engine;
pub mod errors;
pub mod models;
pub mod store;

use axum::extract::TypedHeader;
use axum::headers::{authorization::Bearer, Authorization};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::error;
use serde::{Deserialize, Serialize};

use crate::errors::CustomError;

// The claims struct used for creating a Bearer token
#[derive(Deserialize, Serialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

// Shared immutable state
#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: String,
    pub token_duration: i64,
}

// Helper function to check that a bearer token is valid (user is signed in).
// Returns the caller uid from the sub claim. It's here because basically
// every controller function needs it.
pub async fn check_access(
    state: &AppState,
    bearer: &Authorization<Bearer>,
) -> Result<String, CustomError> {
    match decode::<Claims>(
        bearer.token(),
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(token_data) => Ok(token_data.claims.sub),
        Err(err) => {
            error!("Invalid token: {:?}", err.kind());
            Err(CustomError::InvalidToken)
        }
    }
}

// A missing Authorization header means the caller is not signed in at all
pub async fn authed(
    state: &AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<String, CustomError> {
    match bearer {
        Some(TypedHeader(bearer)) => check_access(state, &bearer).await,
        None => Err(CustomError::NotSignedIn),
    }
}
