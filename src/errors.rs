use axum::{http::StatusCode, response::IntoResponse, Json};
use log::error;
use serde_json::json;

use crate::store::StoreError;

// Custom Errors used in handlers and in the transactional engine
#[derive(Debug, PartialEq, Eq)]
pub enum CustomError {
    NotSignedIn,
    InvalidToken,
    WrongPassword,
    UserNotFound,
    GameNotFound,
    PlacementNotFound,
    RequestNotFound,
    ChallengeNotFound,
    NotYourTurn,
    GameNotPlaying,
    GameNotPlacing,
    AlreadyGuessed,
    AlreadyPlaced,
    AlreadyFriends,
    IllegalPlacement,
    NotInGame,
    UserExists,
    DuplicateRequest,
    DuplicateChallenge,
    InternalServerError,
}

//implementation of custom errors that are used in handlers
impl IntoResponse for CustomError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Self::NotSignedIn => (StatusCode::UNAUTHORIZED, "User is not signed in"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "Token is not valid"),
            Self::WrongPassword => (StatusCode::UNAUTHORIZED, "Wrong Password"),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "User is not found"),
            Self::GameNotFound => (StatusCode::NOT_FOUND, "Game is not found"),
            Self::PlacementNotFound => (StatusCode::NOT_FOUND, "Placement data does not exist"),
            Self::RequestNotFound => (StatusCode::NOT_FOUND, "Friend request is not found"),
            Self::ChallengeNotFound => (StatusCode::NOT_FOUND, "Challenge is not found"),
            Self::NotYourTurn => (StatusCode::BAD_REQUEST, "Not your turn"),
            Self::GameNotPlaying => (StatusCode::BAD_REQUEST, "Game is not playing"),
            Self::GameNotPlacing => (StatusCode::BAD_REQUEST, "Game is not in placement"),
            Self::AlreadyGuessed => (StatusCode::BAD_REQUEST, "This square has already been guessed"),
            Self::AlreadyPlaced => (StatusCode::BAD_REQUEST, "Ships have already been placed"),
            Self::AlreadyFriends => (StatusCode::BAD_REQUEST, "You are already friends"),
            Self::IllegalPlacement => (StatusCode::BAD_REQUEST, "Ship placement is not legal"),
            Self::NotInGame => (StatusCode::BAD_REQUEST, "You are not a player in this game"),
            Self::UserExists => (StatusCode::BAD_REQUEST, "User already exists"),
            Self::DuplicateRequest => (StatusCode::CONFLICT, "Friend request already sent"),
            Self::DuplicateChallenge => (StatusCode::CONFLICT, "Challenge already sent"),
            Self::InternalServerError => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

// Store failures (retry exhaustion, corrupt documents) are never the caller's
// fault, so they all surface as a generic internal error
impl From<StoreError> for CustomError {
    fn from(err: StoreError) -> Self {
        error!("store error: {:?}", err);
        CustomError::InternalServerError
    }
}
