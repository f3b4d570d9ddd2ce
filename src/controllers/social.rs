use axum::{
    extract::{Extension, State, TypedHeader},
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::authed;
use crate::engine;
use crate::errors::CustomError;
use crate::store::Store;
use crate::AppState;

// The struct used for receiving the counterpart user as json
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TargetUser {
    pub user_id: String,
}

//handler for sending a friend request
pub async fn send_friend_request(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<TargetUser>,
) -> Result<impl IntoResponse, CustomError> {
    info!("friend request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::social::send_friend_request(&store, &uid, &body.user_id)?;
    Ok((StatusCode::OK, Json(json!({ "result": "sent" }))))
}

//handler for accepting a friend request
pub async fn accept_friend_request(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<TargetUser>,
) -> Result<impl IntoResponse, CustomError> {
    info!("accept friend request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::social::accept_friend_request(&store, &uid, &body.user_id)?;
    Ok((StatusCode::OK, Json(json!({ "result": "accepted" }))))
}

//handler for challenging another user directly
pub async fn send_challenge(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<TargetUser>,
) -> Result<impl IntoResponse, CustomError> {
    info!("challenge request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::social::send_challenge(&store, &uid, &body.user_id)?;
    Ok((StatusCode::OK, Json(json!({ "result": "sent" }))))
}

//handler for accepting a challenge. Creates the game and returns its id.
pub async fn accept_challenge(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<TargetUser>,
) -> Result<impl IntoResponse, CustomError> {
    info!("accept challenge request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    let game_id = engine::social::accept_challenge(&store, &uid, &body.user_id)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "result": "accepted", "gameId": game_id })),
    ))
}
