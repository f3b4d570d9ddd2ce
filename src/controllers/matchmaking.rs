use axum::{
    extract::{Extension, State, TypedHeader},
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;
use serde_json::json;
use std::sync::Arc;

use crate::authed;
use crate::engine;
use crate::errors::CustomError;
use crate::store::Store;
use crate::AppState;

//handler for joining the matchmaking queue. Pairing itself happens in the
//queue-entry trigger.
pub async fn join_queue(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, CustomError> {
    info!("join queue request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::matchmaking::join_queue(&store, &uid)?;
    Ok((StatusCode::OK, Json(json!({ "result": "queued" }))))
}

//handler for leaving the matchmaking queue
pub async fn exit_queue(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, CustomError> {
    info!("exit queue request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::matchmaking::exit_queue(&store, &uid)?;
    Ok((StatusCode::OK, Json(json!({ "result": "left" }))))
}
