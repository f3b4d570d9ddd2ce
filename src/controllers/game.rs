use axum::{
    extract::{Extension, Path, State, TypedHeader},
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::authed;
use crate::engine;
use crate::errors::CustomError;
use crate::models::game::Square;
use crate::models::placement::Ship;
use crate::store::Store;
use crate::AppState;

// The struct used for receiving a guess as json
#[derive(Deserialize, Serialize, Debug)]
pub struct TrySquare {
    square: Square,
}

// The struct used for receiving a fleet placement as json
#[derive(Deserialize, Serialize, Debug)]
pub struct SubmitPlacement {
    ships: Vec<Ship>,
}

//handler for guessing a square. Returns the hit and win flags, nothing else.
pub async fn try_square(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<TrySquare>,
) -> Result<impl IntoResponse, CustomError> {
    info!("try square request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    let outcome = engine::turns::try_square(&store, &uid, &game_id, &body.square)?;
    Ok((StatusCode::OK, Json(outcome)))
}

//handler for submitting the ship placement, once per player per game
pub async fn submit_placement(
    Path(game_id): Path<String>,
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<SubmitPlacement>,
) -> Result<impl IntoResponse, CustomError> {
    info!("placement request");

    //check if user is logged in, bail out if not
    let uid = authed(&state, bearer).await?;

    engine::placement::submit_placement(&store, &uid, &game_id, &body.ships)?;
    Ok((StatusCode::OK, "Ships placed"))
}
