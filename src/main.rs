use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use log::{debug, info};
use simplelog::*;
use std::{env, net::SocketAddr, sync::Arc};

use broadside::{controllers, engine, store::Store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // set up tracing facility
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());
    info!("Starting..");

    // Retrieve the JWT secret and token duration from the env vars and store them in the shared AppState
    let state = AppState {
        jwt_secret: env::var("JWT_SECRET").expect("$JWT_SECRET is not set"),
        token_duration: env::var("TOKEN_DURATION").expect("$TOKEN_DURATION is not set")
            .parse::<i64>().expect("$TOKEN_DURATION is not numeric"),
    };

    // The document store and the reactive half of the engine
    let store = Arc::new(Store::new());
    engine::register_triggers(&store);

    // Define routes
    let app = Router::new()
        .route("/login", get(controllers::user::login))
        .route("/signup", post(controllers::user::signup))
        .route("/queue", post(controllers::matchmaking::join_queue).delete(controllers::matchmaking::exit_queue))
        .route("/game/:game_id/placement", post(controllers::game::submit_placement))
        .route("/game/:game_id/try", post(controllers::game::try_square))
        .route("/friends/request", post(controllers::social::send_friend_request))
        .route("/friends/accept", post(controllers::social::accept_friend_request))
        .route("/challenges/send", post(controllers::social::send_challenge))
        .route("/challenges/accept", post(controllers::social::accept_challenge))
        .with_state(state)
        .layer(Extension(store));

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    debug!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
