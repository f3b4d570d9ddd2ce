use axum::{
    extract::{Extension, State, TypedHeader},
    headers::{authorization::Basic, Authorization},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use log::{debug, error, info};
use pwhash::bcrypt;
use std::sync::Arc;

use crate::engine;
use crate::errors::CustomError;
use crate::models::user::{AuthResponse, SignUp, UserProfile};
use crate::store::Store;
use crate::{AppState, Claims};

//handler for signing up. Creates the identity document; the users trigger
//provisions the display name and the public friend-code record.
pub async fn signup(
    Extension(store): Extension<Arc<Store>>,
    Json(signup): Json<SignUp>,
) -> Result<impl IntoResponse, CustomError> {
    info!("signup request for user: {}", signup.name);

    //Create the password hash
    let password_hash = match bcrypt::hash(&signup.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Unexpected error encrypting password {:?}", err);
            return Err(CustomError::InternalServerError);
        }
    };

    engine::provision::create_user(&store, &signup.name, signup.display_name.clone(), &password_hash)?;

    Ok((StatusCode::OK, "User created"))
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for logging in. We extract Basic authentication to retrieve username and password. If the password
//checks out we generate and return the JWT Bearer token which has the expiration encoded within
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn login(
    State(state): State<AppState>,
    Extension(store): Extension<Arc<Store>>,
    TypedHeader(basic): TypedHeader<Authorization<Basic>>,
) -> Result<impl IntoResponse, CustomError> {
    info!("login request by user: {}", basic.username());

    // Fetch the profile using the username from the basic authentication header
    let profile: UserProfile = store
        .get(&engine::user_path(basic.username()))?
        .ok_or(CustomError::UserNotFound)?;

    //Check password hash is equal to stored password hash. if not, error out
    if !bcrypt::verify(basic.password(), &profile.password_hash) {
        Err(CustomError::WrongPassword)?;
    }

    // Define the registered <Expiration Time> claim (exp) which is the current timestamp plus the defined offset
    let my_exp = match Utc::now().checked_add_signed(Duration::seconds(state.token_duration)) {
        Some(exp) => exp.timestamp(),
        None => return Err(CustomError::InternalServerError),
    };

    // Define the Claims struct
    let my_claims = Claims {
        sub: basic.username().to_string(), // username
        iat: Utc::now().timestamp() as usize, // valid from
        exp: my_exp as usize,              // valid until
    };

    // generate the Bearer token
    match encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    ) {
        Ok(token) => {
            debug!("Generated token: {token}\n");
            Ok((
                StatusCode::OK,
                Json(AuthResponse {
                    access_token: token,
                    token_type: "bearer".to_string(),
                    expires_in: state.token_duration,
                }),
            ))
        }
        Err(err) => {
            error!("Unexpected error while encoding the bearer token ({:?})", err);
            Err(CustomError::InternalServerError)
        }
    }
}
