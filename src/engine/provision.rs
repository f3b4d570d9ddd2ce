//! Identity creation and first-login provisioning: a generated display name
//! if none was supplied, plus the public friend-code lookup record.

use chrono::Utc;
use log::info;

use crate::errors::CustomError;
use crate::models::user::{PublicUser, UserProfile};
use crate::store::{DocEvent, Store};

use super::{ids, public_user_path, user_path};

/// Create the identity document at `users/{uid}`. The provisioning trigger
/// fills in the rest.
pub fn create_user(
    store: &Store,
    uid: &str,
    display_name: Option<String>,
    password_hash: &str,
) -> Result<(), CustomError> {
    let profile = UserProfile {
        password_hash: password_hash.to_string(),
        display_name,
        friend_code: None,
        created: Utc::now(),
    };
    store.run_transaction(|tx| {
        if tx.exists(&user_path(uid)) {
            return Err(CustomError::UserExists);
        }
        tx.create(&user_path(uid), &profile)?;
        Ok(())
    })?;
    info!("created user {}", uid);
    Ok(())
}

// Trigger on identity creation. A friend-code collision makes the create of
// the public record conflict, which re-runs the body with a fresh code.
pub(crate) fn provision_user(store: &Store, event: &DocEvent) -> anyhow::Result<()> {
    let uid = event.path.id().to_string();
    store.run_transaction(|tx| {
        let Some(mut profile) = tx.get::<UserProfile>(&user_path(&uid))? else {
            return Ok(());
        };
        if profile.friend_code.is_some() {
            // already provisioned
            return Ok(());
        }
        let display_name = profile.display_name.clone().unwrap_or_else(ids::display_name);
        let code = ids::friend_code();
        profile.display_name = Some(display_name.clone());
        profile.friend_code = Some(code.clone());
        tx.set(&user_path(&uid), &profile)?;
        tx.create(
            &public_user_path(&code),
            &PublicUser { user_id: uid.clone(), display_name },
        )?;
        Ok::<_, anyhow::Error>(())
    })?;
    info!("provisioned user {}", uid);
    Ok(())
}
