use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and profile document at `users/{uid}`. The friend code and a
/// generated display name are filled in by the provisioning trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub password_hash: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub friend_code: Option<String>,
    pub created: DateTime<Utc>,
}

/// Public lookup record at `public-users/{friendCode}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: String,
    pub display_name: String,
}

/// Pending request at `users/{target}/friend-requests/{from}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub user_id: String,
    pub display_name: String,
    pub created: DateTime<Utc>,
}

/// Confirmed friendship at `users/{uid}/friends/{other}`, mirrored on both
/// sides on acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub user_id: String,
    pub display_name: String,
    pub created: DateTime<Utc>,
}

/// Pending direct challenge at `users/{target}/challenges/{from}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub user_id: String,
    pub display_name: String,
    pub created: DateTime<Utc>,
}

// The struct used for receiving signup data as json
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

// The struct used to respond with an official json for the bearer token
#[derive(Deserialize, Serialize, Debug)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
