//! Domain records exchanged with the quest service.
//!
//! Field names follow the service's JSON (`_id`, camelCase). Timestamps are
//! kept as the ISO-8601 strings the service sends; the client only displays
//! them.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the service.
pub type ObjectId = String;

/// Username/password pair sent to the sign-in and sign-up endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub completed_quests: Vec<QuestCompletion>,
    #[serde(default)]
    pub friends: Vec<ObjectId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Geographic target of a quest, including the zoom the map should use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub country: String,
    pub city: String,
    pub coordinates: Coordinates,
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub coupon: String,
    #[serde(default)]
    pub completion_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletion {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub coupon: String,
    #[serde(default)]
    pub completion_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    #[serde(default)]
    pub added_at: Option<String>,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
}

/// Body of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    #[serde(default)]
    pub access_token: Option<String>,
}
