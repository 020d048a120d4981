//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Profile row. The id is shared with the user's auth identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Auth user id (also the row id)
    pub id: String,
    pub username: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Public avatar URL
    pub avatar_url: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

/// Insert shape for a new profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileInsert {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Partial update shape for a profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
