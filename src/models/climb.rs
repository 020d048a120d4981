// SPDX-License-Identifier: MIT

//! Climb record model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored climb row.
///
/// Owned by exactly one user; visibility to other users is controlled by
/// `is_public`. Ownership enforcement lives in the backend, not this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climb {
    /// Row id (assigned by the backend)
    pub id: String,
    /// Owning user's id (references a profile row)
    pub user_id: String,
    /// Route name (e.g. "Midnight Lightning")
    pub route_name: String,
    /// Grade code (e.g. "V4")
    pub grade: String,
    /// Crag/venue name
    pub crag_name: String,
    /// Free-form location
    pub location: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Public URLs of uploaded images, in display order
    pub image_urls: Option<Vec<String>>,
    /// When the climb was completed (ISO 8601)
    pub completed_at: String,
    /// Optional 1-5 rating
    pub rating: Option<i32>,
    /// Whether the climb appears in cross-user feeds
    pub is_public: bool,
    /// Creation timestamp (assigned by the backend, ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

/// Insert shape for a new climb. The backend assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClimbInsert {
    pub user_id: String,
    pub route_name: String,
    pub grade: String,
    pub crag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Partial update shape. Omitted fields are left untouched, not nulled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClimbUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Stamped by `ClimbService::update` on every call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Climb joined with the owning profile's public fields (for feeds).
#[derive(Debug, Clone, Deserialize)]
pub struct ClimbWithProfile {
    #[serde(flatten)]
    pub climb: Climb,
    /// Embedded owner profile; None if the join produced no row.
    pub profiles: Option<ProfileSummary>,
}

/// Public subset of a profile embedded in feed queries.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    pub avatar_url: Option<String>,
}
