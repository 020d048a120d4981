//! Climb attempt model.
//!
//! Declared in the backend schema; no service operation reads or writes
//! attempts yet. The shapes are kept so the schema stays fully typed for
//! callers that query the table directly.

use serde::{Deserialize, Serialize};

/// Stored attempt row. Many attempts may reference one climb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbAttempt {
    pub id: String,
    /// Climb this attempt belongs to
    pub climb_id: String,
    /// User who logged the attempt
    pub user_id: String,
    /// Attempt date (ISO 8601)
    pub attempt_date: String,
    /// Whether the attempt was a send
    pub success: bool,
    pub notes: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

/// Insert shape for an attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ClimbAttemptInsert {
    pub climb_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_date: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update shape for an attempt.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClimbAttemptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
