//! User statistics aggregates for profile and dashboard views.
//!
//! Computed client-side in a single pass over a user's climbs; the backend
//! only supplies the raw rows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Climb;

/// How many climbs count as "recent activity".
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Aggregated statistics for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    /// Total number of logged climbs
    pub total_climbs: u32,
    /// Count of climbs per grade code (unordered keys)
    pub grade_distribution: HashMap<String, u32>,
    /// The 5 most recently completed climbs, newest first
    pub recent_activity: Vec<Climb>,
}

impl UserStats {
    /// Aggregate a user's climbs.
    ///
    /// Recent activity ties on `completed_at` keep the original fetch order
    /// (stable sort), matching whatever ordering the backend returned.
    pub fn from_climbs(climbs: Vec<Climb>) -> Self {
        let total_climbs = climbs.len() as u32;

        let mut grade_distribution: HashMap<String, u32> = HashMap::new();
        for climb in &climbs {
            *grade_distribution.entry(climb.grade.clone()).or_insert(0) += 1;
        }

        let mut recent_activity = climbs;
        recent_activity.sort_by_key(|c| std::cmp::Reverse(completed_at_millis(&c.completed_at)));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total_climbs,
            grade_distribution,
            recent_activity,
        }
    }
}

/// Parse a completion timestamp to epoch milliseconds for sorting.
///
/// Unparseable timestamps sort as oldest rather than failing the aggregate.
fn completed_at_millis(timestamp: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(i64::MIN)
}
