// SPDX-License-Identifier: MIT

//! Climb repository service.
//!
//! Maps domain operations (create/read/update/delete/search/aggregate) onto
//! backend calls. Every operation is a single network round-trip with no
//! caching or retries; errors come back as values, never panics.

use crate::backend::{tables, SupabaseClient};
use crate::error::Result;
use crate::models::{Climb, ClimbInsert, ClimbUpdate, ClimbWithProfile, UserStats};

/// Default row cap for the public feed.
const PUBLIC_FEED_LIMIT: u32 = 50;
/// Row cap for search results.
const SEARCH_LIMIT: u32 = 20;

/// Typed access to climb records.
#[derive(Clone)]
pub struct ClimbService {
    db: SupabaseClient,
}

impl ClimbService {
    pub fn new(db: SupabaseClient) -> Self {
        Self { db }
    }

    /// Insert a new climb. The backend assigns id and timestamps and returns
    /// the stored row.
    pub async fn create(&self, climb: ClimbInsert) -> Result<Climb> {
        let row: Climb = self.db.insert(tables::CLIMBS, &climb).await?;
        tracing::info!(climb_id = %row.id, user_id = %row.user_id, "Climb created");
        Ok(row)
    }

    /// All climbs owned by a user, most recently completed first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Climb>> {
        self.db
            .from(tables::CLIMBS)
            .eq("user_id", user_id)
            .order_desc("completed_at")
            .fetch()
            .await
    }

    /// Public climbs joined with the owning profile's username and avatar
    /// (for feeds and leaderboards). Non-public climbs are never returned.
    pub async fn list_public(&self, limit: Option<u32>) -> Result<Vec<ClimbWithProfile>> {
        self.db
            .from(tables::CLIMBS)
            .select("*,profiles(username,avatar_url)")
            .eq("is_public", "true")
            .order_desc("completed_at")
            .limit(limit.unwrap_or(PUBLIC_FEED_LIMIT))
            .fetch()
            .await
    }

    /// Apply a partial update and return the updated row.
    ///
    /// A fresh `updated_at` is stamped on every call, including an empty
    /// patch. Omitted fields are left untouched.
    pub async fn update(&self, id: &str, mut patch: ClimbUpdate) -> Result<Climb> {
        patch.updated_at = Some(chrono::Utc::now().to_rfc3339());
        self.db.update(tables::CLIMBS, id, &patch).await
    }

    /// Delete a climb by id. Deleting a non-existent id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.db.delete(tables::CLIMBS, id).await?;
        tracing::info!(climb_id = %id, "Climb deleted");
        Ok(())
    }

    /// Case-insensitive substring search on route name or crag name.
    ///
    /// Scoped to the given user's climbs (any visibility) when `user_id` is
    /// set, otherwise to public climbs only. Capped at 20 results.
    pub async fn search(&self, query: &str, user_id: Option<&str>) -> Result<Vec<Climb>> {
        let q = self
            .db
            .from(tables::CLIMBS)
            .or_ilike(&["route_name", "crag_name"], query);

        let q = match user_id {
            Some(uid) => q.eq("user_id", uid),
            None => q.eq("is_public", "true"),
        };

        q.order_desc("completed_at").limit(SEARCH_LIMIT).fetch().await
    }

    /// Climbs with an exact grade match, same visibility scoping as
    /// [`search`](Self::search), no cap.
    pub async fn list_by_grade(&self, grade: &str, user_id: Option<&str>) -> Result<Vec<Climb>> {
        let q = self.db.from(tables::CLIMBS).eq("grade", grade);

        let q = match user_id {
            Some(uid) => q.eq("user_id", uid),
            None => q.eq("is_public", "true"),
        };

        q.order_desc("completed_at").fetch().await
    }

    /// Fetch all of a user's climbs and aggregate them into stats.
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats> {
        let climbs: Vec<Climb> = self
            .db
            .from(tables::CLIMBS)
            .eq("user_id", user_id)
            .fetch()
            .await?;

        tracing::debug!(user_id = %user_id, count = climbs.len(), "Aggregating user stats");
        Ok(UserStats::from_climbs(climbs))
    }
}
