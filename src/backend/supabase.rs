// SPDX-License-Identifier: MIT

//! Supabase API client for the relational and storage endpoints.
//!
//! Handles:
//! - PostgREST table queries (filter, order, limit, relational embedding)
//! - Row insert/update/delete with `return=representation`
//! - Blob storage upload, public URL derivation, and removal
//! - Uniform status checking with auth-failure detection

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::session::{SessionStore, SESSION_TOKEN_KEY};
use crate::config::Config;
use crate::error::AppError;

/// Supabase API client.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_base: String,
    storage_base: String,
    anon_key: String,
    session: Arc<dyn SessionStore>,
}

impl SupabaseClient {
    /// Create a new client from config, persisting the session token through
    /// the given store.
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Self {
        let base = config.supabase_url.trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            rest_base: format!("{}/rest/v1", base),
            storage_base: format!("{}/storage/v1", base),
            anon_key: config.supabase_anon_key.clone(),
            session,
        }
    }

    // ─── Session ─────────────────────────────────────────────────────────────

    /// Persist a session token; subsequent requests authenticate with it.
    pub fn set_session(&self, token: &str) {
        self.session.set(SESSION_TOKEN_KEY, token);
    }

    /// Drop the persisted session token, falling back to the anon key.
    pub fn clear_session(&self) {
        self.session.remove(SESSION_TOKEN_KEY);
    }

    /// Bearer token for the next request: the stored session token if one
    /// exists, otherwise the anon key.
    fn bearer_token(&self) -> String {
        self.session
            .get(SESSION_TOKEN_KEY)
            .unwrap_or_else(|| self.anon_key.clone())
    }

    /// Attach the standard auth headers to a request.
    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(self.bearer_token())
    }

    // ─── Relational API (PostgREST) ──────────────────────────────────────────

    /// Start a query against a table.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
            params: vec![("select".to_string(), "*".to_string())],
        }
    }

    /// Insert a row and return the stored representation.
    pub async fn insert<T, B>(&self, table: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.rest_base, table);
        let response = self
            .authed(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        let mut rows: Vec<T> = self.check_response_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::Backend(format!("Insert into {} returned no row", table)))
    }

    /// Apply a partial update to the row with the given id and return the
    /// updated representation.
    pub async fn update<T, B>(&self, table: &str, id: &str, patch: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.rest_base, table);
        let response = self
            .authed(self.http.patch(&url))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        let mut rows: Vec<T> = self.check_response_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::NotFound(format!("{} {}", table, id)))
    }

    /// Delete the row with the given id. Deleting a missing row is a no-op
    /// success.
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), AppError> {
        let url = format!("{}/{}", self.rest_base, table);
        let response = self
            .authed(self.http.delete(&url))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.check_response(response).await
    }

    // ─── Storage API ─────────────────────────────────────────────────────────

    /// Upload a blob to storage.
    ///
    /// With `upsert` false, a path collision is a hard backend failure.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/object/{}/{}",
            self.storage_base,
            bucket,
            encode_object_path(path)
        );
        let response = self
            .authed(self.http.post(&url))
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.check_response(response).await
    }

    /// Public URL for a stored object.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_base,
            bucket,
            encode_object_path(path)
        )
    }

    /// Remove objects from storage. The backend absorbs double-deletes as
    /// success.
    pub async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), AppError> {
        let url = format!("{}/object/{}", self.storage_base, bucket);
        let body = serde_json::json!({ "prefixes": paths });
        let response = self
            .authed(self.http.delete(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.check_response(response).await
    }

    // ─── Response Handling ───────────────────────────────────────────────────

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 401 {
            tracing::warn!("Backend rejected request as unauthenticated (401)");
            return Err(AppError::Backend(format!(
                "{}: HTTP 401: {}",
                AppError::AUTH_FAILED,
                body
            )));
        }

        Err(AppError::Backend(format!("HTTP {}: {}", status, body)))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                tracing::warn!("Backend rejected request as unauthenticated (401)");
                return Err(AppError::Backend(format!(
                    "{}: HTTP 401: {}",
                    AppError::AUTH_FAILED,
                    body
                )));
            }

            return Err(AppError::Backend(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("JSON parse error: {}", e)))
    }
}

/// Percent-encode an object path, keeping the `/` separators.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

// ─────────────────────────────────────────────────────────────────────────────
// TableQuery - fluent PostgREST query builder
// ─────────────────────────────────────────────────────────────────────────────

/// Fluent builder for a PostgREST table read.
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery<'_> {
    /// Override the selected columns, including relational embeds such as
    /// `*,profiles(username,avatar_url)`.
    pub fn select(mut self, columns: &str) -> Self {
        self.params[0].1 = columns.to_string();
        self
    }

    /// Equality filter on a column.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Case-insensitive substring match on any of the given columns.
    pub fn or_ilike(mut self, columns: &[&str], term: &str) -> Self {
        let pattern = format!("*{}*", sanitize_ilike_term(term));
        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("{}.ilike.{}", c, pattern))
            .collect();
        self.params
            .push(("or".to_string(), format!("({})", clauses.join(","))));
        self
    }

    /// Order results by a column, descending.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.desc", column)));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    /// Execute the query and deserialize the row set.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        let url = format!("{}/{}", self.client.rest_base, self.table);
        let response = self
            .client
            .authed(self.client.http.get(&url))
            .query(&self.params)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.client.check_response_json(response).await
    }
}

/// Strip PostgREST logic-tree delimiters from a user-supplied search term so
/// it cannot corrupt the `or=(...)` filter expression.
fn sanitize_ilike_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_ilike_term_strips_delimiters() {
        assert_eq!(sanitize_ilike_term("boulder"), "boulder");
        assert_eq!(sanitize_ilike_term("el,cap(*)"), "elcap");
    }

    #[test]
    fn test_encode_object_path_keeps_separators() {
        assert_eq!(
            encode_object_path("user-1/climb 2/a.jpg"),
            "user-1/climb%202/a.jpg"
        );
    }
}
