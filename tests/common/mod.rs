// SPDX-License-Identifier: MIT

//! Shared helpers for service integration tests.

use sendlog::config::Config;
use sendlog::AppServices;

/// Build services pointed at a wiremock backend double.
pub fn test_services(server_uri: &str) -> AppServices {
    let config = Config {
        supabase_url: server_uri.trim_end_matches('/').to_string(),
        supabase_anon_key: "test-anon-key".to_string(),
        storage_bucket: "climb-images".to_string(),
    };
    AppServices::new(config)
}

/// A climb row as the backend would return it.
pub fn climb_json(
    id: &str,
    user_id: &str,
    grade: &str,
    completed_at: &str,
    is_public: bool,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": user_id,
        "route_name": format!("Route {}", id),
        "grade": grade,
        "crag_name": "Castle Rock",
        "location": null,
        "description": null,
        "image_urls": null,
        "completed_at": completed_at,
        "rating": null,
        "is_public": is_public,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}
