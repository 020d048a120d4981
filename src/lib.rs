// SPDX-License-Identifier: MIT

//! Sendlog: client library for the climbing-tracking backend.
//!
//! This crate wraps the hosted Supabase backend (PostgREST relational API
//! plus blob storage) behind two typed services: climb records and image
//! uploads. All operations are single network calls with no local caching
//! or retries; failures come back as values, never panics.

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use backend::{MemorySessionStore, SessionStore, SupabaseClient};
use config::{Config, ConfigError};
use services::{ClimbService, MediaService};

/// Shared application services, wired from a single config.
pub struct AppServices {
    pub config: Config,
    pub climbs: ClimbService,
    pub media: MediaService,
}

impl AppServices {
    /// Build services from an already-loaded config, using an in-process
    /// session store.
    pub fn new(config: Config) -> Self {
        Self::with_session_store(config, Arc::new(MemorySessionStore::new()))
    }

    /// Build services with a caller-provided session store (e.g. a secure
    /// on-device keystore adapter).
    pub fn with_session_store(config: Config, session: Arc<dyn SessionStore>) -> Self {
        let client = SupabaseClient::new(&config, session);
        let climbs = ClimbService::new(client.clone());
        let media = MediaService::new(client, config.storage_bucket.clone());
        Self {
            config,
            climbs,
            media,
        }
    }

    /// Load config from the environment and build services.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }
}
