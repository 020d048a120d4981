//! Remote backend layer (Supabase REST + storage).

pub mod session;
pub mod supabase;

pub use session::{MemorySessionStore, SessionStore};
pub use supabase::SupabaseClient;

/// Table names as constants.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const CLIMBS: &str = "climbs";
    pub const CLIMB_ATTEMPTS: &str = "climb_attempts";
}
