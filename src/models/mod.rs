// SPDX-License-Identifier: MIT

//! Data models mirroring the backend table schema.

pub mod attempt;
pub mod climb;
pub mod profile;
pub mod stats;

pub use attempt::{ClimbAttempt, ClimbAttemptInsert, ClimbAttemptUpdate};
pub use climb::{Climb, ClimbInsert, ClimbUpdate, ClimbWithProfile, ProfileSummary};
pub use profile::{Profile, ProfileInsert, ProfileUpdate};
pub use stats::UserStats;
