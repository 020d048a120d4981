// SPDX-License-Identifier: MIT

//! Services module - domain operations over the backend client.

pub mod climbs;
pub mod media;

pub use climbs::ClimbService;
pub use media::{FileValidation, ImageTransform, MediaService, UploadBatchOutcome};
