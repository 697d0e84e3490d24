//! Database models for the Clinic Administration Platform
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;
