//! Shared types and models for the Clinic Administration Platform
//!
//! This crate contains the pure medication stock control logic (adjustment
//! calculation, stock/expiry classification, alert aggregation) plus common
//! types shared between the backend and other components of the system.
//! Nothing in here touches storage.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
