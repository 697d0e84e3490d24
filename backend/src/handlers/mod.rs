//! HTTP handlers for the Clinic Administration Platform

pub mod alert;
pub mod health;
pub mod medication;
pub mod stock;
pub mod supplier;

pub use alert::*;
pub use health::*;
pub use medication::*;
pub use stock::*;
pub use supplier::*;
