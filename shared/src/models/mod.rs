//! Domain models for the Clinic Administration Platform

mod alert;
mod medication;
mod stock;

pub use alert::*;
pub use medication::*;
pub use stock::*;
