//! Business logic services for the Clinic Administration Platform

pub mod alert;
pub mod medication;
pub mod stock;
pub mod supplier;

pub use alert::AlertService;
pub use medication::MedicationService;
pub use stock::StockService;
pub use supplier::SupplierService;
