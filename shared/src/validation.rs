//! Validation utilities for the Clinic Administration Platform
//!
//! Field-level checks shared by the medication and supplier intake paths.

use rust_decimal::Decimal;

// ============================================================================
// Medication Validations
// ============================================================================

/// Dosage forms accepted at medication registration
pub const MEDICATION_FORMS: &[&str] = &[
    "tablet",
    "capsule",
    "syrup",
    "suspension",
    "injection",
    "ointment",
    "cream",
    "gel",
    "drops",
    "inhaler",
    "spray",
    "suppository",
    "patch",
    "powder",
    "lozenge",
];

/// Validate medication name (non-blank, max 200 characters)
pub fn validate_medication_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Medication name cannot be blank");
    }
    if trimmed.len() > 200 {
        return Err("Medication name must be at most 200 characters");
    }
    Ok(())
}

/// Validate batch number format (3-40 chars, uppercase alphanumeric and dashes)
pub fn validate_batch_number(batch: &str) -> Result<(), &'static str> {
    if batch.len() < 3 {
        return Err("Batch number must be at least 3 characters");
    }
    if batch.len() > 40 {
        return Err("Batch number must be at most 40 characters");
    }
    if !batch
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Batch number must be uppercase alphanumeric (dashes allowed)");
    }
    Ok(())
}

/// Validate dosage description (non-blank, max 100 characters)
pub fn validate_dosage(dosage: &str) -> Result<(), &'static str> {
    let trimmed = dosage.trim();
    if trimmed.is_empty() {
        return Err("Dosage cannot be blank");
    }
    if trimmed.len() > 100 {
        return Err("Dosage must be at most 100 characters");
    }
    Ok(())
}

/// Validate dosage form is a known form (case insensitive)
pub fn validate_medication_form(form: &str) -> Result<(), &'static str> {
    let form_lower = form.to_lowercase();
    if MEDICATION_FORMS.iter().any(|f| *f == form_lower) {
        return Ok(());
    }
    Err("Unknown dosage form")
}

/// Validate unit price is not negative
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Validate minimum stock level is not negative
pub fn validate_min_stock_level(level: i32) -> Result<(), &'static str> {
    if level < 0 {
        return Err("Minimum stock level cannot be negative");
    }
    Ok(())
}

/// Validate a starting quantity at registration is not negative
pub fn validate_initial_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate phone number format
/// Accepts digits with optional +, spaces and dashes, 7-15 digits total
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
    {
        return Err("Phone number contains invalid characters");
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone number must contain 7 to 15 digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Medication Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_medication_name_valid() {
        assert!(validate_medication_name("Amoxicillin").is_ok());
        assert!(validate_medication_name("  Paracetamol 500mg  ").is_ok());
    }

    #[test]
    fn test_validate_medication_name_invalid() {
        assert!(validate_medication_name("").is_err());
        assert!(validate_medication_name("   ").is_err()); // Blank after trim
        assert!(validate_medication_name(&"x".repeat(201)).is_err()); // Too long
    }

    #[test]
    fn test_validate_batch_number_valid() {
        assert!(validate_batch_number("AMX-2024-0191").is_ok());
        assert!(validate_batch_number("B001").is_ok());
        assert!(validate_batch_number("XYZ").is_ok());
    }

    #[test]
    fn test_validate_batch_number_invalid() {
        assert!(validate_batch_number("AB").is_err()); // Too short
        assert!(validate_batch_number(&"A".repeat(41)).is_err()); // Too long
        assert!(validate_batch_number("amx-2024").is_err()); // Lowercase
        assert!(validate_batch_number("AMX_2024").is_err()); // Underscore
    }

    #[test]
    fn test_validate_dosage() {
        assert!(validate_dosage("500mg").is_ok());
        assert!(validate_dosage("5ml twice daily").is_ok());
        assert!(validate_dosage("").is_err());
        assert!(validate_dosage(&"d".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_medication_form_valid() {
        assert!(validate_medication_form("tablet").is_ok());
        assert!(validate_medication_form("Tablet").is_ok()); // Case insensitive
        assert!(validate_medication_form("INJECTION").is_ok());
    }

    #[test]
    fn test_validate_medication_form_invalid() {
        assert!(validate_medication_form("pill").is_err());
        assert!(validate_medication_form("").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::new(1250, 2)).is_ok()); // 12.50
        assert!(validate_unit_price(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_min_stock_level() {
        assert!(validate_min_stock_level(0).is_ok());
        assert!(validate_min_stock_level(10).is_ok());
        assert!(validate_min_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_initial_quantity() {
        assert!(validate_initial_quantity(0).is_ok());
        assert!(validate_initial_quantity(500).is_ok());
        assert!(validate_initial_quantity(-5).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("pharmacy@clinic.co.uk").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("02-123-4567").is_ok());
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err()); // Too few digits
        assert!(validate_phone("1234567890123456").is_err()); // Too many digits
        assert!(validate_phone("call-me").is_err()); // Letters
    }
}
