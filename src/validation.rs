// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a barcode is non-empty and contains only the characters
/// scanners actually emit (alphanumerics and dashes)
pub fn validate_barcode(barcode: &str) -> Result<(), ValidationError> {
    if barcode.trim().is_empty() {
        return Err(ValidationError::new("barcode_required"));
    }
    if !barcode.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::new("barcode_invalid_characters"));
    }
    Ok(())
}

/// Validates that a discount percent is within [0, 100]
pub fn validate_discount_percent(percent: Decimal) -> Result<(), ValidationError> {
    if percent < Decimal::ZERO || percent > Decimal::from(100) {
        Err(ValidationError::new("discount_out_of_range"))
    } else {
        Ok(())
    }
}

/// Validates that a price is non-negative
pub fn validate_non_negative_price(price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        Err(ValidationError::new("price_must_be_non_negative"))
    } else {
        Ok(())
    }
}

/// Validates that a user id is a non-empty opaque identifier
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        Err(ValidationError::new("user_id_required"))
    } else {
        Ok(())
    }
}
