//! Client-side checks applied to form input before anything is sent.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a number, got {input:?}")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must be {rule}")]
    OutOfRange {
        field: &'static str,
        rule: &'static str,
    },

    #[error("Category {0:?} has no id and cannot be deleted")]
    MissingId(String),
}

/// Returns the trimmed value, or an error if nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a finite decimal number from text input.
///
/// Empty input, non-numeric text, `NaN` and infinities are all rejected so
/// that no malformed number ever reaches the wire.
pub fn parse_amount(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    // Allow the grouping separators people paste from statements.
    let normalized: String = trimmed.chars().filter(|c| *c != ',' && *c != '_').collect();
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            input: trimmed.to_string(),
        }),
    }
}

pub fn parse_positive(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let value = parse_amount(field, text)?;
    if value <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            rule: "greater than zero",
        });
    }
    Ok(value)
}

pub fn parse_non_negative(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let value = parse_amount(field, text)?;
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            rule: "zero or more",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("Name", "  Laptop ").unwrap(), "Laptop");
        assert_eq!(require_text("Name", "   "), Err(ValidationError::Required("Name")));
    }

    #[test]
    fn parse_amount_accepts_plain_and_grouped_numbers() {
        assert_eq!(parse_amount("Amount", "300").unwrap(), 300.0);
        assert_eq!(parse_amount("Amount", " 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("Amount", "50,000").unwrap(), 50000.0);
    }

    #[test]
    /// Inputs that would become NaN, infinity or an empty value are never forwarded.
    fn parse_amount_rejects_malformed_input() {
        assert_eq!(parse_amount("Amount", ""), Err(ValidationError::Required("Amount")));
        for input in ["abc", "NaN", "inf", "-infinity", "1.2.3", "12abc"] {
            assert!(
                matches!(
                    parse_amount("Amount", input),
                    Err(ValidationError::NotANumber { .. })
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn range_rules() {
        assert!(parse_positive("Target", "0").is_err());
        assert!(parse_positive("Target", "-5").is_err());
        assert_eq!(parse_non_negative("Limit", "0").unwrap(), 0.0);
        assert!(parse_non_negative("Limit", "-1").is_err());
    }
}
