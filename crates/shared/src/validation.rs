//! Common validation utilities.

use validator::ValidationError;

/// Validates a decimal amount string: parses to a finite, non-negative number.
pub fn validate_amount(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => {
            let mut err = ValidationError::new("amount");
            err.message = Some("Amount must be a non-negative decimal".into());
            Err(err)
        }
    }
}

/// Validates a plan duration string: a positive integer number of days.
pub fn validate_duration_days(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(v) if v > 0 => Ok(()),
        _ => {
            let mut err = ValidationError::new("duration_days");
            err.message = Some("Duration must be a positive number of days".into());
            Err(err)
        }
    }
}

/// Parses a decimal amount string the way the intake form does: anything
/// unparseable counts as zero.
pub fn parse_amount_or_zero(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("2000").is_ok());
        assert!(validate_amount("600.50").is_ok());
        assert!(validate_amount("0").is_ok());
        assert!(validate_amount("-1").is_err());
        assert!(validate_amount("abc").is_err());
        assert!(validate_amount("").is_err());
    }

    #[test]
    fn test_validate_duration_days() {
        assert!(validate_duration_days("30").is_ok());
        assert!(validate_duration_days("1").is_ok());
        assert!(validate_duration_days("0").is_err());
        assert!(validate_duration_days("-5").is_err());
        assert!(validate_duration_days("monthly").is_err());
    }

    #[test]
    fn test_parse_amount_or_zero() {
        assert_eq!(parse_amount_or_zero("1000"), 1000.0);
        assert_eq!(parse_amount_or_zero(" 400.5 "), 400.5);
        assert_eq!(parse_amount_or_zero("abc"), 0.0);
        assert_eq!(parse_amount_or_zero(""), 0.0);
    }
}
