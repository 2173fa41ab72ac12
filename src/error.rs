use thiserror::Error;

/// Errors raised at the boundary of the solver.
///
/// The solver itself never fails; these come from validating inputs,
/// parsing drag-model selectors and loading configuration.
#[derive(Error, Debug)]
pub enum BallisticsError {
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown drag model '{0}' (expected G1 or G7)")]
    UnknownDragModel(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BallisticsError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        BallisticsError::InvalidInput { field, value, reason }
    }
}

/// Reject non-finite and non-positive values.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), BallisticsError> {
    if !value.is_finite() {
        return Err(BallisticsError::invalid(field, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(BallisticsError::invalid(field, value, "must be positive"));
    }
    Ok(())
}

/// Reject non-finite values.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), BallisticsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BallisticsError::invalid(field, value, "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("bc", 0.25).is_ok());
        assert!(ensure_positive("bc", 0.0).is_err());
        assert!(ensure_positive("bc", -1.0).is_err());
        assert!(ensure_positive("bc", f64::NAN).is_err());
        assert!(ensure_positive("bc", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = BallisticsError::invalid("muzzle_velocity_fps", -10.0, "must be positive");
        assert_eq!(err.to_string(), "invalid muzzle_velocity_fps = -10: must be positive");

        let err = BallisticsError::UnknownDragModel("G9".to_string());
        assert!(err.to_string().contains("G9"));
    }
}
