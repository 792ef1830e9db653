//! # Computation Errors
//!
//! The computation crate fails only when its configuration dependency
//! fails: an unknown financial year. Numeric edge inputs (negative income,
//! zero liability) are normalized, never errors — the engine does not raise
//! for expected business conditions.

use thiserror::Error;

use itr_config::ConfigError;

/// Errors raised by tax computations.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Statutory configuration lookup failed (unknown financial year or
    /// malformed table document).
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_configuration_not_found() {
        let err = ComputeError::from(ConfigError::ConfigurationNotFound("2018-19".into()));
        assert!(format!("{err}").contains("2018-19"));
    }
}
