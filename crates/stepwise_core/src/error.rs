//! Input validation errors

use thiserror::Error;

/// An algorithm input failed one of the algorithm's preconditions.
///
/// Raised before any step is recorded. Never recovered automatically; the
/// caller is expected to surface `constraint` so the input can be corrected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid input for {algorithm}: {constraint}")]
pub struct ValidationError {
    /// Name of the algorithm that rejected the input.
    pub algorithm: &'static str,
    /// The violated constraint, phrased as the rule (e.g. "array length must be even").
    pub constraint: String,
}

impl ValidationError {
    pub fn new(algorithm: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            algorithm,
            constraint: constraint.into(),
        }
    }

    /// Fail with `constraint` unless `holds` is true.
    pub fn ensure(
        algorithm: &'static str,
        holds: bool,
        constraint: impl Into<String>,
    ) -> Result<(), Self> {
        if holds {
            Ok(())
        } else {
            Err(Self::new(algorithm, constraint))
        }
    }
}
