use serde::{Deserialize, Serialize};
use crate::error::SolverError;

pub const DEFAULT_TOLERANCE: f64 = 1e-5;
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Iterative scheme used to relax the interior field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Alternating-direction line solves (x lines, then y lines).
    Adi,
    /// Four-neighbour point relaxation.
    Relaxation,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Adi => "adi",
            Method::Relaxation => "relaxation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub method: Method,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: Method::Adi,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new(method: Method, tolerance: f64, max_iterations: usize) -> Result<Self, SolverError> {
        let config = Self { method, tolerance, max_iterations };
        config.validate()?;
        Ok(config)
    }

    pub fn with_method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, SolverError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SolverError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.method, Method::Adi);
        assert_eq!(config.tolerance, 1e-5);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_tolerance() {
        assert_eq!(
            SolverConfig::new(Method::Adi, 0.0, 10).unwrap_err(),
            SolverError::InvalidTolerance(0.0)
        );
        assert!(SolverConfig::new(Method::Relaxation, -1e-5, 10).is_err());
        assert!(SolverConfig::new(Method::Relaxation, f64::NAN, 10).is_err());
        assert!(SolverConfig::new(Method::Relaxation, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_invalid_max_iterations() {
        assert!(matches!(
            SolverConfig::new(Method::Adi, 1e-5, 0),
            Err(SolverError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SolverConfig::from_json(r#"{ "method": "relaxation", "tolerance": 1e-3 }"#).unwrap();
        assert_eq!(config.method, Method::Relaxation);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            SolverConfig::from_json(r#"{ "tolerance": -2.0 }"#),
            Err(SolverError::InvalidTolerance(_))
        ));
        assert!(matches!(
            SolverConfig::from_json(r#"{ "method": "multigrid" }"#),
            Err(SolverError::Serialization(_))
        ));
    }
}
