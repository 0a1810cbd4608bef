/// Tunable tolerances for boundary extraction and fence layering

use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_CHAIN_WALK_STEPS, MIN_LOOP_VERTICES, PROXIMITY_TOLERANCE_M, QUANTIZATION_STEP_DEG,
};
use crate::coordinate_key::CoordinateKeyer;
use crate::error::FenceError;

/// Configuration shared by the extractor and the fence builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceConfig {
    /// Coordinate quantization step in degrees
    pub quantization_step_deg: f64,
    /// Maximum endpoint distance for the proximity attribution fallback
    pub proximity_tolerance_m: f64,
    /// Safety ceiling on a single directed-edge walk
    pub max_walk_steps: usize,
    /// Smallest closed loop kept, counting the repeated start vertex
    pub min_loop_vertices: usize,
}

impl FenceConfig {
    pub fn new(quantization_step_deg: f64, proximity_tolerance_m: f64) -> Self {
        Self {
            quantization_step_deg,
            proximity_tolerance_m,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json_str(json_str: &str) -> Result<Self, FenceError> {
        let config: FenceConfig = serde_json::from_str(json_str)
            .map_err(|e| FenceError::InvalidConfig(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FenceError> {
        if !self.quantization_step_deg.is_finite() || self.quantization_step_deg <= 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "quantization_step_deg must be positive, got {}",
                self.quantization_step_deg
            )));
        }
        if !self.proximity_tolerance_m.is_finite() || self.proximity_tolerance_m < 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "proximity_tolerance_m must be non-negative, got {}",
                self.proximity_tolerance_m
            )));
        }
        if self.max_walk_steps == 0 {
            return Err(FenceError::InvalidConfig("max_walk_steps must be at least 1".to_string()));
        }
        if self.min_loop_vertices < 3 {
            return Err(FenceError::InvalidConfig(format!(
                "min_loop_vertices must be at least 3, got {}",
                self.min_loop_vertices
            )));
        }
        Ok(())
    }

    pub fn keyer(&self) -> CoordinateKeyer {
        CoordinateKeyer::new(self.quantization_step_deg)
    }
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            quantization_step_deg: QUANTIZATION_STEP_DEG,
            proximity_tolerance_m: PROXIMITY_TOLERANCE_M,
            max_walk_steps: MAX_CHAIN_WALK_STEPS,
            min_loop_vertices: MIN_LOOP_VERTICES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FenceConfig::default();
        assert_eq!(config.quantization_step_deg, 1e-6);
        assert_eq!(config.proximity_tolerance_m, 5.0);
        assert_eq!(config.max_walk_steps, 100_000);
        assert_eq!(config.min_loop_vertices, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FenceConfig::from_json_str(r#"{ "proximity_tolerance_m": 12.5 }"#).unwrap();
        assert_eq!(config.proximity_tolerance_m, 12.5);
        assert_eq!(config.quantization_step_deg, 1e-6);
        assert_eq!(config.max_walk_steps, 100_000);
    }

    #[test]
    fn test_error_handling() {
        let result = FenceConfig::from_json_str(r#"{ "quantization_step_deg": 0.0 }"#);
        assert!(matches!(result, Err(FenceError::InvalidConfig(_))));

        let result = FenceConfig::from_json_str(r#"{ "proximity_tolerance_m": -1.0 }"#);
        assert!(result.is_err());

        let result = FenceConfig::from_json_str(r#"{ "max_walk_steps": 0 }"#);
        assert!(result.is_err());

        let result = FenceConfig::from_json_str(r#"{ "min_loop_vertices": 2 }"#);
        assert!(result.is_err());

        let result = FenceConfig::from_json_str("not json");
        assert!(matches!(result, Err(FenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_keyer_uses_configured_step() {
        let config = FenceConfig::new(1e-4, 5.0);
        assert_eq!(config.keyer().step(), 1e-4);
    }
}
