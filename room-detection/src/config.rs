use crate::error::{DetectionError, Result};
use crate::graph_builder::KEY_PRECISION;
use serde::{Deserialize, Serialize};

/// Smallest merge tolerance that covers a whole vertex key cell, so two
/// points sharing a key are always merged by distance first
pub const MIN_EPSILON: f64 = std::f64::consts::SQRT_2 / KEY_PRECISION;

/// Tunable constants of the detection pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Vertex merge and T-junction tolerance, in editor units
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Rooms must be strictly larger than this (square units)
    #[serde(default = "default_min_room_area")]
    pub min_room_area: f64,
    /// Rooms must be strictly smaller than this fraction of the canvas area
    #[serde(default = "default_max_area_ratio")]
    pub max_area_ratio: f64,
    /// Junctions closer than this (as a fraction of wall length) to either
    /// end of a wall are treated as shared endpoints
    #[serde(default = "default_junction_margin")]
    pub junction_margin: f64,
    /// Walks longer than this many vertices are abandoned
    #[serde(default = "default_max_cycle_length")]
    pub max_cycle_length: usize,
    /// Discard outer boundaries by winding before deduplication
    #[serde(default)]
    pub drop_exterior_faces: bool,
}

fn default_epsilon() -> f64 {
    5.0
}

fn default_min_room_area() -> f64 {
    100.0
}

fn default_max_area_ratio() -> f64 {
    0.8
}

fn default_junction_margin() -> f64 {
    0.01
}

fn default_max_cycle_length() -> usize {
    1000
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            min_room_area: default_min_room_area(),
            max_area_ratio: default_max_area_ratio(),
            junction_margin: default_junction_margin(),
            max_cycle_length: default_max_cycle_length(),
            drop_exterior_faces: false,
        }
    }
}

impl DetectionConfig {
    /// Parse a (possibly partial) JSON object; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DetectionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.epsilon < MIN_EPSILON {
            return Err(DetectionError::InvalidConfig(format!(
                "epsilon must be at least {:.4}, got {}",
                MIN_EPSILON, self.epsilon
            )));
        }
        if !self.min_room_area.is_finite() || self.min_room_area < 0.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "min_room_area must be a non-negative finite number, got {}",
                self.min_room_area
            )));
        }
        if !(self.max_area_ratio > 0.0 && self.max_area_ratio <= 1.0) {
            return Err(DetectionError::InvalidConfig(format!(
                "max_area_ratio must be in (0, 1], got {}",
                self.max_area_ratio
            )));
        }
        if !(self.junction_margin >= 0.0 && self.junction_margin < 0.5) {
            return Err(DetectionError::InvalidConfig(format!(
                "junction_margin must be in [0, 0.5), got {}",
                self.junction_margin
            )));
        }
        if self.max_cycle_length < 3 {
            return Err(DetectionError::InvalidConfig(format!(
                "max_cycle_length must be at least 3, got {}",
                self.max_cycle_length
            )));
        }
        Ok(())
    }

    /// Upper (exclusive) area bound for a canvas
    pub fn max_room_area(&self, canvas_width: f64, canvas_height: f64) -> f64 {
        canvas_width * canvas_height * self.max_area_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder::VertexKey;
    use crate::Point;

    #[test]
    fn test_defaults() {
        let config = DetectionConfig::default();
        assert_eq!(config.epsilon, 5.0);
        assert_eq!(config.min_room_area, 100.0);
        assert_eq!(config.max_cycle_length, 1000);
        assert!(!config.drop_exterior_faces);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DetectionConfig::from_json(r#"{"epsilon": 0.5, "drop_exterior_faces": true}"#)
            .expect("valid config");

        assert_eq!(config.epsilon, 0.5);
        assert!(config.drop_exterior_faces);
        assert_eq!(config.min_room_area, 100.0);
        assert_eq!(config.max_area_ratio, 0.8);
    }

    #[test]
    fn test_malformed_json() {
        let err = DetectionConfig::from_json("{epsilon: 1}").unwrap_err();
        assert!(matches!(err, DetectionError::Json(_)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let cases = [
            DetectionConfig {
                epsilon: 0.0,
                ..Default::default()
            },
            DetectionConfig {
                epsilon: f64::NAN,
                ..Default::default()
            },
            DetectionConfig {
                epsilon: 0.005,
                ..Default::default()
            },
            DetectionConfig {
                min_room_area: -1.0,
                ..Default::default()
            },
            DetectionConfig {
                max_area_ratio: 1.5,
                ..Default::default()
            },
            DetectionConfig {
                junction_margin: 0.5,
                ..Default::default()
            },
            DetectionConfig {
                max_cycle_length: 2,
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(DetectionError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_epsilon_covers_key_cell() {
        // opposite corners of one key cell, about 0.0139 apart
        let (p, q) = (Point::new(-0.0049, -0.0049), Point::new(0.0049, 0.0049));
        assert_eq!(VertexKey::from(&p), VertexKey::from(&q));
        assert!(p.distance_to(&q) < MIN_EPSILON);

        let smallest = DetectionConfig {
            epsilon: MIN_EPSILON,
            ..Default::default()
        };
        assert!(smallest.validate().is_ok());

        let too_fine = DetectionConfig {
            epsilon: 0.01,
            ..Default::default()
        };
        assert!(matches!(
            too_fine.validate(),
            Err(DetectionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_max_room_area() {
        let config = DetectionConfig::default();
        assert_eq!(config.max_room_area(100.0, 100.0), 8000.0);
    }
}
