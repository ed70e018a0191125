use std::fmt;

pub type Result<T> = std::result::Result<T, DetectionError>;

/// Which end of a wall an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Input rejected at the boundary, before detection runs
#[derive(Debug)]
pub enum DetectionError {
    NonFiniteCoordinate { wall_id: String, endpoint: Endpoint },
    InvalidCanvas { width: f64, height: f64 },
    InvalidConfig(String),
    Json(serde_json::Error),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::NonFiniteCoordinate { wall_id, endpoint } => {
                write!(f, "Non-finite {} point in wall {}", endpoint, wall_id)
            }
            DetectionError::InvalidCanvas { width, height } => {
                write!(f, "Invalid canvas size: {} x {}", width, height)
            }
            DetectionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            DetectionError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectionError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        DetectionError::Json(err)
    }
}
