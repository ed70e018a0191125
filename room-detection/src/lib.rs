//! Room detection for wall-based floor plans.
//!
//! Walls drawn in the layout editor are turned into a planar graph, the faces
//! of that graph are traced, duplicate traces are removed and the remaining
//! cycles are filtered by area to produce rooms.
//!
//! Every call recomputes from scratch; nothing is cached between calls.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod face_walker;
pub mod geometry;
pub mod graph_builder;
pub mod room_detector;

pub use config::DetectionConfig;
pub use error::{DetectionError, Endpoint, Result};
pub use graph_builder::PlanarGraph;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Wall as drawn in the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: String,
    pub start: Point,
    pub end: Point,
}

/// A closed region bounded by walls.
///
/// `id` is assigned sequentially per call ("room_0", "room_1", ...) and is not
/// stable when the wall set changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRoom {
    pub id: String,
    pub polygon: Vec<Point>,
    /// Mean of the polygon vertices
    pub center: Point,
}

impl DetectedRoom {
    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.polygon)
    }

    pub fn contains(&self, point: &Point) -> bool {
        geometry::polygon_contains(&self.polygon, point)
    }
}

/// Room detection engine bound to a validated configuration
#[derive(Debug, Clone, Default)]
pub struct RoomDetector {
    config: DetectionConfig,
}

impl RoomDetector {
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect rooms without input validation. Degenerate walls and walks are
    /// dropped silently; coordinates must be finite.
    pub fn detect(
        &self,
        walls: &[WallSegment],
        canvas_width: f64,
        canvas_height: f64,
    ) -> Vec<DetectedRoom> {
        room_detector::detect_rooms_with_config(walls, canvas_width, canvas_height, &self.config)
    }

    /// Validate walls and canvas, then detect
    pub fn try_detect(
        &self,
        walls: &[WallSegment],
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<Vec<DetectedRoom>> {
        validate_canvas(canvas_width, canvas_height)?;
        validate_walls(walls)?;
        Ok(self.detect(walls, canvas_width, canvas_height))
    }

    pub fn build_graph(&self, walls: &[WallSegment]) -> PlanarGraph {
        graph_builder::build_planar_graph(walls, &self.config)
    }
}

/// Detect rooms with the default configuration
pub fn detect_rooms(
    walls: &[WallSegment],
    canvas_width: f64,
    canvas_height: f64,
) -> Vec<DetectedRoom> {
    RoomDetector::default().detect(walls, canvas_width, canvas_height)
}

/// Detect rooms with the default configuration, rejecting non-finite input
pub fn try_detect_rooms(
    walls: &[WallSegment],
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<DetectedRoom>> {
    RoomDetector::default().try_detect(walls, canvas_width, canvas_height)
}

/// Reject walls with NaN or infinite coordinates
pub fn validate_walls(walls: &[WallSegment]) -> Result<()> {
    for wall in walls {
        for (point, endpoint) in [(&wall.start, Endpoint::Start), (&wall.end, Endpoint::End)] {
            if !point.is_finite() {
                return Err(DetectionError::NonFiniteCoordinate {
                    wall_id: wall.id.clone(),
                    endpoint,
                });
            }
        }
    }
    Ok(())
}

fn validate_canvas(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(DetectionError::InvalidCanvas { width, height });
    }
    Ok(())
}

/// Room under a clicked point, if any
pub fn room_at<'a>(rooms: &'a [DetectedRoom], point: &Point) -> Option<&'a DetectedRoom> {
    rooms.iter().find(|room| room.contains(point))
}
