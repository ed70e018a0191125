use crate::config::DetectionConfig;
use crate::face_walker::{find_minimal_cycles, Cycle};
use crate::geometry::{polygon_area, signed_area, vertex_mean};
use crate::graph_builder::{build_planar_graph, PlanarGraph, VertexKey};
use crate::{DetectedRoom, Point, WallSegment};
use std::collections::HashSet;
use tracing::debug;

/// Detect rooms from wall segments using planar graph face traversal
pub fn detect_rooms_with_config(
    walls: &[WallSegment],
    canvas_width: f64,
    canvas_height: f64,
    config: &DetectionConfig,
) -> Vec<DetectedRoom> {
    if walls.is_empty() {
        return Vec::new();
    }

    let graph = build_planar_graph(walls, config);
    let mut cycles = find_minimal_cycles(&graph, config.max_cycle_length);

    if config.drop_exterior_faces {
        let before = cycles.len();
        cycles.retain(|cycle| !is_exterior_face(cycle, &graph));
        debug!("Dropped {} exterior face walks", before - cycles.len());
    }

    let unique_cycles = deduplicate_cycles(cycles);
    let max_area = config.max_room_area(canvas_width, canvas_height);

    let rooms: Vec<DetectedRoom> = unique_cycles
        .iter()
        .filter_map(|cycle| cycle_to_polygon(cycle, &graph))
        .filter(|polygon| is_valid_room(polygon, config.min_room_area, max_area))
        .enumerate()
        .map(|(i, polygon)| DetectedRoom {
            id: format!("room_{}", i),
            center: vertex_mean(&polygon),
            polygon,
        })
        .collect();

    debug!(
        "Detected {} rooms from {} unique cycles (area band {} .. {})",
        rooms.len(),
        unique_cycles.len(),
        config.min_room_area,
        max_area
    );

    rooms
}

/// Map cycle vertex keys back to their anchoring coordinates
fn cycle_to_polygon(cycle: &[VertexKey], graph: &PlanarGraph) -> Option<Vec<Point>> {
    cycle.iter().map(|key| graph.point(key)).collect()
}

/// Both area bounds are exclusive
fn is_valid_room(polygon: &[Point], min_area: f64, max_area: f64) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let area = polygon_area(polygon);
    area > min_area && area < max_area
}

/// Walks that keep the traced face on their right run counter-clockwise
/// exactly around the outer boundary of a connected component
fn is_exterior_face(cycle: &[VertexKey], graph: &PlanarGraph) -> bool {
    cycle_to_polygon(cycle, graph)
        .map(|polygon| signed_area(&polygon) > 0.0)
        .unwrap_or(false)
}

/// Deduplicate cycles that represent the same face.
/// Handles cycles with different starting points and reverse traversals;
/// the first occurrence wins.
pub fn deduplicate_cycles(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut unique_cycles = Vec::new();
    let mut seen_signatures = HashSet::new();

    for cycle in cycles {
        if seen_signatures.insert(cycle_signature(&cycle)) {
            unique_cycles.push(cycle);
        }
    }

    debug!("Deduplicated to {} unique cycles", unique_cycles.len());

    unique_cycles
}

/// Canonical form of a cycle: the lexicographically smallest rotation of
/// either traversal direction
pub fn cycle_signature(cycle: &[VertexKey]) -> Vec<VertexKey> {
    let mut reversed = cycle.to_vec();
    reversed.reverse();

    let forward_min = min_rotation(cycle);
    let reverse_min = min_rotation(&reversed);

    forward_min.min(reverse_min)
}

fn min_rotation(keys: &[VertexKey]) -> Vec<VertexKey> {
    let mut best = keys.to_vec();

    for i in 1..keys.len() {
        let rotated: Vec<VertexKey> = keys[i..].iter().chain(keys[..i].iter()).copied().collect();
        if rotated < best {
            best = rotated;
        }
    }

    best
}
