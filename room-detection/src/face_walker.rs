use crate::geometry::normalize_angle;
use crate::graph_builder::{DirectedEdge, PlanarGraph, VertexKey};
use std::collections::HashSet;
use std::f64::consts::PI;
use tracing::debug;

/// Ordered vertex keys of a closed walk; the closing vertex is not repeated
pub type Cycle = Vec<VertexKey>;

/// Walk the face to the right of every directed edge.
///
/// Each bounded face is found once per boundary edge and direction pair that
/// leads into it, so the result contains duplicates.
pub fn find_minimal_cycles(graph: &PlanarGraph, max_cycle_length: usize) -> Vec<Cycle> {
    let mut cycles = Vec::new();
    let mut abandoned = 0usize;

    for vertex in graph.connected_vertices() {
        for start_edge in &vertex.edges {
            match trace_face(graph, start_edge, max_cycle_length) {
                Some(cycle) => cycles.push(cycle),
                None => abandoned += 1,
            }
        }
    }

    debug!(
        "Face walk produced {} closed cycles ({} walks abandoned)",
        cycles.len(),
        abandoned
    );

    cycles
}

/// Follow the rotation system from `start` until the walk returns to its
/// first vertex. Returns `None` for walks that dead-end, repeat a directed
/// edge, grow past `max_cycle_length`, or close with fewer than 3 vertices.
pub fn trace_face(
    graph: &PlanarGraph,
    start: &DirectedEdge,
    max_cycle_length: usize,
) -> Option<Cycle> {
    let mut cycle = vec![start.from];
    let mut visited: HashSet<(VertexKey, VertexKey)> = HashSet::from([(start.from, start.to)]);

    let mut previous = start.from;
    let mut current = start.to;
    let mut incoming_angle = start.angle;

    while current != start.from {
        cycle.push(current);

        let outgoing = graph.outgoing(&current);
        if outgoing.is_empty() {
            return None;
        }

        let reverse_angle = normalize_angle(incoming_angle + PI);
        let next = next_edge(outgoing, &previous, reverse_angle)?;

        if !visited.insert((next.from, next.to)) {
            return None;
        }

        previous = current;
        current = next.to;
        incoming_angle = next.angle;

        if cycle.len() > max_cycle_length {
            debug!(
                "Abandoning walk from {:?}: exceeded {} vertices",
                start.from, max_cycle_length
            );
            return None;
        }
    }

    (cycle.len() >= 3).then_some(cycle)
}

/// The first edge met sweeping counter-clockwise from the reverse of the
/// incoming direction, never the edge straight back to `previous`
fn next_edge<'a>(
    outgoing: &'a [DirectedEdge],
    previous: &VertexKey,
    reverse_angle: f64,
) -> Option<&'a DirectedEdge> {
    let mut best: Option<(&DirectedEdge, f64)> = None;

    for edge in outgoing.iter().filter(|e| e.to != *previous) {
        let diff = normalize_angle(edge.angle - reverse_angle);
        if best.map_or(true, |(_, best_diff)| diff < best_diff) {
            best = Some((edge, diff));
        }
    }

    best.map(|(edge, _)| edge)
}
