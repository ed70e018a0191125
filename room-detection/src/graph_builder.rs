use crate::config::DetectionConfig;
use crate::geometry::point_on_segment;
use crate::{Point, WallSegment};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use tracing::debug;

// Vertex keys keep two decimal places of the anchoring coordinate
pub(crate) const KEY_PRECISION: f64 = 100.0;

/// Quantized vertex identity, ordered lexicographically by (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    x: i64,
    y: i64,
}

impl From<&Point> for VertexKey {
    fn from(point: &Point) -> Self {
        VertexKey {
            x: (point.x * KEY_PRECISION).round() as i64,
            y: (point.y * KEY_PRECISION).round() as i64,
        }
    }
}

/// Directed half of a wall (or wall sub-segment) leaving a vertex
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    pub from: VertexKey,
    pub to: VertexKey,
    pub wall_id: String,
    /// Direction from `from` to `to`, in radians within [-PI, PI]
    pub angle: f64,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    pub key: VertexKey,
    pub point: Point,
    /// Outgoing edges, sorted ascending by angle once the graph is built
    pub edges: Vec<DirectedEdge>,
}

/// Planar graph with an angular rotation system at every vertex
#[derive(Debug, Clone)]
pub struct PlanarGraph {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexKey, usize>,
    // vertex indices in the order they received their first edge
    edge_order: Vec<usize>,
    epsilon: f64,
}

impl PlanarGraph {
    pub fn new(epsilon: f64) -> Self {
        Self {
            vertices: Vec::new(),
            lookup: HashMap::new(),
            edge_order: Vec::new(),
            epsilon,
        }
    }

    /// Return the key of a vertex within `epsilon` of `point`, registering a
    /// new vertex when none is close enough. The first point registered
    /// anchors its cluster.
    pub fn get_or_add_vertex(&mut self, point: &Point) -> VertexKey {
        if let Some(existing) = self
            .vertices
            .iter()
            .find(|v| v.point.distance_to(point) < self.epsilon)
        {
            return existing.key;
        }

        let key = VertexKey::from(point);
        if !self.lookup.contains_key(&key) {
            self.lookup.insert(key, self.vertices.len());
            self.vertices.push(Vertex {
                key,
                point: *point,
                edges: Vec::new(),
            });
        }
        key
    }

    /// Add both directed halves of a wall piece. Pieces that collapse onto a
    /// single vertex are skipped.
    pub fn add_edge(&mut self, from: &Point, to: &Point, wall_id: &str) {
        let from_key = self.get_or_add_vertex(from);
        let to_key = self.get_or_add_vertex(to);

        if from_key == to_key {
            return;
        }

        let (Some(&from_idx), Some(&to_idx)) =
            (self.lookup.get(&from_key), self.lookup.get(&to_key))
        else {
            return;
        };

        let from_point = self.vertices[from_idx].point;
        let to_point = self.vertices[to_idx].point;

        for idx in [from_idx, to_idx] {
            if self.vertices[idx].edges.is_empty() {
                self.edge_order.push(idx);
            }
        }

        self.vertices[from_idx].edges.push(DirectedEdge {
            from: from_key,
            to: to_key,
            wall_id: wall_id.to_string(),
            angle: from_point.angle_to(&to_point),
        });
        self.vertices[to_idx].edges.push(DirectedEdge {
            from: to_key,
            to: from_key,
            wall_id: wall_id.to_string(),
            angle: to_point.angle_to(&from_point),
        });
    }

    fn sort_edges(&mut self) {
        for vertex in &mut self.vertices {
            vertex.edges.sort_by_key(|edge| OrderedFloat(edge.angle));
        }
    }

    /// Vertices in registration order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertices with at least one edge, in the order they were first
    /// connected. Vertices registered only by zero-length walls are skipped.
    pub fn connected_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.edge_order.iter().map(|&idx| &self.vertices[idx])
    }

    pub fn point(&self, key: &VertexKey) -> Option<Point> {
        self.lookup.get(key).map(|&idx| self.vertices[idx].point)
    }

    pub fn outgoing(&self, key: &VertexKey) -> &[DirectedEdge] {
        self.lookup
            .get(key)
            .map(|&idx| self.vertices[idx].edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges (two per wall piece)
    pub fn directed_edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }
}

/// An endpoint of another wall touching the interior of a wall
#[derive(Debug, Clone, Copy)]
struct Junction {
    point: Point,
    t: f64,
}

/// Build the planar graph from wall segments, splitting walls at T-junctions.
///
/// Only endpoint-on-segment junctions are detected; two walls crossing at a
/// point interior to both are left unsplit.
pub fn build_planar_graph(walls: &[WallSegment], config: &DetectionConfig) -> PlanarGraph {
    let junctions = find_t_junctions(walls, config);
    let mut graph = PlanarGraph::new(config.epsilon);

    for (wall, mut points) in walls.iter().zip(junctions) {
        points.sort_by_key(|j| OrderedFloat(j.t));

        let mut previous = wall.start;
        for junction in &points {
            graph.add_edge(&previous, &junction.point, &wall.id);
            previous = junction.point;
        }
        graph.add_edge(&previous, &wall.end, &wall.id);
    }

    graph.sort_edges();

    debug!(
        "Built planar graph with {} vertices and {} directed edges from {} walls",
        graph.vertex_count(),
        graph.directed_edge_count(),
        walls.len()
    );

    graph
}

/// Collect, per wall, the endpoints of other walls lying strictly inside it
fn find_t_junctions(walls: &[WallSegment], config: &DetectionConfig) -> Vec<Vec<Junction>> {
    let mut junctions: Vec<Vec<Junction>> = vec![Vec::new(); walls.len()];

    for i in 0..walls.len() {
        for j in (i + 1)..walls.len() {
            let (wall_i, wall_j) = (&walls[i], &walls[j]);

            for endpoint in [&wall_i.start, &wall_i.end] {
                if let Some(t) = interior_parameter(endpoint, wall_j, config) {
                    junctions[j].push(Junction { point: *endpoint, t });
                }
            }

            for endpoint in [&wall_j.start, &wall_j.end] {
                if let Some(t) = interior_parameter(endpoint, wall_i, config) {
                    junctions[i].push(Junction { point: *endpoint, t });
                }
            }
        }
    }

    let total: usize = junctions.iter().map(Vec::len).sum();
    if total > 0 {
        debug!("Found {} T-junctions", total);
    }

    junctions
}

/// Position along `wall` where `point` touches it, if away from both ends
fn interior_parameter(point: &Point, wall: &WallSegment, config: &DetectionConfig) -> Option<f64> {
    let margin = config.junction_margin;
    point_on_segment(point, &wall.start, &wall.end, config.epsilon)
        .map(|projection| projection.t)
        .filter(|&t| t > margin && t < 1.0 - margin)
}
