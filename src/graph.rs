//! Graph model consumed by the layout engine.
//!
//! Nodes and edges arrive from the ingestion layer (tabular import with
//! column-role mapping) already deduplicated; the engine only needs opaque
//! string identifiers. Edges may reference ids that are not in the node list;
//! layout code skips those endpoints instead of failing.

use serde::{Deserialize, Serialize};

/// A node to be positioned. The id is the only required field; degree and
/// other derived quantities are computed per algorithm, not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An edge between two node ids. Directionality is preserved for the
/// hierarchical layout's in-degree computation, but every other consumer
/// treats edges as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A 2D position in canvas units.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_edge_roundtrip() {
        let edge = GraphEdge::new("a", "b");
        let json = serde_json::to_string(&edge).unwrap();
        let back: GraphEdge = serde_json::from_str(&json).unwrap();
        assert_eq!(edge, back);
    }
}
