// Adjacency and degree computation shared by the layout algorithms.
//
// Edges are symmetrized: both endpoints see each other as neighbors
// regardless of edge direction. Edges whose endpoints are not in the node
// set are skipped here, which is what lets every algorithm tolerate dangling
// references without checking for them itself.

use crate::graph::{GraphEdge, GraphNode};
use rustc_hash::{FxHashMap, FxHashSet};

/// Undirected adjacency over node ids, built once per layout run.
#[derive(Debug, Clone)]
pub struct Adjacency {
    /// Neighbor ids per node id. Every input node has an entry, possibly
    /// empty. Neighbor lists are sorted for deterministic iteration.
    neighbors: FxHashMap<String, Vec<String>>,
}

impl Adjacency {
    /// Build adjacency from nodes and edges. Self-loops and edges with
    /// unknown endpoints contribute nothing.
    pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        let known: FxHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        let mut sets: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for node in nodes {
            sets.entry(node.id.clone()).or_default();
        }

        for edge in edges {
            if edge.source == edge.target {
                continue;
            }
            if !known.contains(edge.source.as_str()) || !known.contains(edge.target.as_str()) {
                continue;
            }
            if let Some(s) = sets.get_mut(&edge.source) {
                s.insert(edge.target.clone());
            }
            if let Some(s) = sets.get_mut(&edge.target) {
                s.insert(edge.source.clone());
            }
        }

        let mut neighbors: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for (id, set) in sets {
            let mut list: Vec<String> = set.into_iter().collect();
            list.sort_unstable();
            neighbors.insert(id, list);
        }

        Self { neighbors }
    }

    /// Neighbors of a node, or an empty slice for unknown ids.
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.neighbors.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Degree (distinct neighbor count) of a node.
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors.get(id).map(|v| v.len()).unwrap_or(0)
    }

    /// A node with exactly one connecting edge.
    pub fn is_leaf(&self, id: &str) -> bool {
        self.degree(id) == 1
    }

    /// A node whose degree exceeds the hub threshold (> 3).
    pub fn is_hub(&self, id: &str) -> bool {
        self.degree(id) > 3
    }

    /// The sole neighbor of a leaf node, if the node is a leaf.
    pub fn leaf_parent(&self, id: &str) -> Option<&str> {
        let n = self.neighbors(id);
        if n.len() == 1 { Some(n[0].as_str()) } else { None }
    }

    /// The highest-degree neighbor of a node, if it has any neighbors.
    /// The neighbor list is sorted, so ties resolve deterministically.
    pub fn highest_degree_neighbor(&self, id: &str) -> Option<&str> {
        self.neighbors(id)
            .iter()
            .max_by_key(|n| self.degree(n))
            .map(|n| n.as_str())
    }
}
