//! Degree-ranked radial placement.
//!
//! The top ~20% of nodes by degree (at least one) form ring 0 at the canvas
//! center; remaining nodes are assigned to concentric rings by BFS outward
//! along adjacency. When a ring has no adjacency-connected candidates (a
//! disconnected component), the lowest-remaining-degree node seeds the next
//! ring so placement always terminates. Nodes are spaced evenly by angle
//! within each ring and ring radius grows linearly with ring index.

use crate::graph::{GraphEdge, GraphNode, Point};
use crate::layout::adjacency::Adjacency;
use crate::layout::{LayoutOptions, LayoutResult, LayoutStrategy};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

pub struct RadialLayout;

impl LayoutStrategy for RadialLayout {
    fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
        layout_radial(nodes, edges, opts)
    }
}

/// Assign every node to a ring index. Ring 0 holds the hubs.
fn assign_rings(nodes: &[GraphNode], adjacency: &Adjacency) -> Vec<Vec<String>> {
    let n = nodes.len();

    // Degree-ranked ids, ties broken by id for determinism.
    let mut ranked: Vec<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    ranked.sort_by(|a, b| {
        adjacency
            .degree(b)
            .cmp(&adjacency.degree(a))
            .then_with(|| a.cmp(b))
    });

    let hub_count = (n / 5).max(1);
    let mut rings: Vec<Vec<String>> = Vec::new();
    let mut assigned: FxHashSet<&str> = FxHashSet::default();

    rings.push(ranked[..hub_count].iter().map(|s| s.to_string()).collect());
    for id in &ranked[..hub_count] {
        assigned.insert(id);
    }

    while assigned.len() < n {
        // Candidates: unassigned neighbors of the previous ring.
        let previous = rings.last().expect("ring 0 always present");
        let mut candidates: Vec<&str> = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for id in previous {
            for neighbor in adjacency.neighbors(id) {
                let neighbor = neighbor.as_str();
                if !assigned.contains(neighbor) && seen.insert(neighbor) {
                    candidates.push(neighbor);
                }
            }
        }
        candidates.sort_unstable();

        if candidates.is_empty() {
            // Disconnected remainder: seed the ring with the
            // lowest-remaining-degree node.
            let fallback = ranked
                .iter()
                .rev()
                .find(|id| !assigned.contains(*id))
                .copied()
                .expect("unassigned node exists");
            candidates.push(fallback);
        }

        for id in &candidates {
            assigned.insert(*id);
        }
        rings.push(candidates.into_iter().map(|s| s.to_string()).collect());
    }

    rings
}

pub fn layout_radial(nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
    let mut result: LayoutResult = FxHashMap::default();
    if nodes.is_empty() {
        return result;
    }

    let cx = opts.width / 2.0;
    let cy = opts.height / 2.0;
    if nodes.len() == 1 {
        result.insert(nodes[0].id.clone(), Point::new(cx, cy));
        return result;
    }

    let adjacency = Adjacency::build(nodes, edges);
    let rings = assign_rings(nodes, &adjacency);
    debug!(nodes = nodes.len(), rings = rings.len(), "radial layout");

    for (ring_index, ring) in rings.iter().enumerate() {
        // Ring 0 sits at the center: a lone hub exactly on it, several hubs
        // on a tight inner circle so they stay distinguishable.
        let radius = if ring_index == 0 {
            if ring.len() == 1 { 0.0 } else { opts.ring_gap * 0.4 }
        } else {
            opts.ring_gap * ring_index as f64
        };

        for (i, id) in ring.iter().enumerate() {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (ring.len() as f64);
            result.insert(
                id.clone(),
                Point::new(cx + radius * angle.cos(), cy + radius * angle.sin()),
            );
        }
    }

    result
}
