//! Stress-minimizing spring layout.
//!
//! Target distances are unweighted all-pairs shortest path lengths scaled by
//! the spring length; nodes start evenly on a circle and descend their local
//! energy gradient until movement falls below an epsilon or the iteration
//! budget runs out. Graphs here are small to medium, so the O(n^3) all-pairs
//! relaxation is acceptable and keeps the code free of heap-based SSSP.

use crate::graph::{GraphEdge, GraphNode, Point};
use crate::layout::{LayoutOptions, LayoutResult, LayoutStrategy, node_index};
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct StressLayout;

impl LayoutStrategy for StressLayout {
    fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
        layout_stress(nodes, edges, opts)
    }
}

/// Unweighted all-pairs shortest paths by repeated relaxation.
/// `f64::INFINITY` marks unreachable pairs.
fn all_pairs_distances(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<f64>> {
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for &(a, b) in edges {
        dist[a][b] = 1.0;
        dist[b][a] = 1.0;
    }
    for k in 0..n {
        for i in 0..n {
            if dist[i][k].is_infinite() {
                continue;
            }
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    dist
}

pub fn layout_stress(nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
    let mut result: LayoutResult = FxHashMap::default();
    let n = nodes.len();
    if n == 0 {
        return result;
    }
    let cx = opts.width / 2.0;
    let cy = opts.height / 2.0;
    if n == 1 {
        result.insert(nodes[0].id.clone(), Point::new(cx, cy));
        return result;
    }

    let index = node_index(nodes);
    let pairs: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| {
            let a = *index.get(e.source.as_str())?;
            let b = *index.get(e.target.as_str())?;
            (a != b).then_some((a, b))
        })
        .collect();

    debug!(nodes = n, edges = pairs.len(), "stress layout");

    let graph_dist = all_pairs_distances(n, &pairs);

    // Initial placement: evenly on a circle inside the canvas.
    let radius = (opts.width.min(opts.height) / 2.0 - opts.spring_length).max(10.0);
    let mut pos: Vec<Point> = (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();

    for _ in 0..opts.max_iterations {
        let mut max_move = 0.0f64;

        for i in 0..n {
            let mut fx = 0.0;
            let mut fy = 0.0;
            let mut weight = 0.0;
            for j in 0..n {
                if j == i || graph_dist[i][j].is_infinite() {
                    continue;
                }
                let ideal = graph_dist[i][j] * opts.spring_length;
                let dx = pos[j].x - pos[i].x;
                let dy = pos[j].y - pos[i].y;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                // Stress term weighted by 1/ideal^2 so close pairs dominate
                // far ones.
                let w = 1.0 / (ideal * ideal);
                let f = w * (dist - ideal);
                fx += f * dx / dist;
                fy += f * dy / dist;
                weight += w;
            }
            if weight == 0.0 {
                continue; // isolated node, nothing pulls on it
            }
            // Normalizing by the weight sum turns the gradient into a
            // bounded step toward the weighted target; `spring` scales it.
            let sx = opts.spring * fx / weight;
            let sy = opts.spring * fy / weight;
            pos[i].x += sx;
            pos[i].y += sy;
            max_move = max_move.max((sx * sx + sy * sy).sqrt());
        }

        if max_move < opts.epsilon {
            break;
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        result.insert(node.id.clone(), pos[i]);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> LayoutOptions {
        LayoutOptions {
            width: 800.0,
            height: 600.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(layout_stress(&[], &[], &opts()).is_empty());

        let one = vec![GraphNode::new("solo")];
        let result = layout_stress(&one, &[], &opts());
        assert_eq!(result["solo"], Point::new(400.0, 300.0));
    }

    #[test]
    fn test_total_coverage_and_finite() {
        let nodes: Vec<GraphNode> = (0..8).map(|i| GraphNode::new(format!("n{i}"))).collect();
        let edges: Vec<GraphEdge> = (0..7)
            .map(|i| GraphEdge::new(format!("n{i}"), format!("n{}", i + 1)))
            .collect();
        let result = layout_stress(&nodes, &edges, &opts());

        assert_eq!(result.len(), nodes.len());
        for p in result.values() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_path_endpoints_further_than_neighbors() {
        // On a path a-b-c, stress should pull the layout toward
        // |a-c| > |a-b| since the graph distance is twice as large.
        let nodes = vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")];
        let edges = vec![GraphEdge::new("a", "b"), GraphEdge::new("b", "c")];
        let result = layout_stress(&nodes, &edges, &opts());

        let ab = result["a"].distance_to(&result["b"]);
        let ac = result["a"].distance_to(&result["c"]);
        assert!(ac > ab, "graph-distant pair ended up closer: ac={ac} ab={ab}");
    }

    #[test]
    fn test_disconnected_components_do_not_blow_up() {
        let nodes = vec![
            GraphNode::new("a"),
            GraphNode::new("b"),
            GraphNode::new("x"),
            GraphNode::new("y"),
        ];
        let edges = vec![GraphEdge::new("a", "b"), GraphEdge::new("x", "y")];
        let result = layout_stress(&nodes, &edges, &opts());

        assert_eq!(result.len(), 4);
        for p in result.values() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_dangling_edge_ignored() {
        let nodes = vec![GraphNode::new("a"), GraphNode::new("b")];
        let edges = vec![GraphEdge::new("a", "nope"), GraphEdge::new("a", "b")];
        let result = layout_stress(&nodes, &edges, &opts());
        assert_eq!(result.len(), 2);
    }
}
