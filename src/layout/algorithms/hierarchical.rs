//! Hierarchical (rooted-forest) layout.
//!
//! Direction of edges matters here, unlike everywhere else in the engine:
//! roots are the zero-in-degree nodes (minimum in-degree when the graph is
//! fully cyclic), and a depth-first traversal from each root levels the
//! forest, breaking cycles by visitation order. Unreached nodes become their
//! own singleton trees. Levels map onto the primary canvas axis according to
//! the requested direction; nodes within a level spread evenly across the
//! secondary axis.

use crate::graph::{GraphEdge, GraphNode, Point};
use crate::layout::{Direction, LayoutOptions, LayoutResult, LayoutStrategy, node_index};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

pub struct HierarchicalLayout;

impl LayoutStrategy for HierarchicalLayout {
    fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
        layout_hierarchical(nodes, edges, opts)
    }
}

/// Level per node index, built with an explicit stack so a pathological
/// chain cannot overflow the call stack.
fn assign_levels(n: usize, out_edges: &[Vec<usize>], in_degree: &[usize]) -> Vec<usize> {
    let mut roots: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    if roots.is_empty() && n > 0 {
        // Fully cyclic: fall back to the minimum-in-degree nodes.
        let min = in_degree.iter().copied().min().unwrap_or(0);
        roots = (0..n).filter(|&i| in_degree[i] == min).collect();
    }

    let mut level = vec![0usize; n];
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in roots {
        if visited.contains(&root) {
            continue;
        }
        stack.push((root, 0));
        while let Some((node, depth)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            level[node] = depth;
            // Reverse push keeps children in natural order on a LIFO stack.
            for &child in out_edges[node].iter().rev() {
                if !visited.contains(&child) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    // Anything no root reaches is its own singleton tree at level 0.
    for i in 0..n {
        if !visited.contains(&i) {
            level[i] = 0;
        }
    }
    level
}

pub fn layout_hierarchical(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    opts: &LayoutOptions,
) -> LayoutResult {
    let mut result: LayoutResult = FxHashMap::default();
    let n = nodes.len();
    if n == 0 {
        return result;
    }
    if n == 1 {
        result.insert(
            nodes[0].id.clone(),
            Point::new(opts.width / 2.0, opts.height / 2.0),
        );
        return result;
    }

    let index = node_index(nodes);
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for e in edges {
        let (Some(&a), Some(&b)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            continue;
        };
        if a == b {
            continue;
        }
        out_edges[a].push(b);
        in_degree[b] += 1;
    }
    for children in &mut out_edges {
        children.sort_unstable();
        children.dedup();
    }

    let level = assign_levels(n, &out_edges, &in_degree);
    let level_count = level.iter().copied().max().unwrap_or(0) + 1;
    debug!(nodes = n, levels = level_count, "hierarchical layout");

    // Group by level, preserving input order within each level.
    let mut per_level: Vec<Vec<usize>> = vec![Vec::new(); level_count];
    for i in 0..n {
        per_level[level[i]].push(i);
    }

    for (lvl, members) in per_level.iter().enumerate() {
        // Fraction along the primary axis for this level, and per-node
        // fraction along the secondary axis.
        let primary = (lvl as f64 + 1.0) / (level_count as f64 + 1.0);
        for (ordinal, &i) in members.iter().enumerate() {
            let secondary = (ordinal as f64 + 1.0) / (members.len() as f64 + 1.0);
            let (x, y) = match opts.direction {
                Direction::TopBottom => (secondary * opts.width, primary * opts.height),
                Direction::BottomTop => (secondary * opts.width, (1.0 - primary) * opts.height),
                Direction::LeftRight => (primary * opts.width, secondary * opts.height),
                Direction::RightLeft => ((1.0 - primary) * opts.width, secondary * opts.height),
            };
            result.insert(nodes[i].id.clone(), Point::new(x, y));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(direction: Direction) -> LayoutOptions {
        LayoutOptions {
            width: 800.0,
            height: 600.0,
            direction,
            ..Default::default()
        }
    }

    fn path_abc() -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let nodes = vec![GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("C")];
        let edges = vec![GraphEdge::new("A", "B"), GraphEdge::new("B", "C")];
        (nodes, edges)
    }

    #[test]
    fn test_empty_and_single() {
        let o = opts(Direction::TopBottom);
        assert!(layout_hierarchical(&[], &[], &o).is_empty());

        let one = vec![GraphNode::new("solo")];
        let result = layout_hierarchical(&one, &[], &o);
        assert_eq!(result["solo"], Point::new(400.0, 300.0));
    }

    #[test]
    fn test_three_node_path_top_bottom() {
        // A -> B -> C on 800x600: one node per level, horizontally centered,
        // y strictly increasing with level.
        let (nodes, edges) = path_abc();
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));

        assert_eq!(result["A"].x, 400.0);
        assert_eq!(result["B"].x, 400.0);
        assert_eq!(result["C"].x, 400.0);
        assert!(result["A"].y < result["B"].y);
        assert!(result["B"].y < result["C"].y);
    }

    #[test]
    fn test_direction_variants() {
        let (nodes, edges) = path_abc();

        let bt = layout_hierarchical(&nodes, &edges, &opts(Direction::BottomTop));
        assert!(bt["A"].y > bt["B"].y && bt["B"].y > bt["C"].y);

        let lr = layout_hierarchical(&nodes, &edges, &opts(Direction::LeftRight));
        assert!(lr["A"].x < lr["B"].x && lr["B"].x < lr["C"].x);
        assert_eq!(lr["A"].y, 300.0);

        let rl = layout_hierarchical(&nodes, &edges, &opts(Direction::RightLeft));
        assert!(rl["A"].x > rl["B"].x && rl["B"].x > rl["C"].x);
    }

    #[test]
    fn test_depth_three_dag_monotonic_levels() {
        let nodes: Vec<GraphNode> = ["root", "l", "r", "ll", "lr"]
            .iter()
            .map(|id| GraphNode::new(*id))
            .collect();
        let edges = vec![
            GraphEdge::new("root", "l"),
            GraphEdge::new("root", "r"),
            GraphEdge::new("l", "ll"),
            GraphEdge::new("l", "lr"),
        ];
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));

        assert!(result["root"].y < result["l"].y);
        assert_eq!(result["l"].y, result["r"].y);
        assert!(result["l"].y < result["ll"].y);
        assert_eq!(result["ll"].y, result["lr"].y);
    }

    #[test]
    fn test_fully_cyclic_graph_gets_roots() {
        // A -> B -> C -> A: every in-degree is 1, so the minimum-in-degree
        // fallback must pick roots and the cycle must not hang traversal.
        let nodes = vec![GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("C")];
        let edges = vec![
            GraphEdge::new("A", "B"),
            GraphEdge::new("B", "C"),
            GraphEdge::new("C", "A"),
        ];
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));

        assert_eq!(result.len(), 3);
        for p in result.values() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_unreachable_node_becomes_singleton_root() {
        let nodes = vec![GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("lone")];
        let edges = vec![GraphEdge::new("A", "B")];
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));

        // "lone" shares level 0 with the root A.
        assert_eq!(result["lone"].y, result["A"].y);
        assert!(result["B"].y > result["A"].y);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let count = 5000;
        let nodes: Vec<GraphNode> = (0..count).map(|i| GraphNode::new(format!("n{i}"))).collect();
        let edges: Vec<GraphEdge> = (0..count - 1)
            .map(|i| GraphEdge::new(format!("n{i}"), format!("n{}", i + 1)))
            .collect();
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));
        assert_eq!(result.len(), count);
    }

    #[test]
    fn test_dangling_edges_ignored() {
        let nodes = vec![GraphNode::new("A"), GraphNode::new("B")];
        let edges = vec![GraphEdge::new("A", "ghost"), GraphEdge::new("A", "B")];
        let result = layout_hierarchical(&nodes, &edges, &opts(Direction::TopBottom));
        assert_eq!(result.len(), 2);
    }
}
