// Graph layout engine.
//
// Goals:
// - Deterministic: all randomness flows from caller-supplied seeds
// - Total: every input node id appears in every result, no exceptions
// - Tolerant: dangling edges and degenerate graphs degrade, never error
//
// Submodules:
// - spatial_grid: O(1)-amortized radius queries for repulsion
// - adjacency: symmetrized neighbor sets and degrees
// - physics: the phased, frame-stepped force simulation
// - algorithms: the four one-shot layouts
//
// Output:
// - a node-id -> Point map the rendering layer persists and draws.

use crate::error::LayoutError;
use crate::graph::{GraphEdge, GraphNode, Point};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod adjacency;
pub mod algorithms;
pub mod physics;
pub mod spatial_grid;

pub use algorithms::{HierarchicalLayout, RadialLayout, SpectralLayout, StressLayout};

/// Mapping from node id to position. Total coverage: exactly one entry per
/// input node id on return.
pub type LayoutResult = FxHashMap<String, Point>;

/// Primary-axis direction for the hierarchical layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-bottom" => Ok(Direction::TopBottom),
            "bottom-top" => Ok(Direction::BottomTop),
            "left-right" => Ok(Direction::LeftRight),
            "right-left" => Ok(Direction::RightLeft),
            other => Err(LayoutError::UnknownDirection(other.to_string())),
        }
    }
}

/// Options shared by the one-shot algorithms. Each algorithm reads the
/// fields it cares about and ignores the rest, so one record can travel
/// across the JSON boundary unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Canvas extent in canvas units.
    pub width: f64,
    pub height: f64,
    /// Stress: spring constant and unit ideal length per graph-distance hop.
    pub spring: f64,
    pub spring_length: f64,
    /// Stress: iteration budget and convergence threshold.
    pub max_iterations: u32,
    pub epsilon: f64,
    /// Spectral: fixed power-iteration count (convergence is not verified).
    pub power_iterations: u32,
    /// Spectral: seed for degeneracy-breaking perturbation.
    pub seed: u64,
    /// Radial: distance between consecutive rings.
    pub ring_gap: f64,
    /// Hierarchical: primary-axis direction.
    pub direction: Direction,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1200.0,
            spring: 1.0,
            spring_length: 120.0,
            max_iterations: 300,
            epsilon: 0.1,
            power_iterations: 100,
            seed: 0,
            ring_gap: 120.0,
            direction: Direction::TopBottom,
        }
    }
}

/// A one-shot layout algorithm: stateless, synchronous, pure.
pub trait LayoutStrategy {
    fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult;
}

/// The four selectable one-shot algorithms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    Stress,
    Spectral,
    Radial,
    Hierarchical,
}

impl FromStr for LayoutAlgorithm {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stress" => Ok(LayoutAlgorithm::Stress),
            "spectral" => Ok(LayoutAlgorithm::Spectral),
            "radial" => Ok(LayoutAlgorithm::Radial),
            "hierarchical" => Ok(LayoutAlgorithm::Hierarchical),
            other => Err(LayoutError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl LayoutAlgorithm {
    fn strategy(self) -> &'static dyn LayoutStrategy {
        match self {
            LayoutAlgorithm::Stress => &StressLayout,
            LayoutAlgorithm::Spectral => &SpectralLayout,
            LayoutAlgorithm::Radial => &RadialLayout,
            LayoutAlgorithm::Hierarchical => &HierarchicalLayout,
        }
    }
}

/// Run the named algorithm over a graph snapshot.
pub fn layout_graph(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    algorithm: LayoutAlgorithm,
    opts: &LayoutOptions,
) -> LayoutResult {
    algorithm.strategy().layout(nodes, edges, opts)
}

/// Stable id -> index mapping used by the index-based algorithms.
pub(crate) fn node_index(nodes: &[GraphNode]) -> FxHashMap<&str, usize> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect()
}
