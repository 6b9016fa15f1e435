//! WASM bindings for the skein-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Every entry point takes a JSON request string and returns a JSON response
//! string; the boundary is stateless, so the frontend owns simulation state
//! between frames and passes it back each call.

use wasm_bindgen::prelude::*;

use crate::error::LayoutError;
use crate::graph::{GraphEdge, GraphNode, Point};
use crate::layout::physics::{PhysicsParams, SimState, Simulation};
use crate::layout::{self, LayoutAlgorithm, LayoutOptions};
use crate::outline::{self, OutlineOptions};
use crate::output::{ErrorInfo, LayoutOutput, OutlineOutput, SimulationOutput};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LayoutRequest {
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
    algorithm: String,
    #[serde(default)]
    options: LayoutOptions,
}

#[derive(Debug, Deserialize)]
struct PinnedNode {
    id: String,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct SimulationRequest {
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
    #[serde(default)]
    params: PhysicsParams,
    /// State captured from the previous frame; omit to start a fresh run.
    #[serde(default)]
    state: Option<SimState>,
    /// Node held under an external drag for this frame.
    #[serde(default)]
    pinned: Option<PinnedNode>,
}

#[derive(Debug, Deserialize)]
struct OutlineRequest {
    points: Vec<Point>,
    #[serde(default)]
    options: OutlineOptions,
}

fn error_message(e: impl std::fmt::Display) -> Option<ErrorInfo> {
    Some(ErrorInfo {
        message: e.to_string(),
    })
}

fn run_layout(input: &str) -> LayoutOutput {
    let request: LayoutRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return LayoutOutput {
                positions: Default::default(),
                error: error_message(LayoutError::from(e)),
            };
        }
    };
    let algorithm: LayoutAlgorithm = match request.algorithm.parse() {
        Ok(a) => a,
        Err(e) => {
            return LayoutOutput {
                positions: Default::default(),
                error: error_message(e),
            };
        }
    };

    LayoutOutput {
        positions: layout::layout_graph(&request.nodes, &request.edges, algorithm, &request.options),
        error: None,
    }
}

fn run_simulation_frame(input: &str) -> SimulationOutput {
    let request: SimulationRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return SimulationOutput {
                state: SimState::default(),
                error: error_message(LayoutError::from(e)),
            };
        }
    };

    let mut sim = match request.state {
        Some(state) => {
            Simulation::with_state(&request.nodes, &request.edges, request.params, state)
        }
        None => Simulation::new(&request.nodes, &request.edges, request.params),
    };
    if let Some(pinned) = &request.pinned {
        sim.pin(&pinned.id);
        sim.set_position(&pinned.id, pinned.x, pinned.y);
    }
    sim.step();

    SimulationOutput {
        state: sim.into_state(),
        error: None,
    }
}

fn run_outline(input: &str) -> OutlineOutput {
    let request: OutlineRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return OutlineOutput {
                outline: vec![],
                error: error_message(LayoutError::from(e)),
            };
        }
    };
    OutlineOutput {
        outline: outline::cluster_outline(&request.points, &request.options),
        error: None,
    }
}

/// Run a one-shot layout over the supplied graph snapshot.
#[wasm_bindgen]
pub fn layout_graph(input: &str) -> String {
    serde_json::to_string(&run_layout(input)).unwrap_or_else(|_| "{}".to_string())
}

/// Compute exactly one frame of the phased force simulation.
#[wasm_bindgen]
pub fn step_simulation(input: &str) -> String {
    serde_json::to_string(&run_simulation_frame(input)).unwrap_or_else(|_| "{}".to_string())
}

/// Compute the outline polygon for one node group.
#[wasm_bindgen]
pub fn cluster_outline(input: &str) -> String {
    serde_json::to_string(&run_outline(input)).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_request_roundtrip() {
        let request = r#"{
            "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
            "edges": [
                {"source": "A", "target": "B"},
                {"source": "B", "target": "C"}
            ],
            "algorithm": "hierarchical",
            "options": {"width": 800, "height": 600, "direction": "top-bottom"}
        }"#;
        let output = run_layout(request);

        assert!(output.error.is_none());
        assert_eq!(output.positions.len(), 3);
        // One node per level: all horizontally centered, y increasing with
        // level down the A -> B -> C chain.
        let a = output.positions["A"];
        let b = output.positions["B"];
        let c = output.positions["C"];
        assert_eq!(a.x, 400.0);
        assert_eq!(b.x, 400.0);
        assert_eq!(c.x, 400.0);
        assert!(a.y < b.y && b.y < c.y);
    }

    #[test]
    fn test_unknown_algorithm_reports_error() {
        let request = r#"{"nodes": [{"id": "A"}], "algorithm": "magnetic"}"#;
        let output = run_layout(request);
        assert!(output.error.is_some());
        assert!(output.positions.is_empty());
    }

    #[test]
    fn test_malformed_json_reports_error() {
        let output = run_layout("{nope");
        assert!(output.error.is_some());
    }

    #[test]
    fn test_simulation_frame_carries_state() {
        let request = r#"{
            "nodes": [{"id": "A"}, {"id": "B"}],
            "edges": [{"source": "A", "target": "B"}]
        }"#;
        let first = run_simulation_frame(request);
        assert!(first.error.is_none());
        assert_eq!(first.state.iteration, 1);
        assert_eq!(first.state.positions.len(), 2);
        for s in first.state.positions.values() {
            assert!(s.x.is_finite() && s.vy.is_finite());
        }

        // Echo the returned state back for the next frame.
        let nodes = vec![GraphNode::new("A"), GraphNode::new("B")];
        let edges = vec![GraphEdge::new("A", "B")];
        let follow_up = serde_json::json!({
            "nodes": nodes,
            "edges": edges,
            "state": first.state,
        });
        let second = run_simulation_frame(&follow_up.to_string());
        assert!(second.error.is_none());
        assert_eq!(second.state.iteration, 2);
    }

    #[test]
    fn test_outline_request() {
        let request = r#"{"points": [{"x": 0.0, "y": 0.0}, {"x": 100.0, "y": 0.0}]}"#;
        let output = run_outline(request);
        assert!(output.error.is_none());
        assert!(output.outline.len() >= 8);
    }
}
