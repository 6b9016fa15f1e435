//! Output types for the rendering frontend.
//!
//! These structs are serialized to JSON and handed to the renderer, which
//! draws nodes, edges and group outlines at the returned coordinates and
//! applies any pan/zoom transform on top.

use crate::graph::Point;
use crate::layout::LayoutResult;
use crate::layout::physics::SimState;
use serde::Serialize;

/// Boundary failure description for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// Response of a one-shot layout call: a total node-id -> position mapping.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutOutput {
    pub positions: LayoutResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Response of one simulation frame: node-id -> position and velocity, plus
/// the frame counter. The frontend owns this state between frames and passes
/// it back verbatim with the next request.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub state: SimState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Response of a cluster outline request: an ordered closed point sequence
/// consumed directly as a fill/stroke path.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outline: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}
