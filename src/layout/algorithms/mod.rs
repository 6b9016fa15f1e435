//! One-shot layout algorithms.
//!
//! Each computes a full position assignment in a single call and is
//! independent of the others and of the physics engine:
//! - `stress`: shortest-path target distances, gradient descent
//! - `spectral`: graph Laplacian eigenvectors via power iteration
//! - `radial`: degree-ranked concentric rings
//! - `hierarchical`: rooted-forest leveling with a direction option

mod hierarchical;
mod radial;
mod spectral;
mod stress;

pub use hierarchical::{HierarchicalLayout, layout_hierarchical};
pub use radial::{RadialLayout, layout_radial};
pub use spectral::{SpectralLayout, layout_spectral};
pub use stress::{StressLayout, layout_stress};
