//! Spectral embedding from graph Laplacian eigenvectors.
//!
//! Builds the dense Laplacian L = D - A, extracts two eigenvectors by power
//! iteration (the second after deflating the first), and uses them as x/y
//! after min-max normalization into the canvas. Off-diagonal entries are
//! perturbed by a small seeded epsilon so disconnected graphs do not produce
//! degenerate, collinear embeddings.
//!
//! Power iteration runs a fixed, tunable count with no residual check; for
//! layout purposes an approximate eigenvector is as good as a converged one.

use crate::graph::{GraphEdge, GraphNode, Point};
use crate::layout::{LayoutOptions, LayoutResult, LayoutStrategy, node_index};
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct SpectralLayout;

impl LayoutStrategy for SpectralLayout {
    fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
        layout_spectral(nodes, edges, opts)
    }
}

/// splitmix64 stream; the explicit seed keeps runs reproducible.
fn next_unit(state: &mut u64) -> f64 {
    *state = state.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z = z ^ (z >> 31);
    (z >> 11) as f64 / (1u64 << 53) as f64
}

fn matvec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect()
}

fn normalize(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 1e-12 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}

/// Dominant eigenvector by fixed-count power iteration.
fn power_iteration(m: &[Vec<f64>], iterations: u32, rng: &mut u64) -> Vec<f64> {
    let n = m.len();
    let mut v: Vec<f64> = (0..n).map(|_| next_unit(rng) - 0.5).collect();
    normalize(&mut v);

    for _ in 0..iterations {
        let mut next = matvec(m, &v);
        if normalize(&mut next) <= 1e-12 {
            // Vector annihilated (v was in the null space); restart from a
            // fresh random direction.
            next = (0..n).map(|_| next_unit(rng) - 0.5).collect();
            normalize(&mut next);
        }
        v = next;
    }
    v
}

/// Rayleigh quotient v^T M v for a unit vector v.
fn eigenvalue_of(m: &[Vec<f64>], v: &[f64]) -> f64 {
    matvec(m, v).iter().zip(v).map(|(a, b)| a * b).sum()
}

/// Map an eigenvector onto one canvas axis by min-max normalization.
fn spread(values: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mid = (lo + hi) / 2.0;
    if max - min < 1e-12 {
        return vec![mid; values.len()];
    }
    values
        .iter()
        .map(|v| lo + (v - min) / (max - min) * (hi - lo))
        .collect()
}

pub fn layout_spectral(nodes: &[GraphNode], edges: &[GraphEdge], opts: &LayoutOptions) -> LayoutResult {
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
    debug!(nodes = n, edges = edges.len(), "spectral layout");

    // Laplacian L = D - A over the symmetrized adjacency.
    let mut laplacian = vec![vec![0.0f64; n]; n];
    for e in edges {
        let (Some(&i), Some(&j)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            continue;
        };
        if i == j || laplacian[i][j] != 0.0 {
            continue;
        }
        laplacian[i][j] = -1.0;
        laplacian[j][i] = -1.0;
        laplacian[i][i] += 1.0;
        laplacian[j][j] += 1.0;
    }

    // Symmetric off-diagonal perturbation: breaks eigenvalue degeneracy on
    // disconnected graphs without visibly distorting connected ones.
    let mut rng = opts.seed.wrapping_add(0xa076_1d64_78bd_642f);
    for i in 0..n {
        for j in (i + 1)..n {
            let eps = (next_unit(&mut rng) - 0.5) * 1e-4;
            laplacian[i][j] += eps;
            laplacian[j][i] += eps;
        }
    }

    let v1 = power_iteration(&laplacian, opts.power_iterations, &mut rng);
    let lambda = eigenvalue_of(&laplacian, &v1);

    // Deflate the first component out, then repeat for the second axis.
    let mut deflated = laplacian;
    for i in 0..n {
        for j in 0..n {
            deflated[i][j] -= lambda * v1[i] * v1[j];
        }
    }
    let v2 = power_iteration(&deflated, opts.power_iterations, &mut rng);

    let margin = opts.width.min(opts.height) * 0.05;
    let xs = spread(&v1, margin, opts.width - margin);
    let ys = spread(&v2, margin, opts.height - margin);

    for (i, node) in nodes.iter().enumerate() {
        result.insert(node.id.clone(), Point::new(xs[i], ys[i]));
    }
    result
}
