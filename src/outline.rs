//! Cluster outline generator.
//!
//! Produces an ordered closed polygon enclosing a set of node positions,
//! used by the rendering layer to draw visual group boundaries. For three or
//! more points a scalar influence field (sum of Gaussian-like falloffs) is
//! sampled on a coarse grid and its threshold contour extracted by a
//! simplified marching-squares pass; a gift-wrapping convex hull expanded
//! along averaged vertex normals covers the cases where contour extraction
//! yields nothing. Chaikin corner cutting removes grid-induced angularity.
//!
//! The returned sequence is ordered (consecutive points are adjacent on the
//! boundary) but not guaranteed simple; this is a visual aid, so occasional
//! self-intersections are tolerated.

use crate::graph::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Influence radius around each point; also the radius of the one-point
    /// circle and two-point pill shapes.
    pub radius: f64,
    /// Outward expansion of the convex-hull fallback.
    pub padding: f64,
    /// Falloff widening factor for the influence field.
    pub smoothness: f64,
    /// Field sampling cell size. Coarse is fine; Chaikin hides the grid.
    pub cell_size: f64,
    /// Contour level of the influence field.
    pub threshold: f64,
    /// Chaikin corner-cutting iterations.
    pub smoothing_passes: u32,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            radius: 60.0,
            padding: 24.0,
            smoothness: 1.0,
            cell_size: 16.0,
            threshold: 0.35,
            smoothing_passes: 3,
        }
    }
}

/// Ordered closed outline around a group of points.
pub fn cluster_outline(points: &[Point], opts: &OutlineOptions) -> Vec<Point> {
    match points.len() {
        0 => Vec::new(),
        1 => circle_outline(points[0], opts.radius),
        2 => pill_outline(points[0], points[1], opts.radius),
        _ => {
            let contour = field_contour(points, opts);
            let outline = if contour.len() >= 3 {
                contour
            } else {
                expanded_hull(points, opts.padding)
            };
            chaikin_smooth(outline, opts.smoothing_passes)
        }
    }
}

/// Circle around a single point.
fn circle_outline(center: Point, radius: f64) -> Vec<Point> {
    const SEGMENTS: usize = 24;
    (0..SEGMENTS)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (SEGMENTS as f64);
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Stadium shape around the segment between two points: a semicircular cap
/// at each end joined by the straight sides.
fn pill_outline(a: Point, b: Point, radius: f64) -> Vec<Point> {
    const CAP_SEGMENTS: usize = 12;
    let axis = (b.y - a.y).atan2(b.x - a.x);
    let mut outline = Vec::with_capacity(2 * (CAP_SEGMENTS + 1));

    // Cap around b, sweeping from axis-90 to axis+90.
    for i in 0..=CAP_SEGMENTS {
        let angle = axis - std::f64::consts::FRAC_PI_2
            + std::f64::consts::PI * (i as f64) / (CAP_SEGMENTS as f64);
        outline.push(Point::new(b.x + radius * angle.cos(), b.y + radius * angle.sin()));
    }
    // Cap around a, sweeping the opposite half.
    for i in 0..=CAP_SEGMENTS {
        let angle = axis + std::f64::consts::FRAC_PI_2
            + std::f64::consts::PI * (i as f64) / (CAP_SEGMENTS as f64);
        outline.push(Point::new(a.x + radius * angle.cos(), a.y + radius * angle.sin()));
    }
    outline
}

/// Influence of the point set at a sample location.
fn field_at(points: &[Point], x: f64, y: f64, opts: &OutlineOptions) -> f64 {
    let denom = opts.radius * opts.radius * opts.smoothness.max(1e-6);
    points
        .iter()
        .map(|p| {
            let dx = p.x - x;
            let dy = p.y - y;
            (-(dx * dx + dy * dy) / denom).exp()
        })
        .sum()
}

/// Threshold contour of the influence field via a simplified
/// marching-squares pass: collect the interpolated crossing point of every
/// cell edge whose endpoints straddle the threshold, then order the
/// crossings by angle around their centroid. Good enough for mostly-convex
/// blobs; concave pinches may self-intersect, which the contract tolerates.
fn field_contour(points: &[Point], opts: &OutlineOptions) -> Vec<Point> {
    let margin = opts.radius * 2.0;
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min) - margin;
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max) + margin;
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min) - margin;
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max) + margin;

    let cell = opts.cell_size.max(1.0);
    let nx = ((max_x - min_x) / cell).ceil() as usize + 1;
    let ny = ((max_y - min_y) / cell).ceil() as usize + 1;

    // Sample the field at grid vertices.
    let mut field = vec![0.0f64; nx * ny];
    for gy in 0..ny {
        for gx in 0..nx {
            field[gy * nx + gx] =
                field_at(points, min_x + gx as f64 * cell, min_y + gy as f64 * cell, opts);
        }
    }

    let t = opts.threshold;
    let vertex = |gx: usize, gy: usize| {
        Point::new(min_x + gx as f64 * cell, min_y + gy as f64 * cell)
    };
    // Linear interpolation of the crossing along one grid edge.
    let cross = |pa: Point, fa: f64, pb: Point, fb: f64| {
        let frac = ((t - fa) / (fb - fa)).clamp(0.0, 1.0);
        Point::new(pa.x + (pb.x - pa.x) * frac, pa.y + (pb.y - pa.y) * frac)
    };

    let mut crossings: Vec<Point> = Vec::new();
    for gy in 0..ny {
        for gx in 0..nx {
            let fa = field[gy * nx + gx];
            if gx + 1 < nx {
                let fb = field[gy * nx + gx + 1];
                if (fa >= t) != (fb >= t) {
                    crossings.push(cross(vertex(gx, gy), fa, vertex(gx + 1, gy), fb));
                }
            }
            if gy + 1 < ny {
                let fb = field[(gy + 1) * nx + gx];
                if (fa >= t) != (fb >= t) {
                    crossings.push(cross(vertex(gx, gy), fa, vertex(gx, gy + 1), fb));
                }
            }
        }
    }

    if crossings.len() < 3 {
        debug!(crossings = crossings.len(), "contour extraction empty, hull fallback");
        return Vec::new();
    }

    let cx = crossings.iter().map(|p| p.x).sum::<f64>() / crossings.len() as f64;
    let cy = crossings.iter().map(|p| p.y).sum::<f64>() / crossings.len() as f64;
    crossings.sort_by(|a, b| {
        let aa = (a.y - cy).atan2(a.x - cx);
        let ab = (b.y - cy).atan2(b.x - cx);
        aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
    });
    crossings
}

/// Gift-wrapping (Jarvis march) convex hull.
fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Leftmost point (lowest y on ties) is certainly on the hull.
    let mut start = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x < points[start].x || (p.x == points[start].x && p.y < points[start].y) {
            start = i;
        }
    }

    let mut hull = Vec::new();
    let mut current = start;
    loop {
        hull.push(points[current]);
        let mut next = (current + 1) % points.len();
        for (i, p) in points.iter().enumerate() {
            if i == current {
                continue;
            }
            let a = points[current];
            let b = points[next];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            let further = cross == 0.0 && a.distance_to(p) > a.distance_to(&b);
            if cross < 0.0 || further {
                next = i;
            }
        }
        current = next;
        if current == start || hull.len() > points.len() {
            break;
        }
    }
    hull
}

/// Convex hull expanded outward along averaged per-vertex edge normals.
fn expanded_hull(points: &[Point], padding: f64) -> Vec<Point> {
    let hull = convex_hull(points);
    let n = hull.len();
    if n < 3 {
        return hull;
    }

    let cx = hull.iter().map(|p| p.x).sum::<f64>() / n as f64;
    let cy = hull.iter().map(|p| p.y).sum::<f64>() / n as f64;

    (0..n)
        .map(|i| {
            let prev = hull[(i + n - 1) % n];
            let v = hull[i];
            let next = hull[(i + 1) % n];

            // Average the normals of the two incident edges, oriented away
            // from the hull centroid.
            let mut nx = (v.y - prev.y) + (next.y - v.y);
            let mut ny = -((v.x - prev.x) + (next.x - v.x));
            let len = (nx * nx + ny * ny).sqrt();
            if len > 1e-9 {
                nx /= len;
                ny /= len;
            }
            if nx * (v.x - cx) + ny * (v.y - cy) < 0.0 {
                nx = -nx;
                ny = -ny;
            }
            Point::new(v.x + nx * padding, v.y + ny * padding)
        })
        .collect()
}

/// Chaikin corner cutting on a closed ring: each edge (p1, p2) is replaced
/// by the points 1/4 and 3/4 of the way along it.
fn chaikin_smooth(mut outline: Vec<Point>, passes: u32) -> Vec<Point> {
    for _ in 0..passes {
        if outline.len() < 3 {
            break;
        }
        let mut smoothed = Vec::with_capacity(outline.len() * 2);
        for i in 0..outline.len() {
            let p1 = outline[i];
            let p2 = outline[(i + 1) % outline.len()];
            smoothed.push(Point::new(
                0.75 * p1.x + 0.25 * p2.x,
                0.75 * p1.y + 0.25 * p2.y,
            ));
            smoothed.push(Point::new(
                0.25 * p1.x + 0.75 * p2.x,
                0.25 * p1.y + 0.75 * p2.y,
            ));
        }
        outline = smoothed;
    }
    outline
}
