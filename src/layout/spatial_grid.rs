// Spatial hash grid for neighbor queries during force simulation.
//
// Instead of O(n) scans against all nodes per repulsion query, this provides
// roughly O(1) amortized lookup by dividing the plane into uniform cells.
// The grid holds indices into the point slice it was built from and is
// rebuilt from scratch every simulation frame; there is no incremental
// update path.

use crate::graph::Point;
use rustc_hash::FxHashMap;

/// Pack two signed cell indices into one 64-bit key. Cheaper to hash than a
/// tuple and avoids allocating string keys per lookup.
fn cell_key(cx: i32, cy: i32) -> i64 {
    ((cx as i64) << 32) | (cy as u32 as i64)
}

/// A uniform-cell spatial index over 2D points supporting radius queries.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Size of each cell. Callers should pick this to match the anticipated
    /// query radius: much larger degrades toward O(n) scans per query, much
    /// smaller increases the number of cells visited.
    cell_size: f64,
    cells: FxHashMap<i64, Vec<usize>>,
}

impl SpatialGrid {
    /// Create a new grid with the given cell size.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(1.0), // Avoid division by zero
            cells: FxHashMap::default(),
        }
    }

    fn cell_of(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Clear prior contents and insert every point. Must be called once per
    /// frame before any query in that frame; the grid does not auto-refresh.
    pub fn build(&mut self, points: &[Point]) {
        self.cells.clear();
        for (i, p) in points.iter().enumerate() {
            let (cx, cy) = self.cell_of(p.x, p.y);
            self.cells.entry(cell_key(cx, cy)).or_default().push(i);
        }
    }

    /// Return indices of all points within `radius` of `(x, y)`.
    ///
    /// Visits the ring of cells within `ceil(radius / cell_size)` of the
    /// center cell, then filters candidates by exact squared distance so the
    /// coarse cell grid never produces false positives.
    pub fn query(&self, points: &[Point], x: f64, y: f64, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        if self.cells.is_empty() {
            return result;
        }

        let reach = (radius / self.cell_size).ceil() as i32;
        let (cx, cy) = self.cell_of(x, y);
        let r2 = radius * radius;

        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let Some(bucket) = self.cells.get(&cell_key(cx + dx, cy + dy)) else {
                    continue;
                };
                for &i in bucket {
                    let p = points[i];
                    let ddx = p.x - x;
                    let ddy = p.y - y;
                    if ddx * ddx + ddy * ddy <= r2 {
                        result.push(i);
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small deterministic generator for scattering test points (splitmix64).
    fn next_rand(state: &mut u64) -> f64 {
        *state = state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = *state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z = z ^ (z >> 31);
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    #[test]
    fn test_build_and_query() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(15.0, 10.0),
            Point::new(500.0, 500.0),
        ];
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&points);

        let near = grid.query(&points, 10.0, 10.0, 20.0);
        assert!(near.contains(&0));
        assert!(near.contains(&1));
        assert!(!near.contains(&2));
    }

    #[test]
    fn test_empty_grid_yields_empty_result() {
        let points: Vec<Point> = Vec::new();
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&points);
        assert!(grid.query(&points, 0.0, 0.0, 100.0).is_empty());
    }

    #[test]
    fn test_rebuild_clears_previous_contents() {
        let first = vec![Point::new(0.0, 0.0)];
        let second = vec![Point::new(300.0, 300.0)];
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&first);
        grid.build(&second);

        assert!(grid.query(&second, 0.0, 0.0, 10.0).is_empty());
        assert_eq!(grid.query(&second, 300.0, 300.0, 10.0), vec![0]);
    }

    #[test]
    fn test_negative_coordinates() {
        let points = vec![Point::new(-120.0, -80.0), Point::new(-125.0, -82.0)];
        let mut grid = SpatialGrid::new(40.0);
        grid.build(&points);

        let near = grid.query(&points, -120.0, -80.0, 10.0);
        assert_eq!(near.len(), 2);
    }

    #[test]
    fn test_query_matches_brute_force_scan() {
        let mut state = 0x5eed_u64;
        for trial in 0..100 {
            let n = 20 + (trial % 30);
            let points: Vec<Point> = (0..n)
                .map(|_| {
                    Point::new(
                        next_rand(&mut state) * 1000.0 - 500.0,
                        next_rand(&mut state) * 1000.0 - 500.0,
                    )
                })
                .collect();

            let mut grid = SpatialGrid::new(60.0);
            grid.build(&points);

            let qx = next_rand(&mut state) * 1000.0 - 500.0;
            let qy = next_rand(&mut state) * 1000.0 - 500.0;
            let radius = 20.0 + next_rand(&mut state) * 180.0;

            let mut got = grid.query(&points, qx, qy, radius);
            got.sort_unstable();

            let expected: Vec<usize> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    let dx = p.x - qx;
                    let dy = p.y - qy;
                    dx * dx + dy * dy <= radius * radius
                })
                .map(|(i, _)| i)
                .collect();

            assert_eq!(got, expected, "trial {trial} diverged from brute force");
        }
    }
}
