//! 3D digital line stepping (Bresenham-style DDA)
//!
//! Walks the integer lattice from one voxel to another, one step at a time,
//! so that consecutive points never differ by more than one voxel per axis.

use crate::core::types::{IVec3, UVec3};

/// Lazy walk over the lattice points approximating the segment `start..=end`.
///
/// The walk takes `n = max(|end - start|)` steps and yields `n + 1` points,
/// beginning with `start` and ending exactly on `end`. Each axis keeps an error
/// accumulator that starts at `n`, drops by twice that axis's delta per step
/// and, whenever it goes negative, wraps by `2n` while the axis advances one
/// unit toward `end`.
///
/// The walk is restartable: clone it before iterating, or build a new one with
/// the same endpoints.
#[derive(Clone, Debug)]
pub struct LineWalk {
    current: IVec3,
    inc: IVec3,
    delta: [i64; 3],
    error: [i64; 3],
    steps: i64,
    remaining: u64,
}

impl LineWalk {
    /// Create a walk from `start` to `end` (both inclusive)
    pub fn new(start: IVec3, end: IVec3) -> Self {
        let diff = end.as_i64vec3() - start.as_i64vec3();
        let delta = diff.abs().to_array();
        // Zero-delta axes never advance, so their direction is arbitrary
        let inc = IVec3::new(
            if diff.x < 0 { -1 } else { 1 },
            if diff.y < 0 { -1 } else { 1 },
            if diff.z < 0 { -1 } else { 1 },
        );
        let steps = delta[0].max(delta[1]).max(delta[2]);

        Self {
            current: start,
            inc,
            delta,
            error: [steps; 3],
            steps,
            remaining: steps as u64 + 1,
        }
    }

    /// Walk from `start` to `end` restricted to the voxels of a `dims` volume.
    ///
    /// Yields exactly the in-volume points of [`LineWalk::new`], in the same
    /// order, without stepping through the ones outside. A walk only enters
    /// and leaves the volume once, so the in-volume steps form one run; its
    /// bounds are found by binary search over the step index.
    pub fn clipped(start: IVec3, end: IVec3, dims: UVec3) -> Self {
        let mut walk = Self::new(start, end);
        let n = walk.steps;
        let upper = dims.as_i64vec3() - 1;
        let mut first = 0;
        let mut stop = n + 1;

        for axis in 0..3 {
            let coord = |step| walk.coord_at(axis, step);
            let (enter, leave) = if walk.inc[axis] > 0 {
                (
                    first_step(n, |s| coord(s) >= 0),
                    first_step(n, |s| coord(s) > upper[axis]),
                )
            } else {
                (
                    first_step(n, |s| coord(s) <= upper[axis]),
                    first_step(n, |s| coord(s) < 0),
                )
            };
            first = first.max(enter);
            stop = stop.min(leave);
        }

        if first >= stop {
            walk.remaining = 0;
        } else {
            walk.skip_to(first);
            walk.remaining = (stop - first) as u64;
        }
        walk
    }

    /// Number of steps between the endpoints (one less than the point count)
    pub fn steps(&self) -> u64 {
        self.steps as u64
    }

    /// Times `axis` has advanced after `step` steps from the start
    fn advances_at(&self, axis: usize, step: i64) -> i64 {
        if self.steps == 0 {
            return 0;
        }
        // Accumulator stays in [0, 2n): n - 2*d*step + 2*n*k >= 0 gives the
        // smallest such k. i128 because 2*d*step overflows i64 for long walks.
        let (d, n, s) = (self.delta[axis] as i128, self.steps as i128, step as i128);
        ((2 * d * s + n - 1).div_euclid(2 * n)) as i64
    }

    /// Coordinate on `axis` after `step` steps. Only valid before iterating.
    fn coord_at(&self, axis: usize, step: i64) -> i64 {
        self.current[axis] as i64 + self.inc[axis] as i64 * self.advances_at(axis, step)
    }

    /// Jump to `step` as if it had been walked. Only valid before iterating.
    fn skip_to(&mut self, step: i64) {
        for axis in 0..3 {
            let k = self.advances_at(axis, step);
            let (d, n) = (self.delta[axis] as i128, self.steps as i128);
            self.error[axis] = (n - 2 * d * step as i128 + 2 * n * k as i128) as i64;
            self.current[axis] = (self.current[axis] as i64 + self.inc[axis] as i64 * k) as i32;
        }
    }

    fn advance(&mut self) {
        for axis in 0..3 {
            self.error[axis] -= 2 * self.delta[axis];
            if self.error[axis] < 0 {
                self.error[axis] += 2 * self.steps;
                self.current[axis] += self.inc[axis];
            }
        }
    }
}

/// Smallest step in `0..=n` where `pred` holds, or `n + 1`.
/// `pred` must be monotone: false, then true.
fn first_step(n: i64, pred: impl Fn(i64) -> bool) -> i64 {
    let (mut lo, mut hi) = (0, n + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

impl Iterator for LineWalk {
    type Item = IVec3;

    fn next(&mut self) -> Option<IVec3> {
        if self.remaining == 0 {
            return None;
        }
        let point = self.current;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineWalk {}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: [i32; 3], end: [i32; 3]) -> Vec<[i32; 3]> {
        LineWalk::new(IVec3::from(start), IVec3::from(end))
            .map(|p| p.to_array())
            .collect()
    }

    #[test]
    fn test_single_point() {
        assert_eq!(walk([1, 2, 3], [1, 2, 3]), vec![[1, 2, 3]]);
    }

    #[test]
    fn test_axis_aligned() {
        assert_eq!(
            walk([0, 0, 0], [3, 0, 0]),
            vec![[0, 0, 0], [1, 0, 0], [2, 0, 0], [3, 0, 0]]
        );
        assert_eq!(
            walk([0, 2, 0], [0, 0, 0]),
            vec![[0, 2, 0], [0, 1, 0], [0, 0, 0]]
        );
    }

    #[test]
    fn test_shallow_slope() {
        assert_eq!(
            walk([0, 0, 0], [3, 1, 0]),
            vec![[0, 0, 0], [1, 0, 0], [2, 1, 0], [3, 1, 0]]
        );
    }

    #[test]
    fn test_diagonal_negative() {
        assert_eq!(
            walk([2, 2, 2], [0, 0, 0]),
            vec![[2, 2, 2], [1, 1, 1], [0, 0, 0]]
        );
    }

    #[test]
    fn test_axis_tie() {
        // x and y tie for the major axis, z trails
        assert_eq!(
            walk([0, 0, 0], [2, 2, 1]),
            vec![[0, 0, 0], [1, 1, 0], [2, 2, 1]]
        );
    }

    #[test]
    fn test_continuity_and_endpoint() {
        let cases = [
            ([0, 0, 0], [7, 3, -5]),
            ([-4, 9, 2], [6, -1, 2]),
            ([5, 5, 5], [5, 5, -12]),
            ([0, 0, 0], [1, 13, 6]),
        ];
        for (start, end) in cases {
            let points = walk(start, end);
            assert_eq!(points.first(), Some(&start));
            assert_eq!(points.last(), Some(&end));

            let n = (0..3).map(|a| (end[a] - start[a]).abs()).max().unwrap();
            assert_eq!(points.len() as i32, n + 1);

            for pair in points.windows(2) {
                for a in 0..3 {
                    assert!((pair[1][a] - pair[0][a]).abs() <= 1, "gap in {:?}", pair);
                }
            }
        }
    }

    #[test]
    fn test_clipped_matches_filtered_walk() {
        let dims = UVec3::new(4, 5, 3);
        let cases = [
            ([0, 0, 0], [7, 3, -5]),
            ([-4, 9, 2], [6, -1, 2]),
            ([10, 2, 1], [-10, 2, 1]),
            ([-3, -3, -3], [8, 9, 7]),
            ([1, 1, 1], [2, 3, 1]),
            ([9, 9, 9], [12, 10, 9]),
            ([2, 2, 2], [2, 2, 2]),
            ([7, 2, 1], [7, 2, 1]),
        ];
        for (start, end) in cases {
            let (start, end) = (IVec3::from(start), IVec3::from(end));
            let expected: Vec<_> = LineWalk::new(start, end)
                .filter(|p| p.cmpge(IVec3::ZERO).all() && p.as_uvec3().cmplt(dims).all())
                .collect();
            let clipped: Vec<_> = LineWalk::clipped(start, end, dims).collect();
            assert_eq!(clipped, expected, "{:?} -> {:?}", start, end);
        }
    }

    #[test]
    fn test_clipped_far_start_skips_outside() {
        let walker = LineWalk::clipped(IVec3::new(100_000_000, 0, 0), IVec3::ZERO, UVec3::splat(4));
        assert_eq!(walker.len(), 4);
        assert_eq!(
            walker.map(|p| p.to_array()).collect::<Vec<_>>(),
            vec![[3, 0, 0], [2, 0, 0], [1, 0, 0], [0, 0, 0]]
        );

        let saturated = LineWalk::clipped(IVec3::splat(i32::MAX), IVec3::new(1, 2, 3), UVec3::splat(4));
        assert_eq!(saturated.clone().last(), Some(IVec3::new(1, 2, 3)));
        assert!(saturated.len() <= 4);
    }

    #[test]
    fn test_restartable() {
        let walker = LineWalk::new(IVec3::ZERO, IVec3::new(4, 2, 1));
        assert_eq!(walker.len(), 5);
        let first: Vec<_> = walker.clone().collect();
        let second: Vec<_> = walker.collect();
        assert_eq!(first, second);
    }
}
