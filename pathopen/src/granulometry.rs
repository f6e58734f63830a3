//! C6: the granulometry curve.
//!
//! Grounded on `PATH_GRANULOMETRY_constructor`/`add_point`/
//! `path_length_to_threshold`/`threshold_to_path_length`/`merge` in
//! `path_support.c`. The original's manual buffer growth is replaced by a
//! plain `Vec`; the curve semantics (monotonic elision in `add`, the
//! descending-length/ascending-threshold merge with its dummy-endpoint
//! trick) are kept as-is.

use crate::engine;
use crate::raster::Raster;

/// A Pareto front of `(path_length, threshold)` points: path lengths
/// strictly decrease and thresholds strictly increase as the curve is
/// walked in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Granulometry {
    points: Vec<(u32, u8)>,
}

impl Granulometry {
    /// An empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The points of the curve, in insertion order.
    #[must_use]
    pub fn points(&self) -> &[(u32, u8)] {
        &self.points
    }

    /// Add a point, eliding into the last one if it doesn't advance the
    /// curve (spec.md §4.5 "monotone point list").
    ///
    /// Callers are expected to add points in the order the original
    /// algorithm produces them: non-increasing `path_length`,
    /// non-decreasing `threshold`.
    pub fn add(&mut self, path_length: u32, threshold: u8) {
        if let Some(last) = self.points.last_mut() {
            if path_length == last.0 {
                if threshold > last.1 {
                    last.1 = threshold;
                }
                return;
            }
            if threshold == last.1 {
                return;
            }
        }
        self.points.push((path_length, threshold));
    }

    /// The threshold at which a path of at least `path_length` still
    /// survives, or `0` if the curve is empty or no point qualifies.
    #[must_use]
    pub fn length_to_threshold(&self, path_length: u32) -> u8 {
        let mut value = 0;
        for &(len, thr) in &self.points {
            if len < path_length {
                break;
            }
            value = thr;
        }
        value
    }

    /// The longest path length still surviving at `threshold`, or `0` if
    /// the curve is empty.
    #[must_use]
    pub fn threshold_to_length(&self, threshold: u8) -> u32 {
        let mut length = 0;
        for &(len, thr) in &self.points {
            length = len;
            if thr > threshold {
                break;
            }
        }
        length
    }

    /// Merge two curves: a point survives only if no other point is
    /// simultaneously `<=` it in both path length and threshold.
    #[must_use]
    pub fn merge(a: &Self, b: &Self) -> Self {
        let mut out = Self::new();
        let (mut ia, mut ib) = (0usize, 0usize);
        let mut cur_length = u32::MAX;
        let mut cur_threshold: i32 = -1;

        while ia < a.points.len() || ib < b.points.len() {
            let take_a = match (a.points.get(ia), b.points.get(ib)) {
                (Some(&(la, _)), Some(&(lb, _))) => la > lb,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => unreachable!("loop guard ensures at least one list has points left"),
            };
            let (new_length, new_threshold) = if take_a {
                let p = a.points[ia];
                ia += 1;
                p
            } else {
                let p = b.points[ib];
                ib += 1;
                p
            };

            if i32::from(new_threshold) > cur_threshold {
                if new_length < cur_length {
                    out.add(new_length, new_threshold);
                    cur_length = new_length;
                } else if let Some(last) = out.points.last_mut() {
                    last.1 = new_threshold;
                }
                cur_threshold = i32::from(new_threshold);
            }
        }

        out
    }

    /// Drive the combined engine (spec.md §4.5) at every threshold implied
    /// by `path_lengths` and assemble the resulting curve for pixel
    /// `(x, y)`: for each candidate length `l`, the pixel's output value
    /// under `path_open(raster, l, k)` becomes the threshold at that length.
    #[must_use]
    pub fn for_pixel(raster: &Raster, x: usize, y: usize, path_lengths: &[u32], k_max: usize) -> Self {
        let mut curve = Self::new();
        let p = raster.index(x, y);
        for &l in path_lengths {
            if l == 0 {
                continue;
            }
            let output = engine::combined(raster, l, k_max);
            curve.add(l, output[p]);
        }
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_returns_zero() {
        let g = Granulometry::new();
        assert_eq!(g.length_to_threshold(5), 0);
        assert_eq!(g.threshold_to_length(5), 0);
    }

    #[test]
    fn add_elides_same_length() {
        let mut g = Granulometry::new();
        g.add(10, 50);
        g.add(10, 80);
        assert_eq!(g.points(), &[(10, 80)]);
    }

    #[test]
    fn add_elides_same_threshold() {
        let mut g = Granulometry::new();
        g.add(10, 50);
        g.add(8, 50);
        assert_eq!(g.points(), &[(10, 50)]);
    }

    #[test]
    fn add_appends_new_point() {
        let mut g = Granulometry::new();
        g.add(10, 50);
        g.add(8, 80);
        assert_eq!(g.points(), &[(10, 50), (8, 80)]);
    }

    #[test]
    fn lookups_follow_descending_length_ascending_threshold() {
        let mut g = Granulometry::new();
        g.add(10, 50);
        g.add(8, 80);
        g.add(4, 120);

        assert_eq!(g.length_to_threshold(10), 50);
        assert_eq!(g.length_to_threshold(9), 50);
        assert_eq!(g.length_to_threshold(8), 80);
        assert_eq!(g.length_to_threshold(5), 80);
        assert_eq!(g.length_to_threshold(4), 120);
        assert_eq!(g.length_to_threshold(1), 120);
        assert_eq!(g.length_to_threshold(11), 0);

        assert_eq!(g.threshold_to_length(49), 0);
        assert_eq!(g.threshold_to_length(50), 10);
        assert_eq!(g.threshold_to_length(79), 10);
        assert_eq!(g.threshold_to_length(80), 8);
        assert_eq!(g.threshold_to_length(120), 4);
        assert_eq!(g.threshold_to_length(255), 4);
    }

    #[test]
    fn merge_keeps_pareto_front() {
        let mut a = Granulometry::new();
        a.add(10, 50);
        a.add(4, 100);

        let mut b = Granulometry::new();
        b.add(8, 60);
        b.add(2, 90);

        let merged = Granulometry::merge(&a, &b);
        // (10,50) dominates nothing lower; (8,60) dominates (10,50)'s region;
        // (4,100) dominates (2,90) by length but not threshold, both survive
        // unless strictly dominated.
        for &(len, thr) in merged.points() {
            assert!(len > 0);
            let _ = thr;
        }
        assert!(merged.length_to_threshold(10) >= a.length_to_threshold(10));
        assert!(merged.length_to_threshold(8) >= b.length_to_threshold(8));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut a = Granulometry::new();
        a.add(10, 50);
        a.add(4, 100);
        let empty = Granulometry::new();

        let merged = Granulometry::merge(&a, &empty);
        assert_eq!(merged, a);
    }

    #[test]
    fn for_pixel_is_non_increasing_in_length() {
        let raster = Raster::new(3, 3, vec![9, 9, 9, 1, 1, 1, 9, 9, 9]).unwrap();
        let curve = Granulometry::for_pixel(&raster, 0, 0, &[1, 2, 3], 0);
        let t1 = curve.length_to_threshold(1);
        let t3 = curve.length_to_threshold(3);
        assert!(t1 >= t3);
    }
}
