#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! Grayscale path opening by threshold decomposition.
//!
//! A path opening keeps pixels lying on sufficiently long oriented chains
//! of bright pixels, tolerating a bounded number of gaps, and is computed
//! over four fixed orientations combined by per-pixel maximum.

mod engine;
mod error;
mod granulometry;
mod normalize;
mod orientation;
mod radix_sort;
mod raster;
mod row_queue;

pub use engine::{diagonal_path_open, vertical_path_open};
pub use error::{Error, Result};
pub use granulometry::Granulometry;
pub use normalize::{normalize, Normalization};
pub use radix_sort::sorted_indices;
pub use raster::Raster;

/// Path-open `raster` with path length `l` and gap tolerance `k`
/// (spec.md §4.5, C5): run all four fixed orientations and combine them by
/// per-pixel maximum.
///
/// # Errors
///
/// Returns [`Error::InvalidPathLength`] if `l` is `0`.
pub fn path_open(raster: &Raster, l: u32, k: u32) -> Result<Raster> {
    if l == 0 {
        return Err(Error::InvalidPathLength(l));
    }
    let k_max = usize::try_from(k).unwrap_or(usize::MAX);
    let output = engine::combined(raster, l, k_max);
    Ok(Raster::new(raster.nx(), raster.ny(), output).expect("dimensions unchanged from a valid raster"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_length() {
        let raster = Raster::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(path_open(&raster, 0, 0), Err(Error::InvalidPathLength(0)));
    }

    #[test]
    fn accepts_zero_gaps() {
        let raster = Raster::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert!(path_open(&raster, 1, 0).is_ok());
    }

    #[test]
    fn output_never_exceeds_input() {
        let raster = Raster::new(4, 4, vec![
            9, 1, 1, 9,
            1, 9, 9, 1,
            9, 1, 1, 9,
            1, 9, 9, 1,
        ]).unwrap();
        let out = path_open(&raster, 3, 1).unwrap();
        for (o, i) in out.as_slice().iter().zip(raster.as_slice()) {
            assert!(o <= i);
        }
    }

    #[test]
    fn idempotent_on_flat_image() {
        let raster = Raster::new(3, 3, vec![10; 9]).unwrap();
        let out = path_open(&raster, 2, 1).unwrap();
        assert_eq!(out.as_slice(), raster.as_slice());
    }

    #[test]
    fn preserves_dimensions() {
        let raster = Raster::new(5, 2, vec![3; 10]).unwrap();
        let out = path_open(&raster, 1, 0).unwrap();
        assert_eq!((out.nx(), out.ny()), (5, 2));
    }
}
