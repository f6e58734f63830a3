//! C2: orientation transforms — transpose and vertical flip.
//!
//! Grounded on `transpose_image`/`transpose_indices` and
//! `flip_image`/`flip_indices` in `path_support.c`. Both bijections are
//! involutions on coordinates, which is what lets `transpose_indices` and
//! `flip_indices` apply the same coordinate map directly to each stored
//! pixel-index *value* (not to its position in the list) and still produce
//! a valid sorted-index list for the transformed raster.

use crate::raster::Raster;

/// Transpose `raster`: `(x, y) -> (y, x)`, producing an `ny x nx` raster.
#[must_use]
pub fn transpose(raster: &Raster) -> Raster {
    let (nx, ny) = (raster.nx(), raster.ny());
    let mut out = vec![0u8; nx * ny];
    for y in 0..ny {
        for x in 0..nx {
            out[y + ny * x] = raster.get(x, y);
        }
    }
    Raster::new(ny, nx, out).expect("transposed dimensions are non-zero by construction")
}

/// Transpose a sorted-index list belonging to an `nx x ny` raster into the
/// index space of its `ny x nx` transpose.
#[must_use]
pub fn transpose_indices(indices: &[u32], nx: usize, ny: usize) -> Vec<u32> {
    indices
        .iter()
        .map(|&old_index| {
            let old_index = old_index as usize;
            let (x, y) = (old_index % nx, old_index / nx);
            u32::try_from(y + ny * x).expect("index fits in u32")
        })
        .collect()
}

/// Flip `raster` vertically: `(x, y) -> (x, ny - 1 - y)`.
#[must_use]
pub fn flip_y(raster: &Raster) -> Raster {
    let (nx, ny) = (raster.nx(), raster.ny());
    let mut out = vec![0u8; nx * ny];
    for y in 0..ny {
        let src = &raster.as_slice()[nx * y..nx * (y + 1)];
        let dst_row = ny - 1 - y;
        out[nx * dst_row..nx * (dst_row + 1)].copy_from_slice(src);
    }
    Raster::new(nx, ny, out).expect("flipped dimensions are unchanged and non-zero")
}

/// Flip a sorted-index list belonging to an `nx x ny` raster according to
/// the same vertical flip.
#[must_use]
pub fn flip_indices(indices: &[u32], nx: usize, ny: usize) -> Vec<u32> {
    indices
        .iter()
        .map(|&old_index| {
            let old_index = old_index as usize;
            let (x, y) = (old_index % nx, old_index / nx);
            u32::try_from(x + nx * (ny - 1 - y)).expect("index fits in u32")
        })
        .collect()
}
