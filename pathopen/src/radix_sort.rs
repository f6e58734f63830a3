//! C1: radix index sort.
//!
//! Produces a permutation of `[0, N)` whose image values are non-decreasing,
//! grounded on `image_sort`'s `GPOT_RADIXSORT` branch in `path_support.c`:
//! count occurrences per value, prefix-sum into bucket starts, then scatter.

use crate::raster::Raster;

const NUM_VALUES: usize = 256;

/// Sort the pixel indices of `raster` into non-decreasing order of pixel
/// value. Ties are grouped into a contiguous run; within a run the relative
/// order is whatever the single scatter pass produces, which for a
/// row-major image keeps same-row pixels contiguous (scatter visits indices
/// in row-major order within each bucket).
#[must_use]
pub fn sorted_indices(raster: &Raster) -> Vec<u32> {
    let pixels = raster.as_slice();
    let num_pixels = pixels.len();

    let mut counts = [0u32; NUM_VALUES];
    for &value in pixels {
        counts[value as usize] += 1;
    }

    let mut bucket_start = [0u32; NUM_VALUES];
    let mut acc = 0u32;
    for (start, &count) in bucket_start.iter_mut().zip(counts.iter()) {
        *start = acc;
        acc += count;
    }

    let mut cursor = bucket_start;
    let mut indices = vec![0u32; num_pixels];
    for (i, &value) in pixels.iter().enumerate() {
        let slot = &mut cursor[value as usize];
        indices[*slot as usize] = u32::try_from(i).expect("pixel count fits in u32");
        *slot += 1;
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_values_non_decreasing() {
        let raster = Raster::new(3, 2, vec![5, 1, 4, 1, 9, 2]).unwrap();
        let indices = sorted_indices(&raster);
        let pixels = raster.as_slice();

        assert_eq!(indices.len(), 6);
        for pair in indices.windows(2) {
            assert!(pixels[pair[0] as usize] <= pixels[pair[1] as usize]);
        }

        let mut sorted_values: Vec<u8> = indices.iter().map(|&i| pixels[i as usize]).collect();
        let mut expected = pixels.to_vec();
        expected.sort_unstable();
        sorted_values.sort_unstable();
        assert_eq!(sorted_values, expected);
    }

    #[test]
    fn ties_form_contiguous_runs_by_row() {
        let raster = Raster::new(2, 2, vec![3, 3, 3, 3]).unwrap();
        let indices = sorted_indices(&raster);
        let mut sorted_copy = indices.clone();
        sorted_copy.sort_unstable();
        assert_eq!(sorted_copy, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_pixel() {
        let raster = Raster::new(1, 1, vec![42]).unwrap();
        assert_eq!(sorted_indices(&raster), vec![0]);
    }
}
