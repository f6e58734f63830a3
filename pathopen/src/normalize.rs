//! Ambient contrast-normalization pre-pass (spec.md §9 REDESIGN).
//!
//! The original source carried a disabled dynamic-range branch and a
//! hard-coded static MRI range; here that's a configurable pre-pass that
//! runs strictly before [`crate::path_open`] and is never invoked
//! implicitly by it.

use crate::raster::Raster;

/// A contrast-normalization strategy for [`normalize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// Clip to `[lo, hi]`, then rescale linearly to `[0, 255]`.
    Static { lo: u8, hi: u8 },
    /// Clip to the image's own `[min, max]`, then rescale to `[0, 255]`.
    Dynamic,
}

/// Apply `strategy` to `raster`, returning a new raster of the same
/// dimensions. A degenerate range (`lo >= hi`, or a flat image under
/// `Dynamic`) maps every pixel to `0`.
#[must_use]
pub fn normalize(raster: &Raster, strategy: Normalization) -> Raster {
    let (lo, hi) = match strategy {
        Normalization::Static { lo, hi } => (lo, hi),
        Normalization::Dynamic => {
            let pixels = raster.as_slice();
            let lo = *pixels.iter().min().expect("raster is never empty");
            let hi = *pixels.iter().max().expect("raster is never empty");
            (lo, hi)
        }
    };

    let pixels = raster.as_slice();
    let out: Vec<u8> = if hi <= lo {
        vec![0u8; pixels.len()]
    } else {
        let range = f64::from(hi - lo);
        pixels
            .iter()
            .map(|&v| {
                let clipped = v.clamp(lo, hi);
                let scaled = (f64::from(clipped - lo) / range) * 255.0;
                scaled.round() as u8
            })
            .collect()
    };

    Raster::new(raster.nx(), raster.ny(), out).expect("dimensions unchanged from a valid raster")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_normalize_clips_and_rescales() {
        let raster = Raster::new(3, 1, vec![0, 50, 255]).unwrap();
        let out = normalize(&raster, Normalization::Static { lo: 50, hi: 100 });
        assert_eq!(out.as_slice(), &[0, 0, 255]);
    }

    #[test]
    fn dynamic_normalize_uses_image_range() {
        let raster = Raster::new(3, 1, vec![10, 20, 30]).unwrap();
        let out = normalize(&raster, Normalization::Dynamic);
        assert_eq!(out.as_slice(), &[0, 128, 255]);
    }

    #[test]
    fn flat_image_maps_to_zero() {
        let raster = Raster::new(2, 1, vec![42, 42]).unwrap();
        let out = normalize(&raster, Normalization::Dynamic);
        assert_eq!(out.as_slice(), &[0, 0]);
    }

    #[test]
    fn degenerate_static_range_maps_to_zero() {
        let raster = Raster::new(2, 1, vec![10, 200]).unwrap();
        let out = normalize(&raster, Normalization::Static { lo: 100, hi: 100 });
        assert_eq!(out.as_slice(), &[0, 0]);
    }
}
