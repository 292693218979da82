//! Parallel offset engine.
//!
//! The offset is computed in three phases: raw offset generation (every segment
//! offset independently then joined, see [raw_offset_contour]), slicing of the raw
//! offset at self/dual intersect boundaries with distance validity filtering (see
//! [slice_raw_offset] and [slice_with_dual]), and stitching of the surviving slices
//! into the final result contours (see [stitch_slices]). The whole pipeline is a
//! pure function of the input contour and signed offset distance.

mod raw;
mod slices;
mod stitch;

pub use raw::*;
pub use slices::*;
pub use stitch::*;

use crate::contour::Contour;
use crate::core::traits::Real;
use static_aabb2d_index::StaticAABB2DIndex;

/// Options controlling parallel offset computation.
#[derive(Debug, Clone)]
pub struct OffsetOptions<'a, T>
where
    T: Real,
{
    /// Spatial index over the input contour's segments (boxes must be at least as
    /// large as each segment's extent). Computed internally when `None`.
    pub aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    /// If true self intersecting input contours are handled correctly at the cost of
    /// extra intersect detection work. Open contours always take this path.
    pub handle_self_intersects: bool,
    /// Fuzzy comparison epsilon for testing if two positions are equal.
    pub pos_equal_eps: T,
    /// Fuzzy comparison epsilon for joining slice end points while stitching.
    pub slice_join_eps: T,
    /// Fuzzy comparison epsilon for testing slice distance to the original contour.
    pub offset_dist_eps: T,
}

impl<'a, T> OffsetOptions<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        OffsetOptions {
            aabb_index: None,
            handle_self_intersects: false,
            pos_equal_eps: T::from(1e-5).unwrap(),
            slice_join_eps: T::from(1e-4).unwrap(),
            offset_dist_eps: T::from(1e-4).unwrap(),
        }
    }
}

impl<'a, T> Default for OffsetOptions<'a, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the parallel offset of `contour` at the signed `offset` distance.
///
/// Positive offsets shift to the right of the direction of travel (an outset for
/// counter clockwise closed contours), negative offsets shift left. The result is a
/// list of zero or more contours; geometrically impossible or fully collapsed
/// offsets produce an empty list, never an error.
pub fn parallel_offset<T>(
    contour: &Contour<T>,
    offset: T,
    options: &OffsetOptions<T>,
) -> Vec<Contour<T>>
where
    T: Real,
{
    if contour.len() < 2 {
        return Vec::new();
    }

    if offset.fuzzy_eq_zero() {
        // zero distance offset mirrors the input (the raw offset and its dual would
        // coincide and slice each other away entirely)
        return vec![contour.clone()];
    }

    let constructed_index;
    let index = if let Some(idx) = options.aabb_index {
        idx
    } else {
        constructed_index = contour.approx_spatial_index();
        &constructed_index
    };

    let raw_offset = raw_offset_contour(contour, offset, options.pos_equal_eps);
    if raw_offset.is_empty() {
        return Vec::new();
    }

    if contour.is_closed() && !options.handle_self_intersects {
        let slices = slice_raw_offset(contour, &raw_offset, index, offset, options);
        stitch_slices(&slices, true, raw_offset.len() - 1, options)
    } else {
        let dual_raw_offset = raw_offset_contour(contour, -offset, options.pos_equal_eps);
        let slices = slice_with_dual(
            contour,
            &raw_offset,
            &dual_raw_offset,
            index,
            offset,
            options,
        );
        stitch_slices(&slices, contour.is_closed(), raw_offset.len(), options)
    }
}
