//! 2D arc/line contour parallel offsetting library.
//!
//! A contour is an ordered, optionally closed sequence of vertexes where each vertex
//! is a position plus a bulge value encoding the segment to the next vertex: a bulge
//! of zero is a straight line, otherwise the segment is a circular arc with
//! `bulge = tan(sweep_angle / 4)` (positive sweeps counter clockwise). This compact
//! representation is common in CAD data (e.g. lightweight polylines).
//!
//! The core operation is [parallel_offset](crate::contour::Contour::parallel_offset):
//! computing the path(s) parallel to a contour at a fixed perpendicular distance,
//! correctly handling self intersections, arcs that collapse under the offset, and
//! fragments that would fold back across the source curve.
//!
//! # Examples
//!
//! ```
//! use contour_offset::contour_closed;
//! use contour_offset::core::traits::FuzzyEq;
//!
//! // counter clockwise unit square scaled by 10, inset by 1
//! let square = contour_closed![
//!     (0.0, 0.0, 0.0),
//!     (10.0, 0.0, 0.0),
//!     (10.0, 10.0, 0.0),
//!     (0.0, 10.0, 0.0)
//! ];
//! let results = square.parallel_offset(-1.0);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].area().fuzzy_eq(64.0));
//! ```

#[macro_use]
mod macros;

pub mod contour;
pub mod core;
pub mod offset;

pub use static_aabb2d_index::{StaticAABB2DIndex, AABB};
