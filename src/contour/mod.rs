//! Contour data types (vertex + container) and per-segment geometry operations.

mod intersects;
mod seg;
mod seg_intersect;
mod vertex;

pub use intersects::*;
pub use seg::*;
pub use seg_intersect::*;
pub use vertex::*;

use crate::core::traits::Real;
use crate::offset::{parallel_offset, OffsetOptions};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder, AABB};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of vertexes forming a path of line and arc segments.
///
/// Each vertex's bulge describes the segment going to the next vertex. If `closed` is
/// true an implicit final segment connects the last vertex back to the first. A
/// contour with fewer than 2 vertexes has no segments.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Contour<T = f64> {
    pub vertexes: Vec<Vertex<T>>,
    pub closed: bool,
}

impl<T> Contour<T>
where
    T: Real,
{
    /// Create a new empty open contour.
    #[inline]
    pub fn new() -> Self {
        Contour {
            vertexes: Vec::new(),
            closed: false,
        }
    }

    /// Create a new empty closed contour.
    #[inline]
    pub fn new_closed() -> Self {
        Contour {
            vertexes: Vec::new(),
            closed: true,
        }
    }

    /// Create a new empty contour with `capacity` reserved.
    #[inline]
    pub fn with_capacity(capacity: usize, closed: bool) -> Self {
        Contour {
            vertexes: Vec::with_capacity(capacity),
            closed,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertexes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertexes.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Add a vertex from its components.
    #[inline]
    pub fn add(&mut self, x: T, y: T, bulge: T) {
        self.vertexes.push(Vertex::new(x, y, bulge));
    }

    #[inline]
    pub fn add_vertex(&mut self, vertex: Vertex<T>) {
        self.vertexes.push(vertex);
    }

    /// Add `vertex` unless its position fuzzy matches the current last vertex, in which
    /// case the last vertex's bulge is replaced with the new vertex's bulge.
    ///
    /// This is the insertion discipline used everywhere offset results are built so
    /// repeat position singularities never enter a contour.
    pub fn add_or_replace_vertex(&mut self, vertex: Vertex<T>, pos_equal_eps: T) {
        match self.vertexes.last_mut() {
            None => self.vertexes.push(vertex),
            Some(last) => {
                if last.pos().fuzzy_eq_eps(vertex.pos(), pos_equal_eps) {
                    last.bulge = vertex.bulge;
                } else {
                    self.vertexes.push(vertex);
                }
            }
        }
    }

    /// Same as [Contour::add_or_replace_vertex] taking the vertex components.
    #[inline]
    pub fn add_or_replace(&mut self, x: T, y: T, bulge: T, pos_equal_eps: T) {
        self.add_or_replace_vertex(Vertex::new(x, y, bulge), pos_equal_eps);
    }

    #[inline]
    pub fn last(&self) -> Option<&Vertex<T>> {
        self.vertexes.last()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut Vertex<T>> {
        self.vertexes.last_mut()
    }

    #[inline]
    pub fn remove(&mut self, index: usize) -> Vertex<T> {
        self.vertexes.remove(index)
    }

    #[inline]
    pub fn remove_last(&mut self) {
        self.vertexes.pop();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertexes.clear();
    }

    #[inline]
    pub fn extend_vertexes<I>(&mut self, vertexes: I)
    where
        I: IntoIterator<Item = Vertex<T>>,
    {
        self.vertexes.extend(vertexes);
    }

    /// Iterate over the vertexes by value.
    #[inline]
    pub fn iter_vertexes(&self) -> impl Iterator<Item = Vertex<T>> + '_ {
        self.vertexes.iter().copied()
    }

    /// Number of segments formed by the vertexes (including the closing segment for a
    /// closed contour).
    #[inline]
    pub fn segment_count(&self) -> usize {
        let vc = self.vertexes.len();
        if vc < 2 {
            0
        } else if self.closed {
            vc
        } else {
            vc - 1
        }
    }

    /// Iterate over the `(start, end)` vertex index pairs of all segments.
    pub fn iter_segment_indexes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let vc = self.vertexes.len();
        let closed = self.closed;
        (0..self.segment_count()).map(move |i| {
            if closed && i == vc - 1 {
                (i, 0)
            } else {
                (i, i + 1)
            }
        })
    }

    /// Iterate over the `(start, end)` vertex pairs of all segments.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Vertex<T>, Vertex<T>)> + '_ {
        self.iter_segment_indexes()
            .map(move |(i, j)| (self.vertexes[i], self.vertexes[j]))
    }

    /// Vertex index after `index` wrapping back to 0 at the end.
    #[inline]
    pub fn next_wrapping_index(&self, index: usize) -> usize {
        if index == self.vertexes.len() - 1 {
            0
        } else {
            index + 1
        }
    }

    /// Total path length of the contour (geodesic along arc segments).
    #[inline]
    pub fn path_length(&self) -> T {
        self.iter_segments()
            .fold(T::zero(), |acc, (v1, v2)| acc + seg_length(v1, v2))
    }

    /// Signed area enclosed by a closed contour (positive for counter clockwise
    /// orientation). Always zero for an open contour.
    ///
    /// # Examples
    ///
    /// ```
    /// # use contour_offset::contour::*;
    /// # use contour_offset::core::traits::*;
    /// let mut contour = Contour::new_closed();
    /// // full circle of radius 1 from two half circle arcs
    /// contour.add(1.0, 1.0, 1.0);
    /// contour.add(3.0, 1.0, 1.0);
    /// assert!(contour.area().fuzzy_eq(std::f64::consts::PI));
    /// ```
    pub fn area(&self) -> T {
        if !self.closed {
            return T::zero();
        }

        // Shoelace formula extended for arcs: each arc contributes its circular
        // segment area (sector minus chord triangle) on top of the chord shoelace
        // term, added for counter clockwise arcs and subtracted for clockwise.
        let mut double_area = T::zero();

        for (v1, v2) in self.iter_segments() {
            double_area = double_area + v1.x * v2.y - v1.y * v2.x;
            if v1.bulge_is_zero() {
                continue;
            }

            let b = v1.bulge.abs();
            let sweep_angle = crate::core::math::angle_from_bulge(b);
            let chord_length = (v2.pos() - v1.pos()).length();
            let radius = chord_length * ((b * b + T::one()) / (T::four() * b));
            let sagitta = b * chord_length / T::two();
            let triangle_height = radius - sagitta;
            let mut double_segment_area =
                sweep_angle * radius * radius - chord_length * triangle_height;
            if v1.bulge_is_neg() {
                double_segment_area = -double_segment_area;
            }

            double_area = double_area + double_segment_area;
        }

        double_area / T::two()
    }

    /// Exact axis aligned bounding box of the contour, `None` if the contour has no
    /// segments.
    pub fn extents(&self) -> Option<AABB<T>> {
        use num_traits::real::Real;
        if self.segment_count() == 0 {
            return None;
        }

        let mut result: Option<AABB<T>> = None;
        for (v1, v2) in self.iter_segments() {
            let seg_extent = seg_bounds(v1, v2);
            result = Some(match result {
                None => seg_extent,
                Some(r) => AABB::new(
                    Real::min(r.min_x, seg_extent.min_x),
                    Real::min(r.min_y, seg_extent.min_y),
                    Real::max(r.max_x, seg_extent.max_x),
                    Real::max(r.max_y, seg_extent.max_y),
                ),
            });
        }

        result
    }

    /// Reverse the direction of the contour in place.
    ///
    /// Vertex order is reversed and bulges are shifted back one position and negated
    /// so the reversed contour traces the identical shape the opposite way.
    pub fn invert_direction(&mut self) {
        let vc = self.vertexes.len();
        if vc < 2 {
            return;
        }

        self.vertexes.reverse();

        let first_bulge = self.vertexes[0].bulge;
        for i in 1..vc {
            self.vertexes[i - 1].bulge = -self.vertexes[i].bulge;
        }

        if self.closed {
            self.vertexes[vc - 1].bulge = -first_bulge;
        }
    }

    /// Build a spatial index over the approximate bounding boxes of all segments.
    ///
    /// Box index positions correspond to segment start vertex indexes.
    pub fn approx_spatial_index(&self) -> StaticAABB2DIndex<T> {
        let mut builder = StaticAABB2DIndexBuilder::new(self.segment_count());
        for (v1, v2) in self.iter_segments() {
            let approx_bounds = seg_approx_bounds(v1, v2);
            builder.add(
                approx_bounds.min_x,
                approx_bounds.min_y,
                approx_bounds.max_x,
                approx_bounds.max_y,
            );
        }

        builder.build().unwrap()
    }

    /// Fuzzy equal comparison with another contour using the `fuzzy_epsilon` given.
    pub fn fuzzy_eq_eps(&self, other: &Self, fuzzy_epsilon: T) -> bool {
        self.closed == other.closed
            && self.vertexes.len() == other.vertexes.len()
            && self
                .vertexes
                .iter()
                .zip(other.vertexes.iter())
                .all(|(v1, v2)| v1.fuzzy_eq_eps(*v2, fuzzy_epsilon))
    }

    /// Fuzzy equal comparison with another contour using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Compute the parallel offset of this contour using default options.
    ///
    /// The `offset` sign selects the side: for a counter clockwise closed contour a
    /// negative offset is an inset and a positive offset an outset. Returns zero or
    /// more resulting contours; an empty result means the offset fully collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use contour_offset::contour::*;
    /// # use contour_offset::core::traits::*;
    /// let mut square = Contour::new_closed();
    /// square.add(0.0, 0.0, 0.0);
    /// square.add(10.0, 0.0, 0.0);
    /// square.add(10.0, 10.0, 0.0);
    /// square.add(0.0, 10.0, 0.0);
    /// let results = square.parallel_offset(-1.0);
    /// assert_eq!(results.len(), 1);
    /// assert!(results[0].area().fuzzy_eq(64.0));
    /// ```
    #[inline]
    pub fn parallel_offset(&self, offset: T) -> Vec<Contour<T>> {
        parallel_offset(self, offset, &OffsetOptions::new())
    }

    /// Same as [Contour::parallel_offset] with explicit `options`.
    #[inline]
    pub fn parallel_offset_opt(&self, offset: T, options: &OffsetOptions<T>) -> Vec<Contour<T>> {
        parallel_offset(self, offset, options)
    }
}

impl<T> Index<usize> for Contour<T> {
    type Output = Vertex<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertexes[index]
    }
}

impl<T> IndexMut<usize> for Contour<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vertexes[index]
    }
}
