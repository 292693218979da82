use crate::core::{math::Vec2, traits::Real};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A contour vertex: a position plus the bulge of the segment going to the next vertex.
///
/// `bulge = tan(sweep_angle / 4)` where `sweep_angle` is the signed included angle of
/// the arc from this vertex to the next (positive is counter clockwise). A bulge of
/// zero denotes a straight segment. The bulge of a vertex is only meaningful paired
/// with the next vertex in the contour; the last vertex of an open contour carries no
/// outgoing segment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vertex<T = f64> {
    pub x: T,
    pub y: T,
    pub bulge: T,
}

impl<T> Vertex<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T, bulge: T) -> Self {
        Vertex { x, y, bulge }
    }

    #[inline]
    pub fn from_vec2(pos: Vec2<T>, bulge: T) -> Self {
        Vertex::new(pos.x, pos.y, bulge)
    }

    /// Position of the vertex as a vector.
    #[inline]
    pub fn pos(&self) -> Vec2<T> {
        Vec2::new(self.x, self.y)
    }

    /// Copy of this vertex with the bulge replaced.
    #[inline]
    pub fn with_bulge(&self, bulge: T) -> Self {
        Vertex::new(self.x, self.y, bulge)
    }

    /// True if the outgoing segment is a straight line (bulge fuzzy equal to zero).
    #[inline]
    pub fn bulge_is_zero(&self) -> bool {
        self.bulge.fuzzy_eq_zero()
    }

    /// True if the outgoing segment is a counter clockwise arc.
    #[inline]
    pub fn bulge_is_pos(&self) -> bool {
        self.bulge > T::zero()
    }

    /// True if the outgoing segment is a clockwise arc.
    #[inline]
    pub fn bulge_is_neg(&self) -> bool {
        self.bulge < T::zero()
    }

    /// Fuzzy equal comparison with another vertex using the `fuzzy_epsilon` given.
    #[inline]
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon)
            && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
            && self.bulge.fuzzy_eq_eps(other.bulge, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another vertex using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}
