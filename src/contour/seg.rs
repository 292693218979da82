//! Geometry operations on a single contour segment (a pair of vertexes).

use super::Vertex;
use crate::core::{
    math::{
        angle, bulge_from_angle, delta_angle, dist_squared, line_seg_closest_point, midpoint,
        min_max, normalize_radians, point_in_arc_sweep, point_on_circle, Vec2,
    },
    traits::Real,
};
use static_aabb2d_index::AABB;

/// Get the radius and center of the arc segment going from `v1` to `v2`.
///
/// Behavior is undefined (may panic or return garbage) if `v1.bulge` is zero or the
/// vertexes are on top of each other.
///
/// # Examples
///
/// ```
/// # use contour_offset::contour::*;
/// # use contour_offset::core::math::*;
/// # use contour_offset::core::traits::*;
/// // half circle going counter clockwise from (0, 0) to (1, 0)
/// let v1 = Vertex::new(0.0, 0.0, 1.0);
/// let v2 = Vertex::new(1.0, 0.0, 0.0);
/// let (radius, center) = arc_radius_and_center(v1, v2);
/// assert!(radius.fuzzy_eq(0.5));
/// assert!(center.fuzzy_eq(Vec2::new(0.5, 0.0)));
/// ```
pub fn arc_radius_and_center<T>(v1: Vertex<T>, v2: Vertex<T>) -> (T, Vec2<T>)
where
    T: Real,
{
    debug_assert!(!v1.bulge_is_zero(), "segment must be an arc");
    debug_assert!(!v1.pos().fuzzy_eq(v2.pos()), "vertexes must be distinct");

    // radius from chord length and bulge
    let b = v1.bulge.abs();
    let chord = v2.pos() - v1.pos();
    let d = chord.length();
    let radius = d * (b * b + T::one()) / (T::four() * b);

    // center offset from the chord midpoint along the chord perpendicular
    let sagitta = b * d / T::two();
    let m = radius - sagitta;
    let mut offs_x = -m * chord.y / d;
    let mut offs_y = m * chord.x / d;
    if v1.bulge_is_neg() {
        offs_x = -offs_x;
        offs_y = -offs_y;
    }

    let center = Vec2::new(
        v1.x + chord.x / T::two() + offs_x,
        v1.y + chord.y / T::two() + offs_y,
    );

    (radius, center)
}

/// Result from calling [seg_split_at].
#[derive(Debug, Copy, Clone)]
pub struct SegSplit<T = f64>
where
    T: Real,
{
    /// Start vertex of the first half with its bulge trimmed.
    pub updated_start: Vertex<T>,
    /// Vertex at the split point carrying the bulge of the second half.
    pub split_vertex: Vertex<T>,
}

/// Splits the segment going from `v1` to `v2` at `point_on_seg`.
///
/// Both halves' bulges are recomputed from the retained arc center and the angles
/// swept to/from the split point. Assumes `point_on_seg` lies on the segment.
///
/// # Examples
///
/// ```
/// # use contour_offset::contour::*;
/// # use contour_offset::core::math::*;
/// // half circle from (0, 0) to (1, 0) split at its lowest point
/// let v1 = Vertex::new(0.0, 0.0, 1.0);
/// let v2 = Vertex::new(1.0, 0.0, 0.0);
/// let SegSplit { updated_start, split_vertex } =
///     seg_split_at(v1, v2, Vec2::new(0.5, -0.5), 1e-5);
/// let quarter_circle_bulge = (std::f64::consts::PI / 8.0).tan();
/// assert!(updated_start.fuzzy_eq(Vertex::new(0.0, 0.0, quarter_circle_bulge)));
/// assert!(split_vertex.fuzzy_eq(Vertex::new(0.5, -0.5, quarter_circle_bulge)));
/// ```
pub fn seg_split_at<T>(
    v1: Vertex<T>,
    v2: Vertex<T>,
    point_on_seg: Vec2<T>,
    pos_equal_eps: T,
) -> SegSplit<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        // line segment, the split point just becomes the new end point
        return SegSplit {
            updated_start: v1,
            split_vertex: Vertex::from_vec2(point_on_seg, T::zero()),
        };
    }

    if v1.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps)
        || v1.pos().fuzzy_eq_eps(point_on_seg, pos_equal_eps)
    {
        // degenerate first half, place updated start on top of the split vertex
        return SegSplit {
            updated_start: Vertex::from_vec2(point_on_seg, T::zero()),
            split_vertex: Vertex::from_vec2(point_on_seg, v1.bulge),
        };
    }

    if v2.pos().fuzzy_eq_eps(point_on_seg, pos_equal_eps) {
        // split point is at the end of the segment
        return SegSplit {
            updated_start: v1,
            split_vertex: Vertex::new(v2.x, v2.y, T::zero()),
        };
    }

    let (_, arc_center) = arc_radius_and_center(v1, v2);

    let point_angle = angle(arc_center, point_on_seg);

    let arc_start_angle = angle(arc_center, v1.pos());
    let bulge1 = bulge_from_angle(delta_angle(arc_start_angle, point_angle));

    let arc_end_angle = angle(arc_center, v2.pos());
    let bulge2 = bulge_from_angle(delta_angle(point_angle, arc_end_angle));

    SegSplit {
        updated_start: v1.with_bulge(bulge1),
        split_vertex: Vertex::from_vec2(point_on_seg, bulge2),
    }
}

/// Finds the closest point on the segment going from `v1` to `v2` to the `point` given.
///
/// If multiple points are equally close one of them is returned (which one is
/// unspecified).
pub fn seg_closest_point<T>(v1: Vertex<T>, v2: Vertex<T>, point: Vec2<T>) -> Vec2<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        return line_seg_closest_point(v1.pos(), v2.pos(), point);
    }

    let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
    if point.fuzzy_eq(arc_center) {
        // point at the arc center, any point on the arc is equally close
        return v1.pos();
    }

    if point_in_arc_sweep(arc_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), point) {
        // closest point lies on the arc itself
        let to_point = (point - arc_center).normalize();
        return to_point.scale(arc_radius) + arc_center;
    }

    // closest point is one of the arc end points
    let dist1 = dist_squared(v1.pos(), point);
    let dist2 = dist_squared(v2.pos(), point);
    if dist1 < dist2 {
        v1.pos()
    } else {
        v2.pos()
    }
}

/// Fast approximate axis aligned bounding box of the segment going from `v1` to `v2`.
///
/// The box may be larger than the true extent but is never smaller, which is all the
/// spatial index pruning requires. For arcs the box is formed from the chord extended
/// by the sagitta, avoiding any trigonometry. Use [seg_bounds] for the exact box.
pub fn seg_approx_bounds<T>(v1: Vertex<T>, v2: Vertex<T>) -> AABB<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        let (min_x, max_x) = min_max(v1.x, v2.x);
        let (min_y, max_y) = min_max(v1.y, v2.y);
        return AABB::new(min_x, min_y, max_x, max_y);
    }

    // rectangle formed by the chord and the chord translated by the sagitta vector,
    // always contains the arc
    let b = v1.bulge;
    let offs_x = b * (v2.y - v1.y) / T::two();
    let offs_y = -b * (v2.x - v1.x) / T::two();

    let (pt_x_min, pt_x_max) = min_max(v1.x + offs_x, v2.x + offs_x);
    let (pt_y_min, pt_y_max) = min_max(v1.y + offs_y, v2.y + offs_y);

    let (end_x_min, end_x_max) = min_max(v1.x, v2.x);
    let (end_y_min, end_y_max) = min_max(v1.y, v2.y);

    AABB::new(
        num_traits::real::Real::min(end_x_min, pt_x_min),
        num_traits::real::Real::min(end_y_min, pt_y_min),
        num_traits::real::Real::max(end_x_max, pt_x_max),
        num_traits::real::Real::max(end_y_max, pt_y_max),
    )
}

/// Exact axis aligned bounding box of the segment going from `v1` to `v2`.
///
/// Slower than [seg_approx_bounds] for arcs.
pub fn seg_bounds<T>(v1: Vertex<T>, v2: Vertex<T>) -> AABB<T>
where
    T: Real,
{
    let (min_x, max_x) = min_max(v1.x, v2.x);
    let (min_y, max_y) = min_max(v1.y, v2.y);
    if v1.bulge_is_zero() {
        return AABB::new(min_x, min_y, max_x, max_y);
    }

    // start from the chord extents then extend to the circle extreme for each axis
    // direction the arc sweep crosses
    let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
    let mut result = AABB::new(min_x, min_y, max_x, max_y);

    // sweep expressed counter clockwise from start_angle
    let (start_angle, sweep) = if v1.bulge_is_pos() {
        let a = normalize_radians(angle(arc_center, v1.pos()));
        (a, normalize_radians(angle(arc_center, v2.pos()) - a))
    } else {
        let a = normalize_radians(angle(arc_center, v2.pos()));
        (a, normalize_radians(angle(arc_center, v1.pos()) - a))
    };

    let crosses = |cardinal: T| -> bool { normalize_radians(cardinal - start_angle) <= sweep };

    if crosses(T::zero()) {
        result.max_x = arc_center.x + arc_radius;
    }
    if crosses(T::pi() / T::two()) {
        result.max_y = arc_center.y + arc_radius;
    }
    if crosses(T::pi()) {
        result.min_x = arc_center.x - arc_radius;
    }
    if crosses(T::pi() + T::pi() / T::two()) {
        result.min_y = arc_center.y - arc_radius;
    }

    result
}

/// Path length of the segment going from `v1` to `v2` (geodesic along arcs).
///
/// # Examples
///
/// ```
/// # use contour_offset::contour::*;
/// # use contour_offset::core::traits::*;
/// // half circle of radius 1, length is PI
/// let v1 = Vertex::new(2.0, 2.0, 1.0);
/// let v2 = Vertex::new(4.0, 2.0, 0.0);
/// assert!(seg_length(v1, v2).fuzzy_eq(std::f64::consts::PI));
/// ```
pub fn seg_length<T>(v1: Vertex<T>, v2: Vertex<T>) -> T
where
    T: Real,
{
    if v1.pos().fuzzy_eq(v2.pos()) {
        return T::zero();
    }

    if v1.bulge_is_zero() {
        return dist_squared(v1.pos(), v2.pos()).sqrt();
    }

    let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
    let start_angle = angle(arc_center, v1.pos());
    let end_angle = angle(arc_center, v2.pos());
    arc_radius * delta_angle(start_angle, end_angle).abs()
}

/// Midpoint of the segment going from `v1` to `v2` (on the arc for arc segments).
///
/// # Examples
///
/// ```
/// # use contour_offset::contour::*;
/// # use contour_offset::core::math::*;
/// // half circle from (2, 2) to (4, 2), bottom of the circle is the midpoint
/// let v1 = Vertex::new(2.0, 2.0, 1.0);
/// let v2 = Vertex::new(4.0, 2.0, 0.0);
/// assert!(seg_midpoint(v1, v2).fuzzy_eq(Vec2::new(3.0, 1.0)));
/// ```
pub fn seg_midpoint<T>(v1: Vertex<T>, v2: Vertex<T>) -> Vec2<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        return midpoint(v1.pos(), v2.pos());
    }

    let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
    let angle1 = angle(arc_center, v1.pos());
    let angle2 = angle(arc_center, v2.pos());
    let half_sweep = delta_angle(angle1, angle2).abs() / T::two();
    let mid_angle = if v1.bulge_is_pos() {
        angle1 + half_sweep
    } else {
        angle1 - half_sweep
    };
    point_on_circle(arc_radius, arc_center, mid_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::PI;

    #[test]
    fn radius_center_clockwise() {
        // same half circle as the doc example but traversed clockwise
        let v1 = Vertex::new(1.0, 0.0, -1.0);
        let v2 = Vertex::new(0.0, 0.0, 0.0);
        let (radius, center) = arc_radius_and_center(v1, v2);
        assert_fuzzy_eq!(radius, 0.5);
        assert!(center.fuzzy_eq(Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn split_line_seg() {
        let v1 = Vertex::new(0.0, 0.0, 0.0);
        let v2 = Vertex::new(10.0, 0.0, 0.0);
        let split = seg_split_at(v1, v2, Vec2::new(4.0, 0.0), 1e-5);
        assert!(split.updated_start.fuzzy_eq(v1));
        assert!(split.split_vertex.fuzzy_eq(Vertex::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn split_at_seg_end_zeroes_bulge() {
        let v1 = Vertex::new(0.0, 0.0, 1.0);
        let v2 = Vertex::new(1.0, 0.0, 0.0);
        let split = seg_split_at(v1, v2, v2.pos(), 1e-5);
        assert!(split.updated_start.fuzzy_eq(v1));
        assert!(split.split_vertex.fuzzy_eq(Vertex::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn approx_bounds_contains_exact_bounds() {
        // three quarter-ish circle sweeps in various orientations
        let segs = [
            (Vertex::new(0.0, 0.0, 1.0), Vertex::new(1.0, 0.0, 0.0)),
            (Vertex::new(1.0, 0.0, -1.0), Vertex::new(0.0, 0.0, 0.0)),
            (Vertex::new(2.0, 2.0, 0.5), Vertex::new(4.0, 2.0, 0.0)),
            (Vertex::new(-1.0, 3.0, -0.8), Vertex::new(-4.0, -2.0, 0.0)),
        ];
        for &(v1, v2) in segs.iter() {
            let approx = seg_approx_bounds(v1, v2);
            let exact = seg_bounds(v1, v2);
            assert!(approx.min_x <= exact.min_x + 1e-10);
            assert!(approx.min_y <= exact.min_y + 1e-10);
            assert!(approx.max_x >= exact.max_x - 1e-10);
            assert!(approx.max_y >= exact.max_y - 1e-10);
        }
    }

    #[test]
    fn exact_bounds_half_circle() {
        // ccw half circle from (0, 0) to (1, 0) dips below the x axis
        let v1 = Vertex::new(0.0, 0.0, 1.0);
        let v2 = Vertex::new(1.0, 0.0, 0.0);
        let bounds = seg_bounds(v1, v2);
        assert_fuzzy_eq!(bounds.min_x, 0.0);
        assert_fuzzy_eq!(bounds.max_x, 1.0);
        assert_fuzzy_eq!(bounds.min_y, -0.5);
        assert_fuzzy_eq!(bounds.max_y, 0.0);
    }

    #[test]
    fn length_and_midpoint_line() {
        let v1 = Vertex::new(2.0, 2.0, 0.0);
        let v2 = Vertex::new(4.0, 4.0, 0.0);
        assert_fuzzy_eq!(seg_length(v1, v2), 2.0 * 2.0f64.sqrt());
        assert!(seg_midpoint(v1, v2).fuzzy_eq(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn length_quarter_arc() {
        let bulge = (PI / 8.0).tan();
        let v1 = Vertex::new(1.0, 0.0, bulge);
        let v2 = Vertex::new(0.0, 1.0, 0.0);
        assert_fuzzy_eq!(seg_length(v1, v2), PI / 2.0);
    }

    #[test]
    fn closest_point_on_arc() {
        // ccw half circle centered at (3, 2) radius 1
        let v1 = Vertex::new(2.0, 2.0, 1.0);
        let v2 = Vertex::new(4.0, 2.0, 0.0);
        assert!(seg_closest_point(v1, v2, Vec2::new(3.0, 0.0)).fuzzy_eq(Vec2::new(3.0, 1.0)));
        assert!(seg_closest_point(v1, v2, Vec2::new(3.0, 1.2)).fuzzy_eq(Vec2::new(3.0, 1.0)));
        assert!(seg_closest_point(v1, v2, v1.pos()).fuzzy_eq(v1.pos()));
    }
}
