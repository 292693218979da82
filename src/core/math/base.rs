use super::Vec2;
use crate::core::traits::Real;

/// Returns `(min, max)` of the two values given.
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Normalize radians to be in the range `[0, 2PI]`, e.g. `-PI/4` becomes `7PI/4`.
///
/// # Examples
///
/// ```
/// # use contour_offset::core::math::*;
/// # use contour_offset::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Returns the smaller signed difference going from `angle1` to `angle2`.
///
/// Result is negative when the closer sweep from `angle1` to `angle2` is clockwise.
///
/// # Examples
///
/// ```
/// # use contour_offset::core::math::*;
/// # use contour_offset::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(delta_angle(0.25 * PI, 0.5 * PI).fuzzy_eq(0.25 * PI));
/// assert!(delta_angle(0.5 * PI, 0.25 * PI).fuzzy_eq(-0.25 * PI));
/// ```
#[inline]
pub fn delta_angle<T>(angle1: T, angle2: T) -> T
where
    T: Real,
{
    let mut diff = normalize_radians(angle2 - angle1);
    if diff > T::pi() {
        diff = diff - T::tau();
    }

    diff
}

/// Same as [delta_angle] but with the sign forced by the `negative` parameter.
///
/// Useful for the edge case of a PI difference where the polarity returned by
/// [delta_angle] is arbitrary.
#[inline]
pub fn delta_angle_signed<T>(angle1: T, angle2: T, negative: bool) -> T
where
    T: Real,
{
    let diff = delta_angle(angle1, angle2);
    if negative {
        -diff.abs()
    } else {
        diff.abs()
    }
}

/// Tests if `test_angle` lies within the `sweep_angle` starting at `start_angle`.
///
/// Positive `sweep_angle` sweeps counter clockwise, negative sweeps clockwise.
/// `epsilon` controls fuzzy inclusion at the sweep boundaries.
#[inline]
pub fn angle_is_within_sweep_eps<T>(test_angle: T, start_angle: T, sweep_angle: T, epsilon: T) -> bool
where
    T: Real,
{
    let (a1, a2) = if sweep_angle < T::zero() {
        (start_angle + sweep_angle, start_angle)
    } else {
        (start_angle, start_angle + sweep_angle)
    };

    let end_sweep = normalize_radians(a2 - a1);
    let test_sweep = normalize_radians(test_angle - a1);
    test_sweep < end_sweep + epsilon
}

/// Same as [angle_is_within_sweep_eps] using the default fuzzy epsilon.
#[inline]
pub fn angle_is_within_sweep<T>(test_angle: T, start_angle: T, sweep_angle: T) -> bool
where
    T: Real,
{
    angle_is_within_sweep_eps(test_angle, start_angle, sweep_angle, T::fuzzy_epsilon())
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vec2<T>, p1: Vec2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Angle of the direction vector going from `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vec2<T>, p1: Vec2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Midpoint of the line segment going from `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vec2<T>, p1: Vec2<T>) -> Vec2<T>
where
    T: Real,
{
    Vec2::new((p0.x + p1.x) / T::two(), (p0.y + p1.y) / T::two())
}

/// Point on the circle with `radius` and `center` at polar `angle` radians.
#[inline]
pub fn point_on_circle<T>(radius: T, center: Vec2<T>, angle: T) -> Vec2<T>
where
    T: Real,
{
    let (s, c) = angle.sin_cos();
    Vec2::new(center.x + radius * c, center.y + radius * s)
}

/// Point on the line segment going from `p0` to `p1` at parametric value `t`.
#[inline]
pub fn point_from_parametric<T>(p0: Vec2<T>, p1: Vec2<T>, t: T) -> Vec2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Parametric value on the line going from `p0` to `p1` at the `point` given.
///
/// Assumes `point` lies on the line; vertical lines are handled by switching to the
/// y coordinate using `epsilon` to fuzzy compare `p0.x` with `p1.x`.
#[inline]
pub fn parametric_from_point<T>(p0: Vec2<T>, p1: Vec2<T>, point: Vec2<T>, epsilon: T) -> T
where
    T: Real,
{
    if p0.x.fuzzy_eq_eps(p1.x, epsilon) {
        // vertical segment, use y coordinate
        (point.y - p0.y) / (p1.y - p0.y)
    } else {
        (point.x - p0.x) / (p1.x - p0.x)
    }
}

/// Closest point on the line segment going from `p0` to `p1` to the `point` given.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vec2<T>, p1: Vec2<T>, point: Vec2<T>) -> Vec2<T>
where
    T: Real,
{
    // project point onto segment direction, clamping to the end points
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 < T::fuzzy_epsilon() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 < c1 + T::fuzzy_epsilon() {
        return p1;
    }

    p0 + v.scale(c1 / c2)
}

#[inline]
fn perp_dot_test<T>(p0: Vec2<T>, p1: Vec2<T>, point: Vec2<T>) -> T
where
    T: Real,
{
    (p1.x - p0.x) * (point.y - p0.y) - (p1.y - p0.y) * (point.x - p0.x)
}

/// Returns true if `point` is left of, or fuzzy coincident with, the direction vector
/// defined by `p1 - p0`. `epsilon` controls the fuzzy compare.
#[inline]
pub fn is_left_or_coincident_eps<T>(p0: Vec2<T>, p1: Vec2<T>, point: Vec2<T>, epsilon: T) -> bool
where
    T: Real,
{
    perp_dot_test(p0, p1, point) > -epsilon
}

/// Returns true if `point` is right of, or fuzzy coincident with, the direction vector
/// defined by `p1 - p0`. `epsilon` controls the fuzzy compare.
#[inline]
pub fn is_right_or_coincident_eps<T>(p0: Vec2<T>, p1: Vec2<T>, point: Vec2<T>, epsilon: T) -> bool
where
    T: Real,
{
    perp_dot_test(p0, p1, point) < epsilon
}

/// Test if a `point` is within the angular sweep region of an arc.
///
/// The arc is defined by `center`, `arc_start`, `arc_end`, and direction flag
/// `is_clockwise`. The region is the cone formed by projecting the sweep outward
/// with infinite radius, fuzzy inclusive at the boundaries.
///
/// # Examples
/// ```
/// # use contour_offset::core::math::*;
/// // sweep covering all of quadrant I (x positive, y positive)
/// let center = Vec2::new(0.0, 0.0);
/// let arc_start = Vec2::new(1.0, 0.0);
/// let arc_end = Vec2::new(0.0, 1.0);
/// assert!(point_in_arc_sweep(center, arc_start, arc_end, false, Vec2::new(1.0, 1.0)));
/// assert!(point_in_arc_sweep(center, arc_start, arc_end, false, Vec2::new(1.0, 0.0)));
/// ```
#[inline]
pub fn point_in_arc_sweep<T>(
    center: Vec2<T>,
    arc_start: Vec2<T>,
    arc_end: Vec2<T>,
    is_clockwise: bool,
    point: Vec2<T>,
) -> bool
where
    T: Real,
{
    let eps = T::fuzzy_epsilon();
    if is_clockwise {
        is_right_or_coincident_eps(center, arc_start, point, eps)
            && is_left_or_coincident_eps(center, arc_end, point, eps)
    } else {
        is_left_or_coincident_eps(center, arc_start, point, eps)
            && is_right_or_coincident_eps(center, arc_end, point, eps)
    }
}

/// Returns the bulge for the given arc `sweep_angle` (`bulge = tan(sweep_angle / 4)`).
///
/// A negative `sweep_angle` yields a negative (clockwise) bulge.
#[inline]
pub fn bulge_from_angle<T>(sweep_angle: T) -> T
where
    T: Real,
{
    (sweep_angle / T::four()).tan()
}

/// Returns the arc sweep angle for the given `bulge` (`sweep_angle = 4 * atan(bulge)`).
#[inline]
pub fn angle_from_bulge<T>(bulge: T) -> T
where
    T: Real,
{
    T::four() * bulge.atan()
}
