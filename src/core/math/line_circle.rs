use super::{min_max, parametric_from_point, Vec2};
use crate::core::traits::Real;

/// Result of intersecting a line segment with a circle.
#[derive(Debug, Copy, Clone)]
pub enum LineCircleIntersect<T>
where
    T: Real,
{
    /// No intersect points.
    NoIntersect,
    /// One tangent intersect point.
    TangentIntersect {
        /// Parametric value on the line segment of the tangent point.
        t0: T,
    },
    /// Two intersect points.
    TwoIntersects {
        /// Parametric value on the line segment of the first intersect point.
        t0: T,
        /// Parametric value on the line segment of the second intersect point.
        t1: T,
    },
}

/// Finds the intersects between the line segment `p0->p1` and a circle.
///
/// Returns parametric solutions for `P(t) = p0 + t * (p1 - p0)`; values outside
/// `[0, 1]` mean the segment must be extended to reach the intersect. Intersects
/// snap to tangency with fuzzy comparing, so a segment very close to grazing the
/// circle yields a single tangent point.
///
/// # Examples
///
/// ```
/// # use contour_offset::core::math::*;
/// let p0 = Vec2::new(0.0, 0.0);
/// let p1 = Vec2::new(1.0, 0.0);
/// if let LineCircleIntersect::TangentIntersect { t0 } =
///     line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 1.0), 1e-5)
/// {
///     assert_eq!(t0, 0.0);
/// } else {
///     unreachable!("expected tangent intersect");
/// }
/// ```
pub fn line_circle_intersect<T>(
    p0: Vec2<T>,
    p1: Vec2<T>,
    radius: T,
    circle_center: Vec2<T>,
    epsilon: T,
) -> LineCircleIntersect<T>
where
    T: Real,
{
    // Solves geometrically with the circle shifted to the origin using the implicit
    // line equation Ax + By + C = 0, then converts the cartesian solutions back to
    // parametric t values. More numerically stable than the quadratic formula route.
    use LineCircleIntersect::*;

    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let h = circle_center.x;
    let k = circle_center.y;

    if p0.fuzzy_eq_eps(p1, epsilon) {
        // degenerate point segment, test if the point lies on the circle
        let xh = (p0.x + p1.x) / T::two() - h;
        let yk = (p0.y + p1.y) / T::two() - k;
        if (xh * xh + yk * yk).fuzzy_eq_eps(radius * radius, epsilon) {
            return TangentIntersect { t0: T::zero() };
        }

        return NoIntersect;
    }

    let p0_shifted = p0 - circle_center;
    let p1_shifted = p1 - circle_center;

    // default epsilon here just avoids division by a too small number, the passed in
    // epsilon would lose precision without affecting the result case
    let (a, b, c) = if dx.fuzzy_eq_zero() {
        // vertical line: x - x_pos = 0
        let x_pos = (p1_shifted.x + p0_shifted.x) / T::two();
        (T::one(), T::zero(), -x_pos)
    } else {
        // slope form m*x - y + (y1 - m*x1) = 0
        let m = dy / dx;
        (m, -T::one(), p1_shifted.y - m * p1_shifted.x)
    };

    let a2_b2 = a * a + b * b;

    // shortest distance from the origin (circle center) to the line
    let shortest_dist = c.abs() / a2_b2.sqrt();

    if shortest_dist > radius + epsilon {
        return NoIntersect;
    }

    // foot of the perpendicular from center, shifted back to real coordinates
    let x0 = -a * c / a2_b2 + h;
    let y0 = -b * c / a2_b2 + k;

    if shortest_dist.fuzzy_eq_eps(radius, epsilon) {
        let t = parametric_from_point(p0, p1, Vec2::new(x0, y0), epsilon);
        return TangentIntersect { t0: t };
    }

    let d = radius * radius - c * c / a2_b2;
    // abs to avoid NaN from a tiny negative under the sqrt
    let mult = (d / a2_b2).abs().sqrt();

    let sol1 = parametric_from_point(p0, p1, Vec2::new(x0 + b * mult, y0 - a * mult), epsilon);
    let sol2 = parametric_from_point(p0, p1, Vec2::new(x0 - b * mult, y0 + a * mult), epsilon);
    let (t0, t1) = min_max(sol1, sol2);
    TwoIntersects { t0, t1 }
}
