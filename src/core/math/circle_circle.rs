use super::Vec2;
use crate::core::traits::Real;

/// Result of intersecting two circles.
#[derive(Debug, Copy, Clone)]
pub enum CircleCircleIntersect<T>
where
    T: Real,
{
    /// No intersect points.
    NoIntersect,
    /// One tangent intersect point.
    TangentIntersect {
        /// The tangent intersect point.
        point: Vec2<T>,
    },
    /// Two intersect points.
    TwoIntersects {
        /// First intersect point.
        point1: Vec2<T>,
        /// Second intersect point.
        point2: Vec2<T>,
    },
    /// Circles have the same center and radius (infinite intersect points).
    Overlapping,
}

/// Finds the intersects between two circles.
pub fn circle_circle_intersect<T>(
    radius1: T,
    center1: Vec2<T>,
    radius2: T,
    center2: Vec2<T>,
) -> CircleCircleIntersect<T>
where
    T: Real,
{
    use CircleCircleIntersect::*;

    let cv = center2 - center1;
    let d2 = cv.dot(cv);
    let d = d2.sqrt();

    if d.fuzzy_eq_zero() {
        // concentric circles
        if radius1.fuzzy_eq(radius2) {
            return Overlapping;
        }
        return NoIntersect;
    }

    if !d.fuzzy_lt(radius1 + radius2) || !d.fuzzy_gt((radius1 - radius2).abs()) {
        // too far apart or one circle contained in the other
        return NoIntersect;
    }

    let rad1_sq = radius1 * radius1;
    let a = (rad1_sq - radius2 * radius2 + d2) / (T::two() * d);
    let midpoint = center1 + cv.scale(a / d);
    let diff = rad1_sq - a * a;

    if diff < T::zero() {
        return TangentIntersect { point: midpoint };
    }

    let h_over_d = diff.sqrt() / d;
    let x_term = h_over_d * cv.y;
    let y_term = h_over_d * cv.x;

    let pt1 = Vec2::new(midpoint.x + x_term, midpoint.y - y_term);
    let pt2 = Vec2::new(midpoint.x - x_term, midpoint.y + y_term);

    if pt1.fuzzy_eq(pt2) {
        return TangentIntersect { point: pt1 };
    }

    TwoIntersects {
        point1: pt1,
        point2: pt2,
    }
}
