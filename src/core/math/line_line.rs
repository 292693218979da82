use super::{parametric_from_point, Vec2};
use crate::core::traits::Real;

/// Result of intersecting two line segments.
#[derive(Debug, Copy, Clone)]
pub enum LineLineIntersect<T>
where
    T: Real,
{
    /// No intersect (lines are parallel and not collinear, or degenerate and apart).
    NoIntersect,
    /// Single intersect point lying within both segments.
    TrueIntersect {
        /// Parametric value of the intersect on the first segment.
        t1: T,
        /// Parametric value of the intersect on the second segment.
        t2: T,
    },
    /// The lines intersect but one or both segments would have to be extended to reach
    /// the intersect point.
    FalseIntersect {
        /// Parametric value of the intersect on the first segment.
        t1: T,
        /// Parametric value of the intersect on the second segment.
        t2: T,
    },
    /// Segments are collinear and share a sub-interval.
    Coincident {
        /// Parametric value on the second segment where the shared interval begins.
        t0: T,
        /// Parametric value on the second segment where the shared interval ends.
        t1: T,
    },
}

/// Finds the intersect between the line segments `v1->v2` and `u1->u2`.
///
/// Parametric values use the segment equation `P(t) = p0 + t * (p1 - p0)`, so a value
/// in `[0, 1]` lies within the segment. Degenerate (point) segments, parallel lines,
/// and collinear overlap are all handled explicitly. Parametric comparisons are scaled
/// by the segment lengths before applying `epsilon` so the tolerance acts at position
/// scale rather than parametric scale.
///
/// # Examples
///
/// ```
/// # use contour_offset::core::traits::*;
/// # use contour_offset::core::math::*;
/// let v1 = Vec2::new(0.0, 0.0);
/// let v2 = Vec2::new(1.0, 0.0);
/// let u1 = Vec2::new(0.5, -1.0);
/// let u2 = Vec2::new(0.5, 1.0);
/// if let LineLineIntersect::TrueIntersect { t1, t2 } = line_line_intersect(v1, v2, u1, u2, 1e-5) {
///     assert!(t1.fuzzy_eq(0.5));
///     assert!(t2.fuzzy_eq(0.5));
/// } else {
///     unreachable!("expected true intersect");
/// }
/// ```
pub fn line_line_intersect<T>(
    v1: Vec2<T>,
    v2: Vec2<T>,
    u1: Vec2<T>,
    u2: Vec2<T>,
    epsilon: T,
) -> LineLineIntersect<T>
where
    T: Real,
{
    // Solved in parametric form using perpendicular dot products.
    use LineLineIntersect::*;

    let v = v2 - v1;
    let u = u2 - u1;
    let v_pdot_u = v.perp_dot(u);
    let w = v1 - u1;

    let seg1_length = v.length();
    let seg2_length = u.length();

    if !v_pdot_u.fuzzy_eq_zero_eps(epsilon) {
        // not parallel, single line intersect point
        let t1 = u.perp_dot(w) / v_pdot_u;
        let t2 = v.perp_dot(w) / v_pdot_u;
        if !(t1 * seg1_length).fuzzy_in_range_eps(T::zero(), seg1_length, epsilon)
            || !(t2 * seg2_length).fuzzy_in_range_eps(T::zero(), seg2_length, epsilon)
        {
            return FalseIntersect { t1, t2 };
        }
        return TrueIntersect { t1, t2 };
    }

    // parallel and possibly collinear
    let v_pdot_w = v.perp_dot(w);
    let u_pdot_w = u.perp_dot(w);
    if !v_pdot_w.fuzzy_eq_zero_eps(epsilon) || !u_pdot_w.fuzzy_eq_zero_eps(epsilon) {
        // parallel but not collinear
        return NoIntersect;
    }

    // collinear or degenerate (one or both segments are points)
    let v_is_point = v1.fuzzy_eq_eps(v2, epsilon);
    let u_is_point = u1.fuzzy_eq_eps(u2, epsilon);

    if v_is_point && u_is_point {
        return if v1.fuzzy_eq_eps(u1, epsilon) {
            TrueIntersect {
                t1: T::zero(),
                t2: T::zero(),
            }
        } else {
            NoIntersect
        };
    }

    if v_is_point {
        let t2 = parametric_from_point(u1, u2, v1, epsilon);
        if (t2 * seg2_length).fuzzy_in_range_eps(T::zero(), seg2_length, epsilon) {
            return TrueIntersect {
                t1: T::zero(),
                t2,
            };
        }
        return NoIntersect;
    }

    if u_is_point {
        let t1 = parametric_from_point(v1, v2, u1, epsilon);
        if (t1 * seg1_length).fuzzy_in_range_eps(T::zero(), seg1_length, epsilon) {
            return TrueIntersect {
                t1,
                t2: T::zero(),
            };
        }
        return NoIntersect;
    }

    // neither segment is a point, check for overlap along the shared line, expressing
    // the first segment's end points parametrically on the second segment
    let w2 = v2 - u1;
    let (mut t0, mut t1) = if u.x.fuzzy_eq_zero_eps(epsilon) {
        (w.y / u.y, w2.y / u.y)
    } else {
        (w.x / u.x, w2.x / u.x)
    };

    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    // sticky inclusion so end to end touching counts as an intersect
    if !(t0 * seg2_length).fuzzy_lt_eps(seg2_length, epsilon)
        || !(t1 * seg2_length).fuzzy_gt_eps(T::zero(), epsilon)
    {
        return NoIntersect;
    }

    let t0 = num_traits::real::Real::max(t0, T::zero());
    let t1 = num_traits::real::Real::min(t1, T::one());

    if ((t1 - t0) * seg2_length).fuzzy_eq_zero_eps(epsilon) {
        // shared interval is a single point (segments touch end to end)
        let seg1_t = if v1.fuzzy_eq_eps(u1, epsilon) || v1.fuzzy_eq_eps(u2, epsilon) {
            T::zero()
        } else {
            T::one()
        };
        return TrueIntersect {
            t1: seg1_t,
            t2: t0,
        };
    }

    Coincident { t0, t1 }
}
