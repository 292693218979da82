use super::{arc_radius_and_center, Vertex};
use crate::core::{
    math::{
        angle, angle_from_bulge, angle_is_within_sweep, circle_circle_intersect, delta_angle,
        dist_squared, line_circle_intersect, line_line_intersect, normalize_radians,
        point_from_parametric, point_in_arc_sweep, CircleCircleIntersect, LineCircleIntersect,
        LineLineIntersect, Vec2,
    },
    traits::Real,
};

/// Result of intersecting two contour segments.
#[derive(Debug, Copy, Clone)]
pub enum SegIntersect<T>
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
    /// One non-tangent intersect point.
    OneIntersect {
        /// The intersect point.
        point: Vec2<T>,
    },
    /// Two intersect points.
    TwoIntersects {
        /// First intersect point (ordered by the second segment's direction).
        point1: Vec2<T>,
        /// Second intersect point (ordered by the second segment's direction).
        point2: Vec2<T>,
    },
    /// Both segments are lines and they are collinear over a shared interval.
    CoincidentLines {
        /// Start of the shared interval (by the second segment's direction).
        point1: Vec2<T>,
        /// End of the shared interval (by the second segment's direction).
        point2: Vec2<T>,
    },
    /// Both segments are arcs on the same circle sharing a sweep interval.
    CoincidentArcs {
        /// Start of the shared interval (by the second segment's direction).
        point1: Vec2<T>,
        /// End of the shared interval (by the second segment's direction).
        point2: Vec2<T>,
    },
}

/// Finds the intersects between the contour segments `v1->v2` and `u1->u2`.
///
/// Dispatches on the line/arc type pair of the segments. `pos_equal_eps` is the
/// epsilon used for position comparisons.
pub fn seg_intersect<T>(
    v1: Vertex<T>,
    v2: Vertex<T>,
    u1: Vertex<T>,
    u2: Vertex<T>,
    pos_equal_eps: T,
) -> SegIntersect<T>
where
    T: Real,
{
    use SegIntersect::*;
    let v_is_line = v1.bulge_is_zero();
    let u_is_line = u1.bulge_is_zero();

    if v_is_line && u_is_line {
        return match line_line_intersect(v1.pos(), v2.pos(), u1.pos(), u2.pos(), pos_equal_eps) {
            LineLineIntersect::NoIntersect | LineLineIntersect::FalseIntersect { .. } => {
                NoIntersect
            }
            LineLineIntersect::TrueIntersect { t1, .. } => OneIntersect {
                point: point_from_parametric(v1.pos(), v2.pos(), t1),
            },
            LineLineIntersect::Coincident { t0, t1 } => CoincidentLines {
                point1: point_from_parametric(u1.pos(), u2.pos(), t0),
                point2: point_from_parametric(u1.pos(), u2.pos(), t1),
            },
        };
    }

    // line vs arc in either order
    let process_line_arc =
        |p0: Vec2<T>, p1: Vec2<T>, a1: Vertex<T>, a2: Vertex<T>| -> SegIntersect<T> {
            let (arc_radius, arc_center) = arc_radius_and_center(a1, a2);

            let point_in_sweep = |t: T| -> Option<Vec2<T>> {
                if !t.fuzzy_in_range(T::zero(), T::one()) {
                    return None;
                }

                let p = point_from_parametric(p0, p1, t);
                if point_in_arc_sweep(arc_center, a1.pos(), a2.pos(), a1.bulge_is_neg(), p) {
                    Some(p)
                } else {
                    None
                }
            };

            match line_circle_intersect(p0, p1, arc_radius, arc_center, pos_equal_eps) {
                LineCircleIntersect::NoIntersect => NoIntersect,
                LineCircleIntersect::TangentIntersect { t0 } => match point_in_sweep(t0) {
                    Some(point) => TangentIntersect { point },
                    None => NoIntersect,
                },
                LineCircleIntersect::TwoIntersects { t0, t1 } => {
                    match (point_in_sweep(t0), point_in_sweep(t1)) {
                        (None, None) => NoIntersect,
                        (None, Some(point)) | (Some(point), None) => OneIntersect { point },
                        (Some(point1), Some(point2)) => {
                            // order the points by the second segment's direction
                            if u_is_line
                                || dist_squared(point1, a1.pos()) < dist_squared(point2, a1.pos())
                            {
                                TwoIntersects { point1, point2 }
                            } else {
                                TwoIntersects {
                                    point1: point2,
                                    point2: point1,
                                }
                            }
                        }
                    }
                }
            }
        };

    if v_is_line {
        return process_line_arc(v1.pos(), v2.pos(), u1, u2);
    }

    if u_is_line {
        return process_line_arc(u1.pos(), u2.pos(), v1, v2);
    }

    // both arcs
    let (arc1_radius, arc1_center) = arc_radius_and_center(v1, v2);
    let (arc2_radius, arc2_center) = arc_radius_and_center(u1, u2);

    let in_both_sweeps = |pt: Vec2<T>| -> bool {
        point_in_arc_sweep(arc1_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), pt)
            && point_in_arc_sweep(arc2_center, u1.pos(), u2.pos(), u1.bulge_is_neg(), pt)
    };

    match circle_circle_intersect(arc1_radius, arc1_center, arc2_radius, arc2_center) {
        CircleCircleIntersect::NoIntersect => NoIntersect,
        CircleCircleIntersect::TangentIntersect { point } => {
            if in_both_sweeps(point) {
                TangentIntersect { point }
            } else {
                NoIntersect
            }
        }
        CircleCircleIntersect::TwoIntersects { point1, point2 } => {
            let pt1_in_sweeps = in_both_sweeps(point1);
            let pt2_in_sweeps = in_both_sweeps(point2);
            if pt1_in_sweeps && pt2_in_sweeps {
                TwoIntersects { point1, point2 }
            } else if pt1_in_sweeps {
                OneIntersect { point: point1 }
            } else if pt2_in_sweeps {
                OneIntersect { point: point2 }
            } else {
                NoIntersect
            }
        }
        CircleCircleIntersect::Overlapping => {
            overlapping_arcs_intersect(v1, v2, u1, u2, arc1_center, arc2_center)
        }
    }
}

/// Determines how two arcs lying on the same circle intersect along their sweeps.
fn overlapping_arcs_intersect<T>(
    v1: Vertex<T>,
    v2: Vertex<T>,
    u1: Vertex<T>,
    u2: Vertex<T>,
    arc1_center: Vec2<T>,
    arc2_center: Vec2<T>,
) -> SegIntersect<T>
where
    T: Real,
{
    use SegIntersect::*;

    let start_and_sweep = |sp: Vec2<T>, center: Vec2<T>, bulge: T| -> (T, T) {
        (normalize_radians(angle(center, sp)), angle_from_bulge(bulge))
    };

    // make both sweeps go the same direction to simplify the containment checks
    let same_direction = v1.bulge_is_neg() == u1.bulge_is_neg();
    let (arc1_start, arc1_sweep) = start_and_sweep(v1.pos(), arc1_center, v1.bulge);
    let (arc2_start, arc2_sweep) = if same_direction {
        start_and_sweep(u1.pos(), arc2_center, u1.bulge)
    } else {
        start_and_sweep(u2.pos(), arc2_center, -u1.bulge)
    };

    let arc1_end = arc1_start + arc1_sweep;
    let arc2_end = arc2_start + arc2_sweep;

    // check if the arcs only touch at their end points (since sweeps go the same
    // direction only the start/end delta angles need testing)
    if delta_angle(arc1_start, arc2_end).fuzzy_eq_zero() {
        return if arc1_sweep.fuzzy_eq(arc2_sweep) {
            // non-overlapping half circles of the same circle
            TwoIntersects {
                point1: u1.pos(),
                point2: u2.pos(),
            }
        } else {
            OneIntersect { point: v1.pos() }
        };
    }

    if delta_angle(arc2_start, arc1_end).fuzzy_eq_zero() {
        return if arc1_sweep.fuzzy_eq(arc2_sweep) {
            TwoIntersects {
                point1: u1.pos(),
                point2: u2.pos(),
            }
        } else {
            OneIntersect { point: u1.pos() }
        };
    }

    let arc2_starts_in_arc1 = angle_is_within_sweep(arc2_start, arc1_start, arc1_sweep);
    let arc2_ends_in_arc1 = angle_is_within_sweep(arc2_end, arc1_start, arc1_sweep);
    if arc2_starts_in_arc1 && arc2_ends_in_arc1 {
        // arc2 fully overlapped by arc1
        return CoincidentArcs {
            point1: u1.pos(),
            point2: u2.pos(),
        };
    }
    if arc2_starts_in_arc1 {
        return CoincidentArcs {
            point1: u1.pos(),
            point2: v2.pos(),
        };
    }
    if arc2_ends_in_arc1 {
        return CoincidentArcs {
            point1: v1.pos(),
            point2: u2.pos(),
        };
    }

    if angle_is_within_sweep(arc1_start, arc2_start, arc2_sweep) {
        // arc1 fully overlapped by arc2, order the points by the second segment's
        // direction
        return if same_direction {
            CoincidentArcs {
                point1: v1.pos(),
                point2: v2.pos(),
            }
        } else {
            CoincidentArcs {
                point1: v2.pos(),
                point2: v1.pos(),
            }
        };
    }

    NoIntersect
}
