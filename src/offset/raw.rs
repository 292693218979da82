//! Raw offset generation: per-segment parallel offsetting and the four join rules
//! connecting consecutive offset segments into one continuous contour.

use crate::contour::{arc_radius_and_center, Contour, Vertex};
use crate::core::{
    math::{
        angle, bulge_from_angle, circle_circle_intersect, delta_angle, delta_angle_signed,
        dist_squared, line_circle_intersect, line_line_intersect, point_from_parametric,
        point_in_arc_sweep, CircleCircleIntersect, LineCircleIntersect, LineLineIntersect, Vec2,
    },
    traits::Real,
};

/// A single contour segment after parallel offsetting, before joining and trimming.
#[derive(Debug, Copy, Clone)]
pub struct OffsetSeg<T>
where
    T: Real,
{
    /// Offset segment start vertex.
    pub v1: Vertex<T>,
    /// Offset segment end vertex.
    pub v2: Vertex<T>,
    /// Corner point on the original contour this segment ended at (used as the center
    /// when joining with a connecting arc).
    pub orig_corner: Vec2<T>,
    /// True if the segment was an arc whose offset radius collapsed to zero or below,
    /// turning it into a degenerate bulge-0 segment.
    pub collapsed_arc: bool,
}

/// Creates the untrimmed parallel offset counterpart of every segment of `contour`.
///
/// A positive `offset` shifts each segment to the right of its direction of travel
/// (an outset for counter clockwise closed contours), a negative offset shifts left.
/// Near zero length input segments are skipped.
pub fn raw_offset_segs<T>(contour: &Contour<T>, offset: T, pos_equal_eps: T) -> Vec<OffsetSeg<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    if contour.len() < 2 {
        return result;
    }

    result.reserve(contour.segment_count());

    let line_seg = |v1: Vertex<T>, v2: Vertex<T>| -> OffsetSeg<T> {
        let line_v = v2.pos() - v1.pos();
        let offset_v = line_v.unit_perp().scale(-offset);
        OffsetSeg {
            v1: Vertex::from_vec2(v1.pos() + offset_v, T::zero()),
            v2: Vertex::from_vec2(v2.pos() + offset_v, T::zero()),
            orig_corner: v2.pos(),
            collapsed_arc: false,
        }
    };

    let arc_seg = |v1: Vertex<T>, v2: Vertex<T>| -> OffsetSeg<T> {
        let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
        let offs = if v1.bulge_is_neg() { -offset } else { offset };
        let radius_after_offset = arc_radius + offs;
        let v1_to_center = (v1.pos() - arc_center).normalize();
        let v2_to_center = (v2.pos() - arc_center).normalize();

        // collapsed arcs become degenerate bulge-0 segments so downstream
        // intersection math stays well defined
        let (new_v1_bulge, collapsed_arc) = if radius_after_offset.fuzzy_lt(T::zero()) {
            (T::zero(), true)
        } else {
            (v1.bulge, false)
        };

        OffsetSeg {
            v1: Vertex::from_vec2(v1_to_center.scale(offs) + v1.pos(), new_v1_bulge),
            v2: Vertex::from_vec2(v2_to_center.scale(offs) + v2.pos(), v2.bulge),
            orig_corner: v2.pos(),
            collapsed_arc,
        }
    };

    for (v1, v2) in contour.iter_segments() {
        if v1.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
            // near zero length segment, nothing to offset
            continue;
        }
        if v1.bulge_is_zero() {
            result.push(line_seg(v1, v2));
        } else {
            result.push(arc_seg(v1, v2));
        }
    }

    result
}

/// True if parametric `t` requires extending the segment to reach the intersect.
#[inline]
fn false_intersect<T>(t: T) -> bool
where
    T: Real,
{
    t < T::zero() || t > T::one()
}

/// Bulge of the arc centered at `arc_center` sweeping from `start_point` to
/// `end_point` in the direction given by `is_ccw`.
#[inline]
fn connection_bulge<T>(arc_center: Vec2<T>, start_point: Vec2<T>, end_point: Vec2<T>, is_ccw: bool) -> T
where
    T: Real,
{
    let a1 = angle(arc_center, start_point);
    let a2 = angle(arc_center, end_point);
    bulge_from_angle(delta_angle_signed(a1, a2, !is_ccw))
}

/// Joins two raw offset segments with an arc centered at the original corner point
/// between them, pushing the join vertexes onto `result`.
fn connect_with_arc<T>(
    s1: &OffsetSeg<T>,
    s2: &OffsetSeg<T>,
    connection_arcs_ccw: bool,
    result: &mut Contour<T>,
    pos_equal_eps: T,
) where
    T: Real,
{
    let arc_center = s1.orig_corner;
    let sp = s1.v2.pos();
    let ep = s2.v1.pos();
    let bulge = connection_bulge(arc_center, sp, ep, connection_arcs_ccw);
    result.add_or_replace(sp.x, sp.y, bulge, pos_equal_eps);
    result.add_or_replace(ep.x, ep.y, s2.v1.bulge, pos_equal_eps);
}

fn join_line_line<T>(
    s1: &OffsetSeg<T>,
    s2: &OffsetSeg<T>,
    connection_arcs_ccw: bool,
    pos_equal_eps: T,
    result: &mut Contour<T>,
) where
    T: Real,
{
    let v1 = &s1.v1;
    let v2 = &s1.v2;
    let u1 = &s2.v1;
    let u2 = &s2.v2;

    debug_assert!(
        v1.bulge_is_zero() && u1.bulge_is_zero(),
        "both segments should be lines"
    );

    if s1.collapsed_arc || s2.collapsed_arc {
        // joining to/from a collapsed arc, always use a connecting arc
        connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
        return;
    }

    match line_line_intersect(v1.pos(), v2.pos(), u1.pos(), u2.pos(), pos_equal_eps) {
        LineLineIntersect::NoIntersect => {
            // parallel segments (e.g. an anti-parallel retrace), join with a half
            // circle around the corner, a straight join here would cut across the
            // original contour and silently drop valid geometry
            let sp = s1.v2.pos();
            let ep = s2.v1.pos();
            let bulge = if connection_arcs_ccw { T::one() } else { -T::one() };
            result.add_or_replace(sp.x, sp.y, bulge, pos_equal_eps);
            result.add_or_replace(ep.x, ep.y, s2.v1.bulge, pos_equal_eps);
        }
        LineLineIntersect::TrueIntersect { t1, .. } => {
            let intr_point = point_from_parametric(v1.pos(), v2.pos(), t1);
            result.add_or_replace(intr_point.x, intr_point.y, T::zero(), pos_equal_eps);
        }
        LineLineIntersect::Coincident { .. } => {
            result.add_or_replace(v2.x, v2.y, T::zero(), pos_equal_eps);
        }
        LineLineIntersect::FalseIntersect { t1, t2 } => {
            if t1 > T::one() && false_intersect(t2) {
                // the intersect lies beyond both segments, extend by joining with arc
                connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
            } else {
                result.add_or_replace(v2.x, v2.y, T::zero(), pos_equal_eps);
                result.add_or_replace(u1.x, u1.y, u1.bulge, pos_equal_eps);
            }
        }
    }
}

fn join_line_arc<T>(
    s1: &OffsetSeg<T>,
    s2: &OffsetSeg<T>,
    connection_arcs_ccw: bool,
    pos_equal_eps: T,
    result: &mut Contour<T>,
) where
    T: Real,
{
    let v1 = &s1.v1;
    let v2 = &s1.v2;
    let u1 = &s2.v1;
    let u2 = &s2.v2;

    debug_assert!(
        v1.bulge_is_zero() && !u1.bulge_is_zero(),
        "first segment should be a line, second an arc"
    );

    let (arc_radius, arc_center) = arc_radius_and_center(*u1, *u2);

    let mut process_intersect = |t: T, intersect: Vec2<T>| {
        let true_line_intr = !false_intersect(t);
        let true_arc_intr =
            point_in_arc_sweep(arc_center, u1.pos(), u2.pos(), u1.bulge_is_neg(), intersect);

        if true_line_intr && true_arc_intr {
            // trim the arc to start at the intersect
            let a = angle(arc_center, intersect);
            let arc_end_angle = angle(arc_center, u2.pos());
            let theta = delta_angle(a, arc_end_angle);
            // only update the bulge if the trimmed sweep keeps the arc's direction
            // (sign may flip when the intersect is at the very end of the arc)
            if (theta > T::zero()) == u1.bulge_is_pos() {
                result.add_or_replace(intersect.x, intersect.y, bulge_from_angle(theta), pos_equal_eps);
            } else {
                result.add_or_replace(intersect.x, intersect.y, u1.bulge, pos_equal_eps);
            }
            return;
        }

        if t > T::one() && !true_arc_intr {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
            return;
        }

        if s1.collapsed_arc {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
            return;
        }

        // join with a straight line
        result.add_or_replace(v2.x, v2.y, T::zero(), pos_equal_eps);
        result.add_or_replace_vertex(*u1, pos_equal_eps);
    };

    match line_circle_intersect(v1.pos(), v2.pos(), arc_radius, arc_center, pos_equal_eps) {
        LineCircleIntersect::NoIntersect => {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
        }
        LineCircleIntersect::TangentIntersect { t0 } => {
            process_intersect(t0, point_from_parametric(v1.pos(), v2.pos(), t0));
        }
        LineCircleIntersect::TwoIntersects { t0, t1 } => {
            // pick the intersect closest to the original corner point
            let intr1 = point_from_parametric(v1.pos(), v2.pos(), t0);
            let intr2 = point_from_parametric(v1.pos(), v2.pos(), t1);
            if dist_squared(intr1, s1.orig_corner) < dist_squared(intr2, s1.orig_corner) {
                process_intersect(t0, intr1);
            } else {
                process_intersect(t1, intr2);
            }
        }
    }
}

fn join_arc_line<T>(
    s1: &OffsetSeg<T>,
    s2: &OffsetSeg<T>,
    connection_arcs_ccw: bool,
    pos_equal_eps: T,
    result: &mut Contour<T>,
) where
    T: Real,
{
    let v1 = &s1.v1;
    let v2 = &s1.v2;
    let u1 = &s2.v1;
    let u2 = &s2.v2;

    debug_assert!(
        !v1.bulge_is_zero() && u1.bulge_is_zero(),
        "first segment should be an arc, second a line"
    );

    let (arc_radius, arc_center) = arc_radius_and_center(*v1, *v2);

    let mut process_intersect = |t: T, intersect: Vec2<T>| {
        let true_line_intr = !false_intersect(t);
        let true_arc_intr =
            point_in_arc_sweep(arc_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), intersect);

        if !(true_line_intr && true_arc_intr) {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
            return;
        }

        let prev_vertex = *result.last().unwrap();
        if !prev_vertex.bulge_is_zero() && !prev_vertex.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps)
        {
            // trim the arc already in the result to end at the intersect
            let a = angle(arc_center, intersect);
            let (_, prev_arc_center) = arc_radius_and_center(prev_vertex, *v2);
            let prev_arc_start_angle = angle(prev_arc_center, prev_vertex.pos());
            let updated_prev_theta = delta_angle(prev_arc_start_angle, a);
            // only update the bulge if the trimmed sweep keeps the arc's direction
            if (updated_prev_theta > T::zero()) == prev_vertex.bulge_is_pos() {
                result.last_mut().unwrap().bulge = bulge_from_angle(updated_prev_theta);
            }
        }

        result.add_or_replace(intersect.x, intersect.y, T::zero(), pos_equal_eps);
    };

    match line_circle_intersect(u1.pos(), u2.pos(), arc_radius, arc_center, pos_equal_eps) {
        LineCircleIntersect::NoIntersect => {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
        }
        LineCircleIntersect::TangentIntersect { t0 } => {
            process_intersect(t0, point_from_parametric(u1.pos(), u2.pos(), t0));
        }
        LineCircleIntersect::TwoIntersects { t0, t1 } => {
            // pick the intersect closest to the original corner point (or the line
            // start when the line came from a collapsed arc)
            let orig_point = if s2.collapsed_arc {
                u1.pos()
            } else {
                s1.orig_corner
            };
            let intr1 = point_from_parametric(u1.pos(), u2.pos(), t0);
            let intr2 = point_from_parametric(u1.pos(), u2.pos(), t1);
            if dist_squared(intr1, orig_point) < dist_squared(intr2, orig_point) {
                process_intersect(t0, intr1);
            } else {
                process_intersect(t1, intr2);
            }
        }
    }
}

fn join_arc_arc<T>(
    s1: &OffsetSeg<T>,
    s2: &OffsetSeg<T>,
    connection_arcs_ccw: bool,
    pos_equal_eps: T,
    result: &mut Contour<T>,
) where
    T: Real,
{
    let v1 = &s1.v1;
    let v2 = &s1.v2;
    let u1 = &s2.v1;
    let u2 = &s2.v2;

    debug_assert!(
        !v1.bulge_is_zero() && !u1.bulge_is_zero(),
        "both segments should be arcs"
    );

    let (arc1_radius, arc1_center) = arc_radius_and_center(*v1, *v2);
    let (arc2_radius, arc2_center) = arc_radius_and_center(*u1, *u2);

    let mut process_intersect = |intersect: Vec2<T>| {
        let in_arc1_sweep =
            point_in_arc_sweep(arc1_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), intersect);
        let in_arc2_sweep =
            point_in_arc_sweep(arc2_center, u1.pos(), u2.pos(), u1.bulge_is_neg(), intersect);

        if !(in_arc1_sweep && in_arc2_sweep) {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
            return;
        }

        let prev_vertex = *result.last().unwrap();
        if !prev_vertex.bulge_is_zero() && !prev_vertex.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps)
        {
            // trim the first arc (already in the result) to end at the intersect
            let a1 = angle(arc1_center, intersect);
            let (_, prev_arc_center) = arc_radius_and_center(prev_vertex, *v2);
            let prev_arc_start_angle = angle(prev_arc_center, prev_vertex.pos());
            let updated_prev_theta = delta_angle(prev_arc_start_angle, a1);
            // only update the bulge if the trimmed sweep keeps the arc's direction
            if (updated_prev_theta > T::zero()) == prev_vertex.bulge_is_pos() {
                result.last_mut().unwrap().bulge = bulge_from_angle(updated_prev_theta);
            }
        }

        // add the vertex at the trim/join point, the second arc now starts here
        let a2 = angle(arc2_center, intersect);
        let end_angle = angle(arc2_center, u2.pos());
        let theta = delta_angle(a2, end_angle);
        if (theta > T::zero()) == u1.bulge_is_pos() {
            result.add_or_replace(intersect.x, intersect.y, bulge_from_angle(theta), pos_equal_eps);
        } else {
            result.add_or_replace(intersect.x, intersect.y, u1.bulge, pos_equal_eps);
        }
    };

    match circle_circle_intersect(arc1_radius, arc1_center, arc2_radius, arc2_center) {
        CircleCircleIntersect::NoIntersect => {
            connect_with_arc(s1, s2, connection_arcs_ccw, result, pos_equal_eps);
        }
        CircleCircleIntersect::TangentIntersect { point } => {
            process_intersect(point);
        }
        CircleCircleIntersect::TwoIntersects { point1, point2 } => {
            // pick the intersect closest to the original corner point
            if dist_squared(point1, s1.orig_corner) < dist_squared(point2, s1.orig_corner) {
                process_intersect(point1);
            } else {
                process_intersect(point2);
            }
        }
        CircleCircleIntersect::Overlapping => {
            // same radius and center, nothing to trim or extend
            result.add_or_replace_vertex(*u1, pos_equal_eps);
        }
    }
}

/// Creates the raw offset contour: every segment offset then joined in order (with
/// the wrap around join for closed contours).
///
/// The result generally self intersects and crosses the original contour, slicing
/// and stitching turn it into the final valid offset results.
pub fn raw_offset_contour<T>(contour: &Contour<T>, offset: T, pos_equal_eps: T) -> Contour<T>
where
    T: Real,
{
    if contour.len() < 2 {
        return Contour::new();
    }

    let segs = raw_offset_segs(contour, offset, pos_equal_eps);
    if segs.is_empty() {
        return Contour::new();
    }

    // single collapsed arc cannot produce an offset
    if segs.len() == 1 && segs[0].collapsed_arc {
        return Contour::new();
    }

    let connection_arcs_ccw = offset > T::zero();

    let join_seg_pair = |s1: &OffsetSeg<T>, s2: &OffsetSeg<T>, result: &mut Contour<T>| {
        let s1_is_line = s1.v1.bulge_is_zero();
        let s2_is_line = s2.v1.bulge_is_zero();
        match (s1_is_line, s2_is_line) {
            (true, true) => join_line_line(s1, s2, connection_arcs_ccw, pos_equal_eps, result),
            (true, false) => join_line_arc(s1, s2, connection_arcs_ccw, pos_equal_eps, result),
            (false, true) => join_arc_line(s1, s2, connection_arcs_ccw, pos_equal_eps, result),
            (false, false) => join_arc_arc(s1, s2, connection_arcs_ccw, pos_equal_eps, result),
        }
    };

    let mut result = Contour::with_capacity(contour.len(), contour.is_closed());

    // stage the first vertex, later joins may replace it
    result.add_vertex(segs[0].v1);

    let mut seg_pairs = segs.windows(2);
    if let Some([s1, s2]) = seg_pairs.next() {
        join_seg_pair(s1, s2, &mut result);
    }

    // whether the staged first vertex was already replaced by the first join (needed
    // to know how to fix up the wrap around join for closed contours)
    let first_vertex_replaced = result.len() == 1;

    for pair in seg_pairs {
        if let [s1, s2] = pair {
            join_seg_pair(s1, s2, &mut result);
        }
    }

    if contour.is_closed() && result.len() > 1 {
        // join the wrap around pair (last segment, first segment) into a scratch
        // contour to avoid mutating the result while joining
        let s1 = segs.last().unwrap();
        let s2 = &segs[0];

        let mut closing = Contour::new();
        closing.add_vertex(*result.last().unwrap());
        join_seg_pair(s1, s2, &mut closing);

        // update the result's last vertex and append any join vertexes
        *result.last_mut().unwrap() = closing[0];
        for v in closing.iter_vertexes().skip(1) {
            result.add_vertex(v);
        }

        // update the first vertex unless it was already replaced by the first join
        if !first_vertex_replaced {
            let updated_first_pos = closing.last().unwrap().pos();
            if result[0].bulge_is_zero() {
                result[0].x = updated_first_pos.x;
                result[0].y = updated_first_pos.y;
            } else if result.len() > 1 {
                let (_, arc_center) = arc_radius_and_center(result[0], result[1]);
                let a1 = angle(arc_center, updated_first_pos);
                let a2 = angle(arc_center, result[1].pos());
                let updated_theta = delta_angle(a1, a2);
                if (updated_theta < T::zero() && result[0].bulge_is_pos())
                    || (updated_theta > T::zero() && result[0].bulge_is_neg())
                {
                    // sweep direction flipped, the first vertex is no longer valid,
                    // just move it (it gets pruned below)
                    result[0].x = updated_first_pos.x;
                    result[0].y = updated_first_pos.y;
                } else {
                    result[0] = Vertex::from_vec2(updated_first_pos, bulge_from_angle(updated_theta));
                }
            }
        }

        // prune singularities that the wrap around join may have introduced between
        // the last, first, and second vertexes
        if result.len() > 1 {
            if result[0]
                .pos()
                .fuzzy_eq_eps(result.last().unwrap().pos(), pos_equal_eps)
            {
                result.remove_last();
            }

            if result.len() > 1 && result[0].pos().fuzzy_eq_eps(result[1].pos(), pos_equal_eps) {
                result.remove(0);
            }
        }
    } else {
        // open contour, append the final offset segment end vertex
        let last_offset_vertex = segs.last().unwrap().v2;
        result.add_or_replace_vertex(last_offset_vertex, pos_equal_eps);
    }

    // joining may have reduced everything to a single vertex (fully collapsed offset)
    if result.len() == 1 {
        result.clear();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_offset_single_line_seg() {
        let mut contour = Contour::new();
        contour.add(0.0, 0.0, 0.0);
        contour.add(10.0, 0.0, 0.0);
        // negative offset shifts left of travel direction (+y here)
        let raw = raw_offset_contour(&contour, -2.0, 1e-5);
        assert_eq!(raw.len(), 2);
        assert!(raw[0].fuzzy_eq(Vertex::new(0.0, 2.0, 0.0)));
        assert!(raw[1].fuzzy_eq(Vertex::new(10.0, 2.0, 0.0)));
    }

    #[test]
    fn raw_offset_square_inward() {
        let mut square = Contour::new_closed();
        square.add(0.0, 0.0, 0.0);
        square.add(10.0, 0.0, 0.0);
        square.add(10.0, 10.0, 0.0);
        square.add(0.0, 10.0, 0.0);
        let raw = raw_offset_contour(&square, -1.0, 1e-5);
        assert_eq!(raw.len(), 4);
        assert!(raw.is_closed());
        assert!(raw[0].fuzzy_eq(Vertex::new(1.0, 1.0, 0.0)));
        assert!(raw[1].fuzzy_eq(Vertex::new(9.0, 1.0, 0.0)));
        assert!(raw[2].fuzzy_eq(Vertex::new(9.0, 9.0, 0.0)));
        assert!(raw[3].fuzzy_eq(Vertex::new(1.0, 9.0, 0.0)));
    }

    #[test]
    fn raw_offset_circle_outward() {
        // full circle of radius 1 centered at (1, 0), offset outward by 1
        let mut circle = Contour::new_closed();
        circle.add(0.0, 0.0, 1.0);
        circle.add(2.0, 0.0, 1.0);
        let raw = raw_offset_contour(&circle, 1.0, 1e-5);
        assert_eq!(raw.len(), 2);
        assert!(raw[0].fuzzy_eq(Vertex::new(-1.0, 0.0, 1.0)));
        assert!(raw[1].fuzzy_eq(Vertex::new(3.0, 0.0, 1.0)));
    }

    #[test]
    fn raw_offset_circle_fully_collapsed() {
        let mut circle = Contour::new_closed();
        circle.add(0.0, 0.0, 1.0);
        circle.add(2.0, 0.0, 1.0);
        let raw = raw_offset_contour(&circle, -1.0, 1e-5);
        assert!(raw.is_empty());
    }
}
