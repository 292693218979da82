//! Self intersect and contour vs contour intersect detection.

use super::{seg_approx_bounds, seg_intersect, Contour, SegIntersect};
use crate::core::{math::Vec2, traits::Real};
use static_aabb2d_index::{Control, StaticAABB2DIndex};
use std::collections::HashSet;

/// An intersect between two contour segments at a single point.
#[derive(Debug, Clone, Copy)]
pub struct BasicIntersect<T> {
    /// Start vertex index of the first segment involved.
    pub seg1: usize,
    /// Start vertex index of the second segment involved.
    pub seg2: usize,
    /// Point at which the intersect occurs.
    pub point: Vec2<T>,
}

impl<T> BasicIntersect<T> {
    #[inline]
    pub fn new(seg1: usize, seg2: usize, point: Vec2<T>) -> Self {
        Self { seg1, seg2, point }
    }
}

/// An intersect where two contour segments share a sub-interval.
#[derive(Debug, Clone, Copy)]
pub struct CoincidentIntersect<T> {
    /// Start vertex index of the first segment involved.
    pub seg1: usize,
    /// Start vertex index of the second segment involved.
    pub seg2: usize,
    /// Start of the shared interval (closest to the second segment's start).
    pub point1: Vec2<T>,
    /// End of the shared interval.
    pub point2: Vec2<T>,
}

impl<T> CoincidentIntersect<T> {
    #[inline]
    pub fn new(seg1: usize, seg2: usize, point1: Vec2<T>, point2: Vec2<T>) -> Self {
        Self {
            seg1,
            seg2,
            point1,
            point2,
        }
    }
}

/// Collection of basic and coincident intersects between two contours.
#[derive(Debug, Clone)]
pub struct IntersectCollection<T> {
    pub basic: Vec<BasicIntersect<T>>,
    pub coincident: Vec<CoincidentIntersect<T>>,
}

/// Visits local self intersects of the contour, defined as intersects between
/// segments sharing a vertex. Visitors return `false` to stop visiting.
pub fn visit_local_self_intersects<T, F, G>(
    contour: &Contour<T>,
    visitor: &mut F,
    coincident_visitor: &mut G,
    pos_equal_eps: T,
) where
    T: Real,
    F: FnMut(BasicIntersect<T>) -> bool,
    G: FnMut(CoincidentIntersect<T>) -> bool,
{
    let vc = contour.len();
    if vc < 2 {
        return;
    }

    if vc == 2 {
        if contour.is_closed() && contour[0].bulge.fuzzy_eq(-contour[1].bulge) {
            // two vertex closed contour folding back over itself entirely
            coincident_visitor(CoincidentIntersect::new(
                0,
                1,
                contour[0].pos(),
                contour[1].pos(),
            ));
        }
        return;
    }

    let mut visit_indexes = |i: usize, j: usize, k: usize| -> bool {
        let v1 = contour[i];
        let v2 = contour[j];
        let v3 = contour[k];

        // intersect between segments v1->v2 and v2->v3 (sharing the vertex v2)
        if v1.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
            // repeat position singularity
            return coincident_visitor(CoincidentIntersect::new(i, j, v1.pos(), v2.pos()));
        }

        match seg_intersect(v1, v2, v2, v3, pos_equal_eps) {
            SegIntersect::NoIntersect => true,
            SegIntersect::TangentIntersect { point } | SegIntersect::OneIntersect { point } => {
                if point.fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
                    // the shared vertex itself is not a self intersect
                    true
                } else {
                    visitor(BasicIntersect::new(i, j, point))
                }
            }
            SegIntersect::TwoIntersects { point1, point2 } => {
                let mut keep_going = true;
                if !point1.fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
                    keep_going = visitor(BasicIntersect::new(i, j, point1));
                }
                if keep_going && !point2.fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
                    keep_going = visitor(BasicIntersect::new(i, j, point2));
                }
                keep_going
            }
            SegIntersect::CoincidentLines { point1, point2 }
            | SegIntersect::CoincidentArcs { point1, point2 } => {
                coincident_visitor(CoincidentIntersect::new(i, j, point1, point2))
            }
        }
    };

    for i in 2..vc {
        if !visit_indexes(i - 2, i - 1, i) {
            return;
        }
    }

    if contour.is_closed() {
        // wrap around pairs: [(n-2)->(n-1), (n-1)->0] and [(n-1)->0, 0->1]
        if visit_indexes(vc - 2, vc - 1, 0) {
            visit_indexes(vc - 1, 0, 1);
        }
    }
}

/// Visits global self intersects of the contour, defined as intersects between
/// segments not sharing a vertex, using the spatial index to prune segment pairs.
/// Visitors return `false` to stop visiting.
pub fn visit_global_self_intersects<T, F, G>(
    contour: &Contour<T>,
    spatial_index: &StaticAABB2DIndex<T>,
    visitor: &mut F,
    coincident_visitor: &mut G,
    pos_equal_eps: T,
) where
    T: Real,
    F: FnMut(BasicIntersect<T>) -> bool,
    G: FnMut(CoincidentIntersect<T>) -> bool,
{
    let vc = contour.len();
    if vc < 3 {
        return;
    }

    let mut visited_pairs = HashSet::with_capacity(vc);
    let mut query_stack = Vec::with_capacity(8);
    let fuzz = T::fuzzy_epsilon();

    // query each segment's bounding box against the index holding all segments
    let mut keep_going = true;
    for (box_index, aabb) in spatial_index.item_boxes().iter().enumerate() {
        let i = spatial_index.all_box_indices()[box_index];
        let j = contour.next_wrapping_index(i);
        let v1 = contour[i];
        let v2 = contour[j];
        let mut query_visitor = |hit_i: usize| {
            let hit_j = contour.next_wrapping_index(hit_i);
            // skip segments sharing a vertex (local intersects)
            if i == hit_i || i == hit_j || j == hit_i || j == hit_j {
                return Control::<()>::Continue;
            }

            // skip pairs visited from the other side
            if visited_pairs.contains(&(hit_i, i)) {
                return Control::Continue;
            }
            visited_pairs.insert((i, hit_i));

            let u1 = contour[hit_i];
            let u2 = contour[hit_j];
            let intr_at_seg_start = |intr: Vec2<T>| -> bool {
                // an intersect at a segment start is recorded by the segment pair
                // ending there, skip it here to avoid duplicates
                v1.pos().fuzzy_eq_eps(intr, pos_equal_eps)
                    || u1.pos().fuzzy_eq_eps(intr, pos_equal_eps)
            };

            match seg_intersect(v1, v2, u1, u2, pos_equal_eps) {
                SegIntersect::NoIntersect => {}
                SegIntersect::TangentIntersect { point } | SegIntersect::OneIntersect { point } => {
                    if !intr_at_seg_start(point) {
                        keep_going = visitor(BasicIntersect::new(i, hit_i, point));
                    }
                }
                SegIntersect::TwoIntersects { point1, point2 } => {
                    if !intr_at_seg_start(point1) {
                        keep_going = visitor(BasicIntersect::new(i, hit_i, point1));
                    }
                    if keep_going && !intr_at_seg_start(point2) {
                        keep_going = visitor(BasicIntersect::new(i, hit_i, point2));
                    }
                }
                SegIntersect::CoincidentLines { point1, point2 }
                | SegIntersect::CoincidentArcs { point1, point2 } => {
                    if !intr_at_seg_start(point1) {
                        keep_going =
                            coincident_visitor(CoincidentIntersect::new(i, hit_i, point1, point2));
                    }
                }
            }

            if keep_going {
                Control::Continue
            } else {
                Control::Break(())
            }
        };

        spatial_index.visit_query_with_stack(
            aabb.min_x - fuzz,
            aabb.min_y - fuzz,
            aabb.max_x + fuzz,
            aabb.max_y + fuzz,
            &mut query_visitor,
            &mut query_stack,
        );

        if !keep_going {
            return;
        }
    }
}

/// Finds all self intersects of the contour. Coincident intersects are reported as
/// two basic intersects at the interval end points.
pub fn all_self_intersects<T>(
    contour: &Contour<T>,
    spatial_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
) -> Vec<BasicIntersect<T>>
where
    T: Real,
{
    let mut intrs = Vec::new();
    let mut coincident_intrs = Vec::new();
    {
        let mut visitor = |intr: BasicIntersect<T>| {
            intrs.push(intr);
            true
        };
        let mut coincident_visitor = |intr: CoincidentIntersect<T>| {
            coincident_intrs.push(intr);
            true
        };

        visit_local_self_intersects(contour, &mut visitor, &mut coincident_visitor, pos_equal_eps);
        visit_global_self_intersects(
            contour,
            spatial_index,
            &mut visitor,
            &mut coincident_visitor,
            pos_equal_eps,
        );
    }

    intrs.reserve(2 * coincident_intrs.len());
    for ci in &coincident_intrs {
        intrs.push(BasicIntersect::new(ci.seg1, ci.seg2, ci.point1));
        intrs.push(BasicIntersect::new(ci.seg1, ci.seg2, ci.point2));
    }

    intrs
}

/// Finds all intersects between two contours.
///
/// `contour1_index` must be a spatial index over `contour1`'s segments. In the case of
/// two intersect points on one segment pair the points are recorded as two basic
/// intersects. Intersects at the very start of a segment are skipped (they are
/// recorded by the segment ending there), except at the final end point of an open
/// contour.
pub fn find_intersects<T>(
    contour1: &Contour<T>,
    contour2: &Contour<T>,
    contour1_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
) -> IntersectCollection<T>
where
    T: Real,
{
    let mut result = IntersectCollection {
        basic: Vec::new(),
        coincident: Vec::new(),
    };
    if contour1.len() < 2 || contour2.len() < 2 {
        return result;
    }

    // track possible duplicate basic intersects introduced where coincident
    // intervals end at segment end points
    let mut possible_duplicates1 = HashSet::<usize>::new();
    let mut possible_duplicates2 = HashSet::<usize>::new();

    // last segment start indexes, used to keep intersects at the very end of open
    // contours
    let open1_last_idx = contour1.len() - 2;
    let open2_last_idx = contour2.len() - 2;

    let fuzz = T::fuzzy_epsilon();
    let mut query_stack = Vec::with_capacity(8);

    for (i2, j2) in contour2.iter_segment_indexes() {
        let u1 = contour2[i2];
        let u2 = contour2[j2];
        let mut query_visitor = |i1: usize| {
            let j1 = contour1.next_wrapping_index(i1);
            let v1 = contour1[i1];
            let v2 = contour1[j1];

            let skip_intr_at_end = |intr: Vec2<T>| -> bool {
                // skip intersects at segment end points, they are found again by the
                // next segment with the intersect at its start, unless at the very end
                // of an open contour
                (v2.pos().fuzzy_eq_eps(intr, pos_equal_eps)
                    && (contour1.is_closed() || i1 != open1_last_idx))
                    || (u2.pos().fuzzy_eq_eps(intr, pos_equal_eps)
                        && (contour2.is_closed() || i2 != open2_last_idx))
            };

            match seg_intersect(v1, v2, u1, u2, pos_equal_eps) {
                SegIntersect::NoIntersect => {}
                SegIntersect::TangentIntersect { point } | SegIntersect::OneIntersect { point } => {
                    if !skip_intr_at_end(point) {
                        result.basic.push(BasicIntersect::new(i1, i2, point));
                    }
                }
                SegIntersect::TwoIntersects { point1, point2 } => {
                    if !skip_intr_at_end(point1) {
                        result.basic.push(BasicIntersect::new(i1, i2, point1));
                    }
                    if !skip_intr_at_end(point2) {
                        result.basic.push(BasicIntersect::new(i1, i2, point2));
                    }
                }
                SegIntersect::CoincidentLines { point1, point2 }
                | SegIntersect::CoincidentArcs { point1, point2 } => {
                    result
                        .coincident
                        .push(CoincidentIntersect::new(i1, i2, point1, point2));

                    if v2.pos().fuzzy_eq_eps(point1, pos_equal_eps)
                        || v2.pos().fuzzy_eq_eps(point2, pos_equal_eps)
                    {
                        possible_duplicates1.insert(contour1.next_wrapping_index(i1));
                    }
                    if u2.pos().fuzzy_eq_eps(point1, pos_equal_eps)
                        || u2.pos().fuzzy_eq_eps(point2, pos_equal_eps)
                    {
                        possible_duplicates2.insert(contour2.next_wrapping_index(i2));
                    }
                }
            }

            Control::<()>::Continue
        };

        let bb = seg_approx_bounds(u1, u2);
        contour1_index.visit_query_with_stack(
            bb.min_x - fuzz,
            bb.min_y - fuzz,
            bb.max_x + fuzz,
            bb.max_y + fuzz,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    if possible_duplicates1.is_empty() && possible_duplicates2.is_empty() {
        return result;
    }

    // drop basic intersects that duplicate coincident interval end points
    let mut final_basic = Vec::with_capacity(result.basic.len());
    for intr in result.basic.iter() {
        if possible_duplicates1.contains(&intr.seg1)
            && intr.point.fuzzy_eq_eps(contour1[intr.seg1].pos(), pos_equal_eps)
        {
            continue;
        }
        if possible_duplicates2.contains(&intr.seg2)
            && intr.point.fuzzy_eq_eps(contour2[intr.seg2].pos(), pos_equal_eps)
        {
            continue;
        }
        final_basic.push(*intr);
    }

    result.basic = final_basic;
    result
}
