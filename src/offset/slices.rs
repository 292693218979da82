//! Slicing the raw offset contour at self/dual intersect boundaries into fragments
//! that hold the target offset distance everywhere.

use super::OffsetOptions;
use crate::contour::{
    all_self_intersects, arc_radius_and_center, find_intersects, seg_approx_bounds,
    seg_closest_point, seg_intersect, seg_midpoint, seg_split_at, Contour, SegIntersect, Vertex,
};
use crate::core::{
    math::{
        circle_circle_intersect, dist_squared, line_circle_intersect, point_from_parametric,
        point_in_arc_sweep, CircleCircleIntersect, LineCircleIntersect, Vec2,
    },
    traits::Real,
};
use static_aabb2d_index::{Control, StaticAABB2DIndex};
use std::collections::{BTreeMap, HashMap};

/// A contiguous fragment of the raw offset contour between two validity boundaries.
///
/// `start_index` is the raw offset segment index the slice starts on, used later to
/// order slices when stitching them back together. The slice owns a copy of its
/// vertexes so it never aliases the raw offset contour it was cut from.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    pub start_index: usize,
    pub contour: Contour<T>,
}

impl<T> Slice<T> {
    /// Sentinel `start_index` for a slice covering the entire raw offset contour.
    pub const FULL_LOOP: usize = usize::MAX;

    #[inline]
    pub fn new(start_index: usize, contour: Contour<T>) -> Self {
        Slice {
            start_index,
            contour,
        }
    }
}

/// Tests if `point` on the raw offset keeps at least `|offset| - offset_tol` distance
/// to every segment of the original contour.
///
/// A violation means the offset folded back across the source curve at that point.
/// Implemented as a range query (box = point extended by `|offset|`) against the
/// original contour's spatial index followed by closest point distance checks,
/// stopping at the first violation.
pub fn point_valid_for_offset<T>(
    contour: &Contour<T>,
    offset: T,
    spatial_index: &StaticAABB2DIndex<T>,
    point: Vec2<T>,
    query_stack: &mut Vec<usize>,
    offset_tol: T,
) -> bool
where
    T: Real,
{
    let abs_offset = offset.abs() - offset_tol;
    let min_dist = abs_offset * abs_offset;
    let mut point_valid = true;
    let mut visitor = |i: usize| {
        let j = contour.next_wrapping_index(i);
        let closest_point = seg_closest_point(contour[i], contour[j], point);
        let dist = dist_squared(closest_point, point);
        point_valid = dist > min_dist;
        if point_valid {
            Control::Continue
        } else {
            Control::Break(())
        }
    };

    spatial_index.visit_query_with_stack(
        point.x - abs_offset,
        point.y - abs_offset,
        point.x + abs_offset,
        point.y + abs_offset,
        &mut visitor,
        query_stack,
    );
    point_valid
}

/// Tests if the segment `v1->v2` intersects any segment of `contour` using the
/// contour's spatial index to prune.
fn seg_crosses_contour<T>(
    contour: &Contour<T>,
    spatial_index: &StaticAABB2DIndex<T>,
    v1: Vertex<T>,
    v2: Vertex<T>,
    pos_equal_eps: T,
    query_stack: &mut Vec<usize>,
) -> bool
where
    T: Real,
{
    let approx_bounds = seg_approx_bounds(v1, v2);
    let mut has_intersect = false;
    let mut visitor = |i: usize| {
        let j = contour.next_wrapping_index(i);
        has_intersect = !matches!(
            seg_intersect(v1, v2, contour[i], contour[j], pos_equal_eps),
            SegIntersect::NoIntersect
        );
        if has_intersect {
            Control::Break(())
        } else {
            Control::Continue
        }
    };

    let fuzz = T::fuzzy_epsilon();
    spatial_index.visit_query_with_stack(
        approx_bounds.min_x - fuzz,
        approx_bounds.min_y - fuzz,
        approx_bounds.max_x + fuzz,
        approx_bounds.max_y + fuzz,
        &mut visitor,
        query_stack,
    );
    has_intersect
}

/// Slices the raw offset of a closed contour at its self intersects only.
///
/// This is the fast path used when self intersect handling of the input is not
/// requested: if the raw offset has no self intersects and passes the distance check
/// the whole loop is returned as a single slice.
pub fn slice_raw_offset<T>(
    original: &Contour<T>,
    raw_offset: &Contour<T>,
    original_index: &StaticAABB2DIndex<T>,
    offset: T,
    options: &OffsetOptions<T>,
) -> Vec<Slice<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    if raw_offset.len() < 2 {
        return result;
    }

    let pos_equal_eps = options.pos_equal_eps;
    let offset_dist_eps = options.offset_dist_eps;

    let raw_offset_index = raw_offset.approx_spatial_index();
    let self_intrs = all_self_intersects(raw_offset, &raw_offset_index, pos_equal_eps);

    let mut query_stack = Vec::with_capacity(8);
    if self_intrs.is_empty() {
        // no self intersects, test any point on the raw offset for validity
        if !point_valid_for_offset(
            original,
            offset,
            original_index,
            raw_offset[0].pos(),
            &mut query_stack,
            offset_dist_eps,
        ) {
            return result;
        }

        // whole loop is the offset, represent it as a single open slice with the
        // start point repeated at the end
        let mut slice = raw_offset.clone();
        slice.set_closed(false);
        slice.add_vertex(raw_offset[0].with_bulge(T::zero()));
        result.push(Slice::new(Slice::<T>::FULL_LOOP, slice));
        return result;
    }

    // group the intersect points by the raw offset segment index they lie on, a
    // hash map suffices since all slices of a closed raw offset stitch into closed
    // loops regardless of visit order
    let mut intersects_lookup = HashMap::<usize, Vec<Vec2<T>>>::with_capacity(2 * self_intrs.len());
    for si in &self_intrs {
        intersects_lookup.entry(si.seg1).or_default().push(si.point);
        intersects_lookup.entry(si.seg2).or_default().push(si.point);
    }

    // sort intersects by distance from their segment start
    for (&i, intr_list) in intersects_lookup.iter_mut() {
        let start_pos = raw_offset[i].pos();
        intr_list.sort_unstable_by(|&a, &b| {
            dist_squared(a, start_pos)
                .partial_cmp(&dist_squared(b, start_pos))
                .unwrap()
        });
    }

    let point_valid = |point: Vec2<T>, query_stack: &mut Vec<usize>| -> bool {
        point_valid_for_offset(
            original,
            offset,
            original_index,
            point,
            query_stack,
            offset_dist_eps,
        )
    };

    for (&start_index, intr_list) in intersects_lookup.iter() {
        let next_index = raw_offset.next_wrapping_index(start_index);
        let start_vertex = raw_offset[start_index];
        let end_vertex = raw_offset[next_index];
        if intr_list.len() != 1 {
            // form slices between each consecutive pair of intersects on this
            // segment (the slice from the last intersect onward is walked below)
            let first_split = seg_split_at(start_vertex, end_vertex, intr_list[0], pos_equal_eps);
            let mut prev_vertex = first_split.split_vertex;
            for &intr in intr_list.iter().skip(1) {
                let split = seg_split_at(prev_vertex, end_vertex, intr, pos_equal_eps);
                prev_vertex = split.split_vertex;
                // skip degenerate sub slices
                if split
                    .updated_start
                    .pos()
                    .fuzzy_eq_eps(split.split_vertex.pos(), pos_equal_eps)
                {
                    continue;
                }

                if !point_valid(split.updated_start.pos(), &mut query_stack) {
                    continue;
                }
                if !point_valid(split.split_vertex.pos(), &mut query_stack) {
                    continue;
                }
                let midpoint = seg_midpoint(split.updated_start, split.split_vertex);
                if !point_valid(midpoint, &mut query_stack) {
                    continue;
                }
                if seg_crosses_contour(
                    original,
                    original_index,
                    split.updated_start,
                    split.split_vertex,
                    pos_equal_eps,
                    &mut query_stack,
                ) {
                    continue;
                }

                let mut slice = Contour::new();
                slice.add_vertex(split.updated_start);
                slice.add_vertex(split.split_vertex);
                result.push(Slice::new(start_index, slice));
            }
        }

        // walk from the last intersect on this segment forward to the next
        // intersect boundary found
        let slice_start_point = *intr_list.last().unwrap();
        if !point_valid(slice_start_point, &mut query_stack) {
            continue;
        }

        let split = seg_split_at(start_vertex, end_vertex, slice_start_point, pos_equal_eps);
        let mut slice = Contour::new();
        slice.add_vertex(split.split_vertex);

        let mut index = next_index;
        let mut is_valid = true;
        let mut loop_count = 0;
        let max_loop_count = raw_offset.len();
        loop {
            if loop_count > max_loop_count {
                panic!("slice walk exceeded the raw offset segment count (corrupt raw offset state)");
            }
            loop_count += 1;

            let current_vertex = raw_offset[index];
            if !point_valid(current_vertex.pos(), &mut query_stack) {
                is_valid = false;
                break;
            }

            let seg_start = *slice.last().unwrap();
            if !seg_start.pos().fuzzy_eq_eps(current_vertex.pos(), pos_equal_eps)
                && !point_valid(seg_midpoint(seg_start, current_vertex), &mut query_stack)
            {
                is_valid = false;
                break;
            }

            if seg_crosses_contour(
                original,
                original_index,
                seg_start,
                current_vertex,
                pos_equal_eps,
                &mut query_stack,
            ) {
                is_valid = false;
                break;
            }

            slice.add_or_replace_vertex(current_vertex, pos_equal_eps);

            if let Some(next_intr_list) = intersects_lookup.get(&index) {
                // reached the next intersect boundary, terminate the slice here
                let intersect_point = next_intr_list[0];
                if !point_valid(intersect_point, &mut query_stack) {
                    is_valid = false;
                    break;
                }

                let next_index = raw_offset.next_wrapping_index(index);
                let split = seg_split_at(
                    current_vertex,
                    raw_offset[next_index],
                    intersect_point,
                    pos_equal_eps,
                );

                let slice_end_vertex = Vertex::from_vec2(intersect_point, T::zero());
                let midpoint = seg_midpoint(split.updated_start, slice_end_vertex);
                if !point_valid(midpoint, &mut query_stack) {
                    is_valid = false;
                    break;
                }

                // trim the last vertex added and terminate at the intersect point
                *slice.last_mut().unwrap() = split.updated_start;
                slice.add_or_replace_vertex(slice_end_vertex, pos_equal_eps);
                break;
            }

            index = raw_offset.next_wrapping_index(index);
        }

        is_valid = is_valid && slice.len() > 1;

        if is_valid && slice[0].pos().fuzzy_eq(slice.last().unwrap().pos()) {
            // discard near zero length closed loops arising from the distance
            // tolerance
            is_valid = slice.path_length() > T::from(1e-2).unwrap();
        }

        if is_valid {
            result.push(Slice::new(start_index, slice));
        }
    }

    result
}

/// Visits intersects between `contour` segments and the circle given, skipping
/// intersects at segment starts and outside arc sweeps.
fn visit_circle_intersects<T, F>(
    contour: &Contour<T>,
    circle_center: Vec2<T>,
    circle_radius: T,
    spatial_index: &StaticAABB2DIndex<T>,
    visitor: &mut F,
    pos_equal_eps: T,
) where
    T: Real,
    F: FnMut(usize, Vec2<T>),
{
    let is_valid_line_intr = |t: T| -> bool {
        // skip false intersects and intersects at the segment start
        !(t < T::zero() || t > T::one()) && t.abs() > pos_equal_eps
    };

    let is_valid_arc_intr = |arc_center: Vec2<T>,
                             arc_start: Vec2<T>,
                             arc_end: Vec2<T>,
                             bulge: T,
                             intr: Vec2<T>|
     -> bool {
        // skip intersects at the segment start and outside the arc sweep
        !arc_start.fuzzy_eq_eps(intr, pos_equal_eps)
            && point_in_arc_sweep(arc_center, arc_start, arc_end, bulge < T::zero(), intr)
    };

    let query_results = spatial_index.query(
        circle_center.x - circle_radius,
        circle_center.y - circle_radius,
        circle_center.x + circle_radius,
        circle_center.y + circle_radius,
    );

    for start_index in query_results {
        let v1 = contour[start_index];
        let v2 = contour[contour.next_wrapping_index(start_index)];
        if v1.bulge_is_zero() {
            match line_circle_intersect(v1.pos(), v2.pos(), circle_radius, circle_center, pos_equal_eps)
            {
                LineCircleIntersect::NoIntersect => {}
                LineCircleIntersect::TangentIntersect { t0 } => {
                    if is_valid_line_intr(t0) {
                        visitor(start_index, point_from_parametric(v1.pos(), v2.pos(), t0));
                    }
                }
                LineCircleIntersect::TwoIntersects { t0, t1 } => {
                    if is_valid_line_intr(t0) {
                        visitor(start_index, point_from_parametric(v1.pos(), v2.pos(), t0));
                    }
                    if is_valid_line_intr(t1) {
                        visitor(start_index, point_from_parametric(v1.pos(), v2.pos(), t1));
                    }
                }
            }
        } else {
            let (arc_radius, arc_center) = arc_radius_and_center(v1, v2);
            match circle_circle_intersect(arc_radius, arc_center, circle_radius, circle_center) {
                CircleCircleIntersect::NoIntersect => {}
                CircleCircleIntersect::TangentIntersect { point } => {
                    if is_valid_arc_intr(arc_center, v1.pos(), v2.pos(), v1.bulge, point) {
                        visitor(start_index, point);
                    }
                }
                CircleCircleIntersect::TwoIntersects { point1, point2 } => {
                    if is_valid_arc_intr(arc_center, v1.pos(), v2.pos(), v1.bulge, point1) {
                        visitor(start_index, point1);
                    }
                    if is_valid_arc_intr(arc_center, v1.pos(), v2.pos(), v1.bulge, point2) {
                        visitor(start_index, point2);
                    }
                }
                CircleCircleIntersect::Overlapping => {}
            }
        }
    }
}

/// Slices the raw offset using its self intersects, its intersects with the dual raw
/// offset (the raw offset at the opposite signed distance), and for open input the
/// end cap circles centered at the original contour's end points.
///
/// This is the general path handling open contours and self intersecting input.
pub fn slice_with_dual<T>(
    original: &Contour<T>,
    raw_offset: &Contour<T>,
    dual_raw_offset: &Contour<T>,
    original_index: &StaticAABB2DIndex<T>,
    offset: T,
    options: &OffsetOptions<T>,
) -> Vec<Slice<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    if raw_offset.len() < 2 {
        return result;
    }

    let pos_equal_eps = options.pos_equal_eps;
    let offset_dist_eps = options.offset_dist_eps;

    let raw_offset_index = raw_offset.approx_spatial_index();

    let self_intrs = all_self_intersects(raw_offset, &raw_offset_index, pos_equal_eps);
    let dual_intrs = find_intersects(raw_offset, dual_raw_offset, &raw_offset_index, pos_equal_eps);

    // ordered map so slices are built in segment index order: not all slices form
    // closed loops here, walking in order lets stitching form the longest results
    let mut intersects_lookup = BTreeMap::<usize, Vec<Vec2<T>>>::new();

    let mut add_intr = |start_index: usize, intr: Vec2<T>| {
        intersects_lookup.entry(start_index).or_default().push(intr);
    };

    if !original.is_closed() {
        // end cap constraints: intersects of the raw offset with circles of radius
        // |offset| centered at the original end points
        let circle_radius = offset.abs();
        visit_circle_intersects(
            raw_offset,
            original[0].pos(),
            circle_radius,
            &raw_offset_index,
            &mut add_intr,
            pos_equal_eps,
        );
        visit_circle_intersects(
            raw_offset,
            original.last().unwrap().pos(),
            circle_radius,
            &raw_offset_index,
            &mut add_intr,
            pos_equal_eps,
        );
    }

    for si in self_intrs.iter() {
        add_intr(si.seg1, si.point);
        add_intr(si.seg2, si.point);
    }

    // only the intersect positions on the raw offset itself matter for slicing (the
    // first contour given to find_intersects)
    for intr in dual_intrs.basic.iter() {
        add_intr(intr.seg1, intr.point);
    }
    for intr in dual_intrs.coincident.iter() {
        add_intr(intr.seg1, intr.point1);
        add_intr(intr.seg1, intr.point2);
    }

    let mut query_stack = Vec::with_capacity(8);

    if intersects_lookup.is_empty() {
        // nothing slices the raw offset, it is entirely valid or entirely invalid
        if !point_valid_for_offset(
            original,
            offset,
            original_index,
            raw_offset[0].pos(),
            &mut query_stack,
            offset_dist_eps,
        ) {
            return result;
        }

        let mut slice = raw_offset.clone();
        slice.set_closed(false);
        if original.is_closed() {
            slice.add_vertex(raw_offset[0].with_bulge(T::zero()));
        }
        result.push(Slice::new(Slice::<T>::FULL_LOOP, slice));
        return result;
    }

    // sort intersects by distance from their segment start
    for (&i, intr_list) in intersects_lookup.iter_mut() {
        let start_pos = raw_offset[i].pos();
        intr_list.sort_unstable_by(|&a, &b| {
            dist_squared(a, start_pos)
                .partial_cmp(&dist_squared(b, start_pos))
                .unwrap()
        });
    }

    let point_valid = |point: Vec2<T>, query_stack: &mut Vec<usize>| -> bool {
        point_valid_for_offset(
            original,
            offset,
            original_index,
            point,
            query_stack,
            offset_dist_eps,
        )
    };

    if !original.is_closed() {
        // build the first slice from the raw offset start up to the first intersect
        // (the wrap around of a closed contour would capture it, open input cannot)
        let mut first_slice = Contour::new();
        let mut index = 0;
        let mut loop_count = 0;
        let max_loop_count = raw_offset.len();
        loop {
            if loop_count > max_loop_count {
                panic!("slice walk exceeded the raw offset segment count (corrupt raw offset state)");
            }
            loop_count += 1;

            if let Some(intr_list) = intersects_lookup.get(&index) {
                // reached the first intersect, validate the final partial segment
                let intr_pos = intr_list[0];
                if !point_valid(intr_pos, &mut query_stack) {
                    break;
                }

                let split =
                    seg_split_at(raw_offset[index], raw_offset[index + 1], intr_pos, pos_equal_eps);

                let slice_end_vertex = Vertex::from_vec2(intr_pos, T::zero());
                let midpoint = seg_midpoint(split.updated_start, slice_end_vertex);
                if !point_valid(midpoint, &mut query_stack) {
                    break;
                }

                if seg_crosses_contour(
                    original,
                    original_index,
                    split.updated_start,
                    slice_end_vertex,
                    pos_equal_eps,
                    &mut query_stack,
                ) {
                    break;
                }

                first_slice.add_or_replace_vertex(split.updated_start, pos_equal_eps);
                first_slice.add_or_replace_vertex(slice_end_vertex, pos_equal_eps);
                if first_slice.len() > 1 {
                    result.push(Slice::new(0, first_slice));
                }
                break;
            }

            // no intersect on this segment, validate and extend
            if !point_valid(raw_offset[index].pos(), &mut query_stack) {
                break;
            }

            if index != 0 {
                let seg_start = *first_slice.last().unwrap();
                if !seg_start.pos().fuzzy_eq_eps(raw_offset[index].pos(), pos_equal_eps)
                    && !point_valid(seg_midpoint(seg_start, raw_offset[index]), &mut query_stack)
                {
                    break;
                }

                if seg_crosses_contour(
                    original,
                    original_index,
                    seg_start,
                    raw_offset[index],
                    pos_equal_eps,
                    &mut query_stack,
                ) {
                    break;
                }
            }

            first_slice.add_or_replace_vertex(raw_offset[index], pos_equal_eps);
            index += 1;
        }
    }

    for (&start_index, intr_list) in intersects_lookup.iter() {
        let next_index = raw_offset.next_wrapping_index(start_index);
        let start_vertex = raw_offset[start_index];
        let end_vertex = raw_offset[next_index];
        if intr_list.len() != 1 {
            // form slices between each consecutive pair of intersects on this
            // segment (the slice from the last intersect onward is walked below)
            let first_split = seg_split_at(start_vertex, end_vertex, intr_list[0], pos_equal_eps);
            let mut prev_vertex = first_split.split_vertex;
            for &intr in intr_list.iter().skip(1) {
                let split = seg_split_at(prev_vertex, end_vertex, intr, pos_equal_eps);
                prev_vertex = split.split_vertex;
                // skip degenerate sub slices
                if split
                    .updated_start
                    .pos()
                    .fuzzy_eq_eps(split.split_vertex.pos(), pos_equal_eps)
                {
                    continue;
                }

                if !point_valid(split.updated_start.pos(), &mut query_stack) {
                    continue;
                }
                if !point_valid(split.split_vertex.pos(), &mut query_stack) {
                    continue;
                }
                let midpoint = seg_midpoint(split.updated_start, split.split_vertex);
                if !point_valid(midpoint, &mut query_stack) {
                    continue;
                }
                if seg_crosses_contour(
                    original,
                    original_index,
                    split.updated_start,
                    split.split_vertex,
                    pos_equal_eps,
                    &mut query_stack,
                ) {
                    continue;
                }

                let mut slice = Contour::new();
                slice.add_vertex(split.updated_start);
                slice.add_vertex(split.split_vertex);
                result.push(Slice::new(start_index, slice));
            }
        }

        // walk from the last intersect on this segment forward to the next intersect
        // boundary (or the end of an open raw offset)
        let slice_start_point = *intr_list.last().unwrap();
        if !point_valid(slice_start_point, &mut query_stack) {
            continue;
        }

        let split = seg_split_at(start_vertex, end_vertex, slice_start_point, pos_equal_eps);
        let mut slice = Contour::new();
        slice.add_vertex(split.split_vertex);

        let mut index = next_index;
        let mut is_valid = true;
        let mut loop_count = 0;
        let max_loop_count = raw_offset.len();
        loop {
            if loop_count > max_loop_count {
                panic!("slice walk exceeded the raw offset segment count (corrupt raw offset state)");
            }
            loop_count += 1;

            let current_vertex = raw_offset[index];
            if !point_valid(current_vertex.pos(), &mut query_stack) {
                is_valid = false;
                break;
            }

            let seg_start = *slice.last().unwrap();
            if !seg_start.pos().fuzzy_eq_eps(current_vertex.pos(), pos_equal_eps)
                && !point_valid(seg_midpoint(seg_start, current_vertex), &mut query_stack)
            {
                is_valid = false;
                break;
            }

            if seg_crosses_contour(
                original,
                original_index,
                seg_start,
                current_vertex,
                pos_equal_eps,
                &mut query_stack,
            ) {
                is_valid = false;
                break;
            }

            slice.add_or_replace_vertex(current_vertex, pos_equal_eps);

            if let Some(next_intr_list) = intersects_lookup.get(&index) {
                // reached the next intersect boundary, terminate the slice here
                let intersect_point = next_intr_list[0];
                if !point_valid(intersect_point, &mut query_stack) {
                    is_valid = false;
                    break;
                }

                let next_index = raw_offset.next_wrapping_index(index);
                let split = seg_split_at(
                    current_vertex,
                    raw_offset[next_index],
                    intersect_point,
                    pos_equal_eps,
                );

                let slice_end_vertex = Vertex::from_vec2(intersect_point, T::zero());
                let midpoint = seg_midpoint(split.updated_start, slice_end_vertex);
                if !point_valid(midpoint, &mut query_stack) {
                    is_valid = false;
                    break;
                }

                // trim the last vertex added and terminate at the intersect point
                *slice.last_mut().unwrap() = split.updated_start;
                slice.add_or_replace_vertex(slice_end_vertex, pos_equal_eps);
                break;
            }

            if index == raw_offset.len() - 1 {
                if original.is_closed() {
                    index = 0;
                } else {
                    // reached the end of an open raw offset
                    break;
                }
            } else {
                index += 1;
            }
        }

        if is_valid && slice.len() > 1 {
            result.push(Slice::new(start_index, slice));
        }
    }

    result
}
