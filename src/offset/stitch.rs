//! Stitching validated slices end to start into maximal continuous result contours.

use super::{OffsetOptions, Slice};
use crate::contour::Contour;
use crate::core::traits::Real;
use static_aabb2d_index::{Control, StaticAABB2DIndexBuilder};

/// Stitches `slices` together into the final offset result contours.
///
/// A spatial index is built over the slice start points; starting from each
/// unvisited slice the stitch walk repeatedly appends the unvisited slice whose
/// start point coincides with the current end point within the join tolerance.
/// Candidates are ordered by smallest forward (wrap aware) start segment index
/// distance, ties broken in favor of the candidate closing the loop back to the
/// initial start point so longer closed loops win over accidental short ones.
///
/// `closed` indicates the input contour was closed (finished paths whose ends meet
/// are then marked closed with the duplicate vertex dropped). `orig_max_index` is
/// the wrap modulus for the forward index distance.
pub fn stitch_slices<T>(
    slices: &[Slice<T>],
    closed: bool,
    orig_max_index: usize,
    options: &OffsetOptions<T>,
) -> Vec<Contour<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    if slices.is_empty() {
        return result;
    }

    let join_eps = options.slice_join_eps;
    let pos_equal_eps = options.pos_equal_eps;

    if slices.len() == 1 {
        let mut contour = slices[0].contour.clone();
        if closed
            && contour[0]
                .pos()
                .fuzzy_eq_eps(contour.last().unwrap().pos(), join_eps)
        {
            contour.set_closed(true);
            contour.remove_last();
        }

        result.push(contour);
        return result;
    }

    let spatial_index = {
        let mut builder = StaticAABB2DIndexBuilder::new(slices.len());
        for slice in slices {
            let start_point = slice.contour[0].pos();
            builder.add(
                start_point.x - join_eps,
                start_point.y - join_eps,
                start_point.x + join_eps,
                start_point.y + join_eps,
            );
        }
        builder.build().unwrap()
    };

    let mut visited = vec![false; slices.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);

    for i in 0..slices.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let mut current_contour = Contour::new();
        let mut current_index = i;
        let initial_start_point = slices[i].contour[0].pos();
        let mut loop_count = 0;
        let max_loop_count = slices.len();
        loop {
            if loop_count > max_loop_count {
                panic!("stitch walk exceeded the slice count (corrupt slice state)");
            }
            loop_count += 1;

            let current_slice = &slices[current_index];
            current_contour.extend_vertexes(current_slice.contour.iter_vertexes());
            let current_loop_start_index = current_slice.start_index;
            let current_end_point = current_slice.contour.last().unwrap().pos();

            query_results.clear();
            let mut index_visitor = |idx: usize| {
                if !visited[idx] {
                    query_results.push(idx);
                }
                Control::<()>::Continue
            };
            spatial_index.visit_query_with_stack(
                current_end_point.x - join_eps,
                current_end_point.y - join_eps,
                current_end_point.x + join_eps,
                current_end_point.y + join_eps,
                &mut index_visitor,
                &mut query_stack,
            );

            let forward_index_dist = |idx: usize| -> usize {
                let slice = &slices[idx];
                if current_loop_start_index <= slice.start_index {
                    slice.start_index - current_loop_start_index
                } else {
                    // wrapping distance (to the end then from the start)
                    orig_max_index - current_loop_start_index + slice.start_index
                }
            };

            let closes_loop = |idx: usize| -> bool {
                let end_point = slices[idx].contour.last().unwrap().pos();
                end_point.fuzzy_eq_eps(initial_start_point, pos_equal_eps)
            };

            query_results.sort_unstable_by(|a, b| {
                // order by index distance, then prefer the candidate whose end
                // returns to the initial start point so stitching closes loops
                // rather than wandering onto another fragment
                forward_index_dist(*a)
                    .cmp(&forward_index_dist(*b))
                    .then_with(|| closes_loop(*b).cmp(&closes_loop(*a)))
            });

            if query_results.is_empty() {
                // no continuation, the current contour is finished
                if current_contour.len() > 1 {
                    let start_point = current_contour[0].pos();
                    let end_point = current_contour.last().unwrap().pos();
                    if closed && start_point.fuzzy_eq_eps(end_point, pos_equal_eps) {
                        current_contour.remove_last();
                        current_contour.set_closed(true);
                    }

                    result.push(current_contour);
                }
                break;
            }

            // drop the duplicated join vertex and continue with the best candidate
            visited[query_results[0]] = true;
            current_contour.remove_last();
            current_index = query_results[0];
        }
    }

    result
}
