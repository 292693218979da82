mod test_utils;

use contour_offset::contour::{Contour, Vertex};
use contour_offset::core::math::Vec2;
use contour_offset::core::traits::FuzzyEq;
use contour_offset::{contour_closed, contour_open};
use std::f64::consts::PI;
use test_utils::dist_to_contour;

#[test]
fn segment_counts() {
    let mut contour = Contour::<f64>::new();
    assert_eq!(contour.segment_count(), 0);
    contour.add(0.0, 0.0, 0.0);
    assert_eq!(contour.segment_count(), 0);
    contour.add(1.0, 0.0, 0.0);
    assert_eq!(contour.segment_count(), 1);
    contour.add(2.0, 0.0, 0.0);
    assert_eq!(contour.segment_count(), 2);
    contour.set_closed(true);
    assert_eq!(contour.segment_count(), 3);

    let indexes: Vec<_> = contour.iter_segment_indexes().collect();
    assert_eq!(indexes, vec![(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn area_of_circle_and_square() {
    // full circle radius 1 built from two half circle arcs
    let circle = contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
    assert!(circle.area().fuzzy_eq(PI));

    let square = contour_closed![
        (0.0, 0.0, 0.0),
        (2.0, 0.0, 0.0),
        (2.0, 2.0, 0.0),
        (0.0, 2.0, 0.0)
    ];
    assert!(square.area().fuzzy_eq(4.0));

    // clockwise orientation negates the area
    let mut cw_square = square.clone();
    cw_square.invert_direction();
    assert!(cw_square.area().fuzzy_eq(-4.0));

    // open contours always have zero area
    let open = contour_open![(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
    assert!(open.area().fuzzy_eq(0.0));
}

#[test]
fn path_length_circle() {
    let circle = contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
    assert!(circle.path_length().fuzzy_eq(2.0 * PI));

    let mut half = circle.clone();
    half.set_closed(false);
    assert!(half.path_length().fuzzy_eq(PI));
}

#[test]
fn extents_with_arc() {
    let circle = contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
    let extents = circle.extents().unwrap();
    assert!(extents.min_x.fuzzy_eq(0.0));
    assert!(extents.min_y.fuzzy_eq(-1.0));
    assert!(extents.max_x.fuzzy_eq(2.0));
    assert!(extents.max_y.fuzzy_eq(1.0));

    assert!(Contour::<f64>::new().extents().is_none());
}

#[test]
fn invert_direction_preserves_shape() {
    let contour = contour_open![(0.0, 0.0, 0.5), (5.0, 2.0, 0.0), (9.0, 0.0, -0.3), (12.0, 3.0, 0.0)];
    let mut inverted = contour.clone();
    inverted.invert_direction();

    assert_eq!(inverted.len(), contour.len());
    assert!(inverted[0].pos().fuzzy_eq(contour[3].pos()));
    assert!(inverted[3].pos().fuzzy_eq(contour[0].pos()));
    // same geometry traversed the other way
    assert!(inverted.path_length().fuzzy_eq(contour.path_length()));
    // sample points on the original lie on the inverted contour
    for (v1, v2) in contour.iter_segments() {
        let mp = contour_offset::contour::seg_midpoint(v1, v2);
        assert!(dist_to_contour(&inverted, mp).fuzzy_eq_eps(0.0, 1e-8));
    }
}

#[test]
fn invert_direction_closed_keeps_area_magnitude() {
    let contour = contour_closed![(0.0, 0.0, 0.2), (4.0, 0.0, 0.0), (4.0, 4.0, -0.1), (0.0, 4.0, 0.0)];
    let area = contour.area();
    let mut inverted = contour.clone();
    inverted.invert_direction();
    assert!(inverted.area().fuzzy_eq(-area));
    assert!(inverted.path_length().fuzzy_eq(contour.path_length()));

    // double inversion of a closed contour restores it exactly
    let mut round_trip = inverted.clone();
    round_trip.invert_direction();
    assert!(round_trip.fuzzy_eq(&contour));
}

#[test]
fn add_or_replace_merges_repeat_positions() {
    let mut contour = Contour::new();
    contour.add_or_replace_vertex(Vertex::new(1.0, 1.0, 0.5), 1e-5);
    contour.add_or_replace_vertex(Vertex::new(1.0, 1.0, 1.0), 1e-5);
    assert_eq!(contour.len(), 1);
    assert!(contour[0].fuzzy_eq(Vertex::new(1.0, 1.0, 1.0)));

    contour.add_or_replace(3.0, 3.0, 0.0, 1e-5);
    assert_eq!(contour.len(), 2);
}

#[test]
fn spatial_index_prunes_queries() {
    let square = contour_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0)
    ];
    let index = square.approx_spatial_index();

    // query box over the bottom left corner touches the bottom and left segments
    let mut results = index.query(-0.5, -0.5, 0.5, 0.5);
    results.sort_unstable();
    assert_eq!(results, vec![0, 3]);

    // query box in the middle of the square touches nothing
    let results = index.query(4.0, 4.0, 6.0, 6.0);
    assert!(results.is_empty());
}

#[test]
fn closest_point_via_dist_helper() {
    let square = contour_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0)
    ];
    assert!(dist_to_contour(&square, Vec2::new(5.0, -3.0)).fuzzy_eq(3.0));
    assert!(dist_to_contour(&square, Vec2::new(5.0, 5.0)).fuzzy_eq(5.0));
    assert!(dist_to_contour(&square, Vec2::new(12.0, 5.0)).fuzzy_eq(2.0));
}
