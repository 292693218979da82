mod test_utils;

use contour_offset::contour::{seg_midpoint, Contour, Vertex};
use contour_offset::core::traits::FuzzyEq;
use contour_offset::offset::OffsetOptions;
use contour_offset::{contour_closed, contour_open};
use std::f64::consts::PI;
use test_utils::{dist_to_contour, property_sets_match, ContourProperties};

fn offset_into_properties(contour: &Contour<f64>, offset: f64) -> Vec<ContourProperties> {
    contour
        .parallel_offset(offset)
        .iter()
        .map(ContourProperties::from_contour)
        .collect()
}

/// Asserts every vertex and segment midpoint of every result lies at `dist` from the
/// original contour within `eps`.
fn assert_results_at_offset_dist(results: &[Contour<f64>], original: &Contour<f64>, dist: f64, eps: f64) {
    for r in results {
        for v in r.iter_vertexes() {
            let d = dist_to_contour(original, v.pos());
            assert!(
                (d - dist).abs() < eps,
                "vertex {:?} at distance {} from original, expected {}",
                v,
                d,
                dist
            );
        }
        for (v1, v2) in r.iter_segments() {
            let mp = seg_midpoint(v1, v2);
            let d = dist_to_contour(original, mp);
            assert!(
                (d - dist).abs() < eps,
                "midpoint {:?} at distance {} from original, expected {}",
                mp,
                d,
                dist
            );
        }
    }
}

macro_rules! declare_offset_property_tests {
    ($($name:ident { $input:expr, $offset:expr => $expected:expr })*) => {
        $(
            #[test]
            fn $name() {
                let results = offset_into_properties(&$input, $offset);
                let expected: &[ContourProperties] = &$expected;
                assert!(
                    property_sets_match(&results, expected),
                    "property sets do not match, got: {:?}, expected: {:?}",
                    results,
                    expected
                );
            }
        )*
    };
}

declare_offset_property_tests!(
    closed_rectangle_inset {
        contour_closed![(0.0, 0.0, 0.0), (20.0, 0.0, 0.0), (20.0, 10.0, 0.0), (0.0, 10.0, 0.0)], -2.0 =>
        [ContourProperties::new(4, 96.0, 44.0, 2.0, 2.0, 18.0, 8.0)]
    }
    closed_rectangle_outset {
        contour_closed![(0.0, 0.0, 0.0), (20.0, 0.0, 0.0), (20.0, 10.0, 0.0), (0.0, 10.0, 0.0)], 2.0 =>
        [ContourProperties::new(8, 332.56637061435917, 72.56637061435917, -2.0, -2.0, 22.0, 12.0)]
    }
    closed_rectangle_inset_to_overlapping_line {
        contour_closed![(0.0, 0.0, 0.0), (20.0, 0.0, 0.0), (20.0, 10.0, 0.0), (0.0, 10.0, 0.0)], -5.0 =>
        [ContourProperties::new(2, 0.0, 20.0, 5.0, 5.0, 15.0, 5.0)]
    }
    closed_rectangle_fully_collapsed {
        contour_closed![(0.0, 0.0, 0.0), (20.0, 0.0, 0.0), (20.0, 10.0, 0.0), (0.0, 10.0, 0.0)], -6.0 =>
        []
    }
    square_collapsed_into_point {
        contour_closed![(-1.0, -1.0, 0.0), (1.0, -1.0, 0.0), (1.0, 1.0, 0.0), (-1.0, 1.0, 0.0)], -1.0 =>
        []
    }
    circle_outset {
        contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)], 1.0 =>
        [ContourProperties::new(2, 4.0 * PI, 4.0 * PI, -1.0, -2.0, 3.0, 2.0)]
    }
    circle_collapsed_into_point {
        contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)], -1.0 =>
        []
    }
    circle_fully_collapsed {
        contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)], -2.0 =>
        []
    }
);

#[test]
fn square_inset_exact_vertexes() {
    // inset of a ccw square lands exactly on the expected corner points
    let square = contour_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0)
    ];
    let results = square.parallel_offset(-1.0);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(r.is_closed());
    assert_eq!(r.len(), 4);
    assert!(r[0].fuzzy_eq(Vertex::new(1.0, 1.0, 0.0)));
    assert!(r[1].fuzzy_eq(Vertex::new(9.0, 1.0, 0.0)));
    assert!(r[2].fuzzy_eq(Vertex::new(9.0, 9.0, 0.0)));
    assert!(r[3].fuzzy_eq(Vertex::new(1.0, 9.0, 0.0)));
}

#[test]
fn circle_outset_is_concentric() {
    // radius 1 circle centered at (1, 0) offset outward by 1
    let circle = contour_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
    let results = circle.parallel_offset(1.0);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(r.is_closed());
    assert_eq!(r.len(), 2);
    assert!(r[0].fuzzy_eq(Vertex::new(-1.0, 0.0, 1.0)));
    assert!(r[1].fuzzy_eq(Vertex::new(3.0, 0.0, 1.0)));
}

#[test]
fn single_open_segment_offsets_to_parallel_segment() {
    let seg = contour_open![(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)];

    // positive offset shifts right of the direction of travel
    let results = seg.parallel_offset(2.0);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(!r.is_closed());
    assert_eq!(r.len(), 2);
    assert!(r[0].fuzzy_eq(Vertex::new(0.0, -2.0, 0.0)));
    assert!(r[1].fuzzy_eq(Vertex::new(10.0, -2.0, 0.0)));
    assert!(r.path_length().fuzzy_eq(10.0));

    // negative offset mirrors to the other side
    let results = seg.parallel_offset(-2.0);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.len(), 2);
    assert!(r[0].fuzzy_eq(Vertex::new(0.0, 2.0, 0.0)));
    assert!(r[1].fuzzy_eq(Vertex::new(10.0, 2.0, 0.0)));
}

#[test]
fn zero_offset_returns_input_unchanged() {
    let square = contour_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0)
    ];
    let results = square.parallel_offset(0.0);
    assert_eq!(results.len(), 1);
    assert!(results[0].fuzzy_eq(&square));

    let polyline = contour_open![(0.0, 0.0, 0.5), (5.0, 2.0, 0.0), (9.0, 0.0, 0.0)];
    let results = polyline.parallel_offset(0.0);
    assert_eq!(results.len(), 1);
    assert!(results[0].fuzzy_eq(&polyline));
}

#[test]
fn open_polyline_results_hold_offset_distance() {
    // mixed arc/line open polyline
    let polyline = contour_open![(0.0, 0.0, 0.5), (5.0, 2.0, 0.0), (9.0, 0.0, 0.0)];
    for &offset in [0.75, -0.75].iter() {
        let results = polyline.parallel_offset(offset);
        assert!(!results.is_empty());
        assert_results_at_offset_dist(&results, &polyline, offset.abs(), 1e-3);
    }
}

#[test]
fn inset_then_outset_restores_area() {
    // corner rounding loses area proportional to offset squared, keep it small
    let rect: Contour<f64> = contour_closed![
        (0.0, 0.0, 0.0),
        (20.0, 0.0, 0.0),
        (20.0, 10.0, 0.0),
        (0.0, 10.0, 0.0)
    ];
    let offset = 0.25;
    let inset = rect.parallel_offset(-offset);
    assert_eq!(inset.len(), 1);
    let restored = inset[0].parallel_offset(offset);
    assert_eq!(restored.len(), 1);
    assert!(
        (restored[0].area() - rect.area()).abs() < 0.1,
        "restored area {} differs from original {}",
        restored[0].area(),
        rect.area()
    );
}

#[test]
fn bow_tie_open_polyline_produces_disjoint_results() {
    // self crossing open polyline (crossing at (2, 2))
    let polyline = contour_open![
        (0.0, 0.0, 0.0),
        (4.0, 4.0, 0.0),
        (4.0, 0.0, 0.0),
        (0.0, 4.0, 0.0)
    ];
    let offset = 0.4;
    let results = polyline.parallel_offset(offset);
    assert!(
        results.len() > 1,
        "expected multiple disjoint results, got {}",
        results.len()
    );
    assert_results_at_offset_dist(&results, &polyline, offset, 1e-3);
}

#[test]
fn fold_back_retrace_keeps_wrap_around_cap() {
    // out and back along the same line, the join must wrap around the fold end
    // rather than cutting straight across it
    let retrace = contour_open![(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (0.0, 0.0, 0.0)];
    let results = retrace.parallel_offset(1.0);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(!r.is_closed());
    // two parallel runs plus the half circle cap
    assert!(r.path_length().fuzzy_eq_eps(20.0 + PI, 1e-3));
    assert_results_at_offset_dist(&results, &retrace, 1.0, 1e-3);
}

#[test]
fn closed_self_intersecting_contour_with_handling() {
    // closed bow tie, self intersect handling enabled
    let bow_tie = contour_closed![
        (0.0, 0.0, 0.0),
        (4.0, 0.0, 0.0),
        (0.0, 4.0, 0.0),
        (4.0, 4.0, 0.0)
    ];
    let options = OffsetOptions {
        handle_self_intersects: true,
        ..Default::default()
    };
    let results = bow_tie.parallel_offset_opt(-0.25, &options);
    assert!(!results.is_empty());
    assert_results_at_offset_dist(&results, &bow_tie, 0.25, 1e-3);
}

#[test]
fn offset_works_with_f32() {
    let mut square = Contour::<f32>::new_closed();
    square.add(0.0, 0.0, 0.0);
    square.add(10.0, 0.0, 0.0);
    square.add(10.0, 10.0, 0.0);
    square.add(0.0, 10.0, 0.0);
    let results = square.parallel_offset(-1.0);
    assert_eq!(results.len(), 1);
    assert!(results[0].area().fuzzy_eq_eps(64.0, 1e-2));
}

#[test]
fn fewer_than_two_vertexes_yields_empty_result() {
    let empty = Contour::<f64>::new();
    assert!(empty.parallel_offset(1.0).is_empty());

    let mut single = Contour::new();
    single.add(1.0, 1.0, 0.0);
    assert!(single.parallel_offset(1.0).is_empty());
}
