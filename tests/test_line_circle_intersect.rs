use contour_offset::core::{
    math::{line_circle_intersect, LineCircleIntersect::*, Vec2},
    traits::FuzzyEq,
};

const EPS: f64 = 1e-5;

macro_rules! assert_case_eq {
    ($left:expr, $right:expr) => {
        match ($left, $right) {
            (NoIntersect, NoIntersect) => {}
            (TangentIntersect { t0: a1 }, TangentIntersect { t0: a2 }) if a1.fuzzy_eq(a2) => {}
            (TwoIntersects { t0: a1, t1: b1 }, TwoIntersects { t0: a2, t1: b2 })
                if a1.fuzzy_eq(a2) && b1.fuzzy_eq(b2) => {}
            _ => panic!(
                "intersect cases do not match: left: {:?}, right: {:?}",
                $left, $right
            ),
        };
    };
}

#[test]
fn segment_through_circle_center() {
    let p0 = Vec2::new(-2.0, 0.0);
    let p1 = Vec2::new(2.0, 0.0);
    let result = line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, TwoIntersects { t0: 0.25, t1: 0.75 });
}

#[test]
fn vertical_segment_through_circle() {
    let p0 = Vec2::new(0.0, -2.0);
    let p1 = Vec2::new(0.0, 2.0);
    let result = line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, TwoIntersects { t0: 0.25, t1: 0.75 });
}

#[test]
fn tangent_segment() {
    let p0 = Vec2::new(-1.0, 1.0);
    let p1 = Vec2::new(1.0, 1.0);
    let result = line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, TangentIntersect { t0: 0.5 });
}

#[test]
fn segment_missing_circle() {
    let p0 = Vec2::new(-1.0, 3.0);
    let p1 = Vec2::new(1.0, 3.0);
    let result = line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, NoIntersect::<f64>);
}

#[test]
fn intersects_beyond_segment_ends() {
    // segment inside the circle, intersects require extension on both sides
    let p0 = Vec2::new(-0.25, 0.0);
    let p1 = Vec2::new(0.25, 0.0);
    let result = line_circle_intersect(p0, p1, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, TwoIntersects { t0: -1.5, t1: 2.5 });
}

#[test]
fn degenerate_point_on_circle() {
    let p = Vec2::new(1.0, 0.0);
    let result = line_circle_intersect(p, p, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, TangentIntersect { t0: 0.0 });
}

#[test]
fn degenerate_point_off_circle() {
    let p = Vec2::new(2.0, 2.0);
    let result = line_circle_intersect(p, p, 1.0, Vec2::new(0.0, 0.0), EPS);
    assert_case_eq!(result, NoIntersect::<f64>);
}
