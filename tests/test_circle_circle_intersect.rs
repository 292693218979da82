use contour_offset::core::math::{circle_circle_intersect, CircleCircleIntersect::*, Vec2};

macro_rules! assert_case_eq {
    ($left:expr, $right:expr) => {
        match ($left, $right) {
            (NoIntersect, NoIntersect) => {}
            (Overlapping, Overlapping) => {}
            (TangentIntersect { point: a1 }, TangentIntersect { point: a2 })
                if a1.fuzzy_eq(a2) => {}
            (
                TwoIntersects {
                    point1: a1,
                    point2: b1,
                },
                TwoIntersects {
                    point1: a2,
                    point2: b2,
                },
            ) if (a1.fuzzy_eq(a2) && b1.fuzzy_eq(b2)) || (a1.fuzzy_eq(b2) && b1.fuzzy_eq(a2)) => {}
            _ => panic!(
                "intersect cases do not match: left: {:?}, right: {:?}",
                $left, $right
            ),
        };
    };
}

#[test]
fn circles_apart() {
    let result = circle_circle_intersect(1.0, Vec2::new(0.0, 0.0), 1.0, Vec2::new(5.0, 0.0));
    assert_case_eq!(result, NoIntersect::<f64>);
}

#[test]
fn circle_contained_in_circle() {
    let result = circle_circle_intersect(3.0, Vec2::new(0.0, 0.0), 1.0, Vec2::new(0.5, 0.0));
    assert_case_eq!(result, NoIntersect::<f64>);
}

#[test]
fn same_circle_overlapping() {
    let result = circle_circle_intersect(2.0, Vec2::new(1.0, 1.0), 2.0, Vec2::new(1.0, 1.0));
    assert_case_eq!(result, Overlapping::<f64>);
}

#[test]
fn concentric_different_radius() {
    let result = circle_circle_intersect(2.0, Vec2::new(1.0, 1.0), 1.0, Vec2::new(1.0, 1.0));
    assert_case_eq!(result, NoIntersect::<f64>);
}

#[test]
fn two_intersect_points() {
    // unit circles centered one apart intersect symmetrically
    let result = circle_circle_intersect(1.0, Vec2::new(0.0, 0.0), 1.0, Vec2::new(1.0, 0.0));
    let y = (3.0f64).sqrt() / 2.0;
    assert_case_eq!(
        result,
        TwoIntersects {
            point1: Vec2::new(0.5, y),
            point2: Vec2::new(0.5, -y)
        }
    );
}
