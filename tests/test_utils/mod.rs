use contour_offset::contour::{seg_closest_point, Contour};
use contour_offset::core::math::dist_squared;
use contour_offset::core::math::Vec2;
use contour_offset::core::traits::FuzzyEq;
use static_aabb2d_index::AABB;

/// Fuzzy compare AABB values.
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a contour for comparison in tests.
#[derive(Debug, Copy, Clone)]
pub struct ContourProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub path_length: f64,
    pub extents: AABB<f64>,
}

impl ContourProperties {
    /// Property compare epsilon.
    pub const PROP_CMP_EPS: f64 = 1e-4;

    pub fn new(
        vertex_count: usize,
        area: f64,
        path_length: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            path_length,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_contour(contour: &Contour<f64>) -> Self {
        Self {
            vertex_count: contour.len(),
            area: contour.area(),
            path_length: contour.path_length(),
            extents: contour.extents().unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && self.path_length.fuzzy_eq_eps(other.path_length, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

/// Compares two property sets without regard to order.
pub fn property_sets_match(result: &[ContourProperties], expected: &[ContourProperties]) -> bool {
    if result.len() != expected.len() {
        return false;
    }

    let mut matched = vec![false; expected.len()];
    for r in result {
        let found = expected.iter().enumerate().any(|(i, e)| {
            if !matched[i] && r.fuzzy_eq_eps(e, ContourProperties::PROP_CMP_EPS) {
                matched[i] = true;
                true
            } else {
                false
            }
        });
        if !found {
            return false;
        }
    }

    true
}

/// Minimum distance from `point` to any segment of `contour`.
pub fn dist_to_contour(contour: &Contour<f64>, point: Vec2<f64>) -> f64 {
    contour
        .iter_segments()
        .map(|(v1, v2)| dist_squared(seg_closest_point(v1, v2, point), point))
        .fold(f64::MAX, f64::min)
        .sqrt()
}
