use nalgebra::{Point2, Vector3};

pub const EPSILON: f64 = 1e-9;

/// Weights of `p` relative to the corners `v1`, `v2`, `v3`, packed as `(alpha, beta, gamma)`.
///
/// `None` for zero-area or non-finite triangles.
pub fn barycentric_coordinates(
    p: Point2<f64>,
    v1: Point2<f64>,
    v2: Point2<f64>,
    v3: Point2<f64>,
) -> Option<Vector3<f64>> {
    let e1 = v2 - v1;
    let e2 = v3 - v1;
    let p_v1 = p - v1;

    let total_area_x2 = e1.x * e2.y - e1.y * e2.x;

    if total_area_x2.abs() < EPSILON || !total_area_x2.is_finite() {
        return None;
    }

    let inv_total_area_x2 = 1.0 / total_area_x2;

    // Sub-triangle (p, v3, v1)
    let beta = (p_v1.x * e2.y - p_v1.y * e2.x) * inv_total_area_x2;
    // Sub-triangle (p, v1, v2)
    let gamma = (e1.x * p_v1.y - e1.y * p_v1.x) * inv_total_area_x2;
    let alpha = 1.0 - beta - gamma;

    Some(Vector3::new(alpha, beta, gamma))
}

/// All weights non-negative, with a small tolerance so shared edges leave no gaps.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f64>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}
