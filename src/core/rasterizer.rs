use crate::core::color::Color;
use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{EPSILON, barycentric_coordinates, is_inside_triangle};
use nalgebra::Point2;
use rayon::prelude::*;

/// Fills a triangle given in pixel coordinates with a flat color.
///
/// Pixels whose centers fall inside the triangle are overwritten unconditionally;
/// callers order their draws back-to-front. Zero-area or non-finite triangles are
/// skipped. Returns `true` only if at least one pixel was written.
pub fn fill_triangle(framebuffer: &mut FrameBuffer, points: &[Point2<f64>; 3], color: Color) -> bool {
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return false;
    }

    if signed_area_x2(points).abs() < EPSILON {
        return false;
    }

    let (min_x, min_y, max_x, max_y) = compute_bounding_box(points);

    // Scissor Test
    if framebuffer.width == 0
        || framebuffer.height == 0
        || max_x < 0
        || max_y < 0
        || min_x >= framebuffer.width as i64
        || min_y >= framebuffer.height as i64
    {
        return false;
    }

    let start_x = min_x.max(0) as usize;
    let end_x = max_x.min(framebuffer.width as i64 - 1) as usize;
    let start_y = min_y.max(0) as usize;
    let end_y = max_y.min(framebuffer.height as i64 - 1) as usize;

    let width = framebuffer.width;
    let [v0, v1, v2] = *points;

    // Rows are independent, so they are filled in parallel.
    framebuffer
        .rows_mut(start_y, end_y)
        .par_chunks_mut(width)
        .enumerate()
        .map(|(row_offset, row)| {
            let y = start_y + row_offset;
            let mut covered = false;
            for (x, pixel) in row.iter_mut().enumerate().take(end_x + 1).skip(start_x) {
                let pixel_center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some(bary) = barycentric_coordinates(pixel_center, v0, v1, v2)
                    && is_inside_triangle(bary)
                {
                    *pixel = color;
                    covered = true;
                }
            }
            covered
        })
        .reduce(|| false, |a, b| a || b)
}

/// Twice the signed area; zero when the corners are collinear.
fn signed_area_x2(points: &[Point2<f64>; 3]) -> f64 {
    let e1 = points[1] - points[0];
    let e2 = points[2] - points[0];
    e1.x * e2.y - e1.y * e2.x
}

fn compute_bounding_box(points: &[Point2<f64>; 3]) -> (i64, i64, i64, i64) {
    let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i64;
    let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i64;
    let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i64;
    let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i64;
    (min_x, min_y, max_x, max_y)
}
