use crate::core::geometry::{Point, Vector, Vertex};
use crate::core::pipeline::Projector;
use crate::error::Result;
use crate::scene::face::{Face, Face2D};
use log::debug;

/// Preferred world-up reference.
const WORLD_UP: [f64; 3] = [0.0, 1.0, 0.0];
/// Substitute world-up when the view direction is (nearly) vertical.
const FALLBACK_WORLD_UP: [f64; 3] = [0.0, 0.0, 1.0];
/// `|forward . world_up|` at or above this counts as parallel.
const DEGENERATE_UP_THRESHOLD: f64 = 0.999;

/// A pinhole camera: a position plus an orthonormal basis derived from a look-at point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vertex,
    look_at: Vertex,

    // --- Derived basis ---
    forward: Vector,
    right: Vector,
    up: Vector,
}

/// The basis for looking from `origin` towards `look_at`.
fn compute_axes(origin: &Vertex, look_at: &Vertex) -> Result<(Vector, Vector, Vector)> {
    let forward = (*look_at - *origin).normalize()?;

    let mut world_up = Vector::from(WORLD_UP);
    if forward.dot(&world_up).abs() >= DEGENERATE_UP_THRESHOLD {
        debug!("View direction {forward} is parallel to world up, using fallback axis");
        world_up = Vector::from(FALLBACK_WORLD_UP);
    }

    let right = forward.cross(&world_up).normalize()?;
    let up = right.cross(&forward).normalize()?;
    Ok((forward, right, up))
}

impl Camera {
    /// Creates a camera at `origin` looking at `look_at`.
    ///
    /// Fails with [`Error::ZeroLengthVector`](crate::error::Error::ZeroLengthVector)
    /// when the two points coincide.
    pub fn new(origin: Vertex, look_at: Vertex) -> Result<Self> {
        let (forward, right, up) = compute_axes(&origin, &look_at)?;
        Ok(Self {
            origin,
            look_at,
            forward,
            right,
            up,
        })
    }

    /// Re-aims the camera, recomputing the whole basis.
    ///
    /// On error the camera keeps its previous target and axes.
    pub fn set_look_at(&mut self, look_at: Vertex) -> Result<()> {
        let (forward, right, up) = compute_axes(&self.origin, &look_at)?;
        self.look_at = look_at;
        self.forward = forward;
        self.right = right;
        self.up = up;
        Ok(())
    }

    pub fn origin(&self) -> Vertex {
        self.origin
    }

    pub fn look_at(&self) -> Vertex {
        self.look_at
    }

    pub fn forward(&self) -> Vector {
        self.forward
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    /// True when `vertex` lies strictly on the forward side of the camera plane.
    pub fn is_vertex_in_front(&self, vertex: &Vertex) -> bool {
        (*vertex - self.origin).dot(&self.forward) > 0.0
    }

    /// True when any vertex of `face` is in front. Straddling faces are kept whole.
    pub fn is_face_in_front(&self, face: &Face) -> bool {
        face.points().iter().any(|v| self.is_vertex_in_front(v))
    }

    /// Perspective projection onto the plane one unit in front of the camera.
    ///
    /// The result is in normalized camera-plane units; scaling to pixels is the canvas's job.
    /// Vertices on the camera plane divide by zero and come back non-finite.
    pub fn project_vertex(&self, vertex: &Vertex) -> Point {
        let to_vertex = *vertex - self.origin;

        let x_cam = to_vertex.dot(&self.right);
        let y_cam = to_vertex.dot(&self.up);
        let z_cam = to_vertex.dot(&self.forward);

        Point::new(x_cam / z_cam, y_cam / z_cam)
    }

    /// Projects all three vertices and tags the result with the face's depth and color.
    pub fn project_face(&self, face: &Face) -> Face2D {
        let points = face.points().map(|v| self.project_vertex(&v));
        Face2D::from_points(points, face.distance(&self.origin), face.color())
    }
}

impl Projector for Camera {
    fn is_face_in_front(&self, face: &Face) -> bool {
        Camera::is_face_in_front(self, face)
    }

    fn project_face(&self, face: &Face) -> Face2D {
        Camera::project_face(self, face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn default_camera() -> Camera {
        Camera::new(Vertex::origin(), Vertex::new(0.0, 0.0, -1.0)).unwrap()
    }

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.forward(), cam.right(), cam.up());
        for axis in [f, r, u] {
            assert!((axis.magnitude() - 1.0).abs() < EPS);
        }
        assert!(f.dot(&r).abs() < EPS);
        assert!(f.dot(&u).abs() < EPS);
        assert!(r.dot(&u).abs() < EPS);
        // Right-handed: right x up points backwards (towards the viewer).
        assert_eq!(r.cross(&u), -f);
    }

    #[test]
    fn test_initial_axes() {
        let cam = default_camera();
        assert_eq!(cam.forward(), Vector::new(0.0, 0.0, -1.0));
        assert_eq!(cam.right(), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(cam.up(), Vector::new(0.0, 1.0, 0.0));
        assert_orthonormal(&cam);
    }

    #[test]
    fn test_set_look_at_recomputes_axes() {
        let mut cam = default_camera();
        cam.set_look_at(Vertex::new(1.0, 0.0, -1.0)).unwrap();
        assert_ne!(cam.forward(), Vector::new(0.0, 0.0, -1.0));
        assert_eq!(cam.look_at(), Vertex::new(1.0, 0.0, -1.0));
        assert_orthonormal(&cam);
    }

    #[test]
    fn test_set_look_at_fully_replaces_basis() {
        let mut cam = default_camera();
        cam.set_look_at(Vertex::new(0.0, 10.0, 0.0)).unwrap();
        cam.set_look_at(Vertex::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(cam, default_camera());
    }

    #[test]
    fn test_set_look_at_on_origin_keeps_state() {
        let mut cam = default_camera();
        let result = cam.set_look_at(Vertex::origin());
        assert!(matches!(result, Err(Error::ZeroLengthVector)));
        assert_eq!(cam, default_camera());
    }

    #[test]
    fn test_vertical_view_uses_fallback_up() {
        for target in [Vertex::new(0.0, 5.0, 0.0), Vertex::new(0.0, -5.0, 0.0)] {
            let cam = Camera::new(Vertex::origin(), target).unwrap();
            assert_orthonormal(&cam);
        }
        let nearly = Camera::new(Vertex::origin(), Vertex::new(0.001, 10.0, 0.0)).unwrap();
        assert_orthonormal(&nearly);
    }

    #[test]
    fn test_random_targets_give_orthonormal_frames() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut cam = default_camera();
        for _ in 0..300 {
            let target = Vertex::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            );
            cam.set_look_at(target).unwrap();
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn test_vertex_in_front() {
        let cam = default_camera();
        assert!(cam.is_vertex_in_front(&Vertex::new(0.0, 0.0, -5.0)));
        assert!(!cam.is_vertex_in_front(&Vertex::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_vertex_on_camera_plane_is_not_in_front() {
        let cam = default_camera();
        assert!(!cam.is_vertex_in_front(&Vertex::new(3.0, -2.0, 0.0)));
        assert!(!cam.is_vertex_in_front(&Vertex::origin()));
    }

    #[test]
    fn test_face_in_front_if_any_vertex_is() {
        let cam = default_camera();
        let straddling = Face::new(
            vec![
                Vertex::new(0.0, 0.0, -5.0),
                Vertex::new(0.0, 0.0, 5.0),
                Vertex::new(1.0, 1.0, -5.0),
            ],
            Color::WHITE,
        )
        .unwrap();
        assert!(cam.is_face_in_front(&straddling));

        let behind = Face::new(vec![Vertex::new(0.0, 0.0, 1.0); 3], Color::WHITE).unwrap();
        assert!(!cam.is_face_in_front(&behind));
    }

    #[test]
    fn test_project_on_axis_is_center() {
        let mut rng = StdRng::seed_from_u64(22);
        let cam = Camera::new(Vertex::new(1.0, 2.0, 3.0), Vertex::new(4.0, -2.0, 3.0)).unwrap();
        for _ in 0..100 {
            let d = rng.random_range(0.01..500.0);
            let p = cam.project_vertex(&(cam.origin() + cam.forward() * d));
            assert!(p.x().abs() < EPS && p.y().abs() < EPS, "{p}");
        }
    }

    #[test]
    fn test_project_vertex_perspective_divide() {
        let cam = default_camera();
        assert_eq!(cam.project_vertex(&Vertex::new(1.0, 0.0, -5.0)), Point::new(0.2, 0.0));
        assert_eq!(cam.project_vertex(&Vertex::new(0.0, 1.0, -5.0)), Point::new(0.0, 0.2));
        assert_eq!(cam.project_vertex(&Vertex::new(-2.0, 4.0, -2.0)), Point::new(-1.0, 2.0));
    }

    #[test]
    fn test_project_face() {
        let cam = default_camera();
        let face = Face::new(
            vec![
                Vertex::new(0.0, 0.0, -5.0),
                Vertex::new(3.0, 0.0, -4.0),
                Vertex::new(0.0, 1.0, -5.0),
            ],
            Color::rgb(255, 255, 255),
        )
        .unwrap();
        let projected = cam.project_face(&face);
        assert_eq!(projected.points().len(), 3);
        assert!(projected.points().iter().all(Point::is_finite));
        assert_eq!(projected.distance(), face.distance(&cam.origin()));
        assert_eq!(projected.color(), Color::WHITE);
    }
}
