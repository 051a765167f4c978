use crate::core::color::Color;
use crate::error::{Error, Result};
use crate::scene::face::Face;
use rand::Rng;

/// Per-channel jitter applied when no explicit variance is configured.
pub const DEFAULT_COLOR_VARIANCE: i32 = 25;

/// An ordered collection of faces sharing a base color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    faces: Vec<Face>,
    /// Color the faces were last painted or varied from.
    base_color: Option<Color>,
    variance: u32,
}

impl Mesh {
    pub fn new(faces: Vec<Face>) -> Self {
        Self {
            faces,
            base_color: None,
            variance: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub fn set_faces(&mut self, faces: Vec<Face>) {
        self.faces = faces;
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn base_color(&self) -> Option<Color> {
        self.base_color
    }

    pub fn variance(&self) -> u32 {
        self.variance
    }

    /// Paints every face with `color`, records it as the base and clears any variance.
    pub fn set_color(&mut self, color: Color) {
        for face in &mut self.faces {
            face.set_color(color);
        }
        self.base_color = Some(color);
        self.variance = 0;
    }

    /// Jitters every face's color around a base using the thread-local RNG.
    ///
    /// See [`Mesh::set_color_variance_with`].
    pub fn set_color_variance(&mut self, base: Option<Color>, variance: i32) -> Result<()> {
        self.set_color_variance_with(&mut rand::rng(), base, variance)
    }

    /// Jitters every face's color around a base.
    ///
    /// The base is `base`, else the recorded base color, else the first face's color.
    /// Each channel is offset by a uniform integer in `[-|variance|, |variance|]`,
    /// then clamped into `[0, 255]`.
    pub fn set_color_variance_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        base: Option<Color>,
        variance: i32,
    ) -> Result<()> {
        let base = base
            .or(self.base_color)
            .or_else(|| self.faces.first().map(Face::color))
            .ok_or(Error::MissingBaseColor)?;

        let spread = i64::from(variance.unsigned_abs());
        let mut jitter = |channel: u8| -> u8 {
            let offset = rng.random_range(-spread..=spread);
            (i64::from(channel) + offset).clamp(0, 255) as u8
        };

        for face in &mut self.faces {
            let color = Color::rgb(jitter(base.r()), jitter(base.g()), jitter(base.b()));
            face.set_color(color);
        }

        self.base_color = Some(base);
        self.variance = variance.unsigned_abs();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn face(color: Color) -> Face {
        Face::from_vertices(
            [
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ],
            color,
        )
    }

    fn mesh_of(n: usize, color: Color) -> Mesh {
        Mesh::new((0..n).map(|_| face(color)).collect())
    }

    #[test]
    fn test_defaults() {
        let mesh = mesh_of(1, Color::rgb(10, 20, 30));
        assert_eq!(mesh.base_color(), None);
        assert_eq!(mesh.variance(), 0);
    }

    #[test]
    fn test_add_preserves_order() {
        let mut mesh = Mesh::default();
        mesh.add(face(Color::rgb(1, 1, 1)));
        mesh.add(face(Color::rgb(2, 2, 2)));
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.faces()[0].color(), Color::rgb(1, 1, 1));
        assert_eq!(mesh.faces()[1].color(), Color::rgb(2, 2, 2));
    }

    #[test]
    fn test_set_color_applies_uniformly() {
        let mut mesh = mesh_of(4, Color::rgb(10, 20, 30));
        mesh.set_color_variance(None, 40).unwrap();

        let shade = Color::rgb(80, 90, 100);
        mesh.set_color(shade);
        assert!(mesh.faces().iter().all(|f| f.color() == shade));
        assert_eq!(mesh.base_color(), Some(shade));
        assert_eq!(mesh.variance(), 0);
    }

    #[test]
    fn test_variance_infers_base_from_first_face() {
        let mut mesh = mesh_of(3, Color::rgb(100, 100, 100));
        let mut rng = StdRng::seed_from_u64(7);
        mesh.set_color_variance_with(&mut rng, None, 15).unwrap();
        assert_eq!(mesh.base_color(), Some(Color::rgb(100, 100, 100)));
        for f in mesh.faces() {
            let (r, g, b) = f.color().to_rgb();
            for c in [r, g, b] {
                assert!((85..=115).contains(&c));
            }
        }
    }

    #[test]
    fn test_variance_prefers_recorded_base() {
        let mut mesh = mesh_of(2, Color::rgb(0, 0, 0));
        mesh.set_color(Color::rgb(200, 200, 200));
        for f in mesh.faces_mut() {
            f.set_color(Color::BLACK);
        }
        mesh.set_color_variance(None, 0).unwrap();
        assert!(mesh.faces().iter().all(|f| f.color() == Color::rgb(200, 200, 200)));
    }

    #[test]
    fn test_variance_on_empty_mesh_without_base_fails() {
        let mut mesh = Mesh::default();
        assert!(matches!(
            mesh.set_color_variance(None, 25),
            Err(Error::MissingBaseColor)
        ));
        // An explicit base is enough even with no faces.
        mesh.set_color_variance(Some(Color::WHITE), 25).unwrap();
        assert_eq!(mesh.base_color(), Some(Color::WHITE));
    }

    #[test]
    fn test_variance_stores_absolute_value() {
        let mut mesh = mesh_of(1, Color::rgb(50, 50, 50));
        mesh.set_color_variance(None, -12).unwrap();
        assert_eq!(mesh.variance(), 12);
    }

    #[test]
    fn test_extreme_variance_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for base in [Color::BLACK, Color::WHITE, Color::rgb(3, 128, 252)] {
            let mut mesh = mesh_of(200, base);
            mesh.set_color_variance_with(&mut rng, Some(base), i32::MIN)
                .unwrap();
            mesh.set_color_variance_with(&mut rng, Some(base), 10_000)
                .unwrap();
            // Colors are u8 so range is guaranteed by type; saturation must be reachable.
            let reds: Vec<u8> = mesh.faces().iter().map(|f| f.color().r()).collect();
            assert!(reds.contains(&0) || reds.contains(&255));
        }
    }

    #[test]
    fn test_seeded_variance_is_deterministic() {
        let mut a = mesh_of(10, Color::rgb(120, 60, 30));
        let mut b = a.clone();
        a.set_color_variance_with(&mut StdRng::seed_from_u64(5), None, 25)
            .unwrap();
        b.set_color_variance_with(&mut StdRng::seed_from_u64(5), None, 25)
            .unwrap();
        assert_eq!(a, b);
    }
}
