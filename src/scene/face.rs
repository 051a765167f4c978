use crate::core::color::Color;
use crate::core::geometry::{Point, Vertex};
use crate::error::{Error, Result};
use std::cmp::Ordering;

fn into_triple<T>(points: Vec<T>) -> Result<[T; 3]> {
    let count = points.len();
    <[T; 3]>::try_from(points).map_err(|_| Error::InvalidPointCount(count))
}

/// A triangle in world space: exactly three vertices and a flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    points: [Vertex; 3],
    color: Color,
}

impl Face {
    /// Builds a face from a list of vertices. Any count other than 3 is rejected.
    pub fn new(points: Vec<Vertex>, color: Color) -> Result<Self> {
        Ok(Self::from_vertices(into_triple(points)?, color))
    }

    pub fn from_vertices(points: [Vertex; 3], color: Color) -> Self {
        Self { points, color }
    }

    pub fn points(&self) -> &[Vertex; 3] {
        &self.points
    }

    /// Replaces the vertices. On a bad count the face is left untouched.
    pub fn set_points(&mut self, points: Vec<Vertex>) -> Result<()> {
        self.points = into_triple(points)?;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Arithmetic mean of the three vertices.
    pub fn centroid(&self) -> Vertex {
        let [a, b, c] = &self.points;
        Vertex::mean_of(a, b, c)
    }

    /// The candidate among {centroid, v0, v1, v2} nearest to `point`.
    ///
    /// The centroid wins ties: a vertex only replaces it when strictly closer.
    pub fn closest_point(&self, point: &Vertex) -> Vertex {
        let mut closest = self.centroid();
        let mut delta = closest.distance(point);

        for vertex in &self.points {
            let candidate = vertex.distance(point);
            if candidate < delta {
                delta = candidate;
                closest = *vertex;
            }
        }
        closest
    }

    /// Depth metric used for painter's sorting: the mean of the two largest
    /// vertex distances to `point`.
    pub fn distance(&self, point: &Vertex) -> f64 {
        let mut distances = self.points.map(|v| v.distance(point));
        distances.sort_by(|a, b| b.total_cmp(a));
        (distances[0] + distances[1]) / 2.0
    }

    pub fn distance_closest(&self, point: &Vertex) -> f64 {
        point.distance(&self.closest_point(point))
    }
}

/// A face after projection: three plane points, the depth to sort by, and the color to fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Face2D {
    points: [Point; 3],
    distance: f64,
    color: Color,
}

impl Face2D {
    pub fn new(points: Vec<Point>, distance: f64, color: Color) -> Result<Self> {
        Ok(Self::from_points(into_triple(points)?, distance, color))
    }

    pub fn from_points(points: [Point; 3], distance: f64, color: Color) -> Self {
        Self {
            points,
            distance,
            color,
        }
    }

    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) -> Result<()> {
        self.points = into_triple(points)?;
        Ok(())
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Total order on depth, nearest first.
    pub fn cmp_distance(&self, other: &Face2D) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_face() -> Face {
        Face::new(
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ],
            Color::rgb(10, 20, 30),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_point_counts() {
        for n in [0usize, 1, 2, 4, 5] {
            let points = vec![Vertex::origin(); n];
            assert!(matches!(
                Face::new(points, Color::BLACK),
                Err(Error::InvalidPointCount(count)) if count == n
            ));
        }
    }

    #[test]
    fn test_set_points_rejects_and_preserves() {
        let mut face = unit_face();
        let before = *face.points();
        let result = face.set_points(vec![Vertex::origin(); 4]);
        assert!(matches!(result, Err(Error::InvalidPointCount(4))));
        assert_eq!(face.points(), &before);

        face.set_points(vec![Vertex::new(1.0, 1.0, 1.0); 3]).unwrap();
        assert_eq!(face.points()[0], Vertex::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_centroid_is_exact_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let vs: Vec<Vertex> = (0..3)
                .map(|_| {
                    Vertex::new(
                        rng.random_range(-1e3..1e3),
                        rng.random_range(-1e3..1e3),
                        rng.random_range(-1e3..1e3),
                    )
                })
                .collect();
            let face = Face::new(vs.clone(), Color::BLACK).unwrap();
            let c = face.centroid();
            assert_eq!(c.x(), (vs[0].x() + vs[1].x() + vs[2].x()) / 3.0);
            assert_eq!(c.y(), (vs[0].y() + vs[1].y() + vs[2].y()) / 3.0);
            assert_eq!(c.z(), (vs[0].z() + vs[1].z() + vs[2].z()) / 3.0);
        }
    }

    #[test]
    fn test_closest_point_prefers_vertex_when_strictly_closer() {
        let face = unit_face();
        let p = Vertex::new(2.0, 0.0, 0.0);
        assert_eq!(face.closest_point(&p), Vertex::new(1.0, 0.0, 0.0));
        assert_eq!(face.distance_closest(&p), 1.0);
    }

    #[test]
    fn test_closest_point_centroid_wins_ties() {
        // All three vertices coincide with the centroid.
        let v = Vertex::new(1.0, 2.0, 3.0);
        let face = Face::new(vec![v; 3], Color::BLACK).unwrap();
        let p = Vertex::new(5.0, 5.0, 5.0);
        assert_eq!(face.closest_point(&p), face.centroid());
    }

    #[test]
    fn test_closest_point_near_centroid() {
        let face = unit_face();
        let c = face.centroid();
        let p = Vertex::new(c.x(), c.y(), 0.1);
        assert_eq!(face.closest_point(&p), c);
    }

    #[test]
    fn test_distance_averages_two_farthest() {
        let face = Face::new(
            vec![
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(3.0, 0.0, 0.0),
                Vertex::new(5.0, 0.0, 0.0),
            ],
            Color::BLACK,
        )
        .unwrap();
        assert_eq!(face.distance(&Vertex::origin()), 4.0);
    }

    #[test]
    fn test_distance_bounded_by_vertex_distances() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..500 {
            let mut v = || {
                Vertex::new(
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                )
            };
            let face = Face::new(vec![v(), v(), v()], Color::BLACK).unwrap();
            let p = v();
            let ds = face.points().map(|x| x.distance(&p));
            let min = ds.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = ds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let d = face.distance(&p);
            assert!(d >= min && d <= max, "{d} not in [{min}, {max}]");
        }
    }

    #[test]
    fn test_face2d_requires_three_points() {
        assert!(Face2D::new(vec![Point::default(); 2], 1.0, Color::BLACK).is_err());
        let face = Face2D::new(vec![Point::default(); 3], 1.0, Color::BLACK).unwrap();
        assert_eq!(face.points().len(), 3);
    }

    #[test]
    fn test_face2d_ordering_by_distance() {
        let near = Face2D::from_points([Point::default(); 3], 1.0, Color::BLACK);
        let far = Face2D::from_points([Point::default(); 3], 2.0, Color::BLACK);
        assert_eq!(near.cmp_distance(&far), Ordering::Less);
        assert_eq!(far.cmp_distance(&near), Ordering::Greater);
        assert_eq!(far.cmp_distance(&far.clone()), Ordering::Equal);

        // Same depth, different color: tied for sorting, yet distinct faces.
        let twin = Face2D::from_points([Point::default(); 3], 2.0, Color::WHITE);
        assert_eq!(far.cmp_distance(&twin), Ordering::Equal);
        assert_ne!(far, twin);

        let mut faces = [far.clone(), near.clone(), twin.clone()];
        faces.sort_by(|a, b| b.cmp_distance(a));
        assert_eq!(faces, [far, twin, near]);
    }
}
