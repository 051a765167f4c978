use crate::error::{Error, Result};
use approx::relative_eq;
use nalgebra::{Point2, Point3, Vector3};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used by `Vector` equality to absorb drift from normalization and cross products.
const VECTOR_EPSILON: f64 = 1e-9;

/// A location on the 2D projection plane (or in pixel space after the canvas translates it).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(Point2<f64>);

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }

    /// The underlying nalgebra point, for raster math.
    pub fn to_point2(self) -> Point2<f64> {
        self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// A position in 3D world space.
///
/// Subtracting two vertices yields a [`Vector`] (a displacement), never another vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex(Point3<f64>);

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    pub fn origin() -> Self {
        Self(Point3::origin())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Euclidean distance to another vertex.
    pub fn distance(&self, other: &Vertex) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }

    /// Component-wise arithmetic mean of three vertices.
    pub fn mean_of(a: &Vertex, b: &Vertex, c: &Vertex) -> Vertex {
        Vertex::new(
            (a.x() + b.x() + c.x()) / 3.0,
            (a.y() + b.y() + c.y()) / 3.0,
            (a.z() + b.z() + c.z()) / 3.0,
        )
    }
}

impl From<[f64; 3]> for Vertex {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

/// A free displacement or direction in 3D.
///
/// Structurally identical to [`Vertex`] but a distinct type: the two only meet through
/// `Vertex - Vertex -> Vector` and `Vertex + Vector -> Vertex`.
/// Equality is approximate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector(Vector3<f64>);

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// Fails with [`Error::ZeroLengthVector`] when the magnitude is zero.
    pub fn normalize(&self) -> Result<Vector> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(Error::ZeroLengthVector);
        }
        Ok(Self(self.0 / mag))
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(&other.0)
    }

    /// Right-hand-rule cross product.
    pub fn cross(&self, other: &Vector) -> Vector {
        Self(self.0.cross(&other.0))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| {
            relative_eq!(
                *a,
                *b,
                epsilon = VECTOR_EPSILON,
                max_relative = VECTOR_EPSILON
            )
        })
    }
}

impl From<[f64; 3]> for Vector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}

//=================================
// Operators between the kinds
//=================================

impl Sub for Vertex {
    type Output = Vector;

    fn sub(self, rhs: Vertex) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Add<Vector> for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vector) -> Vertex {
        Vertex(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vector) -> Vertex {
        Vertex(self.0 - rhs.0)
    }
}

impl Add<Vertex> for Vector {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        rhs + self
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}
