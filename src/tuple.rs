use std::ops::{ Add, Sub, Neg, Mul };

use serde::{ Serialize, Deserialize };

use crate::feq;

/// A three-component vector, used for both points and directions.
///
/// Points and directions share one representation; which one a value is
/// depends on where it's used (a ray origin is a point, a ray direction is a
/// vector). Equality is component-wise within `FEQ_EPSILON`.
#[derive(Debug, Default, Copy, Clone, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Tuple3D {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl PartialEq for Tuple3D {
    fn eq(&self, other: &Tuple3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl From<[f64; 3]> for Tuple3D {
    fn from(a: [f64; 3]) -> Tuple3D {
        Tuple3D { x: a[0], y: a[1], z: a[2] }
    }
}

impl From<Tuple3D> for [f64; 3] {
    fn from(t: Tuple3D) -> [f64; 3] {
        [t.x, t.y, t.z]
    }
}

impl Tuple3D {
    pub fn new(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    /// Same as `new`; reads better where the value is a location.
    pub fn point(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    /// Same as `new`; reads better where the value is a direction.
    pub fn vector(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    pub fn zero() -> Tuple3D {
        Tuple3D { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Scales the vector to unit length.
    ///
    /// A zero-length vector has no direction; it is returned unchanged rather
    /// than filled with NaNs. Use `try_normalize` where the caller needs to
    /// know.
    pub fn normalize(&self) -> Tuple3D {
        self.try_normalize().unwrap_or(*self)
    }

    /// Scales the vector to unit length, or `None` if it has zero length.
    pub fn try_normalize(&self) -> Option<Tuple3D> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return None;
        }

        Some(Tuple3D {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        })
    }

    pub fn dot(&self, other: &Tuple3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflects a direction across a normal: `d - 2 (d . n) n`.
    pub fn reflect(&self, normal: &Tuple3D) -> Tuple3D {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl Add for Tuple3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Tuple3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Tuple3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a 3D tuple.
///
/// ```
/// use whitted::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
/// assert_eq!(t * 5.0, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Tuple3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a 3D tuple.
impl Mul<Tuple3D> for f64 {
    type Output = Tuple3D;

    fn mul(self, other: Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

/* Tests */

#[test]
fn add_tuples() {
    let a1 = Tuple3D::new(3.0, -2.0, 5.0);
    let a2 = Tuple3D::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Tuple3D::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple3D::point(3.0, 2.0, 1.0);
    let p2 = Tuple3D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple3D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Tuple3D::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_scalar_both_sides() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(a * 3.5, Tuple3D::new(3.5, -7.0, 10.5));
    assert_eq!(0.5 * a, Tuple3D::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Tuple3D::vector(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple3D::vector(1.0, 2.0, 3.0);
    let e = Tuple3D::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
    assert!((v.normalize().magnitude() - 1.0).abs() < 1e-6);
}

#[test]
fn normalize_is_idempotent_on_unit_vectors() {
    let units = [
        Tuple3D::vector(1.0, 0.0, 0.0),
        Tuple3D::vector(0.0, -1.0, 0.0),
        Tuple3D::vector(0.6, 0.0, 0.8),
        Tuple3D::vector(1.0, 1.0, 1.0).normalize(),
    ];

    for u in units.iter() {
        let n = u.normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(n, *u);
        assert_eq!(n.normalize(), n);
    }
}

#[test]
fn normalize_zero_vector_is_a_no_op() {
    let z = Tuple3D::zero();

    assert_eq!(z.normalize(), z);
    assert!(!z.normalize().x.is_nan());
    assert!(z.try_normalize().is_none());
}

#[test]
fn dot_vectors() {
    let a = Tuple3D::vector(1.0, 2.0, 3.0);
    let b = Tuple3D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple3D::vector(1.0, 2.0, 3.0);
    let b = Tuple3D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple3D::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple3D::vector(1.0, -2.0, 1.0));
}

#[test]
fn reflect_45() {
    let v = Tuple3D::vector(1.0, -1.0, 0.0);
    let n = Tuple3D::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple3D::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_head_on_reverses_direction() {
    let d = Tuple3D::vector(0.0, 0.0, 1.0);
    let n = Tuple3D::vector(0.0, 0.0, -1.0);

    assert_eq!(d.reflect(&n), -d);
    assert_eq!(d.reflect(&-n), -d);
}

#[test]
fn reflect_grazing_keeps_direction() {
    let d = Tuple3D::vector(1.0, -0.001, 0.0).normalize();
    let n = Tuple3D::vector(0.0, 1.0, 0.0);
    let r = d.reflect(&n);

    assert!((r.x - d.x).abs() < 1e-5);
    assert!((r.y - d.y).abs() < 3e-3);
    assert!(r.dot(&d) > 0.9999);
}

#[test]
fn deserialize_from_array() {
    let t: Tuple3D = serde_json::from_str("[0.0, 0.35, -1.0]").unwrap();

    assert_eq!(t, Tuple3D::point(0.0, 0.35, -1.0));
}
