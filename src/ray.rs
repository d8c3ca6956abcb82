use crate::tuple::Tuple3D;

/// A ray with an origin point and a unit direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray3D {
    pub origin: Tuple3D,
    pub direction: Tuple3D,
}

impl Ray3D {
    /// Creates a ray. The direction is normalized here so intersection
    /// routines can rely on a unit direction.
    pub fn new(origin: Tuple3D, direction: Tuple3D) -> Ray3D {
        Ray3D { origin, direction: direction.normalize() }
    }

    pub fn position(&self, t: f64) -> Tuple3D {
        self.origin + (t * self.direction)
    }
}

#[test]
fn ray_position() {
    let r = Ray3D::new(
                Tuple3D::point(2.0, 3.0, 4.0),
                Tuple3D::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple3D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple3D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple3D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple3D::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_direction_is_normalized() {
    let r = Ray3D::new(
                Tuple3D::point(0.0, 0.0, 0.0),
                Tuple3D::vector(0.0, 3.0, 4.0)
            );

    assert_eq!(r.direction, Tuple3D::vector(0.0, 0.6, 0.8));
}
