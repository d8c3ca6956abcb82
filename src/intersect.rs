use crate::consts::SURFACE_OFFSET;
use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::shape::Shape;

/// The nearest intersection of a ray with the scene.
///
/// `index` is the shape's position in the `World`, which doubles as its
/// identity when a ray must skip the shape it starts on.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub index: usize,
    pub what: &'a Shape,
}

/// A record for computations associated with an `Intersection`.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// Index of the object being intersected.
    pub index: usize,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple3D,

    /// A point slightly above the intersected surface. Shadow and reflected
    /// rays start here so the surface doesn't intersect itself ("acne").
    pub over_point: Tuple3D,

    /// Unit vector from the point towards the camera.
    pub eyev: Tuple3D,

    /// The normal vector of the object being intersected.
    pub normalv: Tuple3D,

    /// The intersection ray, reflected across the normal.
    pub reflectv: Tuple3D,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    ///
    /// `eye` is the camera position. It is used for the specular highlight on
    /// every bounce, not just for primary rays.
    pub fn new(r: &Ray3D, hit: &Intersection<'a>, eye: Tuple3D)
        -> IntersectionComputation<'a> {
        let point = r.position(hit.t);
        let normalv = hit.what.normal_at(point);

        IntersectionComputation {
            t: hit.t,
            index: hit.index,
            obj: hit.what,
            point,
            over_point: point + normalv * SURFACE_OFFSET,
            eyev: (eye - point).normalize(),
            normalv,
            reflectv: r.direction.reflect(&normalv).normalize(),
        }
    }

    /// The ray that continues the light path off this surface.
    pub fn reflected_ray(&self) -> Ray3D {
        Ray3D::new(self.over_point, self.reflectv)
    }
}

#[test]
fn precompute_sphere_hit() {
    let s = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0);
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 0.0, 1.0));
    let i = Intersection { t: 1.0, index: 0, what: &s };

    let comps = IntersectionComputation::new(&r, &i, Tuple3D::zero());

    assert_eq!(comps.point, Tuple3D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.normalv, Tuple3D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple3D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.reflectv, Tuple3D::vector(0.0, 0.0, -1.0));
    assert!(comps.over_point.z < comps.point.z);
}

#[test]
fn reflected_ray_starts_above_surface() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));
    let r = Ray3D::new(
        Tuple3D::point(0.0, 1.0, -1.0),
        Tuple3D::vector(0.0, -1.0, 1.0)
    );
    let i = Intersection { t: 2.0f64.sqrt(), index: 0, what: &p };

    let comps = IntersectionComputation::new(&r, &i, r.origin);
    let reflected = comps.reflected_ray();

    assert!(reflected.origin.y > 0.0);
    assert_eq!(reflected.direction,
        Tuple3D::vector(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}
