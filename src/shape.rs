use crate::consts::{ FEQ_EPSILON, PARALLEL_EPSILON };
use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::light::Material;
use crate::error::SceneError;

/// Precomputed edges and normal of a triangle.
///
/// Vertex order defines orientation: the normal is `normalize(e1 x e2)`,
/// where `e1 = p2 - p1` and `e2 = p3 - p1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleInfo {
    pub p1: Tuple3D,
    pub p2: Tuple3D,
    pub p3: Tuple3D,

    pub e1: Tuple3D,
    pub e2: Tuple3D,
    pub normal: Tuple3D,
}

impl TriangleInfo {
    pub fn new(p1: Tuple3D, p2: Tuple3D, p3: Tuple3D) -> TriangleInfo {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e1.cross(&e2).normalize();

        TriangleInfo { p1, p2, p3, e1, e2, normal }
    }

    /// Whether the vertices are (nearly) collinear.
    ///
    /// Compares the sine of the angle between the edges, so the test does
    /// not depend on the size of the triangle. Coincident vertices count as
    /// degenerate.
    pub fn is_degenerate(&self) -> bool {
        let area = self.e1.cross(&self.e2).magnitude();
        area <= FEQ_EPSILON * self.e1.magnitude() * self.e2.magnitude()
    }

    pub fn centroid(&self) -> Tuple3D {
        (self.p1 + self.p2 + self.p3) * (1.0 / 3.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeType {
    /// An infinite plane through `point`, facing along the unit `normal`.
    Plane { point: Tuple3D, normal: Tuple3D },

    /// A sphere around `center`.
    Sphere { center: Tuple3D, radius: f64 },

    /// A triangle. See TriangleInfo for further explanation.
    Triangle(TriangleInfo),
}

/// A primitive in the scene: its geometry plus its material.
#[derive(Debug, Clone)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,
}

impl Shape {
    /// Creates a plane. The normal is normalized here.
    pub fn plane(point: Tuple3D, normal: Tuple3D) -> Shape {
        Shape {
            ty: ShapeType::Plane { point, normal: normal.normalize() },
            material: Default::default(),
        }
    }

    pub fn sphere(center: Tuple3D, radius: f64) -> Shape {
        Shape {
            ty: ShapeType::Sphere { center, radius },
            material: Default::default(),
        }
    }

    /// Creates a triangle, defined by three points in space.
    pub fn triangle(p1: Tuple3D, p2: Tuple3D, p3: Tuple3D) -> Shape {
        Shape {
            ty: ShapeType::Triangle(TriangleInfo::new(p1, p2, p3)),
            material: Default::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Returns a ref. to `TriangleInfo` if this is a triangle.
    pub fn triangle_info(&self) -> Option<&TriangleInfo> {
        if let ShapeType::Triangle(ref info) = self.ty {
            Some(info)
        } else {
            None
        }
    }

    /// Checks the geometric invariants of the shape. `index` is the shape's
    /// position in the scene and is only used for the error.
    pub fn validate(&self, index: usize) -> Result<(), SceneError> {
        match self.ty {
            ShapeType::Plane { normal, .. } => {
                if normal.try_normalize().is_none() {
                    return Err(SceneError::DegeneratePlane { index });
                }
            },
            ShapeType::Sphere { radius, .. } => {
                if radius <= 0.0 || !radius.is_finite() {
                    return Err(SceneError::InvalidRadius { index, radius });
                }
            },
            ShapeType::Triangle(ref ti) => {
                if ti.is_degenerate() {
                    return Err(SceneError::DegenerateTriangle { index });
                }
            },
        }

        Ok(())
    }

    /// Distance along `ray` to the first intersection with this shape, if
    /// any. The ray direction must be unit length.
    pub fn intersect(&self, ray: &Ray3D) -> Option<f64> {
        match self.ty {
            ShapeType::Plane { point, normal }
                => intersect_plane(ray, point, normal),
            ShapeType::Sphere { center, radius }
                => intersect_sphere(ray, center, radius),
            ShapeType::Triangle(ref ti)
                => intersect_triangle(ray, ti),
        }
    }

    /// The surface normal at a point on the shape.
    pub fn normal_at(&self, point: Tuple3D) -> Tuple3D {
        match self.ty {
            ShapeType::Plane { normal, .. } => normal,
            ShapeType::Sphere { center, .. } => (point - center).normalize(),
            ShapeType::Triangle(ref ti) => ti.normal,
        }
    }
}

/// Intersects a ray with the plane through `point` with unit `normal`.
///
/// Rays (nearly) parallel to the plane miss, as do planes behind the origin.
pub fn intersect_plane(ray: &Ray3D, point: Tuple3D, normal: Tuple3D)
    -> Option<f64> {
    let denom = ray.direction.dot(&normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (point - ray.origin).dot(&normal) / denom;
    if t < 0.0 {
        None
    } else {
        Some(t)
    }
}

/// Intersects a ray with a sphere, returning the nearest non-negative root.
///
/// Roots are computed with the cancellation-free form of the quadratic
/// formula: `q = -(b + sign(b) sqrt(disc)) / 2`, `t0 = q / a`, `t1 = c / q`.
pub fn intersect_sphere(ray: &Ray3D, center: Tuple3D, radius: f64)
    -> Option<f64> {
    let a = ray.direction.dot(&ray.direction);
    let center_to_origin = ray.origin - center;
    let b = 2.0 * ray.direction.dot(&center_to_origin);
    let c = center_to_origin.dot(&center_to_origin) - radius * radius;

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let disc_sqrt = disc.sqrt();
    let q = if b < 0.0 {
        (-b + disc_sqrt) / 2.0
    } else {
        (-b - disc_sqrt) / 2.0
    };

    // Only possible when the origin sits exactly on the tangent point.
    if q == 0.0 {
        return Some(0.0);
    }

    let mut t0 = q / a;
    let mut t1 = c / q;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    if t1 < 0.0 {
        None
    } else if t0 < 0.0 {
        Some(t1)
    } else {
        Some(t0)
    }
}

/// Intersects a ray with a triangle.
///
/// The ray is first intersected with the triangle's plane. The hit point is
/// inside when it lies on the inner side of all three edges, that is when
/// `((b - a) x (p - a)) . n >= 0` for each directed edge `a -> b`. Points
/// exactly on an edge count as inside.
pub fn intersect_triangle(ray: &Ray3D, ti: &TriangleInfo) -> Option<f64> {
    let t = intersect_plane(ray, ti.p1, ti.normal)?;
    let p = ray.position(t);

    let edges = [(ti.p1, ti.p2), (ti.p2, ti.p3), (ti.p3, ti.p1)];
    let inside = edges.iter().all(|&(a, b)| {
        (b - a).cross(&(p - a)).dot(&ti.normal) >= 0.0
    });

    if inside {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
fn unit_triangle() -> Shape {
    Shape::triangle(
        Tuple3D::point(0.0, 1.0, 0.0),
        Tuple3D::point(-1.0, 0.0, 0.0),
        Tuple3D::point(1.0, 0.0, 0.0),
    )
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));
    let r = Ray3D::new(
        Tuple3D::point(0.0, 1.0, 0.0),
        Tuple3D::vector(0.0, -1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), Some(1.0));
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));
    let r = Ray3D::new(
        Tuple3D::point(0.0, -1.0, 0.0),
        Tuple3D::vector(0.0, 1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), Some(1.0));
}

#[test]
fn ray_parallel_to_plane_misses() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));

    let origins = [
        Tuple3D::point(0.0, 10.0, 0.0),
        Tuple3D::point(0.0, 0.0, 0.0),
        Tuple3D::point(3.0, -2.0, 7.0),
    ];
    for origin in origins.iter() {
        let r = Ray3D::new(*origin, Tuple3D::vector(1.0, 0.0, 1.0));
        assert_eq!(p.intersect(&r), None);
    }
}

#[test]
fn plane_behind_ray_misses() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));
    let r = Ray3D::new(
        Tuple3D::point(0.0, 1.0, 0.0),
        Tuple3D::vector(0.0, 1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), None);
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::vector(0.0, 2.0, 0.0));

    assert_eq!(p.normal_at(Tuple3D::point(0.0, 0.0, 0.0)),
        Tuple3D::vector(0.0, 1.0, 0.0));
    assert_eq!(p.normal_at(Tuple3D::point(10.0, 0.0, -10.0)),
        Tuple3D::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_at_sphere_center_hits_front_surface() {
    let s = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0);
    let origin = Tuple3D::point(0.0, 0.0, -3.0);
    let r = Ray3D::new(origin, Tuple3D::vector(0.0, 0.0, 1.0));

    let expected = (origin - Tuple3D::point(0.0, 0.0, 2.0)).magnitude() - 1.0;
    let t = s.intersect(&r).expect("ray aimed at the center must hit");
    assert!((t - expected).abs() < 1e-9);
}

#[test]
fn ray_at_offset_sphere_center_hits_front_surface() {
    let center = Tuple3D::point(1.0, -2.0, 5.0);
    let s = Shape::sphere(center, 0.5);
    let origin = Tuple3D::point(-1.0, 3.0, 0.0);
    let r = Ray3D::new(origin, center - origin);

    let t = s.intersect(&r).unwrap();
    assert!((t - ((origin - center).magnitude() - 0.5)).abs() < 1e-9);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere(Tuple3D::zero(), 1.0);
    let r = Ray3D::new(
        Tuple3D::point(0.0, 2.0, -5.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere(Tuple3D::zero(), 1.0);
    let r = Ray3D::new(
        Tuple3D::point(0.0, 1.0, -5.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(s.intersect(&r), Some(5.0));
}

#[test]
fn ray_inside_sphere_hits_far_side() {
    let s = Shape::sphere(Tuple3D::zero(), 1.0);
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), Some(1.0));
}

#[test]
fn sphere_behind_ray_misses() {
    let s = Shape::sphere(Tuple3D::zero(), 1.0);
    let r = Ray3D::new(
        Tuple3D::point(0.0, 0.0, 5.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn normal_on_sphere_points_outward() {
    let s = Shape::sphere(Tuple3D::point(0.0, 1.0, 0.0), 2.0);

    assert_eq!(s.normal_at(Tuple3D::point(0.0, 3.0, 0.0)),
        Tuple3D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple3D::point(2.0, 1.0, 0.0)),
        Tuple3D::vector(1.0, 0.0, 0.0));
}

#[test]
fn construct_triangle() {
    let t = unit_triangle();
    let ti = t.triangle_info().unwrap();

    assert_eq!(ti.e1, Tuple3D::vector(-1.0, -1.0, 0.0));
    assert_eq!(ti.e2, Tuple3D::vector(1.0, -1.0, 0.0));
    assert_eq!(ti.normal, Tuple3D::vector(0.0, 0.0, 1.0));
}

#[test]
fn triangle_normal_ignores_hit_point() {
    let t = unit_triangle();

    assert_eq!(t.normal_at(Tuple3D::point(0.0, 0.5, 0.0)),
        Tuple3D::vector(0.0, 0.0, 1.0));
    assert_eq!(t.normal_at(Tuple3D::point(-0.5, 0.75, 0.0)),
        Tuple3D::vector(0.0, 0.0, 1.0));
}

#[test]
fn ray_through_triangle_centroid_along_normal_hits() {
    let t = unit_triangle();
    let ti = *t.triangle_info().unwrap();
    let origin = ti.centroid() - ti.normal * 2.0;
    let r = Ray3D::new(origin, ti.normal);

    assert_eq!(t.intersect(&r), Some(2.0));
}

#[test]
fn ray_against_triangle_normal_also_hits() {
    let t = unit_triangle();
    let ti = *t.triangle_info().unwrap();
    let origin = ti.centroid() + ti.normal * 3.0;
    let r = Ray3D::new(origin, -ti.normal);

    assert_eq!(t.intersect(&r), Some(3.0));
}

#[test]
fn ray_parallel_to_triangle_misses() {
    let t = unit_triangle();
    let r = Ray3D::new(
        Tuple3D::point(0.0, -1.0, -2.0),
        Tuple3D::vector(0.0, 1.0, 0.0)
    );

    assert_eq!(t.intersect(&r), None);
}

#[test]
fn ray_along_extended_edge_misses() {
    let t = unit_triangle();

    // Past p1 -> p2, beyond p2.
    let r = Ray3D::new(
        Tuple3D::point(-2.0, -1.0, -2.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );
    assert_eq!(t.intersect(&r), None);

    // Past p1 -> p3, beyond p3.
    let r = Ray3D::new(
        Tuple3D::point(2.0, -1.0, -2.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );
    assert_eq!(t.intersect(&r), None);

    // Below the p2 -> p3 edge.
    let r = Ray3D::new(
        Tuple3D::point(0.0, -1.0, -2.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );
    assert_eq!(t.intersect(&r), None);
}

#[test]
fn ray_exactly_on_triangle_edge_hits() {
    let t = unit_triangle();
    let r = Ray3D::new(
        Tuple3D::point(0.5, 0.0, -2.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(t.intersect(&r), Some(2.0));
}

#[test]
fn ray_exactly_on_triangle_vertex_hits() {
    let t = unit_triangle();
    let r = Ray3D::new(
        Tuple3D::point(1.0, 0.0, -1.0),
        Tuple3D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(t.intersect(&r), Some(1.0));
}

#[test]
fn validation_rejects_bad_geometry() {
    let flat = Shape::sphere(Tuple3D::zero(), 0.0);
    let line = Shape::triangle(
        Tuple3D::point(0.0, 0.0, 0.0),
        Tuple3D::point(1.0, 1.0, 1.0),
        Tuple3D::point(2.0, 2.0, 2.0),
    );
    let nowhere = Shape::plane(Tuple3D::zero(), Tuple3D::zero());

    assert!(matches!(flat.validate(3),
        Err(SceneError::InvalidRadius { index: 3, .. })));
    assert!(matches!(line.validate(1),
        Err(SceneError::DegenerateTriangle { index: 1 })));
    assert!(matches!(nowhere.validate(0),
        Err(SceneError::DegeneratePlane { index: 0 })));
    assert!(unit_triangle().validate(0).is_ok());
}

#[test]
fn tiny_triangles_are_only_degenerate_when_collinear() {
    let tiny = Shape::triangle(
        Tuple3D::point(0.0, 0.0, 0.0),
        Tuple3D::point(1e-5, 0.0, 0.0),
        Tuple3D::point(0.0, 1e-5, 0.0),
    );
    let tiny_line = Shape::triangle(
        Tuple3D::point(0.0, 0.0, 0.0),
        Tuple3D::point(1e-5, 1e-5, 0.0),
        Tuple3D::point(2e-5, 2e-5, 0.0),
    );
    let pinched = Shape::triangle(
        Tuple3D::point(1.0, 0.0, 0.0),
        Tuple3D::point(1.0, 0.0, 0.0),
        Tuple3D::point(0.0, 1.0, 0.0),
    );

    assert!(tiny.validate(0).is_ok());
    assert!(matches!(tiny_line.validate(2),
        Err(SceneError::DegenerateTriangle { index: 2 })));
    assert!(matches!(pinched.validate(4),
        Err(SceneError::DegenerateTriangle { index: 4 })));
}
