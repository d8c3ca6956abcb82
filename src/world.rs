use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::light::{ PointLight, lighting };
use crate::shape::Shape;
use crate::intersect::{ Intersection, IntersectionComputation };
use crate::config::{ RenderConfig, ShadowPolicy };
use crate::error::SceneError;

/// A world with objects and lights.
///
/// Objects are kept in insertion order; when two objects are hit at exactly
/// the same distance, the one added first wins. A `World` is read-only once
/// built, and every tracing call borrows it immutably.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

/// Loop state for one camera ray and its reflections.
#[derive(Copy, Clone, Debug)]
struct PathState {
    ray: Ray3D,
    color: Color,
    weight: f64,
    depth: usize,
}

impl World {
    /// Creates a world, validating every object.
    pub fn new(objects: Vec<Shape>, lights: Vec<PointLight>)
        -> Result<World, SceneError> {
        for (index, obj) in objects.iter().enumerate() {
            obj.validate(index)?;
        }

        for (index, light) in lights.iter().enumerate() {
            if light.is_out_of_range() {
                log::debug!("light {} has color {:?} outside [0, 1]",
                    index, light.intensity);
            }
        }

        Ok(World { objects, lights })
    }

    /// Creates an empty world with no objects and no lights.
    pub fn empty() -> World {
        World { objects: Vec::new(), lights: Vec::new() }
    }

    /// Finds the closest object along a ray.
    ///
    /// The object at index `exclude`, if any, is skipped.
    pub fn find_nearest(&self, r: &Ray3D, exclude: Option<usize>)
        -> Option<Intersection<'_>> {
        let mut nearest: Option<Intersection<'_>> = None;

        for (index, obj) in self.objects.iter().enumerate() {
            if Some(index) == exclude {
                continue;
            }

            if let Some(t) = obj.intersect(r) {
                let closer = match nearest {
                    Some(ref n) => t < n.t,
                    None => true,
                };

                if closer {
                    nearest = Some(Intersection { t, index, what: obj });
                }
            }
        }

        nearest
    }

    /// Determines whether a light is blocked from a point.
    ///
    /// A ray is cast from `point` towards the light, skipping the object at
    /// `exclude`. Any hit along that ray counts, including hits past the
    /// light itself.
    pub fn is_shadowed(&self, point: Tuple3D, light: &PointLight,
        exclude: Option<usize>) -> bool {
        let r = Ray3D::new(point, light.position - point);
        self.find_nearest(&r, exclude).is_some()
    }

    /// Calculates the local color of a hit: ambient plus every light's
    /// diffuse and specular terms.
    ///
    /// Returns `None` under `ShadowPolicy::Abort` when any light is occluded.
    pub fn shade_hit(&self, comps: &IntersectionComputation<'_>,
        config: &RenderConfig) -> Option<Color> {
        let material = &comps.obj.material;
        let surface = material.color.color_at(comps.point);
        let shading = material.shading(
            config.diffuse_c, config.specular_c, config.specular_k
        );

        let mut color = Color::gray(config.ambient);
        for light in self.lights.iter() {
            if self.is_shadowed(comps.over_point, light, Some(comps.index)) {
                match config.shadow_policy {
                    ShadowPolicy::Abort => return None,
                    ShadowPolicy::PerLight => continue,
                }
            }

            color += lighting(&shading, surface, light, comps.point,
                comps.eyev, comps.normalv);
        }

        Some(color)
    }

    /// Traces a single step: nearest hit, then its local color.
    ///
    /// `None` means the ray escaped the scene, or the hit was discarded by
    /// the shadow policy.
    pub fn trace(&self, r: &Ray3D, config: &RenderConfig)
        -> Option<(Color, IntersectionComputation<'_>)> {
        let hit = self.find_nearest(r, None)?;
        let comps = IntersectionComputation::new(r, &hit, config.camera_pos);
        let color = self.shade_hit(&comps, config)?;

        Some((color, comps))
    }

    /// Determines the unclamped color seen along a camera ray.
    ///
    /// Each surface hit adds its local color weighted by the product of the
    /// reflectivities of the surfaces before it, then spawns a mirror ray.
    /// The path ends on a miss, on a discarded hit, or after
    /// `config.depth_max` hits.
    pub fn color_at(&self, r: Ray3D, config: &RenderConfig) -> Color {
        let mut state = PathState {
            ray: r,
            color: Color::black(),
            weight: 1.0,
            depth: 0,
        };

        while state.depth < config.depth_max {
            let (local, comps) = match self.trace(&state.ray, config) {
                Some(traced) => traced,
                None => break,
            };

            state = PathState {
                ray: comps.reflected_ray(),
                color: state.color + local * state.weight,
                weight: state.weight * comps.obj.material.reflection(),
                depth: state.depth + 1,
            };
        }

        state.color
    }
}

#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn config(depth_max: usize, policy: ShadowPolicy) -> RenderConfig {
    RenderConfig {
        depth_max,
        camera_pos: Tuple3D::zero(),
        shadow_policy: policy,
        ..Default::default()
    }
}

#[cfg(test)]
fn red_sphere_world() -> World {
    let sphere = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0)
        .with_material(Material::new(Color::red()));
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 5.0, 0.0));

    World::new(vec![sphere], vec![light]).unwrap()
}

#[cfg(test)]
fn forward() -> Ray3D {
    Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 0.0, 1.0))
}

#[test]
fn nearest_hit_wins() {
    let near = Shape::sphere(Tuple3D::point(0.0, 0.0, 3.0), 1.0);
    let far = Shape::sphere(Tuple3D::point(0.0, 0.0, 10.0), 1.0);
    let w = World::new(vec![far, near], vec![]).unwrap();

    let hit = w.find_nearest(&forward(), None).unwrap();
    assert_eq!(hit.index, 1);
    assert_eq!(hit.t, 2.0);
}

#[test]
fn first_added_wins_exact_ties() {
    let a = Shape::sphere(Tuple3D::point(0.0, 0.0, 3.0), 1.0);
    let b = Shape::sphere(Tuple3D::point(0.0, 0.0, 3.0), 1.0);
    let w = World::new(vec![a, b], vec![]).unwrap();

    let hit = w.find_nearest(&forward(), None).unwrap();
    assert_eq!(hit.index, 0);
    assert!(std::ptr::eq(hit.what, &w.objects[0]));
}

#[test]
fn excluded_object_is_skipped() {
    let near = Shape::sphere(Tuple3D::point(0.0, 0.0, 3.0), 1.0);
    let far = Shape::sphere(Tuple3D::point(0.0, 0.0, 10.0), 1.0);
    let w = World::new(vec![near, far], vec![]).unwrap();

    let hit = w.find_nearest(&forward(), Some(0)).unwrap();
    assert_eq!(hit.index, 1);
    assert!(w.find_nearest(&forward(), Some(1)).is_some());
}

#[test]
fn miss_returns_none() {
    let w = red_sphere_world();
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));

    assert!(w.find_nearest(&r, None).is_none());
    assert_eq!(w.color_at(r, &config(5, ShadowPolicy::Abort)),
        Color::black());
}

#[test]
fn invalid_objects_are_rejected() {
    let bad = Shape::sphere(Tuple3D::zero(), -1.0);
    let ok = Shape::sphere(Tuple3D::zero(), 1.0);

    let err = World::new(vec![ok, bad], vec![]).unwrap_err();
    assert!(matches!(err, SceneError::InvalidRadius { index: 1, .. }));
}

#[test]
fn out_of_range_lights_are_accepted() {
    let sphere = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0);
    let light = PointLight::new(Color::rgb(-2.0, 1.0, 1.0),
        Tuple3D::point(0.0, 5.0, 0.0));

    let w = World::new(vec![sphere], vec![light]).unwrap();
    assert!(w.lights[0].is_out_of_range());
}

#[test]
fn lit_sphere_is_brighter_than_ambient() {
    let w = red_sphere_world();
    let c = w.color_at(forward(), &config(1, ShadowPolicy::Abort));

    assert!(c.r > 0.05 + 0.1);
    assert!(c.r > c.g);
    assert_eq!(c.g, c.b);
}

#[test]
fn shadow_point_between_blocker_and_light() {
    let blocker = Shape::sphere(Tuple3D::point(0.0, 5.0, 0.0), 1.0);
    let w = World::new(vec![blocker], vec![]).unwrap();
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 10.0, 0.0));

    assert!(w.is_shadowed(Tuple3D::zero(), &light, None));
    assert!(!w.is_shadowed(Tuple3D::zero(), &light, Some(0)));
    assert!(!w.is_shadowed(Tuple3D::point(5.0, 0.0, 0.0), &light, None));
}

#[test]
fn blocker_beyond_light_still_shadows() {
    let blocker = Shape::sphere(Tuple3D::point(0.0, 20.0, 0.0), 1.0);
    let w = World::new(vec![blocker], vec![]).unwrap();
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 10.0, 0.0));

    assert!(w.is_shadowed(Tuple3D::zero(), &light, None));
}

/// A red sphere lit by two lights. A small sphere sits between the hit
/// point and the first light.
#[cfg(test)]
fn half_shadowed_world() -> World {
    let target = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0)
        .with_material(Material::new(Color::red()));
    let blocker = Shape::sphere(Tuple3D::point(0.0, 0.0, -2.0), 0.5);
    let lights = vec![
        PointLight::new(Color::white(), Tuple3D::point(0.0, 0.0, -10.0)),
        PointLight::new(Color::white(), Tuple3D::point(0.0, 5.0, 0.0)),
    ];

    World::new(vec![target, blocker], lights).unwrap()
}

#[test]
fn abort_policy_discards_partly_shadowed_hit() {
    let w = half_shadowed_world();
    let c = w.color_at(forward(), &config(5, ShadowPolicy::Abort));

    assert_eq!(c, Color::black());
}

#[test]
fn per_light_policy_keeps_unblocked_lights() {
    let w = half_shadowed_world();
    let cfg = config(1, ShadowPolicy::PerLight);

    let hit = w.find_nearest(&forward(), None).unwrap();
    let comps = IntersectionComputation::new(&forward(), &hit, cfg.camera_pos);
    let c = w.shade_hit(&comps, &cfg).unwrap();

    // Ambient plus the second light only.
    let shading = comps.obj.material.shading(1.0, 1.0, 50.0);
    let expected = Color::gray(0.05) + lighting(&shading, Color::red(),
        &w.lights[1], comps.point, comps.eyev, comps.normalv);
    assert_eq!(c, expected);
    assert!(c.r > 0.05);
}

#[test]
fn depth_limit_zero_renders_black() {
    let w = red_sphere_world();

    assert_eq!(w.color_at(forward(), &config(0, ShadowPolicy::Abort)),
        Color::black());
}

#[test]
fn reflection_weight_attenuates_bounces() {
    // Two facing mirrors; the ray bounces between them until the depth
    // limit, each bounce weighted by the accumulated reflectivity.
    let back = Shape::plane(Tuple3D::point(0.0, 0.0, 5.0),
        Tuple3D::vector(0.0, 0.0, -1.0))
        .with_material(Material::new(Color::black())
            .with_diffuse(0.0).with_specular(0.0).with_reflection(0.5));
    let front = Shape::plane(Tuple3D::point(0.0, 0.0, -5.0),
        Tuple3D::vector(0.0, 0.0, 1.0))
        .with_material(Material::new(Color::black())
            .with_diffuse(0.0).with_specular(0.0).with_reflection(0.5));
    let w = World::new(vec![back, front], vec![]).unwrap();

    let c = w.color_at(forward(), &config(3, ShadowPolicy::Abort));

    // Only ambient survives: 0.05 * (1 + 0.5 + 0.25).
    assert_eq!(c, Color::gray(0.05 * 1.75));
}
