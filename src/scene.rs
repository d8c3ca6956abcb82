//! Primitive factories and the built-in demo scene.

use crate::consts::CHECKER_FREQUENCY;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::pattern::{ CheckerPattern, SurfaceColor };
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::world::World;
use crate::error::SceneError;

/// A sphere with a solid color that reflects half of the incoming light.
pub fn glossy_sphere(center: Tuple3D, radius: f64, color: Color) -> Shape {
    Shape::sphere(center, radius)
        .with_material(Material::new(color).with_reflection(0.5))
}

/// A triangle with a solid color that reflects half of the incoming light.
pub fn glossy_triangle(p1: Tuple3D, p2: Tuple3D, p3: Tuple3D, color: Color)
    -> Shape {
    Shape::triangle(p1, p2, p3)
        .with_material(Material::new(color).with_reflection(0.5))
}

/// A white and black checkerboard floor with dimmer, less shiny shading.
pub fn checkered_floor(point: Tuple3D, normal: Tuple3D) -> Shape {
    let checker = CheckerPattern::new(Color::white(), Color::black())
        .with_frequency(CHECKER_FREQUENCY);

    Shape::plane(point, normal)
        .with_material(Material::new(SurfaceColor::procedural(checker))
            .with_diffuse(0.75)
            .with_specular(0.5)
            .with_reflection(0.25))
}

/// Three lights: a white key light and two complementary-colored fills.
pub fn demo_lights() -> Result<Vec<PointLight>, SceneError> {
    let positions = [
        Tuple3D::point(6.0, 3.0, -10.0),
        Tuple3D::point(-16.0, 5.0, -8.0),
        Tuple3D::point(2.0, 30.0, -10.0),
    ];
    let colors = [
        Color::white(),
        Color::rgb(1.0, -1.5, 1.0),
        Color::rgb(-2.0, 1.0, 1.0),
    ];

    PointLight::from_lists(&positions, &colors)
}

/// A small triangle, three spheres receding into the distance and a
/// checkerboard floor.
pub fn demo_world() -> Result<World, SceneError> {
    let objects = vec![
        glossy_triangle(
            Tuple3D::point(-0.25, -0.15, -0.1),
            Tuple3D::point(-0.15, 0.10, -0.2),
            Tuple3D::point(-0.10, -0.25, -0.05),
            Color::rgb(0.2, 0.6, 1.0),
        ),
        glossy_sphere(Tuple3D::point(0.75, 0.1, 1.0), 0.6, Color::blue()),
        glossy_sphere(Tuple3D::point(-0.75, 0.1, 2.25), 0.6,
            Color::rgb(0.5, 0.223, 0.5)),
        glossy_sphere(Tuple3D::point(-2.75, 0.1, 3.5), 0.6,
            Color::rgb(1.0, 0.572, 0.184)),
        checkered_floor(Tuple3D::point(0.0, -0.5, 0.0),
            Tuple3D::vector(0.0, 1.0, 0.0)),
    ];

    let world = World::new(objects, demo_lights()?)?;
    log::debug!("built demo world with {} objects and {} lights",
        world.objects.len(), world.lights.len());

    Ok(world)
}

#[test]
fn demo_world_is_valid() {
    let w = demo_world().unwrap();

    assert_eq!(w.objects.len(), 5);
    assert_eq!(w.lights.len(), 3);
    assert_eq!(w.lights[1].intensity, Color::rgb(1.0, -1.5, 1.0));
}

#[test]
fn floor_material_overrides_defaults() {
    let floor = checkered_floor(Tuple3D::zero(), Tuple3D::vector(0.0, 1.0, 0.0));
    let s = floor.material.shading(1.0, 1.0, 50.0);

    assert_eq!(s.diffuse, 0.75);
    assert_eq!(s.specular, 0.5);
    assert_eq!(floor.material.reflection(), 0.25);
}

#[test]
fn floor_checker_alternates_between_adjacent_cells() {
    let floor = checkered_floor(Tuple3D::point(0.0, -0.5, 0.0),
        Tuple3D::vector(0.0, 1.0, 0.0));

    // floor(2x) differs by exactly one: different colors.
    let a = floor.material.color.color_at(Tuple3D::point(0.1, -0.5, 0.1));
    let b = floor.material.color.color_at(Tuple3D::point(0.6, -0.5, 0.1));
    assert_ne!(a, b);

    // floor(2x) differs by two: same color.
    let c = floor.material.color.color_at(Tuple3D::point(1.1, -0.5, 0.1));
    assert_eq!(a, c);
}

#[test]
fn glossy_shapes_reflect_half() {
    let s = glossy_sphere(Tuple3D::zero(), 1.0, Color::red());

    assert_eq!(s.material.reflection(), 0.5);
    assert_eq!(s.material.color.color_at(Tuple3D::zero()), Color::red());
}
