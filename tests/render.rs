use whitted::camera::Camera;
use whitted::canvas::Canvas;
use whitted::color::Color;
use whitted::config::{ RenderConfig, ShadowPolicy };
use whitted::error::{ RenderError, SceneError };
use whitted::light::{ Material, PointLight };
use whitted::ray::Ray3D;
use whitted::scene::demo_world;
use whitted::shape::Shape;
use whitted::tuple::Tuple3D;
use whitted::world::World;

/// Camera at the origin looking down +z through a screen at z = 1.
fn forward_config(width: usize, height: usize, depth_max: usize)
    -> RenderConfig {
    RenderConfig {
        width,
        height,
        depth_max,
        camera_pos: Tuple3D::zero(),
        look_at: Tuple3D::point(0.0, 0.0, 1.0),
        screen_shift: 0.0,
        progress: false,
        ..Default::default()
    }
}

fn red_sphere_world() -> World {
    let sphere = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0)
        .with_material(Material::new(Color::red()));
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 5.0, 0.0));

    World::new(vec![sphere], vec![light]).unwrap()
}

#[test]
fn single_red_sphere_scene() {
    let config = forward_config(40, 30, 1);
    let world = red_sphere_world();
    let camera = Camera::new(&config);

    let center = camera.render_pixel(20, 15, &world, &config);
    assert!(center.r > config.ambient);
    assert!(center.r > center.g);
    assert!(center != Color::black());

    let corner = camera.render_pixel(0, 0, &world, &config);
    assert_eq!(corner, Color::black());
}

#[test]
fn rendered_canvas_matches_per_pixel_function() {
    let config = forward_config(16, 12, 1);
    let world = red_sphere_world();
    let camera = Camera::new(&config);

    let canvas = camera.render(&world, &config);
    for i in 0..config.width {
        for j in 0..config.height {
            let expected = camera.render_pixel(i, j, &world, &config);
            let row = config.height - 1 - j;
            assert_eq!(canvas.read_pixel(i, row), Some(expected));
        }
    }

    assert_eq!(canvas.read_pixel(0, 0), Some(Color::black()));
    assert_ne!(canvas.read_pixel(8, 5), Some(Color::black()));
}

#[test]
fn empty_world_renders_black() {
    let config = forward_config(8, 6, 5);
    let canvas = Camera::new(&config).render(&World::empty(), &config);

    assert_eq!(canvas, Canvas::new(8, 6));
}

/// A mirror sphere in front of the camera reflects the ray straight back
/// onto a red sphere behind the camera.
fn mirror_world() -> World {
    let mirror = Shape::sphere(Tuple3D::point(0.0, 0.0, 3.0), 1.0)
        .with_material(Material::new(Color::black()).with_reflection(1.0));
    let diffuse = Shape::sphere(Tuple3D::point(0.0, 0.0, -3.0), 1.0)
        .with_material(Material::new(Color::red()).with_reflection(0.5));
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 5.0, 0.0));

    World::new(vec![mirror, diffuse], vec![light]).unwrap()
}

#[test]
fn deeper_reflections_never_darken() {
    let world = mirror_world();
    let ray = Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 0.0, 1.0));

    let mut previous = -1.0;
    for depth_max in 1..=5 {
        let config = forward_config(1, 1, depth_max);
        let brightness = world.color_at(ray, &config).clamp().brightness();

        assert!(brightness >= previous,
            "depth {} got {} after {}", depth_max, brightness, previous);
        previous = brightness;
    }

    let shallow = world.color_at(ray, &forward_config(1, 1, 1));
    let deep = world.color_at(ray, &forward_config(1, 1, 5));
    assert!(deep.r > shallow.r);
}

#[test]
fn shadow_policies_differ_only_when_occluded() {
    let target = Shape::sphere(Tuple3D::point(0.0, 0.0, 2.0), 1.0)
        .with_material(Material::new(Color::red()));
    let blocker = Shape::sphere(Tuple3D::point(0.0, 0.0, -2.0), 0.5);
    let lights = vec![
        PointLight::new(Color::white(), Tuple3D::point(0.0, 0.0, -10.0)),
        PointLight::new(Color::white(), Tuple3D::point(0.0, 5.0, 0.0)),
    ];
    let world = World::new(vec![target, blocker], lights).unwrap();
    let ray = Ray3D::new(Tuple3D::zero(), Tuple3D::vector(0.0, 0.0, 1.0));

    let abort = forward_config(1, 1, 5);
    let per_light = RenderConfig {
        shadow_policy: ShadowPolicy::PerLight,
        ..forward_config(1, 1, 5)
    };

    assert_eq!(world.color_at(ray, &abort), Color::black());
    assert!(world.color_at(ray, &per_light).r > 0.0);

    let unshadowed = red_sphere_world();
    assert_eq!(unshadowed.color_at(ray, &abort),
        unshadowed.color_at(ray, &per_light));
}

#[test]
fn light_list_mismatch_is_a_configuration_error() {
    let positions = [Tuple3D::point(0.0, 1.0, 0.0)];
    let colors = [Color::white(), Color::white()];

    let err: RenderError = PointLight::from_lists(&positions, &colors)
        .unwrap_err().into();
    assert!(matches!(err,
        RenderError::Scene(SceneError::LightCountMismatch { .. })));
    assert!(err.to_string().contains("1 light positions but 2 light colors"));
}

#[test]
fn demo_scene_renders_and_saves() {
    let config = RenderConfig {
        width: 32,
        height: 24,
        progress: false,
        ..Default::default()
    };
    let world = demo_world().unwrap();
    let canvas = Camera::new(&config).render(&world, &config);

    let lit = (0..32).flat_map(|x| (0..24).map(move |y| (x, y)))
        .filter(|&(x, y)| canvas.read_pixel(x, y).unwrap() != Color::black())
        .count();
    assert!(lit > 0);

    let dir = std::env::temp_dir();
    let png = dir.join(format!("whitted-demo-{}.png", std::process::id()));
    let ppm = dir.join(format!("whitted-demo-{}.ppm", std::process::id()));

    canvas.save(&png).unwrap();
    canvas.save(&ppm).unwrap();

    let ppm_text = std::fs::read_to_string(&ppm).unwrap();
    assert!(ppm_text.starts_with("P3\n32 24\n255\n"));
    assert!(std::fs::metadata(&png).unwrap().len() > 0);

    std::fs::remove_file(&png).ok();
    std::fs::remove_file(&ppm).ok();
}

#[test]
fn unwritable_output_is_an_io_error() {
    let canvas = Canvas::new(2, 2);
    let path = std::env::temp_dir()
        .join("whitted-missing-dir")
        .join("nested")
        .join("out.ppm");

    assert!(matches!(canvas.save(&path), Err(RenderError::Io(_))));
}
