use crate::consts::PROGRESS_COLUMNS;
use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::world::World;
use crate::canvas::Canvas;
use crate::config::RenderConfig;

/// A pinhole camera looking through a flat screen rectangle.
///
/// The screen spans `x` in `[x0, x1]` and `y` in `[y0, y1]` on the plane
/// `z = screen_z`. Pixel column `i` maps to `x0 + (x1 - x0) * i / width` and
/// pixel row `j` (counted from the bottom) to `y0 + (y1 - y0) * j / height`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub position: Tuple3D,

    /// Screen rectangle as `(x0, y0, x1, y1)`.
    pub screen: (f64, f64, f64, f64),
    pub screen_z: f64,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Camera {
        let aspect = config.aspect_ratio();
        let shift = config.screen_shift;

        Camera {
            hsize: config.width,
            vsize: config.height,
            position: config.camera_pos,
            screen: (-1.0, -1.0 / aspect + shift, 1.0, 1.0 / aspect + shift),
            screen_z: config.look_at.z,
        }
    }

    /// The point on the screen that pixel `(i, j)` looks through. `j` counts
    /// rows from the bottom of the image.
    pub fn screen_point(&self, i: usize, j: usize) -> Tuple3D {
        let (x0, y0, x1, y1) = self.screen;
        let u = i as f64 / self.hsize as f64;
        let v = j as f64 / self.vsize as f64;

        Tuple3D::point(x0 + (x1 - x0) * u, y0 + (y1 - y0) * v, self.screen_z)
    }

    pub fn ray_for_pixel(&self, i: usize, j: usize) -> Ray3D {
        let target = self.screen_point(i, j);
        Ray3D::new(self.position, target - self.position)
    }

    /// Computes the final, clamped color of one pixel.
    ///
    /// This touches nothing but the read-only `world`, so pixels can be
    /// computed in any order.
    pub fn render_pixel(&self, i: usize, j: usize, world: &World,
        config: &RenderConfig) -> Color {
        world.color_at(self.ray_for_pixel(i, j), config).clamp()
    }

    /// Renders the whole image, column by column.
    ///
    /// Row `j` of the screen lands in canvas row `vsize - 1 - j`, so the
    /// canvas reads top-down.
    pub fn render(&self, world: &World, config: &RenderConfig) -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);

        log::info!("rendering {}x{} with {} objects and {} lights, depth {}",
            self.hsize, self.vsize, world.objects.len(), world.lights.len(),
            config.depth_max);

        for i in 0..self.hsize {
            if config.progress && i % PROGRESS_COLUMNS == 0 {
                log::info!("{:.1}% complete",
                    i as f64 / self.hsize as f64 * 100.0);
            }

            for j in 0..self.vsize {
                let color = self.render_pixel(i, j, world, config);
                image.write_pixel(i, self.vsize - 1 - j, &color);
            }
        }

        log::info!("render finished");
        image
    }
}

#[test]
fn screen_matches_aspect_ratio() {
    let c = Camera::new(&RenderConfig::default());

    let (x0, y0, x1, y1) = c.screen;
    assert_eq!((x0, x1), (-1.0, 1.0));
    assert!((y0 - (-0.75 + 0.25)).abs() < 1e-12);
    assert!((y1 - (0.75 + 0.25)).abs() < 1e-12);
}

#[test]
fn first_pixel_maps_to_screen_corner() {
    let c = Camera::new(&RenderConfig::default());

    assert_eq!(c.screen_point(0, 0), Tuple3D::point(-1.0, -0.5, 0.0));
}

#[test]
fn center_pixel_maps_to_screen_center() {
    let config = RenderConfig {
        width: 40,
        height: 30,
        screen_shift: 0.0,
        camera_pos: Tuple3D::zero(),
        look_at: Tuple3D::point(0.0, 0.0, 1.0),
        ..Default::default()
    };
    let c = Camera::new(&config);

    assert_eq!(c.screen_point(20, 15), Tuple3D::point(0.0, 0.0, 1.0));

    let r = c.ray_for_pixel(20, 15);
    assert_eq!(r.origin, Tuple3D::zero());
    assert_eq!(r.direction, Tuple3D::vector(0.0, 0.0, 1.0));
}

#[test]
fn ray_directions_are_unit_length() {
    let c = Camera::new(&RenderConfig::default());

    for &(i, j) in [(0, 0), (399, 0), (0, 299), (123, 45)].iter() {
        let r = c.ray_for_pixel(i, j);
        assert!((r.direction.magnitude() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn render_flips_rows() {
    use crate::shape::Shape;
    use crate::light::{ Material, PointLight };

    // A wall that only covers the lower half of the screen.
    let config = RenderConfig {
        width: 4,
        height: 4,
        screen_shift: 0.0,
        camera_pos: Tuple3D::zero(),
        look_at: Tuple3D::point(0.0, 0.0, 1.0),
        progress: false,
        depth_max: 1,
        ..Default::default()
    };
    let floor = Shape::triangle(
        Tuple3D::point(-50.0, -50.0, 5.0),
        Tuple3D::point(50.0, -50.0, 5.0),
        Tuple3D::point(0.0, -0.01, 5.0),
    ).with_material(Material::new(Color::white()));
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 0.0, -5.0));
    let world = World::new(vec![floor], vec![light]).unwrap();

    let canvas = Camera::new(&config).render(&world, &config);

    // Screen row j = 0 is the bottom; it must land in the last canvas row.
    assert!(canvas.read_pixel(2, 3).unwrap().r > 0.0);
    assert_eq!(canvas.read_pixel(2, 0).unwrap(), Color::black());
}
