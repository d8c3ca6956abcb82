use crate::color::Color;
use crate::pattern::SurfaceColor;
use crate::tuple::Tuple3D;
use crate::error::SceneError;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from. The color is not limited to `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple3D,
}

impl PointLight {
    pub fn new(intensity: Color, position: Tuple3D) -> PointLight {
        PointLight { intensity, position }
    }

    /// Whether any channel of the light's color lies outside `[0, 1]`.
    pub fn is_out_of_range(&self) -> bool {
        let c = self.intensity;
        [c.r, c.g, c.b].iter().any(|ch| !(0.0..=1.0).contains(ch))
    }

    /// Pairs up parallel lists of light positions and colors.
    pub fn from_lists(positions: &[Tuple3D], colors: &[Color])
        -> Result<Vec<PointLight>, SceneError> {
        if positions.len() != colors.len() {
            return Err(SceneError::LightCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }

        Ok(positions.iter().zip(colors.iter())
            .map(|(&position, &intensity)| PointLight { intensity, position })
            .collect())
    }
}

/// A material record.
///
/// Unset coefficients fall back to the render-wide defaults; an unset
/// `reflection` means the surface is a perfect mirror for weighting purposes.
#[derive(Clone, Debug, Default)]
pub struct Material {
    pub color: SurfaceColor,

    pub diffuse: Option<f64>,
    pub specular: Option<f64>,
    pub reflection: Option<f64>,
}

impl Material {
    pub fn new(color: impl Into<SurfaceColor>) -> Material {
        Material { color: color.into(), ..Default::default() }
    }

    pub fn with_diffuse(mut self, diffuse: f64) -> Material {
        self.diffuse = Some(diffuse);
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Material {
        self.specular = Some(specular);
        self
    }

    pub fn with_reflection(mut self, reflection: f64) -> Material {
        self.reflection = Some(reflection);
        self
    }

    /// Fraction of incoming light passed on to the next bounce.
    pub fn reflection(&self) -> f64 {
        self.reflection.unwrap_or(1.0)
    }

    /// Resolves the coefficients used by `lighting` against the defaults.
    pub fn shading(&self, diffuse_c: f64, specular_c: f64, specular_k: f64)
        -> Shading {
        Shading {
            diffuse: self.diffuse.unwrap_or(diffuse_c),
            specular: self.specular.unwrap_or(specular_c),
            shininess: specular_k,
        }
    }
}

/// Fully-resolved shading coefficients for one hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shading {
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

/// Calculates the light one source contributes to a point.
///
/// The diffuse term is Lambertian and tinted by the surface color only:
/// `diffuse * max(n . l, 0) * surface`. The specular term is Blinn-Phong and
/// tinted by the light color only:
/// `specular * max(n . normalize(l + e), 0)^shininess * light`.
///
/// Ambient light and shadowing are handled by the caller.
pub fn lighting(shading: &Shading, surface: Color, light: &PointLight,
    point: Tuple3D, eyev: Tuple3D, normalv: Tuple3D) -> Color {
    let lightv = (light.position - point).normalize();

    let light_dot_normal = normalv.dot(&lightv).max(0.0);
    let diffuse = surface * shading.diffuse * light_dot_normal;

    let halfway = (lightv + eyev).normalize();
    let factor = normalv.dot(&halfway).max(0.0).powf(shading.shininess);
    let specular = light.intensity * shading.specular * factor;

    diffuse + specular
}

#[cfg(test)]
fn reference_shading() -> Shading {
    Shading { diffuse: 1.0, specular: 1.0, shininess: 50.0 }
}

#[test]
fn light_lists_must_match() {
    let positions = [Tuple3D::point(0.0, 5.0, 0.0), Tuple3D::point(1.0, 1.0, 1.0)];
    let colors = [Color::white()];

    let err = PointLight::from_lists(&positions, &colors).unwrap_err();
    assert!(matches!(err,
        SceneError::LightCountMismatch { positions: 2, colors: 1 }));
}

#[test]
fn light_lists_pair_in_order() {
    let positions = [Tuple3D::point(0.0, 5.0, 0.0), Tuple3D::point(1.0, 1.0, 1.0)];
    let colors = [Color::white(), Color::rgb(1.0, -1.5, 1.0)];

    let lights = PointLight::from_lists(&positions, &colors).unwrap();
    assert_eq!(lights.len(), 2);
    assert_eq!(lights[1].position, Tuple3D::point(1.0, 1.0, 1.0));
    assert_eq!(lights[1].intensity, Color::rgb(1.0, -1.5, 1.0));
}

#[test]
fn complementary_lights_are_out_of_range() {
    let origin = Tuple3D::zero();

    assert!(!PointLight::new(Color::white(), origin).is_out_of_range());
    assert!(!PointLight::new(Color::black(), origin).is_out_of_range());
    assert!(PointLight::new(Color::rgb(1.0, -1.5, 1.0), origin)
        .is_out_of_range());
    assert!(PointLight::new(Color::rgb(2.0, 0.5, 0.5), origin)
        .is_out_of_range());
}

#[test]
fn material_defaults_resolve() {
    let m = Material::new(Color::red()).with_specular(0.5);
    let s = m.shading(1.0, 1.0, 50.0);

    assert_eq!(s, Shading { diffuse: 1.0, specular: 0.5, shininess: 50.0 });
    assert_eq!(m.reflection(), 1.0);
    assert_eq!(m.with_reflection(0.25).reflection(), 0.25);
}

#[test]
fn eye_between_light_and_surface() {
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 0.0, -10.0));
    let eyev = Tuple3D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple3D::vector(0.0, 0.0, -1.0);

    let res = lighting(&reference_shading(), Color::red(), &light,
        Tuple3D::zero(), eyev, normalv);

    // Full diffuse in red, full specular highlight in white.
    assert_eq!(res, Color::rgb(2.0, 1.0, 1.0));
}

#[test]
fn light_behind_surface_contributes_nothing() {
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 0.0, 10.0));
    let eyev = Tuple3D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple3D::vector(0.0, 0.0, -1.0);

    let res = lighting(&reference_shading(), Color::red(), &light,
        Tuple3D::zero(), eyev, normalv);

    assert_eq!(res, Color::black());
}

#[test]
fn light_at_45_degrees_scales_diffuse() {
    let light = PointLight::new(Color::white(), Tuple3D::point(0.0, 10.0, -10.0));
    let eyev = Tuple3D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple3D::vector(0.0, 0.0, -1.0);
    let shading = Shading { diffuse: 1.0, specular: 0.0, shininess: 50.0 };

    let res = lighting(&shading, Color::white(), &light,
        Tuple3D::zero(), eyev, normalv);

    let cos = 2.0f64.sqrt() / 2.0;
    assert_eq!(res, Color::gray(cos));
}

#[test]
fn specular_uses_light_color() {
    let light = PointLight::new(Color::blue(), Tuple3D::point(0.0, 0.0, -10.0));
    let eyev = Tuple3D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple3D::vector(0.0, 0.0, -1.0);
    let shading = Shading { diffuse: 0.0, specular: 0.5, shininess: 50.0 };

    let res = lighting(&shading, Color::red(), &light,
        Tuple3D::zero(), eyev, normalv);

    assert_eq!(res, Color::rgb(0.0, 0.0, 0.5));
}
