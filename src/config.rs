use std::fs;
use std::path::Path;

use serde::{ Serialize, Deserialize };

use crate::consts::*;
use crate::tuple::Tuple3D;
use crate::error::RenderError;

/// What happens when a hit point can't see one of the lights.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowPolicy {
    /// Any occluded light discards the whole hit: no color is added for it
    /// and no further reflections are traced.
    Abort,

    /// An occluded light only loses its own diffuse and specular terms.
    PerLight,
}

impl Default for ShadowPolicy {
    fn default() -> ShadowPolicy {
        ShadowPolicy::Abort
    }
}

/// Render-wide parameters.
///
/// Every field has a default, so a JSON config only needs the keys it wants
/// to change:
///
/// ```
/// # use whitted::config::RenderConfig;
/// let config = RenderConfig::from_json_str(r#"{ "width": 64, "height": 48 }"#)
///     .unwrap();
/// assert_eq!(config.depth_max, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,

    /// Maximum number of surfaces a single camera ray may hit.
    pub depth_max: usize,

    pub ambient: f64,
    pub diffuse_c: f64,
    pub specular_c: f64,
    pub specular_k: f64,

    pub camera_pos: Tuple3D,

    /// Only the `z` component is used: it places the screen plane.
    pub look_at: Tuple3D,

    /// Vertical offset of the screen rectangle.
    pub screen_shift: f64,

    pub shadow_policy: ShadowPolicy,

    /// Whether to log a completion percentage while rendering.
    pub progress: bool,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            depth_max: REFLECTION_DEPTH,
            ambient: AMBIENT,
            diffuse_c: DIFFUSE_C,
            specular_c: SPECULAR_C,
            specular_k: SPECULAR_K,
            camera_pos: Tuple3D::point(0.0, 0.35, -1.0),
            look_at: Tuple3D::point(0.0, 0.0, 0.0),
            screen_shift: SCREEN_SHIFT,
            shadow_policy: Default::default(),
            progress: true,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<RenderConfig, RenderError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<RenderConfig, RenderError> {
        let json = fs::read_to_string(path)?;
        RenderConfig::from_json_str(&json)
    }

    /// Rejects values that can't produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        let coefficients = [
            ("ambient", self.ambient),
            ("diffuse_c", self.diffuse_c),
            ("specular_c", self.specular_c),
            ("specular_k", self.specular_k),
        ];
        for (name, value) in coefficients.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(RenderError::Config(format!(
                    "{} must be a non-negative number, got {}", name, value
                )));
            }
        }

        if self.depth_max == 0 {
            log::warn!("depth_max is 0, every pixel will be black");
        }

        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[test]
fn defaults_match_reference() {
    let c = RenderConfig::default();

    assert_eq!((c.width, c.height), (400, 300));
    assert_eq!(c.depth_max, 5);
    assert_eq!(c.ambient, 0.05);
    assert_eq!(c.diffuse_c, 1.0);
    assert_eq!(c.specular_c, 1.0);
    assert_eq!(c.specular_k, 50.0);
    assert_eq!(c.shadow_policy, ShadowPolicy::Abort);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let c = RenderConfig::from_json_str(r#"{
        "depth_max": 2,
        "camera_pos": [0.0, 0.0, 0.0],
        "shadow_policy": "per_light"
    }"#).unwrap();

    assert_eq!(c.depth_max, 2);
    assert_eq!(c.camera_pos, Tuple3D::zero());
    assert_eq!(c.shadow_policy, ShadowPolicy::PerLight);
    assert_eq!(c.width, 400);
}

#[test]
fn unknown_keys_are_rejected() {
    let res = RenderConfig::from_json_str(r#"{ "widht": 10 }"#);

    assert!(matches!(res, Err(RenderError::ConfigParse(_))));
}

#[test]
fn zero_size_is_rejected() {
    let res = RenderConfig::from_json_str(r#"{ "width": 0 }"#);

    assert!(matches!(res, Err(RenderError::Config(_))));
}

#[test]
fn negative_coefficient_is_rejected() {
    let c = RenderConfig { specular_k: -1.0, ..Default::default() };

    assert!(matches!(c.validate(), Err(RenderError::Config(_))));
}
