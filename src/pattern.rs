use std::fmt;
use std::sync::Arc;

use crate::consts::CHECKER_FREQUENCY;
use crate::tuple::Tuple3D;
use crate::color::Color;

/// A procedural color: a pure function of the hit point.
pub trait Pattern {
    fn pattern_at(&self, p: Tuple3D) -> Color;
}

impl<F> Pattern for F where F: Fn(Tuple3D) -> Color {
    fn pattern_at(&self, p: Tuple3D) -> Color {
        self(p)
    }
}

/// A checkerboard over the XZ plane.
///
/// Cells are `1 / frequency` wide. For a point `(x, y, z)`, the `primary`
/// color is used when `floor(f * x) mod 2 == floor(f * z) mod 2`, and the
/// `secondary` color otherwise. The Y component is ignored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckerPattern {
    primary: Color,
    secondary: Color,
    frequency: f64,
}

impl CheckerPattern {
    pub fn new(primary: Color, secondary: Color) -> CheckerPattern {
        CheckerPattern { primary, secondary, frequency: CHECKER_FREQUENCY }
    }

    pub fn with_frequency(mut self, frequency: f64) -> CheckerPattern {
        self.frequency = frequency;
        self
    }

    pub fn checker_at(&self, p: Tuple3D) -> Color {
        let cell_x = (p.x * self.frequency).floor().rem_euclid(2.0);
        let cell_z = (p.z * self.frequency).floor().rem_euclid(2.0);

        if cell_x == cell_z {
            self.primary
        } else {
            self.secondary
        }
    }
}

impl Pattern for CheckerPattern {
    fn pattern_at(&self, p: Tuple3D) -> Color {
        self.checker_at(p)
    }
}

/// The color of a surface: either fixed, or resolved per hit point.
#[derive(Clone)]
pub enum SurfaceColor {
    Constant(Color),
    Procedural(Arc<dyn Pattern + Send + Sync>),
}

impl SurfaceColor {
    pub fn procedural<P>(pattern: P) -> SurfaceColor
        where P: Pattern + Send + Sync + 'static {
        SurfaceColor::Procedural(Arc::new(pattern))
    }

    /// Resolves the color at a hit point.
    pub fn color_at(&self, p: Tuple3D) -> Color {
        match self {
            SurfaceColor::Constant(c) => *c,
            SurfaceColor::Procedural(pattern) => pattern.pattern_at(p),
        }
    }
}

impl Default for SurfaceColor {
    fn default() -> SurfaceColor {
        SurfaceColor::Constant(Color::white())
    }
}

impl From<Color> for SurfaceColor {
    fn from(c: Color) -> SurfaceColor {
        SurfaceColor::Constant(c)
    }
}

impl fmt::Debug for SurfaceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceColor::Constant(c) => f.debug_tuple("Constant").field(c).finish(),
            SurfaceColor::Procedural(_) => f.write_str("Procedural(..)"),
        }
    }
}

#[test]
fn checker_alternates_along_x() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    assert_eq!(pattern.checker_at(Tuple3D::point(0.1, 0.0, 0.1)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::point(0.6, 0.0, 0.1)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::point(1.1, 0.0, 0.1)),
        Color::white());
}

#[test]
fn checker_alternates_along_z() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    assert_eq!(pattern.checker_at(Tuple3D::point(0.1, 0.0, 0.1)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::point(0.1, 0.0, 0.6)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::point(0.1, 0.0, 1.6)),
        Color::black());
}

#[test]
fn checker_frequency_sets_cell_size() {
    let pattern = CheckerPattern::new(Color::white(), Color::black())
        .with_frequency(1.0);

    assert_eq!(pattern.checker_at(Tuple3D::point(0.6, 0.0, 0.1)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::point(1.1, 0.0, 0.1)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::point(1.1, 0.0, 1.1)),
        Color::white());
}

#[test]
fn checker_is_constant_along_y() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    for y in [-3.0, -0.5, 0.0, 0.5, 7.0].iter() {
        assert_eq!(pattern.checker_at(Tuple3D::point(0.1, *y, 0.1)),
            Color::white());
    }
}

#[test]
fn checker_handles_negative_coordinates() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    // floor(2 * -0.1) = -1, which is odd.
    assert_eq!(pattern.checker_at(Tuple3D::point(-0.1, 0.0, 0.1)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::point(-0.1, 0.0, -0.1)),
        Color::white());
}

#[test]
fn surface_color_resolves_closures() {
    let constant = SurfaceColor::Constant(Color::red());
    let procedural = SurfaceColor::procedural(|p: Tuple3D| Color::gray(p.x));

    assert_eq!(constant.color_at(Tuple3D::point(5.0, 5.0, 5.0)), Color::red());
    assert_eq!(procedural.color_at(Tuple3D::point(0.25, 0.0, 0.0)),
        Color::gray(0.25));
}
