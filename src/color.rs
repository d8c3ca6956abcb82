use std::ops::{ Add, AddAssign, Sub, Mul };

use serde::{ Serialize, Deserialize };

use crate::feq;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Surface
/// colors range from 0.0 to 1.0, but light colors are unbounded: a light may
/// be brighter than white, or carry negative components to subtract a hue.
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # use whitted::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
/// ```
///
/// Clamp an over-exposed color into displayable range:
///
/// ```
/// # use whitted::color::Color;
/// let hot = Color::rgb(1.7, -0.2, 0.5);
/// assert_eq!(hot.clamp(), Color::rgb(1.0, 0.0, 0.5));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(a: [f64; 3]) -> Color {
        Color { r: a[0], g: a[1], b: a[2] }
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> [f64; 3] {
        [c.r, c.g, c.b]
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// A gray with every channel set to `v`.
    pub const fn gray(v: f64) -> Color {
        Color { r: v, g: v, b: v }
    }

    /// The color black.
    pub const fn black() -> Color {
        Color::gray(0.0)
    }

    /// The color white.
    pub const fn white() -> Color {
        Color::gray(1.0)
    }

    /// The color red.
    pub const fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    /// The color blue.
    pub const fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        let r = c1.r * c2.r;
        let g = c1.g * c2.g;
        let b = c1.b * c2.b;

        Color { r, g, b }
    }

    /// Clamps every component into `[0, 1]`.
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Sum of the three channels.
    pub fn brightness(&self) -> f64 {
        self.r + self.g + self.b
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl AddAssign<Color> for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

/// Subtracts one color from another.
///
/// Components are subtracted from one another individually.
impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color {
            r: self * other.r,
            g: self * other.g,
            b: self * other.b,
        }
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
///
/// # Examples
///
/// ```
/// # use whitted::color::Color;
/// let yellow = Color::rgb(1.0, 1.0, 0.0);
/// let purple = Color::rgb(1.0, 0.0, 1.0);
/// assert_eq!(yellow * purple, Color::red());
/// ```
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn add_assign_colors() {
    let mut c = Color::gray(0.05);
    c += Color::rgb(0.5, 0.0, 0.25);

    assert_eq!(c, Color::rgb(0.55, 0.05, 0.3));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 0.2, g: 0.5, b: 0.5 };

    assert_eq!(c1 - c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c1 * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(c1 * Color::rgb(1.0, 0.5, 0.0), Color::rgb(0.2, 0.15, 0.0));
}

#[test]
fn clamp_keeps_in_range_colors() {
    let c = Color::rgb(0.0, 0.5, 1.0);

    assert_eq!(c.clamp(), c);
}

#[test]
fn complementary_light_color_deserializes() {
    let c: Color = serde_json::from_str("[1.0, -1.5, 1.0]").unwrap();

    assert_eq!(c, Color::rgb(1.0, -1.5, 1.0));
}
