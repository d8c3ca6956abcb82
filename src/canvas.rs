use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use image::{ ImageFormat, Rgb, RgbImage };

use crate::color::Color;
use crate::error::RenderError;

/// A canvas for drawing pixels.
///
/// The canvas stores the resultant color for each pixel ray, clamped to
/// `[0, 1]` as it is written. Row 0 is the top of the image. Once rendering
/// finishes, the `Canvas` can be saved to a PPM or PNG file.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

/// Scales a `[0, 1]` channel to a byte.
fn channel_to_byte(c: f64) -> u8 {
    (c * 255.0).clamp(0.0, 255.0).round() as u8
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`, clamping it to
    /// `[0, 1]`.
    ///
    /// Out-of-bounds pixels are ignored. `x` is the column and `y` the row,
    /// both zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted::color::Color;
    /// # use whitted::canvas::Canvas;
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &Color::rgb(1.5, 0.0, 1.0));
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), Color::rgb(1.0, 0.0, 1.0));
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = pixel.clamp();
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Returns `None` if the location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Saves the canvas, picking the format from the file extension.
    ///
    /// `.ppm` files are written as plain-text PPM. Every other path is
    /// encoded as PNG, whatever its extension.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let ext = path.extension().and_then(|ext| ext.to_str());

        match ext {
            Some(ext) if ext.eq_ignore_ascii_case("ppm") => {
                let mut out = io::BufWriter::new(File::create(path)?);
                self.write_ppm(&mut out)?;
                out.flush()?;
            },
            _ => {
                if !ext.map_or(false, |e| e.eq_ignore_ascii_case("png")) {
                    log::warn!("{} has no .png or .ppm extension, writing PNG",
                        path.display());
                }
                self.to_image().save_with_format(path, ImageFormat::Png)?;
            },
        }

        log::info!("saved {}x{} image to {}",
            self.width, self.height, path.display());
        Ok(())
    }

    /// Writes the canvas as a plain-text (P3) PPM image.
    ///
    /// Lines in the PPM output are clamped to 70 columns. If some color
    /// exceeds the 70 column mark on a line, it is moved to the next line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?; // Maximum color value

        // Write pixels, making sure that no line exceeds 70 columns
        let mut col = 0;
        for pixel in self.pixels.iter() {
            let channels = [
                channel_to_byte(pixel.r),
                channel_to_byte(pixel.g),
                channel_to_byte(pixel.b),
            ];

            for channel in channels.iter() {
                let s = channel.to_string();

                if col != 0 && col + 1 + s.len() > 70 {
                    writeln!(out)?;
                    col = 0;
                }

                if col != 0 {
                    write!(out, " ")?;
                    col += 1;
                }

                write!(out, "{}", s)?;
                col += s.len();
            }
        }

        // Terminate the PPM file with a newline
        writeln!(out)?;
        Ok(())
    }

    /// Converts the canvas into an 8-bit RGB image buffer.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.pixels[(y as usize * self.width) + x as usize];
            Rgb([
                channel_to_byte(c.r),
                channel_to_byte(c.g),
                channel_to_byte(c.b),
            ])
        })
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.read_pixel(0, 0), Some(Color::black()));
    assert_eq!(c.read_pixel(9, 19), Some(Color::black()));
    assert_eq!(c.read_pixel(10, 0), None);
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::white());

    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn ppm_header_and_pixels() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();
    let ppm = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(&lines[..3], &["P3", "5 3", "255"]);
    assert!(lines[3].starts_with("255 0 0 0 0 0 0 0 0"));
    assert!(ppm.contains(" 0 128 0 "));
    assert!(ppm.trim_end().ends_with("0 0 255"));
    assert!(ppm.ends_with('\n'));
}

#[test]
fn ppm_lines_stay_under_70_columns() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();
    let ppm = String::from_utf8(out).unwrap();

    assert!(ppm.lines().all(|l| l.len() <= 70));
    assert_eq!(ppm.split_whitespace().count(), 4 + 10 * 2 * 3);
}

#[test]
fn image_conversion_keeps_layout() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.0, 1.0));

    let img = c.to_image();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1), &Rgb([0, 0, 255]));
    assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
}

#[test]
fn unknown_extensions_are_written_as_png() {
    let dir = std::env::temp_dir();
    let bare = dir.join(format!("whitted-canvas-{}", std::process::id()));
    let jpg = dir.join(format!("whitted-canvas-{}.jpg", std::process::id()));

    let mut c = Canvas::new(2, 2);
    c.write_pixel(1, 0, &Color::red());

    for path in [&bare, &jpg].iter() {
        c.save(path).unwrap();

        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        std::fs::remove_file(path).ok();
    }
}
