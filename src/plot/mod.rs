// src/plot/mod.rs
//! Chart rendering.
//!
//! Every chart is drawn with `plotters` into an in-memory RGB buffer sized
//! from a [`Figure`] (inches × DPI), then encoded with `image`. The output
//! extension picks the encoder; JPEG gets quality 95 and a DPI density
//! header.
//!
//! Categorical axes (term / pathway / sample names) are plain `f64` axes
//! with the labels drawn by hand at `backend_coord` positions, so bars and
//! labels always line up.

pub mod colors;
pub mod go_terms;
pub mod kegg;
pub mod virus;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::config::consts::{FONT_FAMILY, JPEG_QUALITY};
use crate::config::options::{Figure, ImageFormat};
use crate::file::ensure_parent;

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// RGB pixel buffer a chart is drawn into.
pub struct Canvas {
    buf: Vec<u8>,
    width: u32,
    height: u32,
    dpi: u32,
}

impl Canvas {
    pub fn new(figure: &Figure) -> Self {
        let (width, height) = figure.pixels();
        Self {
            buf: vec![255u8; width as usize * height as usize * 3],
            width,
            height,
            dpi: figure.dpi,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drawing area over the whole buffer. Drop it before `save`.
    pub fn area(&mut self) -> Area<'_> {
        BitMapBackend::with_buffer(&mut self.buf, (self.width, self.height)).into_drawing_area()
    }

    /// Encode by extension: `.jpg`/`.jpeg` → JPEG, anything else → PNG.
    pub fn save(self, path: &Path) -> Result<(), Box<dyn Error>> {
        let img = RgbImage::from_raw(self.width, self.height, self.buf)
            .ok_or("chart buffer does not match its size")?;
        ensure_parent(path)?;

        match ImageFormat::from_path(path) {
            ImageFormat::Png => img.save_with_format(path, image::ImageFormat::Png)?,
            ImageFormat::Jpeg => {
                let file = File::create(path).map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
                let mut enc = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
                enc.set_pixel_density(PixelDensity::dpi(self.dpi.min(u16::MAX as u32) as u16));
                enc.encode_image(&img)?;
            }
        }
        logf!("Wrote {}x{} image: {}", self.width, self.height, path.display());
        Ok(())
    }
}

/* ---------------- Text ---------------- */

pub fn font(figure: &Figure, points: f64) -> TextStyle<'static> {
    (FONT_FAMILY, figure.pt(points) as f64).into_font().color(&BLACK)
}

pub fn bold_font(figure: &Figure, points: f64) -> TextStyle<'static> {
    (FONT_FAMILY, figure.pt(points) as f64, FontStyle::Bold).into_font().color(&BLACK)
}

/// Reads bottom-to-top, hanging below the anchor point.
pub fn vertical_label(style: &TextStyle<'static>) -> TextStyle<'static> {
    style
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Right, VPos::Center))
}

/// Widest rendering of `labels` in `style`, in pixels.
pub fn max_text_width(area: &Area, labels: &[String], style: &TextStyle) -> Result<u32, Box<dyn Error>> {
    let mut widest = 0;
    for l in labels {
        let (w, _) = area.estimate_text_size(l, style)?;
        widest = widest.max(w);
    }
    Ok(widest)
}

/* ---------------- Axes ---------------- */

/// Scientific tick scaling for an axis topping out at `max`:
/// the exponent for the "1eN" offset label and the divisor for ticks.
pub fn sci_scale(max: f64) -> (i32, f64) {
    if !(max.is_finite() && max > 0.0) { return (0, 1.0); }
    let exp = max.log10().floor() as i32;
    (exp, 10f64.powi(exp))
}

/// Tick label with trailing zeros trimmed: 2.50 → "2.5", 3.0 → "3".
pub fn tick_label(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { s!("0") } else { s!(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sci_scale_picks_leading_power() {
        assert_eq!(sci_scale(110_382.4), (5, 100_000.0));
        assert_eq!(sci_scale(20_373_636.9).0, 7);
        assert_eq!(sci_scale(0.0), (0, 1.0));
        assert_eq!(sci_scale(f64::NAN), (0, 1.0));
    }

    #[test]
    fn tick_labels_are_trimmed() {
        assert_eq!(tick_label(2.5), "2.5");
        assert_eq!(tick_label(3.0), "3");
        assert_eq!(tick_label(0.0), "0");
        assert_eq!(tick_label(1.25), "1.25");
    }

    #[test]
    fn canvas_matches_figure() {
        let c = Canvas::new(&Figure::new(2.0, 1.0));
        assert_eq!(c.size(), (600, 300));
    }

    #[test]
    fn blank_canvas_encodes_by_extension() {
        let mut dir = std::env::temp_dir();
        dir.push("enrichplot_plot_encode");
        let _ = std::fs::remove_dir_all(&dir);

        let png = dir.join("blank.png");
        Canvas::new(&Figure::new(1.0, 1.0)).save(&png).unwrap();
        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let jpeg = dir.join("blank.jpeg");
        Canvas::new(&Figure::new(1.0, 1.0)).save(&jpeg).unwrap();
        let bytes = std::fs::read(&jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
