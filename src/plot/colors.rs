// src/plot/colors.rs

use std::error::Error;

use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::RGBColor;

pub const GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// `#rrggbb` (leading `#` optional).
pub fn parse_hex(hex: &str) -> Result<RGBColor, Box<dyn Error>> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return Err(format!("Bad color '{hex}', expected #rrggbb").into());
    }
    let c = |i: usize| u8::from_str_radix(&h[i..i + 2], 16);
    match (c(0), c(2), c(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(RGBColor(r, g, b)),
        _ => Err(format!("Bad color '{hex}', expected #rrggbb").into()),
    }
}

/* ---------------- KEGG categories ---------------- */

const KEGG_PALETTE: &[(&str, RGBColor)] = &[
    ("Metabolism", RGBColor(0x37, 0x7e, 0xb8)),
    ("Genetic Information Processing", RGBColor(0xff, 0x7f, 0x00)),
    ("Environmental Information Processing", RGBColor(0x4d, 0xaf, 0x4a)),
    ("Cellular Processes", RGBColor(0xe4, 0x1a, 0x1c)),
    ("Organismal Systems", RGBColor(0x98, 0x4e, 0xa3)),
];

/// Fixed color per top-level KEGG category; anything else is gray.
pub fn kegg_category_color(category: &str) -> RGBColor {
    let c = category.trim();
    KEGG_PALETTE
        .iter()
        .find(|(name, _)| *name == c)
        .map(|(_, color)| *color)
        .unwrap_or(GRAY)
}

/* ---------------- Viridis ---------------- */

/// `t` in [0, 1] (clamped; NaN reads as 0) → plotters' viridis map.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    <ViridisRGB as ColorMap<RGBColor, f64>>::get_color(&ViridisRGB, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#377eb8").unwrap(), RGBColor(0x37, 0x7e, 0xb8));
        assert_eq!(parse_hex("ffa500").unwrap(), RGBColor(255, 165, 0));
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#zz0000").is_err());
    }

    #[test]
    fn kegg_palette_lookup() {
        assert_eq!(kegg_category_color("Metabolism"), RGBColor(0x37, 0x7e, 0xb8));
        assert_eq!(kegg_category_color(" Organismal Systems "), RGBColor(0x98, 0x4e, 0xa3));
        assert_eq!(kegg_category_color("Human Diseases"), GRAY);
        assert_eq!(kegg_category_color("N/A"), GRAY);
    }

    #[test]
    fn viridis_follows_plotters_map() {
        let map = |t: f64| <ViridisRGB as ColorMap<RGBColor, f64>>::get_color(&ViridisRGB, t);
        assert_eq!(viridis(0.05), map(0.05));
        assert_eq!(viridis(0.95), map(0.95));
        assert_eq!(viridis(-3.0), map(0.0));
        assert_eq!(viridis(7.0), map(1.0));
        assert_eq!(viridis(f64::NAN), map(0.0));
        // dark purple at the bottom, yellow at the top
        let (lo, hi) = (viridis(0.0), viridis(1.0));
        assert!(lo.2 > lo.1 && hi.1 > hi.2);
    }
}
