// src/plot/kegg.rs
//
// Horizontal bars, one per pathway (first row on top), colored by KEGG
// category. No legend.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use super::colors::kegg_category_color;
use super::{font, max_text_width, tick_label, Area, Canvas};
use crate::config::options::Figure;
use crate::tables::kegg::MergedPathwayRow;

const FONT_PT: f64 = 10.0;
const BAR_HEIGHT: f64 = 0.8;

pub fn render(rows: &[MergedPathwayRow], figure: &Figure, path: &Path) -> Result<(), Box<dyn Error>> {
    if rows.is_empty() {
        return Err("No KEGG pathways left to plot".into());
    }
    let mut canvas = Canvas::new(figure);
    {
        let root = canvas.area();
        root.fill(&WHITE)?;
        draw(&root, rows, figure)?;
        root.present()?;
    }
    canvas.save(path)
}

/// Bar center on the y axis for row `i` of `n`: row 0 sits at the top.
pub fn row_y(i: usize, n: usize) -> f64 {
    (n - 1 - i) as f64
}

fn draw(root: &Area, rows: &[MergedPathwayRow], fig: &Figure) -> Result<(), Box<dyn Error>> {
    let text = font(fig, FONT_PT);
    let pad = fig.pt(6.0) as i32;
    let tick_len = fig.pt(3.5) as i32;
    let line_h = fig.pt(FONT_PT) as i32;
    let line_w = fig.pt(0.8);

    let n = rows.len();
    let x_max = rows.iter().map(|r| r.seqs).max().unwrap_or(0).max(1) as f64 * 1.05;

    let names: Vec<String> = rows.iter().map(|r| r.pathway.clone()).collect();
    let names_w = max_text_width(root, &names, &text)? as i32;
    let y_area = names_w + tick_len + line_h * 2 + pad * 2;

    let mut chart = ChartBuilder::on(root)
        .margin(pad)
        .x_label_area_size(line_h * 3 + pad)
        .y_label_area_size(y_area)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    let seqs_fmt = |v: &f64| tick_label(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc("No. of Sequences")
        .x_labels(6)
        .x_label_formatter(&seqs_fmt)
        .label_style(text.clone())
        .axis_desc_style(text.clone())
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        let y = row_y(i, n);
        let color = kegg_category_color(&r.category);
        Rectangle::new([(0.0, y - BAR_HEIGHT / 2.0), (r.seqs as f64, y + BAR_HEIGHT / 2.0)], color.filled())
    }))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, -0.5), (0.0, n as f64 - 0.5)],
        BLACK.stroke_width(line_w),
    )))?;

    let name_style = text.pos(Pos::new(HPos::Right, VPos::Center));
    for (i, r) in rows.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, row_y(i, n)));
        root.draw(&PathElement::new(vec![(px - tick_len, py), (px, py)], BLACK.stroke_width(line_w)))?;
        root.draw(&Text::new(r.pathway.as_str(), (px - tick_len - pad / 2, py), name_style.clone()))?;
    }

    let (cols, plot_rows) = chart.plotting_area().get_pixel_range();
    let desc_x = cols.start - tick_len - names_w - pad - line_h / 2;
    let desc = text
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new("KEGG Pathway", (desc_x, (plot_rows.start + plot_rows.end) / 2), desc))?;
    Ok(())
}
