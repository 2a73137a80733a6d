// src/plot/go_terms.rs
//
// One bar panel per GO group (widths proportional to the group's
// significant rows), a shared y limit, bars colored by -log10(p) on a
// single viridis scale, and a narrow color bar on the right.

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use super::colors::viridis;
use super::{font, max_text_width, tick_label, vertical_label, Area, Canvas};
use crate::config::consts::COLORBAR_RATIO;
use crate::config::options::Figure;
use crate::tables::go_terms::{GoChartData, GoGroup};

const FONT_PT: f64 = 14.0;
const BAR_WIDTH: f64 = 0.8;

pub fn render(data: &GoChartData, figure: &Figure, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut canvas = Canvas::new(figure);
    {
        let root = canvas.area();
        root.fill(&WHITE)?;
        draw(&root, data, figure)?;
        root.present()?;
    }
    canvas.save(path)
}

/// Pixel offsets where the group panels (and the color bar slot) meet.
pub fn panel_breakpoints(ratios: &[f64], width: u32) -> Vec<i32> {
    let total: f64 = ratios.iter().sum();
    if total <= 0.0 { return Vec::new(); }

    let mut acc = 0.0;
    let mut out = Vec::new();
    for r in &ratios[..ratios.len().saturating_sub(1)] {
        acc += r;
        out.push((acc / total * width as f64).round() as i32);
    }
    out
}

fn draw(root: &Area, data: &GoChartData, fig: &Figure) -> Result<(), Box<dyn Error>> {
    let text = font(fig, FONT_PT);
    let (w, h) = root.dim_in_pixel();
    let pad = fig.pt(6.0) as i32;
    let tick_len = fig.pt(3.5) as i32;
    let line_h = fig.pt(FONT_PT) as i32;

    // Room for "GO terms" at the bottom and the color bar ticks on the right.
    let footer_h = line_h * 2;
    let [(_, lo_label), (_, hi_label)] = data.colorbar_ticks();
    let tick_w = max_text_width(root, &[lo_label, hi_label], &text)? as i32;
    let right_w = tick_len + tick_w + line_h + pad * 3;

    let (upper, _) = root.split_vertically(h as i32 - footer_h);
    let (body, _) = upper.split_horizontally(w as i32 - right_w);
    let (body_w, body_h) = body.dim_in_pixel();

    let ratios = data.width_ratios(COLORBAR_RATIO);
    let no_rows: [i32; 0] = [];
    let slots = body.split_by_breakpoints(panel_breakpoints(&ratios, body_w), no_rows);

    let terms: Vec<String> = data.groups.iter().flat_map(|g| g.bars.iter().map(|b| b.term.clone())).collect();
    let label_h = (max_text_width(root, &terms, &text)? as i32 + tick_len + pad).min(body_h as i32 / 2);
    let y_max = (data.max_count.max(1)) as f64;
    let y_area = max_text_width(root, &[tick_label(y_max)], &text)? as i32 + line_h * 2 + pad * 2;

    let mut plot_rows: Option<Range<i32>> = None;
    for (i, group) in data.groups.iter().enumerate() {
        let Some(slot) = slots.get(i) else { break };
        let rows = draw_group(root, slot, group, data, fig, i == 0, label_h, y_area, y_max)?;
        if plot_rows.is_none() { plot_rows = Some(rows); }
    }

    if let (Some(slot), Some(rows)) = (slots.last(), plot_rows) {
        draw_colorbar(root, slot, rows, data, fig)?;
    }

    root.draw(&Text::new(
        "GO terms",
        (w as i32 / 2, h as i32 - footer_h / 2),
        text.pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    Ok(())
}

/// Returns the pixel rows of the plotting area (for lining up the color bar).
#[allow(clippy::too_many_arguments)]
fn draw_group(
    root: &Area,
    slot: &Area,
    group: &GoGroup,
    data: &GoChartData,
    fig: &Figure,
    first: bool,
    label_h: i32,
    y_area: i32,
    y_max: f64,
) -> Result<Range<i32>, Box<dyn Error>> {
    let text = font(fig, FONT_PT);
    let pad = fig.pt(6.0) as i32;
    let tick_len = fig.pt(3.5) as i32;
    let line_w = fig.pt(0.8);

    let n = group.bars.len().max(1) as f64;
    let x_range = (-0.5 - n * 0.02)..(n - 0.5 + n * 0.02);

    let mut chart = ChartBuilder::on(slot)
        .caption(&group.name, text.clone())
        .margin_top(pad)
        .margin_right(pad / 2)
        .x_label_area_size(label_h)
        .y_label_area_size(if first { y_area } else { 0 })
        .build_cartesian_2d(x_range.clone(), 0f64..y_max)?;

    let count_fmt = |v: &f64| tick_label(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh().disable_x_axis();
        if first {
            mesh.y_desc("Gene Count")
                .y_labels(6)
                .y_label_formatter(&count_fmt)
                .label_style(text.clone())
                .axis_desc_style(text.clone());
        } else {
            mesh.disable_y_axis();
        }
        mesh.draw()?;
    }

    chart.draw_series(group.bars.iter().enumerate().map(|(j, b)| {
        let x = j as f64;
        let color = viridis(data.normalize(b.neg_log10_p));
        Rectangle::new([(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, b.count as f64)], color.filled())
    }))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x_range.start, 0.0), (x_range.end, 0.0)],
        BLACK.stroke_width(line_w),
    )))?;

    let label_style = vertical_label(&text);
    for (j, b) in group.bars.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(j as f64, 0.0));
        root.draw(&PathElement::new(vec![(px, py), (px, py + tick_len)], BLACK.stroke_width(line_w)))?;
        root.draw(&Text::new(b.term.as_str(), (px, py + tick_len + pad / 2), label_style.clone()))?;
    }

    let (_, rows) = chart.plotting_area().get_pixel_range();
    Ok(rows)
}

fn draw_colorbar(
    root: &Area,
    slot: &Area,
    rows: Range<i32>,
    data: &GoChartData,
    fig: &Figure,
) -> Result<(), Box<dyn Error>> {
    let text = font(fig, FONT_PT);
    let pad = fig.pt(6.0) as i32;
    let tick_len = fig.pt(3.5) as i32;
    let line_w = fig.pt(0.8);

    let (cols, _) = slot.get_pixel_range();
    let (x0, x1) = (cols.start + pad / 2, cols.end);
    let (top, bottom) = (rows.start, rows.end);
    let span = (bottom - top).max(1) as f64;

    // one filled row per pixel, bottom = low -log10(p)
    for y in top..bottom {
        let t = (bottom - y) as f64 / span;
        root.draw(&Rectangle::new([(x0, y), (x1, y + 1)], viridis(t).filled()))?;
    }
    root.draw(&Rectangle::new([(x0, top), (x1, bottom)], BLACK.stroke_width(line_w)))?;

    let ticks = data.colorbar_ticks();
    let single = data.neg_log10_range.0 >= data.neg_log10_range.1;
    let mut label_x = x1 + tick_len + pad;
    for (pos, label) in ticks.iter().take(if single { 1 } else { 2 }) {
        let y = bottom - (data.normalize(*pos) * span).round() as i32;
        root.draw(&PathElement::new(vec![(x1, y), (x1 + tick_len, y)], BLACK.stroke_width(line_w)))?;
        let style = text.pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(label.as_str(), (x1 + tick_len + pad / 2, y), style))?;
        let (w, _) = root.estimate_text_size(label, &text)?;
        label_x = label_x.max(x1 + tick_len + pad + w as i32);
    }

    let line_h = fig.pt(FONT_PT) as i32;
    let caption = text
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new("-log(p-value)", (label_x + line_h / 2, (top + bottom) / 2), caption))?;
    Ok(())
}
