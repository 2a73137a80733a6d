// src/plot/virus.rs
//
// Panels side by side, one per virus. Within a panel each series gets a
// bar per sample, offset by one bar width; the sample tick sits under the
// middle of the group. Y ticks are scaled to "n × 1eK" with the offset
// written above the axis.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::colors::parse_hex;
use super::{bold_font, font, max_text_width, sci_scale, tick_label, vertical_label, Area, Canvas};
use crate::config::options::Figure;
use crate::tables::virus::VirusPanel;

const TICK_PT: f64 = 12.0;
const LABEL_PT: f64 = 14.0;
pub const BAR_WIDTH: f64 = 0.35;

pub fn render(panels: &[VirusPanel], figure: &Figure, path: &Path) -> Result<(), Box<dyn Error>> {
    if panels.is_empty() {
        return Err("No virus panels to plot".into());
    }
    if let Some(empty) = panels.iter().find(|p| !p.has_bars()) {
        return Err(format!("No rows left to plot for '{}'", empty.y_label).into());
    }
    let mut canvas = Canvas::new(figure);
    {
        let root = canvas.area();
        root.fill(&WHITE)?;
        let slots = root.split_evenly((1, panels.len()));
        for (panel, slot) in panels.iter().zip(slots.iter()) {
            draw_panel(&root, slot, panel, figure)?;
        }
        root.present()?;
    }
    canvas.save(path)
}

/// Bar center for series `s` at sample `j`.
pub fn bar_x(j: usize, s: usize) -> f64 {
    j as f64 + s as f64 * BAR_WIDTH
}

/// Sample tick: middle of the `k` bars of sample `j`.
pub fn tick_x(j: usize, k: usize) -> f64 {
    j as f64 + (k.max(1) - 1) as f64 * BAR_WIDTH / 2.0
}

fn draw_panel(root: &Area, slot: &Area, panel: &VirusPanel, fig: &Figure) -> Result<(), Box<dyn Error>> {
    let ticks = font(fig, TICK_PT);
    let label = bold_font(fig, LABEL_PT);
    let pad = fig.pt(6.0) as i32;
    let tick_len = fig.pt(3.5) as i32;
    let line_w = fig.pt(0.8);
    let cap = fig.pt(5.0);

    let n = panel.samples.len().max(1);
    let k = panel.series.len().max(1);
    let (exp, div) = sci_scale(panel.max_extent());
    let y_max = (panel.max_extent() / div).max(1.0) * 1.05;
    let x_range = -0.5f64..(bar_x(n - 1, k - 1) + 0.5);

    let sample_w = max_text_width(root, &panel.samples, &ticks)? as i32;
    let y_tick_w = max_text_width(root, &[tick_label(y_max)], &ticks)? as i32;
    let line_h = fig.pt(LABEL_PT) as i32;

    let mut chart = ChartBuilder::on(slot)
        .margin(pad)
        .margin_top(line_h * 2)
        .x_label_area_size(sample_w + tick_len + pad)
        .y_label_area_size(y_tick_w + line_h * 2 + pad * 2)
        .build_cartesian_2d(x_range.clone(), 0f64..y_max)?;

    let y_fmt = |v: &f64| tick_label(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(panel.y_label.as_str())
        .y_labels(6)
        .y_label_formatter(&y_fmt)
        .label_style(ticks.clone())
        .axis_desc_style(label.clone())
        .draw()?;

    for (s, series) in panel.series.iter().enumerate() {
        let color = parse_hex(&series.color)?;
        let half = fig.pt(TICK_PT / 2.0) as i32;

        chart
            .draw_series(series.values.iter().enumerate().filter_map(|(j, v)| {
                let x = bar_x(j, s);
                v.map(|v| Rectangle::new([(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, v / div)], color.filled()))
            }))?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - half), (x + half * 2, y + half)], color.filled()));

        chart.draw_series(series.values.iter().zip(&series.errors).enumerate().filter_map(|(j, (v, e))| {
            let (v, e) = (v.as_ref()?, e.as_ref()?);
            let x = bar_x(j, s);
            Some(ErrorBar::new_vertical(x, ((v - e) / div).max(0.0), v / div, (v + e) / div, BLACK.stroke_width(line_w), cap))
        }))?;
    }

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x_range.start, 0.0), (x_range.end, 0.0)],
        BLACK.stroke_width(line_w),
    )))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(ticks.clone())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let sample_style = vertical_label(&ticks);
    for (j, sample) in panel.samples.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(tick_x(j, k), 0.0));
        root.draw(&PathElement::new(vec![(px, py), (px, py + tick_len)], BLACK.stroke_width(line_w)))?;
        root.draw(&Text::new(sample.as_str(), (px, py + tick_len + pad / 2), sample_style.clone()))?;
    }

    if exp != 0 {
        let (cols, rows) = chart.plotting_area().get_pixel_range();
        let offset = ticks.pos(Pos::new(HPos::Left, VPos::Bottom));
        root.draw(&Text::new(format!("1e{exp}"), (cols.start, rows.start - pad / 2), offset))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_offset_by_one_width() {
        assert_eq!(bar_x(2, 0), 2.0);
        assert!((bar_x(2, 1) - 2.35).abs() < 1e-12);
        assert!((tick_x(2, 2) - 2.175).abs() < 1e-12);
        assert_eq!(tick_x(3, 1), 3.0);
    }

    #[test]
    fn panel_without_samples_is_refused() {
        let mut path = std::env::temp_dir();
        path.push("enrichplot_plot_virus_empty");
        let _ = std::fs::remove_dir_all(&path);
        path.push("virus_copies_plot.jpeg");

        let empty = VirusPanel { y_label: s!("Mean SPPV Copies"), samples: vec![], series: vec![] };
        let panels = [empty, VirusPanel::spcsv_publication()];
        let err = render(&panels, &Figure::new(14.0, 6.0), &path).unwrap_err();
        assert!(err.to_string().contains("Mean SPPV Copies"), "{err}");
        assert!(!path.exists());
    }

    #[test]
    #[ignore = "requires system fonts"]
    fn renders_publication_jpeg() {
        let mut path = std::env::temp_dir();
        path.push("enrichplot_plot_virus");
        let _ = std::fs::remove_dir_all(&path);
        path.push("virus_copies_plot.jpeg");
        let panels = [VirusPanel::sppv_publication(), VirusPanel::spcsv_publication()];
        render(&panels, &Figure::new(14.0, 6.0), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
