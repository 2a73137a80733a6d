// src/tables/go_terms.rs
//
// GO enrichment table → per-group bar data.
//
// Input columns: Term, Count, Pvalue, group (one row per enriched term,
// duplicates already removed by hand).

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::core::sanitize::{sci_1e, truncate_chars};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoTermRow {
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Pvalue")]
    pub pvalue: f64,
    /// GO namespace label (BP / CC / MF, or whatever the export uses).
    pub group: String,
}

/// A significant term, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct GoTermBar {
    pub term: String,
    pub count: u64,
    pub pvalue: f64,
    pub neg_log10_p: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoGroup {
    pub name: String,
    /// Significant rows in this group before the top-N cut.
    pub significant: usize,
    /// Top rows by count, descending.
    pub bars: Vec<GoTermBar>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoChartData {
    /// Groups in order of first appearance in the input.
    pub groups: Vec<GoGroup>,
    /// Color scale endpoints over all significant rows: (min, max) of -log10(p).
    pub neg_log10_range: (f64, f64),
    /// (min, max) raw p-value over all significant rows.
    pub p_range: (f64, f64),
    /// Shared y limit.
    pub max_count: u64,
}

pub struct GoChartParams {
    pub cutoff: f64,
    pub top_n: usize,
    pub max_chars: usize,
}

/// `-log10(p)`; p = 0 is taken as the smallest positive double so the bar
/// still gets a finite color.
pub fn neg_log10(p: f64) -> f64 {
    -(p.max(f64::MIN_POSITIVE)).log10()
}

/// Filter on the cutoff (inclusive), add -log10(p), truncate terms.
/// Input order is kept.
pub fn significant(rows: &[GoTermRow], cutoff: f64, max_chars: usize) -> Vec<(String, GoTermBar)> {
    rows.iter()
        .filter(|r| r.pvalue <= cutoff)
        .map(|r| {
            let bar = GoTermBar {
                term: truncate_chars(&r.term, max_chars),
                count: r.count,
                pvalue: r.pvalue,
                neg_log10_p: neg_log10(r.pvalue),
            };
            (r.group.clone(), bar)
        })
        .collect()
}

/// Largest `n` by count, descending; equal counts keep input order.
pub fn top_by_count(mut bars: Vec<GoTermBar>, n: usize) -> Vec<GoTermBar> {
    bars.sort_by(|a, b| b.count.cmp(&a.count));
    bars.truncate(n);
    bars
}

pub fn build_chart_data(rows: &[GoTermRow], params: &GoChartParams) -> Result<GoChartData, Box<dyn Error>> {
    let sig = significant(rows, params.cutoff, params.max_chars);
    if sig.is_empty() {
        return Err(format!("No GO terms with Pvalue <= {} left to plot", params.cutoff).into());
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut p_lo = f64::INFINITY;
    let mut p_hi = f64::NEG_INFINITY;
    let mut max_count = 0u64;

    // group order = first appearance
    let mut grouped: Vec<(String, Vec<GoTermBar>)> = Vec::new();
    for (group, bar) in sig {
        lo = lo.min(bar.neg_log10_p);
        hi = hi.max(bar.neg_log10_p);
        p_lo = p_lo.min(bar.pvalue);
        p_hi = p_hi.max(bar.pvalue);
        max_count = max_count.max(bar.count);

        match grouped.iter_mut().find(|(g, _)| *g == group) {
            Some((_, bars)) => bars.push(bar),
            None => grouped.push((group, vec![bar])),
        }
    }

    let groups = grouped
        .into_iter()
        .map(|(name, bars)| GoGroup {
            name,
            significant: bars.len(),
            bars: top_by_count(bars, params.top_n),
        })
        .collect();

    Ok(GoChartData {
        groups,
        neg_log10_range: (lo, hi),
        p_range: (p_lo, p_hi),
        max_count,
    })
}

impl GoChartData {
    pub fn total_significant(&self) -> usize {
        self.groups.iter().map(|g| g.significant).sum()
    }

    /// Panel widths: one share per group (its significant row count over
    /// the total), then `colorbar` for the color bar.
    pub fn width_ratios(&self, colorbar: f64) -> Vec<f64> {
        let total = self.total_significant().max(1) as f64;
        let mut out: Vec<f64> = self.groups.iter().map(|g| g.significant as f64 / total).collect();
        out.push(colorbar);
        out
    }

    /// Color-bar ticks as (position in -log10 space, label).
    /// The low end of the scale is the largest p-value and vice versa.
    pub fn colorbar_ticks(&self) -> [(f64, String); 2] {
        let (lo, hi) = self.neg_log10_range;
        let (p_lo, p_hi) = self.p_range;
        [(lo, sci_1e(p_hi)), (hi, sci_1e(p_lo))]
    }

    /// Map -log10(p) into [0, 1] on the shared scale.
    pub fn normalize(&self, v: f64) -> f64 {
        let (lo, hi) = self.neg_log10_range;
        if hi <= lo { return 0.5; }
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}
