// src/tables/virus.rs
//
// Virus copy numbers per sample, one panel per virus.
//
// Wide CSV layout:
//   Sample,SPPV_1,SPPV_3,SPPV_1_err,SPPV_3_err
//   Mock_ME_a,54573.8,54092.4,,
// First column = sample label, `<series>_err` = error bar half-height,
// every other column = a series. Blank / NaN / NA cells mean "no bar".

use std::error::Error;
use std::path::Path;

use crate::table::{read_dataset, DataSet};

pub const ERR_SUFFIX: &str = "_err";

/// Known series colors (gray / blue / orange); others cycle `FALLBACK_COLORS`.
const SERIES_COLORS: &[(&str, &str)] = &[
    ("SPPV_1", "#808080"),
    ("SPPV_3", "#0000ff"),
    ("SPCSV_3", "#ffa500"),
];
const FALLBACK_COLORS: &[&str] = &["#808080", "#0000ff", "#ffa500", "#2ca02c", "#d62728", "#9467bd"];

#[derive(Clone, Debug, PartialEq)]
pub struct VirusSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub errors: Vec<Option<f64>>,
    /// `#rrggbb`
    pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VirusPanel {
    pub y_label: String,
    pub samples: Vec<String>,
    pub series: Vec<VirusSeries>,
}

pub fn series_color(name: &str, index: usize) -> String {
    SERIES_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| s!(*c))
        .unwrap_or_else(|| s!(FALLBACK_COLORS[index % FALLBACK_COLORS.len()]))
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>, Box<dyn Error>> {
    let t = cell.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("nan") || t.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    t.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("row {row}, column '{column}': not a number: '{t}'").into())
}

impl VirusPanel {
    pub fn from_file(path: &Path, y_label: &str) -> Result<Self, Box<dyn Error>> {
        let ds = read_dataset(path)?;
        Self::from_dataset(&ds, y_label).map_err(|e| format!("{}: {e}", path.display()).into())
    }

    pub fn from_dataset(ds: &DataSet, y_label: &str) -> Result<Self, Box<dyn Error>> {
        let headers = ds.headers.as_ref().ok_or("virus table has no header row")?;
        if headers.len() < 2 {
            return Err("virus table needs a sample column and at least one series".into());
        }

        let samples: Vec<String> = ds.rows.iter().map(|r| r.first().cloned().unwrap_or_default()).collect();

        let mut series = Vec::new();
        for (col, name) in headers.iter().enumerate().skip(1) {
            if name.ends_with(ERR_SUFFIX) { continue; }
            let err_col = ds.column_index(&join!(name, ERR_SUFFIX));

            let mut values = Vec::with_capacity(ds.rows.len());
            let mut errors = Vec::with_capacity(ds.rows.len());
            for (i, row) in ds.rows.iter().enumerate() {
                let line = i + 2;
                values.push(parse_cell(row.get(col).map_or("", |s| s.as_str()), line, name)?);
                let err = match err_col {
                    Some(ec) => parse_cell(row.get(ec).map_or("", |s| s.as_str()), line, &headers[ec])?,
                    None => None,
                };
                errors.push(err);
            }

            let color = series_color(name, series.len());
            series.push(VirusSeries { name: name.clone(), values, errors, color });
        }

        if series.is_empty() {
            return Err("virus table has only error columns".into());
        }
        let panel = VirusPanel { y_label: s!(y_label), samples, series };
        if !panel.has_bars() {
            return Err("virus table has no values; no rows left to plot".into());
        }
        Ok(panel)
    }

    /// At least one sample with at least one value.
    pub fn has_bars(&self) -> bool {
        !self.samples.is_empty() && self.series.iter().any(|s| s.values.iter().any(Option::is_some))
    }

    /// Top of the tallest bar including its error bar.
    pub fn max_extent(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().zip(&s.errors))
            .filter_map(|(v, e)| v.map(|v| v + e.unwrap_or(0.0)))
            .fold(0.0, f64::max)
    }

    /// SPPV copies (two primer sets) in mock and treated plants of both cultivars.
    pub fn sppv_publication() -> Self {
        let samples = [
            "Mock_ME_a", "Mock_ME_b", "Mock_ME_c", "Trt_ME_a", "Trt_ME_b", "Trt_ME_c",
            "Mock_TJ_a", "Mock_TJ_b", "Mock_TJ_c", "Trt_TJ_a", "Trt_TJ_b", "Trt_TJ_c",
        ];
        let sppv_1 = [
            54573.8, 81310.0, 31022.3, 45408.6, 45509.3, 29743.8,
            8068.2, 14006.1, 31576.9, 27101.4, 24803.4, 28266.4,
        ];
        let sppv_3 = [
            54092.4, 44611.0, 54212.3, 110382.4, 88450.4, 114111.7,
            6479.5, 13944.1, 27101.4, 69323.4, 13882.5, 37366.5,
        ];
        VirusPanel {
            y_label: s!("Mean SPPV Copies"),
            samples: samples.iter().map(|s| s!(*s)).collect(),
            series: vec![
                builtin_series("SPPV_1", &sppv_1),
                builtin_series("SPPV_3", &sppv_3),
            ],
        }
    }

    /// SPCSV copies in treated plants only.
    pub fn spcsv_publication() -> Self {
        let samples = ["Trt_ME_a", "Trt_ME_b", "Trt_ME_c", "Trt_TJ_a", "Trt_TJ_b", "Trt_TJ_c"];
        let spcsv_3 = [693716.1, 20373636.9, 7179320.7, 1827850.0, 1806429.4, 9431.0];
        VirusPanel {
            y_label: s!("Mean SPCSV Copies"),
            samples: samples.iter().map(|s| s!(*s)).collect(),
            series: vec![builtin_series("SPCSV_3", &spcsv_3)],
        }
    }
}

fn builtin_series(name: &str, values: &[f64]) -> VirusSeries {
    VirusSeries {
        name: s!(name),
        values: values.iter().map(|v| Some(*v)).collect(),
        errors: vec![None; values.len()],
        color: series_color(name, 0),
    }
}
