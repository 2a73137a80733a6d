// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/* ---------------- Formats ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
    /// `.tsv`/`.tab` read as TSV, everything else as CSV.
    pub fn from_path(path: &Path) -> Self {
        match lower_ext(path).as_deref() {
            Some("tsv") | Some("tab") => ExportFormat::Tsv,
            _ => ExportFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// `.jpg`/`.jpeg` give JPEG, everything else PNG.
    pub fn from_path(path: &Path) -> Self {
        match lower_ext(path).as_deref() {
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            _ => ImageFormat::Png,
        }
    }
}

fn lower_ext(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Physical figure size. Pixel size is inches × DPI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self { width_in, height_in, dpi: DPI }
    }

    pub fn pixels(&self) -> (u32, u32) {
        let d = self.dpi as f64;
        ((self.width_in * d).round() as u32, (self.height_in * d).round() as u32)
    }

    /// Points → pixels at this figure's DPI (font sizes, line widths).
    pub fn pt(&self, points: f64) -> u32 {
        ((points * self.dpi as f64 / 72.0).round() as u32).max(1)
    }
}

/* ---------------- Per-command options ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct ExtractOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub dedup: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_KEGG_HTML),
            output: PathBuf::from(DEFAULT_PATHWAYS_FILE),
            format: ExportFormat::Csv,
            dedup: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathwayDbOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PathwayDbOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_PATHWAYS_FILE),
            output: PathBuf::from(DEFAULT_PATHWAY_DB_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoPlotOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cutoff: f64,
    pub top_n: usize,
    pub max_chars: usize,
    pub figure: Figure,
}

impl GoPlotOptions {
    pub fn for_sample(sample: &str) -> Self {
        Self {
            input: PathBuf::from(join!(sample, GO_INPUT_SUFFIX)),
            output: PathBuf::from(join!(sample, GO_PLOT_SUFFIX)),
            cutoff: GO_P_CUTOFF,
            top_n: GO_TOP_N,
            max_chars: GO_TERM_MAX_CHARS,
            figure: Figure::new(16.0, 8.0),
        }
    }
}

impl Default for GoPlotOptions {
    fn default() -> Self { Self::for_sample(DEFAULT_GO_SAMPLE) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeggMergeOptions {
    pub db: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl KeggMergeOptions {
    pub fn for_sample(sample: &str) -> Self {
        Self {
            db: PathBuf::from(DEFAULT_PATHWAY_DB_FILE),
            input: PathBuf::from(join!(sample, KEGG_RAW_SUFFIX)),
            output: PathBuf::from(join!(sample, KEGG_MERGED_SUFFIX)),
        }
    }
}

impl Default for KeggMergeOptions {
    fn default() -> Self { Self::for_sample(DEFAULT_KEGG_SAMPLE) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeggPlotOptions {
    /// Curated ("selected") table, prepared by hand from the merged one.
    pub input: PathBuf,
    pub output: PathBuf,
    pub top_n: usize,
    pub figure: Figure,
}

impl KeggPlotOptions {
    pub fn for_sample(sample: &str) -> Self {
        Self {
            input: PathBuf::from(join!(sample, KEGG_SELECTED_SUFFIX)),
            output: PathBuf::from(join!(sample, KEGG_PLOT_SUFFIX)),
            top_n: KEGG_TOP_N,
            figure: Figure::new(6.0, 9.0),
        }
    }
}

impl Default for KeggPlotOptions {
    fn default() -> Self { Self::for_sample(DEFAULT_KEGG_SAMPLE) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VirusPlotOptions {
    /// Wide CSV for the SPPV panel; built-in publication data when absent.
    pub sppv: Option<PathBuf>,
    /// Wide CSV for the SPCSV panel; built-in publication data when absent.
    pub spcsv: Option<PathBuf>,
    pub output: PathBuf,
    pub figure: Figure,
}

impl Default for VirusPlotOptions {
    fn default() -> Self {
        Self {
            sppv: None,
            spcsv: None,
            output: PathBuf::from(DEFAULT_VIRUS_PLOT),
            figure: Figure::new(14.0, 6.0),
        }
    }
}

/* ---------------- Top level ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Extract(ExtractOptions),
    PathwayDb(PathwayDbOptions),
    GoPlot(GoPlotOptions),
    KeggMerge(KeggMergeOptions),
    KeggPlot(KeggPlotOptions),
    /// Merge, then plot the curated table.
    Kegg { merge: KeggMergeOptions, plot: KeggPlotOptions },
    VirusPlot(VirusPlotOptions),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub command: Command,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

impl AppOptions {
    pub fn new(command: Command) -> Self {
        Self { command, log_file: None, quiet: false }
    }
}
