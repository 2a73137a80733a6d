// src/config/consts.rs

// Default inputs/outputs (per-sample file names)
pub const DEFAULT_KEGG_HTML: &str = "KEGG PATHWAY Database.html";
pub const DEFAULT_PATHWAYS_FILE: &str = "kegg_pathways.csv";
pub const DEFAULT_PATHWAY_DB_FILE: &str = "kegg_pathways_db.csv";
pub const DEFAULT_KEGG_SAMPLE: &str = "me_1";
pub const DEFAULT_GO_SAMPLE: &str = "tj_3";
pub const DEFAULT_VIRUS_PLOT: &str = "virus_copies_plot.jpeg";

// Per-sample file name suffixes
pub const KEGG_RAW_SUFFIX: &str = "_kegg.csv";
pub const KEGG_MERGED_SUFFIX: &str = "_kegg_merged.csv";
pub const KEGG_SELECTED_SUFFIX: &str = "_kegg_selected.csv";
pub const KEGG_PLOT_SUFFIX: &str = "_kegg_plot.png";
pub const GO_INPUT_SUFFIX: &str = "_gsea_nodups.csv";
pub const GO_PLOT_SUFFIX: &str = "_goterms_plot.png";

// Extractor
pub const NA_CATEGORY: &str = "N/A";
pub const MIN_ID_CHARS: usize = 5;
pub const LIST_CLASS: &str = "list";

// KEGG IDs
pub const PATHWAY_ID_WIDTH: usize = 5;
pub const KO_PREFIX: &str = "ko";

// GO chart
pub const GO_P_CUTOFF: f64 = 0.05;
pub const GO_TOP_N: usize = 100;
pub const GO_TERM_MAX_CHARS: usize = 35;
pub const COLORBAR_RATIO: f64 = 0.02;

// KEGG chart
pub const KEGG_TOP_N: usize = 50;

// Rendering
pub const DPI: u32 = 300;
pub const JPEG_QUALITY: u8 = 95;
pub const FONT_FAMILY: &str = "sans-serif";
