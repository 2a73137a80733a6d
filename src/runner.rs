// src/runner.rs
use std::error::Error;
use std::path::PathBuf;

use crate::{
    config::options::*,
    file::require_input,
    plot,
    progress::{NullProgress, Progress},
    specs::kegg_pathways::{self, PathwayBundle, PathwayRecord},
    table::{read_records, write_records},
    tables::{
        go_terms::{self, GoChartParams, GoTermRow},
        kegg::{self, KeggEnrichmentRow, MergedPathwayRow},
        pathway_db::{self, PathwayDbEntry},
        virus::VirusPanel,
    },
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

/// Top-level runner: dispatch on the command and run it.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(command: &Command, progress: Option<&mut dyn Progress>) -> Result<RunSummary, Box<dyn Error>> {
    let mut null = NullProgress;
    let p: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let mut summary = RunSummary::default();
    let result = match command {
        Command::Extract(o) => extract(o, p, &mut summary),
        Command::PathwayDb(o) => pathway_db(o, p, &mut summary),
        Command::GoPlot(o) => go_plot(o, p, &mut summary),
        Command::KeggMerge(o) => kegg_merge(o, p, &mut summary),
        Command::KeggPlot(o) => kegg_plot(o, p, &mut summary),
        Command::Kegg { merge, plot } => {
            p.begin(2);
            kegg_merge(merge, p, &mut summary).and_then(|_| kegg_plot(plot, p, &mut summary))
        }
        Command::VirusPlot(o) => virus_plot(o, p, &mut summary),
    };
    p.finish();

    if let Err(e) = &result {
        loge!("{e}");
    }
    result.map(|_| summary)
}

fn wrote(path: &std::path::Path, p: &mut dyn Progress, summary: &mut RunSummary) {
    p.wrote(path);
    summary.files_written.push(path.to_path_buf());
}

/* ---------------- Pathway extraction ---------------- */

fn extract(o: &ExtractOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    p.begin(1);
    require_input(&o.input, "KEGG page")?;
    logf!("Extracting pathways from {}", o.input.display());

    let bundle = kegg_pathways::extract_file(&o.input)?;
    let total = bundle.records.len();
    let records = if o.dedup { kegg_pathways::dedup_records(&bundle.records) } else { bundle.records };

    p.log(&format!(
        "{} records ({} categorized{})",
        records.len(),
        bundle.categorized,
        if o.dedup { format!(", {} duplicates dropped", total - records.len()) } else { s!() }
    ));

    write_records(&o.output, &PathwayBundle::headers(), &records, o.format)?;
    wrote(&o.output, p, summary);
    Ok(())
}

fn pathway_db(o: &PathwayDbOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    p.begin(1);
    require_input(&o.input, "Extracted pathway table")?;

    let records: Vec<PathwayRecord> = read_records(&o.input)?;
    let db = pathway_db::build_db(&records);
    p.log(&format!("{} pathways from {} extracted records", db.len(), records.len()));

    write_records(&o.output, &PathwayDbEntry::headers(), &db, ExportFormat::from_path(&o.output))?;
    wrote(&o.output, p, summary);
    Ok(())
}

/* ---------------- GO terms ---------------- */

fn go_plot(o: &GoPlotOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    p.begin(1);
    require_input(&o.input, "GO enrichment table")?;

    let rows: Vec<GoTermRow> = read_records(&o.input)?;
    let params = GoChartParams { cutoff: o.cutoff, top_n: o.top_n, max_chars: o.max_chars };
    let data = go_terms::build_chart_data(&rows, &params)?;

    let shown: usize = data.groups.iter().map(|g| g.bars.len()).sum();
    logf!(
        "GO chart: {} rows, {} significant, {} shown in {} groups",
        rows.len(),
        data.total_significant(),
        shown,
        data.groups.len()
    );
    p.log(&format!("{} significant GO terms (Pvalue <= {})", data.total_significant(), o.cutoff));

    plot::go_terms::render(&data, &o.figure, &o.output)?;
    wrote(&o.output, p, summary);
    Ok(())
}

/* ---------------- KEGG ---------------- */

fn kegg_merge(o: &KeggMergeOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    require_input(&o.input, "KEGG enrichment table")?;
    require_input(&o.db, "Pathway database")?;

    let enrichment: Vec<KeggEnrichmentRow> = read_records(&o.input)?;
    let db: Vec<PathwayDbEntry> = read_records(&o.db)?;
    let merged = kegg::merge(&enrichment, &db);
    p.log(&format!("{} merged rows from {} enrichment rows", merged.len(), enrichment.len()));

    write_records(&o.output, &MergedPathwayRow::headers(), &merged, ExportFormat::from_path(&o.output))?;
    wrote(&o.output, p, summary);
    Ok(())
}

fn kegg_plot(o: &KeggPlotOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    let rows = kegg::load_selected(&o.input)?;
    let top = kegg::top_by_seqs(&rows, o.top_n);
    logf!("KEGG chart: {} of {} curated rows", top.len(), rows.len());

    plot::kegg::render(&top, &o.figure, &o.output)?;
    wrote(&o.output, p, summary);
    Ok(())
}

/* ---------------- Virus copies ---------------- */

fn virus_plot(o: &VirusPlotOptions, p: &mut dyn Progress, summary: &mut RunSummary) -> Result<(), Box<dyn Error>> {
    p.begin(1);
    let sppv = match &o.sppv {
        Some(path) => VirusPanel::from_file(path, "Mean SPPV Copies")?,
        None => VirusPanel::sppv_publication(),
    };
    let spcsv = match &o.spcsv {
        Some(path) => VirusPanel::from_file(path, "Mean SPCSV Copies")?,
        None => VirusPanel::spcsv_publication(),
    };
    logf!(
        "Virus chart: {} SPPV samples, {} SPCSV samples",
        sppv.samples.len(),
        spcsv.samples.len()
    );

    plot::virus::render(&[sppv, spcsv], &o.figure, &o.output)?;
    wrote(&o.output, p, summary);
    Ok(())
}
