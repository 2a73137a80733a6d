// tests/extract_e2e.rs
use std::fs;
use std::path::PathBuf;

use enrichplot::config::options::{Command, ExportFormat, ExtractOptions};
use enrichplot::runner;
use enrichplot::specs::kegg_pathways::{self, PathwayRecord};
use enrichplot::table::read_records;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("enrichplot_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>KEGG PATHWAY Database</title></head><body>
  <h4>09100 Metabolism</h4>
  <div class="list">
    <b>09101 Carbohydrate metabolism</b>
    <div class="list">
      <dl>
        <dt>ABC123</dt><dd><a href="/pathway/ABC123">Example Pathway</a></dd>
        <dt>XYZ</dt><dd><a href="/pathway/XYZ">Too Short</a></dd>
      </dl>
    </div>
  </div>
</body></html>"#;

#[test]
fn one_valid_term_gives_one_categorized_row() {
    let bundle = kegg_pathways::parse_doc(PAGE);
    let categorized = &bundle.records[..bundle.categorized];
    assert_eq!(categorized, &[PathwayRecord {
        category: "Metabolism".into(),
        sub_category: "Carbohydrate metabolism".into(),
        pathway_id: ">ABC123 <".into(),
        pathway_name: "Example Pathway".into(),
    }]);

    // the same label again, uncategorized
    assert_eq!(bundle.records.len(), 2);
    assert_eq!(bundle.records[1].category, "N/A");
    assert_eq!(bundle.records[1].pathway_id, ">ABC123 <");
}

#[test]
fn extract_command_writes_csv_and_tsv() {
    let dir = tmp_dir("extract");
    let page = dir.join("KEGG PATHWAY Database.html");
    fs::write(&page, PAGE).unwrap();

    let csv_out = dir.join("kegg_pathways.csv");
    let opts = ExtractOptions { input: page.clone(), output: csv_out.clone(), ..ExtractOptions::default() };
    let summary = runner::run(&Command::Extract(opts), None).unwrap();
    assert_eq!(summary.files_written, vec![csv_out.clone()]);

    let text = fs::read_to_string(&csv_out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Category,Sub-category,Pathway ID,Pathway Name"));
    assert_eq!(lines.next(), Some("Metabolism,Carbohydrate metabolism,>ABC123 <,Example Pathway"));
    assert_eq!(lines.next(), Some("N/A,Carbohydrate metabolism,>ABC123 <,Example Pathway"));
    assert_eq!(lines.next(), None);

    let rows: Vec<PathwayRecord> = read_records(&csv_out).unwrap();
    assert_eq!(rows.len(), 2);

    let tsv_out = dir.join("nested").join("kegg_pathways.tsv");
    let opts = ExtractOptions {
        input: page,
        output: tsv_out.clone(),
        format: ExportFormat::Tsv,
        dedup: true,
    };
    runner::run(&Command::Extract(opts), None).unwrap();
    let text = fs::read_to_string(&tsv_out).unwrap();
    assert_eq!(text, "Category\tSub-category\tPathway ID\tPathway Name\nMetabolism\tCarbohydrate metabolism\t>ABC123 <\tExample Pathway\n");
}

#[test]
fn missing_page_is_an_error() {
    let dir = tmp_dir("missing_page");
    let opts = ExtractOptions { input: dir.join("nope.html"), output: dir.join("out.csv"), ..ExtractOptions::default() };
    let err = runner::run(&Command::Extract(opts), None).unwrap_err();
    assert!(err.to_string().contains("nope.html"));
    assert!(!dir.join("out.csv").exists());
}
