// tests/go_terms.rs
use std::fs;
use std::path::PathBuf;

use enrichplot::config::options::{Command, GoPlotOptions};
use enrichplot::runner;
use enrichplot::table::read_records;
use enrichplot::tables::go_terms::{build_chart_data, GoChartParams, GoTermRow};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("enrichplot_go_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const TABLE: &str = "\
Term,Count,Pvalue,group
photosynthesis,40,0.0001,BP
response to virus,12,0.02,BP
\"defense response, incompatible interaction\",9,0.049,BP
ribosome biogenesis,30,0.2,BP
chloroplast thylakoid membrane,25,0.00002,CC
ATP binding,60,0.03,MF
";

#[test]
fn table_to_chart_data() {
    let dir = tmp_dir("data");
    let path = dir.join("tj_3_gsea_nodups.csv");
    fs::write(&path, TABLE).unwrap();

    let rows: Vec<GoTermRow> = read_records(&path).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2].term, "defense response, incompatible interaction");

    let params = GoChartParams { cutoff: 0.05, top_n: 100, max_chars: 35 };
    let data = build_chart_data(&rows, &params).unwrap();

    let names: Vec<&str> = data.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["BP", "CC", "MF"]);
    assert_eq!(data.total_significant(), 5);
    assert_eq!(data.max_count, 60);

    let bp: Vec<&str> = data.groups[0].bars.iter().map(|b| b.term.as_str()).collect();
    assert_eq!(bp, vec!["photosynthesis", "response to virus", "defense response, incompatible inte"]);

    let ratios = data.width_ratios(0.02);
    assert_eq!(ratios.len(), 4);
    assert!((ratios[0] - 0.6).abs() < 1e-12);
    assert_eq!(ratios[3], 0.02);

    let [(_, low_end), (_, high_end)] = data.colorbar_ticks();
    assert_eq!(low_end, "4.9e-02");
    assert_eq!(high_end, "2.0e-05");
}

#[test]
fn nothing_significant_fails_before_drawing() {
    let dir = tmp_dir("empty");
    let input = dir.join("tj_3_gsea_nodups.csv");
    fs::write(&input, "Term,Count,Pvalue,group\nribosome biogenesis,30,0.2,BP\n").unwrap();

    let opts = GoPlotOptions { input, output: dir.join("out.png"), ..GoPlotOptions::default() };
    let err = runner::run(&Command::GoPlot(opts), None).unwrap_err();
    assert!(err.to_string().contains("No GO terms"), "{err}");
    assert!(!dir.join("out.png").exists());
}

#[test]
#[ignore = "requires system fonts"]
fn renders_png() {
    let dir = tmp_dir("render");
    let input = dir.join("tj_3_gsea_nodups.csv");
    fs::write(&input, TABLE).unwrap();

    let opts = GoPlotOptions { input, output: dir.join("tj_3_goterms_plot.png"), ..GoPlotOptions::default() };
    runner::run(&Command::GoPlot(opts.clone()), None).unwrap();
    assert_eq!(&fs::read(&opts.output).unwrap()[1..4], b"PNG");
}
