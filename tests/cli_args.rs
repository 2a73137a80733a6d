// tests/cli_args.rs
use std::path::PathBuf;

use enrichplot::cli::{parse_args, Parsed};
use enrichplot::config::options::{Command, VirusPlotOptions};

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[test]
fn output_directory_gets_default_name() {
    let mut dir = std::env::temp_dir();
    dir.push("enrichplot_cli_outdir");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let line = format!("kegg-plot --sample tj_1 -o {}", dir.display());
    let Parsed::Run(o) = parse_args(args(&line)).unwrap() else { panic!("expected a command") };
    let Command::KeggPlot(p) = o.command else { panic!("expected kegg-plot") };
    assert_eq!(p.output, dir.join("tj_1_kegg_plot.png"));
    assert_eq!(p.input, PathBuf::from("tj_1_kegg_selected.csv"));
    assert_eq!(p.top_n, 50);
}

#[test]
fn virus_tables_are_optional() {
    let Parsed::Run(o) = parse_args(args("virus")).unwrap() else { panic!("expected a command") };
    assert_eq!(o.command, Command::VirusPlot(VirusPlotOptions::default()));

    let Parsed::Run(o) = parse_args(args("virus --sppv sppv.csv")).unwrap() else { panic!("expected a command") };
    let Command::VirusPlot(v) = o.command else { panic!("expected virus") };
    assert_eq!(v.sppv, Some(PathBuf::from("sppv.csv")));
    assert_eq!(v.spcsv, None);
    assert_eq!(v.output, PathBuf::from("virus_copies_plot.jpeg"));
}
