// src/cli.rs
use std::{
    env,
    error::Error,
    path::{Path, PathBuf},
};

use crate::config::consts::*;
use crate::config::options::*;
use crate::file::resolve_out_path;
use crate::progress::Progress;

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Parsed {
    Run(AppOptions),
    Help,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    match parse_args(env::args().skip(1))? {
        Parsed::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        Parsed::Run(opts) => run_with(&opts),
    }
}

pub fn run_with(opts: &AppOptions) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &opts.log_file {
        if !crate::log::init(path)? {
            loge!("Log file already set; ignoring {}", path.display());
        }
    }
    let mut console = ConsoleProgress::new(opts.quiet);
    crate::runner::run(&opts.command, Some(&mut console)).map(|_| ())
}

/* ---------------- Console progress ---------------- */

pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
        if !self.quiet { println!("{msg}"); }
    }
    fn wrote(&mut self, path: &Path) {
        logf!("Saved {}", path.display());
        if !self.quiet { println!("saved as \"{}\"", path.display()); }
    }
}

/* ---------------- Parsing ---------------- */

#[derive(Default)]
struct Flags {
    input: Option<PathBuf>,
    output: Option<String>,
    sample: Option<String>,
    db: Option<PathBuf>,
    format: Option<ExportFormat>,
    dedup: bool,
    cutoff: Option<f64>,
    top: Option<usize>,
    max_chars: Option<usize>,
    sppv: Option<PathBuf>,
    spcsv: Option<PathBuf>,
    /// Canonical names of the command flags given, for per-command checks.
    seen: Vec<&'static str>,
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, Box<dyn Error>> {
    Ok(args.next().ok_or_else(|| format!("Missing value for {flag}"))?)
}

fn positive(v: &str, flag: &str) -> Result<usize, Box<dyn Error>> {
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive integer, got '{v}'").into()),
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Parsed, Box<dyn Error>> {
    let mut args = args.into_iter();
    let mut command: Option<String> = None;
    let mut log_file = None;
    let mut quiet = false;
    let mut f = Flags::default();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-h" | "--help" => return Ok(Parsed::Help),
            "-q" | "--quiet" => quiet = true,
            "--log" => log_file = Some(PathBuf::from(value(&mut args, "--log")?)),

            "-i" | "--input" => {
                f.input = Some(PathBuf::from(value(&mut args, "-i")?));
                f.seen.push("-i"); }
            "-o" | "--out" | "--output" => {
                f.output = Some(value(&mut args, "-o")?);
                f.seen.push("-o"); }
            "--sample" => {
                f.sample = Some(value(&mut args, "--sample")?);
                f.seen.push("--sample"); }
            "--db" => {
                f.db = Some(PathBuf::from(value(&mut args, "--db")?));
                f.seen.push("--db"); }
            "--format" => {
                let v = value(&mut args, "--format")?;
                f.format = Some(match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                });
                f.seen.push("--format"); }
            "--dedup" => {
                f.dedup = true;
                f.seen.push("--dedup"); }
            "--cutoff" => {
                let v = value(&mut args, "--cutoff")?;
                let p: f64 = v.parse().map_err(|_| format!("--cutoff expects a number, got '{v}'"))?;
                if !(p > 0.0 && p <= 1.0) {
                    return Err(format!("--cutoff must be in (0, 1], got {p}").into());
                }
                f.cutoff = Some(p);
                f.seen.push("--cutoff"); }
            "--top" => {
                f.top = Some(positive(&value(&mut args, "--top")?, "--top")?);
                f.seen.push("--top"); }
            "--max-chars" => {
                f.max_chars = Some(positive(&value(&mut args, "--max-chars")?, "--max-chars")?);
                f.seen.push("--max-chars"); }
            "--sppv" => {
                f.sppv = Some(PathBuf::from(value(&mut args, "--sppv")?));
                f.seen.push("--sppv"); }
            "--spcsv" => {
                f.spcsv = Some(PathBuf::from(value(&mut args, "--spcsv")?));
                f.seen.push("--spcsv"); }

            other if other.starts_with('-') => return Err(format!("Unknown arg: {}", other).into()),
            other => {
                if let Some(c) = &command {
                    return Err(format!("Unexpected argument '{other}' after command '{c}'").into());
                }
                command = Some(s!(other));
            }
        }
    }

    let Some(command) = command else { return Ok(Parsed::Help) };
    let command = build_command(&command, f)?;
    let mut opts = AppOptions::new(command);
    opts.log_file = log_file;
    opts.quiet = quiet;
    Ok(Parsed::Run(opts))
}

fn allow(f: &Flags, command: &str, allowed: &[&str]) -> Result<(), Box<dyn Error>> {
    match f.seen.iter().find(|s| !allowed.contains(*s)) {
        Some(flag) => Err(format!("{flag} does not apply to '{command}'").into()),
        None => Ok(()),
    }
}

/// `-o` if given (a directory gets `default` inside it), else `default`.
fn out_path(user_o: &Option<String>, default: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let name = default.to_string_lossy();
    match user_o {
        Some(o) => resolve_out_path(o, &name),
        None => Ok(default.to_path_buf()),
    }
}

fn build_command(name: &str, f: Flags) -> Result<Command, Box<dyn Error>> {
    let command = match name {
        "extract" => {
            allow(&f, name, &["-i", "-o", "--format", "--dedup"])?;
            let format = match (f.format, &f.output) {
                (Some(fmt), _) => fmt,
                (None, Some(o)) if !o.ends_with('/') && !o.ends_with('\\') => ExportFormat::from_path(Path::new(o)),
                _ => ExportFormat::Csv,
            };
            let default_out = Path::new(DEFAULT_PATHWAYS_FILE).with_extension(format.ext());
            let mut o = ExtractOptions::default();
            if let Some(i) = f.input { o.input = i; }
            o.output = out_path(&f.output, &default_out)?;
            o.format = format;
            o.dedup = f.dedup;
            Command::Extract(o)
        }
        "kegg-db" => {
            allow(&f, name, &["-i", "-o"])?;
            let mut o = PathwayDbOptions::default();
            if let Some(i) = f.input { o.input = i; }
            o.output = out_path(&f.output, &o.output)?;
            Command::PathwayDb(o)
        }
        "go" => {
            allow(&f, name, &["--sample", "-i", "-o", "--cutoff", "--top", "--max-chars"])?;
            let mut o = GoPlotOptions::for_sample(f.sample.as_deref().unwrap_or(DEFAULT_GO_SAMPLE));
            if let Some(i) = f.input { o.input = i; }
            o.output = out_path(&f.output, &o.output)?;
            if let Some(c) = f.cutoff { o.cutoff = c; }
            if let Some(n) = f.top { o.top_n = n; }
            if let Some(n) = f.max_chars { o.max_chars = n; }
            Command::GoPlot(o)
        }
        "kegg-merge" => {
            allow(&f, name, &["--sample", "--db", "-i", "-o"])?;
            let mut o = KeggMergeOptions::for_sample(f.sample.as_deref().unwrap_or(DEFAULT_KEGG_SAMPLE));
            if let Some(db) = f.db { o.db = db; }
            if let Some(i) = f.input { o.input = i; }
            o.output = out_path(&f.output, &o.output)?;
            Command::KeggMerge(o)
        }
        "kegg-plot" => {
            allow(&f, name, &["--sample", "-i", "-o", "--top"])?;
            let mut o = KeggPlotOptions::for_sample(f.sample.as_deref().unwrap_or(DEFAULT_KEGG_SAMPLE));
            if let Some(i) = f.input { o.input = i; }
            o.output = out_path(&f.output, &o.output)?;
            if let Some(n) = f.top { o.top_n = n; }
            Command::KeggPlot(o)
        }
        "kegg" => {
            allow(&f, name, &["--sample", "--db"])?;
            let sample = f.sample.as_deref().unwrap_or(DEFAULT_KEGG_SAMPLE);
            let mut merge = KeggMergeOptions::for_sample(sample);
            if let Some(db) = f.db { merge.db = db; }
            Command::Kegg { merge, plot: KeggPlotOptions::for_sample(sample) }
        }
        "virus" => {
            allow(&f, name, &["--sppv", "--spcsv", "-o"])?;
            let mut o = VirusPlotOptions { sppv: f.sppv, spcsv: f.spcsv, ..VirusPlotOptions::default() };
            o.output = out_path(&f.output, &o.output)?;
            Command::VirusPlot(o)
        }
        other => return Err(format!("Unknown command: {other} (try --help)").into()),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Parsed, Box<dyn Error>> {
        parse_args(line.split_whitespace().map(String::from))
    }

    fn command(line: &str) -> Command {
        match parse(line).unwrap() {
            Parsed::Run(o) => o.command,
            Parsed::Help => panic!("expected a command for '{line}'"),
        }
    }

    #[test]
    fn no_args_or_help_flag_shows_help() {
        assert!(matches!(parse("").unwrap(), Parsed::Help));
        assert!(matches!(parse("go --help").unwrap(), Parsed::Help));
        assert!(HELP.contains("kegg-merge"));
    }

    #[test]
    fn extract_defaults_and_tsv_name() {
        let Parsed::Run(o) = parse("extract").unwrap() else { panic!() };
        assert_eq!(o, AppOptions::new(Command::Extract(ExtractOptions::default())));

        let Command::Extract(o) = command("extract --format tsv --dedup") else { panic!() };
        assert_eq!(o.output, PathBuf::from("kegg_pathways.tsv"));
        assert_eq!(o.format, ExportFormat::Tsv);
        assert!(o.dedup);

        let Command::Extract(o) = command("extract -o out.tsv") else { panic!() };
        assert_eq!(o.format, ExportFormat::Tsv);
    }

    #[test]
    fn sample_tag_derives_file_names() {
        let Command::KeggMerge(m) = command("kegg-merge --sample tj_1 --db db.csv") else { panic!() };
        assert_eq!(m.input, PathBuf::from("tj_1_kegg.csv"));
        assert_eq!(m.output, PathBuf::from("tj_1_kegg_merged.csv"));
        assert_eq!(m.db, PathBuf::from("db.csv"));

        let Command::GoPlot(g) = command("go --sample me_3 --cutoff 0.01 --top 20") else { panic!() };
        assert_eq!(g.input, PathBuf::from("me_3_gsea_nodups.csv"));
        assert_eq!(g.output, PathBuf::from("me_3_goterms_plot.png"));
        assert_eq!(g.cutoff, 0.01);
        assert_eq!(g.top_n, 20);

        let Command::Kegg { merge, plot } = command("kegg --sample me_3") else { panic!() };
        assert_eq!(merge.output, PathBuf::from("me_3_kegg_merged.csv"));
        assert_eq!(plot.input, PathBuf::from("me_3_kegg_selected.csv"));
    }

    #[test]
    fn globals_go_anywhere() {
        let Parsed::Run(o) = parse("-q virus --log run.log -o fig.jpg").unwrap() else { panic!() };
        assert!(o.quiet);
        assert_eq!(o.log_file, Some(PathBuf::from("run.log")));
        let Command::VirusPlot(v) = o.command else { panic!() };
        assert_eq!(v.output, PathBuf::from("fig.jpg"));
        assert_eq!(v.sppv, None);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse("frobnicate").is_err());
        assert!(parse("go --bogus").is_err());
        assert!(parse("go --top").is_err());
        assert!(parse("go --top 0").is_err());
        assert!(parse("go --cutoff 2").is_err());
        assert!(parse("extract --format xml").is_err());
        assert!(parse("go extra").is_err());

        let err = parse("virus --cutoff 0.1").err().unwrap().to_string();
        assert!(err.contains("--cutoff"), "{err}");
    }
}
