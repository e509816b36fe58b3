// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::aggregate::{aggregate, DrugSummary};
use crate::config::options::{default_log_path, AppOptions};
use crate::data::{Origin, Partition, UnifiedDataset};
use crate::progress::Progress;
use crate::scrape::{scrape, ScrapeOutcome};

#[derive(Debug, Parser)]
#[command(name = "pharmascore", version, about = "Drug review summaries and drugs.com facts")]
pub struct Cli {
    /// Train partition (TSV)
    #[arg(long, global = true)]
    pub train: Option<PathBuf>,

    /// Test partition (TSV)
    #[arg(long, global = true)]
    pub test: Option<PathBuf>,

    /// Rows parsed per chunk while loading
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Page host, e.g. https://www.drugs.com
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Page fetch timeout
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log file (default .store/debug.log); "-" logs to stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Report load progress on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summary and page facts for one drug
    Lookup { drug: String },
    /// Useful-count total, average rating and stars
    Summary { drug: String },
    /// Page facts only; does not load the dataset
    Scrape { drug: String },
    /// Add a review for this session and show the updated summary
    Review {
        drug: String,
        #[arg(long)]
        text: String,
        /// 1 to 5
        #[arg(long)]
        rating: u8,
    },
    /// Partition sizes and unparsed dates
    Info,
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        let mut opts = AppOptions::default();
        if let Some(p) = &self.train { opts.load.train_path = p.clone(); }
        if let Some(p) = &self.test { opts.load.test_path = p.clone(); }
        if let Some(n) = self.chunk_size { opts.load.chunk_size = n; }
        if let Some(u) = &self.base_url { opts.scrape.set_base_url(u); }
        if let Some(t) = self.timeout_secs { opts.scrape.timeout = Duration::from_secs(t); }
        opts
    }
}

/// Parse args, set up logging and run one command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let log_target = if log_path.as_os_str() == "-" { None } else { Some(log_path.as_path()) };
    crate::log::init(log_target).wrap_err("cannot open log file")?;

    let opts = cli.options();
    match &cli.command {
        Command::Scrape { drug } => {
            let out = scrape(drug, &opts.scrape);
            emit(&cli, &out, || print_scrape(&out))?;
        }
        Command::Summary { drug } => {
            let ds = load(&cli, &opts)?;
            let summary = aggregate(&ds, drug);
            emit(&cli, &summary, || print_summary(&summary))?;
        }
        Command::Lookup { drug } => {
            let ds = load(&cli, &opts)?;
            let lookup = Lookup {
                summary: aggregate(&ds, drug),
                details: scrape(drug, &opts.scrape),
            };
            emit(&cli, &lookup, || {
                print_summary(&lookup.summary);
                println!();
                print_scrape(&lookup.details);
            })?;
        }
        Command::Review { drug, text, rating } => {
            let mut ds = load(&cli, &opts)?;
            let before = aggregate(&ds, drug);
            ds.append_review(drug, text, *rating)?;
            let after = aggregate(&ds, drug);
            let report = ReviewReport { before, after, dataset_len: ds.len() };
            emit(&cli, &report, || {
                println!("Thank you for your review and rating!");
                println!("Dataset now holds {} reviews (not saved).", report.dataset_len);
                println!();
                print_summary(&report.after);
            })?;
        }
        Command::Info => {
            let ds = load(&cli, &opts)?;
            let info = DatasetInfo::of(&ds);
            emit(&cli, &info, || {
                println!("train:          {}", info.train);
                println!("test:           {}", info.test);
                println!("total:          {}", info.total);
                println!("unparsed dates: {}", info.unparsed_dates);
            })?;
        }
    }
    Ok(())
}

/* ---------------- helpers ---------------- */

#[derive(Serialize)]
struct Lookup {
    summary: DrugSummary,
    details: ScrapeOutcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewReport {
    before: DrugSummary,
    after: DrugSummary,
    dataset_len: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetInfo {
    train: usize,
    test: usize,
    total: usize,
    unparsed_dates: usize,
}

impl DatasetInfo {
    fn of(ds: &UnifiedDataset) -> Self {
        Self {
            train: ds.partition(Partition::Train).len(),
            test: ds.partition(Partition::Test).len(),
            total: ds.len(),
            unparsed_dates: ds.records().iter()
                .filter(|r| r.origin != Origin::Submitted && r.date.is_none())
                .count(),
        }
    }
}

struct StderrProgress;
impl Progress for StderrProgress {
    fn begin(&mut self, partition: Partition) {
        eprintln!("Loading {}…", partition.name());
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn chunk_done(&mut self, chunk: usize, rows: usize) {
        eprintln!("  chunk {chunk}: {rows} rows");
    }
    fn finish(&mut self, partition: Partition, rows: usize) {
        eprintln!("{}: {rows} rows", partition.name());
    }
}

fn load(cli: &Cli, opts: &AppOptions) -> Result<UnifiedDataset> {
    let mut sink = StderrProgress;
    let progress: Option<&mut dyn Progress> = if cli.verbose { Some(&mut sink) } else { None };
    let ds = crate::store::load(&opts.load, progress).wrap_err("loading review data")?;
    Ok(ds)
}

fn emit<T: Serialize>(cli: &Cli, value: &T, text: impl FnOnce()) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn print_summary(s: &DrugSummary) {
    println!("{}", s.drug_name);
    println!("Useful Count:   {}", s.total_useful_count);
    println!("Average Rating: {:.1}", s.average_rating);
    let stars = match s.star_rating.value() {
        Some(n) => "*".repeat(usize::from(n)),
        None => s.star_rating.to_string(),
    };
    println!("Approx Ratings: {stars}");
    println!("Reviews:        {}", s.review_count);
}

fn print_scrape(out: &ScrapeOutcome) {
    match out {
        ScrapeOutcome::Info(info) => {
            println!("Drug Details");
            println!("Title:       {}", info.title);
            println!("Description: {}", info.description);
            println!("Warnings:    {}", info.warning_text);
            println!();
            println!("{}", info.before_taking_title);
            for item in &info.before_taking_list {
                println!("- {item}");
            }
        }
        ScrapeOutcome::Error { error } => {
            println!("No description found for the entered medicine.");
            logd!("scrape error shown to user: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "pharmascore", "--train", "a.tsv", "--chunk-size", "50",
            "--base-url", "http://localhost:9/", "--timeout-secs", "2", "summary", "valsartan",
        ]);
        let opts = cli.options();
        assert_eq!(opts.load.train_path, PathBuf::from("a.tsv"));
        assert_eq!(opts.load.chunk_size, 50);
        assert_eq!(opts.scrape.base_url, "http://localhost:9");
        assert_eq!(opts.scrape.timeout, Duration::from_secs(2));
        assert!(matches!(cli.command, Command::Summary { ref drug } if drug == "valsartan"));
    }

    #[test]
    fn review_requires_text_and_rating() {
        assert!(Cli::try_parse_from(["pharmascore", "review", "x", "--rating", "3"]).is_err());
        let cli = Cli::try_parse_from(["pharmascore", "review", "x", "--text", "ok", "--rating", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Review { rating: 3, .. }));
    }
}
