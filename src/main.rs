//! Tourney Poster CLI
//!
//! Usage:
//!   tourney-poster [OPTIONS] <SCHEDULE>
//!
//! Options:
//!   -d, --document <FILE>    Document file listing the pages to render (TOML format)
//!   -s, --strings <FILE>     Localized strings merged over the built-in table
//!       --stylesheet <FILE>  Palette overrides (TOML format)
//!   -o, --output <DIR>       Directory the SVG files are written to
//!   -v, --verbose            More logging; repeat for debug output
//!   -h, --help               Print help

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tourney_poster::locale::DEFAULT_STRINGS;
use tourney_poster::{
    DocumentArgs, DocumentAssembler, Orientation, PageArgs, PageKind, PosterConfig, PosterError,
    StringTable, Stylesheet, TournamentCache,
};

#[derive(Parser)]
#[command(name = "tourney-poster")]
#[command(about = "Wall chart posters for group-and-knockout tournaments")]
struct Cli {
    /// Tournament schedule (TOML format)
    schedule: PathBuf,

    /// Document file listing the pages to render (TOML format)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Localized strings merged over the built-in table (TOML format)
    #[arg(short, long)]
    strings: Option<PathBuf>,

    /// Palette overrides (TOML format)
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Page archetype: cal-elim or cal-only
    #[arg(long)]
    kind: Option<String>,

    /// Locale such as en_US, fa or ja
    #[arg(long)]
    locale: Option<String>,

    /// IANA timezone times are shown in
    #[arg(long)]
    timezone: Option<String>,

    /// Paper name (a1, tabloid, 24x36); picked to fit when absent
    #[arg(long)]
    paper: Option<String>,

    /// landscape or portrait
    #[arg(long)]
    orientation: Option<String>,

    /// Trim size centered on the paper, drawn with crop marks
    #[arg(long)]
    crop: Option<String>,

    /// Draw scores and venues instead of empty boxes and kickoff times
    #[arg(long)]
    results: bool,

    /// Show match numbers and seed codes on every match
    #[arg(long)]
    match_numbers: bool,

    /// Directory the SVG files are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More logging; repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<Vec<PathBuf>, PosterError> {
    let tournament = cli
        .schedule
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let schedule_dir = cli
        .schedule
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut document = match &cli.document {
        Some(path) => DocumentArgs::from_file(path)?,
        None => DocumentArgs::default(),
    };
    if document.tournament.is_empty() {
        document.tournament = tournament;
    }
    if let Some(dir) = &cli.output {
        document.output_dir = dir.clone();
    }
    for page in &mut document.pages {
        apply_overrides(cli, page)?;
    }

    let mut strings = StringTable::from_str(DEFAULT_STRINGS)?;
    if let Some(path) = &cli.strings {
        strings.merge(StringTable::from_file(path)?);
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::with_overrides(path)?,
        None => Stylesheet::default(),
    };
    let config = PosterConfig::new().with_stylesheet(stylesheet);

    let cache = TournamentCache::new(schedule_dir);
    DocumentAssembler::new(&document, &strings, &config, cache).write()
}

/// Command line flags win over the document's page settings
fn apply_overrides(cli: &Cli, page: &mut PageArgs) -> Result<(), PosterError> {
    if let Some(kind) = &cli.kind {
        page.kind = PageKind::parse(kind)?;
    }
    if let Some(orientation) = &cli.orientation {
        page.orientation = Orientation::parse(orientation)?;
    }
    if let Some(locale) = &cli.locale {
        page.locale = locale.clone();
    }
    if let Some(timezone) = &cli.timezone {
        page.timezone = timezone.clone();
    }
    if let Some(paper) = &cli.paper {
        page.paper = Some(paper.clone());
    }
    if let Some(crop) = &cli.crop {
        page.crop = Some(crop.clone());
    }
    page.results |= cli.results;
    page.match_numbers |= cli.match_numbers;
    Ok(())
}
