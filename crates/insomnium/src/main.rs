mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use config::ProjectConfig;
use insomnium_logging::LogFormat;
use insomnium_store::{Insomnium, KindError, LoadAllError, RecordKind};

#[derive(Parser, Debug)]
#[command(
    name = "insomnium",
    about = "Inspect the records stored in Insomnia's database files",
    version,
    author
)]
struct Cli {
    /// Insomnia data directory (default: config file, then Insomnia's own directory)
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Load only this record kind: workspace, request-group, response, project
    /// or request (case-insensitive, plurals accepted)
    #[arg(short, long)]
    kind: Option<RecordKind>,

    /// Output loaded records as JSON
    #[arg(long)]
    json: bool,

    /// Tracing level (RUST_LOG overrides it)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format: pretty, json or compact
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    insomnium_logging::init_tracing(
        &config.log_level(cli.log_level.as_deref()),
        config.log_format(cli.log_format),
    );

    let data_dir = config.data_dir(cli.dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
    let mut store = Insomnium::new(data_dir);

    let kinds: Vec<RecordKind> = match cli.kind {
        Some(kind) => vec![kind],
        None => RecordKind::ALL.to_vec(),
    };

    let errors: Vec<KindError> = match cli.kind {
        Some(kind) => store.load_kind(kind).err().into_iter().collect(),
        None => store
            .load()
            .err()
            .map(LoadAllError::into_errors)
            .unwrap_or_default(),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report::JsonReport::new(&store, &errors))?;
        println!("{}", json);
    } else {
        let rows = report::summary_rows(&store, &kinds, &errors);
        report::print_summary(store.base_dir(), &rows);
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
