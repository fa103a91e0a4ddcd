use aggregation::Engine;
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use flow_store::FlowStore;
use flowmap_core::{State, DEFAULT_TOP_N};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json, Jsonl }

#[derive(Debug, Parser)]
#[command(name = "flowmap", version, about = "U.S. interstate migration lookups for one reference year")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./flowmap.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Per-state totals CSV (state, inflow, outflow, net_migration)
    #[arg(long, global = true, value_name = "FILE")]
    totals: Option<PathBuf>,
    /// Pairwise flows CSV (origin, destination, estimate)
    #[arg(long, global = true, value_name = "FILE")]
    flows: Option<PathBuf>,
    /// Output format: text, json, or jsonl
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    /// Output file (overwrites). Stdout if omitted.
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// List the recognized state codes and names
    States,
    /// Inflow, outflow and net migration for a state (name or code)
    Totals {
        state: String,
    },
    /// Largest origin and destination states
    Rankings {
        state: String,
        /// Entries per list (default 10)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Totals and rankings together
    Query {
        state: String,
        /// Entries per list (default 10)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Net migration per state, the series behind the choropleth
    Map {
        /// Write CSV (code,state,net_migration) instead of text/json
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose { 0 => "warn", 1 => "info", _ => "debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "jsonl" => Ok(OutputFormat::Jsonl),
        other => Err(anyhow!("unknown output format in config: {other}")),
    }
}

fn load_store(cli: &Cli, cfg: &config::Config) -> Result<FlowStore> {
    let totals = cli.totals.clone().unwrap_or_else(|| cfg.totals_path());
    let flows = cli.flows.clone().unwrap_or_else(|| cfg.flows_path());
    let started = Instant::now();
    let store = FlowStore::load(&totals, &flows)
        .with_context(|| format!("loading {} and {}", totals.display(), flows.display()))?;
    info!(duration_ms = started.elapsed().as_millis() as u64, "store ready");
    Ok(store)
}

/// Single value: one line for text/jsonl, pretty object for json.
fn value_lines<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> Vec<String>) -> Result<Vec<String>> {
    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => vec![serde_json::to_string_pretty(value)?],
        OutputFormat::Jsonl => vec![serde_json::to_string(value)?],
    })
}

/// Sequence: json array for json, one object per line for jsonl.
fn list_lines<T: Serialize>(format: OutputFormat, items: &[T], text: impl FnOnce() -> Vec<String>) -> Result<Vec<String>> {
    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => vec![serde_json::to_string_pretty(items)?],
        OutputFormat::Jsonl => items.iter().map(serde_json::to_string).collect::<Result<Vec<_>, _>>()?,
    })
}

fn emit(out: Option<&PathBuf>, lines: &[String]) -> Result<()> {
    if let Some(path) = out {
        let file = OpenOptions::new().create(true).truncate(true).write(true).open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let mut w = BufWriter::new(file);
        for line in lines { writeln!(w, "{}", line)?; }
        w.flush()?;
    } else {
        for line in lines { println!("{}", line); }
    }
    Ok(())
}

#[derive(Serialize)]
struct StateRow {
    code: &'static str,
    state: &'static str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cfg = config::load_config(cli.config.as_deref())?;
    let format = match (cli.format, cfg.format()) {
        (Some(f), _) => f,
        (None, Some(s)) => parse_format(s)?,
        (None, None) => OutputFormat::Text,
    };
    let top_for = |top: Option<usize>| top.or(cfg.top()).unwrap_or(DEFAULT_TOP_N);

    let lines = match &cli.command {
        Commands::Version => {
            vec![format!("flowmap {} (core {})", env!("CARGO_PKG_VERSION"), flowmap_core::version())]
        }
        Commands::States => {
            let rows: Vec<StateRow> = State::ALL.iter().map(|s| StateRow { code: s.code(), state: s.name() }).collect();
            list_lines(format, &rows, render::state_lines)?
        }
        Commands::Totals { state } => {
            let store = load_store(&cli, &cfg)?;
            let engine = Engine::new(&store)?;
            let total = engine.lookup_totals(state)?;
            value_lines(format, &total, || render::totals_lines(&total))?
        }
        Commands::Rankings { state, top } => {
            let n = top_for(*top);
            let store = load_store(&cli, &cfg)?;
            let engine = Engine::new(&store)?;
            let rankings = engine.lookup_rankings_top(state, n)?;
            value_lines(format, &rankings, || render::rankings_lines(&rankings, n))?
        }
        Commands::Query { state, top } => {
            let n = top_for(*top);
            let store = load_store(&cli, &cfg)?;
            let engine = Engine::new(&store)?;
            let report = engine.lookup_top(state, n)?;
            value_lines(format, &report, || render::report_lines(&report, n))?
        }
        Commands::Map { csv } => {
            let store = load_store(&cli, &cfg)?;
            let engine = Engine::new(&store)?;
            let points = engine.map_series();
            if *csv {
                let path = cli.out.as_ref().ok_or_else(|| anyhow!("--csv requires --out <file>"))?;
                let mut wtr = csv::Writer::from_path(path)?;
                for p in &points { wtr.serialize(p)?; }
                wtr.flush()?;
                return Ok(());
            }
            list_lines(format, &points, || render::map_lines(&points))?
        }
    };
    emit(cli.out.as_ref(), &lines)
}
