use cachesim::cli::{self as prog_cli, OutputMode};
use cachesim::export::TraceFormat;
use cachesim::workload::{WorkloadFormat, WorkloadSpec};
use cachesim::{CoherenceKind, Configuration, EvictionPolicyKind};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AppConfig {
    capacity: Option<usize>,
    eviction: Option<EvictionPolicyKind>,
    coherence: Option<CoherenceKind>,
    default_ttl: Option<u64>,
    read_fill: Option<bool>,
    log_config: Option<PathBuf>,
}

impl AppConfig {
    /// Fills fields still unset from `other`.
    fn merge_missing(&mut self, other: AppConfig) {
        if self.capacity.is_none() { self.capacity = other.capacity; }
        if self.eviction.is_none() { self.eviction = other.eviction; }
        if self.coherence.is_none() { self.coherence = other.coherence; }
        if self.default_ttl.is_none() { self.default_ttl = other.default_ttl; }
        if self.read_fill.is_none() { self.read_fill = other.read_fill; }
        if self.log_config.is_none() { self.log_config = other.log_config; }
    }
}

fn find_config_paths(cli_cfg: &Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.clone()); }
    if let Ok(p) = std::env::var("CACHESIM_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Some(dir) = dirs_next::config_dir() { paths.push(dir.join("cachesim.toml")); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join("cachesim.toml")); }
    paths
}

/// Parses one environment setting. A value that does not parse is reported and
/// treated as unset so the next precedence layer applies.
fn parse_env_value<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring {name}={raw:?}: {e}");
            None
        }
    }
}

fn env_config() -> AppConfig {
    let var = |k: &str| std::env::var(k).ok();
    AppConfig {
        capacity: parse_env_value("CACHESIM_CAPACITY", var("CACHESIM_CAPACITY")),
        eviction: parse_env_value("CACHESIM_EVICTION", var("CACHESIM_EVICTION")),
        coherence: parse_env_value("CACHESIM_COHERENCE", var("CACHESIM_COHERENCE")),
        default_ttl: parse_env_value("CACHESIM_DEFAULT_TTL", var("CACHESIM_DEFAULT_TTL")),
        read_fill: None,
        log_config: var("CACHESIM_LOG_CONFIG").map(PathBuf::from),
    }
}

fn load_config(cli_cfg: &Option<PathBuf>) -> AppConfig {
    // Precedence: CLI (applied by the caller) > env > config files > defaults
    let mut cfg = env_config();
    for p in find_config_paths(cli_cfg) {
        if !p.exists() { continue; }
        match std::fs::read_to_string(&p) {
            Ok(s) => match toml::from_str::<toml::Table>(&s) {
                Ok(mut table) => {
                    let section = table.remove("simulation").unwrap_or(toml::Value::Table(table));
                    match section.try_into::<AppConfig>() {
                        Ok(file_cfg) => cfg.merge_missing(file_cfg),
                        Err(e) => log::warn!("ignoring config {}: {e}", p.display()),
                    }
                }
                Err(e) => log::warn!("ignoring config {}: {e}", p.display()),
            },
            Err(e) => log::warn!("cannot read config {}: {e}", p.display()),
        }
    }
    cfg
}

#[derive(Parser, Debug)]
#[command(name = "cachesim", version, about = "Deterministic cache behavior simulator", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, global = true, help = "Path to a config file (TOML). If omitted, defaults are used.")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_parser = ["human", "plain", "json"], default_value = "human", help = "Output mode")]
    output: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct EngineArgs {
    #[arg(long, help = "Cache capacity (entries, > 0)")]
    capacity: Option<usize>,
    #[arg(long, help = "Eviction policy: lru|lfu|fifo|ttl")]
    eviction: Option<String>,
    #[arg(long, help = "Coherence protocol: write-through|write-back|write-around")]
    coherence: Option<String>,
    #[arg(long, help = "Default TTL in logical ticks")]
    ttl: Option<u64>,
    #[arg(long, help = "Admit the backing store value on a read miss")]
    read_fill: bool,
    #[arg(long, help = "Workload format override: ndjson|csv; defaults to auto-detect")]
    workload_format: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Replay a workload and print its trace and metrics")]
    Run {
        #[arg(long, help = "Path to the workload (NDJSON or CSV)")]
        workload: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long, help = "Write the trace to this file instead of stdout")]
        out: Option<PathBuf>,
        #[arg(long, default_value = "ndjson", help = "Trace format: ndjson|csv")]
        format: String,
        #[arg(long, help = "Print the final cache contents in eviction order")]
        snapshot: bool,
    },
    #[command(about = "Replay a workload under every eviction policy and compare hit ratios")]
    Compare {
        #[arg(long, help = "Path to the workload (NDJSON or CSV)")]
        workload: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    #[command(about = "Generate a seeded synthetic workload (NDJSON)")]
    Generate {
        #[arg(long, default_value_t = 100)]
        ops: usize,
        #[arg(long, default_value_t = 16)]
        keys: usize,
        #[arg(long, default_value_t = 0.7)]
        read_ratio: f64,
        #[arg(long, help = "TTL attached to generated puts")]
        ttl: Option<u64>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, help = "Output file")]
        out: PathBuf,
    },
}

fn resolve_config(app: &AppConfig, args: &EngineArgs) -> Result<Configuration, Box<dyn std::error::Error>> {
    let defaults = Configuration::default();
    let eviction = match &args.eviction {
        Some(s) => EvictionPolicyKind::from_str(s)?,
        None => app.eviction.unwrap_or(defaults.eviction),
    };
    let coherence = match &args.coherence {
        Some(s) => CoherenceKind::from_str(s)?,
        None => app.coherence.unwrap_or(defaults.coherence),
    };
    let config = Configuration {
        capacity: args.capacity.or(app.capacity).unwrap_or(defaults.capacity),
        eviction,
        coherence,
        default_ttl: args.ttl.or(app.default_ttl),
        read_fill: args.read_fill || app.read_fill.unwrap_or(defaults.read_fill),
    };
    config.validate()?;
    Ok(config)
}

fn parse_workload_format(s: &Option<String>) -> Option<WorkloadFormat> {
    match s.as_ref().map(|x| x.to_lowercase()).as_deref() {
        Some("csv") => Some(WorkloadFormat::Csv),
        Some("ndjson" | "json" | "jsonl") => Some(WorkloadFormat::Ndjson),
        _ => None,
    }
}

fn build_command(cli: Cli, app: &AppConfig) -> Result<prog_cli::Command, Box<dyn std::error::Error>> {
    Ok(match cli.command {
        Commands::Run { workload, engine, out, format, snapshot } => prog_cli::Command::Run {
            config: resolve_config(app, &engine)?,
            workload_format: parse_workload_format(&engine.workload_format),
            workload,
            out,
            format: TraceFormat::from_str(&format)?,
            snapshot,
        },
        Commands::Compare { workload, engine } => prog_cli::Command::Compare {
            config: resolve_config(app, &engine)?,
            workload_format: parse_workload_format(&engine.workload_format),
            workload,
        },
        Commands::Generate { ops, keys, read_ratio, ttl, seed, out } => prog_cli::Command::Generate {
            spec: WorkloadSpec { ops, keys, read_ratio, ttl, seed },
            out,
        },
    })
}

fn main() {
    let cli = Cli::parse();
    let app = load_config(&cli.config);
    // File logging is opt-in: a log4rs file, or CACHESIM_LOG_DIR
    let logging = match &app.log_config {
        Some(p) => cachesim::logger::init_path(p),
        None if std::env::var_os("CACHESIM_LOG_DIR").is_some() => cachesim::init(),
        None => Ok(()),
    };
    if let Err(e) = logging {
        eprintln!("warning: logging disabled: {e}");
    }
    let mode = match cli.output.as_str() {
        "json" => OutputMode::Json,
        "plain" => OutputMode::Plain,
        _ => OutputMode::Human,
    };
    let result = build_command(cli, &app).and_then(|cmd| {
        let stdout = std::io::stdout();
        prog_cli::run_with_format(cmd, mode, &mut stdout.lock())
    });
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
