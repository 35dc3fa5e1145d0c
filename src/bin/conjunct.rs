//! conjunct - run conjunction screening passes over catalog files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use conjunct::catalogs::{load_catalog, CatalogFormat};
use conjunct::{
    ArchiveStore, ConjunctionRecord, ConjunctionScreener, ConjunctionStatus, NotificationOutcome,
    RiskTier, ScreeningConfig, TracingNotifier,
};

#[derive(Parser, Debug)]
#[command(name = "conjunct")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Screen a catalog file and append the results to a ledger
    Screen {
        /// Catalog file (CSV or Space-Track JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Catalog format; guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// TOML file with screening thresholds
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ledger file the records are written to
        #[arg(short, long, default_value = "conjunctions.rkyv")]
        ledger: PathBuf,

        /// Enable notifications for CRITICAL conjunctions
        #[arg(long)]
        notify: bool,

        /// Evaluate pairs in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List conjunctions stored in a ledger
    Report {
        #[arg(short, long, default_value = "conjunctions.rkyv")]
        ledger: PathBuf,

        /// Only CRITICAL conjunctions (same as `--tier CRITICAL`)
        #[arg(long)]
        critical: bool,

        /// Only conjunctions of this tier (CRITICAL, WARNING or INFO)
        #[arg(long, conflicts_with = "critical")]
        tier: Option<String>,

        /// Only ACTIVE conjunctions
        #[arg(long)]
        active: bool,

        /// Print records as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Spacetrack,
}

impl From<FormatArg> for CatalogFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => CatalogFormat::Csv,
            FormatArg::Spacetrack => CatalogFormat::SpaceTrack,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command {
        Commands::Screen {
            catalog,
            format,
            config,
            ledger,
            notify,
            parallel,
        } => run_screen(catalog, format, config, ledger, notify, parallel),
        Commands::Report {
            ledger,
            critical,
            tier,
            active,
            json,
        } => {
            let tier = if critical {
                Some(RiskTier::Critical)
            } else {
                tier.as_deref().map(parse_tier).transpose()?
            };
            run_report(ledger, tier, active, json)
        }
    }
}

fn run_screen(
    catalog: PathBuf,
    format: Option<FormatArg>,
    config: Option<PathBuf>,
    ledger: PathBuf,
    notify: bool,
    parallel: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => ScreeningConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScreeningConfig::default(),
    };
    config.notifications_enabled |= notify;
    config.parallel |= parallel;

    let format = format
        .map(CatalogFormat::from)
        .unwrap_or_else(|| CatalogFormat::from_path(&catalog));
    let bodies = load_catalog(&catalog, format)?;

    let screener = ConjunctionScreener::new(config)?;
    let mut store = ArchiveStore::open(&ledger)
        .with_context(|| format!("failed to open ledger {}", ledger.display()))?;
    let report = screener.screen(&bodies, &mut store, &TracingNotifier)?;

    println!("Bodies:          {}", bodies.len());
    println!("Rejected:        {}", report.rejected.len());
    println!("Pairs examined:  {}", report.pairs_examined);
    println!("Conjunctions:    {}", report.conjunctions.len());
    for (record, dispatch) in report.conjunctions.iter().zip(&report.dispatches) {
        let note = match &dispatch.notification {
            NotificationOutcome::Skipped => String::new(),
            NotificationOutcome::Delivered => " [notified]".to_string(),
            NotificationOutcome::Failed(e) => format!(" [notification failed: {}]", e),
        };
        println!("  {}{}", summary_line(record), note);
    }
    println!(
        "Active in ledger: {} ({})",
        store.ledger().active_count(),
        store.path().display()
    );
    Ok(())
}

fn parse_tier(name: &str) -> Result<RiskTier> {
    RiskTier::from_name(&name.to_ascii_uppercase())
        .with_context(|| format!("unknown tier {:?}, expected CRITICAL, WARNING or INFO", name))
}

fn run_report(ledger: PathBuf, tier: Option<RiskTier>, active: bool, json: bool) -> Result<()> {
    let store = ArchiveStore::open(&ledger)
        .with_context(|| format!("failed to open ledger {}", ledger.display()))?;
    let ledger = store.ledger();

    let selected: Vec<&ConjunctionRecord> = ledger
        .conjunctions()
        .iter()
        .filter(|c| tier.map_or(true, |t| c.tier == t))
        .filter(|c| !active || c.status == ConjunctionStatus::Active)
        .collect();

    if json {
        for record in &selected {
            println!("{}", serde_json::to_string(record)?);
        }
        return Ok(());
    }

    for record in &selected {
        println!(
            "{}  {}  {}",
            record.detected_at.format("%Y-%m-%d %H:%M:%S"),
            record.status.as_str(),
            summary_line(record)
        );
    }
    println!(
        "{} shown, {} total, {} active, {} alerts",
        selected.len(),
        ledger.conjunctions().len(),
        ledger.active_count(),
        ledger.alerts().len()
    );
    Ok(())
}

fn summary_line(record: &ConjunctionRecord) -> String {
    format!(
        "{:<8} {:>3}%  {:>7.2} km  {} <-> {}",
        record.tier.as_str(),
        record.probability_score,
        record.min_distance_km,
        record.primary,
        record.secondary
    )
}
