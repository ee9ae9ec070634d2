use analytics::SensorReport;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use configuration::{Config, LogLevel};
use core_types::SensorKind;
use database::{DbRepository, MemoryStore, SensorStore};
use indicatif::{ProgressBar, ProgressStyle};
use simulator::{SimulatorHandle, SEED_OFFSETS_DAYS};
use std::path::PathBuf;
use std::time::Duration;
use web_server::AppState;

/// The main entry point for the SensorHub application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config_from(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = configuration::init_logging(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await,
        Commands::Simulate(args) => handle_simulate(args, config).await,
        Commands::Seed(args) => handle_seed(args, config).await,
        Commands::Report(args) => handle_report(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sensor telemetry ingestion and period reporting.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `logging.level` from the configuration.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Write synthetic readings to the database until interrupted.
    Simulate(SimulateArgs),
    /// Insert deterministic readings at fixed offsets from now.
    Seed(SeedArgs),
    /// Print one report from the database.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Keep readings in process memory instead of PostgreSQL.
    #[arg(long)]
    in_memory: bool,

    /// Also run the simulators against the same store.
    #[arg(long)]
    simulate: bool,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Sensor categories to simulate. Defaults to all of them.
    #[arg(long, value_delimiter = ',')]
    sensors: Vec<SensorKind>,

    /// Seconds between readings; overrides `simulation.interval_secs`.
    #[arg(long)]
    interval: Option<u64>,

    /// Stop after this many seconds instead of waiting for Ctrl-C.
    #[arg(long)]
    duration: Option<u64>,
}

#[derive(Parser)]
struct SeedArgs {
    /// After seeding, add a camera capture for up to this many motion readings.
    #[arg(long)]
    camera_backfill: Option<usize>,
}

#[derive(Parser)]
struct ReportArgs {
    /// The sensor category (gas, motion, particle, camera).
    #[arg(long)]
    sensor: SensorKind,

    /// The reporting period (today, last7, month).
    #[arg(long, default_value = "today")]
    period: String,

    /// Resolve the period against this date instead of today (format: YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn connect_repository() -> anyhow::Result<DbRepository> {
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

async fn handle_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    if args.in_memory {
        tracing::warn!("Serving from process memory; readings are lost on exit.");
        serve_with(MemoryStore::new(), config, args.simulate).await
    } else {
        serve_with(connect_repository().await?, config, args.simulate).await
    }
}

async fn serve_with<S: SensorStore>(
    store: S,
    config: Config,
    simulate: bool,
) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let simulators = simulate.then(|| SimulatorHandle::start(store.clone(), &config.simulation));

    let state = AppState::new(store, config);
    let result = tokio::select! {
        served = web_server::run_server(state, addr) => served,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received.");
            Ok(())
        }
    };

    if let Some(simulators) = simulators {
        simulators.stop().await?;
    }
    result
}

async fn handle_simulate(args: SimulateArgs, config: Config) -> anyhow::Result<()> {
    let store = connect_repository().await?;

    let sensors = if args.sensors.is_empty() {
        SensorKind::ALL.to_vec()
    } else {
        args.sensors
    };
    let interval = args.interval.unwrap_or(config.simulation.interval_secs);
    if interval == 0 {
        anyhow::bail!("--interval must be greater than 0");
    }

    let handle = SimulatorHandle::start_with(
        store,
        &sensors,
        Duration::from_secs(interval),
        &config.simulation.system_id,
    );

    match args.duration {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => tokio::signal::ctrl_c().await?,
    }

    handle.stop().await?;
    Ok(())
}

async fn handle_seed(args: SeedArgs, config: Config) -> anyhow::Result<()> {
    let store = connect_repository().await?;
    let system_id = &config.simulation.system_id;
    let now = chrono::Local::now().naive_local();

    // Set up the progress bar
    let progress_bar = ProgressBar::new(SEED_OFFSETS_DAYS.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut inserted = 0;
    for days_back in SEED_OFFSETS_DAYS {
        progress_bar.set_message(format!("Seeding {days_back} day(s) back..."));
        inserted += simulator::seed_offset(&store, now, days_back, system_id)
            .await?
            .len();
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message(format!("Seeded {inserted} readings."));

    if let Some(limit) = args.camera_backfill {
        let captures = simulator::backfill_camera_captures(&store, limit, system_id).await?;
        println!("Back-filled {captures} camera captures.");
    }

    Ok(())
}

async fn handle_report(args: ReportArgs, config: Config) -> anyhow::Result<()> {
    let store = connect_repository().await?;
    let mut state = AppState::new(store, config);
    if let Some(date) = args.date {
        state = state.with_reference_date(date);
    }

    let report = state.report(args.sensor, &args.period).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report_table(args.sensor, &report));
    }
    Ok(())
}

/// Renders the statistics and risk of a report as a terminal table.
fn report_table(kind: SensorKind, report: &SensorReport) -> Table {
    let fmt = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(format!("{} ({})", kind.display_name(), report.label)),
            Cell::new("Mean"),
            Cell::new("Min"),
            Cell::new("Max"),
            Cell::new("Risk"),
        ]);

    for field in kind.fields() {
        let stats = report.stats.get(field).copied().unwrap_or_default();
        let risk = report
            .risk
            .get(field)
            .map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r.percent()));
        table.add_row(vec![
            Cell::new(field.label()),
            Cell::new(fmt(stats.mean)),
            Cell::new(fmt(stats.min)),
            Cell::new(fmt(stats.max)),
            Cell::new(risk),
        ]);
    }
    table.add_row(vec![Cell::new("Records"), Cell::new(report.count)]);
    table
}
