//! Draw Predictor - Entry Point
//!
//! Command-line front end over the draw engine.
//!
//! Wiring sequence:
//! 1. Parse CLI arguments
//! 2. Load config.toml + validate (defaults when the file is absent)
//! 3. Init tracing (text or JSON, to stderr)
//! 4. Pick the MatchDataSource: manual-only, or football-data.org when
//!    `lookup.enabled` (API key read from the env var named in config)
//! 5. Run the subcommand, collecting records into a SessionHistory
//! 6. Print reports and optionally export the session as CSV

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use draw_predictor::adapters::fixtures::load_fixtures;
use draw_predictor::adapters::lookup::{FootballDataClient, FootballDataConfig};
use draw_predictor::adapters::report::{render_history, render_record, write_csv_file};
use draw_predictor::config::{self, AppConfig};
use draw_predictor::domain::features::MatchContext;
use draw_predictor::domain::thresholds::ThresholdPreset;
use draw_predictor::ports::match_data::{ManualOnly, MatchDataSource};
use draw_predictor::usecases::analyzer::DrawAnalyzer;
use draw_predictor::usecases::batch;
use draw_predictor::usecases::intake::{FixtureInput, GoalHistoryInput};
use draw_predictor::usecases::session::SessionHistory;

#[derive(Debug, Parser)]
#[command(name = "draw-predictor", version, about = "Poisson draw model with a layered verdict scorer")]
struct Cli {
  /// Configuration file; built-in defaults are used when it does not exist.
  #[arg(long, global = true, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Analyze a single fixture given on the command line.
  Analyze(AnalyzeArgs),
  /// Analyze every fixture in a TOML fixture file.
  Scan(ScanArgs),
  /// Print the thresholds of every preset.
  Presets,
}

#[derive(Debug, Args)]
struct OutputArgs {
  /// Print records as JSON instead of the text report.
  #[arg(long)]
  json: bool,
  /// Write the session history to this CSV file.
  #[arg(long, value_name = "PATH")]
  export: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
  #[arg(long)]
  home: String,
  #[arg(long)]
  away: String,
  /// Home goals in recent matches, comma-separated.
  #[arg(long, default_value = "")]
  home_goals: String,
  /// Away goals in recent matches, comma-separated.
  #[arg(long, default_value = "")]
  away_goals: String,
  /// Decimal draw odds.
  #[arg(long)]
  odds: f64,
  #[arg(long, default_value_t = 0)]
  table_gap: i64,
  /// Combined wins of both teams in their last five.
  #[arg(long, default_value_t = 0)]
  wins: i64,
  /// 0-0 and 1-1 results across both teams' last ten.
  #[arg(long, default_value_t = 0)]
  scorelines: i64,
  /// Draws in recent head-to-head meetings.
  #[arg(long)]
  h2h: Option<i64>,
  /// League draw rate, percent.
  #[arg(long)]
  league_rate: Option<f64>,
  /// Goal density override.
  #[arg(long)]
  density: Option<f64>,
  #[arg(long, default_value = "neutral")]
  context: MatchContext,
  #[arg(long)]
  match_id: Option<u64>,
  #[arg(long)]
  competition: Option<String>,
  #[command(flatten)]
  output: OutputArgs,
}

impl AnalyzeArgs {
  fn to_input(&self) -> FixtureInput {
    FixtureInput {
      home_team: self.home.clone(),
      away_team: self.away.clone(),
      home_goals: GoalHistoryInput::Text(self.home_goals.clone()),
      away_goals: GoalHistoryInput::Text(self.away_goals.clone()),
      draw_odds: self.odds,
      table_gap: self.table_gap,
      combined_wins: self.wins,
      draw_scorelines: self.scorelines,
      h2h_draws: self.h2h,
      league_draw_rate: self.league_rate,
      goal_density: self.density,
      context: self.context,
      match_id: self.match_id,
      competition: self.competition.clone(),
    }
  }
}

#[derive(Debug, Args)]
struct ScanArgs {
  /// TOML file with one [[fixture]] table per match.
  fixtures: PathBuf,
  /// Overrides batch.max_concurrent.
  #[arg(long)]
  concurrency: Option<usize>,
  #[command(flatten)]
  output: OutputArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
  // ── 1. Parse arguments ──────────────────────────────────
  let cli = Cli::parse();

  // ── 2. Load configuration ───────────────────────────────
  let config = load_or_default(&cli.config)?;

  // ── 3. Initialize logging ───────────────────────────────
  init_tracing(&config);

  info!(
    name = %config.app.name,
    version = env!("CARGO_PKG_VERSION"),
    preset = %config.scoring.preset_id(),
    lookup = config.lookup.enabled,
    "Starting draw predictor"
  );

  if let Command::Presets = cli.command {
    return print_presets();
  }

  // ── 4. Pick the match data source ───────────────────────
  if config.lookup.enabled {
    let api_key = std::env::var(&config.lookup.api_key_env).ok();
    if api_key.is_none() {
      warn!(
        env = %config.lookup.api_key_env,
        "Lookup enabled but API key is not set, requests will fail"
      );
    }
    let client = FootballDataClient::new(FootballDataConfig::from_lookup(&config.lookup, api_key))
      .context("Failed to create football-data.org client")?;
    run(Arc::new(client), &config, cli.command).await
  } else {
    run(Arc::new(ManualOnly), &config, cli.command).await
  }
}

fn load_or_default(path: &Path) -> Result<AppConfig> {
  if path.exists() {
    config::loader::load_config(path).context("Failed to load configuration")
  } else {
    Ok(AppConfig::default())
  }
}

fn init_tracing(config: &AppConfig) {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr);

  if config.app.json_logs {
    builder.json().init();
  } else {
    builder.init();
  }
}

/// Run an analysis subcommand against any data source.
async fn run<S: MatchDataSource>(source: Arc<S>, config: &AppConfig, command: Command) -> Result<()> {
  let analyzer = Arc::new(DrawAnalyzer::new(source, config));
  let mut history = SessionHistory::new();

  let output = match command {
    Command::Analyze(args) => {
      let record = analyzer.analyze(&args.to_input()).await;
      history.push(record);
      args.output
    }
    Command::Scan(args) => {
      let fixtures = load_fixtures(&args.fixtures)?;
      let concurrency = args.concurrency.unwrap_or(config.batch.max_concurrent);
      let records = batch::scan(Arc::clone(&analyzer), fixtures, concurrency).await?;
      history.extend(records);
      args.output
    }
    Command::Presets => return print_presets(),
  };

  // ── 5. Report ───────────────────────────────────────────
  if output.json {
    let json = serde_json::to_string_pretty(history.records())
      .context("Failed to serialize analysis records")?;
    println!("{json}");
  } else {
    for record in history.records() {
      println!("{}", render_record(record));
    }
    if history.len() > 1 {
      print!("{}", render_history(&history));
    }
  }

  // ── 6. Export ───────────────────────────────────────────
  if let Some(path) = output.export {
    write_csv_file(&path, history.records())?;
  }

  Ok(())
}

fn print_presets() -> Result<()> {
  for preset in ThresholdPreset::ALL {
    let body = toml::to_string_pretty(&preset.thresholds())
      .context("Failed to render preset thresholds")?;
    println!("# {}\n{body}", preset.id());
  }
  Ok(())
}
