use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtcast::api::state::AppState;
use courtcast::api::build_router;
use courtcast::config::AppConfig;
use courtcast::dataset::{load_dataset, MatchRecordRepository, RankingRepository};
use courtcast::models::{Discipline, PredictionResult, RANKING_CATEGORIES};
use courtcast::predict::predict;

#[derive(Parser)]
#[command(name = "courtcast")]
#[command(about = "Badminton league match-outcome prediction engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error; overrides config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Predict the outcome of a single pairing
    Predict {
        /// First player name
        #[arg(long)]
        player1: String,

        /// Second player name
        #[arg(long)]
        player2: String,

        /// Discipline (export label, English name, or category code)
        #[arg(long, default_value = "mens_singles")]
        discipline: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the dataset and report ingestion quality
    CheckData,
}

/// File config with CLI flags layered on top.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        AppConfig::from_file(&path)?
    } else {
        AppConfig::default()
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting courtcast v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let (dataset, _report) = load_dataset(&config.data_dir)?;
            let dataset = Arc::new(dataset);
            let state = AppState {
                matches: dataset.clone(),
                rankings: dataset.clone(),
                stats: dataset.stats(),
            };

            let app = build_router(state);
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Predict {
            player1,
            player2,
            discipline,
            json,
        } => {
            let discipline: Discipline = discipline.parse()?;
            let (dataset, _report) = load_dataset(&config.data_dir)?;

            let matches = dataset.matches_for_pair(&player1, &player2).await?;
            let rankings = dataset.ranking_table().await?;
            let today = chrono::Utc::now().date_naive();
            let result = predict(&matches, &rankings, &player1, &player2, discipline, today)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_prediction(&result);
            }
        }
        Commands::CheckData => {
            let (dataset, report) = load_dataset(&config.data_dir)?;
            let stats = dataset.stats();

            println!("\n=== Dataset Check ===");
            println!("Match files:          {}", report.match_files);
            println!("Matches loaded:       {}", report.matches_loaded);
            println!("Rows skipped:         {}", report.matches_skipped);
            println!("Duplicates dropped:   {}", report.duplicates_dropped);
            println!("Ranking files:        {}", report.ranking_files);
            println!("Ranking entries:      {}", report.ranking_entries);
            println!("Ranking rows skipped: {}", report.ranking_rows_skipped);
            println!("Distinct players:     {}", stats.player_count);
            match (stats.earliest_match, stats.latest_match) {
                (Some(from), Some(to)) => println!("Date coverage:        {} to {}", from, to),
                _ => println!("Date coverage:        (no dated matches)"),
            }

            let rankings = dataset.ranking_table().await?;
            for category in RANKING_CATEGORIES {
                let n = rankings.category_len(category);
                if n == 0 {
                    println!(
                        "Ranking list {}:       missing (ranking factor stays neutral)",
                        category
                    );
                } else {
                    println!("Ranking list {}:       {} entries", category, n);
                }
            }
        }
    }

    Ok(())
}

fn print_prediction(result: &PredictionResult) {
    let p1 = &result.player1;
    let p2 = &result.player2;

    println!(
        "\n=== {} vs {} ({}) ===",
        p1.name, p2.name, result.discipline
    );
    println!(
        "Win probability:  {:.1}% / {:.1}%",
        result.player1_probability * 100.0,
        result.player2_probability * 100.0
    );
    println!(
        "Decimal odds:     {:.2} / {:.2}",
        result.odds_player1, result.odds_player2
    );
    println!();
    println!(
        "Class estimate:   {} ({:.0}% confident) vs {} ({:.0}% confident)",
        p1.class_label,
        p1.class.confidence * 100.0,
        p2.class_label,
        p2.class.confidence * 100.0
    );
    println!(
        "Head-to-head:     {}-{} across {} qualifying meetings",
        result.head_to_head.player1_wins,
        result.head_to_head.player2_wins,
        result.head_to_head.qualifying_matches
    );
    println!(
        "Win streak:       {} vs {}",
        p1.form.win_streak, p2.form.win_streak
    );
    println!(
        "Avg point diff:   {:+.1} vs {:+.1}",
        p1.form.avg_point_diff, p2.form.avg_point_diff
    );
    println!(
        "Ranking points:   {:.0} vs {:.0}",
        p1.ranking_points, p2.ranking_points
    );
    println!();
    println!("Factor weights:");
    println!("  class_level:            {:.3}", result.weights.class_level);
    println!("  recent_form:            {:.3}", result.weights.recent_form);
    println!("  head_to_head:           {:.3}", result.weights.head_to_head);
    println!(
        "  point_differential:     {:.3}",
        result.weights.point_differential
    );
    println!(
        "  tournament_performance: {:.3}",
        result.weights.tournament_performance
    );
    println!("  ranking:                {:.3}", result.weights.ranking);
}
