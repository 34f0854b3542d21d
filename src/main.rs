use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metagame::attribution::{resolve_result_line, WinnerResolver};
use metagame::calculate::analyze;
use metagame::config::AppConfig;
use metagame::identity::{ArchetypeCatalog, IdentityMatcher};
use metagame::parse_round_set;
use metagame::storage::{read_decklists, read_results, write_report, StorageConfig};

#[derive(Parser)]
#[command(name = "metagame")]
#[command(about = "Card-game tournament metagame analyzer")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
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
    /// Build the metagame report from decklists and results
    Analyze {
        /// Rounds to exclude from archetype stats (e.g. "1-3,8-10")
        #[arg(long)]
        draft_rounds: Option<String>,

        /// Include "A vs A" self-pairings in matchup stats
        #[arg(long)]
        mirror_matchups: bool,

        /// Print the summary without writing analysis.json
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which decklist archetype a player name resolves to
    Resolve {
        /// Player name as it appears on a result sheet
        name: String,
    },

    /// Turn a free-text result line into a match result
    Attribute {
        #[arg(long)]
        player1: String,

        #[arg(long)]
        player2: String,

        #[arg(long, default_value = "0")]
        round: u32,

        /// e.g. "Garcia-Romo, Andy won 2-1-0" or "1-1-0 Draw"
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting metagame v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Analyze {
            draft_rounds,
            mirror_matchups,
            dry_run,
        } => {
            if let Some(rounds) = draft_rounds {
                config.analysis.draft_rounds = parse_round_set(&rounds)
                    .with_context(|| format!("Invalid --draft-rounds: {}", rounds))?;
            }
            if mirror_matchups {
                config.analysis.report_mirror_matchups = true;
            }

            let decklists = read_decklists(&storage.decklists_path())?;
            let results = read_results(&storage.results_path())?;
            println!("Loaded {} decklists", decklists.len());
            println!("Loaded {} match results", results.len());

            let report = analyze(&decklists, &results, &config.analysis);

            println!("\nFound {} players", report.total_players);
            println!("Found {} archetypes", report.archetype_counts.len());
            println!("Processed {} matches", report.total_matches);

            println!("\nArchetype Representation:");
            for (archetype, count) in report.sorted_by_count() {
                println!(
                    "  {}: {} ({:.1}%)",
                    archetype,
                    count,
                    report.meta_share(archetype) * 100.0
                );
            }

            println!("\nArchetype Win Rates:");
            for (archetype, stat) in report.sorted_by_win_rate() {
                println!(
                    "  {}: {}-{}-{} ({:.1}%)",
                    archetype,
                    stat.wins,
                    stat.losses,
                    stat.draws,
                    stat.win_rate * 100.0
                );
            }

            if dry_run {
                println!("\n(dry run - no data written to disk)");
            } else {
                let path = storage.analysis_path();
                write_report(&path, &report)?;
                println!("\nAnalysis saved to {}", path.display());
            }
        }
        Commands::Resolve { name } => {
            let decklists = read_decklists(&storage.decklists_path())?;
            let catalog = ArchetypeCatalog::from_decklists(&decklists);
            let matcher = IdentityMatcher::new(&catalog);

            let resolution = matcher.resolve(&name);
            println!("Name:      {}", metagame::names::normalize(&name));
            println!("Archetype: {}", resolution.archetype);
            println!("Matched:   {}", resolution.tier.unwrap_or("no match"));
        }
        Commands::Attribute {
            player1,
            player2,
            round,
            text,
        } => {
            let resolver = WinnerResolver::default();
            match resolve_result_line(&resolver, round, &player1, &player2, &text) {
                Some(attributed) => {
                    println!("{}", serde_json::to_string_pretty(&attributed.result)?);
                    println!("Confidence: {}", attributed.confidence);
                    if attributed.confidence.needs_review() {
                        tracing::warn!("Low-confidence attribution for {:?}", text);
                    }
                }
                None => {
                    eprintln!("Unrecognized result line: {}", text);
                }
            }
        }
    }

    Ok(())
}
