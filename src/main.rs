//! # Player Search Main Driver
//!
//! ## Purpose
//! Entry point for the interactive player search tool. Loads configuration,
//! initializes logging, ingests the three datasets, and serves queries from
//! a stdin command loop.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Read the three dataset files and build the catalog (timed phases)
//! 4. Answer commands until `exit` or end of input

use anyhow::Context;
use clap::{Arg, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use player_trie_search::{
    config::Config,
    errors::{CatalogError, Result},
    repl::{self, Renderer},
    search::QueryEngine,
    utils::{read_lines, Timer},
    Catalog, IngestionPipeline,
};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("player-search-cli")
        .version("0.1.0")
        .author("Player Search Team")
        .about("Interactive trie-indexed search over player, rating, and tag data")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("players")
                .long("players")
                .value_name("FILE")
                .help("Records dataset path (overrides config)"),
        )
        .arg(
            Arg::new("ratings")
                .long("ratings")
                .value_name("FILE")
                .help("Ratings dataset path (overrides config)"),
        )
        .arg(
            Arg::new("tags")
                .long("tags")
                .value_name("FILE")
                .help("Tags dataset path (overrides config)"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    if let Some(path) = matches.get_one::<String>("players") {
        config.data.players_path = PathBuf::from(path);
    }
    if let Some(path) = matches.get_one::<String>("ratings") {
        config.data.ratings_path = PathBuf::from(path);
    }
    if let Some(path) = matches.get_one::<String>("tags") {
        config.data.tags_path = PathBuf::from(path);
    }

    init_logging(&config)?;
    info!("Starting player search engine");

    let catalog = load_catalog(&config)?;
    info!(
        "Catalog ready: {} records, {} trie nodes",
        catalog.store.len(),
        catalog.names.node_count()
    );

    run_repl(&catalog, &config)?;
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let log_level: tracing::Level =
        config
            .logging
            .level
            .parse()
            .map_err(|_| CatalogError::Config {
                message: format!("Invalid log level: {}", config.logging.level),
            })?;
    let filter = tracing_subscriber::filter::LevelFilter::from_level(log_level);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_filter(filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_filter(filter),
            )
            .init();
    }

    Ok(())
}

/// Read the three dataset files and build the catalog.
fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let timer = Timer::new("catalog load");

    let records = read_lines(&config.data.players_path)
        .with_context(|| format!("opening {}", config.data.players_path.display()))?;
    let ratings = read_lines(&config.data.ratings_path)
        .with_context(|| format!("opening {}", config.data.ratings_path.display()))?;
    let tags = read_lines(&config.data.tags_path)
        .with_context(|| format!("opening {}", config.data.tags_path.display()))?;

    let catalog = IngestionPipeline::new()
        .ingest(records, ratings, tags)
        .context("building catalog")?;

    info!("Catalog built in {}ms", timer.stop());
    Ok(catalog)
}

/// Serve queries from stdin until `exit` or end of input.
fn run_repl(catalog: &Catalog, config: &Config) -> anyhow::Result<()> {
    let engine = QueryEngine::new(catalog, config.query.clone());
    let mut renderer = Renderer::new();
    let stdin = io::stdin();

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match repl::parse_command(&line) {
            Some(repl::Command::Player(token)) => {
                println!("{}", renderer.render_records(&engine.search_by_name_substring(&token))?);
            }
            Some(repl::Command::Name(token)) => {
                println!("{}", renderer.render_records(&engine.search_by_name_prefix(&token))?);
            }
            Some(repl::Command::User(contributor)) => {
                println!(
                    "{}",
                    renderer.render_contributor(&engine.search_by_contributor(&contributor))?
                );
            }
            Some(repl::Command::Top { limit, position }) => {
                let results = engine.top_by_position(
                    &position,
                    config.query.top_min_rating_count,
                    limit,
                );
                println!("{}", renderer.render_records(&results)?);
            }
            Some(repl::Command::Tags(tags)) => {
                println!("{}", renderer.render_records(&engine.search_by_tags(&tags))?);
            }
            Some(repl::Command::Json) => {
                let json = renderer.toggle_json();
                println!("JSON output {}", if json { "enabled" } else { "disabled" });
            }
            Some(repl::Command::Exit) => break,
            None => {
                println!("Unrecognized command. Try: player <token> | name <prefix> | user <id> | top<N> '<position>' | tags '<tag>' ... | json | exit");
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
