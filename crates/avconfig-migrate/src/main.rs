//! AV configuration migration CLI
//!
//! Copies the legacy configuration database into the document store.

// CLI tool - relax pedantic lints for ergonomics
#![allow(clippy::pedantic)]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use avconfig_migrate::connectors::create_source;
use avconfig_migrate::{Collection, LegacySnapshot, MigrationConfig, Pipeline, SourceConfig};

#[derive(Parser)]
#[command(name = "avconfig-migrate")]
#[command(author = "AV Engineering")]
#[command(version)]
#[command(about = "Migrate the legacy AV configuration database to the document store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (defaults to the environment)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Dry run mode (don't write to destination)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log non-2xx destination answers instead of aborting
    #[arg(long, global = true)]
    tolerate_http_errors: bool,

    /// Hide the progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the migration
    Run,

    /// Validate configuration
    Validate,

    /// Fetch the legacy store and print what it holds
    Inspect,

    /// Generate example configuration
    Init {
        /// Output file path
        #[arg(short, long, default_value = "migration.yaml")]
        output: PathBuf,
    },

    /// Save the legacy store, full rooms included, as a JSON export
    Export {
        /// Output file path
        #[arg(short, long, default_value = "legacy-export.json")]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &cli.command {
        Some(Commands::Validate) => validate_config(&cli)?,
        Some(Commands::Inspect) => inspect_source(&cli).await?,
        Some(Commands::Init { output }) => generate_config(output)?,
        Some(Commands::Export { output }) => export_source(&cli, output).await?,
        Some(Commands::Run) | None => {
            if !run_migration(&cli).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Loads the configuration file, or the environment when none is given,
/// and applies the command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<MigrationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            MigrationConfig::from_file(path)?
        }
        None => {
            info!("Loading configuration from environment");
            MigrationConfig::from_env()?
        }
    };

    if cli.dry_run {
        config.options.dry_run = true;
    }
    if cli.tolerate_http_errors {
        config.options.tolerate_http_errors = true;
    }
    if cli.no_progress {
        config.options.progress = false;
    }

    Ok(config)
}

/// Loads only the source half of the configuration. Commands that never
/// write do not need a destination in the environment.
fn load_source(cli: &Cli) -> anyhow::Result<SourceConfig> {
    match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Ok(MigrationConfig::from_file(path)?.source)
        }
        None => {
            info!("Loading source configuration from environment");
            Ok(SourceConfig::from_env()?)
        }
    }
}

/// Returns whether every stage completed.
async fn run_migration(cli: &Cli) -> anyhow::Result<bool> {
    let config = load_config(cli)?;
    config.validate()?;

    info!("Starting migration...");

    let pipeline = Pipeline::new(&config)?;
    let report = pipeline.run().await;

    if report.is_complete() {
        println!("\n✅ Migration Complete!");
    } else {
        println!("\n❌ Migration Aborted!");
    }
    for collection in Collection::ALL {
        println!(
            "   {:<20} {}",
            format!("{}:", collection),
            report.written_to(collection)
        );
    }
    let skipped: u64 = report.stages.iter().map(|s| s.skipped).sum();
    println!("   {:<20} {}", "skipped:", skipped);
    println!("   {:<20} {:.2}s", "duration:", report.duration_secs);

    if let Some(abort) = &report.abort {
        println!("   Stopped during {}: {}", abort.stage, abort.error);
    }

    Ok(report.is_complete())
}

fn validate_config(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    config.validate()?;

    println!("✅ Configuration is valid!");
    match &config.source {
        SourceConfig::ConfigDb(cfg) => println!("   Source:      config db at {}", cfg.url),
        SourceConfig::JsonFile(cfg) => println!("   Source:      export {:?}", cfg.path),
    }
    println!("   Destination: {}", config.destination.address);
    println!(
        "   Auth:        {}",
        if config.destination.credentials().is_some() {
            "basic"
        } else {
            "none"
        }
    );
    println!("   Dry run:     {}", config.options.dry_run);

    Ok(())
}

async fn inspect_source(cli: &Cli) -> anyhow::Result<()> {
    let source = create_source(&load_source(cli)?)?;
    let snapshot = LegacySnapshot::fetch(source.as_ref()).await;

    println!("\n📊 Legacy Store ({}):", source.source_type());
    println!("   Buildings:      {}", snapshot.buildings.len());
    println!("   Rooms:          {}", snapshot.rooms.len());
    println!("   Configurations: {}", snapshot.configurations.len());
    println!("   Device classes: {}", snapshot.device_classes.len());
    println!("   Commands:       {}", snapshot.raw_commands.len());
    println!("   Ports:          {}", snapshot.ports.len());
    println!("   Microservices:  {}", snapshot.microservices.len());
    println!("   Endpoints:      {}", snapshot.endpoints.len());

    Ok(())
}

async fn export_source(cli: &Cli, output: &Path) -> anyhow::Result<()> {
    let source = create_source(&load_source(cli)?)?;

    let mut snapshot = LegacySnapshot::fetch(source.as_ref()).await;
    snapshot.expand_rooms(source.as_ref()).await;

    let file = std::fs::File::create(output)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &snapshot)?;

    println!("✅ Exported {} rooms to {:?}", snapshot.rooms.len(), output);
    println!(
        "   Migrate it with a `json_file` source: avconfig-migrate init, then set source.path to {:?}",
        output
    );

    Ok(())
}

fn generate_config(output: &Path) -> anyhow::Result<()> {
    std::fs::write(output, CONFIG_TEMPLATE)?;
    println!("✅ Generated configuration: {:?}", output);
    println!(
        "   Edit the file and run: avconfig-migrate run --config {:?}",
        output
    );

    Ok(())
}

const CONFIG_TEMPLATE: &str = r#"# AV configuration migration
source:
  type: config_db
  url: http://localhost:8002
  # timeout_secs: 30

# Offline alternative, from `avconfig-migrate export`:
# source:
#   type: json_file
#   path: ./legacy-export.json

destination:
  address: http://localhost:5984
  username: admin
  password: changeme
  # timeout_secs: 30

options:
  dry_run: false
  tolerate_http_errors: false
  progress: true
"#;
