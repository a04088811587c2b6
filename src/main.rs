use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{ServerOverrides, Settings};
use database::{DbRepository, connect, run_migrations};
use std::path::PathBuf;

/// Activities inserted by `seed` when none are named on the command line.
const DEFAULT_ACTIVITIES: [&str; 5] = [
    "Archery",
    "Canoeing",
    "Swimming",
    "Hiking",
    "Arts and Crafts",
];

/// The main entry point for the camp registry.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file when one is present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            settings.apply_overrides(&overrides);
            web_server::run_server(&settings).await
        }
        Commands::Migrate => handle_migrate(&settings).await,
        Commands::Seed(args) => handle_seed(&settings, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A registry of campers, activities and the signups linking them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to `config.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServerOverrides),
    /// Apply database migrations and exit.
    Migrate,
    /// Insert activities (and optionally wipe existing records first).
    Seed(SeedArgs),
}

#[derive(Parser)]
struct SeedArgs {
    /// Activity name to insert. May be repeated; defaults to a built-in list.
    #[arg(long = "activity")]
    activities: Vec<String>,

    /// Delete every camper, activity and signup before seeding.
    #[arg(long)]
    reset: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_repository(settings: &Settings) -> anyhow::Result<DbRepository> {
    let pool = connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(DbRepository::new(pool))
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    open_repository(settings).await?;
    tracing::info!(url = %settings.database.url, "Migrations applied.");
    Ok(())
}

/// Seeds activities in a single unit of work; nothing is written if any insert fails.
async fn handle_seed(settings: &Settings, args: SeedArgs) -> anyhow::Result<()> {
    let repo = open_repository(settings).await?;
    let names: Vec<String> = if args.activities.is_empty() {
        DEFAULT_ACTIVITIES.iter().map(|s| s.to_string()).collect()
    } else {
        args.activities
    };

    let mut uow = repo.begin_write().await?;
    if args.reset {
        tracing::info!("Clearing existing records.");
        uow.clear().await?;
    }
    for name in &names {
        let activity = uow.insert_activity(name).await?;
        tracing::info!(activity_id = activity.id, name = %activity.name, "Seeded activity.");
    }
    uow.commit().await?;

    tracing::info!(count = names.len(), "Seeding complete.");
    Ok(())
}
