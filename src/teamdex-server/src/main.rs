//! teamdex server binary

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use teamdex::{Catalog, JsonFileStore, Scanner, SkinRepository};
use teamdex_server::{router, AppState, SpriteDir};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "teamdex-server")]
#[command(about = "Team roster editor and broadcast overlay server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TEAMDEX_PORT", default_value = "3030")]
        port: u16,

        /// Address to bind to
        #[arg(short, long, env = "TEAMDEX_BIND", default_value = "0.0.0.0")]
        bind: String,

        /// Directory holding skins.json and saved teams
        #[arg(short, long, env = "TEAMDEX_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Directory sprites are uploaded to and served from
        #[arg(short, long, env = "TEAMDEX_SPRITES_DIR", default_value = "public/sprites")]
        sprites_dir: PathBuf,

        /// TOML catalog replacing the built-in creature roster
        #[arg(short, long, env = "TEAMDEX_CATALOG")]
        catalog: Option<PathBuf>,

        /// Skip the startup scan of the sprite directory
        #[arg(long)]
        no_scan: bool,
    },

    /// Classify a sprite directory and print the scan report
    Scan {
        /// Directory to scan
        #[arg(env = "TEAMDEX_SPRITES_DIR", default_value = "public/sprites")]
        dir: PathBuf,

        /// Replace the stored skin records with the result
        #[arg(short, long)]
        write: bool,

        /// Directory holding skins.json
        #[arg(short, long, env = "TEAMDEX_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// TOML catalog replacing the built-in creature roster
        #[arg(short, long, env = "TEAMDEX_CATALOG")]
        catalog: Option<PathBuf>,
    },
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_toml_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            tracing::info!(
                creatures = catalog.creatures().len(),
                "Loaded catalog from {}",
                path.display()
            );
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamdex_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Serve {
            port,
            bind,
            data_dir,
            sprites_dir,
            catalog,
            no_scan,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let state = Arc::new(AppState::open(catalog, &data_dir, &sprites_dir)?);
            tracing::info!("Data directory: {}", data_dir.display());
            tracing::info!("Sprite directory: {}", sprites_dir.display());

            if !no_scan {
                state.rescan()?;
            }

            let app = router(state);

            let bind_addr = format!("{}:{}", bind, port);
            tracing::info!("Starting server on {}", bind_addr);
            tracing::info!("OpenAPI spec available at /openapi.json");
            tracing::info!("Interactive docs at /scalar");

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, app).await?;
        }

        Command::Scan {
            dir,
            write,
            data_dir,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let files = SpriteDir::open(&dir)?.list()?;
            let (records, report) = Scanner::new(&catalog).scan_with_report(&files);

            if write {
                JsonFileStore::open(&data_dir)?.replace_all(&records)?;
                tracing::info!(records = report.records, "Wrote skin records to {}", data_dir.display());
            }

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
