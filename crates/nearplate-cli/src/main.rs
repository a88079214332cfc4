mod render;
mod route;
mod search;


use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nearplate_agg::SortKey;
use nearplate_core::Category;

#[derive(Debug, Parser)]
#[command(name = "nearplate")]
#[command(about = "Find, sort, and route to eateries near you")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for nearby places and render result cards
    Search {
        /// Place category to search for
        #[arg(long, default_value = "restaurant")]
        category: Category,

        /// Origin latitude; omit (with --lng) to geolocate instead
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Origin longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Only include places reporting themselves open right now
        #[arg(long)]
        open_now: bool,

        /// Result order: none, rating, or distance
        #[arg(long, default_value = "none")]
        sort: SortKey,

        /// Keep only places whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Show at most this many cards
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Compute a driving route to a place and print a maps hand-off link
    Route {
        /// Destination place identifier (from search output)
        #[arg(long)]
        to: String,

        /// Origin latitude; omit (with --lng) to geolocate instead
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Origin longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Print the current best-effort position fix
    Locate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = nearplate_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match cli.command {
        Commands::Search {
            category,
            lat,
            lng,
            open_now,
            sort,
            filter,
            limit,
        } => {
            search::run(
                &config,
                category,
                lat,
                lng,
                open_now,
                sort,
                filter.as_deref(),
                limit,
            )
            .await
        }
        Commands::Route { to, lat, lng } => route::run(&config, &to, lat, lng).await,
        Commands::Locate => {
            let client = nearplate_places::PlacesClient::new(&config)?;
            match client.geolocate().await {
                Ok(fix) => {
                    println!("current position: {:.5},{:.5}", fix.lat, fix.lng);
                    Ok(())
                }
                Err(e) => {
                    eprintln!(
                        "could not determine your position (fallback is {:.3},{:.3})",
                        config.fallback_origin.lat, config.fallback_origin.lng
                    );
                    Err(e.into())
                }
            }
        }
    }
}
