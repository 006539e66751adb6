mod query;
mod tile;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bridgemap-cli")]
#[command(about = "Bridge inventory tile query command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Print the geographic bounding box of a slippy-map tile
    Bbox {
        #[arg(long)]
        zoom: i64,
        #[arg(long, allow_negative_numbers = true)]
        x: i64,
        #[arg(long, allow_negative_numbers = true)]
        y: i64,
    },
    /// Rank bridges inside a set of tiles
    Query {
        #[arg(long)]
        zoom: i64,
        /// Tile as `x,y`; repeat for several tiles
        #[arg(
            long = "tile",
            value_name = "X,Y",
            required = true,
            value_parser = tile::parse_tile_pair
        )]
        tiles: Vec<(i64, i64)>,
        #[arg(long, default_value = "default")]
        filter_key: String,
        /// `single` ranks each tile on its own, `batch` ranks their union
        #[arg(long, default_value = "batch")]
        mode: String,
        #[arg(long, default_value_t = bridgemap_core::DEFAULT_LIMIT)]
        limit: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    Ping,
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => {
            let config = bridgemap_core::load_app_config()?;
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    bridgemap_db::health_check(&pool).await?;
                    tracing::info!("database ping succeeded");
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = bridgemap_db::run_migrations(&pool).await?;
                    tracing::info!(applied, "migrations complete");
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Bbox { zoom, x, y }) => tile::run_bbox(zoom, x, y)?,
        Some(Commands::Query {
            zoom,
            tiles,
            filter_key,
            mode,
            limit,
            json,
        }) => {
            let mode = mode.parse::<bridgemap_core::QueryMode>()?;
            let config = bridgemap_core::load_app_config()?;
            let pool = connect(&config).await?;
            let store = bridgemap_db::PgBridgeStore::new(pool, config.query_timeout());
            let request = bridgemap_core::TileBatchRequest { zoom, tiles };
            query::run_query(&store, &request, &filter_key, mode, limit, json).await?;
        }
        None => println!("bridgemap-cli: run with --help for commands"),
    }

    Ok(())
}

async fn connect(config: &bridgemap_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = bridgemap_db::PoolConfig::from_app_config(config);
    Ok(bridgemap_db::connect_pool(&config.database_url, pool_config).await?)
}

#[cfg(test)]
mod tests;
