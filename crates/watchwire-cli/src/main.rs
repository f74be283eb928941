mod sync;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use watchwire_core::{ContentKind, SystemClock};

#[derive(Debug, Parser)]
#[command(name = "watchwire-cli")]
#[command(about = "Watchwire operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Run a full change sweep now
    Sweep {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Check a single tracked item now
    Check {
        #[arg(value_enum)]
        kind: KindArg,
        /// Local id of the show or movie
        id: i64,
    },
    /// Print the change window a sweep would query today
    Window {
        /// Days to look back; defaults to the configured lookback
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Shows,
    Show,
    Movies,
    Movie,
}

impl From<KindArg> for ContentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Shows | KindArg::Show => ContentKind::Show,
            KindArg::Movies | KindArg::Movie => ContentKind::Movie,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Window { days } = cli.command {
        // Needs no credentials, so it works without a full environment.
        let lookback = match days {
            Some(days) => days,
            None => watchwire_core::load_app_config()
                .map_or(DEFAULT_WINDOW_DAYS, |config| config.change_lookback_days),
        };
        let window = watchwire_core::generate_date_range(&SystemClock, lookback);
        println!("{} .. {}", window.past_date, window.current_date);
        return Ok(());
    }

    let config = watchwire_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = watchwire_db::PoolConfig::from_app_config(&config);
    let pool = watchwire_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            watchwire_db::health_check(&pool).await?;
            println!("database reachable");
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            watchwire_db::run_migrations(&pool).await?;
            println!("migrations applied");
        }
        Commands::Sweep { kind } => {
            sync::run_sweep(&config, pool, kind.into()).await?;
        }
        Commands::Check { kind, id } => {
            sync::run_check(&config, pool, kind.into(), id).await?;
        }
        Commands::Window { .. } => {}
    }

    Ok(())
}

const DEFAULT_WINDOW_DAYS: u32 = 10;
