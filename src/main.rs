use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use snaplink::config::{self, Config, ConfigOverrides};

/// URL shortener service.
///
/// Every flag has an environment-variable counterpart which takes
/// precedence: LISTEN, BASE_URL, FILE_STORAGE_PATH, DATABASE_URL.
#[derive(Debug, Parser)]
#[command(name = "snaplink", version, about)]
struct Cli {
    /// HTTP server bind address
    #[arg(short = 'a', long = "listen")]
    listen: Option<String>,

    /// Base URL for composed short URLs
    #[arg(short = 'b', long = "base-url")]
    base_url: Option<String>,

    /// File storage path (selects the file backend)
    #[arg(short = 'f', long = "file-storage")]
    file_storage: Option<PathBuf>,

    /// Postgres DSN (selects the Postgres backend)
    #[arg(short = 'd', long = "database-url")]
    database_url: Option<String>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            listen_addr: cli.listen,
            base_url: cli.base_url,
            file_storage_path: cli.file_storage,
            database_url: cli.database_url,
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load(cli.into())?;

    init_tracing(&config);
    config.print_summary();

    snaplink::server::run(config).await
}
