use clap::Parser;
use na_core::{Config, SearchParams};
use na_sources::{init_logging, SearchService};
use na_web::{create_app, AppState};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let num = current_number
                .parse::<u64>()
                .map_err(|_| format!("Missing number before unit: {}", c))?;
            let unit_millis = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_millis = num
                .checked_mul(unit_millis)
                .and_then(|ms| total_millis.checked_add(ms))
                .ok_or_else(|| "Duration is too large".to_string())?;
            current_number.clear();
            has_unit = true;
        }

        // A bare trailing number is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = num
                .checked_mul(1_000)
                .and_then(|ms| total_millis.checked_add(ms))
                .ok_or_else(|| "Duration is too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_millis == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

/// Only the literal `true` turns offline mode on.
fn parse_offline_flag(s: &str) -> std::result::Result<bool, String> {
    Ok(s == "true")
}

#[derive(clap::Args, Debug)]
struct ConfigArgs {
    #[arg(long, env = "GUARDIAN_API_KEY", hide_env_values = true)]
    guardian_api_key: Option<String>,
    #[arg(long, env = "NYT_API_KEY", hide_env_values = true)]
    nyt_api_key: Option<String>,
    /// Serve the offline snapshot instead of querying live sources
    #[arg(long, env = "OFFLINE_MODE", default_value = "false", action = clap::ArgAction::Set, value_parser = parse_offline_flag)]
    offline_mode: bool,
    #[arg(long, env = "OFFLINE_DATA_PATH", default_value = na_core::config::DEFAULT_OFFLINE_DATA_PATH)]
    offline_data: PathBuf,
    /// Per-source time budget (e.g. 500ms, 10s, 1m30s)
    #[arg(long, env = "SOURCE_TIMEOUT", default_value = "10s")]
    source_timeout: HumanDuration,
    /// Retries after a transient upstream failure
    #[arg(long, env = "SOURCE_RETRIES", default_value_t = 1)]
    retries: u32,
}

impl ConfigArgs {
    fn into_config(self) -> Config {
        Config {
            guardian_api_key: self.guardian_api_key.filter(|k| !k.is_empty()),
            nyt_api_key: self.nyt_api_key.filter(|k| !k.is_empty()),
            offline_mode: self.offline_mode,
            offline_data_path: self.offline_data,
            source_timeout: self.source_timeout.0,
            max_retries: self.retries,
            ..Config::default()
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Search news across the Guardian and the New York Times", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP search API
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
        bind: String,
    },
    /// Run one search and print the JSON response
    Search {
        #[arg(default_value = na_core::query::DEFAULT_KEYWORD)]
        keyword: String,
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long, default_value = na_core::query::DEFAULT_CITY)]
        city: String,
    },
    /// List registered sources in query order
    Sources,
}

async fn serve(service: SearchService, bind: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("🗞️ Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(AppState { search: service }))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = cli.config.into_config();
    if config.offline_mode {
        info!("📦 Offline mode enabled, reading {}", config.offline_data_path.display());
    }
    let service = SearchService::from_config(&config)?;
    info!("🦗 Sources initialized: {}", service.source_names().join(", "));

    match cli.command {
        Commands::Serve { bind } => serve(service, &bind).await?,
        Commands::Search { keyword, page, city } => {
            let started = Instant::now();
            let params = SearchParams {
                keyword: Some(keyword),
                page: Some(page),
                city: Some(city),
            };
            let query = params.sanitize()?;
            let response = service.search(&query, started).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Sources => {
            for (position, name) in service.source_names().iter().enumerate() {
                println!("{}. {}", position + 1, name);
            }
        }
    }

    Ok(())
}
