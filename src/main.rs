//! City Search - Entry Point

use citysearch::client::GeoDbClient;
use citysearch::config::{CliOverrides, ResolvedConfig};
use citysearch::model::{AppError, FlagStyle};
use citysearch::state::{SearchStatus, MAX_LIMIT, MIN_LIMIT};
use citysearch::view::CliArgs;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// Extra time `--print` waits beyond the HTTP timeout.
const PRINT_GRACE: Duration = Duration::from_secs(2);

/// City Search - find cities by name prefix
#[derive(Parser, Debug)]
#[command(name = "citysearch")]
#[command(version)]
#[command(about = "Terminal UI for searching cities by name prefix")]
pub struct Args {
    /// Initial search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of results (1-10)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_LIMIT)..=i64::from(MAX_LIMIT)))]
    pub limit: Option<u32>,

    /// Flag rendering: emoji, url or code
    #[arg(long = "flags", value_name = "STYLE")]
    pub flags: Option<FlagStyle>,

    /// RapidAPI host
    #[arg(long)]
    pub api_host: Option<String>,

    /// RapidAPI key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Run one search, print the rows and exit
    #[arg(long)]
    pub print: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_host: self.api_host.clone(),
            api_key: self.api_key.clone(),
            limit: self.limit,
            flag_style: self.flags,
        }
    }

    fn cli_args(&self, config: &ResolvedConfig) -> CliArgs {
        CliArgs {
            limit: config.default_limit,
            query: self.query.clone(),
            flag_style: config.flag_style,
            no_color: self.no_color,
        }
    }
}

fn main() -> Result<ExitCode, AppError> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = citysearch::config::load_config_with_precedence(args.config.clone())?;
        let merged = citysearch::config::merge_config(config_file);
        let with_env = citysearch::config::apply_env_overrides(merged);
        citysearch::config::apply_cli_overrides(with_env, args.overrides())
    };
    config.validate()?;

    citysearch::logging::init(&config.log_file_path)?;

    // Never log the API key.
    info!(
        api_host = %config.api_host,
        base_url = ?config.base_url,
        default_limit = config.default_limit,
        timeout_secs = config.timeout_secs,
        flag_style = ?config.flag_style,
        "Configuration loaded and resolved"
    );

    let api_config = config.api_config()?;
    let client = GeoDbClient::new(&api_config)?;
    let cli_args = args.cli_args(&config);

    if args.print {
        let mut state = cli_args.initial_state();
        citysearch::view::search_once(client, &mut state, api_config.timeout + PRINT_GRACE)?;

        return Ok(match state.search.status() {
            SearchStatus::Error(failure) => {
                eprintln!("{failure}");
                ExitCode::FAILURE
            }
            _ => {
                for line in citysearch::view::format_rows(&state) {
                    println!("{line}");
                }
                ExitCode::SUCCESS
            }
        });
    }

    citysearch::view::run_with_lookup(client, cli_args)?;

    Ok(ExitCode::SUCCESS)
}
