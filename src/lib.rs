pub mod cli;
pub mod clients;
pub mod config;
pub mod format;
pub mod models;
pub mod services;
pub mod state;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SearchArgs};
pub use config::Config;
use config::LogFormat;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        return cli::cmd_init();
    }

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    match command {
        Commands::Search {
            origin,
            destination,
            date,
            max_price,
            max_stops,
            airline,
            chart,
            json,
        } => {
            let args = SearchArgs {
                origin,
                destination,
                date,
                max_price,
                max_stops,
                airline,
                chart,
                json,
            };
            cli::cmd_search_flights(&config, args).await
        }

        Commands::Shell => cli::cmd_shell(&config).await,

        Commands::Init => cli::cmd_init(),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries command output; logs go to stderr.
    match config.general.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
