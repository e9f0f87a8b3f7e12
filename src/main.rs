use anyhow::Context;
use clap::Parser;
use funrun::{
    cli::commands::{dispatch, CommandResult},
    cli::{AppContext, Cli, LogLevel},
    config::ConfigLoader,
};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so command output on stdout stays clean
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let current_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let mut config = ConfigLoader::new(&current_dir).load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    let mut ctx = AppContext::from_config(config).context("Failed to open registration storage")?;
    let result = dispatch(cli.command, &mut ctx)?;

    match &result {
        CommandResult::Success(Some(msg)) | CommandResult::Warning(msg) => println!("{}", msg),
        CommandResult::Success(None) => {}
        CommandResult::Error(msg) => eprintln!("{}", msg),
    }

    std::process::exit(result.exit_code());
}
