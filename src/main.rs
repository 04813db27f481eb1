use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stationlog::app::AppContext;
use stationlog::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the Gemini response, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let setup = AppContext::load(cli.config.as_deref());
    let stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Cgi) {
        Commands::Cgi => {
            commands::run_cgi(setup, stdout.lock()).await?;
        }
        Commands::Generate { user } => {
            commands::generate(&setup?, &user, stdout.lock()).await?;
        }
        Commands::Convert { path, link } => {
            commands::convert(&setup?, &path, &link, stdout.lock())?;
        }
    }

    Ok(())
}
