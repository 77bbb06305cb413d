//! Docsieve CLI - extract structured fields from scanned documents.

use anyhow::Context;
use clap::Parser;
use docsieve_cli::{commands, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&format!("{e:#}")));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> anyhow::Result<()> {
    match cli.command {
        Command::Process(args) => {
            let file = args.file.clone();
            commands::execute_process(args, formatter)
                .await
                .with_context(|| format!("failed to process {}", file.display()))?;
        }
        Command::Classify(args) => {
            let file = args.file.clone();
            commands::execute_classify(args, formatter)
                .await
                .with_context(|| format!("failed to classify {}", file.display()))?;
        }
    }

    Ok(())
}
