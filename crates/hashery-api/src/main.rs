//! Hashery CLI and HTTP entry point.
//!
//! Binary name: `hashd`
//!
//! Parses CLI arguments, initializes tracing and configuration, then either
//! runs a one-shot command or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use hashery_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli::log_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions and digests don't need configuration
    let result = match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "hashd", &mut std::io::stdout());
            Ok(())
        }
        Commands::Digest { secret } => cli::digest::print_digest(secret, cli.json),
        Commands::Config => {
            let config = cli::load_effective_config(cli.config.as_deref()).await?;
            cli::digest::print_config(&config, cli.json)
        }
        Commands::Serve(args) => {
            let config = cli::load_effective_config(cli.config.as_deref()).await?;
            cli::serve::serve(args.apply(config), cli.quiet).await
        }
    };

    shutdown_tracing();
    result
}
