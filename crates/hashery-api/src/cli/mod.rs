//! CLI command definitions for the `hashd` binary.
//!
//! Uses clap derive macros for argument parsing. Flags given on the command
//! line (or through their environment variables) override `config.toml`.

pub mod digest;
pub mod serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use hashery_infra::config::{load_config, load_config_file, resolve_config_dir};
use hashery_types::config::{ServiceConfig, SubmitMode};

/// Hash secrets after a deliberate delay and serve the results over HTTP.
#[derive(Parser)]
#[command(name = "hashd", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Config file to use instead of `$HASHERY_HOME/config.toml`.
    #[arg(long, global = true, env = "HASHERY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Print the digest of a secret without starting the server.
    Digest {
        /// Secret to hash.
        secret: String,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Overrides for `hashd serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on.
    pub port: Option<u16>,

    /// Interface to bind.
    #[arg(long, env = "HASHERY_HOST")]
    pub host: Option<String>,

    /// Response mode of POST /hash (deferred, blocking, streaming).
    #[arg(long, env = "HASHERY_MODE")]
    pub mode: Option<SubmitMode>,

    /// Minimum delay before a digest becomes visible, in milliseconds.
    #[arg(long)]
    pub min_delay_ms: Option<u64>,

    /// Grace period for in-flight work during shutdown, in seconds.
    #[arg(long)]
    pub grace_secs: Option<u64>,
}

impl ServeArgs {
    /// Layer the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(ms) = self.min_delay_ms {
            config.min_delay_ms = ms;
        }
        if let Some(secs) = self.grace_secs {
            config.shutdown_grace_secs = secs;
        }
        config
    }
}

/// Default log filter for the given verbosity flags.
pub fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,hashery=debug",
        _ => "trace",
    }
}

/// Load the explicit config file if one was given, else the default location.
pub async fn load_effective_config(path: Option<&std::path::Path>) -> anyhow::Result<ServiceConfig> {
    match path {
        Some(path) => Ok(load_config_file(path).await?),
        None => Ok(load_config(&resolve_config_dir()).await),
    }
}
