//! `horuspay` command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Sign and verify HorusPay webhooks, or query the API.
#[derive(Parser, Debug)]
#[command(name = "horuspay")]
#[command(about = "HorusPay webhook and API tools", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a signature header for a payload file
    Sign {
        /// Webhook signing secret
        #[arg(long, env = "HORUSPAY_WEBHOOK_SECRET")]
        secret: String,

        /// Unix timestamp to sign with (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,

        /// Signature scheme
        #[arg(long)]
        scheme: Option<String>,

        /// File containing the raw payload
        payload: PathBuf,
    },

    /// Verify a payload file against a signature header and print the event
    Verify {
        /// Webhook signing secret
        #[arg(long, env = "HORUSPAY_WEBHOOK_SECRET")]
        secret: String,

        /// Value of the signature header
        #[arg(long)]
        header: String,

        /// Maximum age in seconds; 0 disables the check
        #[arg(long)]
        tolerance: Option<i64>,

        /// Signature scheme
        #[arg(long)]
        scheme: Option<String>,

        /// File containing the raw payload
        payload: PathBuf,
    },

    /// Send a GET request and print the JSON body
    Get {
        /// API path, e.g. /accounts/customers
        path: String,

        /// TOML file with a [horuspay] table (defaults to HORUSPAY_* variables)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Command::Sign {
            secret,
            timestamp,
            scheme,
            payload,
        } => {
            let payload = std::fs::read_to_string(payload)?;
            Ok(horuspay_cli::sign(
                &payload,
                &secret,
                timestamp,
                scheme.as_deref(),
            ))
        }
        Command::Verify {
            secret,
            header,
            tolerance,
            scheme,
            payload,
        } => {
            let payload = std::fs::read_to_string(payload)?;
            let event =
                horuspay_cli::verify(&payload, &header, &secret, tolerance, scheme.as_deref())?;
            Ok(serde_json::to_string_pretty(&event)?)
        }
        Command::Get { path, config } => {
            let config = horuspay_cli::load_config(config.as_deref())?;
            let body = horuspay_cli::get(config, &path).await?;
            Ok(serde_json::to_string_pretty(&body)?)
        }
    }
}
