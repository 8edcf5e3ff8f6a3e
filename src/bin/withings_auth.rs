// ABOUTME: Command-line helper for obtaining and refreshing Withings OAuth tokens
// ABOUTME: Prints authorization URLs, exchanges codes, and rotates refresh tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use withings_client::config::ClientConfig;
use withings_client::logging::LoggingConfig;
use withings_client::oauth2_client::Token;
use withings_client::WithingsClient;

#[derive(Parser)]
#[command(name = "withings-auth")]
#[command(about = "Obtain and refresh Withings OAuth2 tokens")]
#[command(
    long_about = "Reads WITHINGS_CLIENT_ID, WITHINGS_CLIENT_SECRET and WITHINGS_REDIRECT_URI \
                  from the environment. Tokens are printed to stdout as JSON; logs go to stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an authorization URL and the state to expect on the callback
    Url,

    /// Exchange the code from the callback for a token
    Exchange {
        /// Authorization code from the callback
        #[arg(long)]
        code: String,
    },

    /// Exchange a stored refresh token for a fresh token
    Refresh {
        /// Refresh token from a previous exchange
        #[arg(long, env = "WITHINGS_REFRESH_TOKEN")]
        refresh_token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env()
        .init()
        .context("Failed to initialize logging")?;

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Failed to load Withings configuration")?;
    let client = WithingsClient::new(config).context("Failed to create Withings client")?;

    match cli.command {
        Commands::Url => {
            let request = client.authorization_url()?;
            println!("Open this URL to authorize access:\n\n  {}\n", request.url);
            println!("Expected state: {}", request.state);
        }
        Commands::Exchange { code } => {
            let token = client
                .exchange_code(&code)
                .await
                .context("Authorization code exchange failed")?;
            print_token(&token)?;
        }
        Commands::Refresh { refresh_token } => {
            let session = client.session_from_refresh_token(refresh_token);
            let token = session
                .force_refresh()
                .await
                .context("Token refresh failed")?;
            info!("Refresh token rotated; store the new value");
            print_token(&token)?;
        }
    }

    Ok(())
}

fn print_token(token: &Token) -> Result<()> {
    let json = serde_json::to_string_pretty(token).context("Failed to serialize token")?;
    println!("{json}");
    Ok(())
}
