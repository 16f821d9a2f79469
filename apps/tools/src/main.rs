use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use email_delivery::{EmailDelivery, EmailJsClient};
use shared::domain::ContactDraft;
use tracing::info;

mod config;
mod replay;
mod script;

use replay::SimulatedDelivery;
use script::Script;

#[derive(Parser, Debug)]
#[command(about = "Offline tooling for the portfolio page script")]
struct Cli {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeliveryMode {
    Accept,
    Reject,
    Emailjs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays an interaction script against the in-memory page and prints
    /// the resulting state as JSON.
    Replay {
        script: PathBuf,
        #[arg(long, value_enum, default_value_t = DeliveryMode::Accept)]
        delivery: DeliveryMode,
    },
    /// Validates a contact message and sends it through EmailJS.
    SendTest {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Prints the effective settings.
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = config::load_settings(&cli.config)?;

    match cli.command {
        Command::Replay { script, delivery } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            let script = Script::from_toml_str(&raw)?;
            let delivery: Box<dyn EmailDelivery> = match delivery {
                DeliveryMode::Accept => Box::new(SimulatedDelivery::accepting()),
                DeliveryMode::Reject => Box::new(SimulatedDelivery::rejecting()),
                DeliveryMode::Emailjs => Box::new(EmailJsClient::new(settings.email.clone())?),
            };
            let snapshot = replay::replay(settings, &script, delivery.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::SendTest {
            name,
            email,
            message,
        } => {
            let message = view_core::contact::validate(&ContactDraft {
                name,
                email,
                message,
            })
            .context("contact message rejected")?;
            let client = EmailJsClient::new(settings.email)?;
            client.send(&message).await?;
            info!(endpoint = %client.endpoint(), "test message accepted");
            println!("sent test message from {}", message.email);
        }
        Command::ShowConfig => {
            println!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
