mod cli;
mod config;
mod error;
mod gemini;
mod generator;
mod logging;
mod strategy;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::CoachConfig;
use gemini::GeminiClient;
use generator::StrategyGenerator;
use strategy::{ContentStrategy, Session};
use ui::Wizard;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = CoachConfig::load().context("failed to load configuration")?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }

    match cli.subcommand() {
        Command::Start { topic, output } => {
            let client =
                GeminiClient::with_base_url(config.api_key.clone(), config.base_url.clone())
                    .context("failed to build HTTP client")?;
            let generator = StrategyGenerator::new(client, config.model.clone());
            let session = Session::new(generator, config.error_dismiss_after());
            let export_path = output.unwrap_or(config.export_path);
            Wizard::new(session, export_path).run(topic).await?;
        }
        Command::Summary { file } => {
            let strategy = ContentStrategy::read_json(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            println!("{}", strategy.summary_text());
        }
    }

    Ok(())
}
