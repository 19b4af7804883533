mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, CliConfig, Command};
use flakeid::IdGenerator;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    telemetry::init_tracing();

    let generator = IdGenerator::from_config(&config.generator);
    log_startup_info(&generator, &config);

    let mut out = std::io::stdout().lock();
    match config.command {
        Command::Generate { count } => commands::generate(&generator, count, &mut out),
        Command::Decode { ids } => commands::decode(&ids, generator.epoch_offset(), &mut out),
    }
}

fn log_startup_info(generator: &IdGenerator, config: &CliConfig) {
    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    }
    tracing::debug!(
        node_id = generator.node_id(),
        epoch_offset = generator.epoch_offset(),
        explicit_node_id = config.generator.node_id.is_some(),
        "generator ready"
    );
}
