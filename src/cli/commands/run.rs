use crate::cli::Cli;
use crate::core::{Kitchen, RunReporter, RunSummary};
use crate::engine::PizzeriaEngine;
use crate::services::{
    ConsoleRunReporter, DefaultPizzeriaConfig, NoOpRunReporter, RandomKitchen, ScriptedKitchen,
};
use anyhow::{Context, Result};
use std::time::Duration;

/// Merge the optional config file with command line flags
pub fn build_config(cli: &Cli) -> Result<DefaultPizzeriaConfig> {
    let mut config = match &cli.config {
        Some(path) => DefaultPizzeriaConfig::load(path)?,
        None => DefaultPizzeriaConfig::default(),
    };

    if let Some(orders) = cli.orders {
        config = config.with_production_limit(orders);
    }
    if cli.stop_after.is_some() {
        config = config.with_stop_after(cli.stop_after);
    }
    if let Some(ack_timeout_ms) = cli.ack_timeout_ms {
        config = config.with_ack_timeout(Duration::from_millis(ack_timeout_ms));
    }
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_delay_unit(Duration::from_millis(delay_ms));
    }

    Ok(config)
}

fn build_kitchen(cli: &Cli, config: &DefaultPizzeriaConfig) -> Result<Box<dyn Kitchen>> {
    match &cli.script {
        Some(script) => {
            let kitchen = ScriptedKitchen::parse(script).context("Invalid --script value")?;
            // Scripted runs only wait when a delay is asked for explicitly
            let delay = cli.delay_ms.map(Duration::from_millis).unwrap_or_default();
            Ok(Box::new(kitchen.with_delay(delay)))
        }
        None => Ok(Box::new(RandomKitchen::new(config.delay_unit()))),
    }
}

fn build_reporter(cli: &Cli) -> Box<dyn RunReporter> {
    if cli.quiet || cli.json {
        Box::new(NoOpRunReporter::new())
    } else {
        Box::new(ConsoleRunReporter::new())
    }
}

/// Execute one pizzeria run as described by the command line
pub async fn execute_run(cli: &Cli) -> Result<RunSummary> {
    let config = build_config(cli)?;
    let kitchen = build_kitchen(cli, &config)?;
    let reporter = build_reporter(cli);

    let engine = PizzeriaEngine::new(kitchen, config, reporter);
    let summary = engine.run().await?;

    if cli.json {
        println!("{}", summary.to_json()?);
    }

    Ok(summary)
}
