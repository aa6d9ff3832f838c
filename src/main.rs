use anyhow::Result;
use clap::Parser;
use pizzeria::{cli::execute_run, cli::Cli, PipelineError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if let Err(error) = execute_run(&cli).await {
        match error.downcast_ref::<PipelineError>() {
            Some(pipeline_error) => eprintln!(
                "❌ Run failed at stage '{}' [{}]: {error:#}",
                pipeline_error.stage(),
                pipeline_error.severity().as_str()
            ),
            None => eprintln!("❌ Error: {error:#}"),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizzeria=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
