use clap::Parser;
use nextword::app::{AppFlags, EditorApp};
use nextword::cli::Cli;
use nextword::logging;
use nextword::predict::{HttpHealthProbe, HttpPredictor};
use nextword::ProgramOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve()?;
    let _guard = logging::init(config.log_file.as_deref(), &cli.log_level)?;

    tracing::info!(
        endpoint = %config.predict.endpoint,
        debounce_ms = config.engine.debounce_delay_ms,
        "starting nextword"
    );

    let predictor = HttpPredictor::new(&config.predict)?;
    let health = HttpHealthProbe::new(&config.predict)?;
    let (columns, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let flags = AppFlags::new(config, predictor, health).with_size(columns, rows);

    let options = ProgramOptions {
        title: Some("nextword".into()),
        ..ProgramOptions::default()
    };
    let app = nextword::run_with::<EditorApp>(flags, options).await?;

    tracing::info!(chars = app.input().value().chars().count(), "exiting");
    Ok(())
}
