use clap::Parser;
use kana_audio_gen::controllers::batch::{write_report, BatchController};
use kana_audio_gen::domain::synthesis::BatchRunner;
use kana_audio_gen::error::{AppError, AppResult};
use kana_audio_gen::infrastructure::cli::{render_set_list, Cli};
use kana_audio_gen::infrastructure::config::{Config, LogFormat};
use kana_audio_gen::infrastructure::repositories::{AudioFileRepository, GoogleTtsRepository};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when at least one item could not be generated
const EXIT_PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        println!("{}", render_set_list());
        return ExitCode::SUCCESS;
    }

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    cli.apply_to(&mut config);

    // Initialize logging
    init_logging(&config);

    match run(&cli, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_PARTIAL_FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Generation aborted");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Returns whether every item of every selected set was generated
async fn run(cli: &Cli, config: &Config) -> AppResult<bool> {
    let batch_config = config.batch_config()?;
    let sets = cli.selected_sets()?;

    tracing::info!(
        sets = sets.len(),
        output_root = %config.output_root.display(),
        provider = %config.tts_base_url,
        max_attempts = batch_config.retry.max_attempts(),
        "Starting kana-audio-gen"
    );

    let tts_repo = GoogleTtsRepository::new(&config.tts_base_url, config.tts_request_timeout)
        .map_err(|e| AppError::Configuration(format!("HTTP client: {e}")))?;
    let runner = Arc::new(BatchRunner::new(
        Arc::new(tts_repo),
        Arc::new(AudioFileRepository::new()),
    ));
    let controller = BatchController::new(runner, config.output_root.clone(), batch_config);

    let generation = controller.generate(&sets).await;

    // The report covers the sets finished before an abort too
    let report_written = match &cli.report {
        Some(path) => write_report(path, &generation.reports),
        None => Ok(()),
    };
    if let Some(e) = generation.aborted {
        return Err(e);
    }
    report_written?;

    Ok(generation.reports.iter().all(|r| r.is_complete()))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kana_audio_gen=info".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
