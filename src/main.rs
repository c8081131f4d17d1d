use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use auto_fb_poster::cli::Cli;
use auto_fb_poster::config::AppConfig;
use auto_fb_poster::pipeline;

#[tokio::main]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("auto_fb_poster starting up");

    let args = Cli::parse();
    let config = AppConfig::from_cli(args);
    info!(
        sources = config.sources.len(),
        history_file = %config.history_file.display(),
        dashboard_file = %config.dashboard_file.display(),
        model = %config.gemini_model,
        "Configuration loaded"
    );

    let stats = pipeline::run(&config).await;

    let elapsed = start_time.elapsed();
    info!(
        published = stats.published,
        failed = stats.failed,
        skipped = stats.skipped,
        sources_failed = stats.sources_failed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Run complete"
    );
}
