use clap::Parser;
use fabric_deploy::cli::{run, Cli};
use tracing::Level;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let level = if cli.debug() { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
    tracing::info!("fabric-deploy startup: tracing initialised, environment loaded");

    match run(cli).await {
        Ok(report) if report.is_success() => {
            tracing::info!(
                total = report.total(),
                success = report.success_count(),
                skipped = report.skipped_count(),
                "Deployment successful"
            );
            std::process::exit(0);
        }
        Ok(report) => {
            tracing::error!(
                total = report.total(),
                failed = report.failed_count(),
                "Deployment finished with failures"
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Deployment aborted before processing");
            std::process::exit(2);
        }
    }
}
