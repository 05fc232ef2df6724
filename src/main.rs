use anyhow::Result;
use daily_activity::app::{self, DayOutcome};
use daily_activity::config::Config;
use daily_activity::host::StandaloneHost;
use daily_activity::terminal::{stdin_answers, TerminalRenderer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout only carries the activity itself
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("daily_activity=info".parse()?),
        )
        .init();

    info!("Starting daily activity");

    let config = Config::from_env()?;
    let schedule = config.load_schedule()?;
    let date = config.activity_date_or_today();

    let mut host = StandaloneHost::default();
    let renderer = TerminalRenderer::new(std::io::stdout(), config.render_html);

    let outcome = app::run_day(
        &config,
        &schedule,
        date,
        &mut host,
        renderer,
        stdin_answers(),
        rand::rng(),
    )
    .await;

    match outcome {
        DayOutcome::RestDay => info!("Rest day"),
        DayOutcome::Finished(completion) => info!(
            "Finished {} activities, total score {}",
            completion.reports.len(),
            completion.total_score()
        ),
    }

    Ok(())
}
