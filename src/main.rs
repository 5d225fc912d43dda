use lambda_runtime::{Error, service_fn};

use nba_belt_lambda_rust::config::Config;
use nba_belt_lambda_rust::handler::handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    // Required configuration is checked once, before any tick runs.
    let config = Config::from_env()?;

    lambda_runtime::run(service_fn(move |event| {
        let config = config.clone();
        async move { handler(config, event).await }
    }))
    .await
}
