use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use lambda_runtime::LambdaEvent;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::balldontlie::{BallDontLie, eligible_games};
use crate::bluesky::Bluesky;
use crate::config::Config;
use crate::engine;
use crate::error::Error;
use crate::store::StreakStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[instrument(skip(config, event))]
pub async fn handler(
    config: Config,
    event: LambdaEvent<Request>,
) -> Result<Response, lambda_runtime::Error> {
    let payload = event.payload; // Derived from the Lambda event
    let response = tick(&config, payload.mode, Utc::now()).await?;
    Ok(response)
}

/// One scheduled tick: read the record, fetch the window of new results,
/// evaluate, persist when something changed, then publish best-effort.
/// Every fallible step before the publish short-circuits the tick, leaving
/// the stored record untouched for the next firing to retry against.
pub async fn tick(config: &Config, mode: Mode, now: DateTime<Utc>) -> Result<Response, Error> {
    let store = StreakStore::connect(&config.mongodb_uri).await?;
    let record = store.read().await?.ok_or(Error::MissingRecord)?;
    info!(
        holder = %record.holder_name,
        games_defended = record.games_defended,
        last_processed = %record.last_processed_date,
        "Loaded streak record"
    );

    // NBA schedule dates are US Eastern calendar dates.
    let today = now.with_timezone(&New_York).date_naive();
    let Some(window) = config.fetch_window.date_range(&record, today) else {
        let message = format!(
            "Already caught up through {}; no games to evaluate for the {}.",
            record.last_processed_date, record.holder_name
        );
        info!("{}", message);
        return Ok(Response { message });
    };

    // Clone because spawn_blocking's 'move' closure requires 'static owned
    // data; the blocking task must own its inputs.
    let api_key = config.bdl_api_key.clone();
    let team_id = record.holder_team_id;
    let last_processed = record.last_processed_date;
    let games = tokio::task::spawn_blocking(move || {
        let source = BallDontLie::new(api_key);
        source
            .fetch_games(team_id, window)
            .map(|document| eligible_games(document, team_id, last_processed))
    })
    .await
    .map_err(|e| Error::Source(format!("fetch task failed: {}", e)))??;

    info!(
        batch = games.len(),
        window_start = %window.start,
        window_end = %window.end,
        "Fetched eligible games"
    );

    let evaluation = engine::evaluate(&record, &games);

    // Persist before publishing; a failed write must never produce a post.
    if evaluation.record != record {
        store.replace(&evaluation.record).await?;
    }

    match evaluation.message {
        Some(message) => {
            if config.post_to_bluesky && matches!(mode, Mode::Production) {
                // Same 'static ownership rule for the posting task.
                let bluesky =
                    Bluesky::new(config.bluesky_username.clone(), config.bluesky_password.clone());
                let text = message.clone();
                match tokio::task::spawn_blocking(move || bluesky.post(&text, now)).await {
                    Ok(Ok(())) => info!(message = %message, "Posted belt update to Bluesky"),
                    Ok(Err(e)) => {
                        // Best-effort delivery: the record is already
                        // persisted and must not be rolled back.
                        error!(error = %Error::Publish(e), "Failed to post belt update")
                    }
                    Err(e) => error!(error = %e, "Posting task failed"),
                }
            } else {
                info!(message = %message, "Belt update (publishing disabled)");
            }
            Ok(Response { message })
        }
        None => {
            let message = format!("No completed {} games to evaluate.", record.holder_name);
            info!("{}", message);
            Ok(Response { message })
        }
    }
}
