use chrono::NaiveDate;
use tracing::{error, info_span, instrument, warn};

use crate::error::Error;
use crate::model::game::{GameSummary, GamesDocument, TeamScore};
use crate::model::streak::StreakRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.balldontlie.io/v1";

/// Upper bound on how many games one invocation is prepared to walk; the
/// longest plausible streak the domain can produce.
pub const MAX_BATCH_GAMES: u32 = 50;

const FINAL_STATUS: &str = "Final";

/// How far back one tick looks for unprocessed games. The engine is
/// agnostic to the choice; it only affects how large a batch a single
/// invocation must walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchWindow {
    /// Exactly today.
    Today,
    /// From the day after `last_processed_date` through today.
    CatchUp,
    /// From `streak_start_date` through today, capped at `MAX_BATCH_GAMES`.
    FromStreakStart,
}

impl FetchWindow {
    pub fn parse(raw: &str) -> Option<FetchWindow> {
        match raw {
            "today" => Some(FetchWindow::Today),
            "catch-up" => Some(FetchWindow::CatchUp),
            "from-streak-start" => Some(FetchWindow::FromStreakStart),
            _ => None,
        }
    }

    /// Concrete date range for this strategy, or `None` when the record is
    /// already caught up and there is nothing to fetch.
    pub fn date_range(self, record: &StreakRecord, today: NaiveDate) -> Option<DateWindow> {
        if record.last_processed_date >= today {
            return None;
        }
        match self {
            FetchWindow::Today => Some(DateWindow {
                start: today,
                end: today,
                per_page: 10,
            }),
            FetchWindow::CatchUp => {
                let start = record.last_processed_date.succ_opt()?;
                Some(DateWindow {
                    start,
                    end: today,
                    per_page: 25,
                })
            }
            FetchWindow::FromStreakStart => Some(DateWindow {
                start: record.streak_start_date,
                end: today,
                per_page: MAX_BATCH_GAMES,
            }),
        }
    }
}

/// Inclusive date range and page size for one `/games` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub per_page: u32,
}

/// Client for the balldontlie NBA results API.
#[derive(Debug, Clone)]
pub struct BallDontLie {
    api_key: String,
    base_url: String,
}

impl BallDontLie {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url }
    }

    /// Fetch one page of games for a team over a date window.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_games(&self, team_id: i64, window: DateWindow) -> Result<GamesDocument, Error> {
        // team_ids[] percent-encoded; the API expects the bracket form.
        let url = format!(
            "{}/games?start_date={}&end_date={}&per_page={}&team_ids%5B%5D={}",
            self.base_url, window.start, window.end, window.per_page, team_id
        );
        let response_result = {
            let _span = info_span!("balldontlie_fetch", url = %url).entered();
            ureq::get(&url)
                .header("Authorization", self.api_key.as_str())
                .call()
        };
        match response_result {
            Ok(response) => {
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => Self::deserialize_games_document(&body).map_err(|e| {
                        error!(error = %e, "Failed to deserialize games response");
                        Error::Source(format!("failed to deserialize games response: {}", e))
                    }),
                    Err(e) => {
                        error!(error = %e, "Failed to read games response body");
                        Err(Error::Source(format!("failed to read response body: {}", e)))
                    }
                }
            }
            Err(e) => {
                error!(error = %e, url = %url, "Games request failed");
                Err(Error::Source(format!("request failed: {}", e)))
            }
        }
    }

    /// Parse a raw `/games` response body (no network).
    pub fn games_from_json(body: &str) -> Result<GamesDocument, Error> {
        Self::deserialize_games_document(body)
            .map_err(|e| Error::Source(format!("failed to deserialize games response: {}", e)))
    }

    #[instrument(level = "info", skip(body), fields(bytes = body.len()))]
    fn deserialize_games_document(body: &str) -> Result<GamesDocument, serde_json::Error> {
        serde_json::from_str::<GamesDocument>(body)
    }
}

/// Reduce a fetched document to the batch the engine is contracted to
/// receive: final games involving `team_id`, dated strictly after
/// `last_processed`, ascending. Anything malformed is dropped here, with a
/// warning, so the engine never sees it.
pub fn eligible_games(
    document: GamesDocument,
    team_id: i64,
    last_processed: NaiveDate,
) -> Vec<GameSummary> {
    let mut games: Vec<GameSummary> = Vec::new();
    for game in document.data.into_iter() {
        if game.status != FINAL_STATUS {
            continue;
        }
        if game.home_team.id != team_id && game.visitor_team.id != team_id {
            warn!(game_id = game.id, "Game does not involve the tracked team; dropping");
            continue;
        }
        if game.home_team_score < 0 || game.visitor_team_score < 0 {
            warn!(game_id = game.id, "Negative score in final game; dropping");
            continue;
        }
        let Some(date) = parse_game_date(&game.date) else {
            warn!(game_id = game.id, date = %game.date, "Unparseable game date; dropping");
            continue;
        };
        if date <= last_processed {
            continue;
        }
        games.push(GameSummary {
            date,
            home: TeamScore {
                id: game.home_team.id,
                name: game.home_team.full_name,
                score: game.home_team_score,
            },
            visitor: TeamScore {
                id: game.visitor_team.id,
                name: game.visitor_team.full_name,
                score: game.visitor_team_score,
            },
        });
    }
    games.sort_by_key(|g| g.date);
    games
}

// The API has shipped both plain dates and RFC 3339 timestamps over time.
fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.date_naive())
                .ok()
        })
}
