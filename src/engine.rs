use tracing::warn;

use crate::model::game::{GameSummary, TeamScore};
use crate::model::streak::StreakRecord;

/// Result of evaluating one batch of games against the stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub record: StreakRecord,
    pub message: Option<String>,
}

/// Walk a chronologically ordered batch of final games and decide what
/// happened to the belt.
///
/// The caller guarantees the batch only contains final games involving the
/// holder, none dated on or before `record.last_processed_date`. Under those
/// preconditions this function never fails: an empty batch is the identity,
/// the first loss hands the belt to the challenger and stops the walk, and
/// anything anomalous (tied score, a game the holder isn't in) is skipped
/// with a warning.
pub fn evaluate(record: &StreakRecord, games: &[GameSummary]) -> Evaluation {
    let mut defended: u32 = 0;
    let mut last_beaten: Option<&TeamScore> = None;
    let mut walked_through = None;

    for game in games {
        let holder_side = match game.side_of(record.holder_team_id) {
            Some(side) => side,
            None => {
                warn!(
                    date = %game.date,
                    home = %game.home.name,
                    visitor = %game.visitor.name,
                    "Game does not involve the belt holder; skipping"
                );
                walked_through = Some(game.date);
                continue;
            }
        };
        let defender = game.team(holder_side);
        let challenger = game.team(holder_side.opposite());

        if challenger.score > defender.score {
            // The belt changes hands. Games after this one belong to the new
            // holder's context and surface in a later run keyed off their id.
            let message = belt_taken_message(&challenger.name, &record.holder_name);
            let next = record.with_new_holder(&challenger.name, challenger.id, game.date);
            return Evaluation {
                record: next,
                message: Some(message),
            };
        }

        if challenger.score == defender.score {
            warn!(
                date = %game.date,
                score = defender.score,
                "Tied final score; skipping game"
            );
            walked_through = Some(game.date);
            continue;
        }

        defended += 1;
        last_beaten = Some(challenger);
        walked_through = Some(game.date);
    }

    let Some(through) = walked_through else {
        // Nothing to evaluate.
        return Evaluation {
            record: record.clone(),
            message: None,
        };
    };

    if defended == 0 {
        // Every game in the batch was anomalous; consume the dates so the
        // fetch window moves on, but say nothing.
        return Evaluation {
            record: record.with_processed_through(through),
            message: None,
        };
    }

    let next = record.with_defenses(defended, through);
    let message = last_beaten
        .map(|challenger| belt_retained_message(&next.holder_name, &challenger.name, next.games_defended));
    Evaluation {
        record: next,
        message,
    }
}

fn belt_taken_message(new_holder: &str, dethroned: &str) -> String {
    format!("The {} have taken the belt from the {}.", new_holder, dethroned)
}

fn belt_retained_message(holder: &str, challenger: &str, total_defended: u32) -> String {
    format!(
        "The {} have beaten the {} to retain the belt ({} game win streak).",
        holder, challenger, total_defended
    )
}
