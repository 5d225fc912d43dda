use chrono::NaiveDate;

use nba_belt_lambda_rust::engine::evaluate;
use nba_belt_lambda_rust::model::game::{GameSummary, TeamScore};
use nba_belt_lambda_rust::model::streak::StreakRecord;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

fn record(holder: &str, team_id: i64, defended: u32, start: &str, processed: &str) -> StreakRecord {
    StreakRecord {
        id: None,
        holder_name: holder.to_string(),
        holder_team_id: team_id,
        games_defended: defended,
        streak_start_date: date(start),
        last_processed_date: date(processed),
    }
}

fn game(d: &str, home: (&str, i64, i64), visitor: (&str, i64, i64)) -> GameSummary {
    GameSummary {
        date: date(d),
        home: TeamScore {
            name: home.0.to_string(),
            id: home.1,
            score: home.2,
        },
        visitor: TeamScore {
            name: visitor.0.to_string(),
            id: visitor.1,
            score: visitor.2,
        },
    }
}

#[test]
fn empty_batch_is_identity() {
    let rec = record("Alpha", 1, 3, "2024-01-01", "2024-01-10");

    let eval = evaluate(&rec, &[]);

    assert_eq!(eval.record, rec);
    assert!(eval.message.is_none());
}

#[test]
fn single_defense_increments_and_names_challenger() {
    // Scenario A: holder wins one game
    let rec = record("Alpha", 1, 3, "2024-01-01", "2024-01-10");
    let batch = vec![game("2024-01-12", ("Alpha", 1, 110), ("Beta", 2, 100))];

    let eval = evaluate(&rec, &batch);

    assert_eq!(eval.record.holder_name, "Alpha");
    assert_eq!(eval.record.holder_team_id, 1);
    assert_eq!(eval.record.games_defended, 4);
    assert_eq!(eval.record.streak_start_date, date("2024-01-01"));
    assert_eq!(eval.record.last_processed_date, date("2024-01-12"));
    let msg = eval.message.expect("expected a retained-belt message");
    assert_eq!(
        msg,
        "The Alpha have beaten the Beta to retain the belt (4 game win streak)."
    );
}

#[test]
fn loss_hands_over_belt() {
    // Scenario B: challenger outscores the holder
    let rec = record("Alpha", 1, 5, "2024-01-01", "2024-01-10");
    let batch = vec![game("2024-01-13", ("Alpha", 1, 90), ("Gamma", 3, 101))];

    let eval = evaluate(&rec, &batch);

    assert_eq!(eval.record.holder_name, "Gamma");
    assert_eq!(eval.record.holder_team_id, 3);
    assert_eq!(eval.record.games_defended, 0);
    assert_eq!(eval.record.streak_start_date, date("2024-01-13"));
    assert_eq!(eval.record.last_processed_date, date("2024-01-13"));
    let msg = eval.message.expect("expected a belt-change message");
    assert_eq!(msg, "The Gamma have taken the belt from the Alpha.");
}

#[test]
fn multi_win_batch_accumulates_and_names_last_challenger() {
    let rec = record("Alpha", 1, 2, "2024-01-01", "2024-01-10");
    let batch = vec![
        game("2024-01-11", ("Alpha", 1, 104), ("Beta", 2, 99)),
        game("2024-01-13", ("Delta", 4, 87), ("Alpha", 1, 95)),
        game("2024-01-15", ("Alpha", 1, 121), ("Epsilon", 5, 117)),
    ];

    let eval = evaluate(&rec, &batch);

    assert_eq!(eval.record.holder_name, "Alpha");
    assert_eq!(eval.record.games_defended, 5);
    assert_eq!(eval.record.last_processed_date, date("2024-01-15"));
    let msg = eval.message.expect("expected a retained-belt message");
    assert!(msg.contains("Epsilon"), "message was: {}", msg);
    assert!(msg.contains("5 game win streak"), "message was: {}", msg);
}

#[test]
fn loss_stops_processing_rest_of_batch() {
    // Scenario D: three wins, then a loss, then a game that must be ignored
    let rec = record("Alpha", 1, 3, "2024-01-01", "2024-01-10");
    let batch = vec![
        game("2024-01-11", ("Alpha", 1, 100), ("Beta", 2, 90)),
        game("2024-01-12", ("Alpha", 1, 100), ("Gamma", 3, 91)),
        game("2024-01-13", ("Delta", 4, 88), ("Alpha", 1, 92)),
        game("2024-01-14", ("Alpha", 1, 96), ("Zeta", 6, 108)),
        game("2024-01-16", ("Alpha", 1, 130), ("Beta", 2, 80)),
    ];

    let eval = evaluate(&rec, &batch);

    // The first loss decides; the win on the 16th is not counted for anyone.
    assert_eq!(eval.record.holder_name, "Zeta");
    assert_eq!(eval.record.holder_team_id, 6);
    assert_eq!(eval.record.games_defended, 0);
    assert_eq!(eval.record.streak_start_date, date("2024-01-14"));
    assert_eq!(eval.record.last_processed_date, date("2024-01-14"));
    let msg = eval.message.expect("expected a belt-change message");
    assert_eq!(msg, "The Zeta have taken the belt from the Alpha.");
}

#[test]
fn holder_as_visitor_is_recognized() {
    let rec = record("Alpha", 1, 0, "2024-01-01", "2024-01-10");
    let batch = vec![game("2024-01-12", ("Beta", 2, 99), ("Alpha", 1, 100))];

    let eval = evaluate(&rec, &batch);

    assert_eq!(eval.record.holder_name, "Alpha");
    assert_eq!(eval.record.games_defended, 1);
}

#[test]
fn tied_score_is_skipped_without_counting() {
    let rec = record("Alpha", 1, 4, "2024-01-01", "2024-01-10");
    let batch = vec![game("2024-01-12", ("Alpha", 1, 100), ("Beta", 2, 100))];

    let eval = evaluate(&rec, &batch);

    // No defense credited, no belt change, but the date is consumed.
    assert_eq!(eval.record.holder_name, "Alpha");
    assert_eq!(eval.record.games_defended, 4);
    assert_eq!(eval.record.last_processed_date, date("2024-01-12"));
    assert!(eval.message.is_none());
}

#[test]
fn tie_then_win_credits_only_the_win() {
    let rec = record("Alpha", 1, 4, "2024-01-01", "2024-01-10");
    let batch = vec![
        game("2024-01-12", ("Alpha", 1, 100), ("Beta", 2, 100)),
        game("2024-01-14", ("Alpha", 1, 112), ("Gamma", 3, 108)),
    ];

    let eval = evaluate(&rec, &batch);

    assert_eq!(eval.record.games_defended, 5);
    assert_eq!(eval.record.last_processed_date, date("2024-01-14"));
    let msg = eval.message.expect("expected a retained-belt message");
    assert!(msg.contains("Gamma"), "message was: {}", msg);
}

#[test]
fn game_without_holder_is_skipped() {
    let rec = record("Alpha", 1, 2, "2024-01-01", "2024-01-10");
    let batch = vec![
        game("2024-01-12", ("Beta", 2, 100), ("Gamma", 3, 90)),
        game("2024-01-13", ("Alpha", 1, 105), ("Beta", 2, 101)),
    ];

    let eval = evaluate(&rec, &batch);

    // The stray game neither defends nor dethrones.
    assert_eq!(eval.record.holder_name, "Alpha");
    assert_eq!(eval.record.games_defended, 3);
    assert_eq!(eval.record.last_processed_date, date("2024-01-13"));
}

#[test]
fn already_processed_batch_yields_no_change_on_rerun() {
    // Idempotence across ticks: once the record reflects a game and the
    // fetch window excludes it, re-evaluating produces the same record.
    let rec = record("Alpha", 1, 3, "2024-01-01", "2024-01-10");
    let batch = vec![game("2024-01-12", ("Alpha", 1, 110), ("Beta", 2, 100))];

    let first = evaluate(&rec, &batch);
    let second = evaluate(&first.record, &[]);

    assert_eq!(second.record, first.record);
    assert!(second.message.is_none());
}
