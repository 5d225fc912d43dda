use nba_belt_lambda_rust::handler::{Mode, Request, Response};

#[test]
fn serde_mode_lowercase() {
    let m: Mode = serde_json::from_str("\"test\"").unwrap();
    matches!(m, Mode::Test);
    let m2: Mode = serde_json::from_str("\"production\"").unwrap();
    matches!(m2, Mode::Production);
}

#[test]
fn request_deserializes_from_schedule_payload() {
    let json = serde_json::json!({ "mode": "production" });
    let req: Request = serde_json::from_value(json).unwrap();
    matches!(req.mode, Mode::Production);
}

#[test]
fn response_serializes_message() {
    let resp = Response {
        message: "The Boston Celtics have taken the belt from the Denver Nuggets.".to_string(),
    };
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(
        json["message"],
        "The Boston Celtics have taken the belt from the Denver Nuggets."
    );
}
