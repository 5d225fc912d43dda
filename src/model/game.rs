use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of the balldontlie `/v1/games` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct GamesDocument {
    pub data: Vec<ApiGame>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiGame {
    pub id: i64,
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub period: Option<i64>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub postseason: Option<bool>,
    #[serde(default)]
    pub season: Option<i64>,
    pub home_team: ApiTeam,
    pub visitor_team: ApiTeam,
    pub home_team_score: i64,
    pub visitor_team_score: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTeam {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub next_cursor: Option<i64>,
}

/// Which side of a game a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Visitor,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Visitor,
            Side::Visitor => Side::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub id: i64,
    pub name: String,
    pub score: i64,
}

/// A completed game reduced to what streak evaluation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub date: NaiveDate,
    pub home: TeamScore,
    pub visitor: TeamScore,
}

impl GameSummary {
    pub fn team(&self, side: Side) -> &TeamScore {
        match side {
            Side::Home => &self.home,
            Side::Visitor => &self.visitor,
        }
    }

    /// Which side `team_id` played on, or `None` when the team was not in
    /// this game at all.
    pub fn side_of(&self, team_id: i64) -> Option<Side> {
        if self.home.id == team_id {
            Some(Side::Home)
        } else if self.visitor.id == team_id {
            Some(Side::Visitor)
        } else {
            None
        }
    }
}
