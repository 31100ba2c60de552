//! Points deriver: match result → outcome → per-team point rows.

use serde::{Deserialize, Serialize};

use crate::matches::MatchResult;

/// Who took the match, read off the goal difference alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Outcome {
    pub fn of(m: &MatchResult) -> Outcome {
        if m.goals1 > m.goals2 {
            Outcome::HomeWin
        } else if m.goals1 < m.goals2 {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        }
    }

    /// Points for (team1, team2): 3/0 decisive, 1/1 draw.
    pub fn points(self) -> (u32, u32) {
        match self {
            Outcome::HomeWin => (3, 0),
            Outcome::Draw => (1, 1),
            Outcome::AwayWin => (0, 3),
        }
    }
}

/// Points one team earned in one round. Two of these per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRow {
    pub team: String,
    pub season: i32,
    pub round: u32,
    pub points: u32,
}

/// Derive both point rows of a match. Total: any goal pair maps to a
/// valid outcome, so there is no failure path here.
pub fn points_rows(m: &MatchResult) -> [PointsRow; 2] {
    let (p1, p2) = Outcome::of(m).points();
    [
        PointsRow {
            team: m.team1.clone(),
            season: m.season,
            round: m.round,
            points: p1,
        },
        PointsRow {
            team: m.team2.clone(),
            season: m.season,
            round: m.round,
            points: p2,
        },
    ]
}
