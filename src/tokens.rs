//! Classifier for the raw `<td>` cell texts of a worldfootball.net
//! schedule table.
//!
//! A round page interleaves team-name cells, score cells and assorted
//! noise (dates, kickoff times, empty cells). The scraper keeps only the
//! cells this classifier recognizes; everything downstream relies on the
//! tagging done here, so the team-vs-score disambiguation rule lives in
//! exactly one place: a cell containing a lowercase letter is a team name
//! *unless* it also matches the decided-score shape ("1:2 dec.").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TableError};

/// Full-time score with halftime in parens and a trailing space: "2:1 (1:0) ".
static REGULAR_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+:\d+ \(\d:\d\) ").expect("valid regular-score regex"));

/// Score settled off the pitch (forfeit, tribunal): "0:3 dec.".
static DECIDED_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d:\d dec\.").expect("valid decided-score regex"));

/// Sentinels the site uses for matches that never produced a score.
const ABANDONED: &str = " abor.";
const NOT_PLAYED: &str = " dnp";

/// How a score cell was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    /// Played to the end, halftime score present.
    Regular,
    /// Awarded result ("dec." suffix).
    Decided,
    /// Abandoned or never played; normalizes to a fixed 0:0.
    Abandoned,
}

/// One recognized table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellToken {
    Score { kind: ScoreKind, raw: String },
    Team(String),
    /// Dates, times, empty padding cells. Dropped by the pairing step.
    Other,
}

/// Tag a raw cell text. Order matters: the decided-score check must win
/// over the team check, since "1:2 dec." contains lowercase letters too.
pub fn classify_cell(text: &str) -> CellToken {
    if REGULAR_SCORE.is_match(text) {
        return CellToken::Score {
            kind: ScoreKind::Regular,
            raw: text.to_string(),
        };
    }
    if DECIDED_SCORE.is_match(text) {
        return CellToken::Score {
            kind: ScoreKind::Decided,
            raw: text.to_string(),
        };
    }
    if text == ABANDONED || text == NOT_PLAYED {
        return CellToken::Score {
            kind: ScoreKind::Abandoned,
            raw: text.to_string(),
        };
    }
    if text.chars().any(|c| c.is_ascii_lowercase()) {
        return CellToken::Team(text.to_string());
    }
    CellToken::Other
}

/// Parse the leading "G1:G2" of a score cell: drop everything from the
/// first space onward, then split once on ':'.
pub fn parse_goals(raw: &str, kind: ScoreKind, season: i32, round: u32) -> Result<(u32, u32)> {
    if kind == ScoreKind::Abandoned {
        return Ok((0, 0));
    }
    let head = raw.split(' ').next().unwrap_or(raw);
    let parse_err = || TableError::Parse {
        season,
        round,
        token: raw.to_string(),
    };
    let (g1, g2) = head.split_once(':').ok_or_else(parse_err)?;
    let goals1 = g1.parse::<u32>().map_err(|_| parse_err())?;
    let goals2 = g2.parse::<u32>().map_err(|_| parse_err())?;
    Ok((goals1, goals2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decided_score_is_not_a_team() {
        assert!(matches!(
            classify_cell("1:2 dec."),
            CellToken::Score {
                kind: ScoreKind::Decided,
                ..
            }
        ));
    }

    #[test]
    fn goals_parse_from_regular_token() {
        assert_eq!(parse_goals("2:1 (1:0) ", ScoreKind::Regular, 2004, 1).unwrap(), (2, 1));
        assert_eq!(parse_goals("10:0 (4:0) ", ScoreKind::Regular, 2004, 1).unwrap(), (10, 0));
    }

    #[test]
    fn kickoff_time_is_noise() {
        assert_eq!(classify_cell("15:00"), CellToken::Other);
    }
}
