//! Match record normalizer: raw page cells → structured match results.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::tokens::{classify_cell, parse_goals, CellToken, ScoreKind};

/// One finished fixture. Immutable once built; the winner is determined
/// solely by `goals1` vs `goals2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Starting year of the season (2004 = 2004/2005).
    pub season: i32,
    /// Matchday, 1..=38 for a 20-team league.
    pub round: u32,
    pub team1: String,
    pub team2: String,
    pub goals1: u32,
    pub goals2: u32,
    /// True when the site reported the match abandoned or not played and
    /// the score is the 0:0 placeholder rather than a real result.
    pub fixed: bool,
}

/// Build match rows from the cell texts of one round page.
///
/// The page lists each fixture as `... team1, score, team2 ...`, so team
/// cells alternate home/away and there must be exactly two team cells per
/// score cell. Anything else means the page layout changed and the whole
/// round is rejected rather than silently skewing the points table.
pub fn match_rows_from_cells<S: AsRef<str>>(
    cells: &[S],
    season: i32,
    round: u32,
) -> Result<Vec<MatchResult>> {
    let mut teams: Vec<&str> = Vec::new();
    let mut scores: Vec<(ScoreKind, String)> = Vec::new();

    for cell in cells {
        match classify_cell(cell.as_ref()) {
            CellToken::Score { kind, raw } => scores.push((kind, raw)),
            CellToken::Team(_) => teams.push(cell.as_ref()),
            CellToken::Other => {}
        }
    }

    if teams.len() != scores.len() * 2 {
        return Err(TableError::CellMismatch {
            season,
            round,
            teams: teams.len(),
            scores: scores.len(),
        });
    }

    let mut out = Vec::with_capacity(scores.len());
    for (pair, (kind, raw)) in teams.chunks_exact(2).zip(scores) {
        let (goals1, goals2) = parse_goals(&raw, kind, season, round)?;
        out.push(MatchResult {
            season,
            round,
            team1: pair[0].to_string(),
            team2: pair[1].to_string(),
            goals1,
            goals2,
            fixed: kind == ScoreKind::Abandoned,
        });
    }
    Ok(out)
}
