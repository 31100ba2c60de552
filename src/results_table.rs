//! The per-team points table every later stage reads from.

use crate::error::{Result, TableError};
use crate::matches::MatchResult;
use crate::points::{points_rows, PointsRow};

/// All point rows of one league across every processed season and round.
///
/// Built once per league per run and never mutated afterwards; leaderboards
/// and similarity records are computed as read-only views over it. No
/// deduplication happens here — feeding the same match twice counts it
/// twice, so the fetch layer must not produce duplicates.
#[derive(Debug, Clone)]
pub struct ResultsTable {
    rows: Vec<PointsRow>,
}

impl ResultsTable {
    /// Derive the table from a batch of normalized matches.
    pub fn from_matches(league: &str, matches: &[MatchResult]) -> Result<ResultsTable> {
        if matches.is_empty() {
            return Err(TableError::EmptyInput {
                league: league.to_string(),
            });
        }
        let mut rows = Vec::with_capacity(matches.len() * 2);
        for m in matches {
            rows.extend(points_rows(m));
        }
        Ok(ResultsTable { rows })
    }

    pub fn rows(&self) -> &[PointsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct seasons present, ascending.
    pub fn seasons(&self) -> Vec<i32> {
        let mut seasons: Vec<i32> = self.rows.iter().map(|r| r.season).collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }
}
