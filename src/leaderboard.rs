//! Cumulative standings for one season at a cutoff round.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::results_table::ResultsTable;

/// Last matchday of a 20-team league season.
pub const FINAL_ROUND: u32 = 38;

/// Inclusive rank window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl RankRange {
    pub const ALL: RankRange = RankRange {
        min: None,
        max: None,
    };

    fn contains(&self, rank: u32) -> bool {
        self.min.is_none_or(|min| rank >= min) && self.max.is_none_or(|max| rank <= max)
    }
}

/// One ranked team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team: String,
    pub points: u32,
    pub rank: u32,
}

/// Standings of one season aggregated up to and including a cutoff round.
///
/// Ranks follow the dense-minimum convention: a team's rank is one more
/// than the number of teams with strictly more points, so tied teams share
/// the lower rank and the next distinct total jumps past the tie group
/// (10, 10, 7 ranks as 1, 1, 3). Immutable once built; request a new one
/// for a different (season, round) pair.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    season: i32,
    round: u32,
    entries: Vec<Standing>,
    rank_by_team: HashMap<String, u32>,
}

impl Leaderboard {
    /// Standings at `round` (inclusive) with no rank restriction.
    pub fn build(table: &ResultsTable, season: i32, round: u32) -> Result<Leaderboard> {
        Leaderboard::build_in_range(table, season, round, RankRange::ALL)
    }

    /// The season's final table.
    pub fn final_table(table: &ResultsTable, season: i32) -> Result<Leaderboard> {
        Leaderboard::build(table, season, FINAL_ROUND)
    }

    /// Standings at `round`, keeping only ranks inside `range`.
    ///
    /// The range is applied strictly after ranking: a top-4 window of a
    /// 20-team season still ranks against all 20 teams. Errors tell apart a
    /// season with no rows at all (`EmptyLeaderboard`) from a range that
    /// filtered every entry out (`RankRangeEmpty`).
    pub fn build_in_range(
        table: &ResultsTable,
        season: i32,
        round: u32,
        range: RankRange,
    ) -> Result<Leaderboard> {
        let mut totals: HashMap<&str, u32> = HashMap::new();
        for row in table.rows() {
            if row.season == season && row.round <= round {
                *totals.entry(row.team.as_str()).or_insert(0) += row.points;
            }
        }
        if totals.is_empty() {
            return Err(TableError::EmptyLeaderboard { season, round });
        }

        let mut entries: Vec<Standing> = totals
            .iter()
            .map(|(team, points)| {
                let rank = 1 + totals.values().filter(|p| **p > *points).count() as u32;
                Standing {
                    team: team.to_string(),
                    points: *points,
                    rank,
                }
            })
            .filter(|s| range.contains(s.rank))
            .collect();

        if entries.is_empty() {
            return Err(TableError::RankRangeEmpty {
                season,
                round,
                min: range.min,
                max: range.max,
            });
        }

        // Rank ascending for stable downstream iteration; team name breaks
        // ties so equal input in any row order builds an identical board.
        entries.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.team.cmp(&b.team)));

        let rank_by_team = entries
            .iter()
            .map(|s| (s.team.clone(), s.rank))
            .collect();

        Ok(Leaderboard {
            season,
            round,
            entries,
            rank_by_team,
        })
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn entries(&self) -> &[Standing] {
        &self.entries
    }

    /// Team names in rank order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.team.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank of `team` within this board. Absent teams are an error: the
    /// team may have been cut by a rank range, or simply never played by
    /// the cutoff round.
    pub fn rank_of(&self, team: &str) -> Result<u32> {
        self.rank_by_team
            .get(team)
            .copied()
            .ok_or_else(|| TableError::UnknownTeam {
                team: team.to_string(),
                season: self.season,
                round: self.round,
            })
    }
}
