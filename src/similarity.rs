//! How close an in-progress table is to the season's final standings.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::leaderboard::{Leaderboard, FINAL_ROUND};
use crate::results_table::ResultsTable;

/// Tolerance levels the sweep evaluates at each round.
pub const TOLERANCES: [u32; 3] = [0, 1, 2];

/// Similarity of one (season, round, tolerance) cell of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub league: String,
    pub season: i32,
    pub round: u32,
    pub tolerance: u32,
    pub rate: f64,
}

/// Fraction of `partial`'s teams whose rank moved by at most `tolerance`
/// places between the two boards.
///
/// Both boards must cover the same teams; build them without a rank range
/// (or handle the `UnknownTeam` this propagates when a team of `partial`
/// is missing from `final_board`).
pub fn similarity_rate(
    partial: &Leaderboard,
    final_board: &Leaderboard,
    tolerance: u32,
) -> Result<f64> {
    let mut stable = 0usize;
    for team in partial.teams() {
        let rank_partial = partial.rank_of(team)?;
        let rank_final = final_board.rank_of(team)?;
        if rank_partial.abs_diff(rank_final) <= tolerance {
            stable += 1;
        }
    }
    Ok(stable as f64 / partial.len() as f64)
}

/// Sweep similarity rates for every season in `[start_season, end_season]`,
/// every round 1..=37 and tolerances 0..=2.
///
/// Round 38 is never compared against itself (trivially 1.0). Each cell
/// builds a fresh partial leaderboard; the final board is built once per
/// season. Seasons only read the shared table, so they fan out in
/// parallel; records come back ordered by (season, round, tolerance).
pub fn sweep_rates(
    table: &ResultsTable,
    start_season: i32,
    end_season: i32,
    league_label: &str,
) -> Result<Vec<SimilarityRecord>> {
    let per_season: Vec<Vec<SimilarityRecord>> = (start_season..=end_season)
        .into_par_iter()
        .map(|season| sweep_season(table, season, league_label))
        .collect::<Result<_>>()?;

    Ok(per_season.into_iter().flatten().collect())
}

fn sweep_season(
    table: &ResultsTable,
    season: i32,
    league_label: &str,
) -> Result<Vec<SimilarityRecord>> {
    let final_board = Leaderboard::final_table(table, season)?;
    let mut records = Vec::with_capacity((FINAL_ROUND as usize - 1) * TOLERANCES.len());

    for round in 1..FINAL_ROUND {
        let partial = Leaderboard::build(table, season, round)?;
        for tolerance in TOLERANCES {
            let rate = similarity_rate(&partial, &final_board, tolerance)?;
            records.push(SimilarityRecord {
                league: league_label.to_string(),
                season,
                round,
                tolerance,
                rate,
            });
        }
    }
    Ok(records)
}
