use early_table::error::TableError;
use early_table::leaderboard::{Leaderboard, RankRange, FINAL_ROUND};
use early_table::matches::MatchResult;
use early_table::results_table::ResultsTable;
use early_table::similarity::{similarity_rate, sweep_rates, TOLERANCES};

fn m(season: i32, round: u32, team1: &str, team2: &str, goals1: u32, goals2: u32) -> MatchResult {
    MatchResult {
        season,
        round,
        team1: team1.to_string(),
        team2: team2.to_string(),
        goals1,
        goals2,
        fixed: false,
    }
}

/// A four-team season where the round-1 order is the exact opposite of
/// the final order: A and C win their openers, then B and D win every
/// remaining round.
fn flipped_season(season: i32) -> Vec<MatchResult> {
    let mut matches = vec![
        m(season, 1, "A", "B", 1, 0),
        m(season, 1, "C", "D", 2, 0),
    ];
    for round in 2..=FINAL_ROUND {
        matches.push(m(season, round, "B", "A", 1, 0));
        matches.push(m(season, round, "D", "C", 2, 0));
    }
    matches
}

fn table(matches: &[MatchResult]) -> ResultsTable {
    ResultsTable::from_matches("test", matches).expect("non-empty match batch")
}

#[test]
fn a_leaderboard_is_perfectly_similar_to_itself() {
    let t = table(&flipped_season(2004));
    let lb = Leaderboard::build(&t, 2004, 10).expect("board");
    assert_eq!(similarity_rate(&lb, &lb, 0).unwrap(), 1.0);
}

#[test]
fn rates_stay_within_unit_interval() {
    let t = table(&flipped_season(2004));
    let final_board = Leaderboard::final_table(&t, 2004).expect("final board");
    for round in 1..FINAL_ROUND {
        let partial = Leaderboard::build(&t, 2004, round).expect("partial board");
        for tolerance in TOLERANCES {
            let rate = similarity_rate(&partial, &final_board, tolerance).unwrap();
            assert!((0.0..=1.0).contains(&rate), "rate {rate} out of bounds");
        }
    }
}

#[test]
fn rate_is_monotonic_in_tolerance() {
    let t = table(&flipped_season(2004));
    let final_board = Leaderboard::final_table(&t, 2004).expect("final board");
    for round in 1..FINAL_ROUND {
        let partial = Leaderboard::build(&t, 2004, round).expect("partial board");
        let mut last = 0.0;
        for tolerance in 0..=4 {
            let rate = similarity_rate(&partial, &final_board, tolerance).unwrap();
            assert!(
                rate >= last,
                "rate dropped from {last} to {rate} at tolerance {tolerance}"
            );
            last = rate;
        }
    }
}

#[test]
fn fully_flipped_opening_round_scores_zero() {
    // Round 1: A=3 C=3 B=0 D=0 → ranks A1 C1 B3 D3.
    // Final:   B and D win 37 games → ranks B1 D1 A3 C3.
    // Every team moved two places, so tolerance 0 matches nobody and
    // tolerance 2 matches everybody.
    let t = table(&flipped_season(2004));
    let partial = Leaderboard::build(&t, 2004, 1).expect("round-1 board");
    let final_board = Leaderboard::final_table(&t, 2004).expect("final board");

    assert_eq!(similarity_rate(&partial, &final_board, 0).unwrap(), 0.0);
    assert_eq!(similarity_rate(&partial, &final_board, 1).unwrap(), 0.0);
    assert_eq!(similarity_rate(&partial, &final_board, 2).unwrap(), 1.0);
}

#[test]
fn sweep_emits_one_record_per_cell_and_never_round_38() {
    let mut matches = flipped_season(2004);
    matches.extend(flipped_season(2005));
    let t = table(&matches);

    let records = sweep_rates(&t, 2004, 2005, "Serie A").expect("sweep");
    assert_eq!(records.len(), 2 * 37 * TOLERANCES.len());

    assert!(records.iter().all(|r| r.round < FINAL_ROUND));
    assert!(records.iter().all(|r| r.league == "Serie A"));
    assert!(records.iter().all(|r| (0.0..=1.0).contains(&r.rate)));

    // Ordered by (season, round, tolerance) for stable export.
    let keys: Vec<(i32, u32, u32)> = records
        .iter()
        .map(|r| (r.season, r.round, r.tolerance))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    // The last pre-final round of this construction is already the final
    // order, so tolerance 0 scores 1.0 there.
    let last = records
        .iter()
        .find(|r| r.season == 2004 && r.round == 37 && r.tolerance == 0)
        .expect("round 37 record");
    assert_eq!(last.rate, 1.0);
}

#[test]
fn sweep_on_missing_season_fails_loudly() {
    let t = table(&flipped_season(2004));
    let err = sweep_rates(&t, 2004, 2005, "Serie A").unwrap_err();
    assert!(matches!(
        err,
        TableError::EmptyLeaderboard { season: 2005, .. }
    ));
}

#[test]
fn rank_restricted_final_board_propagates_unknown_team() {
    let t = table(&flipped_season(2004));
    let partial = Leaderboard::build(&t, 2004, 1).expect("round-1 board");
    let restricted_final = Leaderboard::build_in_range(
        &t,
        2004,
        FINAL_ROUND,
        RankRange {
            min: None,
            max: Some(1),
        },
    )
    .expect("restricted board");

    let err = similarity_rate(&partial, &restricted_final, 0).unwrap_err();
    assert!(matches!(err, TableError::UnknownTeam { .. }));
}
