use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use early_table::leaderboard::{Leaderboard, FINAL_ROUND};
use early_table::matches::{match_rows_from_cells, MatchResult};
use early_table::results_table::ResultsTable;
use early_table::similarity::sweep_rates;

/// 20 teams, 38 rounds, 10 matches per round per season.
fn synthetic_seasons(start: i32, end: i32) -> Vec<MatchResult> {
    let mut matches = Vec::new();
    for season in start..=end {
        for round in 1..=FINAL_ROUND {
            for pair in 0..10u32 {
                let home = (pair + round) % 20;
                let away = (pair + round + 10) % 20;
                matches.push(MatchResult {
                    season,
                    round,
                    team1: format!("Team {home:02}"),
                    team2: format!("Team {away:02}"),
                    goals1: (round + pair) % 4,
                    goals2: (round + pair * 3) % 3,
                    fixed: false,
                });
            }
        }
    }
    matches
}

fn bench_leaderboard_build(c: &mut Criterion) {
    let matches = synthetic_seasons(2004, 2004);
    let table = ResultsTable::from_matches("bench", &matches).unwrap();

    c.bench_function("leaderboard_build", |b| {
        b.iter(|| {
            let lb = Leaderboard::build(black_box(&table), 2004, 19).unwrap();
            black_box(lb.len());
        })
    });
}

fn bench_season_sweep(c: &mut Criterion) {
    let matches = synthetic_seasons(2004, 2006);
    let table = ResultsTable::from_matches("bench", &matches).unwrap();

    c.bench_function("season_sweep", |b| {
        b.iter(|| {
            let records = sweep_rates(black_box(&table), 2004, 2006, "bench").unwrap();
            black_box(records.len());
        })
    });
}

fn bench_round_page_normalize(c: &mut Criterion) {
    let mut cells: Vec<String> = Vec::new();
    for pair in 0..10u32 {
        cells.push("14/09/2004".to_string());
        cells.push("15:00".to_string());
        cells.push(format!("Home Team {pair:02}"));
        cells.push("-".to_string());
        cells.push(format!("Away Team {pair:02}"));
        cells.push(format!("{}:{} (1:0) ", pair % 4, pair % 3));
    }

    c.bench_function("round_page_normalize", |b| {
        b.iter(|| {
            let rows = match_rows_from_cells(black_box(&cells), 2004, 1).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_leaderboard_build,
    bench_season_sweep,
    bench_round_page_normalize
);
criterion_main!(perf);
