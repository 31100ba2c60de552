use thiserror::Error;

/// Failures of the results/leaderboard pipeline.
///
/// Every variant names the season/round/team/token it tripped on: a run
/// covers hundreds of (season, round) pages and an anonymous error would
/// make the batch undiagnosable. Nothing here is retried; retry policy
/// lives with the network fetch, not the core.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unrecognized cell token {token:?} (season {season}, round {round})")]
    Parse {
        season: i32,
        round: u32,
        token: String,
    },

    #[error(
        "team/score cells out of step: {teams} team cells for {scores} score cells \
         (season {season}, round {round})"
    )]
    CellMismatch {
        season: i32,
        round: u32,
        teams: usize,
        scores: usize,
    },

    #[error("no matches to aggregate for league {league:?}")]
    EmptyInput { league: String },

    #[error("no results for season {season} at round {round}")]
    EmptyLeaderboard { season: i32, round: u32 },

    #[error(
        "rank range {min:?}..={max:?} removed every entry (season {season}, round {round})"
    )]
    RankRangeEmpty {
        season: i32,
        round: u32,
        min: Option<u32>,
        max: Option<u32>,
    },

    #[error("team {team:?} not in leaderboard (season {season}, round {round})")]
    UnknownTeam {
        team: String,
        season: i32,
        round: u32,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
