//! Scrapes historical football match results, restructures them into
//! per-team point records, builds season-by-round leaderboards and
//! measures how similar an in-progress leaderboard is to the season's
//! final standings.

pub mod error;
pub mod export;
pub mod leaderboard;
pub mod matches;
pub mod page_cache;
pub mod points;
pub mod results_table;
pub mod schedule_fetch;
pub mod similarity;
pub mod store;
pub mod tokens;
