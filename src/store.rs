//! Sqlite persistence for scraped matches and computed similarity rates.
//!
//! Scraping 17 seasons of 3 leagues is slow and impolite to repeat, so
//! the ingest binary lands every match here and analysis runs load from
//! the store instead of the network when it already covers the requested
//! range.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::matches::MatchResult;
use crate::schedule_fetch::League;
use crate::similarity::SimilarityRecord;

pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join("early_table").join("matches.sqlite"));
        }
    }
    let home = std::env::var("HOME").ok()?;
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("early_table")
            .join("matches.sqlite"),
    )
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS matches (
            league TEXT NOT NULL,
            season INTEGER NOT NULL,
            round INTEGER NOT NULL,
            team1 TEXT NOT NULL,
            team2 TEXT NOT NULL,
            goals1 INTEGER NOT NULL,
            goals2 INTEGER NOT NULL,
            fixed INTEGER NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (league, season, round, team1, team2)
        );
        CREATE INDEX IF NOT EXISTS idx_matches_league_season ON matches(league, season);

        CREATE TABLE IF NOT EXISTS rates (
            league TEXT NOT NULL,
            season INTEGER NOT NULL,
            round INTEGER NOT NULL,
            tolerance INTEGER NOT NULL,
            rate REAL NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (league, season, round, tolerance)
        );

        CREATE TABLE IF NOT EXISTS ingest_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NULL,
            league TEXT NOT NULL,
            start_season INTEGER NOT NULL,
            end_season INTEGER NOT NULL,
            matches_upserted INTEGER NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Upsert a batch of matches for one league inside a single transaction
/// and record the ingest run. Returns the number of rows written.
pub fn save_matches(
    conn: &mut Connection,
    league: League,
    start_season: i32,
    end_season: i32,
    matches: &[MatchResult],
) -> Result<usize> {
    let started_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO ingest_runs(started_at, finished_at, league, start_season, end_season, matches_upserted)
         VALUES (?1, NULL, ?2, ?3, ?4, 0)",
        params![started_at, league.label(), start_season, end_season],
    )
    .context("insert ingest run")?;
    let run_id = conn.last_insert_rowid();

    let tx = conn.transaction().context("begin match upsert")?;
    for m in matches {
        tx.execute(
            r#"
            INSERT INTO matches (league, season, round, team1, team2, goals1, goals2, fixed, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(league, season, round, team1, team2) DO UPDATE SET
                goals1 = excluded.goals1,
                goals2 = excluded.goals2,
                fixed = excluded.fixed,
                updated_at = excluded.updated_at
            "#,
            params![
                league.label(),
                m.season,
                m.round,
                m.team1,
                m.team2,
                m.goals1,
                m.goals2,
                m.fixed as i64,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("upsert match")?;
    }
    tx.commit().context("commit match upsert")?;

    conn.execute(
        "UPDATE ingest_runs SET finished_at = ?1, matches_upserted = ?2 WHERE run_id = ?3",
        params![Utc::now().to_rfc3339(), matches.len() as i64, run_id],
    )
    .context("update ingest run")?;
    Ok(matches.len())
}

/// Load a league's matches in [start_season, end_season], ordered by
/// (season, round).
pub fn load_matches(
    conn: &Connection,
    league: League,
    start_season: i32,
    end_season: i32,
) -> Result<Vec<MatchResult>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT season, round, team1, team2, goals1, goals2, fixed
            FROM matches
            WHERE league = ?1 AND season >= ?2 AND season <= ?3
            ORDER BY season ASC, round ASC, team1 ASC
            "#,
        )
        .context("prepare load matches query")?;

    let rows = stmt
        .query_map(params![league.label(), start_season, end_season], |row| {
            Ok(MatchResult {
                season: row.get(0)?,
                round: row.get(1)?,
                team1: row.get(2)?,
                team2: row.get(3)?,
                goals1: row.get(4)?,
                goals2: row.get(5)?,
                fixed: row.get::<_, i64>(6)? != 0,
            })
        })
        .context("query load matches")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode match row")?);
    }
    Ok(out)
}

/// Seasons of a league fully present in the store: every season in the
/// range must have rows in all 38 rounds to count as covered.
pub fn covers_seasons(
    conn: &Connection,
    league: League,
    start_season: i32,
    end_season: i32,
) -> Result<bool> {
    let rounds_expected = i64::from(crate::leaderboard::FINAL_ROUND);
    let seasons_expected = i64::from(end_season - start_season + 1);
    let covered: i64 = conn
        .query_row(
            r#"
            SELECT COUNT(*) FROM (
                SELECT season FROM matches
                WHERE league = ?1 AND season >= ?2 AND season <= ?3
                GROUP BY season
                HAVING COUNT(DISTINCT round) >= ?4
            )
            "#,
            params![league.label(), start_season, end_season, rounds_expected],
            |row| row.get(0),
        )
        .context("query season coverage")?;
    Ok(covered >= seasons_expected)
}

/// Replace a league's similarity rates with a freshly swept batch.
pub fn save_rates(
    conn: &mut Connection,
    league: League,
    records: &[SimilarityRecord],
) -> Result<usize> {
    let tx = conn.transaction().context("begin rates upsert")?;
    for r in records {
        tx.execute(
            r#"
            INSERT INTO rates (league, season, round, tolerance, rate, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(league, season, round, tolerance) DO UPDATE SET
                rate = excluded.rate,
                updated_at = excluded.updated_at
            "#,
            params![
                league.label(),
                r.season,
                r.round,
                r.tolerance,
                r.rate,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("upsert rate")?;
    }
    tx.commit().context("commit rates upsert")?;
    Ok(records.len())
}
