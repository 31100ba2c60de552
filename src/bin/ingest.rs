//! Scrape-only run: download match data into the sqlite store without
//! computing rates or exporting workbooks.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use early_table::schedule_fetch::{download_league, League};
use early_table::store;

const DEFAULT_START_SEASON: i32 = 2004;
const DEFAULT_END_SEASON: i32 = 2020;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let start_season = parse_flag(&args, "--start-season")?.unwrap_or(DEFAULT_START_SEASON);
    let end_season = parse_flag(&args, "--end-season")?.unwrap_or(DEFAULT_END_SEASON);
    if start_season > end_season {
        return Err(anyhow!("season range {start_season}..{end_season} is empty"));
    }

    let db_path = flag_value(&args, "--db")
        .map(PathBuf::from)
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;
    let mut conn = store::open_db(&db_path)?;

    println!("Ingest into {}", db_path.display());
    let mut total = 0usize;
    let mut failures: Vec<String> = Vec::new();

    for league in League::ALL {
        println!(
            "Downloading {} seasons {start_season}..{end_season}...",
            league.label()
        );
        match download_league(league, start_season, end_season) {
            Ok(matches) => {
                let written =
                    store::save_matches(&mut conn, league, start_season, end_season, &matches)?;
                total += written;
                println!("{}: {written} matches upserted", league.label());
            }
            Err(err) => {
                failures.push(format!("{}: {err:#}", league.label()));
            }
        }
    }

    println!("\nIngest complete: {total} matches upserted");
    if !failures.is_empty() {
        println!("Failures: {}", failures.len());
        for failure in &failures {
            println!(" - {failure}");
        }
        return Err(anyhow!("{} league(s) failed to ingest", failures.len()));
    }
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Result<Option<i32>> {
    flag_value(args, flag)
        .map(|v| v.parse::<i32>().with_context(|| format!("invalid {flag}")))
        .transpose()
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for (idx, arg) in args.iter().enumerate() {
        if arg == flag {
            return args.get(idx + 1).map(|s| s.as_str());
        }
        if let Some(rest) = arg.strip_prefix(flag) {
            if let Some(value) = rest.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}
