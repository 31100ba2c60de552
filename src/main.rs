//! Full analysis run: download (or load) match data for each league,
//! build the results tables, sweep leaderboard similarity rates and
//! export everything to sqlite + xlsx.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use early_table::export;
use early_table::results_table::ResultsTable;
use early_table::schedule_fetch::{download_league, League};
use early_table::similarity::sweep_rates;
use early_table::store;

const DEFAULT_START_SEASON: i32 = 2004;
const DEFAULT_END_SEASON: i32 = 2020;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let (start_season, end_season) = season_range(&args)?;
    let leagues = leagues_arg(&args)?;
    let out_dir = flag_value(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("saved_dataframes"));
    let db_path = flag_value(&args, "--db")
        .map(PathBuf::from)
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;
    let offline = args.iter().any(|a| a == "--offline");

    let mut conn = store::open_db(&db_path)?;
    println!("DB: {}", db_path.display());
    println!("Seasons: {start_season}..{end_season}");

    for league in leagues {
        println!("\n=== {} ===", league.label());

        let matches = if store::covers_seasons(&conn, league, start_season, end_season)? {
            println!("Loading matches from store...");
            store::load_matches(&conn, league, start_season, end_season)?
        } else if offline {
            return Err(anyhow!(
                "store does not cover {} seasons {start_season}..{end_season} and --offline is set",
                league.label()
            ));
        } else {
            println!("Downloading {} matches data...", league.label());
            let matches = download_league(league, start_season, end_season)?;
            store::save_matches(&mut conn, league, start_season, end_season, &matches)?;
            matches
        };
        println!("Matches: {}", matches.len());

        let table = ResultsTable::from_matches(league.label(), &matches)?;
        let records = sweep_rates(&table, start_season, end_season, league.label())?;
        println!("Rate records: {}", records.len());

        store::save_rates(&mut conn, league, &records)?;
        let matches_file = export::export_matches(&out_dir, league, &matches)?;
        let rates_file = export::export_rates(&out_dir, league, &records)?;
        println!("Wrote {}", matches_file.display());
        println!("Wrote {}", rates_file.display());
    }

    Ok(())
}

fn season_range(args: &[String]) -> Result<(i32, i32)> {
    let start = flag_value(args, "--start-season")
        .map(|v| v.parse::<i32>().context("invalid --start-season"))
        .transpose()?
        .or_else(|| env_season("START_SEASON"))
        .unwrap_or(DEFAULT_START_SEASON);
    let end = flag_value(args, "--end-season")
        .map(|v| v.parse::<i32>().context("invalid --end-season"))
        .transpose()?
        .or_else(|| env_season("END_SEASON"))
        .unwrap_or(DEFAULT_END_SEASON);
    if start > end {
        return Err(anyhow!("season range {start}..{end} is empty"));
    }
    Ok((start, end))
}

fn env_season(name: &str) -> Option<i32> {
    std::env::var(name).ok().and_then(|v| v.parse::<i32>().ok())
}

fn leagues_arg(args: &[String]) -> Result<Vec<League>> {
    let Some(raw) = flag_value(args, "--leagues") else {
        return Ok(League::ALL.to_vec());
    };
    let mut leagues = Vec::new();
    for part in raw.split(',') {
        let league = League::from_arg(part.trim())
            .ok_or_else(|| anyhow!("unknown league {part:?}"))?;
        if !leagues.contains(&league) {
            leagues.push(league);
        }
    }
    if leagues.is_empty() {
        return Err(anyhow!("--leagues given but empty"));
    }
    Ok(leagues)
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
