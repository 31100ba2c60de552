//! Downloads round schedule pages from worldfootball.net and normalizes
//! them into match results.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};

use crate::leaderboard::FINAL_ROUND;
use crate::matches::{match_rows_from_cells, MatchResult};
use crate::page_cache;

const SCHEDULE_BASE_URL: &str = "https://www.worldfootball.net/schedule";
const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Leagues the analysis covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    SerieA,
    PremierLeague,
    Ligue1,
}

impl League {
    pub const ALL: [League; 3] = [League::SerieA, League::PremierLeague, League::Ligue1];

    /// Path tag used by worldfootball.net schedule URLs.
    pub fn url_tag(self) -> &'static str {
        match self {
            League::SerieA => "ita-serie-a",
            League::PremierLeague => "eng-premier-league",
            League::Ligue1 => "fra-ligue-1",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            League::SerieA => "Serie A",
            League::PremierLeague => "Premier League",
            League::Ligue1 => "Ligue 1",
        }
    }

    pub fn from_arg(arg: &str) -> Option<League> {
        match arg.to_ascii_lowercase().as_str() {
            "seriea" | "serie-a" | "ita" => Some(League::SerieA),
            "premier" | "premier-league" | "eng" => Some(League::PremierLeague),
            "ligue1" | "ligue-1" | "fra" => Some(League::Ligue1),
            _ => None,
        }
    }
}

/// "2004" → "2004-2005", the form the schedule URLs expect.
fn season_slug(season: i32) -> String {
    format!("{season}-{}", season + 1)
}

fn round_url(league: League, season: i32, round: u32) -> String {
    format!(
        "{SCHEDULE_BASE_URL}/{}-{}-spieltag/{round}/",
        league.url_tag(),
        season_slug(season)
    )
}

/// Download every round of every season in `[start_season, end_season]`
/// for one league, normalized and ordered by (season, round).
///
/// The 38 round pages of a season are fetched through a rayon fan-out
/// (the pages are independent); seasons run one after the other to keep
/// the request burst bounded. Any unrecognized page layout aborts the
/// league rather than dropping rows, since a dropped row would skew every
/// leaderboard built on top.
pub fn download_league(
    league: League,
    start_season: i32,
    end_season: i32,
) -> Result<Vec<MatchResult>> {
    if start_season > end_season {
        return Err(anyhow!(
            "season range {start_season}..{end_season} is empty"
        ));
    }

    let mut matches = Vec::new();
    for season in start_season..=end_season {
        let mut rounds: Vec<(u32, Vec<MatchResult>)> = (1..=FINAL_ROUND)
            .into_par_iter()
            .map(|round| {
                let rows = fetch_round_matches(league, season, round).with_context(|| {
                    format!(
                        "{} season {season} round {round}",
                        league.label()
                    )
                })?;
                Ok((round, rows))
            })
            .collect::<Result<_>>()?;
        rounds.sort_by_key(|(round, _)| *round);
        for (_, rows) in rounds {
            matches.extend(rows);
        }
    }
    Ok(matches)
}

/// Fetch and normalize one round page.
pub fn fetch_round_matches(league: League, season: i32, round: u32) -> Result<Vec<MatchResult>> {
    let url = round_url(league, season, round);
    let body = fetch_page(&url)?;
    let cells = schedule_table_cells(&body)
        .ok_or_else(|| anyhow!("no schedule table in page {url}"))?;
    let rows = match_rows_from_cells(&cells, season, round)?;
    Ok(rows)
}

fn fetch_page(url: &str) -> Result<String> {
    if let Some(body) = page_cache::cached_page(url) {
        return Ok(body);
    }
    let client = http_client()?;
    let resp = client
        .get(url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status} for {url}"));
    }
    page_cache::store_page(url, &body);
    Ok(body)
}

/// Extract the cell texts of the schedule table, newlines stripped.
///
/// Returns None when the page carries no `table.standard_tabelle` at all
/// (site layout change, error page).
pub fn schedule_table_cells(body: &str) -> Option<Vec<String>> {
    let document = Html::parse_document(body);
    let table_sel = Selector::parse("table.standard_tabelle").expect("valid table selector");
    let td_sel = Selector::parse("td").expect("valid td selector");

    let table = document.select(&table_sel).next()?;
    let cells = table
        .select(&td_sel)
        .map(|td| td.text().collect::<String>().replace('\n', ""))
        .collect();
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_urls_follow_site_layout() {
        assert_eq!(
            round_url(League::SerieA, 2004, 1),
            "https://www.worldfootball.net/schedule/ita-serie-a-2004-2005-spieltag/1/"
        );
        assert_eq!(
            round_url(League::PremierLeague, 2019, 38),
            "https://www.worldfootball.net/schedule/eng-premier-league-2019-2020-spieltag/38/"
        );
    }

    #[test]
    fn table_cells_come_back_in_document_order() {
        let body = r#"
            <html><body>
            <table class="standard_tabelle">
              <tr><td>14/09/2004</td><td>Juventus</td><td>Brescia</td><td>3:0 (2:0) </td></tr>
            </table>
            </body></html>
        "#;
        let cells = schedule_table_cells(body).expect("table should be found");
        assert_eq!(cells, vec!["14/09/2004", "Juventus", "Brescia", "3:0 (2:0) "]);
    }
}
