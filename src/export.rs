//! Xlsx export of the matches and similarity-rate datasets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::matches::MatchResult;
use crate::schedule_fetch::League;
use crate::similarity::SimilarityRecord;

/// Write `Matches Data_{league}.xlsx` under `dir`. Returns the file path.
pub fn export_matches(dir: &Path, league: League, matches: &[MatchResult]) -> Result<PathBuf> {
    let mut rows = vec![vec![
        "Team 1".to_string(),
        "Team 2".to_string(),
        "Score Team 1".to_string(),
        "Score Team 2".to_string(),
        "Season".to_string(),
        "Round".to_string(),
        "Fixed".to_string(),
    ]];
    for m in matches {
        rows.push(vec![
            m.team1.clone(),
            m.team2.clone(),
            m.goals1.to_string(),
            m.goals2.to_string(),
            m.season.to_string(),
            m.round.to_string(),
            if m.fixed { "yes".to_string() } else { "no".to_string() },
        ]);
    }

    let path = dir.join(format!("Matches Data_{}.xlsx", league.label()));
    save_single_sheet(&path, "Matches", &rows)?;
    Ok(path)
}

/// Write `Similarity Rates_{league}.xlsx` under `dir`. Returns the file path.
pub fn export_rates(dir: &Path, league: League, records: &[SimilarityRecord]) -> Result<PathBuf> {
    let mut rows = vec![vec![
        "Serie".to_string(),
        "Season".to_string(),
        "Round".to_string(),
        "Tolerance".to_string(),
        "Rate".to_string(),
    ]];
    for r in records {
        rows.push(vec![
            r.league.clone(),
            r.season.to_string(),
            r.round.to_string(),
            r.tolerance.to_string(),
            format!("{:.6}", r.rate),
        ]);
    }

    let path = dir.join(format!("Similarity Rates_{}.xlsx", league.label()));
    save_single_sheet(&path, "Rates", &rows)?;
    Ok(path)
}

fn save_single_sheet(path: &Path, name: &str, rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
