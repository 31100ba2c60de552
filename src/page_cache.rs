//! On-disk cache of fetched schedule pages.
//!
//! Historical round pages never change once the round is played, so a
//! cache hit is served as-is with no revalidation. The cache is one JSON
//! file keyed by URL under the XDG cache dir, written atomically via a
//! tmp file swap.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "early_table";
const CACHE_FILE: &str = "pages.json";

static CACHE: Mutex<Option<PageCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PageCacheFile {
    version: u32,
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PageEntry {
    body: String,
    fetched_at: u64,
}

/// Return the cached body for `url`, if any.
pub fn cached_page(url: &str) -> Option<String> {
    let mut guard = CACHE.lock().expect("page cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.pages.get(url).map(|e| e.body.clone())
}

/// Record a freshly fetched body and persist the cache file.
pub fn store_page(url: &str, body: &str) {
    let mut guard = CACHE.lock().expect("page cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.pages.insert(
        url.to_string(),
        PageEntry {
            body: body.to_string(),
            fetched_at: now_secs(),
        },
    );
    let _ = save_cache_file(cache);
}

fn load_cache_file() -> PageCacheFile {
    let Some(path) = cache_path() else {
        return PageCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return PageCacheFile::default();
    };
    let cache = serde_json::from_str::<PageCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return PageCacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &PageCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).ok();
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize page cache")?;
    fs::write(&tmp, json).context("write page cache")?;
    fs::rename(&tmp, &path).context("swap page cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
