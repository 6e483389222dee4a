//! JSON persistence of the riddle pool.
//!
//! The bank is a UTF-8 JSON array of records, pretty-printed with non-ASCII
//! text kept literal. Saves rewrite the whole file through a temporary
//! sibling, so a failed write leaves the previous bank intact.
//!
//! Older banks may contain records without a `category`. Those are filled in
//! once at load time by [`backfill_categories`]; the session then saves the
//! migrated pool so the heuristic never runs on the same file twice.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Record, UNCATEGORIZED};
use crate::pool::Pool;

/// Loads and saves a whole pool.
pub trait PoolStore: Send + Sync {
    /// Human-readable location, for messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<LoadedPool>;

    fn save(&self, pool: &Pool) -> Result<()>;
}

/// Result of loading a bank.
#[derive(Debug, Clone, Default)]
pub struct LoadedPool {
    pub pool: Pool,
    /// Ids of records whose category was filled in during this load.
    pub backfilled: Vec<u32>,
}

/// A stored record as it may appear in older banks.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRecord {
    pub id: u32,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Bank stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonPoolStore {
    path: PathBuf,
    known_categories: Vec<String>,
}

impl JsonPoolStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            known_categories: Vec::new(),
        }
    }

    /// Extra labels the backfill may assign, beyond those already in the file.
    pub fn with_known_categories(mut self, labels: Vec<String>) -> Self {
        self.known_categories = labels;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PoolStore for JsonPoolStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    /// Load the bank. A missing file is an empty pool.
    fn load(&self) -> Result<LoadedPool> {
        if !self.path.exists() {
            tracing::info!("no riddle bank at {}, starting empty", self.path.display());
            return Ok(LoadedPool::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read riddle bank: {}", self.path.display()))?;
        let loaded = parse_pool_str(&content, &self.known_categories)
            .with_context(|| format!("failed to parse riddle bank: {}", self.path.display()))?;

        tracing::info!(
            records = loaded.pool.len(),
            backfilled = loaded.backfilled.len(),
            "loaded riddle bank from {}",
            self.path.display()
        );
        Ok(loaded)
    }

    fn save(&self, pool: &Pool) -> Result<()> {
        let json =
            serde_json::to_string_pretty(pool.records()).context("failed to serialize riddles")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory: {}", parent.display())
                })?;
            }
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, json)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        tracing::info!(records = pool.len(), "saved riddle bank to {}", self.path.display());
        Ok(())
    }
}

/// Parse bank JSON, backfilling missing categories.
pub fn parse_pool_str(content: &str, known_categories: &[String]) -> Result<LoadedPool> {
    let records: Vec<LegacyRecord> =
        serde_json::from_str(content).context("invalid riddle bank JSON")?;
    let (records, backfilled) = backfill_categories(records, known_categories);
    Ok(LoadedPool {
        pool: Pool::from_records(records),
        backfilled,
    })
}

/// Give every record a category.
///
/// A record without one (or with a blank one) gets the first label, in
/// sorted order, that occurs as a substring of its explanation. The labels
/// scanned are those already present in `records` plus `known_categories`.
/// Records with no match get [`UNCATEGORIZED`].
///
/// Returns the completed records and the ids that were filled in.
pub fn backfill_categories(
    records: Vec<LegacyRecord>,
    known_categories: &[String],
) -> (Vec<Record>, Vec<u32>) {
    let mut labels: Vec<&str> = records
        .iter()
        .filter_map(|r| r.category.as_deref())
        .chain(known_categories.iter().map(String::as_str))
        .map(str::trim)
        .filter(|label| !label.is_empty() && *label != UNCATEGORIZED)
        .collect();
    labels.sort_unstable();
    labels.dedup();
    let labels: Vec<String> = labels.into_iter().map(str::to_string).collect();

    let mut backfilled = Vec::new();
    let completed = records
        .into_iter()
        .map(|r| {
            let category = match r.category.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => {
                    backfilled.push(r.id);
                    labels
                        .iter()
                        .find(|label| r.explanation.contains(label.as_str()))
                        .cloned()
                        .unwrap_or_else(|| UNCATEGORIZED.to_string())
                }
            };
            Record {
                id: r.id,
                question: r.question,
                answer: r.answer,
                explanation: r.explanation,
                category,
            }
        })
        .collect();

    if !backfilled.is_empty() {
        tracing::info!(count = backfilled.len(), "backfilled missing categories");
    }
    (completed, backfilled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> Pool {
        Pool::from_records(vec![
            Record {
                id: 1,
                question: "什么东西越洗越脏？".into(),
                answer: "水".into(),
                explanation: "东西洗干净了，水就脏了".into(),
                category: "生活".into(),
            },
            Record {
                id: 2,
                question: "Q2".into(),
                answer: "香蕉".into(),
                explanation: String::new(),
                category: UNCATEGORIZED.into(),
            },
        ])
    }

    #[test]
    fn json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPoolStore::new(dir.path().join("jokes.json"));
        let pool = sample_pool();

        store.save(&pool).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.pool, pool);
        assert!(loaded.backfilled.is_empty());
    }

    #[test]
    fn saved_file_is_pretty_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokes.json");
        JsonPoolStore::new(&path).save(&sample_pool()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("越洗越脏"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n  {\n    \"id\": 1,"), "got:\n{text}");
        assert!(!dir.path().join("jokes.json.tmp").exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPoolStore::new(dir.path().join("banks/nested/jokes.json"));
        store.save(&sample_pool()).unwrap();
        assert_eq!(store.load().unwrap().pool.len(), 2);
    }

    #[test]
    fn missing_file_is_empty_pool() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = JsonPoolStore::new(dir.path().join("none.json"))
            .load()
            .unwrap();
        assert!(loaded.pool.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not a list").unwrap();
        let err = JsonPoolStore::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn backfill_scans_explanation() {
        let json = r#"[
            {"id": 1, "question": "Q1", "answer": "A1", "explanation": "x", "category": "谐音"},
            {"id": 2, "question": "Q2", "answer": "A2", "explanation": "这是一个谐音梗"},
            {"id": 3, "question": "Q3", "answer": "A3", "explanation": "没有线索"},
            {"id": 4, "question": "Q4", "answer": "A4", "explanation": "脑筋急转弯", "category": " "}
        ]"#;
        let loaded = parse_pool_str(json, &["脑筋急转弯".to_string()]).unwrap();
        let cats: Vec<&str> = loaded
            .pool
            .records()
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(cats, vec!["谐音", "谐音", UNCATEGORIZED, "脑筋急转弯"]);
        assert_eq!(loaded.backfilled, vec![2, 3, 4]);
    }

    #[test]
    fn backfill_without_any_labels_uses_sentinel() {
        let json = r#"[{"id": 1, "question": "Q", "answer": "A"}]"#;
        let loaded = parse_pool_str(json, &[]).unwrap();
        assert_eq!(loaded.pool.records()[0].category, UNCATEGORIZED);
        assert_eq!(loaded.pool.records()[0].explanation, "");
    }
}
