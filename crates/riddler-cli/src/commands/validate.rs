//! The `riddler validate` command.

use anyhow::Result;

use riddler_core::pool::validate_pool;
use riddler_core::store::{JsonPoolStore, PoolStore};

use super::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let store = JsonPoolStore::new(&config.bank_path)
        .with_known_categories(config.known_categories.clone());

    if !store.path().exists() {
        anyhow::bail!("riddle bank not found: {}", store.describe());
    }

    // Load without the session so a legacy bank is reported, not rewritten.
    let loaded = store.load()?;
    let pool = &loaded.pool;
    println!(
        "Riddle bank: {} ({} riddles, {} categories)",
        store.describe(),
        pool.len(),
        pool.categories().len()
    );

    let warnings = validate_pool(pool);
    for w in &warnings {
        let prefix = w
            .record_id
            .map(|id| format!("  [#{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if !loaded.backfilled.is_empty() {
        println!(
            "  NOTE: {} riddle(s) have no category and will be migrated on next play.",
            loaded.backfilled.len()
        );
    }

    if warnings.is_empty() {
        println!("Riddle bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
