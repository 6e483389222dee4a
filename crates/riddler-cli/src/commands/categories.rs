//! The `riddler categories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use riddler_core::model::MIXED;
use riddler_core::pool::Pool;
use riddler_core::store::{JsonPoolStore, PoolStore};

use super::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let store = JsonPoolStore::new(&config.bank_path)
        .with_known_categories(config.known_categories.clone());
    // Listing only; a legacy bank is migrated by `play` or `add`.
    let loaded = store.load()?;
    let pool = &loaded.pool;

    if pool.is_empty() {
        println!("No riddles in bank. Add one with `riddler add`.");
        return Ok(());
    }

    println!("{}", category_table(pool));
    Ok(())
}

/// Category/count table with the all-categories row first.
pub fn category_table(pool: &Pool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Riddles"]);

    table.add_row(vec![Cell::new(MIXED), Cell::new(pool.len())]);
    for (label, count) in pool.category_counts() {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table
}
