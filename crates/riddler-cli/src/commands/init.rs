//! The `riddler init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("riddler.toml").exists() {
        println!("riddler.toml already exists, skipping.");
    } else {
        std::fs::write("riddler.toml", SAMPLE_CONFIG)?;
        println!("Created riddler.toml");
    }

    if Path::new("jokes.json").exists() {
        println!("jokes.json already exists, skipping.");
    } else {
        std::fs::write("jokes.json", SAMPLE_BANK)?;
        println!("Created jokes.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: riddler validate");
    println!("  2. Run: riddler play");
    println!("  3. Add your own: riddler add --question ... --answer ... --category ...");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# riddler configuration

bank_path = "jokes.json"

# Labels offered to the category backfill for old banks without categories.
known_categories = ["谐音", "脑筋急转弯"]

# Uncomment for a reproducible draw order.
# seed = 42

[scoring]
lexical_weight = 0.7
semantic_weight = 0.3
threshold = 0.3
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "id": 1,
    "question": "什么东西越洗越脏？",
    "answer": "水",
    "explanation": "东西洗干净了，水就变脏了。",
    "category": "脑筋急转弯"
  },
  {
    "id": 2,
    "question": "什么门永远关不上？",
    "answer": "球门",
    "explanation": "球门没有门板，自然关不上。",
    "category": "脑筋急转弯"
  },
  {
    "id": 3,
    "question": "为什么海是蓝色的？",
    "answer": "因为鱼在水里吐泡泡 blue blue blue",
    "explanation": "泡泡声听起来像 blue。",
    "category": "谐音"
  }
]
"#;
