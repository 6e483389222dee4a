use anyhow::{bail, Result};
use serde_json::json;

use riddler_core::verdict::format_percent;
use riddler_core::Scorer;

use super::GlobalArgs;

pub fn execute(global: &GlobalArgs, answer: String, reference: String, format: String) -> Result<()> {
    let config = global.load_config()?;
    let scorer = Scorer::new().with_weights(config.scoring.weights());
    let policy = config.scoring.policy();

    let breakdown = scorer.breakdown(&answer, &reference);
    let verdict = policy.judge(breakdown.combined);

    match format.as_str() {
        "text" => {
            println!("{verdict}");
            println!("  Lexical:    {}", format_percent(breakdown.lexical));
            println!("  Semantic:   {}", format_percent(breakdown.semantic));
            println!("Similarity: {}", format_percent(breakdown.combined));
        }
        "json" => {
            let value = json!({
                "answer": answer,
                "reference": reference,
                "lexical": breakdown.lexical,
                "semantic": breakdown.semantic,
                "score": breakdown.combined,
                "threshold": policy.threshold,
                "verdict": verdict,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        other => bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
