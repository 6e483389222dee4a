//! The `riddler add` command.

use anyhow::Result;

use riddler_core::NewRecord;

use super::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    question: String,
    answer: String,
    explanation: String,
    category: Option<String>,
) -> Result<()> {
    let mut session = global.open_session(None)?;

    let mut form = NewRecord::new(question, answer).with_explanation(explanation);
    if let Some(category) = category {
        form = form.with_category(category);
    }

    let record = session.add_record(form)?;
    println!(
        "Added riddle #{} to '{}' ({} riddles in bank)",
        record.id,
        record.category,
        session.pool().len()
    );
    Ok(())
}
