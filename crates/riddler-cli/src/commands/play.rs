//! The `riddler play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::Rng;

use riddler_core::model::CategorySelection;
use riddler_core::{DrawError, QuizSession};

use super::GlobalArgs;

/// Tally of one play session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlaySummary {
    pub answered: usize,
    pub correct: usize,
    pub skipped: usize,
}

pub fn execute(global: &GlobalArgs, category: String, seed: Option<u64>) -> Result<()> {
    let mut session = global.open_session(seed)?;
    let selection: CategorySelection = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    session.select_category(selection);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run(&mut session, stdin.lock(), stdout.lock())?;

    println!(
        "\nAnswered {} riddle(s), {} correct, {} skipped.",
        summary.answered, summary.correct, summary.skipped
    );
    Ok(())
}

/// Draw riddles and judge answers until the input ends, the player quits, or
/// the selection runs out.
pub fn run<R, In, Out>(
    session: &mut QuizSession<R>,
    mut input: In,
    mut out: Out,
) -> Result<PlaySummary>
where
    R: Rng,
    In: BufRead,
    Out: Write,
{
    let mut summary = PlaySummary::default();
    let total = session
        .pool()
        .filtered(session.selection())
        .count();
    writeln!(
        out,
        "Category: {} ({total} riddles). Type :next to skip, :quit to stop.",
        session.selection()
    )?;

    loop {
        match session.draw_next() {
            Ok(record) => {
                writeln!(out, "\n[#{}] {}", record.id, record.question)?;
            }
            Err(e @ DrawError::EmptyCategory(_)) => {
                writeln!(out, "Warning: {e}.")?;
                return Ok(summary);
            }
            Err(e @ DrawError::Exhausted(_)) => {
                writeln!(out, "\n{e}. Pick a category to play again.")?;
                return Ok(summary);
            }
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(summary);
            }

            match line.trim() {
                ":quit" | ":q" => return Ok(summary),
                ":next" | ":n" => {
                    summary.skipped += 1;
                    break;
                }
                "" => {
                    writeln!(out, "Please enter an answer.")?;
                }
                answer => {
                    let report = session.submit(answer)?;
                    summary.answered += 1;
                    if report.verdict.is_correct() {
                        summary.correct += 1;
                    }
                    writeln!(out, "\n{report}")?;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use riddler_core::model::Record;
    use riddler_core::pool::Pool;
    use riddler_core::store::JsonPoolStore;

    fn session(records: Vec<Record>) -> (tempfile::TempDir, QuizSession) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPoolStore::new(dir.path().join("jokes.json"));
        let session = QuizSession::new(
            Pool::from_records(records),
            Box::new(store),
            StdRng::seed_from_u64(3),
        );
        (dir, session)
    }

    fn record(id: u32, answer: &str) -> Record {
        Record {
            id,
            question: format!("Q{id}"),
            answer: answer.into(),
            explanation: format!("E{id}"),
            category: "A".into(),
        }
    }

    fn play(session: &mut QuizSession, input: &str) -> (PlaySummary, String) {
        let mut out = Vec::new();
        let summary = run(session, input.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_until_exhausted() {
        let (_dir, mut s) = session(vec![record(1, "香蕉")]);
        let (summary, out) = play(&mut s, "香蕉\n");
        assert_eq!(
            summary,
            PlaySummary {
                answered: 1,
                correct: 1,
                skipped: 0
            }
        );
        assert!(out.contains("[#1] Q1"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Explanation: E1"));
        assert!(out.contains("have been used"));
    }

    #[test]
    fn blank_line_reprompts() {
        let (_dir, mut s) = session(vec![record(1, "香蕉")]);
        let (summary, out) = play(&mut s, "\n苹果\n");
        assert!(out.contains("Please enter an answer."));
        assert!(out.contains("Incorrect"));
        assert_eq!(summary.answered, 1);
        assert_eq!(summary.correct, 0);
    }

    #[test]
    fn skip_and_quit() {
        let (_dir, mut s) = session(vec![record(1, "a"), record(2, "b")]);
        let (summary, _) = play(&mut s, ":next\n:quit\n");
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.answered, 0);
    }

    #[test]
    fn eof_ends_quietly() {
        let (_dir, mut s) = session(vec![record(1, "a")]);
        let (summary, out) = play(&mut s, "");
        assert_eq!(summary, PlaySummary::default());
        assert!(out.contains("[#1]"));
    }

    #[test]
    fn empty_category_warns() {
        let (_dir, mut s) = session(vec![record(1, "a")]);
        s.select_category(CategorySelection::Category("Z".into()));
        let (_, out) = play(&mut s, "");
        assert!(out.contains("Warning: category 'Z' has no riddles."));
    }
}
