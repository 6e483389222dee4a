//! The riddle pool, its category index, and the no-repeat draw policy.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::DrawError;
use crate::model::{CategorySelection, Record, MIXED, UNCATEGORIZED};

/// Ordered collection of records. Append-only during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    records: Vec<Record>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Id for the next uploaded record: one past the pool size, bumped past
    /// the largest existing id if a legacy file left gaps. Saturates at
    /// `u32::MAX`.
    pub fn next_id(&self) -> u32 {
        let max_id = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let len = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        len.max(max_id).saturating_add(1)
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<Record> {
        self.records.pop()
    }

    /// Records admitted by `selection`, in pool order.
    pub fn filtered<'a>(
        &'a self,
        selection: &'a CategorySelection,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| selection.admits(r))
    }

    /// Distinct category labels, sorted, with [`UNCATEGORIZED`] last.
    pub fn categories(&self) -> Vec<String> {
        let labels: BTreeSet<&str> = self.records.iter().map(|r| r.category.as_str()).collect();
        let has_uncategorized = labels.contains(UNCATEGORIZED);

        let mut categories: Vec<String> = labels
            .into_iter()
            .filter(|label| *label != UNCATEGORIZED)
            .map(str::to_string)
            .collect();
        if has_uncategorized {
            categories.push(UNCATEGORIZED.to_string());
        }
        categories
    }

    /// Labels offered to the user: [`MIXED`] followed by [`Pool::categories`].
    pub fn selection_labels(&self) -> Vec<String> {
        let mut labels = vec![MIXED.to_string()];
        labels.extend(self.categories());
        labels
    }

    /// Number of records per category, in [`Pool::categories`] order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.as_str()).or_insert(0) += 1;
        }
        self.categories()
            .into_iter()
            .map(|label| {
                let n = counts.get(label.as_str()).copied().unwrap_or(0);
                (label, n)
            })
            .collect()
    }
}

/// Where a draw cycle stands for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    /// Nothing drawn yet.
    Fresh,
    /// Some, but not all, records drawn.
    Drawing,
    /// Every record drawn; the next draw reports exhaustion and resets.
    Exhausted,
}

/// Category filter plus the ids already presented in the current cycle.
#[derive(Debug, Clone, Default)]
pub struct DrawState {
    selection: CategorySelection,
    drawn: HashSet<u32>,
}

impl DrawState {
    pub fn new(selection: CategorySelection) -> Self {
        Self {
            selection,
            drawn: HashSet::new(),
        }
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    pub fn has_drawn(&self, id: u32) -> bool {
        self.drawn.contains(&id)
    }

    /// Change the category filter. Always starts a fresh cycle.
    pub fn select(&mut self, selection: CategorySelection) {
        self.selection = selection;
        self.drawn.clear();
    }

    pub fn reset(&mut self) {
        self.drawn.clear();
    }

    pub fn phase(&self, pool: &Pool) -> DrawPhase {
        if self.drawn.is_empty() {
            return DrawPhase::Fresh;
        }
        let all_drawn = pool
            .filtered(&self.selection)
            .all(|r| self.drawn.contains(&r.id));
        if all_drawn {
            DrawPhase::Exhausted
        } else {
            DrawPhase::Drawing
        }
    }

    /// Pick a not-yet-drawn record from the selection uniformly at random.
    pub fn draw<'p, R>(&mut self, pool: &'p Pool, rng: &mut R) -> Result<&'p Record, DrawError>
    where
        R: Rng + ?Sized,
    {
        let selection = &self.selection;
        let drawn = &self.drawn;
        let mut filtered = pool
            .records()
            .iter()
            .filter(|r| selection.admits(r))
            .peekable();
        if filtered.peek().is_none() {
            return Err(DrawError::EmptyCategory(selection.label().to_string()));
        }

        let available: Vec<&'p Record> = filtered.filter(|r| !drawn.contains(&r.id)).collect();
        match available.choose(rng) {
            Some(&record) => {
                self.drawn.insert(record.id);
                tracing::debug!(
                    id = record.id,
                    category = %self.selection,
                    remaining = available.len() - 1,
                    "drew riddle"
                );
                Ok(record)
            }
            None => {
                tracing::debug!(category = %self.selection, "selection exhausted, resetting");
                self.drawn.clear();
                Err(DrawError::Exhausted(self.selection.label().to_string()))
            }
        }
    }
}

/// A problem found in a stored pool.
#[derive(Debug, Clone)]
pub struct PoolWarning {
    /// The offending record, if the warning is about one.
    pub record_id: Option<u32>,
    pub message: String,
}

/// Check a pool for duplicate or zero ids and blank required fields.
pub fn validate_pool(pool: &Pool) -> Vec<PoolWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for record in pool.records() {
        if !seen_ids.insert(record.id) {
            warnings.push(PoolWarning {
                record_id: Some(record.id),
                message: format!("duplicate id: {}", record.id),
            });
        }
    }

    for record in pool.records() {
        if record.id == 0 {
            warnings.push(PoolWarning {
                record_id: Some(0),
                message: "id must be a positive integer".into(),
            });
        }
        if record.question.trim().is_empty() {
            warnings.push(PoolWarning {
                record_id: Some(record.id),
                message: "question is empty".into(),
            });
        }
        if record.answer.trim().is_empty() {
            warnings.push(PoolWarning {
                record_id: Some(record.id),
                message: "answer is empty".into(),
            });
        }
        if record.category.trim().is_empty() {
            warnings.push(PoolWarning {
                record_id: Some(record.id),
                message: "category is empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(id: u32, category: &str) -> Record {
        Record {
            id,
            question: format!("Q{id}"),
            answer: format!("A{id}"),
            explanation: String::new(),
            category: category.into(),
        }
    }

    fn sample_pool() -> Pool {
        Pool::from_records(vec![
            record(1, "谐音"),
            record(2, UNCATEGORIZED),
            record(3, "动物"),
            record(4, "谐音"),
            record(5, "动物"),
        ])
    }

    #[test]
    fn categories_sorted_with_uncategorized_last() {
        let pool = sample_pool();
        let cats = pool.categories();
        assert_eq!(cats.last().map(String::as_str), Some(UNCATEGORIZED));
        assert_eq!(cats.len(), 3);
        let mut head = cats[..2].to_vec();
        head.sort();
        assert_eq!(head, cats[..2].to_vec());

        let labels = pool.selection_labels();
        assert_eq!(labels[0], MIXED);
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn category_counts_follow_index_order() {
        let counts = sample_pool().category_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.last().unwrap(), &(UNCATEGORIZED.to_string(), 1));
        assert!(counts.iter().any(|(l, n)| l == "谐音" && *n == 2));
    }

    #[test]
    fn next_id_skips_past_gaps() {
        assert_eq!(Pool::new().next_id(), 1);
        assert_eq!(sample_pool().next_id(), 6);
        let gappy = Pool::from_records(vec![record(1, "A"), record(9, "A")]);
        assert_eq!(gappy.next_id(), 10);
    }

    #[test]
    fn next_id_saturates_at_max() {
        let near = Pool::from_records(vec![record(u32::MAX - 1, "A")]);
        assert_eq!(near.next_id(), u32::MAX);
        let full = Pool::from_records(vec![record(u32::MAX, "A")]);
        assert_eq!(full.next_id(), u32::MAX);
    }

    #[test]
    fn draw_never_repeats_within_a_cycle() {
        let pool = sample_pool();
        let mut state = DrawState::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..pool.len() {
            let r = state.draw(&pool, &mut rng).unwrap();
            assert!(seen.insert(r.id), "id {} drawn twice", r.id);
        }
        assert_eq!(state.phase(&pool), DrawPhase::Exhausted);

        let err = state.draw(&pool, &mut rng).unwrap_err();
        assert_eq!(err, DrawError::Exhausted(MIXED.into()));
        assert_eq!(state.phase(&pool), DrawPhase::Fresh);
        assert_eq!(state.drawn_count(), 0);

        // A fresh cycle may return any id again.
        assert!(state.draw(&pool, &mut rng).is_ok());
    }

    #[test]
    fn draw_respects_category_filter() {
        let pool = sample_pool();
        let mut state = DrawState::new(CategorySelection::Category("动物".into()));
        let mut rng = StdRng::seed_from_u64(1);

        let a = state.draw(&pool, &mut rng).unwrap().id;
        assert_eq!(state.phase(&pool), DrawPhase::Drawing);
        let b = state.draw(&pool, &mut rng).unwrap().id;
        let mut ids = [a, b];
        ids.sort();
        assert_eq!(ids, [3, 5]);
        assert!(matches!(
            state.draw(&pool, &mut rng),
            Err(DrawError::Exhausted(_))
        ));
    }

    #[test]
    fn draw_on_empty_category_leaves_state_alone() {
        let pool = sample_pool();
        let mut state = DrawState::default();
        let mut rng = StdRng::seed_from_u64(3);
        state.draw(&pool, &mut rng).unwrap();

        state.select(CategorySelection::Category("不存在".into()));
        assert_eq!(state.drawn_count(), 0);
        let err = state.draw(&pool, &mut rng).unwrap_err();
        assert_eq!(err, DrawError::EmptyCategory("不存在".into()));
        assert_eq!(state.phase(&pool), DrawPhase::Fresh);
    }

    #[test]
    fn empty_pool_reports_empty_category() {
        let mut state = DrawState::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            state.draw(&Pool::new(), &mut rng).unwrap_err(),
            DrawError::EmptyCategory(MIXED.into())
        );
    }

    #[test]
    fn select_clears_drawn_ids() {
        let pool = sample_pool();
        let mut state = DrawState::default();
        let mut rng = StdRng::seed_from_u64(11);
        let id = state.draw(&pool, &mut rng).unwrap().id;
        assert!(state.has_drawn(id));

        state.select(CategorySelection::Mixed);
        assert!(!state.has_drawn(id));
        assert_eq!(state.phase(&pool), DrawPhase::Fresh);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let pool = sample_pool();
        let sequence = |seed| {
            let mut state = DrawState::default();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..pool.len())
                .map(|_| state.draw(&pool, &mut rng).unwrap().id)
                .collect::<Vec<_>>()
        };
        assert_eq!(sequence(42), sequence(42));
    }

    #[test]
    fn validate_reports_duplicates_and_blanks() {
        let mut blank = record(2, "A");
        blank.answer = "  ".into();
        let pool = Pool::from_records(vec![record(1, "A"), record(1, "B"), blank, record(0, "A")]);
        let warnings = validate_pool(&pool);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate id: 1")));
        assert!(warnings
            .iter()
            .any(|w| w.record_id == Some(2) && w.message.contains("answer")));
        assert!(warnings.iter().any(|w| w.message.contains("positive")));
    }

    #[test]
    fn validate_clean_pool() {
        assert!(validate_pool(&sample_pool()).is_empty());
    }
}
