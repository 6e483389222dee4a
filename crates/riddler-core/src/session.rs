//! The quiz session: one owner for the pool, draw state, current prompt,
//! scorer and store.
//!
//! A front end drives it with four calls: [`QuizSession::select_category`],
//! [`QuizSession::draw_next`], [`QuizSession::submit`] and
//! [`QuizSession::add_record`].

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::RiddlerConfig;
use crate::error::{AddRecordError, DrawError, SubmitError};
use crate::model::{CategorySelection, NewRecord, Record};
use crate::pool::{DrawPhase, DrawState, Pool};
use crate::similarity::Scorer;
use crate::store::{JsonPoolStore, PoolStore};
use crate::verdict::{JudgeReport, VerdictPolicy};

pub struct QuizSession<R = StdRng> {
    pool: Pool,
    draw: DrawState,
    current: Option<Record>,
    scorer: Scorer,
    policy: VerdictPolicy,
    store: Box<dyn PoolStore>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Open the bank named by `config` with its scoring parameters.
    pub fn from_config(config: &RiddlerConfig, rng: StdRng) -> Result<Self> {
        let store = JsonPoolStore::new(&config.bank_path)
            .with_known_categories(config.known_categories.clone());
        let session = Self::open(Box::new(store), rng)?
            .with_scorer(Scorer::new().with_weights(config.scoring.weights()))
            .with_policy(config.scoring.policy());
        Ok(session)
    }
}

impl<R: Rng> QuizSession<R> {
    /// Session over an already loaded pool.
    pub fn new(pool: Pool, store: Box<dyn PoolStore>, rng: R) -> Self {
        Self {
            pool,
            draw: DrawState::default(),
            current: None,
            scorer: Scorer::new(),
            policy: VerdictPolicy::default(),
            store,
            rng,
        }
    }

    /// Load the pool from `store`. If the load had to backfill categories,
    /// the migrated pool is written back once.
    ///
    /// A failed write-back is logged and the session keeps the migrated pool
    /// in memory; the backfill then runs again on the next open.
    pub fn open(store: Box<dyn PoolStore>, rng: R) -> Result<Self> {
        let loaded = store.load()?;
        if !loaded.backfilled.is_empty() {
            match store.save(&loaded.pool) {
                Ok(()) => tracing::info!(
                    count = loaded.backfilled.len(),
                    "migrated records without a category in {}",
                    store.describe()
                ),
                Err(e) => tracing::warn!(
                    "failed to save migrated riddle bank {}: {e:#}",
                    store.describe()
                ),
            }
        }
        Ok(Self::new(loaded.pool, store, rng))
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_policy(mut self, policy: VerdictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn policy(&self) -> VerdictPolicy {
        self.policy
    }

    /// Category labels currently present, [`crate::model::UNCATEGORIZED`] last.
    pub fn categories(&self) -> Vec<String> {
        self.pool.categories()
    }

    pub fn selection(&self) -> &CategorySelection {
        self.draw.selection()
    }

    pub fn draw_phase(&self) -> DrawPhase {
        self.draw.phase(&self.pool)
    }

    /// The riddle currently presented, if any.
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    pub fn select_category(&mut self, selection: CategorySelection) {
        tracing::debug!(category = %selection, "category selected");
        self.draw.select(selection);
    }

    /// Present the next riddle.
    ///
    /// On [`DrawError::Exhausted`] the cycle restarts and no riddle is
    /// current. On [`DrawError::EmptyCategory`] nothing changes.
    pub fn draw_next(&mut self) -> Result<&Record, DrawError> {
        match self.draw.draw(&self.pool, &mut self.rng) {
            Ok(record) => {
                self.current = Some(record.clone());
                Ok(record)
            }
            Err(e) => {
                if e.is_exhausted() {
                    self.current = None;
                }
                Err(e)
            }
        }
    }

    /// Judge `answer` against the current riddle.
    pub fn submit(&self, answer: &str) -> Result<JudgeReport, SubmitError> {
        let record = self.current.as_ref().ok_or(SubmitError::NoPrompt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SubmitError::EmptyAnswer);
        }

        let score = self.scorer.score(answer, &record.answer);
        let report = self.policy.report(record, score);
        tracing::debug!(id = record.id, score, verdict = ?report.verdict, "judged answer");
        Ok(report)
    }

    /// Validate and append a new riddle, then persist the pool.
    ///
    /// If saving fails the record is removed again and the pool is exactly
    /// as before.
    pub fn add_record(&mut self, form: NewRecord) -> Result<Record, AddRecordError> {
        let record = form.into_record(self.pool.next_id())?;
        self.pool.push(record.clone());

        if let Err(e) = self.store.save(&self.pool) {
            self.pool.pop();
            tracing::warn!("upload of riddle {} rolled back: {e:#}", record.id);
            return Err(AddRecordError::Persist(e));
        }

        tracing::info!(id = record.id, category = %record.category, "added riddle");
        Ok(record)
    }
}
