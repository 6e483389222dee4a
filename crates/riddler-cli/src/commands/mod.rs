pub mod add;
pub mod categories;
pub mod check;
pub mod init;
pub mod play;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use riddler_core::config::{load_config_from, RiddlerConfig};
use riddler_core::QuizSession;

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub bank: Option<PathBuf>,
}

impl GlobalArgs {
    /// Resolve the effective config: file, then env, then `--bank`.
    pub fn load_config(&self) -> Result<RiddlerConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(bank) = &self.bank {
            config.bank_path = bank.clone();
        }
        Ok(config)
    }

    /// Open a session on the configured bank. `seed` overrides the
    /// configured seed; without either, draws are seeded from the OS.
    pub fn open_session(&self, seed: Option<u64>) -> Result<QuizSession> {
        let config = self.load_config()?;
        let rng = match seed.or(config.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        QuizSession::from_config(&config, rng)
    }
}
