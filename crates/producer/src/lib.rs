// Rust guideline compliant 2026-10-19

//! Producer component -- generates synthetic per-user login histories and
//! writes them to a `LoginLog` hexagonal port.
//!
//! Entry points: [`Producer::generate_user`], [`Producer::produce_once`],
//! [`Producer::run`]. Configuration via [`ProducerConfig::builder`].

use chrono::{NaiveDate, TimeDelta};
use domain::{LoginEvent, LoginLog, LoginLogError, UserLogin};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use std::cell::RefCell;

// ---------------------------------------------------------------------------
// ProducerError
// ---------------------------------------------------------------------------

/// Errors that can occur during login production.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    /// The supplied configuration is invalid.
    #[error("invalid producer configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A login-log write failed.
    #[error("login log error: {source}")]
    LoginLog {
        /// The underlying login-log error.
        #[from]
        source: LoginLogError,
    },
}

// ---------------------------------------------------------------------------
// ProducerConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Producer`].
///
/// Construct via [`ProducerConfig::builder`].
#[derive(Debug)]
pub struct ProducerConfig {
    /// Number of users generated by [`Producer::run`].
    pub users: usize,
    /// Maximum logins per user (range: `[1, max_logins]`).
    pub max_logins: usize,
    /// Logins fall on `start + [0, span_days)` days.
    pub span_days: u32,
    /// First calendar day of the generated activity.
    pub start: NaiveDate,
    /// Optional RNG seed for reproducible histories. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Builder for [`ProducerConfig`].
///
/// Obtain via [`ProducerConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct ProducerConfigBuilder {
    users: usize,
    max_logins: usize,
    span_days: u32,
    start: NaiveDate,
    seed: Option<u64>,
}

impl ProducerConfig {
    /// Create a builder. `users` is the only required parameter.
    ///
    /// Default values: `max_logins = 20`, `span_days = 60`,
    /// `start = 2014-01-01`, `seed = None`.
    #[must_use]
    pub fn builder(users: usize) -> ProducerConfigBuilder {
        ProducerConfigBuilder {
            users,
            // 20 logins over 60 days gives a realistic mix of adopted and idle users.
            max_logins: 20,
            span_days: 60,
            start: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap_or_default(),
            seed: None,
        }
    }
}

impl ProducerConfigBuilder {
    /// Override the per-user login cap.
    #[must_use]
    pub fn max_logins(mut self, max_logins: usize) -> Self {
        self.max_logins = max_logins;
        self
    }

    /// Override the number of days the activity is spread over.
    #[must_use]
    pub fn span_days(mut self, span_days: u32) -> Self {
        self.span_days = span_days;
        self
    }

    /// Override the first day of activity.
    #[must_use]
    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Fix the RNG seed for deterministic output (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::InvalidConfig`] when `users`, `max_logins` or
    /// `span_days` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<ProducerConfig, ProducerError> {
        if self.users == 0 {
            return Err(ProducerError::InvalidConfig {
                reason: "users must be >= 1".to_owned(),
            });
        }
        if self.max_logins == 0 {
            return Err(ProducerError::InvalidConfig {
                reason: "max_logins must be >= 1".to_owned(),
            });
        }
        if self.span_days == 0 {
            return Err(ProducerError::InvalidConfig {
                reason: "span_days must be >= 1".to_owned(),
            });
        }
        Ok(ProducerConfig {
            users: self.users,
            max_logins: self.max_logins,
            span_days: self.span_days,
            start: self.start,
            seed: self.seed,
        })
    }
}

// ---------------------------------------------------------------------------
// Producer
// ---------------------------------------------------------------------------

/// Seconds in one calendar day; upper bound for the random time-of-day.
const SECONDS_PER_DAY: i64 = 86_400;

/// Generates synthetic login histories and forwards them to a [`LoginLog`] port.
///
/// Generic over `L: LoginLog` for zero-cost static dispatch. Holds no concrete
/// log reference -- dependency is injected per call (hexagonal architecture).
#[derive(Debug)]
pub struct Producer {
    config: ProducerConfig,
    /// Interior mutability required because all public methods take `&self`.
    rng: RefCell<StdRng>,
}

impl Producer {
    /// Create a new producer from `config`.
    ///
    /// Seeds the RNG from `config.seed` if set, otherwise from the OS.
    #[must_use]
    pub fn new(config: ProducerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: RefCell::new(rng),
        }
    }

    /// Generate the full login history of one fresh user.
    ///
    /// Login count is uniformly distributed in `[1, config.max_logins]`; each
    /// login lands on a random day of the span at a random time of day, so
    /// several logins per day are common. Output is in generation order, not
    /// sorted.
    #[must_use]
    pub fn generate_user(&self) -> Vec<UserLogin> {
        let mut rng = self.rng.borrow_mut();

        // Build UUID from raw random bytes so seeded runs are reproducible.
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let user_id = uuid::Builder::from_random_bytes(bytes).into_uuid();

        let midnight = self.config.start.and_time(chrono::NaiveTime::MIN);
        let count = rng.random_range(1..=self.config.max_logins);
        let mut history = Vec::with_capacity(count);
        for _ in 0..count {
            let day = i64::from(rng.random_range(0..self.config.span_days));
            let second = rng.random_range(0..SECONDS_PER_DAY);
            let timestamp = midnight + TimeDelta::days(day) + TimeDelta::seconds(second);
            history.push(UserLogin {
                user_id,
                event: LoginEvent::new(timestamp),
            });
        }
        history
    }

    /// Generate one user and write their history to `log`.
    ///
    /// # Errors
    ///
    /// Propagates any [`LoginLogError`] wrapped in [`ProducerError::LoginLog`].
    pub fn produce_once<L: LoginLog>(&self, log: &L) -> Result<(), ProducerError> {
        let batch = self.generate_user();
        tracing::debug!(logins = batch.len(), "producer.user.generated");
        log.write_batch(batch)?;
        Ok(())
    }

    /// Write `config.users` histories to `log`.
    ///
    /// Returns the number of users written.
    ///
    /// # Errors
    ///
    /// Stops at the first failed write and returns [`ProducerError::LoginLog`].
    pub fn run<L: LoginLog>(&self, log: &L) -> Result<usize, ProducerError> {
        for written in 0..self.config.users {
            if let Err(e) = self.produce_once(log) {
                tracing::warn!(written, error = %e, "producer.run.failed");
                return Err(e);
            }
        }
        tracing::info!(users = self.config.users, "producer.run.stopped");
        Ok(self.config.users)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
