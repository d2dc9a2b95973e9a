// Rust guideline compliant 2026-10-19

//! Shared domain types for the adopted-user check.
//!
//! Defines `LoginEvent`, `LoginDateSet`, `UserLogin`, the error enums, and the
//! hexagonal port traits `LoginLog` and `LoginHistory`.
//! Every other crate in the workspace depends on this one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::BTreeSet;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// LoginEvent
// ---------------------------------------------------------------------------

/// A single login, reduced to the one attribute the adoption check needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoginEvent {
    /// Wall-clock time of the login.
    pub timestamp: NaiveDateTime,
}

impl LoginEvent {
    /// Create an event at `timestamp`.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self { timestamp }
    }

    /// Calendar date of the login, time-of-day discarded.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

impl From<NaiveDateTime> for LoginEvent {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp)
    }
}

impl From<DateTime<Utc>> for LoginEvent {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp.naive_utc())
    }
}

/// Offset-less layouts accepted by [`LoginEvent::from_str`], tried in order.
///
/// `%.f` also matches an absent fraction.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl FromStr for LoginEvent {
    type Err = AdoptionError;

    /// Parse a timestamp in one of the supported text forms.
    ///
    /// Accepted, in order: RFC 3339 with offset (date taken in that offset),
    /// `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD`,
    /// and integer Unix epoch seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::InvalidTimestamp`] when no form matches.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::new(dt.naive_local()));
        }
        for layout in NAIVE_LAYOUTS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, layout) {
                return Ok(Self::new(ts));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self::new(date.and_time(NaiveTime::MIN)));
        }
        if let Some(dt) = raw
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
        {
            return Ok(Self::from(dt));
        }

        Err(AdoptionError::InvalidTimestamp { value: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// LoginDateSet
// ---------------------------------------------------------------------------

/// Distinct calendar dates on which at least one login occurred.
///
/// Always strictly ascending: duplicates are collapsed on construction and
/// there is no way to insert afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDateSet {
    dates: Vec<NaiveDate>,
}

impl LoginDateSet {
    /// Reduce `events` to their distinct login dates. Input order is irrelevant.
    #[must_use]
    pub fn from_events(events: &[LoginEvent]) -> Self {
        events.iter().map(LoginEvent::date).collect()
    }

    /// Number of distinct login days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` when no login was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The dates, ascending.
    #[must_use]
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Iterate the dates in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for LoginDateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        // BTreeSet both deduplicates and sorts.
        let unique: BTreeSet<NaiveDate> = iter.into_iter().collect();
        Self { dates: unique.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a LoginDateSet {
    type Item = &'a NaiveDate;
    type IntoIter = std::slice::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// UserLogin
// ---------------------------------------------------------------------------

/// A login event attributed to a user, as stored by a [`LoginLog`] adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLogin {
    /// Owner of the login.
    pub user_id: uuid::Uuid,
    /// The login itself.
    pub event: LoginEvent,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors reported by the adoption check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdoptionError {
    /// A value could not be interpreted as a point in time.
    #[error("invalid timestamp: {value:?}")]
    InvalidTimestamp {
        /// The offending input, untrimmed.
        value: String,
    },
    /// `window_days` or `required_logins` is out of range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors that a login-log implementation may return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginLogError {
    /// The log has reached its maximum capacity.
    #[error("login log full (capacity: {capacity})")]
    CapacityExceeded { capacity: usize },
    /// The backing store cannot be reached.
    #[error("login log unavailable")]
    Unavailable,
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Hexagonal port: the write side of the login log.
///
/// The producer depends exclusively on this trait -- never on a concrete adapter.
pub trait LoginLog {
    /// Append a batch of user logins.
    ///
    /// # Errors
    ///
    /// Returns `LoginLogError::CapacityExceeded` when the batch does not fit, or
    /// `LoginLogError::Unavailable` when the backing store cannot be reached.
    fn write_batch(&self, batch: Vec<UserLogin>) -> Result<(), LoginLogError>;
}

/// Hexagonal port: per-user read access to the login log.
pub trait LoginHistory {
    /// Every user with at least one login, sorted and distinct.
    fn user_ids(&self) -> Vec<uuid::Uuid>;

    /// All logins of `user_id`, in no particular order. Empty for unknown users.
    fn events_for(&self, user_id: uuid::Uuid) -> Vec<LoginEvent>;
}
