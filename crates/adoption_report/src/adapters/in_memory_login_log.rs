// Rust guideline compliant 2026-10-19

//! In-memory adapter for the `LoginLog` and `LoginHistory` ports.
//!
//! Intended for demo runs and unit tests only.
//! Returns `LoginLogError::CapacityExceeded` when the configured capacity is exceeded.
//! `LoginLogError::Unavailable` is never returned by this adapter.

use std::cell::RefCell;
use std::collections::BTreeMap;

use domain::{LoginEvent, LoginHistory, LoginLog, LoginLogError, UserLogin};
use uuid::Uuid;

/// Login log backed by a per-user `BTreeMap`.
///
/// Logins written via [`LoginLog::write_batch`] are grouped by user on
/// arrival, so [`LoginHistory::user_ids`] comes out sorted for free.
#[derive(Debug)]
pub struct InMemoryLoginLog {
    inner: RefCell<BTreeMap<Uuid, Vec<LoginEvent>>>,
    /// Maximum number of logins the log can hold, across all users.
    capacity: usize,
    len: RefCell<usize>,
}

impl InMemoryLoginLog {
    /// Create an empty log with the given `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RefCell::new(BTreeMap::new()),
            capacity,
            len: RefCell::new(0),
        }
    }

    /// Total number of stored logins.
    #[must_use]
    pub fn len(&self) -> usize {
        *self.len.borrow()
    }
}

impl LoginLog for InMemoryLoginLog {
    /// Append `batch`, grouping by user.
    ///
    /// # Errors
    ///
    /// Returns `LoginLogError::CapacityExceeded` when `current_count + batch.len()`
    /// exceeds the configured capacity. Nothing from the batch is stored then.
    fn write_batch(&self, batch: Vec<UserLogin>) -> Result<(), LoginLogError> {
        let mut len = self.len.borrow_mut();
        if *len + batch.len() > self.capacity {
            return Err(LoginLogError::CapacityExceeded { capacity: self.capacity });
        }
        *len += batch.len();

        let mut inner = self.inner.borrow_mut();
        for login in batch {
            inner.entry(login.user_id).or_default().push(login.event);
        }
        Ok(())
    }
}

impl LoginHistory for InMemoryLoginLog {
    fn user_ids(&self) -> Vec<Uuid> {
        self.inner.borrow().keys().copied().collect()
    }

    fn events_for(&self, user_id: Uuid) -> Vec<LoginEvent> {
        self.inner.borrow().get(&user_id).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
