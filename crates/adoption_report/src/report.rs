// Rust guideline compliant 2026-10-19

//! Per-user adoption pass over a `LoginHistory` port, aggregated into an
//! [`AdoptionReport`].

use adoption::AdoptedUserCheck;
use domain::LoginHistory;

/// Aggregate outcome of checking every user in a login history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdoptionReport {
    /// Users with at least one login.
    pub total_users: usize,
    /// Users that satisfy the adoption criteria.
    pub adopted_users: usize,
}

impl AdoptionReport {
    /// Share of adopted users in `[0.0, 1.0]`; `0.0` for an empty history.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "user counts stay far below 2^52"
    )]
    pub fn adoption_rate(&self) -> f64 {
        if self.total_users == 0 {
            return 0.0;
        }
        self.adopted_users as f64 / self.total_users as f64
    }
}

/// Run `check` once per user in `history`.
#[must_use]
pub fn summarize<H: LoginHistory>(history: &H, check: &AdoptedUserCheck) -> AdoptionReport {
    let mut report = AdoptionReport::default();
    for user_id in history.user_ids() {
        let events = history.events_for(user_id);
        let adopted = check.check(&events);
        tracing::debug!(%user_id, logins = events.len(), adopted, "report.user.checked");
        report.total_users += 1;
        if adopted {
            report.adopted_users += 1;
        }
    }
    report
}
