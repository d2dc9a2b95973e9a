// Rust guideline compliant 2026-10-19

//! Adopted-user check.
//!
//! A user is *adopted* when they logged in on at least `required_logins`
//! distinct calendar days within some rolling window of `window_days` days.
//!
//! Entry points: [`is_adopted`], [`is_adopted_with`], [`is_adopted_raw`] and
//! the [`AdoptedUserCheck`] wrapper. Parameters via [`AdoptionCriteria::builder`].
//!
//! The check is pure: no I/O, no shared state, safe to call from any thread.

use domain::{AdoptionError, LoginDateSet, LoginEvent};

/// Default rolling-window length, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Default number of distinct login days required inside the window.
pub const DEFAULT_REQUIRED_LOGINS: u32 = 3;

// ---------------------------------------------------------------------------
// AdoptionCriteria + builder
// ---------------------------------------------------------------------------

/// Validated parameters of the adoption check.
///
/// Construct via [`AdoptionCriteria::builder`], [`AdoptionCriteria::new`], or
/// `Default` (7-day window, 3 login days). Both values are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdoptionCriteria {
    window_days: u32,
    required_logins: u32,
}

/// Builder for [`AdoptionCriteria`].
///
/// Obtain via [`AdoptionCriteria::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct AdoptionCriteriaBuilder {
    window_days: u32,
    required_logins: u32,
}

impl AdoptionCriteria {
    /// Create a builder with default values.
    ///
    /// Default values: `window_days = 7`, `required_logins = 3`.
    #[must_use]
    pub fn builder() -> AdoptionCriteriaBuilder {
        AdoptionCriteriaBuilder {
            window_days: DEFAULT_WINDOW_DAYS,
            required_logins: DEFAULT_REQUIRED_LOGINS,
        }
    }

    /// Validate both parameters at once.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::InvalidParameter`] when either value is zero.
    pub fn new(window_days: u32, required_logins: u32) -> Result<Self, AdoptionError> {
        Self::builder()
            .window_days(window_days)
            .required_logins(required_logins)
            .build()
    }

    /// Length of the rolling window, in days.
    #[must_use]
    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Distinct login days required inside one window.
    #[must_use]
    pub fn required_logins(&self) -> u32 {
        self.required_logins
    }
}

impl Default for AdoptionCriteria {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            required_logins: DEFAULT_REQUIRED_LOGINS,
        }
    }
}

impl AdoptionCriteriaBuilder {
    /// Override the window length.
    #[must_use]
    pub fn window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    /// Override the number of distinct login days required.
    ///
    /// A value of 1 is accepted and reduces the check to "has any login".
    #[must_use]
    pub fn required_logins(mut self, required_logins: u32) -> Self {
        self.required_logins = required_logins;
        self
    }

    /// Validate and build the criteria.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::InvalidParameter`] when `window_days` or
    /// `required_logins` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<AdoptionCriteria, AdoptionError> {
        if self.window_days == 0 {
            return Err(AdoptionError::InvalidParameter {
                reason: "window_days must be >= 1".to_owned(),
            });
        }
        if self.required_logins == 0 {
            return Err(AdoptionError::InvalidParameter {
                reason: "required_logins must be >= 1".to_owned(),
            });
        }
        Ok(AdoptionCriteria {
            window_days: self.window_days,
            required_logins: self.required_logins,
        })
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Scan `dates` for `required_logins` consecutive entries spanning at most
/// `window_days` days.
///
/// Each date is compared with the one `required_logins - 1` positions earlier;
/// a gap exactly equal to `window_days` counts. Fewer than `required_logins`
/// dates never match. With `required_logins == 1` every date matches itself,
/// so the result is `!dates.is_empty()`.
#[must_use]
pub fn has_dense_window(dates: &LoginDateSet, criteria: &AdoptionCriteria) -> bool {
    // A count that does not fit in usize can never be reached.
    let Ok(span) = usize::try_from(criteria.required_logins) else {
        return false;
    };
    let window = i64::from(criteria.window_days);

    dates.as_slice().windows(span).any(|w| match (w.first(), w.last()) {
        (Some(first), Some(last)) => last.signed_duration_since(*first).num_days() <= window,
        _ => false,
    })
}

/// Decide whether the user owning `events` is adopted.
///
/// `events` may be empty, unsorted, and contain several logins per day.
/// Time-of-day is discarded. See [`has_dense_window`] for the exact rule,
/// including the `required_logins == 1` case.
#[must_use]
pub fn is_adopted(events: &[LoginEvent], criteria: &AdoptionCriteria) -> bool {
    let dates = LoginDateSet::from_events(events);
    let adopted = has_dense_window(&dates, criteria);
    tracing::trace!(
        events = events.len(),
        distinct_days = dates.len(),
        window_days = criteria.window_days,
        required_logins = criteria.required_logins,
        adopted,
        "adoption.check"
    );
    adopted
}

/// [`is_adopted`] with unvalidated parameters.
///
/// # Errors
///
/// Returns [`AdoptionError::InvalidParameter`] when `window_days` or
/// `required_logins` is zero.
pub fn is_adopted_with(
    events: &[LoginEvent],
    window_days: u32,
    required_logins: u32,
) -> Result<bool, AdoptionError> {
    let criteria = AdoptionCriteria::new(window_days, required_logins)?;
    Ok(is_adopted(events, &criteria))
}

/// [`is_adopted`] over textual timestamps.
///
/// Every value is parsed with `LoginEvent::from_str` before the check runs.
///
/// # Errors
///
/// Returns [`AdoptionError::InvalidTimestamp`] for the first value that cannot
/// be interpreted as a point in time.
pub fn is_adopted_raw<I, S>(values: I, criteria: &AdoptionCriteria) -> Result<bool, AdoptionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let events = values
        .into_iter()
        .map(|v| v.as_ref().parse::<LoginEvent>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(is_adopted(&events, criteria))
}

// ---------------------------------------------------------------------------
// AdoptedUserCheck
// ---------------------------------------------------------------------------

/// Reusable check bound to one set of criteria.
///
/// Holds nothing but the criteria; calls share no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdoptedUserCheck {
    criteria: AdoptionCriteria,
}

impl AdoptedUserCheck {
    /// Create a check for `criteria`.
    #[must_use]
    pub fn new(criteria: AdoptionCriteria) -> Self {
        Self { criteria }
    }

    /// The criteria this check applies.
    #[must_use]
    pub fn criteria(&self) -> &AdoptionCriteria {
        &self.criteria
    }

    /// See [`is_adopted`].
    #[must_use]
    pub fn check(&self, events: &[LoginEvent]) -> bool {
        is_adopted(events, &self.criteria)
    }

    /// See [`is_adopted_raw`].
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::InvalidTimestamp`] on the first unparseable value.
    pub fn check_raw<I, S>(&self, values: I) -> Result<bool, AdoptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        is_adopted_raw(values, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use rand::seq::SliceRandom as _;
    use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

    fn at(s: &str) -> LoginEvent {
        s.parse().unwrap()
    }

    fn events(values: &[&str]) -> Vec<LoginEvent> {
        values.iter().map(|v| at(v)).collect()
    }

    fn criteria(window_days: u32, required_logins: u32) -> AdoptionCriteria {
        AdoptionCriteria::new(window_days, required_logins).unwrap()
    }

    /// Random logins over a 60-day span, several per day possible.
    fn random_events(rng: &mut StdRng) -> Vec<LoginEvent> {
        let base = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let n = rng.random_range(0..12);
        (0..n)
            .map(|_| {
                let offset = TimeDelta::days(rng.random_range(0..60))
                    + TimeDelta::seconds(rng.random_range(0..86_400));
                LoginEvent::new(base + offset)
            })
            .collect()
    }

    /// Direct reading of the definition: some login date `d` has at least
    /// `required` distinct dates in `[d, d + window]`.
    fn reference(events: &[LoginEvent], window: u32, required: u32) -> bool {
        let dates = LoginDateSet::from_events(events);
        dates.iter().any(|start| {
            let end = *start + TimeDelta::days(i64::from(window));
            let count = dates.iter().filter(|d| *d >= start && **d <= end).count();
            count >= usize::try_from(required).unwrap()
        })
    }

    // ------------------------------------------------------------------
    // AdoptionCriteria builder
    // ------------------------------------------------------------------

    #[test]
    fn criteria_defaults_are_7_and_3() {
        let c = AdoptionCriteria::builder().build().unwrap();
        assert_eq!(c.window_days(), 7);
        assert_eq!(c.required_logins(), 3);
        assert_eq!(c, AdoptionCriteria::default());
    }

    #[test]
    fn criteria_setters_override() {
        let c = AdoptionCriteria::builder()
            .window_days(14)
            .required_logins(5)
            .build()
            .unwrap();
        assert_eq!((c.window_days(), c.required_logins()), (14, 5));
    }

    #[test]
    fn criteria_zero_window_returns_err() {
        let c = AdoptionCriteria::builder().window_days(0).build();
        assert!(matches!(c, Err(AdoptionError::InvalidParameter { .. })));
    }

    #[test]
    fn criteria_zero_required_returns_err() {
        let c = AdoptionCriteria::new(7, 0);
        assert_eq!(
            c,
            Err(AdoptionError::InvalidParameter {
                reason: "required_logins must be >= 1".to_owned()
            })
        );
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    #[test]
    fn scenario_a_span_equal_to_window_is_adopted() {
        let e = events(&["2023-01-01", "2023-01-02", "2023-01-08"]);
        assert!(is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn scenario_b_spread_out_logins_are_not_adopted() {
        let e = events(&["2023-01-01", "2023-01-10", "2023-01-20"]);
        assert!(!is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn scenario_c_same_day_logins_count_once() {
        let e = events(&[
            "2023-01-01 08:00:00",
            "2023-01-01 12:00:00",
            "2023-01-01 12:00:00",
        ]);
        assert!(!is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn scenario_d_later_window_matches() {
        let e = events(&[
            "2023-01-01",
            "2023-01-05",
            "2023-01-06",
            "2023-01-06",
            "2023-01-07",
        ]);
        assert!(is_adopted(&e, &criteria(7, 3)));
    }

    // ------------------------------------------------------------------
    // Edge cases
    // ------------------------------------------------------------------

    #[test]
    fn empty_input_is_not_adopted() {
        assert!(!is_adopted(&[], &AdoptionCriteria::default()));
        assert!(!is_adopted(&[], &criteria(1, 1)));
    }

    #[test]
    fn one_day_past_the_window_is_not_adopted() {
        let e = events(&["2023-01-01", "2023-01-02", "2023-01-09"]);
        assert!(!is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn time_of_day_is_ignored_at_the_boundary() {
        // Almost 8 days apart on the clock, 7 calendar days apart.
        let e = events(&[
            "2023-01-01 00:00:01",
            "2023-01-03 12:00:00",
            "2023-01-08 23:59:59",
        ]);
        assert!(is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn unsorted_input_is_accepted() {
        let e = events(&["2023-01-08", "2023-01-01", "2023-01-02"]);
        assert!(is_adopted(&e, &criteria(7, 3)));
    }

    #[test]
    fn fewer_distinct_days_than_required_is_not_adopted() {
        let e = events(&["2023-01-01", "2023-01-02"]);
        assert!(!is_adopted(&e, &criteria(365, 3)));
    }

    #[test]
    fn required_logins_one_means_any_login() {
        assert!(is_adopted(&events(&["2020-02-29"]), &criteria(1, 1)));
        assert!(!is_adopted(&[], &criteria(1, 1)));
    }

    #[test]
    fn required_logins_two_uses_adjacent_gaps() {
        let e = events(&["2023-01-01", "2023-01-20", "2023-01-22"]);
        assert!(is_adopted(&e, &criteria(2, 2)));
        assert!(!is_adopted(&e, &criteria(1, 2)));
    }

    #[test]
    fn huge_required_logins_is_not_adopted() {
        let e = events(&["2023-01-01", "2023-01-02", "2023-01-03"]);
        assert!(!is_adopted(&e, &criteria(u32::MAX, u32::MAX)));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let e = events(&["2022-12-30", "2023-01-02", "2023-01-05"]);
        assert!(is_adopted(&e, &criteria(7, 3)));
    }

    // ------------------------------------------------------------------
    // is_adopted_with / is_adopted_raw
    // ------------------------------------------------------------------

    #[test]
    fn with_defaults_matches_default_criteria() {
        let e = events(&["2023-01-01", "2023-01-02", "2023-01-08"]);
        assert_eq!(
            is_adopted_with(&e, DEFAULT_WINDOW_DAYS, DEFAULT_REQUIRED_LOGINS),
            Ok(true)
        );
    }

    #[test]
    fn with_zero_window_is_rejected_even_for_empty_input() {
        assert!(matches!(
            is_adopted_with(&[], 0, 3),
            Err(AdoptionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn raw_accepts_mixed_formats() {
        let values = ["2023-01-01 09:15:00", "2023-01-02T10:00:00Z", "1673136000"];
        // 1673136000 is 2023-01-08 00:00:00Z.
        assert_eq!(is_adopted_raw(values, &criteria(7, 3)), Ok(true));
    }

    #[test]
    fn raw_reports_first_bad_value() {
        let values = vec![
            "2023-01-01".to_owned(),
            "not a time".to_owned(),
            "also bad".to_owned(),
        ];
        assert_eq!(
            is_adopted_raw(&values, &AdoptionCriteria::default()),
            Err(AdoptionError::InvalidTimestamp { value: "not a time".to_owned() })
        );
    }

    #[test]
    fn raw_empty_is_not_adopted() {
        assert_eq!(is_adopted_raw(Vec::<&str>::new(), &AdoptionCriteria::default()), Ok(false));
    }

    // ------------------------------------------------------------------
    // AdoptedUserCheck
    // ------------------------------------------------------------------

    #[test]
    fn check_wrapper_delegates() {
        let check = AdoptedUserCheck::new(criteria(7, 3));
        assert_eq!(check.criteria().window_days(), 7);
        assert!(check.check(&events(&["2023-01-01", "2023-01-02", "2023-01-08"])));
        assert_eq!(check.check_raw(["2023-01-01", "2023-01-10"]), Ok(false));
        assert!(matches!(
            check.check_raw(["?"]),
            Err(AdoptionError::InvalidTimestamp { .. })
        ));
    }

    // ------------------------------------------------------------------
    // Properties (seeded)
    // ------------------------------------------------------------------

    #[test]
    fn agrees_with_reference_definition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let e = random_events(&mut rng);
            let window = rng.random_range(1..=14);
            let required = rng.random_range(1..=5);
            assert_eq!(
                is_adopted(&e, &criteria(window, required)),
                reference(&e, window, required),
                "window={window} required={required} events={e:?}"
            );
        }
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut rng = StdRng::seed_from_u64(11);
        let c = AdoptionCriteria::default();
        for _ in 0..200 {
            let mut e = random_events(&mut rng);
            let expected = is_adopted(&e, &c);
            e.shuffle(&mut rng);
            assert_eq!(is_adopted(&e, &c), expected);
            e.reverse();
            assert_eq!(is_adopted(&e, &c), expected);
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let mut rng = StdRng::seed_from_u64(13);
        let c = AdoptionCriteria::default();
        for _ in 0..100 {
            let e = random_events(&mut rng);
            assert_eq!(is_adopted(&e, &c), is_adopted(&e, &c));
        }
    }

    #[test]
    fn larger_window_never_revokes_adoption() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let e = random_events(&mut rng);
            for window in 1..30 {
                if is_adopted(&e, &criteria(window, 3)) {
                    assert!(is_adopted(&e, &criteria(window + 1, 3)), "window={window}");
                }
            }
        }
    }

    #[test]
    fn more_required_logins_never_grants_adoption() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..200 {
            let e = random_events(&mut rng);
            for required in 1..10 {
                if !is_adopted(&e, &criteria(7, required)) {
                    assert!(!is_adopted(&e, &criteria(7, required + 1)), "required={required}");
                }
            }
        }
    }

    #[test]
    fn duplicate_logins_do_not_change_the_result() {
        let mut rng = StdRng::seed_from_u64(23);
        let c = AdoptionCriteria::default();
        for _ in 0..100 {
            let e = random_events(&mut rng);
            let mut doubled = e.clone();
            doubled.extend(e.iter().map(|ev| {
                LoginEvent::new(NaiveDateTime::new(ev.date(), chrono::NaiveTime::MIN))
            }));
            assert_eq!(is_adopted(&doubled, &c), is_adopted(&e, &c));
        }
    }
}
