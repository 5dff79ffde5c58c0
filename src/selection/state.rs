// src/selection/state.rs
use crate::config::SelectionLimits;
use crate::error::{AddError, SubmissionError};
use crate::filters::validator::FormatValidator;
use crate::selection::serialize::join_symbols;
use crate::selection::status::{BandPolicy, SelectionStatus, StatusPolicy};
use log::debug;
use serde::Serialize;
use std::fmt;

pub type SubscriptionId = u64;

/// What happened to the selection. Sent to observers with the resulting snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionChange {
    Added { symbol: String },
    Removed { symbol: String },
    /// A bulk load replaced the selection. One notification per load.
    Reloaded { loaded: usize, dropped: usize },
}

/// Read-only copy of the selection handed to observers and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub symbols: Vec<String>,
    pub count: usize,
    pub status: SelectionStatus,
    pub submittable: bool,
    #[serde(flatten)]
    pub limits: SelectionLimits,
}

impl SelectionSnapshot {
    pub fn serialized(&self) -> String {
        join_symbols(&self.symbols)
    }

    pub fn at_capacity(&self) -> bool {
        self.count >= self.limits.max_selection()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = FormatValidator::normalize(symbol);
        self.symbols.iter().any(|s| *s == symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub count: usize,
    pub state: SelectionStatus,
}

/// Outcome of a best-effort bulk load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkLoadReport {
    pub loaded: Vec<String>,
    pub rejected: Vec<(String, AddError)>,
}

pub trait SelectionObserver: Send + Sync {
    fn on_change(&self, change: &SelectionChange, snapshot: &SelectionSnapshot);

    /// `false` once the observer can no longer receive anything. Inactive
    /// observers are dropped before the next notification.
    fn is_active(&self) -> bool {
        true
    }
}

impl<F> SelectionObserver for F
where
    F: Fn(&SelectionChange, &SelectionSnapshot) + Send + Sync,
{
    fn on_change(&self, change: &SelectionChange, snapshot: &SelectionSnapshot) {
        self(change, snapshot)
    }
}

/// Sole owner of the ordered, deduplicated, bounded symbol list.
///
/// Every member has passed [`FormatValidator`], no two members are equal and
/// the length never exceeds `max_selection`. Rejected operations leave the
/// list untouched and send no notification.
pub struct SelectionStateMachine {
    symbols: Vec<String>,
    limits: SelectionLimits,
    policy: Box<dyn StatusPolicy>,
    observers: Vec<(SubscriptionId, Box<dyn SelectionObserver>)>,
    next_subscription: SubscriptionId,
}

impl fmt::Debug for SelectionStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStateMachine")
            .field("symbols", &self.symbols)
            .field("limits", &self.limits)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for SelectionStateMachine {
    fn default() -> Self {
        Self::new(SelectionLimits::default())
    }
}

impl SelectionStateMachine {
    pub fn new(limits: SelectionLimits) -> Self {
        Self::with_policy(limits, BandPolicy::default())
    }

    pub fn with_policy(limits: SelectionLimits, policy: impl StatusPolicy + 'static) -> Self {
        Self {
            symbols: Vec::new(),
            limits,
            policy: Box::new(policy),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn limits(&self) -> SelectionLimits {
        self.limits
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = FormatValidator::normalize(symbol);
        self.symbols.iter().any(|s| *s == symbol)
    }

    pub fn is_full(&self) -> bool {
        self.symbols.len() >= self.limits.max_selection()
    }

    pub fn add(&mut self, raw_symbol: &str) -> Result<(), AddError> {
        let symbol = self.try_push(raw_symbol)?;
        self.notify(&SelectionChange::Added { symbol });
        Ok(())
    }

    /// Removes `symbol` if present. Returns whether anything changed.
    pub fn remove(&mut self, symbol: &str) -> bool {
        let symbol = FormatValidator::normalize(symbol);
        let Some(position) = self.symbols.iter().position(|s| *s == symbol) else {
            return false;
        };
        self.symbols.remove(position);
        self.notify(&SelectionChange::Removed { symbol });
        true
    }

    /// Replaces the selection with `symbols`, keeping whatever passes the
    /// usual `add` checks in order and dropping the rest.
    pub fn bulk_load<I, S>(&mut self, symbols: I) -> BulkLoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.symbols.clear();
        let mut report = BulkLoadReport::default();

        for raw in symbols {
            let raw = raw.as_ref();
            match self.try_push(raw) {
                Ok(symbol) => report.loaded.push(symbol),
                Err(err) => {
                    debug!("Bulk load dropped {:?}: {}", raw, err);
                    report.rejected.push((raw.to_string(), err));
                }
            }
        }

        self.notify(&SelectionChange::Reloaded {
            loaded: report.loaded.len(),
            dropped: report.rejected.len(),
        });
        report
    }

    pub fn clear(&mut self) {
        self.bulk_load(std::iter::empty::<&str>());
    }

    pub fn status(&self) -> StatusReport {
        let count = self.symbols.len();
        StatusReport {
            count,
            state: self.policy.classify(count, &self.limits),
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.limits.contains(self.symbols.len())
    }

    /// The gate in front of the downstream computation.
    pub fn validate_submission(&self) -> Result<Vec<String>, SubmissionError> {
        let count = self.symbols.len();
        if count < self.limits.min_selection() {
            return Err(SubmissionError::BelowMinimum {
                count,
                min: self.limits.min_selection(),
            });
        }
        if count > self.limits.max_selection() {
            return Err(SubmissionError::AboveMaximum {
                count,
                max: self.limits.max_selection(),
            });
        }
        Ok(self.symbols.clone())
    }

    /// Symbols joined by `", "` in insertion order.
    pub fn serialized(&self) -> String {
        join_symbols(&self.symbols)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        let status = self.status();
        SelectionSnapshot {
            symbols: self.symbols.clone(),
            count: status.count,
            status: status.state,
            submittable: self.is_submittable(),
            limits: self.limits,
        }
    }

    pub fn subscribe(&mut self, observer: impl SelectionObserver + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Drops observers that report themselves inactive. Returns how many went.
    pub fn prune_observers(&mut self) -> usize {
        let before = self.observers.len();
        self.observers.retain(|(_, observer)| observer.is_active());
        let pruned = before - self.observers.len();
        if pruned > 0 {
            debug!("Pruned {} inactive selection observers", pruned);
        }
        pruned
    }

    fn try_push(&mut self, raw_symbol: &str) -> Result<String, AddError> {
        let symbol = FormatValidator::validate(raw_symbol)?;
        if self.symbols.contains(&symbol) {
            return Err(AddError::Duplicate(symbol));
        }
        if self.is_full() {
            return Err(AddError::CapacityExceeded {
                max: self.limits.max_selection(),
            });
        }
        self.symbols.push(symbol.clone());
        Ok(symbol)
    }

    fn notify(&mut self, change: &SelectionChange) {
        self.prune_observers();
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in &self.observers {
            observer.on_change(change, &snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use std::sync::{Arc, Mutex};

    fn filled(count: usize) -> SelectionStateMachine {
        let mut machine = SelectionStateMachine::default();
        for i in 0..count {
            machine.add(&format!("T{}", i)).unwrap();
        }
        machine
    }

    #[test]
    fn starts_empty_below_minimum() {
        let machine = SelectionStateMachine::default();
        assert!(machine.is_empty());
        assert_eq!(machine.status().state, SelectionStatus::BelowMinimum);
        assert!(!machine.is_submittable());
    }

    #[test]
    fn add_normalizes_and_appends_in_order() {
        let mut machine = SelectionStateMachine::default();
        machine.add(" msft").unwrap();
        machine.add("aapl ").unwrap();
        assert_eq!(machine.symbols(), ["MSFT", "AAPL"]);
        assert_eq!(machine.serialized(), "MSFT, AAPL");
    }

    #[test]
    fn add_rejects_bad_format_duplicates_and_overflow() {
        let mut machine = SelectionStateMachine::default();
        assert_eq!(
            machine.add("BAD!!!"),
            Err(AddError::InvalidFormat(FormatError::InvalidCharacters))
        );
        assert_eq!(
            machine.add("  "),
            Err(AddError::InvalidFormat(FormatError::EmptySymbol))
        );
        machine.add("AAPL").unwrap();
        assert_eq!(machine.add("aapl"), Err(AddError::Duplicate("AAPL".into())));
        assert_eq!(machine.symbols(), ["AAPL"]);

        let mut full = filled(30);
        assert_eq!(full.add("EXTRA"), Err(AddError::CapacityExceeded { max: 30 }));
        assert_eq!(full.len(), 30);
    }

    #[test]
    fn duplicate_is_reported_before_capacity() {
        let mut full = filled(30);
        assert_eq!(full.add("t0"), Err(AddError::Duplicate("T0".into())));
    }

    #[test]
    fn remove_keeps_relative_order_and_ignores_absent_symbols() {
        let mut machine = SelectionStateMachine::default();
        for symbol in ["A", "B", "C"] {
            machine.add(symbol).unwrap();
        }
        assert!(machine.remove("b"));
        assert_eq!(machine.symbols(), ["A", "C"]);

        assert!(!machine.remove("ZZZ"));
        assert_eq!(machine.symbols(), ["A", "C"]);
    }

    #[test]
    fn bulk_load_is_best_effort() {
        let mut machine = SelectionStateMachine::default();
        machine.add("OLD").unwrap();

        let report = machine.bulk_load(["AAPL", "aapl", "BAD!!!", "MSFT"]);
        assert_eq!(machine.symbols(), ["AAPL", "MSFT"]);
        assert_eq!(report.loaded, vec!["AAPL", "MSFT"]);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].1, AddError::Duplicate("AAPL".into()));
        assert_eq!(
            report.rejected[1].1,
            AddError::InvalidFormat(FormatError::InvalidCharacters)
        );
    }

    #[test]
    fn bulk_load_truncates_at_capacity() {
        let limits = SelectionLimits::new(1, 3).unwrap();
        let mut machine = SelectionStateMachine::new(limits);
        let report = machine.bulk_load(["A", "B", "C", "D", "E"]);
        assert_eq!(machine.symbols(), ["A", "B", "C"]);
        assert_eq!(report.rejected.len(), 2);
        assert!(report
            .rejected
            .iter()
            .all(|(_, err)| *err == AddError::CapacityExceeded { max: 3 }));
    }

    #[test]
    fn status_follows_count() {
        assert_eq!(filled(4).status().state, SelectionStatus::BelowMinimum);
        assert_eq!(filled(5).status().state, SelectionStatus::MinimumReached);
        assert_eq!(filled(8).status().state, SelectionStatus::OptimalRange);
        assert_eq!(filled(29).status().state, SelectionStatus::NearCapacity);
        assert_eq!(filled(30).status().state, SelectionStatus::CapacityReached);
    }

    #[test]
    fn submittable_exactly_within_bounds() {
        for count in 0..=30 {
            let machine = filled(count);
            assert_eq!(machine.is_submittable(), (5..=30).contains(&count), "count {}", count);
        }
        assert_eq!(
            filled(3).validate_submission(),
            Err(SubmissionError::BelowMinimum { count: 3, min: 5 })
        );
        assert_eq!(filled(5).validate_submission().unwrap().len(), 5);
    }

    #[test]
    fn observers_see_each_change_with_a_fresh_snapshot() {
        let seen: Arc<Mutex<Vec<(SelectionChange, usize)>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let mut machine = SelectionStateMachine::default();
        machine.subscribe(move |change: &SelectionChange, snapshot: &SelectionSnapshot| {
            sink.lock().unwrap().push((change.clone(), snapshot.count));
        });

        machine.add("AAPL").unwrap();
        let _ = machine.add("AAPL");
        machine.remove("MSFT");
        machine.bulk_load(["MSFT", "NVDA", "??"]);
        machine.remove("MSFT");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (SelectionChange::Added { symbol: "AAPL".into() }, 1),
                (SelectionChange::Reloaded { loaded: 2, dropped: 1 }, 2),
                (SelectionChange::Removed { symbol: "MSFT".into() }, 1),
            ]
        );
    }

    #[test]
    fn unsubscribed_observers_stop_receiving() {
        let hits: Arc<Mutex<usize>> = Arc::default();
        let sink = Arc::clone(&hits);

        let mut machine = SelectionStateMachine::default();
        let id = machine.subscribe(move |_: &SelectionChange, _: &SelectionSnapshot| {
            *sink.lock().unwrap() += 1;
        });
        machine.add("AAPL").unwrap();
        assert!(machine.unsubscribe(id));
        assert!(!machine.unsubscribe(id));
        machine.add("MSFT").unwrap();

        assert_eq!(*hits.lock().unwrap(), 1);
    }

    struct Toggle {
        active: Arc<Mutex<bool>>,
        hits: Arc<Mutex<usize>>,
    }

    impl SelectionObserver for Toggle {
        fn on_change(&self, _: &SelectionChange, _: &SelectionSnapshot) {
            *self.hits.lock().unwrap() += 1;
        }

        fn is_active(&self) -> bool {
            *self.active.lock().unwrap()
        }
    }

    #[test]
    fn inactive_observers_are_dropped() {
        let active = Arc::new(Mutex::new(true));
        let hits: Arc<Mutex<usize>> = Arc::default();
        let mut machine = SelectionStateMachine::default();
        machine.subscribe(Toggle {
            active: Arc::clone(&active),
            hits: Arc::clone(&hits),
        });
        machine.subscribe(|_: &SelectionChange, _: &SelectionSnapshot| {});

        machine.add("AAPL").unwrap();
        assert_eq!(*hits.lock().unwrap(), 1);

        *active.lock().unwrap() = false;
        assert_eq!(machine.prune_observers(), 1);
        assert_eq!(machine.observer_count(), 1);

        *active.lock().unwrap() = true;
        machine.add("MSFT").unwrap();
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn notifying_skips_observers_that_went_away() {
        let active = Arc::new(Mutex::new(true));
        let hits: Arc<Mutex<usize>> = Arc::default();
        let mut machine = SelectionStateMachine::default();
        machine.subscribe(Toggle {
            active: Arc::clone(&active),
            hits: Arc::clone(&hits),
        });

        *active.lock().unwrap() = false;
        machine.add("AAPL").unwrap();
        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(machine.observer_count(), 0);
    }

    #[test]
    fn huge_configured_maximum_allocates_nothing_up_front() {
        let limits = SelectionLimits::new(5, usize::MAX / 4).unwrap();
        let mut machine = SelectionStateMachine::new(limits);
        assert!(machine.is_empty());
        machine.add("AAPL").unwrap();
        assert_eq!(machine.status().state, SelectionStatus::BelowMinimum);
        assert!(!machine.is_full());
    }

    #[test]
    fn independent_machines_share_nothing() {
        let mut first = SelectionStateMachine::default();
        let second = SelectionStateMachine::default();
        first.add("AAPL").unwrap();
        assert!(second.is_empty());
    }
}
