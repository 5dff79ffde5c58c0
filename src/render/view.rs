// src/render/view.rs
use crate::config::SelectionLimits;
use crate::error::{AddError, SubmissionError};
use crate::render::messages::Messages;
use crate::selection::state::SelectionSnapshot;
use crate::selection::status::SelectionStatus;
use crate::symbols::catalog::CatalogIndex;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chip {
    pub symbol: String,
    /// Catalog name, absent for free-text symbols.
    pub display_name: Option<String>,
    pub remove_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickPick {
    pub symbol: String,
    pub enabled: bool,
}

/// Everything a front end needs to draw the picker. Pure data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub chips: Vec<Chip>,
    pub hidden_value: String,
    pub count: usize,
    pub counter_text: String,
    pub status: SelectionStatus,
    /// The transient warning while it is live, otherwise the status label.
    pub status_text: String,
    pub notice_active: bool,
    pub empty_text: Option<String>,
    pub input_enabled: bool,
    pub input_placeholder: String,
    pub quick_picks: Vec<QuickPick>,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

/// Projects selection snapshots into [`SelectionView`]s.
///
/// Warnings are shown until their deadline passes; a newer warning replaces
/// an older one outright, so rendering at any instant is idempotent.
#[derive(Debug, Clone)]
pub struct RenderAdapter {
    messages: Messages,
    quick_pick_symbols: Vec<String>,
    notice_duration: Duration,
    notice: Option<Notice>,
}

impl RenderAdapter {
    pub fn new(
        messages: Messages,
        quick_pick_symbols: Vec<String>,
        notice_duration: Duration,
    ) -> Self {
        Self {
            messages,
            quick_pick_symbols,
            notice_duration,
            notice: None,
        }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn flash(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            expires_at: now + self.notice_duration,
        });
    }

    pub fn flash_add_error(&mut self, err: &AddError, limits: &SelectionLimits, now: Instant) {
        let text = self.messages.add_error(err, limits);
        self.flash(text, now);
    }

    pub fn flash_submission_error(
        &mut self,
        err: &SubmissionError,
        limits: &SelectionLimits,
        now: Instant,
    ) {
        let text = self.messages.submission_error(err, limits);
        self.flash(text, now);
    }

    /// Drops any pending warning. Called after a successful mutation so the
    /// new status shows straight away.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn active_notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.text.as_str())
    }

    pub fn render(
        &self,
        snapshot: &SelectionSnapshot,
        catalog: &CatalogIndex,
        now: Instant,
    ) -> SelectionView {
        let limits = snapshot.limits;
        let at_capacity = snapshot.at_capacity();

        let chips = snapshot
            .symbols
            .iter()
            .map(|symbol| Chip {
                symbol: symbol.clone(),
                display_name: catalog.get(symbol).map(|entry| entry.display_name.clone()),
                remove_label: self.messages.remove_ticker.clone(),
            })
            .collect();

        let quick_picks = self
            .quick_pick_symbols
            .iter()
            .map(|symbol| QuickPick {
                symbol: symbol.clone(),
                enabled: !at_capacity && !snapshot.contains(symbol),
            })
            .collect();

        let notice = self.active_notice(now);
        let status_text = match notice {
            Some(text) => text.to_string(),
            None => self.messages.status_label(snapshot.status, &limits),
        };

        SelectionView {
            chips,
            hidden_value: snapshot.serialized(),
            count: snapshot.count,
            counter_text: self.messages.counter(snapshot.count, &limits),
            status: snapshot.status,
            status_text,
            notice_active: notice.is_some(),
            empty_text: (snapshot.count == 0).then(|| self.messages.no_tickers.clone()),
            input_enabled: !at_capacity,
            input_placeholder: self.messages.placeholder(at_capacity, &limits),
            quick_picks,
            submit_enabled: snapshot.submittable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::state::SelectionStateMachine;
    use crate::symbols::catalog::CatalogEntry;

    fn adapter() -> RenderAdapter {
        RenderAdapter::new(
            Messages::english(),
            vec!["AAPL".into(), "MSFT".into()],
            Duration::from_secs(3),
        )
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::build(vec![CatalogEntry::new("AAPL", "Apple Inc.")])
    }

    #[test]
    fn chips_follow_insertion_order_with_catalog_names() {
        let mut machine = SelectionStateMachine::default();
        machine.add("ZZZ1").unwrap();
        machine.add("aapl").unwrap();

        let view = adapter().render(&machine.snapshot(), &catalog(), Instant::now());
        assert_eq!(view.hidden_value, "ZZZ1, AAPL");
        assert_eq!(view.chips[0].display_name, None);
        assert_eq!(view.chips[1].display_name.as_deref(), Some("Apple Inc."));
        assert_eq!(view.counter_text, "2 of 5-30 tickers selected");
        assert_eq!(view.status_text, "Minimum 5 tickers required");
        assert!(!view.submit_enabled);
        assert!(view.empty_text.is_none());
    }

    #[test]
    fn quick_picks_disable_for_selected_symbols() {
        let mut machine = SelectionStateMachine::default();
        machine.add("AAPL").unwrap();

        let view = adapter().render(&machine.snapshot(), &catalog(), Instant::now());
        assert_eq!(
            view.quick_picks,
            vec![
                QuickPick { symbol: "AAPL".into(), enabled: false },
                QuickPick { symbol: "MSFT".into(), enabled: true },
            ]
        );
    }

    #[test]
    fn full_selection_disables_input_and_quick_picks() {
        let limits = SelectionLimits::new(1, 2).unwrap();
        let mut machine = SelectionStateMachine::new(limits);
        machine.bulk_load(["KO", "PEP"]);

        let view = adapter().render(&machine.snapshot(), &catalog(), Instant::now());
        assert!(!view.input_enabled);
        assert_eq!(view.input_placeholder, "Maximum of 2 tickers reached");
        assert!(view.quick_picks.iter().all(|pick| !pick.enabled));
        assert_eq!(view.status, SelectionStatus::CapacityReached);
    }

    #[test]
    fn notice_reverts_to_status_after_deadline() {
        let machine = SelectionStateMachine::default();
        let mut adapter = adapter();
        let start = Instant::now();

        adapter.flash_add_error(&AddError::Duplicate("AAPL".into()), &machine.limits(), start);
        let during =
            adapter.render(&machine.snapshot(), &catalog(), start + Duration::from_secs(1));
        assert_eq!(during.status_text, "AAPL is already in the list");
        assert!(during.notice_active);

        let after = adapter.render(&machine.snapshot(), &catalog(), start + Duration::from_secs(3));
        assert_eq!(after.status_text, "Minimum 5 tickers required");
        assert!(!after.notice_active);
    }

    #[test]
    fn newer_notice_overwrites_older_one() {
        let machine = SelectionStateMachine::default();
        let mut adapter = adapter();
        let start = Instant::now();

        adapter.flash_add_error(&AddError::Duplicate("AAPL".into()), &machine.limits(), start);
        adapter.flash_add_error(
            &AddError::CapacityExceeded { max: 30 },
            &machine.limits(),
            start + Duration::from_secs(2),
        );

        // The first deadline has passed but the second has not.
        let view = adapter.render(&machine.snapshot(), &catalog(), start + Duration::from_secs(4));
        assert_eq!(view.status_text, "Maximum 30 tickers allowed");
    }

    #[test]
    fn empty_selection_shows_placeholder_text() {
        let machine = SelectionStateMachine::default();
        let view = adapter().render(&machine.snapshot(), &catalog(), Instant::now());
        assert_eq!(view.empty_text.as_deref(), Some("No tickers selected"));
        assert_eq!(view.hidden_value, "");
    }
}
