use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::terminal::KeyEvent;

// ---------------------------------------------------------------------------
// Cell identity
// ---------------------------------------------------------------------------

/// Identity of one cell on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellRef {
    Day(NaiveDate),
    /// Month index, 0-11.
    Month(u32),
    /// Quarter number, 1-4.
    Quarter(u32),
    /// Week row identified by its first day.
    Week(NaiveDate),
}

impl CellRef {
    /// Month indices are 0-11 and quarters 1-4; dates are always valid.
    pub fn is_valid(self) -> bool {
        match self {
            Self::Month(month) => month < 12,
            Self::Quarter(quarter) => (1..=4).contains(&quarter),
            Self::Day(_) | Self::Week(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell '{0}', expected day:YYYY-MM-DD, week:YYYY-MM-DD, month:0-11 or quarter:1-4")]
pub struct ParseCellError(String);

impl FromStr for CellRef {
    type Err = ParseCellError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCellError(text.to_string());
        let (kind, value) = text.split_once(':').ok_or_else(invalid)?;
        let value = value.trim();
        match kind.trim().to_ascii_lowercase().as_str() {
            "day" => value.parse().map(CellRef::Day).map_err(|_| invalid()),
            "week" => value.parse().map(CellRef::Week).map_err(|_| invalid()),
            "month" => value
                .parse::<u32>()
                .ok()
                .filter(|month| *month < 12)
                .map(CellRef::Month)
                .ok_or_else(invalid),
            "quarter" => value
                .parse::<u32>()
                .ok()
                .filter(|quarter| (1..=4).contains(quarter))
                .map(CellRef::Quarter)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key(KeyEvent),
    Pointer,
}

/// Actions emitted by the page in `InteractionResult`.
/// The host applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// New provisional date; `None` clears it.
    SetPreSelection(Option<NaiveDate>),
    /// Move UI focus to this cell.
    Focus(CellRef),
    /// Click-equivalent selection. `order_in_display` is the page's position
    /// when the host shows several months side by side.
    Commit {
        date: NaiveDate,
        trigger: Trigger,
        order_in_display: Option<usize>,
    },
    Hover(NaiveDate),
    Leave,
    /// Forwarded to the host's own key handler.
    RawKey(KeyEvent),
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    /// Default key action suppressed.
    pub handled: bool,
    pub actions: Vec<PageAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: PageAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }

    pub fn push(&mut self, action: PageAction) {
        self.actions.push(action);
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.actions.extend(other.actions);
    }

    /// Applies every action to `host`, in order.
    pub fn dispatch(self, host: &mut impl PageHost) {
        for action in self.actions {
            match action {
                PageAction::SetPreSelection(date) => host.set_pre_selection(date),
                PageAction::Focus(cell) => host.focus(cell),
                PageAction::Commit {
                    date,
                    trigger,
                    order_in_display,
                } => host.commit(date, trigger, order_in_display),
                PageAction::Hover(date) => host.hover(date),
                PageAction::Leave => host.leave(),
                PageAction::RawKey(key) => host.raw_key(key),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PageHost
// ---------------------------------------------------------------------------

/// The widget embedding a page.
pub trait PageHost {
    fn set_pre_selection(&mut self, date: Option<NaiveDate>);
    fn focus(&mut self, cell: CellRef);
    fn commit(&mut self, date: NaiveDate, trigger: Trigger, order_in_display: Option<usize>);

    fn hover(&mut self, _date: NaiveDate) {}
    fn leave(&mut self) {}
    fn raw_key(&mut self, _key: KeyEvent) {}
}

#[cfg(test)]
mod tests {
    use super::{CellRef, InteractionResult, PageAction, PageHost, Trigger};
    use crate::terminal::{KeyCode, KeyEvent};
    use chrono::NaiveDate;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl PageHost for Recorder {
        fn set_pre_selection(&mut self, date: Option<NaiveDate>) {
            self.log.push(format!("pre:{date:?}"));
        }
        fn focus(&mut self, cell: CellRef) {
            self.log.push(format!("focus:{cell:?}"));
        }
        fn commit(&mut self, date: NaiveDate, _trigger: Trigger, order: Option<usize>) {
            self.log.push(format!("commit:{date}:{order:?}"));
        }
        fn raw_key(&mut self, _key: KeyEvent) {
            self.log.push("raw".to_string());
        }
    }

    #[test]
    fn dispatch_preserves_order() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).expect("date");
        let mut result = InteractionResult::with_action(PageAction::SetPreSelection(Some(date)));
        result.push(PageAction::Focus(CellRef::Month(1)));
        result.merge(InteractionResult::with_action(PageAction::RawKey(KeyEvent::plain(
            KeyCode::Right,
        ))));
        result.push(PageAction::Commit {
            date,
            trigger: Trigger::Pointer,
            order_in_display: Some(1),
        });
        result.push(PageAction::Leave);

        let mut host = Recorder::default();
        result.dispatch(&mut host);
        assert_eq!(
            host.log,
            vec![
                "pre:Some(2024-02-01)".to_string(),
                "focus:Month(1)".to_string(),
                "raw".to_string(),
                "commit:2024-02-01:Some(1)".to_string(),
            ]
        );
    }

    #[test]
    fn cells_parse_from_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!("day:2024-03-09".parse(), Ok(CellRef::Day(date)));
        assert_eq!("Month: 11".parse(), Ok(CellRef::Month(11)));
        assert_eq!("quarter:4".parse(), Ok(CellRef::Quarter(4)));
        assert!("month:12".parse::<CellRef>().is_err());
        assert!("quarter:0".parse::<CellRef>().is_err());
        assert!("2024-03-09".parse::<CellRef>().is_err());
    }

    #[test]
    fn merge_keeps_handled() {
        let mut result = InteractionResult::consumed();
        result.merge(InteractionResult::ignored());
        assert!(result.handled && result.actions.is_empty());
        assert!(!InteractionResult::ignored().handled);
    }

    #[test]
    fn cell_indices_are_bounded() {
        assert!(CellRef::Month(11).is_valid());
        assert!(!CellRef::Month(12).is_valid());
        assert!(!CellRef::Quarter(0).is_valid());
        assert!(CellRef::Quarter(4).is_valid());
    }
}
