//! Selection modes and range-membership predicates.
//!
//! Hosts describe selection with independent flags; they are collapsed into a
//! single [`SelectionMode`] here so the predicates never re-derive the mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::widgets::shared::calendar::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Single,
    /// The provisional date is the start; `end_date` is committed.
    RangeStart,
    /// The provisional date is the end; `start_date` is committed.
    RangeEnd,
    /// Free range: the provisional date is the end while `end_date` is open.
    Range,
    Multiple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionFlags {
    pub selects_start: bool,
    pub selects_end: bool,
    pub selects_range: bool,
    pub selects_multiple: bool,
}

impl SelectionFlags {
    /// Precedence when several flags are set: start, end, range, multiple.
    pub fn mode(self) -> SelectionMode {
        if self.selects_start {
            SelectionMode::RangeStart
        } else if self.selects_end {
            SelectionMode::RangeEnd
        } else if self.selects_range {
            SelectionMode::Range
        } else if self.selects_multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}

impl SelectionMode {
    pub fn is_ranged(self) -> bool {
        matches!(self, Self::RangeStart | Self::RangeEnd | Self::Range)
    }
}

/// Range flags of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeMarks {
    pub range_start: bool,
    pub range_end: bool,
    pub in_range: bool,
    pub in_selecting_range: bool,
    pub selecting_range_start: bool,
    pub selecting_range_end: bool,
}

/// Committed endpoints plus the live provisional endpoint.
///
/// Precondition: `start_date <= end_date` when both are set. Reversed input is
/// passed through unchanged and simply matches no cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSelection {
    pub mode: SelectionMode,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub provisional: Option<NaiveDate>,
}

impl RangeSelection {
    /// The committed range, only when both endpoints are set.
    pub fn committed(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    /// The in-progress window `(low, high)` while exactly one side is committed.
    pub fn selecting_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let provisional = self.provisional?;
        match self.mode {
            SelectionMode::RangeStart => Some((provisional, self.end_date?)),
            SelectionMode::RangeEnd => Some((self.start_date?, provisional)),
            SelectionMode::Range if self.end_date.is_none() => {
                Some((self.start_date?, provisional))
            }
            _ => None,
        }
    }

    pub fn in_range(&self, date: NaiveDate, unit: Granularity) -> bool {
        self.committed()
            .is_some_and(|(start, end)| unit.contains(start, end, date))
    }

    pub fn is_range_start(&self, date: NaiveDate, unit: Granularity) -> bool {
        self.committed()
            .is_some_and(|(start, _)| unit.same(start, date))
    }

    pub fn is_range_end(&self, date: NaiveDate, unit: Granularity) -> bool {
        self.committed().is_some_and(|(_, end)| unit.same(end, date))
    }

    pub fn in_selecting_range(&self, date: NaiveDate, unit: Granularity) -> bool {
        self.selecting_window()
            .is_some_and(|(low, high)| unit.contains(low, high, date))
    }

    /// All range flags for one cell. `blocked` suppresses the selecting-range
    /// flags (used for disabled days).
    pub fn marks(&self, date: NaiveDate, unit: Granularity, blocked: bool) -> RangeMarks {
        let mut marks = RangeMarks {
            range_start: self.is_range_start(date, unit),
            range_end: self.is_range_end(date, unit),
            in_range: self.in_range(date, unit),
            ..RangeMarks::default()
        };
        if blocked || !self.in_selecting_range(date, unit) {
            return marks;
        }
        if let Some((low, high)) = self.selecting_window() {
            marks.in_selecting_range = true;
            marks.selecting_range_start = unit.same(low, date);
            marks.selecting_range_end = unit.same(high, date);
        }
        marks
    }
}
