//! Date constraints: bounds, exclude/include lists and intervals, and a filter predicate.
//!
//! Every field is optional; an absent field never disables anything.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::widgets::shared::calendar::Granularity;

/// Host predicate; returning `false` disables the date.
pub type DateFilter = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedDate {
    pub date: NaiveDate,
    /// Shown to the user as the reason the day is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExcludedDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<NaiveDate> for ExcludedDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

/// Inclusive on both ends. A reversed interval contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Clone, Default)]
pub struct DateConstraints {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub exclude_dates: Vec<ExcludedDate>,
    pub exclude_date_intervals: Vec<DateInterval>,
    pub include_dates: Vec<NaiveDate>,
    pub include_date_intervals: Vec<DateInterval>,
    pub filter_date: Option<DateFilter>,
}

impl fmt::Debug for DateConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateConstraints")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("exclude_dates", &self.exclude_dates)
            .field("exclude_date_intervals", &self.exclude_date_intervals)
            .field("include_dates", &self.include_dates)
            .field("include_date_intervals", &self.include_date_intervals)
            .field("filter_date", &self.filter_date.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl DateConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn with_max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn with_excluded(mut self, entry: impl Into<ExcludedDate>) -> Self {
        self.exclude_dates.push(entry.into());
        self
    }

    pub fn with_excluded_interval(mut self, interval: DateInterval) -> Self {
        self.exclude_date_intervals.push(interval);
        self
    }

    pub fn with_included(mut self, date: NaiveDate) -> Self {
        self.include_dates.push(date);
        self
    }

    pub fn with_included_interval(mut self, interval: DateInterval) -> Self {
        self.include_date_intervals.push(interval);
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(NaiveDate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter_date = Some(Arc::new(filter));
        self
    }

    /// True when `date` violates any constraint.
    pub fn is_day_disabled(&self, date: NaiveDate) -> bool {
        self.is_out_of_bounds(date)
            || self.is_day_excluded(date)
            || self.fails_include_dates(date)
            || self.fails_include_intervals(date)
            || self.fails_filter(date)
    }

    /// Exclude lists and intervals only.
    pub fn is_day_excluded(&self, date: NaiveDate) -> bool {
        self.exclude_dates.iter().any(|entry| entry.date == date)
            || self
                .exclude_date_intervals
                .iter()
                .any(|interval| interval.contains(date))
    }

    /// Message of the first exclude entry matching `date`.
    pub fn exclusion_message(&self, date: NaiveDate) -> Option<&str> {
        self.exclude_dates
            .iter()
            .find(|entry| entry.date == date)
            .and_then(|entry| entry.message.as_deref())
    }

    /// Month-level check for month-grid cells; `label` is any day in the month.
    ///
    /// Months are only checked when a bound, exclude list or include list is
    /// set; a lone `filter_date` never disables a month.
    pub fn is_month_disabled(&self, label: NaiveDate) -> bool {
        self.has_month_constraints() && self.is_unit_disabled(label, Granularity::Month)
    }

    /// Quarter-level check for quarter-grid cells; `label` is any day in the quarter.
    pub fn is_quarter_disabled(&self, label: NaiveDate) -> bool {
        self.is_unit_disabled(label, Granularity::Quarter)
    }

    fn has_month_constraints(&self) -> bool {
        self.min_date.is_some()
            || self.max_date.is_some()
            || !self.exclude_dates.is_empty()
            || !self.include_dates.is_empty()
    }

    fn is_unit_disabled(&self, label: NaiveDate, unit: Granularity) -> bool {
        let at = unit.ordinal(label);
        let before_min = self.min_date.is_some_and(|min| at < unit.ordinal(min));
        let after_max = self.max_date.is_some_and(|max| at > unit.ordinal(max));
        let excluded = self
            .exclude_dates
            .iter()
            .any(|entry| unit.same(entry.date, label));
        let not_included = !self.include_dates.is_empty()
            && !self.include_dates.iter().any(|date| unit.same(*date, label));
        before_min || after_max || excluded || not_included || self.fails_filter(label)
    }

    fn is_out_of_bounds(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min) || self.max_date.is_some_and(|max| date > max)
    }

    fn fails_include_dates(&self, date: NaiveDate) -> bool {
        !self.include_dates.is_empty() && !self.include_dates.contains(&date)
    }

    fn fails_include_intervals(&self, date: NaiveDate) -> bool {
        !self.include_date_intervals.is_empty()
            && !self
                .include_date_intervals
                .iter()
                .any(|interval| interval.contains(date))
    }

    fn fails_filter(&self, date: NaiveDate) -> bool {
        self.filter_date.as_ref().is_some_and(|filter| !filter(date))
    }
}

/// Convenience for filters built from weekday lists.
pub fn weekday_filter(blocked: Vec<chrono::Weekday>) -> DateFilter {
    use chrono::Datelike;
    Arc::new(move |date: NaiveDate| !blocked.contains(&date.weekday()))
}
