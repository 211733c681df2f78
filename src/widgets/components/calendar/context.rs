use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::widgets::shared::calendar::{self, Locale};
use crate::widgets::shared::constraints::DateConstraints;
use crate::widgets::shared::range::{RangeSelection, SelectionMode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Holiday {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub holiday_names: Vec<String>,
}

/// Keyed by ISO `YYYY-MM-DD`.
pub type Holidays = IndexMap<String, Holiday>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AriaLabels {
    pub choose_prefix: String,
    pub disabled_prefix: String,
    pub month_prefix: String,
    pub week_prefix: String,
}

impl Default for AriaLabels {
    fn default() -> Self {
        Self {
            choose_prefix: "Choose".to_string(),
            disabled_prefix: "Not available".to_string(),
            month_prefix: "Month".to_string(),
            week_prefix: "week".to_string(),
        }
    }
}

/// Week number shown for a row, given the row's first day.
#[derive(Clone)]
pub struct WeekNumberFormat(Arc<dyn Fn(NaiveDate) -> u32 + Send + Sync>);

impl WeekNumberFormat {
    pub fn new(format: impl Fn(NaiveDate) -> u32 + Send + Sync + 'static) -> Self {
        Self(Arc::new(format))
    }

    pub fn apply(&self, week_start: NaiveDate) -> u32 {
        (self.0)(week_start)
    }
}

impl fmt::Debug for WeekNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeekNumberFormat(<fn>)")
    }
}

/// Everything the host supplies for one render of a page.
///
/// `start_date <= end_date` is the caller's responsibility; the page never
/// reorders or validates the endpoints.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub anchor_day: NaiveDate,
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub selected_dates: Vec<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub selecting_date: Option<NaiveDate>,
    pub pre_selection: Option<NaiveDate>,
    pub selection_mode: SelectionMode,
    pub constraints: DateConstraints,
    pub holidays: Holidays,
    pub highlight_dates: Vec<NaiveDate>,
    /// Overrides the locale's first weekday.
    pub calendar_start_day: Option<Weekday>,
    pub locale: Locale,
    pub disabled_keyboard_navigation: bool,
    pub selects_disabled_days_in_range: bool,
    pub fixed_height: bool,
    pub peek_next_month: bool,
    pub show_week_numbers: bool,
    /// `None` numbers rows by ISO week.
    pub format_week_number: Option<WeekNumberFormat>,
    /// Blank the labels of leading days from the previous month.
    pub month_shows_duplicate_days_start: bool,
    /// Blank the labels of trailing days from the next month.
    pub month_shows_duplicate_days_end: bool,
    /// Position of this page among several shown side by side.
    pub order_in_display: Option<usize>,
    pub labels: AriaLabels,
}

impl PageContext {
    pub fn new(anchor_day: NaiveDate) -> Self {
        Self {
            anchor_day,
            today: calendar::today(),
            selected: None,
            selected_dates: Vec::new(),
            start_date: None,
            end_date: None,
            selecting_date: None,
            pre_selection: None,
            selection_mode: SelectionMode::Single,
            constraints: DateConstraints::default(),
            holidays: Holidays::new(),
            highlight_dates: Vec::new(),
            calendar_start_day: None,
            locale: Locale::default(),
            disabled_keyboard_navigation: false,
            selects_disabled_days_in_range: false,
            fixed_height: false,
            peek_next_month: false,
            show_week_numbers: false,
            format_week_number: None,
            month_shows_duplicate_days_start: false,
            month_shows_duplicate_days_end: false,
            order_in_display: None,
            labels: AriaLabels::default(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_selected(mut self, date: NaiveDate) -> Self {
        self.selected = Some(date);
        self
    }

    pub fn with_selected_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.selected_dates = dates;
        self
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_selecting_date(mut self, date: NaiveDate) -> Self {
        self.selecting_date = Some(date);
        self
    }

    pub fn with_pre_selection(mut self, date: NaiveDate) -> Self {
        self.pre_selection = Some(date);
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_constraints(mut self, constraints: DateConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_holiday(mut self, date: NaiveDate, holiday: Holiday) -> Self {
        self.holidays.insert(holiday_key(date), holiday);
        self
    }

    pub fn with_highlight_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.highlight_dates = dates;
        self
    }

    pub fn with_week_start(mut self, weekday: Weekday) -> Self {
        self.calendar_start_day = Some(weekday);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_fixed_height(mut self, fixed: bool) -> Self {
        self.fixed_height = fixed;
        self
    }

    pub fn with_peek_next_month(mut self, peek: bool) -> Self {
        self.peek_next_month = peek;
        self
    }

    pub fn with_keyboard_navigation_disabled(mut self, disabled: bool) -> Self {
        self.disabled_keyboard_navigation = disabled;
        self
    }

    pub fn with_week_number_format(
        mut self,
        format: impl Fn(NaiveDate) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.format_week_number = Some(WeekNumberFormat::new(format));
        self
    }

    pub fn with_duplicate_days_hidden(mut self, start: bool, end: bool) -> Self {
        self.month_shows_duplicate_days_start = start;
        self.month_shows_duplicate_days_end = end;
        self
    }

    pub fn with_order_in_display(mut self, order: usize) -> Self {
        self.order_in_display = Some(order);
        self
    }

    pub fn week_number(&self, week_start: NaiveDate) -> u32 {
        match &self.format_week_number {
            Some(format) => format.apply(week_start),
            None => week_start.iso_week().week(),
        }
    }

    pub fn week_starts_on(&self) -> Weekday {
        self.calendar_start_day
            .unwrap_or(self.locale.week_starts_on)
    }

    /// `selecting_date` if set, else `pre_selection`.
    pub fn provisional(&self) -> Option<NaiveDate> {
        self.selecting_date.or(self.pre_selection)
    }

    pub fn range(&self) -> RangeSelection {
        RangeSelection {
            mode: self.selection_mode,
            start_date: self.start_date,
            end_date: self.end_date,
            provisional: self.provisional(),
        }
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.constraints.is_day_disabled(date)
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.constraints.is_day_excluded(date)
    }

    /// Disabled or excluded; the test keyboard moves and accessible labels use.
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.is_disabled(date) || self.is_excluded(date)
    }

    pub fn holiday(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&holiday_key(date))
    }

    pub fn choose_or_disabled_prefix(&self, blocked: bool) -> &str {
        if blocked {
            &self.labels.disabled_prefix
        } else {
            &self.labels.choose_prefix
        }
    }
}

pub fn holiday_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `text` behind a trimmed `prefix`, or `text` alone when the prefix is blank.
pub fn prefixed(prefix: &str, text: &str) -> String {
    match prefix.trim() {
        "" => text.to_string(),
        prefix => format!("{prefix} {text}"),
    }
}
