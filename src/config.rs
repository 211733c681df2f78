//! Serializable page configuration.
//!
//! A [`PageConfig`] covers every [`PageContext`] field that can be written
//! down. Predicates cannot, so weekday exclusions stand in for `filter_date`.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::widgets::components::calendar::{
    AriaLabels, CalendarPage, Holidays, PageContext, PageFlags,
};
use crate::widgets::shared::calendar::{self, Locale};
use crate::widgets::shared::constraints::{
    DateConstraints, DateInterval, ExcludedDate, weekday_filter,
};
use crate::widgets::shared::range::SelectionFlags;

/// An exclusion written either as a bare date or as `{ date, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcludeEntry {
    Date(NaiveDate),
    WithMessage(ExcludedDate),
}

impl From<ExcludeEntry> for ExcludedDate {
    fn from(entry: ExcludeEntry) -> Self {
        match entry {
            ExcludeEntry::Date(date) => ExcludedDate::new(date),
            ExcludeEntry::WithMessage(excluded) => excluded,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Defaults to `today`.
    pub anchor_day: Option<NaiveDate>,
    /// Defaults to the local current date.
    pub today: Option<NaiveDate>,
    pub selected: Option<NaiveDate>,
    pub selected_dates: Vec<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub selecting_date: Option<NaiveDate>,
    pub pre_selection: Option<NaiveDate>,

    #[serde(flatten)]
    pub selection: SelectionFlags,
    #[serde(flatten)]
    pub flags: PageFlags,

    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub exclude_dates: Vec<ExcludeEntry>,
    pub exclude_date_intervals: Vec<DateInterval>,
    pub include_dates: Vec<NaiveDate>,
    pub include_date_intervals: Vec<DateInterval>,
    pub exclude_weekdays: Vec<Weekday>,

    pub holidays: Holidays,
    pub highlight_dates: Vec<NaiveDate>,

    /// POSIX locale name such as `en_US` or `de_DE`.
    pub locale: Option<String>,
    /// Overrides the first weekday taken from the locale's territory.
    pub week_starts_on: Option<Weekday>,
    /// 0 = Sunday .. 6 = Saturday. Wins over the locale.
    pub calendar_start_day: Option<u8>,

    pub disabled_keyboard_navigation: bool,
    pub selects_disabled_days_in_range: bool,
    pub fixed_height: bool,
    pub peek_next_month: bool,
    pub show_week_numbers: bool,
    pub month_shows_duplicate_days_start: bool,
    pub month_shows_duplicate_days_end: bool,
    pub order_in_display: Option<usize>,
    pub labels: AriaLabels,
}

impl PageConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&source)?;
        debug!(path = %path.display(), "loaded page config");
        Ok(config)
    }

    pub fn constraints(&self) -> DateConstraints {
        let mut constraints = DateConstraints {
            min_date: self.min_date,
            max_date: self.max_date,
            exclude_dates: self
                .exclude_dates
                .iter()
                .cloned()
                .map(ExcludedDate::from)
                .collect(),
            exclude_date_intervals: self.exclude_date_intervals.clone(),
            include_dates: self.include_dates.clone(),
            include_date_intervals: self.include_date_intervals.clone(),
            filter_date: None,
        };
        if !self.exclude_weekdays.is_empty() {
            constraints.filter_date = Some(weekday_filter(self.exclude_weekdays.clone()));
        }
        constraints
    }

    /// Validates locale and start day and builds the context.
    pub fn to_context(&self) -> Result<PageContext> {
        let mut locale = match self.locale.as_deref() {
            Some(name) => {
                Locale::parse(name).ok_or_else(|| ConfigError::UnknownLocale(name.to_string()))?
            }
            None => Locale::default(),
        };
        if let Some(weekday) = self.week_starts_on {
            locale = locale.with_week_start(weekday);
        }
        let calendar_start_day = self
            .calendar_start_day
            .map(|index| {
                calendar::weekday_from_sunday_index(index)
                    .ok_or(ConfigError::InvalidStartDay(index))
            })
            .transpose()?;

        let today = self.today.unwrap_or_else(calendar::today);
        let mut context = PageContext::new(self.anchor_day.unwrap_or(today))
            .with_today(today)
            .with_selected_dates(self.selected_dates.clone())
            .with_range(self.start_date, self.end_date)
            .with_selection_mode(self.selection.mode())
            .with_constraints(self.constraints())
            .with_highlight_dates(self.highlight_dates.clone())
            .with_locale(locale)
            .with_fixed_height(self.fixed_height)
            .with_peek_next_month(self.peek_next_month)
            .with_keyboard_navigation_disabled(self.disabled_keyboard_navigation)
            .with_duplicate_days_hidden(
                self.month_shows_duplicate_days_start,
                self.month_shows_duplicate_days_end,
            );
        context.selected = self.selected;
        context.selecting_date = self.selecting_date;
        context.pre_selection = self.pre_selection;
        context.holidays = self.holidays.clone();
        context.calendar_start_day = calendar_start_day;
        context.selects_disabled_days_in_range = self.selects_disabled_days_in_range;
        context.show_week_numbers = self.show_week_numbers;
        context.order_in_display = self.order_in_display;
        context.labels = self.labels.clone();

        debug!(
            anchor = %context.anchor_day,
            mode = ?context.selection_mode,
            week_starts_on = ?context.week_starts_on(),
            "built page context"
        );
        Ok(context)
    }

    pub fn into_page(self) -> Result<CalendarPage> {
        let context = self.to_context()?;
        Ok(CalendarPage::from_flags(context, self.flags))
    }
}
