//! Calendar arithmetic shared by every page mode.
//!
//! Thin helpers over `chrono`: week/month/quarter boundaries, clamped month
//! shifting, unit ordinals for range comparisons and localized names.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: chrono::Locale,
    pub week_starts_on: Weekday,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            tag: chrono::Locale::en_US,
            week_starts_on: Weekday::Sun,
        }
    }
}

impl Locale {
    /// Resolves a POSIX locale name such as `de_DE`. The first weekday
    /// follows the locale's territory.
    pub fn parse(name: &str) -> Option<Self> {
        let tag = chrono::Locale::try_from(name).ok()?;
        Some(Self {
            tag,
            week_starts_on: first_weekday_of(name),
        })
    }

    pub fn with_week_start(mut self, weekday: Weekday) -> Self {
        self.week_starts_on = weekday;
        self
    }
}

/// Territories whose weeks start on Sunday (CLDR week data).
const SUNDAY_FIRST: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT",
    "GU", "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO",
    "MT", "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

const SATURDAY_FIRST: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

/// First weekday for a POSIX locale name (`de_DE`, `ar_EG.UTF-8`, `sr_RS@latin`).
/// Territories not listed start on Monday.
pub fn first_weekday_of(name: &str) -> Weekday {
    let territory = name
        .split(['.', '@'])
        .next()
        .and_then(|base| base.rsplit_once('_'))
        .map(|(_, territory)| territory.to_ascii_uppercase());
    match territory.as_deref() {
        Some(code) if SUNDAY_FIRST.contains(&code) => Weekday::Sun,
        Some(code) if SATURDAY_FIRST.contains(&code) => Weekday::Sat,
        Some("MV") => Weekday::Fri,
        Some(_) => Weekday::Mon,
        None => Weekday::Sun,
    }
}

/// The unit a range predicate compares at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
    Quarter,
}

impl Granularity {
    /// Monotonic index of the unit containing `date`.
    pub fn ordinal(self, date: NaiveDate) -> i64 {
        match self {
            Self::Day => i64::from(date.num_days_from_ce()),
            Self::Month => i64::from(date.year()) * 12 + i64::from(date.month0()),
            Self::Quarter => i64::from(date.year()) * 4 + i64::from(quarter_of(date) - 1),
        }
    }

    pub fn same(self, a: NaiveDate, b: NaiveDate) -> bool {
        self.ordinal(a) == self.ordinal(b)
    }

    /// `start <= date <= end` at this granularity. Always false when `start > end`.
    pub fn contains(self, start: NaiveDate, end: NaiveDate, date: NaiveDate) -> bool {
        let at = self.ordinal(date);
        self.ordinal(start) <= at && at <= self.ordinal(end)
    }
}

/// Maps `calendarStartDay` style numbers (0 = Sunday) onto a weekday.
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| end_of_month(first).day())
        .unwrap_or(30)
}

pub fn add_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_days(Days::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn add_weeks(date: NaiveDate, delta: i64) -> NaiveDate {
    add_days(date, delta * 7)
}

/// Shifts by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn add_quarters(date: NaiveDate, delta: i32) -> NaiveDate {
    add_months(date, delta * 3)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = start_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

pub fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_sunday() + 7
        - week_starts_on.num_days_from_sunday())
        % 7;
    add_days(date, -i64::from(back))
}

pub fn end_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    add_days(start_of_week(date, week_starts_on), 6)
}

/// Quarter number, 1 to 4.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

pub fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let month0 = date.month0() - date.month0() % 3;
    set_month(start_of_month(date), month0)
}

/// Moves `date` into month `month0` (0-11) of the same year, clamping the day.
pub fn set_month(date: NaiveDate, month0: u32) -> NaiveDate {
    add_months(date, month0 as i32 - date.month0() as i32)
}

/// Moves `date` into quarter `quarter` (1-4) of the same year, keeping its offset in the quarter.
pub fn set_quarter(date: NaiveDate, quarter: u32) -> NaiveDate {
    let delta = quarter as i32 - quarter_of(date) as i32;
    add_quarters(date, delta)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn format_date(date: NaiveDate, fmt: &str, locale: &Locale) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(fmt, locale.tag)
        .to_string()
}

/// Day of month with an English ordinal suffix (`3rd`); other locales get
/// the bare number.
pub fn day_ordinal(date: NaiveDate, locale: &Locale) -> String {
    let day = date.day();
    if !format!("{:?}", locale.tag).starts_with("en") {
        return day.to_string();
    }
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

pub fn month_name(month0: u32, locale: &Locale) -> String {
    format_date(month_label_date(month0), "%B", locale)
}

pub fn month_short_name(month0: u32, locale: &Locale) -> String {
    format_date(month_label_date(month0), "%b", locale)
}

pub fn quarter_short_name(quarter: u32) -> String {
    format!("Q{quarter}")
}

fn month_label_date(month0: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, month0 % 12 + 1, 1).unwrap_or_default()
}
