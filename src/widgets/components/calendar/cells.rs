//! Per-cell display state.
//!
//! Every flag is recomputed from the [`PageContext`] on each call; nothing is
//! cached between renders.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::widgets::shared::calendar::{self, Granularity};
use crate::widgets::shared::range::{RangeMarks, SelectionMode};
use crate::widgets::traits::CellRef;

use super::context::{self, PageContext};

const DAY_LABEL_WEEKDAY_MONTH: &str = "%A, %B";
const MONTH_LABEL_FORMAT: &str = "%B %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellState {
    pub cell: CellRef,
    /// The date a click on this cell commits.
    pub date: NaiveDate,
    pub label: String,
    pub aria_label: String,
    pub disabled: bool,
    pub excluded: bool,
    pub selected: bool,
    pub today: bool,
    #[serde(flatten)]
    pub range: RangeMarks,
    pub keyboard_selected: bool,
    /// Eligible for the host's tab order.
    pub focusable: bool,
    pub highlighted: bool,
    pub outside_month: bool,
    pub weekend: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub holiday_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CellState {
    fn blank(cell: CellRef, date: NaiveDate) -> Self {
        Self {
            cell,
            date,
            label: String::new(),
            aria_label: String::new(),
            disabled: false,
            excluded: false,
            selected: false,
            today: false,
            range: RangeMarks::default(),
            keyboard_selected: false,
            focusable: false,
            highlighted: false,
            outside_month: false,
            weekend: false,
            holiday_names: Vec::new(),
            title: None,
        }
    }
}

/// Day cell. In week-list mode selection is compared by week.
pub fn day_cell(ctx: &PageContext, date: NaiveDate, week_mode: bool) -> CellState {
    let week_start = ctx.week_starts_on();
    let matches = |other: NaiveDate| {
        if week_mode {
            calendar::start_of_week(other, week_start) == calendar::start_of_week(date, week_start)
        } else {
            other == date
        }
    };

    let mut state = CellState::blank(CellRef::Day(date), date);
    state.disabled = ctx.is_disabled(date);
    state.excluded = ctx.is_excluded(date);
    state.selected = match ctx.selection_mode {
        SelectionMode::Multiple => ctx.selected_dates.iter().any(|d| matches(*d)),
        _ => ctx.selected.is_some_and(matches),
    };
    state.today = date == ctx.today;

    let blocked = state.disabled && !ctx.selects_disabled_days_in_range;
    state.range = ctx.range().marks(date, Granularity::Day, blocked);

    let pre_selection_enabled = ctx.pre_selection.is_some_and(|p| !ctx.is_disabled(p));
    state.keyboard_selected = !ctx.disabled_keyboard_navigation
        && !state.selected
        && pre_selection_enabled
        && ctx.pre_selection.is_some_and(matches);

    let row_anchor = !week_mode || calendar::start_of_week(date, week_start) == date;
    let settled_on_selected =
        ctx.selected.is_some_and(|s| s == date) && ctx.pre_selection == ctx.selected;
    state.focusable = row_anchor && (state.keyboard_selected || settled_on_selected);

    state.highlighted = ctx.highlight_dates.contains(&date);
    state.outside_month = !Granularity::Month.same(date, ctx.anchor_day);
    state.weekend = calendar::is_weekend(date);
    if let Some(holiday) = ctx.holiday(date) {
        state.holiday_names = holiday.holiday_names.clone();
    }
    state.title = ctx
        .constraints
        .exclusion_message(date)
        .map(str::to_string)
        .or_else(|| {
            (!state.holiday_names.is_empty()).then(|| state.holiday_names.join(", "))
        });

    let hidden = state.outside_month
        && if date > ctx.anchor_day {
            ctx.month_shows_duplicate_days_end
        } else {
            ctx.month_shows_duplicate_days_start
        };
    if !hidden {
        state.label = date.day().to_string();
    }
    state.aria_label = context::prefixed(
        ctx.choose_or_disabled_prefix(ctx.is_blocked(date)),
        &day_label(ctx, date),
    );
    state
}

/// `Wednesday, January 3rd, 2024` in English.
fn day_label(ctx: &PageContext, date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        calendar::format_date(date, DAY_LABEL_WEEKDAY_MONTH, &ctx.locale),
        calendar::day_ordinal(date, &ctx.locale),
        date.year()
    )
}

/// Month cell for index `month0` (0-11) of the anchor year.
pub fn month_cell(ctx: &PageContext, month0: u32, full_names: bool) -> CellState {
    let label_date = calendar::set_month(ctx.anchor_day, month0);
    let year = ctx.anchor_day.year();
    let same_month = |other: NaiveDate| other.month0() == month0 && other.year() == year;

    let mut state = CellState::blank(CellRef::Month(month0), calendar::start_of_month(label_date));
    state.disabled = ctx.constraints.is_month_disabled(label_date);
    state.excluded = ctx.is_excluded(label_date);
    state.selected = ctx.selected.is_some_and(same_month);
    state.keyboard_selected =
        !ctx.disabled_keyboard_navigation && ctx.pre_selection.is_some_and(same_month);
    state.focusable = !ctx.disabled_keyboard_navigation
        && ctx.pre_selection.is_some_and(|p| p.month0() == month0);
    state.range = ctx.range().marks(label_date, Granularity::Month, false);
    state.today = ctx.today.year() == year && ctx.today.month0() == month0;

    state.label = if full_names {
        calendar::month_name(month0, &ctx.locale)
    } else {
        calendar::month_short_name(month0, &ctx.locale)
    };
    state.aria_label = context::prefixed(
        ctx.choose_or_disabled_prefix(ctx.is_blocked(label_date)),
        &calendar::format_date(label_date, MONTH_LABEL_FORMAT, &ctx.locale),
    );
    state
}

/// Quarter cell for `quarter` (1-4) of the anchor year.
pub fn quarter_cell(ctx: &PageContext, quarter: u32) -> CellState {
    let label_date = calendar::set_quarter(ctx.anchor_day, quarter);
    let year = ctx.anchor_day.year();
    let same_quarter =
        |other: NaiveDate| calendar::quarter_of(other) == quarter && other.year() == year;

    let mut state = CellState::blank(
        CellRef::Quarter(quarter),
        calendar::start_of_quarter(label_date),
    );
    state.disabled = ctx.constraints.is_quarter_disabled(label_date);
    state.excluded = ctx.is_excluded(label_date);
    state.selected = ctx.selected.is_some_and(same_quarter);
    state.keyboard_selected =
        !ctx.disabled_keyboard_navigation && ctx.pre_selection.is_some_and(same_quarter);
    state.focusable = !ctx.disabled_keyboard_navigation
        && ctx
            .pre_selection
            .is_some_and(|p| calendar::quarter_of(p) == quarter);
    state.range = ctx.range().marks(label_date, Granularity::Quarter, false);
    state.today = ctx.today.year() == year && calendar::quarter_of(ctx.today) == quarter;

    state.label = calendar::quarter_short_name(quarter);
    state.aria_label = context::prefixed(
        ctx.choose_or_disabled_prefix(ctx.is_blocked(label_date)),
        &format!("{} {year}", state.label),
    );
    state
}
