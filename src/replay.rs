//! A minimal host that applies page actions to its own context.
//!
//! Used by the binary to replay key presses and by tests that drive a page
//! through several interactions.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::terminal::KeyEvent;
use crate::widgets::components::calendar::{CalendarPage, PageMode, PageView};
use crate::widgets::shared::calendar::{self, Granularity};
use crate::widgets::shared::range::SelectionMode;
use crate::widgets::traits::{CellRef, PageHost, Trigger};

pub struct ReplayHost {
    page: CalendarPage,
    focus: CellRef,
    log: Vec<String>,
}

/// Final state after a replay.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub focus: CellRef,
    pub selected: Option<NaiveDate>,
    pub pre_selection: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub actions: Vec<String>,
    pub page: PageView,
}

impl ReplayHost {
    pub fn new(page: CalendarPage, focus: Option<CellRef>) -> Self {
        let focus = focus.unwrap_or_else(|| default_focus(&page));
        Self {
            page,
            focus,
            log: Vec::new(),
        }
    }

    pub fn page(&self) -> &CalendarPage {
        &self.page
    }

    pub fn focused(&self) -> CellRef {
        self.focus
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Sends `key` to the focused cell and applies the resulting actions.
    pub fn press(&mut self, key: KeyEvent) -> bool {
        let result = self.page.on_key(self.focus, key);
        let handled = result.handled;
        result.dispatch(self);
        handled
    }

    pub fn click(&mut self, cell: CellRef) {
        let result = self.page.on_click(cell);
        result.dispatch(self);
    }

    pub fn report(self) -> ReplayReport {
        let ctx = self.page.context();
        ReplayReport {
            focus: self.focus,
            selected: ctx.selected,
            pre_selection: ctx.pre_selection,
            start_date: ctx.start_date,
            end_date: ctx.end_date,
            page: self.page.view(),
            actions: self.log,
        }
    }

    /// Keeps the provisional date on the visible page.
    fn follow(&mut self, date: NaiveDate) {
        let mode = self.page.mode();
        let ctx = self.page.context_mut();
        let same_page = match mode {
            PageMode::DayGrid | PageMode::WeekList => Granularity::Month.same(date, ctx.anchor_day),
            PageMode::MonthGrid { .. } | PageMode::QuarterGrid { .. } => {
                date.year() == ctx.anchor_day.year()
            }
        };
        if !same_page {
            debug!(from = %ctx.anchor_day, to = %date, "page anchor moved");
            ctx.anchor_day = date;
        }
    }
}

impl PageHost for ReplayHost {
    fn set_pre_selection(&mut self, date: Option<NaiveDate>) {
        self.log.push(match date {
            Some(date) => format!("pre_selection {date}"),
            None => "pre_selection cleared".to_string(),
        });
        self.page.context_mut().pre_selection = date;
        if let Some(date) = date {
            self.follow(date);
        }
    }

    fn focus(&mut self, cell: CellRef) {
        self.log.push(format!("focus {cell:?}"));
        self.focus = cell;
    }

    fn commit(&mut self, date: NaiveDate, trigger: Trigger, order_in_display: Option<usize>) {
        self.log.push(match order_in_display {
            Some(order) => format!("commit {date} (page {order})"),
            None => format!("commit {date}"),
        });
        debug!(%date, ?trigger, ?order_in_display, "host committed");
        let ctx = self.page.context_mut();
        match ctx.selection_mode {
            SelectionMode::Single => ctx.selected = Some(date),
            SelectionMode::RangeStart => {
                ctx.selected = Some(date);
                ctx.start_date = Some(date);
            }
            SelectionMode::RangeEnd => {
                ctx.selected = Some(date);
                ctx.end_date = Some(date);
            }
            SelectionMode::Range => {
                match (ctx.start_date, ctx.end_date) {
                    (Some(start), None) if date >= start => ctx.end_date = Some(date),
                    _ => {
                        ctx.start_date = Some(date);
                        ctx.end_date = None;
                    }
                }
                ctx.selected = Some(date);
                ctx.selecting_date = None;
            }
            SelectionMode::Multiple => {
                if let Some(index) = ctx.selected_dates.iter().position(|d| *d == date) {
                    ctx.selected_dates.remove(index);
                } else {
                    ctx.selected_dates.push(date);
                }
            }
        }
    }

    fn hover(&mut self, date: NaiveDate) {
        let ctx = self.page.context_mut();
        if ctx.selection_mode.is_ranged() {
            ctx.selecting_date = Some(date);
        }
    }

    fn leave(&mut self) {
        self.page.context_mut().selecting_date = None;
    }

    fn raw_key(&mut self, key: KeyEvent) {
        trace!(?key, "raw key forwarded");
    }
}

/// The tab stop if the page has one, else the cell holding the anchor day.
pub fn default_focus(page: &CalendarPage) -> CellRef {
    if let Some(cell) = page.tab_stop() {
        return cell;
    }
    let ctx = page.context();
    let date = ctx.pre_selection.unwrap_or(ctx.anchor_day);
    match page.mode() {
        PageMode::DayGrid => CellRef::Day(date),
        PageMode::WeekList => CellRef::Week(calendar::start_of_week(date, ctx.week_starts_on())),
        PageMode::MonthGrid { .. } => CellRef::Month(date.month0()),
        PageMode::QuarterGrid { .. } => CellRef::Quarter(calendar::quarter_of(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::ReplayHost;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::components::calendar::{CalendarPage, ColumnCount, PageContext, PageMode};
    use crate::widgets::shared::range::SelectionMode;
    use crate::widgets::traits::CellRef;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn replaying_month_keys_moves_and_commits() {
        let ctx = PageContext::new(d(2024, 1, 1))
            .with_selected(d(2024, 1, 15))
            .with_pre_selection(d(2024, 1, 15));
        let page = CalendarPage::new(ctx, PageMode::month_grid(ColumnCount::Three));
        let mut host = ReplayHost::new(page, None);
        assert_eq!(host.focused(), CellRef::Month(0));

        assert!(host.press(KeyEvent::plain(KeyCode::Down)));
        assert!(host.press(KeyEvent::plain(KeyCode::Right)));
        assert_eq!(host.focused(), CellRef::Month(4));
        assert_eq!(host.page().context().pre_selection, Some(d(2024, 5, 15)));

        host.press(KeyEvent::plain(KeyCode::Enter));
        let report = host.report();
        assert_eq!(report.selected, Some(d(2024, 5, 1)));
        assert_eq!(report.pre_selection, Some(d(2024, 1, 15)));
        assert!(report.actions.iter().any(|line| line == "commit 2024-05-01"));
    }

    #[test]
    fn day_grid_follows_pre_selection_across_months() {
        let ctx = PageContext::new(d(2024, 1, 10)).with_pre_selection(d(2024, 1, 31));
        let mut host = ReplayHost::new(CalendarPage::new(ctx, PageMode::DayGrid), None);
        host.press(KeyEvent::plain(KeyCode::Right));
        assert_eq!(host.focused(), CellRef::Day(d(2024, 2, 1)));
        assert_eq!(host.page().context().anchor_day, d(2024, 2, 1));
    }

    #[test]
    fn range_clicks_fill_start_then_end() {
        let ctx = PageContext::new(d(2024, 1, 10)).with_selection_mode(SelectionMode::Range);
        let mut host = ReplayHost::new(CalendarPage::new(ctx, PageMode::DayGrid), None);
        host.click(CellRef::Day(d(2024, 1, 12)));
        host.click(CellRef::Day(d(2024, 1, 18)));
        let report = host.report();
        assert_eq!(report.start_date, Some(d(2024, 1, 12)));
        assert_eq!(report.end_date, Some(d(2024, 1, 18)));
    }

    #[test]
    fn commits_name_the_page_they_came_from() {
        let ctx = PageContext::new(d(2024, 1, 10)).with_order_in_display(1);
        let mut host = ReplayHost::new(CalendarPage::new(ctx, PageMode::DayGrid), None);
        host.click(CellRef::Day(d(2024, 1, 12)));
        assert_eq!(host.log(), ["commit 2024-01-12 (page 1)".to_string()]);
    }
}
