pub mod cells;
pub mod context;
pub mod focus;
pub mod layout;
pub mod mode;
pub mod navigation;
pub mod view;
pub mod weeks;

use chrono::NaiveDate;

use crate::terminal::KeyEvent;
use crate::widgets::traits::{CellRef, InteractionResult};

pub use cells::CellState;
pub use context::{AriaLabels, Holiday, Holidays, PageContext, WeekNumberFormat};
pub use focus::FocusTargets;
pub use layout::{ColumnCount, GridLayout};
pub use mode::{PageFlags, PageMode};
pub use view::{PageRow, PageView};
pub use weeks::WeekSequence;

// ── CalendarPage ─────────────────────────────────────────────────────────────

/// One page of a date picker: a month of days, or a grid of months,
/// quarters or weeks.
///
/// The page owns no interaction state. Every query and handler reads the
/// current [`PageContext`]; handlers return actions for the host to apply.
#[derive(Debug, Clone)]
pub struct CalendarPage {
    context: PageContext,
    mode: PageMode,
}

impl CalendarPage {
    pub fn new(context: PageContext, mode: PageMode) -> Self {
        Self { context, mode }
    }

    pub fn from_flags(context: PageContext, flags: PageFlags) -> Self {
        Self::new(context, PageMode::from_flags(flags))
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Hosts update selection here between renders.
    pub fn context_mut(&mut self) -> &mut PageContext {
        &mut self.context
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn view(&self) -> PageView {
        view::build(&self.context, &self.mode)
    }

    pub fn cell_state(&self, cell: CellRef) -> CellState {
        match cell {
            CellRef::Day(date) => {
                cells::day_cell(&self.context, date, self.mode == PageMode::WeekList)
            }
            CellRef::Week(date) => cells::day_cell(&self.context, date, true),
            CellRef::Month(month) => {
                let full_names = matches!(self.mode, PageMode::MonthGrid { full_names: true, .. });
                cells::month_cell(&self.context, month, full_names)
            }
            CellRef::Quarter(quarter) => cells::quarter_cell(&self.context, quarter),
        }
    }

    /// The cell a host should place in its tab order, if any.
    pub fn tab_stop(&self) -> Option<CellRef> {
        let view = self.view();
        let cell = view.cells().find(|cell| cell.focusable)?;
        Some(match (self.mode, cell.cell) {
            (PageMode::WeekList, CellRef::Day(date)) => CellRef::Week(date),
            (_, other) => other,
        })
    }

    pub fn focus_targets<R>(&self) -> FocusTargets<R> {
        FocusTargets::for_mode(&self.mode)
    }

    pub fn on_key(&self, focused: CellRef, key: KeyEvent) -> InteractionResult {
        navigation::handle_key(&self.context, &self.mode, focused, key)
    }

    pub fn on_click(&self, cell: CellRef) -> InteractionResult {
        navigation::handle_click(&self.context, cell)
    }

    pub fn on_hover(&self, cell: CellRef) -> InteractionResult {
        navigation::handle_hover(&self.context, cell)
    }

    pub fn on_leave(&self) -> InteractionResult {
        navigation::handle_leave()
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.context.is_disabled(date)
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.context.is_excluded(date)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarPage, PageContext, PageFlags, PageMode};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::shared::constraints::DateConstraints;
    use crate::widgets::traits::{CellRef, PageAction};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn flags_pick_mode() {
        let flags = PageFlags {
            show_quarter_year_picker: true,
            show_week_picker: true,
            ..PageFlags::default()
        };
        let page = CalendarPage::from_flags(PageContext::new(d(2024, 1, 1)), flags);
        assert!(matches!(page.mode(), PageMode::QuarterGrid { .. }));
    }

    #[test]
    fn min_max_window() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_constraints(
            DateConstraints::new()
                .with_min_date(d(2024, 1, 10))
                .with_max_date(d(2024, 1, 20)),
        );
        let page = CalendarPage::new(ctx, PageMode::DayGrid);
        assert!(page.is_disabled(d(2024, 1, 5)));
        assert!(!page.is_disabled(d(2024, 1, 15)));
        assert!(page.is_disabled(d(2024, 1, 25)));
        assert!(page.cell_state(CellRef::Day(d(2024, 1, 25))).disabled);
    }

    #[test]
    fn tab_stop_follows_pre_selection() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 17));
        let days = CalendarPage::new(ctx.clone(), PageMode::DayGrid);
        assert_eq!(days.tab_stop(), Some(CellRef::Day(d(2024, 1, 17))));
        let weeks = CalendarPage::new(ctx, PageMode::WeekList);
        assert_eq!(weeks.tab_stop(), Some(CellRef::Week(d(2024, 1, 14))));
    }

    #[test]
    fn key_result_applies_to_context() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 31));
        let mut page = CalendarPage::new(ctx, PageMode::DayGrid);
        let result = page.on_key(CellRef::Day(d(2024, 1, 31)), KeyEvent::plain(KeyCode::Right));
        for action in result.actions {
            if let PageAction::SetPreSelection(date) = action {
                page.context_mut().pre_selection = date;
            }
        }
        assert_eq!(page.context().pre_selection, Some(d(2024, 2, 1)));
        assert!(page.cell_state(CellRef::Day(d(2024, 2, 1))).keyboard_selected);
    }
}
