//! Keyboard and pointer handling for a page.
//!
//! Handlers are pure: they read the context and return the actions the host
//! should apply. A move onto a disabled or excluded date is dropped; the page
//! never looks past a blocked target for the next enabled cell.

use chrono::NaiveDate;
use tracing::debug;

use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::shared::calendar;
use crate::widgets::traits::{CellRef, InteractionResult, PageAction, Trigger};

use super::context::PageContext;
use super::layout::GridLayout;
use super::mode::PageMode;

const MONTHS_PER_YEAR: u32 = 12;
const HORIZONTAL_OFFSET: u32 = 1;

/// Entry point for key events aimed at `focused`.
///
/// Every key except Tab is marked handled. The raw key is always forwarded
/// to the host, after any internal transition.
pub fn handle_key(
    ctx: &PageContext,
    mode: &PageMode,
    focused: CellRef,
    key: KeyEvent,
) -> InteractionResult {
    let key = match mode {
        PageMode::MonthGrid { .. } if key.is_space() => {
            KeyEvent::new(KeyCode::Enter, key.modifiers)
        }
        _ => key,
    };

    let mut result = if key.is_tab() {
        InteractionResult::ignored()
    } else {
        InteractionResult::consumed()
    };

    if !ctx.disabled_keyboard_navigation && focused.is_valid() {
        let step = match mode {
            PageMode::MonthGrid { layout, .. } => month_key(ctx, layout, focused, key),
            PageMode::QuarterGrid { .. } => quarter_key(ctx, focused, key),
            PageMode::DayGrid => day_key(ctx, key),
            PageMode::WeekList => week_key(ctx, key),
        };
        result.merge(step);
    }

    result.actions.push(PageAction::RawKey(key));
    result
}

fn month_key(
    ctx: &PageContext,
    layout: &GridLayout,
    focused: CellRef,
    key: KeyEvent,
) -> InteractionResult {
    let CellRef::Month(month) = focused else {
        return InteractionResult::ignored();
    };
    if key.code == KeyCode::Enter {
        return commit_month(ctx, month, key);
    }
    let Some(pre_selection) = ctx.pre_selection else {
        return InteractionResult::ignored();
    };

    let offset = layout.vertical_offset();
    let (target, delta) = match key.code {
        KeyCode::Right => {
            let target = if month == MONTHS_PER_YEAR - 1 {
                0
            } else {
                month + HORIZONTAL_OFFSET
            };
            (target, HORIZONTAL_OFFSET as i32)
        }
        KeyCode::Left => {
            let target = if month == 0 {
                MONTHS_PER_YEAR - 1
            } else {
                month - HORIZONTAL_OFFSET
            };
            (target, -(HORIZONTAL_OFFSET as i32))
        }
        KeyCode::Up => {
            let target = if layout.in_first_row(month) {
                month + MONTHS_PER_YEAR - offset
            } else {
                month - offset
            };
            (target, -(offset as i32))
        }
        KeyCode::Down => {
            let target = if layout.in_last_row(month) {
                month + offset - MONTHS_PER_YEAR
            } else {
                month + offset
            };
            (target, offset as i32)
        }
        _ => return InteractionResult::ignored(),
    };

    move_to(
        ctx,
        CellRef::Month(target),
        calendar::add_months(pre_selection, delta),
    )
}

fn quarter_key(ctx: &PageContext, focused: CellRef, key: KeyEvent) -> InteractionResult {
    let CellRef::Quarter(quarter) = focused else {
        return InteractionResult::ignored();
    };
    if key.code == KeyCode::Enter {
        return commit_quarter(ctx, quarter, key);
    }
    let Some(pre_selection) = ctx.pre_selection else {
        return InteractionResult::ignored();
    };

    let (target, delta) = match key.code {
        KeyCode::Right => (if quarter == 4 { 1 } else { quarter + 1 }, 1),
        KeyCode::Left => (if quarter == 1 { 4 } else { quarter - 1 }, -1),
        _ => return InteractionResult::ignored(),
    };
    move_to(
        ctx,
        CellRef::Quarter(target),
        calendar::add_quarters(pre_selection, delta),
    )
}

fn day_key(ctx: &PageContext, key: KeyEvent) -> InteractionResult {
    let Some(pre_selection) = ctx.pre_selection else {
        return InteractionResult::ignored();
    };
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let week_start = ctx.week_starts_on();

    let target = match key.code {
        KeyCode::Enter => {
            if ctx.is_disabled(pre_selection) {
                return InteractionResult::ignored();
            }
            return commit(ctx, pre_selection, key);
        }
        KeyCode::Left => calendar::add_days(pre_selection, -1),
        KeyCode::Right => calendar::add_days(pre_selection, 1),
        KeyCode::Up => calendar::add_weeks(pre_selection, -1),
        KeyCode::Down => calendar::add_weeks(pre_selection, 1),
        KeyCode::PageUp => calendar::add_months(pre_selection, if shift { -12 } else { -1 }),
        KeyCode::PageDown => calendar::add_months(pre_selection, if shift { 12 } else { 1 }),
        KeyCode::Home => calendar::start_of_week(pre_selection, week_start),
        KeyCode::End => calendar::end_of_week(pre_selection, week_start),
        _ => return InteractionResult::ignored(),
    };
    move_to(ctx, CellRef::Day(target), target)
}

fn week_key(ctx: &PageContext, key: KeyEvent) -> InteractionResult {
    let Some(pre_selection) = ctx.pre_selection else {
        return InteractionResult::ignored();
    };
    let week_start = ctx.week_starts_on();
    let current = calendar::start_of_week(pre_selection, week_start);

    let shifted = match key.code {
        KeyCode::Enter => {
            if ctx.is_disabled(current) {
                return InteractionResult::ignored();
            }
            return commit(ctx, current, key);
        }
        KeyCode::Up | KeyCode::Left => calendar::add_weeks(current, -1),
        KeyCode::Down | KeyCode::Right => calendar::add_weeks(current, 1),
        KeyCode::PageUp => calendar::add_months(pre_selection, -1),
        KeyCode::PageDown => calendar::add_months(pre_selection, 1),
        _ => return InteractionResult::ignored(),
    };
    let target = calendar::start_of_week(shifted, week_start);
    move_to(ctx, CellRef::Week(target), target)
}

fn move_to(ctx: &PageContext, target: CellRef, date: NaiveDate) -> InteractionResult {
    if ctx.is_blocked(date) {
        debug!(?target, %date, "navigation target blocked");
        return InteractionResult::ignored();
    }
    debug!(?target, %date, "navigation moved");
    let mut result = InteractionResult::with_action(PageAction::SetPreSelection(Some(date)));
    result.push(PageAction::Focus(target));
    result
}

fn commit(ctx: &PageContext, date: NaiveDate, key: KeyEvent) -> InteractionResult {
    debug!(%date, "committed from keyboard");
    InteractionResult::with_action(PageAction::Commit {
        date,
        trigger: Trigger::Key(key),
        order_in_display: ctx.order_in_display,
    })
}

/// Commits the month and resets the provisional date to the committed selection.
fn commit_month(ctx: &PageContext, month: u32, key: KeyEvent) -> InteractionResult {
    let label = calendar::set_month(ctx.anchor_day, month);
    if ctx.constraints.is_month_disabled(label) {
        return InteractionResult::ignored();
    }
    let mut result = commit(ctx, calendar::start_of_month(label), key);
    result.push(PageAction::SetPreSelection(ctx.selected));
    result
}

fn commit_quarter(ctx: &PageContext, quarter: u32, key: KeyEvent) -> InteractionResult {
    let label = calendar::set_quarter(ctx.anchor_day, quarter);
    if ctx.constraints.is_quarter_disabled(label) {
        return InteractionResult::ignored();
    }
    let mut result = commit(ctx, calendar::start_of_quarter(label), key);
    result.push(PageAction::SetPreSelection(ctx.selected));
    result
}

/// Pointer click on `cell`; disabled cells ignore clicks.
pub fn handle_click(ctx: &PageContext, cell: CellRef) -> InteractionResult {
    match enabled_cell_date(ctx, cell) {
        Some(date) => {
            debug!(?cell, %date, "committed from pointer");
            InteractionResult::with_action(PageAction::Commit {
                date,
                trigger: Trigger::Pointer,
                order_in_display: ctx.order_in_display,
            })
        }
        None => InteractionResult::ignored(),
    }
}

pub fn handle_hover(ctx: &PageContext, cell: CellRef) -> InteractionResult {
    match enabled_cell_date(ctx, cell) {
        Some(date) => InteractionResult::with_action(PageAction::Hover(date)),
        None => InteractionResult::ignored(),
    }
}

pub fn handle_leave() -> InteractionResult {
    InteractionResult::with_action(PageAction::Leave)
}

/// Date a cell commits, or `None` when the cell is disabled.
fn enabled_cell_date(ctx: &PageContext, cell: CellRef) -> Option<NaiveDate> {
    if !cell.is_valid() {
        return None;
    }
    match cell {
        CellRef::Day(date) | CellRef::Week(date) => (!ctx.is_disabled(date)).then_some(date),
        CellRef::Month(month) => {
            let label = calendar::set_month(ctx.anchor_day, month);
            (!ctx.constraints.is_month_disabled(label)).then(|| calendar::start_of_month(label))
        }
        CellRef::Quarter(quarter) => {
            let label = calendar::set_quarter(ctx.anchor_day, quarter);
            (!ctx.constraints.is_quarter_disabled(label))
                .then(|| calendar::start_of_quarter(label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_click, handle_hover, handle_key};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::components::calendar::context::PageContext;
    use crate::widgets::components::calendar::layout::ColumnCount;
    use crate::widgets::components::calendar::mode::PageMode;
    use crate::widgets::shared::constraints::DateConstraints;
    use crate::widgets::traits::{CellRef, PageAction, Trigger};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn moves(actions: &[PageAction]) -> Option<(NaiveDate, CellRef)> {
        match actions {
            [
                PageAction::SetPreSelection(Some(date)),
                PageAction::Focus(cell),
                PageAction::RawKey(_),
            ] => Some((*date, *cell)),
            _ => None,
        }
    }

    #[test]
    fn month_up_from_first_row_wraps() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 15));
        let mode = PageMode::month_grid(ColumnCount::Three);
        let result = handle_key(&ctx, &mode, CellRef::Month(0), key(KeyCode::Up));
        assert!(result.handled);
        assert_eq!(
            moves(&result.actions),
            Some((d(2023, 10, 15), CellRef::Month(9)))
        );
    }

    #[test]
    fn month_down_from_last_row_wraps() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 11, 30));
        let mode = PageMode::month_grid(ColumnCount::Four);
        let result = handle_key(&ctx, &mode, CellRef::Month(10), key(KeyCode::Down));
        assert_eq!(
            moves(&result.actions),
            Some((d(2025, 3, 30), CellRef::Month(2)))
        );
    }

    #[test]
    fn month_right_wraps_december_to_january() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 12, 31));
        let mode = PageMode::month_grid(ColumnCount::Two);
        let result = handle_key(&ctx, &mode, CellRef::Month(11), key(KeyCode::Right));
        assert_eq!(
            moves(&result.actions),
            Some((d(2025, 1, 31), CellRef::Month(0)))
        );
    }

    #[test]
    fn blocked_target_is_a_dead_end() {
        let ctx = PageContext::new(d(2024, 1, 1))
            .with_pre_selection(d(2024, 3, 15))
            .with_constraints(DateConstraints::new().with_excluded(d(2024, 4, 15)));
        let mode = PageMode::month_grid(ColumnCount::Three);
        let result = handle_key(&ctx, &mode, CellRef::Month(2), key(KeyCode::Right));
        assert!(result.handled);
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Right))]);
    }

    #[test]
    fn arrows_without_pre_selection_do_nothing() {
        let ctx = PageContext::new(d(2024, 1, 1));
        let mode = PageMode::month_grid(ColumnCount::Three);
        let result = handle_key(&ctx, &mode, CellRef::Month(4), key(KeyCode::Left));
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Left))]);
    }

    #[test]
    fn enter_commits_month_start_and_resets_pre_selection() {
        let ctx = PageContext::new(d(2024, 6, 20))
            .with_selected(d(2024, 2, 2))
            .with_pre_selection(d(2024, 8, 9));
        let mode = PageMode::month_grid(ColumnCount::Three);
        let space = KeyEvent::plain(KeyCode::Char(' '));
        let result = handle_key(&ctx, &mode, CellRef::Month(7), space);
        assert_eq!(
            result.actions,
            vec![
                PageAction::Commit {
                    date: d(2024, 8, 1),
                    trigger: Trigger::Key(key(KeyCode::Enter)),
                    order_in_display: None,
                },
                PageAction::SetPreSelection(Some(d(2024, 2, 2))),
                PageAction::RawKey(key(KeyCode::Enter)),
            ]
        );
    }

    #[test]
    fn enter_on_disabled_month_is_ignored() {
        let ctx = PageContext::new(d(2024, 6, 20))
            .with_constraints(DateConstraints::new().with_min_date(d(2024, 5, 1)));
        let mode = PageMode::month_grid(ColumnCount::Three);
        let result = handle_key(&ctx, &mode, CellRef::Month(3), key(KeyCode::Enter));
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Enter))]);
    }

    #[test]
    fn quarter_right_wraps() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 11, 1));
        let quarters = PageMode::quarter_grid();
        let result = handle_key(&ctx, &quarters, CellRef::Quarter(4), key(KeyCode::Right));
        assert_eq!(
            moves(&result.actions),
            Some((d(2025, 2, 1), CellRef::Quarter(1)))
        );
        let up = handle_key(&ctx, &quarters, CellRef::Quarter(4), key(KeyCode::Up));
        assert_eq!(up.actions, vec![PageAction::RawKey(key(KeyCode::Up))]);
    }

    #[test]
    fn enter_commits_quarter_start_and_resets_pre_selection() {
        let ctx = PageContext::new(d(2024, 5, 20))
            .with_selected(d(2024, 1, 9))
            .with_pre_selection(d(2024, 8, 14))
            .with_order_in_display(2);
        let result = handle_key(
            &ctx,
            &PageMode::quarter_grid(),
            CellRef::Quarter(3),
            key(KeyCode::Enter),
        );
        assert!(result.handled);
        assert_eq!(
            result.actions,
            vec![
                PageAction::Commit {
                    date: d(2024, 7, 1),
                    trigger: Trigger::Key(key(KeyCode::Enter)),
                    order_in_display: Some(2),
                },
                PageAction::SetPreSelection(Some(d(2024, 1, 9))),
                PageAction::RawKey(key(KeyCode::Enter)),
            ]
        );
    }

    #[test]
    fn enter_on_disabled_quarter_is_ignored() {
        let ctx = PageContext::new(d(2024, 5, 20))
            .with_pre_selection(d(2024, 5, 20))
            .with_constraints(DateConstraints::new().with_max_date(d(2024, 6, 30)));
        let result = handle_key(
            &ctx,
            &PageMode::quarter_grid(),
            CellRef::Quarter(3),
            key(KeyCode::Enter),
        );
        assert!(result.handled);
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Enter))]);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let ctx = PageContext::new(d(2024, 5, 20)).with_pre_selection(d(2024, 5, 20));
        let quarters = PageMode::quarter_grid();
        let months = PageMode::month_grid(ColumnCount::Three);
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Enter] {
            let result = handle_key(&ctx, &quarters, CellRef::Quarter(0), key(code));
            assert_eq!(result.actions, vec![PageAction::RawKey(key(code))]);
            let result = handle_key(&ctx, &months, CellRef::Month(12), key(code));
            assert_eq!(result.actions, vec![PageAction::RawKey(key(code))]);
        }
        let result = handle_key(&ctx, &months, CellRef::Month(13), key(KeyCode::Up));
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Up))]);
        assert!(handle_click(&ctx, CellRef::Quarter(5)).actions.is_empty());
    }

    #[test]
    fn tab_passes_through() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 1));
        let focused = CellRef::Day(d(2024, 1, 1));
        let result = handle_key(&ctx, &PageMode::DayGrid, focused, key(KeyCode::Tab));
        assert!(!result.handled);
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Tab))]);
    }

    #[test]
    fn disabled_keyboard_navigation_only_forwards() {
        let ctx = PageContext::new(d(2024, 1, 1))
            .with_pre_selection(d(2024, 1, 10))
            .with_keyboard_navigation_disabled(true);
        let mode = PageMode::month_grid(ColumnCount::Three);
        let result = handle_key(&ctx, &mode, CellRef::Month(0), key(KeyCode::Right));
        assert!(result.handled);
        assert_eq!(result.actions, vec![PageAction::RawKey(key(KeyCode::Right))]);
    }

    #[test]
    fn day_grid_moves() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 31));
        let focused = CellRef::Day(d(2024, 1, 31));
        let down = handle_key(&ctx, &PageMode::DayGrid, focused, key(KeyCode::Down));
        assert_eq!(
            moves(&down.actions),
            Some((d(2024, 2, 7), CellRef::Day(d(2024, 2, 7))))
        );
        let year_back = handle_key(
            &ctx,
            &PageMode::DayGrid,
            focused,
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::SHIFT),
        );
        assert_eq!(
            moves(&year_back.actions),
            Some((d(2023, 1, 31), CellRef::Day(d(2023, 1, 31))))
        );
        let home = handle_key(&ctx, &PageMode::DayGrid, focused, key(KeyCode::Home));
        assert_eq!(
            moves(&home.actions),
            Some((d(2024, 1, 28), CellRef::Day(d(2024, 1, 28))))
        );
    }

    #[test]
    fn week_list_moves_by_week() {
        let ctx = PageContext::new(d(2024, 1, 1)).with_pre_selection(d(2024, 1, 17));
        let focused = CellRef::Week(d(2024, 1, 14));
        let right = handle_key(&ctx, &PageMode::WeekList, focused, key(KeyCode::Right));
        assert_eq!(
            moves(&right.actions),
            Some((d(2024, 1, 21), CellRef::Week(d(2024, 1, 21))))
        );
        let enter = handle_key(&ctx, &PageMode::WeekList, focused, key(KeyCode::Enter));
        assert!(matches!(
            enter.actions.first(),
            Some(PageAction::Commit { date, .. }) if *date == d(2024, 1, 14)
        ));
    }

    #[test]
    fn clicks_and_hovers_skip_disabled_cells() {
        let ctx = PageContext::new(d(2024, 1, 1))
            .with_constraints(DateConstraints::new().with_max_date(d(2024, 1, 20)));
        assert!(handle_click(&ctx, CellRef::Day(d(2024, 1, 21))).actions.is_empty());
        assert_eq!(
            handle_click(&ctx, CellRef::Day(d(2024, 1, 20))).actions,
            vec![PageAction::Commit {
                date: d(2024, 1, 20),
                trigger: Trigger::Pointer,
                order_in_display: None,
            }]
        );
        assert_eq!(
            handle_hover(&ctx, CellRef::Quarter(1)).actions,
            vec![PageAction::Hover(d(2024, 1, 1))]
        );
        assert!(handle_hover(&ctx, CellRef::Month(1)).actions.is_empty());
    }
}
