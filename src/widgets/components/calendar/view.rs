use chrono::NaiveDate;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::widgets::shared::calendar;
use crate::widgets::shared::range::SelectionMode;

use super::cells::{self, CellState};
use super::context::{self, PageContext};
use super::mode::PageMode;
use super::weeks::{self, WeekSequence};

const PAGE_LABEL_FORMAT: &str = "%B, %Y";
const WEEKDAY_HEADER_FORMAT: &str = "%a";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    pub cells: Vec<CellState>,
}

/// One rendered page: rows of cell states plus page-level labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub mode: &'static str,
    pub aria_label: String,
    /// A selecting date exists while picking one end of a range.
    pub selecting_range: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekday_names: Vec<String>,
    pub rows: Vec<PageRow>,
}

pub fn build(ctx: &PageContext, mode: &PageMode) -> PageView {
    let rows = match mode {
        PageMode::DayGrid => week_rows(ctx, false),
        PageMode::WeekList => week_rows(ctx, true),
        PageMode::MonthGrid { layout, full_names } => layout
            .rows()
            .iter()
            .map(|row| grid_row(row.iter().map(|m| cells::month_cell(ctx, *m, *full_names))))
            .collect(),
        PageMode::QuarterGrid { layout } => layout
            .rows()
            .iter()
            .map(|row| grid_row(row.iter().map(|q| cells::quarter_cell(ctx, *q))))
            .collect(),
    };

    let weekday_names = match mode {
        PageMode::DayGrid | PageMode::WeekList => {
            let first = calendar::start_of_week(ctx.anchor_day, ctx.week_starts_on());
            weeks::week_days(first)
                .iter()
                .map(|day| calendar::format_date(*day, WEEKDAY_HEADER_FORMAT, &ctx.locale))
                .collect()
        }
        _ => Vec::new(),
    };

    PageView {
        mode: mode.name(),
        aria_label: context::prefixed(
            &ctx.labels.month_prefix,
            &calendar::format_date(ctx.anchor_day, PAGE_LABEL_FORMAT, &ctx.locale),
        ),
        selecting_range: ctx.selecting_date.is_some()
            && matches!(
                ctx.selection_mode,
                SelectionMode::RangeStart | SelectionMode::RangeEnd
            ),
        weekday_names,
        rows,
    }
}

fn week_rows(ctx: &PageContext, week_mode: bool) -> Vec<PageRow> {
    WeekSequence::new(
        ctx.anchor_day,
        ctx.week_starts_on(),
        ctx.fixed_height,
        ctx.peek_next_month,
    )
    .map(|start| {
        let week_number = ctx.week_number(start);
        PageRow {
            week_start: Some(start),
            week_number: ctx.show_week_numbers.then_some(week_number),
            aria_label: week_mode
                .then(|| context::prefixed(&ctx.labels.week_prefix, &week_number.to_string())),
            cells: weeks::week_days(start)
                .iter()
                .map(|day| cells::day_cell(ctx, *day, week_mode))
                .collect(),
        }
    })
    .collect()
}

fn grid_row(cells: impl Iterator<Item = CellState>) -> PageRow {
    PageRow {
        week_start: None,
        week_number: None,
        aria_label: None,
        cells: cells.collect(),
    }
}

impl PageView {
    pub fn cells(&self) -> impl Iterator<Item = &CellState> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// Plain-text rendering, one string per line. Each cell is a one-char
    /// marker followed by its label padded to the widest label.
    pub fn draw_lines(&self) -> Vec<String> {
        let width = self
            .cells()
            .map(|cell| cell.label.width())
            .chain(self.weekday_names.iter().map(|name| name.width()))
            .max()
            .unwrap_or(0);
        let numbered = self.rows.iter().any(|row| row.week_number.is_some());

        let mut lines = vec![self.aria_label.clone()];
        if !self.weekday_names.is_empty() {
            let mut line = String::new();
            if numbered {
                line.push_str("   ");
            }
            for name in &self.weekday_names {
                line.push(' ');
                line.push_str(&pad(name, width));
                line.push(' ');
            }
            lines.push(line.trim_end().to_string());
        }

        for row in &self.rows {
            let mut line = String::new();
            if numbered {
                match row.week_number {
                    Some(number) => line.push_str(&format!("{number:>2} ")),
                    None => line.push_str("   "),
                }
            }
            for cell in &row.cells {
                line.push(marker(cell));
                line.push_str(&pad(&cell.label, width));
                line.push(' ');
            }
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

fn marker(cell: &CellState) -> char {
    if cell.selected {
        '*'
    } else if cell.keyboard_selected {
        '>'
    } else if cell.disabled {
        'x'
    } else if cell.range.range_start || cell.range.range_end {
        '|'
    } else if cell.range.in_range || cell.range.in_selecting_range {
        '~'
    } else if cell.today {
        '+'
    } else if cell.outside_month {
        '.'
    } else {
        ' '
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    let mut padded = String::with_capacity(text.len() + fill);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', fill));
    padded
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::widgets::components::calendar::context::PageContext;
    use crate::widgets::components::calendar::layout::ColumnCount;
    use crate::widgets::components::calendar::mode::PageMode;
    use crate::widgets::shared::range::SelectionMode;
    use chrono::{Datelike, NaiveDate};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn day_grid_view_has_week_rows_and_header() {
        let ctx = PageContext::new(d(2024, 9, 10)).with_today(d(2024, 9, 1));
        let view = build(&ctx, &PageMode::DayGrid);
        assert_eq!(view.mode, "day");
        assert_eq!(view.aria_label, "Month September, 2024");
        assert_eq!(view.weekday_names.first().map(String::as_str), Some("Sun"));
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].week_start, Some(d(2024, 9, 1)));
        assert!(view.rows.iter().all(|row| row.cells.len() == 7));
        assert!(view.rows.iter().all(|row| row.week_number.is_none()));
    }

    #[test]
    fn month_grid_view_follows_layout() {
        let ctx = PageContext::new(d(2024, 5, 20));
        let view = build(&ctx, &PageMode::month_grid(ColumnCount::Four));
        let shape: Vec<_> = view.rows.iter().map(|row| row.cells.len()).collect();
        assert_eq!(shape, vec![4, 4, 4]);
        assert_eq!(view.rows[1].cells[0].label, "May");
        assert!(view.weekday_names.is_empty());
    }

    #[test]
    fn week_list_rows_carry_week_labels() {
        let mut ctx = PageContext::new(d(2024, 1, 10));
        ctx.show_week_numbers = true;
        let view = build(&ctx, &PageMode::WeekList);
        assert_eq!(view.rows[1].week_start, Some(d(2024, 1, 7)));
        assert_eq!(view.rows[1].week_number, Some(1));
        assert_eq!(view.rows[1].aria_label.as_deref(), Some("week 1"));
    }

    #[test]
    fn week_number_hook_replaces_iso_numbers() {
        let mut ctx = PageContext::new(d(2024, 1, 10)).with_week_number_format(|start| {
            start.day0() / 7 + 100
        });
        ctx.show_week_numbers = true;
        let view = build(&ctx, &PageMode::WeekList);
        assert_eq!(view.rows[1].week_number, Some(100));
        assert_eq!(view.rows[2].week_number, Some(101));
        assert_eq!(view.rows[2].aria_label.as_deref(), Some("week 101"));
    }

    #[test]
    fn blank_month_prefix_leaves_no_leading_space() {
        let mut ctx = PageContext::new(d(2024, 1, 10));
        ctx.labels.month_prefix = String::new();
        assert_eq!(build(&ctx, &PageMode::DayGrid).aria_label, "January, 2024");
        ctx.labels.month_prefix = " Monat ".to_string();
        assert_eq!(build(&ctx, &PageMode::DayGrid).aria_label, "Monat January, 2024");
    }

    #[test]
    fn selecting_range_flag_needs_endpoint_mode() {
        let ctx = PageContext::new(d(2024, 1, 10)).with_selecting_date(d(2024, 1, 12));
        assert!(!build(&ctx, &PageMode::DayGrid).selecting_range);
        let ctx = ctx.with_selection_mode(SelectionMode::RangeEnd);
        assert!(build(&ctx, &PageMode::DayGrid).selecting_range);
    }

    #[test]
    fn draw_lines_marks_selection() {
        let ctx = PageContext::new(d(2024, 1, 10))
            .with_today(d(2023, 6, 1))
            .with_selected(d(2024, 1, 3));
        let lines = build(&ctx, &PageMode::quarter_grid()).draw_lines();
        assert_eq!(lines, vec!["Month January, 2024", "*Q1  Q2  Q3  Q4"]);
    }
}
