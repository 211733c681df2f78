use chrono::{NaiveDate, Weekday};

use crate::widgets::shared::calendar;

/// Rows emitted in fixed-height mode before any peeked row.
pub const FIXED_HEIGHT_WEEK_COUNT: usize = 6;

/// Week-start dates of one page, in order. Consumed once per render.
#[derive(Debug, Clone)]
pub struct WeekSequence {
    anchor: NaiveDate,
    current: NaiveDate,
    emitted: usize,
    fixed_height: bool,
    peek_next_month: bool,
    break_after_next: bool,
    done: bool,
}

impl WeekSequence {
    pub fn new(
        anchor: NaiveDate,
        week_starts_on: Weekday,
        fixed_height: bool,
        peek_next_month: bool,
    ) -> Self {
        let first = calendar::start_of_week(calendar::start_of_month(anchor), week_starts_on);
        Self {
            anchor,
            current: first,
            emitted: 0,
            fixed_height,
            peek_next_month,
            break_after_next: false,
            done: false,
        }
    }

    /// A week belongs to the month when its first or last day does.
    fn touches_anchor_month(&self, week_start: NaiveDate) -> bool {
        let week_end = calendar::add_days(week_start, 6);
        calendar::Granularity::Month.same(week_start, self.anchor)
            || calendar::Granularity::Month.same(week_end, self.anchor)
    }
}

impl Iterator for WeekSequence {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        let week = self.current;
        if self.break_after_next {
            self.done = true;
            return Some(week);
        }

        self.emitted += 1;
        self.current = calendar::add_weeks(self.current, 1);

        let fixed_and_final = self.fixed_height && self.emitted >= FIXED_HEIGHT_WEEK_COUNT;
        let out_of_month = !self.fixed_height && !self.touches_anchor_month(self.current);
        if fixed_and_final || out_of_month {
            if self.peek_next_month {
                self.break_after_next = true;
            } else {
                self.done = true;
            }
        }
        tracing::trace!(%week, emitted = self.emitted, done = self.done, "week row");
        Some(week)
    }
}

/// The seven days of the week starting at `week_start`.
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| calendar::add_days(week_start, offset as i64))
}
