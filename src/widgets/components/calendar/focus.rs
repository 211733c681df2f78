use crate::widgets::traits::CellRef;

use super::mode::PageMode;

/// Per-index focus handles for month (12) or quarter (4) cells.
///
/// Slots are written once when the host mounts its cells and read when a
/// navigation result asks for focus.
#[derive(Debug, Clone)]
pub struct FocusTargets<R> {
    slots: Vec<Option<R>>,
}

impl<R> FocusTargets<R> {
    /// Day and week pages focus by date, so they get no slots.
    pub fn for_mode(mode: &PageMode) -> Self {
        let len = match mode {
            PageMode::MonthGrid { .. } => 12,
            PageMode::QuarterGrid { .. } => 4,
            PageMode::DayGrid | PageMode::WeekList => 0,
        };
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Stores `handle` for `cell`. Returns false if the cell has no slot or
    /// already has a handle.
    pub fn mount(&mut self, cell: CellRef, handle: R) -> bool {
        let Some(slot) = slot_index(cell).and_then(|i| self.slots.get_mut(i)) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(handle);
        true
    }

    pub fn get(&self, cell: CellRef) -> Option<&R> {
        slot_index(cell)
            .and_then(|i| self.slots.get(i))
            .and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn slot_index(cell: CellRef) -> Option<usize> {
    match cell {
        CellRef::Month(m) if m < 12 => Some(m as usize),
        CellRef::Quarter(q) if (1..=4).contains(&q) => Some(q as usize - 1),
        _ => None,
    }
}
