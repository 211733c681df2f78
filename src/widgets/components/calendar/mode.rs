use serde::{Deserialize, Serialize};

use super::layout::{ColumnCount, GridLayout};

/// Configuration flags that pick the page mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFlags {
    pub show_month_year_picker: bool,
    pub show_full_month_year_picker: bool,
    pub show_two_column_month_year_picker: bool,
    pub show_four_column_month_year_picker: bool,
    pub show_quarter_year_picker: bool,
    pub show_week_picker: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    DayGrid,
    MonthGrid {
        layout: &'static GridLayout,
        full_names: bool,
    },
    QuarterGrid {
        layout: &'static GridLayout,
    },
    WeekList,
}

impl PageMode {
    /// Month picker wins over quarter picker, which wins over week picker.
    pub fn from_flags(flags: PageFlags) -> Self {
        if flags.show_month_year_picker {
            let columns = ColumnCount::from_flags(
                flags.show_four_column_month_year_picker,
                flags.show_two_column_month_year_picker,
            );
            Self::MonthGrid {
                layout: columns.layout(),
                full_names: flags.show_full_month_year_picker,
            }
        } else if flags.show_quarter_year_picker {
            Self::QuarterGrid {
                layout: GridLayout::quarters(),
            }
        } else if flags.show_week_picker {
            Self::WeekList
        } else {
            Self::DayGrid
        }
    }

    pub fn month_grid(columns: ColumnCount) -> Self {
        Self::MonthGrid {
            layout: columns.layout(),
            full_names: false,
        }
    }

    pub fn quarter_grid() -> Self {
        Self::QuarterGrid {
            layout: GridLayout::quarters(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DayGrid => "day",
            Self::MonthGrid { .. } => "month",
            Self::QuarterGrid { .. } => "quarter",
            Self::WeekList => "week",
        }
    }
}
