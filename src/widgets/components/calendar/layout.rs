use serde::{Deserialize, Serialize};

/// Static arrangement of month (0-11) or quarter (1-4) indices into rows.
#[derive(Debug, PartialEq, Eq)]
pub struct GridLayout {
    rows: &'static [&'static [u32]],
    vertical_offset: u32,
}

static TWO_COLUMNS: GridLayout = GridLayout {
    rows: &[&[0, 1], &[2, 3], &[4, 5], &[6, 7], &[8, 9], &[10, 11]],
    vertical_offset: 2,
};

static THREE_COLUMNS: GridLayout = GridLayout {
    rows: &[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11]],
    vertical_offset: 3,
};

static FOUR_COLUMNS: GridLayout = GridLayout {
    rows: &[&[0, 1, 2, 3], &[4, 5, 6, 7], &[8, 9, 10, 11]],
    vertical_offset: 4,
};

static QUARTERS: GridLayout = GridLayout {
    rows: &[&[1, 2, 3, 4]],
    vertical_offset: 4,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnCount {
    Two,
    #[default]
    Three,
    Four,
}

impl ColumnCount {
    /// Four columns wins over two; three is the fallback.
    pub fn from_flags(four_columns: bool, two_columns: bool) -> Self {
        if four_columns {
            Self::Four
        } else if two_columns {
            Self::Two
        } else {
            Self::Three
        }
    }

    pub fn layout(self) -> &'static GridLayout {
        match self {
            Self::Two => &TWO_COLUMNS,
            Self::Three => &THREE_COLUMNS,
            Self::Four => &FOUR_COLUMNS,
        }
    }
}

impl GridLayout {
    pub fn quarters() -> &'static GridLayout {
        &QUARTERS
    }

    pub fn rows(&self) -> &'static [&'static [u32]] {
        self.rows
    }

    /// Index delta between vertically adjacent cells.
    pub fn vertical_offset(&self) -> u32 {
        self.vertical_offset
    }

    pub fn in_first_row(&self, index: u32) -> bool {
        self.rows.first().is_some_and(|row| row.contains(&index))
    }

    pub fn in_last_row(&self, index: u32) -> bool {
        self.rows.last().is_some_and(|row| row.contains(&index))
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }
}
