pub const NAME: &str = "toked";
pub const TAB_WIDTH: usize = 4;
pub const QUIT_TIMES: u8 = 3;

pub type RowIndex = usize;
pub type ColIndex = usize;
pub type LineIndex = usize;
pub type CharIndex = usize;

/// A place in the document: line index plus character column.
/// Every character counts as width 1 here, tabs included.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct Location {
    pub char_index: CharIndex,
    pub line_index: LineIndex,
}

/// A place on the screen: row plus rendered column (tabs expanded).
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct Position {
    pub col: ColIndex,
    pub row: RowIndex,
}

impl Position {
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            row: self.row.saturating_sub(other.row),
            col: self.col.saturating_sub(other.col),
        }
    }
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct Size {
    pub height: usize,
    pub width: usize,
}
