//! Board cursor - the card the player is pointing at.
//!
//! Cards are laid out row-major in a `cols`-wide grid.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    index: usize,
    cols: usize,
    len: usize,
}

impl BoardCursor {
    pub fn new(cols: usize, len: usize) -> Self {
        Self {
            index: 0,
            cols: cols.max(1),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.cols
    }

    pub fn col(&self) -> usize {
        self.index % self.cols
    }

    /// Adopt a new board shape, keeping the cursor in range.
    pub fn resize(&mut self, cols: usize, len: usize) {
        self.cols = cols.max(1);
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    /// Move one cell; stops at the board edges.
    pub fn move_dir(&mut self, dir: Direction) {
        if self.len == 0 {
            return;
        }
        let (row, col) = (self.row(), self.col());
        let rows = self.len.div_ceil(self.cols);
        let target = match dir {
            Direction::Left if col > 0 => self.index - 1,
            Direction::Right if col + 1 < self.cols => self.index + 1,
            Direction::Up if row > 0 => self.index - self.cols,
            Direction::Down if row + 1 < rows => self.index + self.cols,
            _ => return,
        };
        if target < self.len {
            self.index = target;
        }
    }
}
