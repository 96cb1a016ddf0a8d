//! Minimum edit distance tables.
//!
//! Costs are fixed: a match is free, inserting or deleting a symbol costs 1 and
//! substituting one symbol for another costs 2.

use std::fmt;
use std::ops::Index;

use log::debug;
use ndarray::Array2;

/// Cost of inserting or deleting a single symbol.
pub const INDEL_COST: usize = 1;

/// Cost of replacing a symbol with a different one.
pub const SUBSTITUTION_COST: usize = 2;

/// One entry of a [`Grid`].
///
/// `value` is the cheapest way to turn the first `j` source symbols into the
/// first `i` target symbols. The three flags mark every neighbour that reaches
/// that value, so ties set more than one:
///
/// - `from_left`: `[i-1][j]`, an insertion of `target[i-1]`
/// - `from_diagonal`: `[i-1][j-1]`, a match or a substitution
/// - `from_bottom`: `[i][j-1]`, a deletion of `source[j-1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    value: usize,
    from_left: bool,
    from_diagonal: bool,
    from_bottom: bool,
}

impl Cell {
    pub const fn new(
        value: usize,
        from_left: bool,
        from_diagonal: bool,
        from_bottom: bool,
    ) -> Self {
        Self {
            value,
            from_left,
            from_diagonal,
            from_bottom,
        }
    }

    /// The `[0][0]` cell: nothing aligned, nothing spent.
    pub const fn origin() -> Self {
        Self::new(0, false, false, false)
    }

    pub const fn value(&self) -> usize {
        self.value
    }

    pub const fn from_left(&self) -> bool {
        self.from_left
    }

    pub const fn from_diagonal(&self) -> bool {
        self.from_diagonal
    }

    pub const fn from_bottom(&self) -> bool {
        self.from_bottom
    }

    /// Whether any neighbour is marked as reaching this cell.
    pub const fn has_predecessor(&self) -> bool {
        self.from_left || self.from_diagonal || self.from_bottom
    }
}

/// The full dynamic programming table for a `(target, source)` pair.
///
/// Rows follow the target and columns follow the source, so the grid is
/// `(target.len() + 1) x (source.len() + 1)` and never changes after
/// [`Grid::build`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds the table for any sequence of comparable symbols.
    ///
    /// # Examples
    ///
    /// ```
    /// use min_edit_distance::Grid;
    ///
    /// let grid = Grid::build(&[1, 2, 3], &[1, 3]);
    /// assert_eq!(grid.distance(), 1);
    /// assert_eq!(grid.rows(), 4);
    /// assert_eq!(grid.cols(), 3);
    /// ```
    pub fn build<T: PartialEq>(target: &[T], source: &[T]) -> Self {
        let rows = target.len() + 1;
        let cols = source.len() + 1;
        let mut cells = Array2::from_elem((rows, cols), Cell::origin());

        // First column: only insertions can reach it.
        for i in 1..rows {
            let value = cells[(i - 1, 0)].value + INDEL_COST;
            cells[(i, 0)] = Cell::new(value, true, false, false);
        }

        // First row: only deletions can reach it.
        for j in 1..cols {
            let value = cells[(0, j - 1)].value + INDEL_COST;
            cells[(0, j)] = Cell::new(value, false, false, true);
        }

        for i in 1..rows {
            for j in 1..cols {
                let insert = cells[(i - 1, j)].value + INDEL_COST;
                let diagonal =
                    cells[(i - 1, j - 1)].value + substitution_cost(&target[i - 1], &source[j - 1]);
                let delete = cells[(i, j - 1)].value + INDEL_COST;

                let value = insert.min(diagonal).min(delete);
                cells[(i, j)] =
                    Cell::new(value, insert == value, diagonal == value, delete == value);
            }
        }

        let grid = Self { cells };
        debug!(
            "built {}x{} edit distance grid, distance {}",
            rows,
            cols,
            grid.distance()
        );
        grid
    }

    /// Builds the table over the `char`s of two strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use min_edit_distance::Grid;
    ///
    /// let grid = Grid::from_strs("intention", "execution");
    /// assert_eq!(grid.distance(), 8);
    /// ```
    pub fn from_strs(target: &str, source: &str) -> Self {
        let target: Vec<char> = target.chars().collect();
        let source: Vec<char> = source.chars().collect();
        Self::build(&target, &source)
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Number of rows, `target.len() + 1`.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns, `source.len() + 1`.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Cell> {
        self.cells.get((i, j))
    }

    /// The value of the bottom-right cell.
    pub fn distance(&self) -> usize {
        self.cells[(self.rows() - 1, self.cols() - 1)].value
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// The cost of every cell, without the direction flags.
    pub fn values(&self) -> Array2<usize> {
        self.cells.map(Cell::value)
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, index: (usize, usize)) -> &Cell {
        &self.cells[index]
    }
}

/// Tab separated values, one target prefix per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}\t", cell.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn substitution_cost<T: PartialEq>(a: &T, b: &T) -> usize {
    if a == b {
        0
    } else {
        SUBSTITUTION_COST
    }
}

/// Computes the minimum edit distance between two string slices without
/// keeping the table around.
///
/// Gives the same answer as [`Grid::distance`] but only holds two rows in
/// memory, so use it when the alignment is not needed.
///
/// # Examples
///
/// ```
/// use min_edit_distance::min_edit_distance;
///
/// assert_eq!(min_edit_distance("", ""), 0);
/// assert_eq!(min_edit_distance("cat", "bat"), 2);
/// assert_eq!(min_edit_distance("cats", "cat"), 1);
/// ```
pub fn min_edit_distance(target: &str, source: &str) -> usize {
    // If either string is empty, distance is the length of the other.
    if target.is_empty() {
        return source.chars().count() * INDEL_COST;
    } else if source.is_empty() {
        return target.chars().count() * INDEL_COST;
    }

    compute_distance(target, source)
}

fn compute_distance(target: &str, source: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let mut prev_row: Vec<usize> = (0..=source.len()).map(|j| j * INDEL_COST).collect();
    let mut curr_row = vec![0; source.len() + 1];

    for (i, t) in target.chars().enumerate() {
        curr_row[0] = (i + 1) * INDEL_COST;

        for (j, s) in source.iter().enumerate() {
            //   curr_row[j+1] = minimum of:
            //     1) prev_row[j+1] + 1   (insertion)
            //     2) prev_row[j] + cost  (match or substitution)
            //     3) curr_row[j] + 1     (deletion)
            curr_row[j + 1] = (prev_row[j + 1] + INDEL_COST)
                .min(prev_row[j] + substitution_cost(&t, s))
                .min(curr_row[j] + INDEL_COST);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[source.len()]
}
