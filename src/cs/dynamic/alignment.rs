//! Backtrace over a [`Grid`] into a single canonical alignment.

use std::fmt;
use std::slice;

use log::{trace, warn};

use super::edit_distance::{Grid, INDEL_COST, SUBSTITUTION_COST};

/// Placeholder printed on the side of a step that has no symbol.
const GAP: &str = "*";

/// What one alignment step does to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    Match,
    Substitution,
    Insertion,
    Deletion,
}

impl EditOp {
    pub const fn cost(self) -> usize {
        match self {
            EditOp::Match => 0,
            EditOp::Substitution => SUBSTITUTION_COST,
            EditOp::Insertion | EditOp::Deletion => INDEL_COST,
        }
    }

    /// Short marker printed after a step; matches have none.
    pub const fn tag(self) -> Option<char> {
        match self {
            EditOp::Match => None,
            EditOp::Substitution => Some('s'),
            EditOp::Insertion => Some('i'),
            EditOp::Deletion => Some('d'),
        }
    }
}

/// A source symbol paired with a target symbol, either of which may be a gap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlignmentStep<T> {
    source: Option<T>,
    target: Option<T>,
    op: EditOp,
}

impl<T> AlignmentStep<T> {
    pub fn matched(source: T, target: T) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            op: EditOp::Match,
        }
    }

    pub fn substitution(source: T, target: T) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            op: EditOp::Substitution,
        }
    }

    pub fn insertion(target: T) -> Self {
        Self {
            source: None,
            target: Some(target),
            op: EditOp::Insertion,
        }
    }

    pub fn deletion(source: T) -> Self {
        Self {
            source: Some(source),
            target: None,
            op: EditOp::Deletion,
        }
    }

    pub fn source(&self) -> Option<&T> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn op(&self) -> EditOp {
        self.op
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> AlignmentStep<U> {
        AlignmentStep {
            source: self.source.map(&mut f),
            target: self.target.map(&mut f),
            op: self.op,
        }
    }
}

/// `SOURCE - TARGET tag`, with `*` standing in for a gap.
impl<T: fmt::Display> fmt::Display for AlignmentStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(symbol) => write!(f, "{symbol}")?,
            None => f.write_str(GAP)?,
        }
        f.write_str(" - ")?;
        match &self.target {
            Some(symbol) => write!(f, "{symbol}")?,
            None => f.write_str(GAP)?,
        }
        if let Some(tag) = self.op.tag() {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

/// An edit script, earliest step first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Alignment<T> {
    steps: Vec<AlignmentStep<T>>,
}

impl<T> Alignment<T> {
    pub fn steps(&self) -> &[AlignmentStep<T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, AlignmentStep<T>> {
        self.steps.iter()
    }

    /// Total cost of the script. For an alignment returned by [`align`] this
    /// equals the distance stored in the grid.
    pub fn cost(&self) -> usize {
        self.steps.iter().map(|step| step.op.cost()).sum()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Alignment<U> {
        Alignment {
            steps: self.steps.into_iter().map(|step| step.map(&mut f)).collect(),
        }
    }

    pub fn into_steps(self) -> Vec<AlignmentStep<T>> {
        self.steps
    }
}

impl<T: PartialEq + Clone> Alignment<T> {
    /// Applies the script to `source` and returns the rewritten sequence.
    ///
    /// Returns `None` when the script does not describe `source`: a step names
    /// a different source symbol, a match pairs two different symbols, or
    /// part of `source` is never consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use min_edit_distance::align_strs;
    ///
    /// let (_, alignment) = align_strs("cats", "bat");
    /// let source: Vec<char> = "bat".chars().collect();
    /// let rebuilt: String = alignment.replay(&source).unwrap().into_iter().collect();
    /// assert_eq!(rebuilt, "cats");
    /// ```
    pub fn replay(&self, source: &[T]) -> Option<Vec<T>> {
        let mut remaining = source.iter();
        let mut rebuilt = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            if let Some(symbol) = &step.source {
                if remaining.next() != Some(symbol) {
                    return None;
                }
            }
            match step.op {
                EditOp::Match => {
                    if step.source != step.target {
                        return None;
                    }
                    rebuilt.push(step.target.clone()?);
                }
                EditOp::Substitution | EditOp::Insertion => rebuilt.push(step.target.clone()?),
                EditOp::Deletion => {}
            }
        }

        if remaining.next().is_some() {
            return None;
        }
        Some(rebuilt)
    }
}

impl<T> IntoIterator for Alignment<T> {
    type Item = AlignmentStep<T>;
    type IntoIter = std::vec::IntoIter<AlignmentStep<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Alignment<T> {
    type Item = &'a AlignmentStep<T>;
    type IntoIter = slice::Iter<'a, AlignmentStep<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Alignment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Walks `grid` from the bottom-right cell back to the origin and returns one
/// minimum cost alignment of `source` onto `target`.
///
/// When a cell was reached in more than one way, the diagonal wins, then the
/// insertion (`from_left`), then the deletion (`from_bottom`). The same inputs
/// therefore always produce the same script.
///
/// # Panics
///
/// Panics if `grid` was not built from sequences of these lengths.
///
/// # Examples
///
/// ```
/// use min_edit_distance::{align, EditOp, Grid};
///
/// let target: Vec<char> = "cat".chars().collect();
/// let source: Vec<char> = "bat".chars().collect();
/// let grid = Grid::build(&target, &source);
/// let alignment = align(&grid, &target, &source);
///
/// let ops: Vec<EditOp> = alignment.iter().map(|step| step.op()).collect();
/// assert_eq!(ops, [EditOp::Substitution, EditOp::Match, EditOp::Match]);
/// assert_eq!(alignment.cost(), grid.distance());
/// ```
pub fn align<T: PartialEq + Clone>(grid: &Grid, target: &[T], source: &[T]) -> Alignment<T> {
    assert_eq!(
        (grid.rows(), grid.cols()),
        (target.len() + 1, source.len() + 1),
        "grid shape does not match the aligned sequences"
    );

    let mut i = target.len();
    let mut j = source.len();
    let mut steps = Vec::with_capacity(i.max(j));

    while i > 0 || j > 0 {
        let cell = grid[(i, j)];

        let step = if cell.from_diagonal() && i > 0 && j > 0 {
            let previous = grid[(i - 1, j - 1)].value();
            let (source_symbol, target_symbol) = (source[j - 1].clone(), target[i - 1].clone());
            i -= 1;
            j -= 1;
            if cell.value() == previous {
                AlignmentStep::matched(source_symbol, target_symbol)
            } else {
                AlignmentStep::substitution(source_symbol, target_symbol)
            }
        } else if cell.from_left() && i > 0 {
            i -= 1;
            AlignmentStep::insertion(target[i].clone())
        } else if cell.from_bottom() && j > 0 {
            j -= 1;
            AlignmentStep::deletion(source[j].clone())
        } else {
            warn!(
                "cell ({}, {}) with value {} has no usable predecessor, ending alignment early",
                i,
                j,
                cell.value()
            );
            let last = match j.checked_sub(1) {
                Some(j) => AlignmentStep::deletion(source[j].clone()),
                None => AlignmentStep::insertion(target[i.saturating_sub(1)].clone()),
            };
            steps.push(last);
            break;
        };

        trace!("step {:?} -> ({}, {})", step.op(), i, j);
        steps.push(step);
    }

    // Collected back to front.
    steps.reverse();
    Alignment { steps }
}

/// Builds the grid for two strings and aligns their `char`s.
///
/// # Examples
///
/// ```
/// use min_edit_distance::align_strs;
///
/// let (grid, alignment) = align_strs("cats", "cat");
/// assert_eq!(grid.distance(), 1);
/// assert_eq!(alignment.to_string(), "c - c\na - a\nt - t\n* - s i\n");
/// ```
pub fn align_strs(target: &str, source: &str) -> (Grid, Alignment<char>) {
    let target: Vec<char> = target.chars().collect();
    let source: Vec<char> = source.chars().collect();
    let grid = Grid::build(&target, &source);
    let alignment = align(&grid, &target, &source);
    (grid, alignment)
}
