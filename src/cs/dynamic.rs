pub mod alignment;
pub mod edit_distance;


// Re-export the table builder and the backtrace with descriptive names
pub use alignment::{align, align_strs, Alignment, AlignmentStep, EditOp};
pub use edit_distance::{min_edit_distance, Cell, Grid};
