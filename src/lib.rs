pub mod cs;
pub mod error;

pub use cs::dynamic;
pub use cs::dynamic::{
    align, align_strs, min_edit_distance, Alignment, AlignmentStep, Cell, EditOp, Grid,
};
pub use error::{Error, Result};
