pub mod geometry;
pub mod input;
pub mod output;
mod integrity_check;

pub use geometry::{NormalSet, PointSet, SurfaceSet};
pub(crate) use integrity_check::check_comparison_inputs;
