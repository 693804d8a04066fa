pub mod config;
pub mod entry;
pub mod error;
pub mod io;
pub mod processing;
pub mod regions;
pub mod texture;
pub mod utils;

#[cfg(feature = "python")]
mod python_bind;

pub use config::CompareConfig;
pub use entry::{
    compare_buffers, run_comparison, run_comparison_with, run_timeline, ComparisonResult,
};
pub use error::CompareError;
pub use io::geometry::{NormalSet, PointSet, SurfaceSet};
pub use processing::correspondence::CorrespondenceMap;
pub use processing::displacement::DisplacementField;
pub use processing::stats::DisplacementStats;
pub use regions::{BodyRegion, BoxRegionClassifier, RegionClassifier, RegionMasks};
pub use texture::colormap::{ColorField, ColorMapper};
