pub mod colormap;
pub mod texture;

pub use colormap::{color_legend, ColorField, ColorMapper};
