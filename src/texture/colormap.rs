use rayon::prelude::*;
use serde::Serialize;

pub const COLOR_NO_CHANGE: [u8; 3] = [255, 255, 255];

/// Per-point RGB colors plus the normalization actually applied, so a
/// rendering can be reproduced from the stored result alone.
#[derive(Debug, Clone, Serialize)]
pub struct ColorField {
    pub colors: Vec<[u8; 3]>,
    /// Normalization denominator that mapped projections into [-1, 1].
    pub ceiling: f64,
    /// Smallest projection treated as meaningful change.
    pub threshold: f64,
}

/// Maps signed normal projections onto a bounded diverging scale: green for
/// inward shrinkage, white for below-threshold change, red for outward
/// growth.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    change_threshold: f64,
    ceiling: Option<f64>,
}

impl Default for ColorMapper {
    fn default() -> Self {
        ColorMapper {
            change_threshold: 0.001,
            ceiling: None,
        }
    }
}

impl ColorMapper {
    pub fn new(change_threshold: f64, ceiling: Option<f64>) -> Self {
        ColorMapper {
            change_threshold,
            ceiling,
        }
    }

    /// Colors one projection field.
    ///
    /// Without an external ceiling (or with a nonpositive one) the ceiling is
    /// the maximum absolute projection; an identically-zero field falls back
    /// to a ceiling of 1.0 so the division never faults.
    pub fn map_projections(&self, projections: &[f64]) -> ColorField {
        let ceiling = match self.ceiling {
            Some(c) if c > 0.0 => c,
            _ => {
                let max_abs = projections.iter().fold(0.0_f64, |acc, p| acc.max(p.abs()));
                if max_abs > 0.0 {
                    max_abs
                } else {
                    log::warn!("projection field is identically zero, color ceiling defaults to 1");
                    1.0
                }
            }
        };

        let threshold_norm = self.change_threshold / ceiling;

        let colors = projections
            .par_iter()
            .map(|&projection| {
                let normalized = (projection / ceiling).clamp(-1.0, 1.0);
                if normalized.abs() < threshold_norm {
                    COLOR_NO_CHANGE
                } else if normalized < 0.0 {
                    let intensity = normalized.abs().clamp(0.0, 1.0);
                    [0, (255.0 * intensity).round() as u8, 0]
                } else {
                    let intensity = normalized.clamp(0.0, 1.0);
                    [(255.0 * intensity).round() as u8, 0, 0]
                }
            })
            .collect();

        ColorField {
            colors,
            ceiling,
            threshold: self.change_threshold,
        }
    }
}

/// Reference stops for rendering a legend alongside a colored surface.
pub fn color_legend() -> [(&'static str, [u8; 3]); 5] {
    [
        ("strong_decrease", [0, 255, 0]),
        ("moderate_decrease", [128, 255, 128]),
        ("no_change", [255, 255, 255]),
        ("moderate_increase", [255, 128, 128]),
        ("strong_increase", [255, 0, 0]),
    ]
}
