use anyhow::{bail, Context, Result};
use image::{ImageBuffer, Rgb};

use super::colormap::ColorField;

/// Diverging ramp sample: green at -1, white at 0, red at +1.
pub fn diverging_ramp(normalized: f64) -> [u8; 3] {
    let n = normalized.clamp(-1.0, 1.0);
    if n < 0.0 {
        let fade = (255.0 * (1.0 + n)).round() as u8;
        [fade, 255, fade]
    } else {
        let fade = (255.0 * (1.0 - n)).round() as u8;
        [255, fade, fade]
    }
}

/// Writes a color field as a row-major strip texture, `width` points per
/// row. Pixels past the last point stay black.
pub fn create_change_texture(field: &ColorField, width: u32, filename: &str) -> Result<()> {
    if width == 0 || field.colors.is_empty() {
        bail!("cannot render an empty color field");
    }

    let height = (field.colors.len() as u32).div_ceil(width);
    let mut img = ImageBuffer::new(width, height);
    for (i, color) in field.colors.iter().enumerate() {
        let x = (i % width as usize) as u32;
        // Flip Y-axis by subtracting from height - 1
        let y = (height - 1) - (i as u32 / width);
        img.put_pixel(x, y, Rgb(*color));
    }
    img.save(filename)
        .with_context(|| format!("failed to save change texture {}", filename))?;
    Ok(())
}

/// Horizontal legend strip running the full diverging ramp left to right.
pub fn create_legend_texture(width: u32, height: u32, filename: &str) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("legend texture needs a nonzero size");
    }

    let mut img = ImageBuffer::new(width, height);
    for x in 0..width {
        let t = if width > 1 {
            x as f64 / (width - 1) as f64
        } else {
            0.5
        };
        let color = Rgb(diverging_ramp(t * 2.0 - 1.0));
        for y in 0..height {
            img.put_pixel(x, y, color);
        }
    }
    img.save(filename)
        .with_context(|| format!("failed to save legend texture {}", filename))?;
    Ok(())
}
