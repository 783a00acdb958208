//! Grayscale PNG export of the density field.

use crate::error::CliError;
use smoke_engine_core::Field;
use std::path::Path;

/// Densities at or above this value map to full white; injection seeds
/// cells at exactly this density.
const DENSITY_SPAN: f64 = 10.0;

/// Writes a field as an 8-bit grayscale PNG, mapping `[0, 10]` linearly
/// onto `[0, 255]` with clamping.
///
/// Returns `CliError::Io` on encoding or write failure.
pub fn write_png(field: &Field, path: &Path) -> Result<(), CliError> {
    let side = u32::try_from(field.dim())
        .map_err(|_| CliError::Io("grid side overflows image dimensions".into()))?;
    let pixels: Vec<u8> = field
        .data()
        .iter()
        .map(|&v| ((v / DENSITY_SPAN).clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    let img = image::GrayImage::from_raw(side, side, pixels)
        .ok_or_else(|| CliError::Io("pixel buffer size mismatch".into()))?;
    img.save(path).map_err(|e| CliError::Io(e.to_string()))
}
