//! Coordinate Conversion
//!
//! Converts pixel positions into the normalized 0-65535 coordinate space used
//! by absolute-positioning injection, and provides the path interpolation for
//! timed mouse movement.

use crate::error::{InputError, Result};

/// Scale of the normalized coordinate space (per axis)
pub const NORMALIZED_SCALE: i64 = 65536;

/// Convert a pixel position to normalized absolute coordinates
///
/// The trailing `+1` is a rounding correction: without it, movements can land
/// one pixel short of the target on some display sizes.
pub fn to_absolute(x: i32, y: i32, width: u32, height: u32) -> Result<(i32, i32)> {
    if width == 0 || height == 0 {
        return Err(InputError::DisplayMetrics(width, height));
    }

    let (x, y) = clamp_to_display(x, y, width, height);

    let nx = (x as i64 * NORMALIZED_SCALE) / width as i64 + 1;
    let ny = (y as i64 * NORMALIZED_SCALE) / height as i64 + 1;

    Ok((nx as i32, ny as i32))
}

/// Clamp a pixel position to the display bounds
pub fn clamp_to_display(x: i32, y: i32, width: u32, height: u32) -> (i32, i32) {
    let max_x = (width as i32).saturating_sub(1).max(0);
    let max_y = (height as i32).saturating_sub(1).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Linearly interpolate a path between two pixel positions
///
/// Returns `steps` points; the last point is exactly `to`. A zero step count
/// is treated as one.
pub fn lerp_path(from: (i32, i32), to: (i32, i32), steps: u32) -> Vec<(i32, i32)> {
    let steps = steps.max(1);
    let mut path = Vec::with_capacity(steps as usize);

    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let x = from.0 as f64 + (to.0 - from.0) as f64 * t;
        let y = from.1 as f64 + (to.1 - from.1) as f64 * t;
        path.push((x.round() as i32, y.round() as i32));
    }

    // Guard against rounding drift on the terminal point
    if let Some(last) = path.last_mut() {
        *last = to;
    }
    path
}
