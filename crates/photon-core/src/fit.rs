//! Bounding-box fitting that preserves aspect ratio and never upscales.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Pixel dimensions.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct Size {
  pub width:  u32,
  pub height: u32,
}

impl Size {
  pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }

  fn aspect_ratio(&self) -> f64 { self.width as f64 / self.height as f64 }

  fn contains(&self, other: &Size) -> bool {
    self.width >= other.width && self.height >= other.height
  }

  fn check_positive(&self, what: &str) -> Result<()> {
    if self.width == 0 || self.height == 0 {
      return Err(Error::InvalidArgument(format!(
        "{what} must have positive dimensions, got {}x{}",
        self.width, self.height
      )));
    }
    Ok(())
  }
}

impl std::fmt::Display for Size {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// Compute the display size of `source` inside `bounds`.
///
/// If `bounds` already contains `source` the source size is returned as is.
/// Otherwise the axis where the source is relatively larger is pinned to the
/// bounds and the other axis is derived from the source aspect ratio, rounded
/// to the nearest pixel.
pub fn fit_size(source: Size, bounds: Size) -> Result<Size> {
  source.check_positive("source")?;
  bounds.check_positive("bounds")?;

  if bounds.contains(&source) {
    return Ok(source);
  }

  let src_ratio = source.aspect_ratio();

  // The pinned axis is copied from the bounds, only the derived one is rounded.
  // The derived axis never drops below one pixel.
  if src_ratio > bounds.aspect_ratio() {
    let width = bounds.width;
    let height = ((width as f64 / src_ratio).round() as u32).max(1);
    Ok(Size::new(width, height))
  } else {
    let height = bounds.height;
    let width = ((height as f64 * src_ratio).round() as u32).max(1);
    Ok(Size::new(width, height))
  }
}
