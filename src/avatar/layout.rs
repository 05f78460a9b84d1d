//! Square tile sizing for packing `n` avatars into a fixed canvas.

use crate::error::{GhstatsError, Result};

fn capacity(width: u32, height: u32, side: u32) -> u64 {
    (width / side) as u64 * (height / side) as u64
}

/// Two-candidate closed form for the largest square side fitting `n` squares
/// into `x` by `y`: one candidate packs by columns, the other by rows.
fn closed_form_side(x: f64, y: f64, n: f64) -> f64 {
    let px = (n * x / y).sqrt().ceil();
    let py = (n * y / x).sqrt().ceil();

    let sx = if (px * y / x).floor() * px < n {
        y / (px * y / x).ceil()
    } else {
        x / px
    };
    let sy = if (py * x / y).floor() * py < n {
        x / (x * py / y).ceil()
    } else {
        y / py
    };

    sx.max(sy).floor()
}

/// Largest integer tile side such that `floor(width/side) * floor(height/side) >= n`.
///
/// The closed form gives the starting side; it never overshoots capacity
/// but can land a few pixels under the best integer side, so the result is
/// nudged to the maximal side that still fits. `None` when not even 1-pixel
/// tiles fit, and `n == 0` yields the shorter canvas edge.
pub fn resize_value(width: u32, height: u32, n: usize) -> Option<u32> {
    if width == 0 || height == 0 {
        return None;
    }
    if n == 0 {
        return Some(width.min(height));
    }

    let n = n as u64;
    let longest = width.max(height);
    let seed = closed_form_side(width as f64, height as f64, n as f64);
    let mut side = (seed as u32).clamp(1, longest);

    while side > 1 && capacity(width, height, side) < n {
        side -= 1;
    }
    if capacity(width, height, side) < n {
        return None;
    }
    while side < longest && capacity(width, height, side + 1) >= n {
        side += 1;
    }
    Some(side)
}

/// Grid geometry of a mosaic: tile side, cell counts and centring margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicLayout {
    pub width: u32,
    pub height: u32,
    pub side: u32,
    pub cols: u32,
    pub rows: u32,
    pub left: u32,
    pub top: u32,
}

impl MosaicLayout {
    pub fn new(width: u32, height: u32, tiles: usize) -> Result<Self> {
        let side = resize_value(width, height, tiles).ok_or_else(|| {
            GhstatsError::Config(format!(
                "A {width}x{height} canvas cannot hold {tiles} avatars"
            ))
        })?;
        let cols = width / side;
        let rows = height / side;
        // Odd leftovers put the extra pixel on the left/top margin.
        let left = (width - cols * side).div_ceil(2);
        let top = (height - rows * side).div_ceil(2);
        Ok(Self {
            width,
            height,
            side,
            cols,
            rows,
            left,
            top,
        })
    }

    pub fn cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Top-left pixel of cell `index`, walking the grid column by column.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let rows = self.rows as usize;
        let col = (index / rows) as u32;
        let row = (index % rows) as u32;
        (col * self.side + self.left, row * self.side + self.top)
    }
}
