use super::layout::MosaicLayout;
use crate::error::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbImage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use tracing::debug;

/// Decode a cached avatar, trusting its bytes over its file extension.
pub fn load_tile(path: &Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Composite `images` into a `width` by `height` canvas.
///
/// Images are padded with empty cells up to the full grid, shuffled with
/// `rng`, and placed column by column. Empty cells stay black.
pub fn build_mosaic<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    images: Vec<DynamicImage>,
    rng: &mut R,
) -> Result<RgbImage> {
    let layout = MosaicLayout::new(width, height, images.len())?;
    debug!(
        tiles = images.len(),
        side = layout.side,
        cols = layout.cols,
        rows = layout.rows,
        left = layout.left,
        top = layout.top,
        "mosaic layout"
    );

    let mut cells: Vec<Option<DynamicImage>> = images.into_iter().map(Some).collect();
    cells.resize_with(layout.cells(), || None);
    cells.shuffle(rng);

    let mut canvas = RgbImage::new(width, height);
    for (index, cell) in cells.iter().enumerate() {
        let Some(image) = cell else {
            continue;
        };
        let tile = imageops::resize(&image.to_rgb8(), layout.side, layout.side, FilterType::CatmullRom);
        let (x, y) = layout.cell_origin(index);
        imageops::replace(&mut canvas, &tile, i64::from(x), i64::from(y));
    }
    Ok(canvas)
}
