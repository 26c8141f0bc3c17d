//! Image buffer that collects pixel estimates and writes them to disk.

use crate::{
    error::{RenderError, Result},
    partition::RowRange,
    Color,
};
use lumen_math::{Interval, UVec2};
use std::path::Path;

/// Linear RGB image buffer, rows stored top to bottom.
#[derive(Debug, Clone)]
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Film {
    /// Create a new film filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at `pixel`.
    pub fn get(&self, pixel: UVec2) -> Color {
        self.pixels[pixel_index(self.width, pixel)]
    }

    /// Store the final estimate for `pixel`.
    pub fn write_color(&mut self, color: Color, pixel: UVec2) {
        self.pixels[pixel_index(self.width, pixel)] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The whole image as a single writable band.
    pub fn all_rows_mut(&mut self) -> FilmRows<'_> {
        FilmRows {
            rows: RowRange::new(0, self.height),
            width: self.width,
            pixels: &mut self.pixels,
        }
    }

    /// Split the image into one writable band per range.
    ///
    /// `ranges` must tile `[0, height)` in order, as produced by
    /// [`partition_rows`](crate::partition_rows); the bands are then
    /// disjoint borrows and can be filled from different threads.
    pub fn rows_mut(&mut self, ranges: &[RowRange]) -> Vec<FilmRows<'_>> {
        let width = self.width;
        let mut rest: &mut [Color] = &mut self.pixels;
        let mut next_row = 0;
        let mut bands = Vec::with_capacity(ranges.len());

        for &rows in ranges {
            assert_eq!(rows.start, next_row, "row ranges must be contiguous");
            let band_len = rows.len() as usize * width as usize;
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(band_len);
            bands.push(FilmRows {
                rows,
                width,
                pixels: band,
            });
            rest = tail;
            next_row = rows.end;
        }

        assert_eq!(next_row, self.height, "row ranges must cover the image");
        bands
    }

    /// Convert to gamma-encoded 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Encode the image to `path`, choosing the format from its extension.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
        .map_err(|source| RenderError::WriteImage {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// A contiguous band of film rows owned by one worker.
#[derive(Debug)]
pub struct FilmRows<'a> {
    rows: RowRange,
    width: u32,
    pixels: &'a mut [Color],
}

impl FilmRows<'_> {
    /// Rows this band may write.
    pub fn rows(&self) -> RowRange {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Store the final estimate for `pixel`, given in image coordinates.
    pub fn write_color(&mut self, color: Color, pixel: UVec2) {
        assert!(
            self.rows.contains(pixel.y),
            "row {} outside band {:?}",
            pixel.y,
            self.rows
        );
        let local = UVec2::new(pixel.x, pixel.y - self.rows.start);
        self.pixels[pixel_index(self.width, local)] = color;
    }
}

/// Row-major offset of `pixel`, computed in `usize` so large frames cannot wrap.
#[inline]
fn pixel_index(width: u32, pixel: UVec2) -> usize {
    pixel.y as usize * width as usize + pixel.x as usize
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let encode = |c: f32| (255.0 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}
