//! Sprite sheet slicing
//!
//! A sheet is cut into a fixed grid of equal cells, one figure per cell.
//! The atlas is generic over the image handle so the simulation runs the
//! same with a browser image or no image at all.

use glam::Vec2;

use crate::consts::MAX_FIGURES;
use crate::error::CrowdError;

/// Cell count of a `rows * cols` grid, if it is non-empty and within
/// [`MAX_FIGURES`]
pub fn grid_cells(rows: u32, cols: u32) -> Option<u32> {
    rows.checked_mul(cols)
        .filter(|&cells| cells > 0 && cells <= MAX_FIGURES)
}

/// A rectangle in sheet or stage pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True if the two rectangles share any area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// An immutable sprite sheet with its grid of cells
#[derive(Debug, Clone)]
pub struct SpriteAtlas<I> {
    image: I,
    cells: Vec<Rect>,
}

impl<I> SpriteAtlas<I> {
    /// Slice a decoded sheet of `size` pixels into `rows * cols` cells.
    ///
    /// `rows` counts cells across and `cols` cells down: cell `i` sits at
    /// column `i % rows`, line `i / rows`.
    pub fn new(image: I, size: Vec2, rows: u32, cols: u32) -> Result<Self, CrowdError> {
        let Some(count) = grid_cells(rows, cols) else {
            return Err(CrowdError::InvalidGrid { rows, cols });
        };
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(CrowdError::ImageNotDecoded {
                width: size.x,
                height: size.y,
            });
        }

        let cell_w = size.x / rows as f32;
        let cell_h = size.y / cols as f32;
        let cells = (0..count)
            .map(|i| {
                Rect::new(
                    (i % rows) as f32 * cell_w,
                    (i / rows) as f32 * cell_h,
                    cell_w,
                    cell_h,
                )
            })
            .collect();

        Ok(Self { image, cells })
    }

    #[inline]
    pub fn image(&self) -> &I {
        &self.image
    }

    /// All cells, row-major
    #[inline]
    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_cell_count() {
        let atlas = SpriteAtlas::new((), Vec2::new(1500.0, 700.0), 15, 7).unwrap();
        assert_eq!(atlas.len(), 105);
        assert!(atlas.cells().iter().all(|c| c.size() == Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_cell_index_mapping() {
        let atlas = SpriteAtlas::new((), Vec2::new(300.0, 200.0), 3, 2).unwrap();
        // i -> (i % rows, i / rows)
        assert_eq!(atlas.cells()[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(atlas.cells()[2], Rect::new(200.0, 0.0, 100.0, 100.0));
        assert_eq!(atlas.cells()[3], Rect::new(0.0, 100.0, 100.0, 100.0));
        assert_eq!(atlas.cells()[5], Rect::new(200.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_cells_tile_without_overlap() {
        let atlas = SpriteAtlas::new((), Vec2::new(640.0, 480.0), 4, 3).unwrap();
        let cells = atlas.cells();
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
        let area: f32 = cells.iter().map(|c| c.width * c.height).sum();
        assert!((area - 640.0 * 480.0).abs() < 0.5);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = SpriteAtlas::new((), Vec2::new(100.0, 100.0), 0, 7).unwrap_err();
        assert!(matches!(err, CrowdError::InvalidGrid { rows: 0, cols: 7 }));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        // Product overflows u32
        let err = SpriteAtlas::new((), Vec2::new(1.0, 1.0), 65536, 65536).unwrap_err();
        assert!(matches!(err, CrowdError::InvalidGrid { rows: 65536, cols: 65536 }));

        // Fits, but far beyond any sheet
        assert!(SpriteAtlas::new((), Vec2::new(1.0, 1.0), 60000, 60000).is_err());
        assert!(SpriteAtlas::new((), Vec2::new(1.0, 1.0), MAX_FIGURES, 1).is_ok());
        assert!(SpriteAtlas::new((), Vec2::new(1.0, 1.0), MAX_FIGURES + 1, 1).is_err());
    }

    #[test]
    fn test_grid_cells() {
        assert_eq!(grid_cells(15, 7), Some(105));
        assert_eq!(grid_cells(0, 7), None);
        assert_eq!(grid_cells(u32::MAX, 2), None);
    }

    #[test]
    fn test_rejects_undecoded_image() {
        let err = SpriteAtlas::new((), Vec2::ZERO, 15, 7).unwrap_err();
        assert!(matches!(err, CrowdError::ImageNotDecoded { .. }));
    }
}
