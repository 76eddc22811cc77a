//! Rectangular regions over a cell store

use serde::{Deserialize, Serialize};

use crate::{Array2D, CellLookup, CellStore, TileTypeId};

/// Tile contents of a region, indexed by region-local coordinates
pub type TileSnapshot = Array2D<Option<TileTypeId>>;

/// An inclusive rectangle of grid cells.
///
/// The two corners may be given in any order. A region does not own any
/// cells; reads and writes go through the store passed to each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRegion {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl GridRegion {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A region covering exactly `width` x `height` cells starting at `(x, y)`.
    ///
    /// A zero size is clamped to a single cell. The far corner is clamped to
    /// `i32::MAX`, so a region near the edge of the coordinate space is cut short.
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        let x1 = x.saturating_add_unsigned(width.max(1) - 1);
        let y1 = y.saturating_add_unsigned(height.max(1) - 1);
        Self::new(x, y, x1, y1)
    }

    /// A single-cell region
    pub fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn min_x(&self) -> i32 {
        self.x0.min(self.x1)
    }

    pub fn min_y(&self) -> i32 {
        self.y0.min(self.y1)
    }

    pub fn max_x(&self) -> i32 {
        self.x0.max(self.x1)
    }

    pub fn max_y(&self) -> i32 {
        self.y0.max(self.y1)
    }

    /// Number of columns, saturating at `u32::MAX`
    pub fn width(&self) -> u32 {
        self.x0.abs_diff(self.x1).saturating_add(1)
    }

    /// Number of rows, saturating at `u32::MAX`
    pub fn height(&self) -> u32 {
        self.y0.abs_diff(self.y1).saturating_add(1)
    }

    /// `(min_x, min_y, width, height)`
    pub fn bounds(&self) -> (i32, i32, u32, u32) {
        (self.min_x(), self.min_y(), self.width(), self.height())
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }

    /// Read every cell of the region into a row-major snapshot
    pub fn snapshot(&self, cells: &(impl CellLookup + ?Sized)) -> TileSnapshot {
        let (min_x, min_y, width, height) = self.bounds();
        Array2D::from_fn(width as usize, height as usize, |x, y| {
            let (x, y) = offset(min_x, min_y, x, y);
            cells.cell_type(x, y).cloned()
        })
    }

    /// Write `source` into the region, anchored at the region's minimum corner.
    ///
    /// Only the overlap of the region and the source is written. Cells of the
    /// region not covered by `source` keep their contents.
    pub fn apply(&self, cells: &mut (impl CellStore + ?Sized), source: &TileSnapshot) {
        let width = source.width().min(self.width() as usize);
        let height = source.height().min(self.height() as usize);
        self.write_cells(cells, width, height, |x, y| {
            source.get(x, y).cloned().flatten()
        });
    }

    /// Fill the whole region with `f(local_x, local_y)`
    pub fn apply_with(
        &self,
        cells: &mut (impl CellStore + ?Sized),
        f: impl FnMut(usize, usize) -> Option<TileTypeId>,
    ) {
        self.write_cells(cells, self.width() as usize, self.height() as usize, f);
    }

    /// Fill the whole region with one value
    pub fn apply_constant(&self, cells: &mut (impl CellStore + ?Sized), tile: Option<&TileTypeId>) {
        self.apply_with(cells, |_, _| tile.cloned());
    }

    /// Copy the contents of `other` into this region (partial overlap rules apply)
    pub fn apply_region(&self, cells: &mut (impl CellStore + ?Sized), other: &GridRegion) {
        let source = other.snapshot(&*cells);
        self.apply(cells, &source);
    }

    /// Remove every cell in the region
    pub fn clear(&self, cells: &mut (impl CellStore + ?Sized)) {
        self.apply_constant(cells, None);
    }

    fn write_cells(
        &self,
        cells: &mut (impl CellStore + ?Sized),
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Option<TileTypeId>,
    ) {
        let (min_x, min_y) = (self.min_x(), self.min_y());
        for y in 0..height {
            for x in 0..width {
                let (cx, cy) = offset(min_x, min_y, x, y);
                cells.set_cell_type(cx, cy, f(x, y));
            }
        }
    }
}

/// Grid coordinate of a region-local cell
fn offset(min_x: i32, min_y: i32, x: usize, y: usize) -> (i32, i32) {
    let x = u32::try_from(x).unwrap_or(u32::MAX);
    let y = u32::try_from(y).unwrap_or(u32::MAX);
    (min_x.saturating_add_unsigned(x), min_y.saturating_add_unsigned(y))
}
