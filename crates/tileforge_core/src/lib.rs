//! Core data structures for tileforge
//!
//! This crate provides the grid primitives the autotile engine and the
//! level editor operate on:
//! - `TileTypeId` - Identifier stored in a grid cell
//! - `CellLookup` / `CellStore` - Read and write access to a sparse grid
//! - `CellGrid` - Hash-map backed cell store with optional bounds
//! - `GridSettings` - Per-layer grid configuration
//! - `GridRegion` - Rectangular view used for snapshot and batch writes
//! - `Array2D` - Row-major 2D array used for region snapshots

mod array;
mod grid;
mod region;

pub use array::Array2D;
pub use grid::{CellGrid, CellLookup, CellStore, GridSettings, TileTypeId};
pub use region::{GridRegion, TileSnapshot};
