//! Rule-based autotile system
//!
//! A [`TileType`] resolves to a material by testing its ordered list of
//! [`Rule`]s against the eight neighbors of a cell. Each rule holds up to
//! eight [`Dependency`] slots, one per [`Direction`]; the first rule whose
//! present dependencies are all satisfied wins, otherwise the tile type's
//! default material is used.
//!
//! # Example
//!
//! ```rust,ignore
//! use tileforge_autotile::{Dependency, Direction, TileSet};
//! use tileforge_core::{CellGrid, CellStore};
//!
//! let mut tile_set = TileSet::new("terrain.tileset.json");
//! let grass = tile_set.add_type_named("grass");
//!
//! // Grass with nothing above it gets an edge material
//! let rule = tile_set.add_rule(&grass).unwrap();
//! tile_set
//!     .get_mut(&grass)
//!     .and_then(|t| t.rule_mut(rule))
//!     .unwrap()
//!     .set_dependency(Direction::TopCenter, Some(Dependency::Empty));
//!
//! let mut grid = CellGrid::new();
//! grid.set_cell_type(0, 0, Some(grass.clone()));
//! let material = tile_set.material_at(&grass, &grid, 0, 0);
//! ```

pub mod dependency;
pub mod manager;
pub mod material;
pub mod persist;
pub mod rule;
pub mod tile_type;
pub mod tileset;

// Re-export main types at crate root
pub use dependency::{Dependency, DependencyKind, Direction};
pub use manager::TileSetManager;
pub use material::{Color, Material, MaterialContext, MaterialLibrary, MaterialRef};
pub use persist::TileSetError;
pub use rule::{Rule, RuleId};
pub use tile_type::TileType;
pub use tileset::TileSet;

// Re-export tileforge_core
pub use tileforge_core;
