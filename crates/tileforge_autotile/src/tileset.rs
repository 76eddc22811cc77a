//! Tile sets: named collections of tile types and the materials they own

use std::collections::BTreeMap;
use tileforge_core::{CellLookup, TileTypeId};
use uuid::Uuid;

use crate::material::{Material, MaterialContext, MaterialLibrary, MaterialRef};
use crate::rule::{Rule, RuleId};
use crate::tile_type::TileType;

/// A set of tile types.
///
/// Every material referenced by the set's tile types and rules is created by,
/// and owned by, the set's [`MaterialLibrary`]. Removing a rule or a tile
/// type releases the materials it owned.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    name: String,
    types: BTreeMap<TileTypeId, TileType>,
    materials: MaterialLibrary,
}

impl TileSet {
    /// Create an empty tile set. The name is used as the prefix of material names.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: BTreeMap::new(),
            materials: MaterialLibrary::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &TileTypeId) -> Option<&TileType> {
        self.types.get(id)
    }

    /// Mutable access for editing dependencies, rule order and size.
    ///
    /// Rules are added and removed through [`TileSet::add_rule`],
    /// [`TileSet::push_rule`] and [`TileSet::remove_rule`] so the set can
    /// track the materials they own.
    pub fn get_mut(&mut self, id: &TileTypeId) -> Option<&mut TileType> {
        self.types.get_mut(id)
    }

    pub fn contains(&self, id: &TileTypeId) -> bool {
        self.types.contains_key(id)
    }

    /// Ids of all tile types, in sorted order
    pub fn type_ids(&self) -> impl Iterator<Item = &TileTypeId> {
        self.types.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileTypeId, &TileType)> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Mutable access to material definitions, e.g. for a material editor
    pub fn material_mut(&mut self, material: &MaterialRef) -> Option<&mut Material> {
        self.materials.get_mut(material)
    }

    /// Create a tile type with a generated id, no rules and a placeholder material
    pub fn add_type(&mut self) -> TileTypeId {
        self.add_type_named(Uuid::new_v4().to_string())
    }

    /// Create a tile type under an explicit id.
    ///
    /// An existing tile type with the same id is replaced and its materials released.
    pub fn add_type_named(&mut self, id: impl Into<TileTypeId>) -> TileTypeId {
        let id = id.into();
        let default_material = self.materials.create(&self.name);
        self.insert_type(id.clone(), TileType::new(default_material));
        id
    }

    /// Insert a tile type built elsewhere.
    ///
    /// The tile set takes ownership of the materials the tile type references;
    /// any that are not yet in the library are added as placeholders.
    pub fn insert_type(&mut self, id: TileTypeId, tile_type: TileType) {
        let referenced = std::iter::once(&tile_type.default_material)
            .chain(tile_type.rules().iter().map(|r| &r.material));
        for material in referenced {
            if !self.materials.contains(material) {
                self.materials.insert(material.clone(), Material::default());
            }
        }
        if let Some(previous) = self.types.insert(id.clone(), tile_type) {
            tracing::debug!("replacing tile type '{}' in tile set '{}'", id, self.name);
            self.release(&previous);
        }
    }

    /// Delete a tile type and release its materials.
    /// Returns `false` if the id is unknown.
    pub fn remove_type(&mut self, id: &TileTypeId) -> bool {
        match self.types.remove(id) {
            Some(tile_type) => {
                self.release(&tile_type);
                true
            }
            None => {
                tracing::debug!("remove_type: no tile type '{}' in '{}'", id, self.name);
                false
            }
        }
    }

    /// Remove every tile type and release all materials
    pub fn clear(&mut self) {
        self.types.clear();
        self.materials.clear();
    }

    /// Append a rule with a fresh placeholder material to a tile type.
    /// Returns `None` if the tile type is unknown.
    pub fn add_rule(&mut self, id: &TileTypeId) -> Option<RuleId> {
        let tile_type = self.types.get_mut(id)?;
        let material = self.materials.create(&self.name);
        Some(tile_type.add_rule(material))
    }

    /// Append an already built rule to a tile type.
    ///
    /// The rule's material is adopted into the library if it is not there yet.
    /// Returns `None` if the tile type is unknown.
    pub fn push_rule(&mut self, id: &TileTypeId, rule: Rule) -> Option<RuleId> {
        let tile_type = self.types.get_mut(id)?;
        if !self.materials.contains(&rule.material) {
            self.materials.insert(rule.material.clone(), Material::default());
        }
        Some(tile_type.push_rule(rule))
    }

    /// Remove a rule by handle and release its material.
    ///
    /// A stale handle leaves the set untouched and returns `false`.
    pub fn remove_rule(&mut self, id: &TileTypeId, rule: RuleId) -> bool {
        let removed = self.types.get_mut(id).and_then(|t| t.remove_rule(rule));
        match removed {
            Some(rule) => {
                self.release_material(&rule.material);
                true
            }
            None => {
                tracing::warn!(
                    "remove_rule: rule {} not found on tile type '{}' in '{}'",
                    rule,
                    id,
                    self.name
                );
                false
            }
        }
    }

    /// Copy every tile type of `other` into this set.
    ///
    /// Tile types with the same id are replaced and their materials released;
    /// other tile types are kept. Copied tile types and rules get fresh
    /// materials owned by this set, initialized from `other`'s definitions.
    pub fn set_from(&mut self, other: &TileSet) {
        for (id, source) in other.iter() {
            let default_material = self.copy_material(other, &source.default_material);
            let mut tile_type = TileType::new(default_material);
            tile_type.width = source.width;
            tile_type.height = source.height;

            for rule in source.rules() {
                let mut copy = Rule::new(self.copy_material(other, &rule.material));
                for (direction, dependency) in rule.dependencies() {
                    copy.set_dependency(direction, Some(dependency.clone()));
                }
                tile_type.push_rule(copy);
            }

            self.insert_type(id.clone(), tile_type);
        }
        tracing::debug!(
            "copied {} tile types from '{}' into '{}'",
            other.len(),
            other.name,
            self.name
        );
    }

    /// Pick the material reference for a cell holding tile type `id`.
    /// Returns `None` only if the tile type is unknown.
    pub fn material_at(
        &self,
        id: &TileTypeId,
        cells: &(impl CellLookup + ?Sized),
        x: i32,
        y: i32,
    ) -> Option<&MaterialRef> {
        self.get(id).map(|t| t.material_at(cells, x, y))
    }

    /// Resolve the material definition for the tile at `(x, y)` of `cells`
    pub fn resolve_cell(
        &self,
        cells: &(impl CellLookup + ?Sized),
        x: i32,
        y: i32,
    ) -> Option<&Material> {
        let id = cells.cell_type(x, y)?;
        let tile_type = self.get(id)?;
        tile_type.resolve_material(cells, x, y, &self.materials)
    }

    fn copy_material(&mut self, other: &TileSet, material: &MaterialRef) -> MaterialRef {
        let definition = other.materials.get(material).cloned().unwrap_or_default();
        self.materials.create_with(&self.name, definition)
    }

    fn release(&mut self, tile_type: &TileType) {
        self.release_material(&tile_type.default_material);
        for rule in tile_type.rules() {
            self.release_material(&rule.material);
        }
    }

    fn release_material(&mut self, material: &MaterialRef) {
        let still_used = self.types.values().any(|t| {
            t.default_material == *material || t.rules().iter().any(|r| r.material == *material)
        });
        if !still_used {
            self.materials.remove(material);
        }
    }

    pub(crate) fn from_parts(
        name: String,
        types: BTreeMap<TileTypeId, TileType>,
        materials: MaterialLibrary,
    ) -> Self {
        Self {
            name,
            types,
            materials,
        }
    }
}

impl MaterialContext for TileSet {
    fn get(&self, material: &MaterialRef) -> Option<&Material> {
        self.materials.get(material)
    }
}
