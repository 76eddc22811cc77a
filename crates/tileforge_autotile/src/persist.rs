//! Tile set file format
//!
//! Tile sets are stored as JSON:
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "grass",
//!       "width": 1.0,
//!       "height": 1.0,
//!       "defaultMaterial": "terrain/5c0e....material",
//!       "rules": [
//!         {
//!           "material": "terrain/9a41....material",
//!           "topCenter": { "type": "EMPTY" },
//!           "bottomCenter": { "type": "TILE", "tileTypes": ["water"] }
//!         }
//!       ]
//!     }
//!   ],
//!   "materials": {
//!     "terrain/5c0e....material": { "colorTexturePath": "...", "shader": "...", "color": { ... } }
//!   }
//! }
//! ```
//!
//! Loading is lenient: a malformed dependency slot, rule or tile type is
//! skipped with a warning instead of failing the whole file. Only a file that
//! is not a JSON object at all is an error. Loading never modifies an existing
//! tile set unless the whole file was read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tileforge_core::TileTypeId;

use crate::dependency::{Dependency, DependencyKind, Direction};
use crate::material::{Material, MaterialContext, MaterialLibrary, MaterialRef};
use crate::rule::Rule;
use crate::tile_type::TileType;
use crate::tileset::TileSet;

/// Error type for tile set loading and saving failures
#[derive(Debug, Error)]
pub enum TileSetError {
    #[error("Tile set file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read or write tile set file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid tile set format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Deserialize)]
struct DependencyRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "tileTypes", default)]
    tile_types: Option<Vec<TileTypeId>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TileTypeRecord<'a> {
    name: &'a TileTypeId,
    width: f32,
    height: f32,
    default_material: &'a MaterialRef,
    rules: Vec<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
struct TileSetRecord<'a> {
    types: Vec<TileTypeRecord<'a>>,
    materials: &'a MaterialLibrary,
}

impl TileSet {
    /// Serialize to the tile set JSON format
    pub fn to_json(&self) -> Result<String, TileSetError> {
        let types = self
            .iter()
            .map(|(id, tile_type)| TileTypeRecord {
                name: id,
                width: tile_type.width,
                height: tile_type.height,
                default_material: &tile_type.default_material,
                rules: tile_type.rules().iter().map(write_rule).collect(),
            })
            .collect();

        let record = TileSetRecord {
            types,
            materials: self.materials(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Parse a tile set from JSON
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, TileSetError> {
        let value: Value = serde_json::from_str(json)?;
        read_tile_set(name.into(), value)
    }

    /// Replace the contents of this tile set with the parsed JSON.
    ///
    /// On error the tile set is left unchanged.
    pub fn read_json(&mut self, json: &str) -> Result<(), TileSetError> {
        let loaded = Self::from_json(self.name().to_string(), json)?;
        *self = loaded;
        Ok(())
    }

    /// Load a tile set file. The path becomes the tile set's name.
    pub fn load(path: &Path) -> Result<Self, TileSetError> {
        if !path.exists() {
            return Err(TileSetError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(path.to_string_lossy().to_string(), &content)
    }

    /// Save to a tile set file
    pub fn save(&self, path: &Path) -> Result<(), TileSetError> {
        let content = self.to_json()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn write_rule(rule: &Rule) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        "material".to_string(),
        Value::String(rule.material.as_str().to_string()),
    );
    for (direction, dependency) in rule.dependencies() {
        map.insert(direction.key().to_string(), write_dependency(dependency));
    }
    map
}

fn write_dependency(dependency: &Dependency) -> Value {
    let mut record = Map::new();
    record.insert(
        "type".to_string(),
        Value::String(dependency.kind().as_str().to_string()),
    );
    if let Some(types) = dependency.tile_types() {
        let types = types
            .iter()
            .map(|t| Value::String(t.as_str().to_string()))
            .collect();
        record.insert("tileTypes".to_string(), Value::Array(types));
    }
    Value::Object(record)
}

fn read_tile_set(name: String, value: Value) -> Result<TileSet, TileSetError> {
    let Value::Object(mut root) = value else {
        return Err(TileSetError::InvalidFormat(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let mut definitions = match root.remove("materials") {
        Some(Value::Object(entries)) => read_materials(&name, entries),
        Some(_) => {
            tracing::warn!("tile set '{}': 'materials' is not an object", name);
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    };

    let type_values = match root.remove("types") {
        Some(Value::Array(values)) => values,
        Some(_) => {
            tracing::warn!("tile set '{}': 'types' is not an array", name);
            Vec::new()
        }
        None => Vec::new(),
    };

    let mut materials = MaterialLibrary::new();
    let mut types = BTreeMap::new();

    for value in type_values {
        let Value::Object(record) = value else {
            tracing::warn!("tile set '{}': skipping non-object tile type", name);
            continue;
        };
        let Some(id) = record.get("name").and_then(Value::as_str) else {
            tracing::warn!("tile set '{}': skipping tile type without a name", name);
            continue;
        };
        let id = TileTypeId::new(id);

        let default_material = adopt_material(
            &name,
            record.get("defaultMaterial"),
            &mut definitions,
            &mut materials,
        );
        let mut tile_type = TileType::new(default_material);
        tile_type.width = read_f32(&record, "width").unwrap_or(1.0);
        tile_type.height = read_f32(&record, "height").unwrap_or(1.0);

        if let Some(Value::Array(rules)) = record.get("rules") {
            for rule in rules {
                let Value::Object(rule) = rule else {
                    tracing::warn!("tile type '{}': skipping non-object rule", id);
                    continue;
                };
                let material =
                    adopt_material(&name, rule.get("material"), &mut definitions, &mut materials);
                let mut parsed = Rule::new(material);
                for direction in Direction::ALL {
                    if let Some(slot) = rule.get(direction.key()) {
                        parsed.set_dependency(direction, read_dependency(&id, direction, slot));
                    }
                }
                tile_type.push_rule(parsed);
            }
        }

        if let Some(previous) = types.insert(id.clone(), tile_type) {
            tracing::warn!("tile set '{}': duplicate tile type '{}', keeping the last", name, id);
            materials.remove(&previous.default_material);
            for rule in previous.rules() {
                materials.remove(&rule.material);
            }
        }
    }

    for (id, tile_type) in &types {
        for referenced in tile_type.referenced_types() {
            if !types.contains_key(referenced) {
                tracing::debug!("tile type '{}' depends on unknown tile type '{}'", id, referenced);
            }
        }
    }

    Ok(TileSet::from_parts(name, types, materials))
}

/// Parse material definitions one by one, skipping the malformed ones
fn read_materials(owner: &str, entries: Map<String, Value>) -> BTreeMap<MaterialRef, Material> {
    let mut definitions = BTreeMap::new();
    for (reference, value) in entries {
        match serde_json::from_value::<Material>(value) {
            Ok(material) => {
                definitions.insert(MaterialRef::new(reference), material);
            }
            Err(e) => {
                tracing::warn!(
                    "tile set '{}': skipping malformed material '{}': {}",
                    owner,
                    reference,
                    e
                );
            }
        }
    }
    definitions
}

/// Take ownership of a persisted material reference.
///
/// Missing or duplicate references get a freshly allocated material so that
/// every rule and tile type owns its own entry.
fn adopt_material(
    owner: &str,
    value: Option<&Value>,
    definitions: &mut BTreeMap<MaterialRef, Material>,
    materials: &mut MaterialLibrary,
) -> MaterialRef {
    let Some(reference) = value.and_then(Value::as_str).map(MaterialRef::new) else {
        return materials.create(owner);
    };
    if materials.contains(&reference) {
        let definition = materials.get(&reference).cloned().unwrap_or_default();
        return materials.create_with(owner, definition);
    }
    let definition = definitions.remove(&reference).unwrap_or_default();
    materials.insert(reference.clone(), definition);
    reference
}

fn read_f32(record: &Map<String, Value>, key: &str) -> Option<f32> {
    record.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn read_dependency(tile: &TileTypeId, direction: Direction, value: &Value) -> Option<Dependency> {
    // An empty object is how an unset slot is written by older files
    if value.as_object().is_some_and(|o| o.is_empty()) || value.is_null() {
        return None;
    }

    let record: DependencyRecord = match serde_json::from_value(value.clone()) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(
                "tile type '{}': skipping malformed {} dependency: {}",
                tile,
                direction.key(),
                e
            );
            return None;
        }
    };

    match record.kind.parse::<DependencyKind>() {
        Ok(DependencyKind::Solid) => Some(Dependency::Solid),
        Ok(DependencyKind::Empty) => Some(Dependency::Empty),
        Ok(DependencyKind::Tile) => Some(Dependency::tiles(record.tile_types.unwrap_or_default())),
        Err(e) => {
            tracing::warn!("tile type '{}': {} dependency skipped: {}", tile, direction.key(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileforge_core::{CellGrid, CellStore};

    fn sample_set() -> TileSet {
        let mut set = TileSet::new("terrain.tileset.json");
        let grass = set.add_type_named("grass");
        set.add_type_named("water");

        let edge = set.add_rule(&grass).unwrap();
        let shore = set.add_rule(&grass).unwrap();
        let tile_type = set.get_mut(&grass).unwrap();
        tile_type.width = 2.0;
        tile_type
            .rule_mut(edge)
            .unwrap()
            .set_dependency(Direction::TopCenter, Some(Dependency::Empty));
        let rule = tile_type.rule_mut(shore).unwrap();
        rule.set_dependency(Direction::BottomCenter, Some(Dependency::tiles(["water"])));
        rule.set_dependency(Direction::CenterLeft, Some(Dependency::Solid));
        set
    }

    #[test]
    fn test_save_and_load_preserves_rules() {
        let set = sample_set();
        let json = set.to_json().unwrap();
        let loaded = TileSet::from_json(set.name(), &json).unwrap();

        assert_eq!(loaded.len(), 2);
        let grass = loaded.get(&"grass".into()).unwrap();
        let original = set.get(&"grass".into()).unwrap();
        assert_eq!(grass.width, 2.0);
        assert_eq!(grass.height, 1.0);
        assert_eq!(grass.default_material, original.default_material);
        assert_eq!(grass.rules().len(), 2);
        for (a, b) in grass.rules().iter().zip(original.rules()) {
            assert_eq!(a.material, b.material);
            let deps_a: Vec<_> = a.dependencies().collect();
            let deps_b: Vec<_> = b.dependencies().collect();
            assert_eq!(deps_a, deps_b);
        }
        assert_eq!(loaded.materials().len(), set.materials().len());
    }

    #[test]
    fn test_written_format_uses_string_tags() {
        let json = sample_set().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let grass = value["types"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == "grass")
            .unwrap();
        let rules = grass["rules"].as_array().unwrap();
        assert_eq!(rules[0]["topCenter"]["type"], "EMPTY");
        assert!(rules[0]["topCenter"].get("tileTypes").is_none());
        assert_eq!(rules[1]["bottomCenter"]["type"], "TILE");
        assert_eq!(rules[1]["bottomCenter"]["tileTypes"][0], "water");
        assert_eq!(rules[1]["centerLeft"]["type"], "SOLID");
        assert!(rules[1].get("topLeft").is_none());
    }

    #[test]
    fn test_malformed_slots_are_skipped() {
        let json = r#"{
            "types": [
                {
                    "name": "grass",
                    "rules": [
                        {
                            "material": "m/edge.material",
                            "topLeft": { "type": "LAVA" },
                            "topCenter": { "type": "EMPTY" },
                            "topRight": 42,
                            "centerLeft": {},
                            "bottomCenter": { "type": "TILE" }
                        },
                        "not a rule"
                    ]
                },
                { "width": 3.0 },
                7
            ]
        }"#;
        let set = TileSet::from_json("set", json).unwrap();
        assert_eq!(set.len(), 1);

        let grass = set.get(&"grass".into()).unwrap();
        assert_eq!(grass.width, 1.0);
        assert_eq!(grass.rules().len(), 1);
        let rule = &grass.rules()[0];
        assert_eq!(rule.material.as_str(), "m/edge.material");
        assert_eq!(rule.dependency(Direction::TopLeft), None);
        assert_eq!(rule.dependency(Direction::TopCenter), Some(&Dependency::Empty));
        assert_eq!(rule.dependency(Direction::TopRight), None);
        assert_eq!(rule.dependency(Direction::CenterLeft), None);
        assert_eq!(
            rule.dependency(Direction::BottomCenter),
            Some(&Dependency::tiles(Vec::<TileTypeId>::new()))
        );
        assert!(set.materials().get(&rule.material).is_some());
    }

    #[test]
    fn test_malformed_material_does_not_discard_others() {
        let json = r#"{
            "types": [
                { "name": "a", "defaultMaterial": "good.material" },
                { "name": "b", "defaultMaterial": "bad.material" }
            ],
            "materials": {
                "good.material": { "colorTexturePath": "good.png" },
                "bad.material": { "color": "red" }
            }
        }"#;
        let set = TileSet::from_json("set", json).unwrap();

        let good = &set.get(&"a".into()).unwrap().default_material;
        assert_eq!(set.materials().get(good).unwrap().color_texture_path, "good.png");

        // The bad entry falls back to a placeholder but stays owned by its tile type
        let bad = &set.get(&"b".into()).unwrap().default_material;
        assert_eq!(bad.as_str(), "bad.material");
        assert_eq!(
            set.materials().get(bad).unwrap().color_texture_path,
            crate::material::PLACEHOLDER_TEXTURE
        );
    }

    #[test]
    fn test_failed_read_keeps_previous_contents() {
        let mut set = sample_set();
        let before = set.clone();
        assert!(set.read_json("{ not json").is_err());
        assert!(set.read_json("[1, 2, 3]").is_err());
        assert_eq!(set, before);

        set.read_json(r#"{ "types": [ { "name": "rock" } ] }"#).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&"rock".into()));
    }

    #[test]
    fn test_missing_material_reference_gets_fresh_material() {
        let set = TileSet::from_json("set", r#"{ "types": [ { "name": "rock" } ] }"#).unwrap();
        let rock = set.get(&"rock".into()).unwrap();
        assert!(set.materials().contains(&rock.default_material));
    }

    #[test]
    fn test_duplicate_material_references_are_split() {
        let json = r#"{
            "types": [
                { "name": "a", "defaultMaterial": "shared.material" },
                { "name": "b", "defaultMaterial": "shared.material" }
            ],
            "materials": { "shared.material": { "colorTexturePath": "shared.png" } }
        }"#;
        let mut set = TileSet::from_json("set", json).unwrap();
        let a = set.get(&"a".into()).unwrap().default_material.clone();
        let b = set.get(&"b".into()).unwrap().default_material.clone();
        assert_ne!(a, b);
        assert_eq!(set.materials().get(&b).unwrap().color_texture_path, "shared.png");

        assert!(set.remove_type(&"a".into()));
        assert!(set.materials().contains(&b));
    }

    #[test]
    fn test_file_round_trip_resolves_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.tileset.json");

        let set = sample_set();
        set.save(&path).unwrap();
        let loaded = TileSet::load(&path).unwrap();

        let mut grid = CellGrid::new();
        grid.set_cell_type(0, 0, Some("grass".into()));
        grid.set_cell_type(-1, 1, Some("grass".into()));
        grid.set_cell_type(-1, 2, Some("grass".into()));
        grid.set_cell_type(-2, 2, Some("grass".into()));
        grid.set_cell_type(-1, 3, Some("water".into()));

        for (x, y) in [(0, 0), (-1, 1), (-1, 2)] {
            assert_eq!(
                set.material_at(&"grass".into(), &grid, x, y),
                loaded.material_at(&"grass".into(), &grid, x, y)
            );
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TileSet::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TileSetError::NotFound(_)));
    }
}
