//! Material references and the material library owned by a tile set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Texture shown for materials that have not been edited yet
pub const PLACEHOLDER_TEXTURE: &str = "internal/images/empty_tiletype.png";

/// Shader assigned to new materials
pub const DEFAULT_SHADER: &str = "internal/shaders/default.shader";

/// Name of a material, as referenced by tile types and rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRef(String);

impl MaterialRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Simple RGBA color (no renderer dependency)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Render description of a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Material {
    pub color_texture_path: String,
    pub shader: String,
    pub color: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color_texture_path: PLACEHOLDER_TEXTURE.to_string(),
            shader: DEFAULT_SHADER.to_string(),
            color: Color::WHITE,
        }
    }
}

/// Read-only material lookup passed into resolution
pub trait MaterialContext {
    fn get(&self, material: &MaterialRef) -> Option<&Material>;
}

/// Materials created and exclusively owned by one tile set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialLibrary {
    materials: BTreeMap<MaterialRef, Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh placeholder material named after `owner`.
    ///
    /// Names take the form `<owner without extension>/<uuid>.material`.
    pub fn create(&mut self, owner: &str) -> MaterialRef {
        self.create_with(owner, Material::default())
    }

    /// Allocate a fresh material with the given definition
    pub fn create_with(&mut self, owner: &str, material: Material) -> MaterialRef {
        let name = MaterialRef::new(format!(
            "{}/{}.material",
            strip_extensions(owner),
            Uuid::new_v4()
        ));
        self.materials.insert(name.clone(), material);
        name
    }

    /// Insert or replace a material under an explicit name
    pub fn insert(&mut self, name: MaterialRef, material: Material) -> Option<Material> {
        self.materials.insert(name, material)
    }

    pub fn get_mut(&mut self, name: &MaterialRef) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Release a material. Returns the definition if it was present.
    pub fn remove(&mut self, name: &MaterialRef) -> Option<Material> {
        self.materials.remove(name)
    }

    pub fn contains(&self, name: &MaterialRef) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MaterialRef, &Material)> {
        self.materials.iter()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}

/// `tilesets/terrain.tileset.json` -> `tilesets/terrain`
fn strip_extensions(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].find('.') {
        Some(0) | None => path,
        Some(dot) => &path[..file_start + dot],
    }
}

impl MaterialContext for MaterialLibrary {
    fn get(&self, material: &MaterialRef) -> Option<&Material> {
        self.materials.get(material)
    }
}
