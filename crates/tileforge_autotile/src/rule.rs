//! Autotile rules

use serde::{Deserialize, Serialize};
use std::fmt;
use tileforge_core::TileTypeId;
use uuid::Uuid;

use crate::dependency::{Dependency, Direction};
use crate::material::MaterialRef;

/// Stable handle of a [`Rule`].
///
/// Handles stay valid while rules around them are added, removed or
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub Uuid);

impl RuleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A material override selected when all of its neighbor dependencies hold.
///
/// Each of the eight neighbor slots holds an optional [`Dependency`];
/// an unset slot is always satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    id: RuleId,
    pub material: MaterialRef,
    dependencies: [Option<Dependency>; 8],
}

impl Rule {
    /// Create a rule with no dependencies
    pub fn new(material: MaterialRef) -> Self {
        Self {
            id: RuleId::new(),
            material,
            dependencies: Default::default(),
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn dependency(&self, direction: Direction) -> Option<&Dependency> {
        self.dependencies[direction.index()].as_ref()
    }

    /// Set or clear the dependency for one neighbor
    pub fn set_dependency(&mut self, direction: Direction, dependency: Option<Dependency>) {
        self.dependencies[direction.index()] = dependency;
    }

    /// Builder form of [`Rule::set_dependency`]
    pub fn with_dependency(mut self, direction: Direction, dependency: Dependency) -> Self {
        self.set_dependency(direction, Some(dependency));
        self
    }

    /// Iterate the set slots as `(direction, dependency)`
    pub fn dependencies(&self) -> impl Iterator<Item = (Direction, &Dependency)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.dependency(dir).map(|dep| (dir, dep)))
    }

    /// Remove every dependency
    pub fn clear_dependencies(&mut self) {
        self.dependencies = Default::default();
    }

    /// Check every set slot against the neighbors, in [`Direction::ALL`] order
    pub fn matches(&self, neighbors: &[Option<&TileTypeId>; 8]) -> bool {
        self.dependencies
            .iter()
            .zip(neighbors.iter())
            .all(|(dependency, neighbor)| match dependency {
                Some(dependency) => dependency.is_satisfied_by(*neighbor),
                None => true,
            })
    }
}
