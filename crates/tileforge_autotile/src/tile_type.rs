//! Tile types and material resolution

use tileforge_core::{CellLookup, TileTypeId};

use crate::dependency::Direction;
use crate::material::{Material, MaterialContext, MaterialRef};
use crate::rule::{Rule, RuleId};

/// A kind of grid cell content.
///
/// Its material depends on the cell's neighborhood: rules are tried in list
/// order and the first one that matches supplies the material. When no rule
/// matches, or there are no rules, `default_material` is used.
#[derive(Debug, Clone, PartialEq)]
pub struct TileType {
    pub default_material: MaterialRef,
    /// Logical footprint, used as a rendering hint
    pub width: f32,
    pub height: f32,
    rules: Vec<Rule>,
}

impl TileType {
    pub fn new(default_material: MaterialRef) -> Self {
        Self {
            default_material,
            width: 1.0,
            height: 1.0,
            rules: Vec::new(),
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn rule_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.id() == id)
    }

    /// Current position of a rule in evaluation order
    pub fn rule_position(&self, id: RuleId) -> Option<usize> {
        self.rules.iter().position(|r| r.id() == id)
    }

    /// Append a rule with no dependencies that resolves to `material`
    pub(crate) fn add_rule(&mut self, material: MaterialRef) -> RuleId {
        self.push_rule(Rule::new(material))
    }

    /// Append an already built rule
    pub(crate) fn push_rule(&mut self, rule: Rule) -> RuleId {
        let id = rule.id();
        self.rules.push(rule);
        id
    }

    /// Remove a rule by handle, keeping the order of the others.
    /// Returns `None` if the handle does not belong to this tile type.
    pub(crate) fn remove_rule(&mut self, id: RuleId) -> Option<Rule> {
        let pos = self.rule_position(id)?;
        Some(self.rules.remove(pos))
    }

    /// Move a rule one step earlier in evaluation order.
    /// Returns `false` if the rule is unknown or already first.
    pub fn move_rule_up(&mut self, id: RuleId) -> bool {
        match self.rule_position(id) {
            Some(pos) if pos > 0 => {
                self.rules.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Move a rule one step later in evaluation order.
    /// Returns `false` if the rule is unknown or already last.
    pub fn move_rule_down(&mut self, id: RuleId) -> bool {
        match self.rule_position(id) {
            Some(pos) if pos + 1 < self.rules.len() => {
                self.rules.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Pick the material for the cell at `(x, y)`.
    ///
    /// This never fails: missing neighbors read as empty and an unmatched
    /// neighborhood falls back to `default_material`.
    pub fn material_at(&self, cells: &(impl CellLookup + ?Sized), x: i32, y: i32) -> &MaterialRef {
        if self.rules.is_empty() {
            return &self.default_material;
        }

        // Neighbors past the edge of the coordinate space read as empty
        let neighbors = Direction::ALL.map(|dir| {
            let (dx, dy) = dir.offset();
            let nx = x.checked_add(dx)?;
            let ny = y.checked_add(dy)?;
            cells.cell_type(nx, ny)
        });

        self.rules
            .iter()
            .find(|rule| rule.matches(&neighbors))
            .map(|rule| &rule.material)
            .unwrap_or(&self.default_material)
    }

    /// Pick the material for `(x, y)` and look it up in `materials`
    pub fn resolve_material<'a, C>(
        &self,
        cells: &(impl CellLookup + ?Sized),
        x: i32,
        y: i32,
        materials: &'a C,
    ) -> Option<&'a Material>
    where
        C: MaterialContext + ?Sized,
    {
        materials.get(self.material_at(cells, x, y))
    }

    /// Ids of every tile type referenced by the rules
    pub fn referenced_types(&self) -> impl Iterator<Item = &TileTypeId> {
        self.rules
            .iter()
            .flat_map(|rule| rule.dependencies())
            .filter_map(|(_, dep)| dep.tile_types())
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::Dependency;
    use crate::material::MaterialLibrary;
    use tileforge_core::{CellGrid, CellStore};

    fn grid_with(cells: &[(i32, i32, &str)]) -> CellGrid {
        let mut grid = CellGrid::new();
        for (x, y, t) in cells {
            grid.set_cell_type(*x, *y, Some(TileTypeId::new(*t)));
        }
        grid
    }

    #[test]
    fn test_no_rules_returns_default() {
        let tile_type = TileType::new("plain".into());
        let empty = CellGrid::new();
        let full = grid_with(&[(-1, -1, "a"), (0, -1, "a"), (1, 1, "b")]);
        assert_eq!(tile_type.material_at(&empty, 0, 0).as_str(), "plain");
        assert_eq!(tile_type.material_at(&full, 0, 0).as_str(), "plain");
    }

    #[test]
    fn test_first_match_wins() {
        let mut tile_type = TileType::new("plain".into());
        tile_type.push_rule(
            Rule::new("first".into()).with_dependency(Direction::CenterLeft, Dependency::Solid),
        );
        tile_type.push_rule(
            Rule::new("second".into()).with_dependency(Direction::CenterRight, Dependency::Solid),
        );

        let both = grid_with(&[(-1, 0, "a"), (1, 0, "a")]);
        assert_eq!(tile_type.material_at(&both, 0, 0).as_str(), "first");

        let right_only = grid_with(&[(1, 0, "a")]);
        assert_eq!(tile_type.material_at(&right_only, 0, 0).as_str(), "second");

        let none = CellGrid::new();
        assert_eq!(tile_type.material_at(&none, 0, 0).as_str(), "plain");
    }

    #[test]
    fn test_grass_edge_scenario() {
        let mut tile_type = TileType::new("grass_plain".into());
        tile_type.push_rule(
            Rule::new("grass_edge".into()).with_dependency(Direction::TopCenter, Dependency::Empty),
        );

        let grid = grid_with(&[(0, 0, "grass")]);
        assert_eq!(tile_type.material_at(&grid, 0, 0).as_str(), "grass_edge");
        assert_eq!(tile_type.material_at(&grid, 0, 1).as_str(), "grass_plain");
    }

    #[test]
    fn test_neighbors_past_coordinate_limits_are_empty() {
        let mut tile_type = TileType::new("plain".into());
        tile_type.push_rule(
            Rule::new("right_edge".into())
                .with_dependency(Direction::CenterRight, Dependency::Empty),
        );
        tile_type.push_rule(
            Rule::new("top_edge".into()).with_dependency(Direction::TopCenter, Dependency::Empty),
        );

        // A tile on the wrapped-around side must not be read as a neighbor
        let grid = grid_with(&[(i32::MAX, 0, "grass"), (i32::MIN, 0, "grass")]);
        assert_eq!(tile_type.material_at(&grid, i32::MAX, 0).as_str(), "right_edge");

        let mut grid = grid_with(&[(0, i32::MIN, "grass"), (1, i32::MIN, "grass")]);
        grid.set_cell_type(0, i32::MAX, Some("grass".into()));
        assert_eq!(tile_type.material_at(&grid, 0, i32::MIN).as_str(), "top_edge");
    }

    #[test]
    fn test_tile_dependency_uses_membership() {
        let mut tile_type = TileType::new("plain".into());
        tile_type.push_rule(
            Rule::new("shore".into())
                .with_dependency(Direction::BottomCenter, Dependency::tiles(["water", "deep"])),
        );

        let water = grid_with(&[(0, 1, "deep")]);
        assert_eq!(tile_type.material_at(&water, 0, 0).as_str(), "shore");

        let sand = grid_with(&[(0, 1, "sand")]);
        assert_eq!(tile_type.material_at(&sand, 0, 0).as_str(), "plain");
    }

    #[test]
    fn test_remove_rule_keeps_order_and_handles() {
        let mut tile_type = TileType::new("plain".into());
        let a = tile_type.add_rule("a".into());
        let b = tile_type.add_rule("b".into());
        let c = tile_type.add_rule("c".into());

        assert!(tile_type.remove_rule(b).is_some());
        assert!(tile_type.remove_rule(b).is_none());
        assert_eq!(tile_type.rule_position(a), Some(0));
        assert_eq!(tile_type.rule_position(c), Some(1));
        assert_eq!(tile_type.rule(c).map(|r| r.material.as_str()), Some("c"));
    }

    #[test]
    fn test_move_rule() {
        let mut tile_type = TileType::new("plain".into());
        let a = tile_type.add_rule("a".into());
        let b = tile_type.add_rule("b".into());

        assert!(!tile_type.move_rule_up(a));
        assert!(!tile_type.move_rule_down(b));
        assert!(tile_type.move_rule_up(b));
        assert_eq!(tile_type.rule_position(b), Some(0));

        // Unconditional rules now resolve to b first
        assert_eq!(tile_type.material_at(&CellGrid::new(), 0, 0).as_str(), "b");
    }

    #[test]
    fn test_resolve_material_through_context() {
        let mut library = MaterialLibrary::new();
        let default_material = library.create("set");
        let tile_type = TileType::new(default_material);

        let material = tile_type.resolve_material(&CellGrid::new(), 3, 3, &library);
        assert!(material.is_some());

        let orphan = TileType::new("missing".into());
        assert!(orphan.resolve_material(&CellGrid::new(), 3, 3, &library).is_none());
    }

    #[test]
    fn test_referenced_types() {
        let mut tile_type = TileType::new("plain".into());
        tile_type.push_rule(
            Rule::new("m".into())
                .with_dependency(Direction::TopLeft, Dependency::tiles(["a"]))
                .with_dependency(Direction::TopRight, Dependency::Solid),
        );
        let referenced: Vec<_> = tile_type.referenced_types().map(|t| t.as_str()).collect();
        assert_eq!(referenced, vec!["a"]);
    }
}
