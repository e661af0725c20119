//! Module Catalog
//!
//! Module categories, the prototypes a building is assembled from, and the
//! catalog that lists them per category.
//!
//! Catalog files are JSON:
//!
//! ```json
//! { "categories": [
//!     { "category": "Walls", "modules": [
//!         { "name": "Wall_Plain",
//!           "parts": [ { "center": [0, 1.5, 0], "half_extents": [1.5, 1.5, 0.1] } ] }
//!     ] }
//! ] }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::BuildError;
use crate::physics::BoundingVolume;
use crate::world::{NodeTemplate, Shape, Transform};

// ============================================================================
// MODULE TYPE
// ============================================================================

/// Category of a building module. Drives snapping behaviour and which
/// group a committed module lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModuleType {
    Floor,
    Wall,
    Roof,
    Corner,
    Props,
}

impl ModuleType {
    pub const ALL: [ModuleType; 5] = [
        ModuleType::Floor,
        ModuleType::Wall,
        ModuleType::Roof,
        ModuleType::Corner,
        ModuleType::Props,
    ];

    /// Name of the group node under the building root. Corners share the
    /// wall group.
    pub fn group_name(&self) -> &'static str {
        match self {
            ModuleType::Floor => "Floors",
            ModuleType::Wall | ModuleType::Corner => "Walls",
            ModuleType::Roof => "Roofs",
            ModuleType::Props => "Props",
        }
    }

    /// Label of the catalog tab listing this type.
    pub fn category_label(&self) -> &'static str {
        match self {
            ModuleType::Floor => "Floors",
            ModuleType::Wall => "Walls",
            ModuleType::Roof => "Roofs",
            ModuleType::Corner => "Junctions",
            ModuleType::Props => "Props",
        }
    }

    /// Map a catalog category label to a type. Singular and plural forms
    /// are both accepted, case-insensitively.
    pub fn from_category(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "floor" | "floors" => Some(ModuleType::Floor),
            "wall" | "walls" => Some(ModuleType::Wall),
            "roof" | "roofs" => Some(ModuleType::Roof),
            "junction" | "junctions" | "corner" | "corners" => Some(ModuleType::Corner),
            "prop" | "props" => Some(ModuleType::Props),
            _ => None,
        }
    }

    /// Guess a type from a node name by keyword. Used for modules that
    /// carry no explicit tag, e.g. ones built in an earlier session.
    pub fn infer_from_name(name: &str) -> Option<Self> {
        const KEYWORDS: [(&str, ModuleType); 5] = [
            ("Floor", ModuleType::Floor),
            ("Wall", ModuleType::Wall),
            ("Roof", ModuleType::Roof),
            ("Props", ModuleType::Props),
            ("Junction", ModuleType::Corner),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| name.contains(keyword))
            .map(|(_, ty)| *ty)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModuleType::Floor => "FLOOR",
            ModuleType::Wall => "WALL",
            ModuleType::Roof => "ROOF",
            ModuleType::Corner => "CORNER",
            ModuleType::Props => "PROPS",
        };
        f.write_str(label)
    }
}

// ============================================================================
// PROTOTYPE
// ============================================================================

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// Authored description of one module: its name, category, authored scale
/// and the boxes it is made of (in unscaled local space).
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePrototype {
    pub name: String,
    pub module_type: ModuleType,
    pub scale: Vec3,
    pub parts: Vec<Shape>,
}

impl ModulePrototype {
    pub fn new(name: impl Into<String>, module_type: ModuleType) -> Self {
        Self {
            name: name.into(),
            module_type,
            scale: Vec3::ONE,
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: Shape) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Node tree to stamp into the scene: a root carrying the authored
    /// scale with one child per part.
    pub fn template(&self) -> NodeTemplate {
        let root = NodeTemplate::new(self.name.as_str())
            .with_transform(Transform::IDENTITY.with_scale(self.scale));
        self.parts.iter().enumerate().fold(root, |root, (i, part)| {
            root.with_child(NodeTemplate::new(format!("{}_part{}", self.name, i)).with_shape(*part))
        })
    }

    /// Bounds of the prototype at its authored scale, relative to its
    /// origin. A prototype without parts is a point at the origin.
    pub fn local_bounds(&self) -> BoundingVolume {
        let scale = Affine3A::from_scale(self.scale);
        let mut parts = self.parts.iter().map(|p| p.local_volume().transformed(&scale));
        match parts.next() {
            Some(first) => parts.fold(first, |acc, b| acc.encapsulate(&b)),
            None => BoundingVolume::point(Vec3::ZERO),
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<CatalogCategory>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CatalogCategory {
    category: String,
    #[serde(default)]
    modules: Vec<PrototypeEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PrototypeEntry {
    name: String,
    #[serde(default = "default_scale")]
    scale: Vec3,
    #[serde(default)]
    parts: Vec<Shape>,
}

/// Ordered prototype lists, one per module type.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    categories: BTreeMap<ModuleType, Vec<ModulePrototype>>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prototype to its category.
    pub fn add(&mut self, prototype: ModulePrototype) {
        self.categories
            .entry(prototype.module_type)
            .or_default()
            .push(prototype);
    }

    pub fn with(mut self, prototype: ModulePrototype) -> Self {
        self.add(prototype);
        self
    }

    /// Parse a catalog from JSON. Categories that map to no module type are
    /// skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        for category in file.categories {
            let Some(module_type) = ModuleType::from_category(&category.category) else {
                warn!(category = %category.category, "unknown module category, skipping");
                continue;
            };
            for entry in category.modules {
                catalog.add(ModulePrototype {
                    name: entry.name,
                    module_type,
                    scale: entry.scale,
                    parts: entry.parts,
                });
            }
        }
        Ok(catalog)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), modules = catalog.len(), "loaded module catalog");
        Ok(catalog)
    }

    /// Prototypes of one category, in authored order.
    pub fn prototypes(&self, module_type: ModuleType) -> &[ModulePrototype] {
        self.categories
            .get(&module_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, name: &str) -> Option<&ModulePrototype> {
        self.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModulePrototype> {
        self.categories.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A small starter set on a 3-unit grid, used by the demo binary and
    /// tests.
    pub fn builtin() -> Self {
        Self::new()
            .with(
                ModulePrototype::new("Floor_Tile", ModuleType::Floor)
                    .with_part(Shape::solid(Vec3::new(0.0, 0.1, 0.0), Vec3::new(1.5, 0.1, 1.5))),
            )
            .with(
                ModulePrototype::new("Wall_Plain", ModuleType::Wall)
                    .with_part(Shape::solid(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.5, 1.5, 0.1))),
            )
            .with(
                ModulePrototype::new("Wall_Window", ModuleType::Wall)
                    .with_part(Shape::solid(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.5, 0.5, 0.1)))
                    .with_part(Shape::solid(Vec3::new(0.0, 2.5, 0.0), Vec3::new(1.5, 0.5, 0.1)))
                    .with_part(Shape::visual(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.5, 0.5, 0.02))),
            )
            .with(
                ModulePrototype::new("Roof_Flat", ModuleType::Roof)
                    .with_part(Shape::solid(Vec3::new(0.0, 0.15, 0.0), Vec3::new(1.5, 0.15, 1.5))),
            )
            .with(
                ModulePrototype::new("Junction_Pillar", ModuleType::Corner)
                    .with_part(Shape::solid(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.1, 1.5, 0.1))),
            )
            .with(
                ModulePrototype::new("Props_Crate", ModuleType::Props)
                    .with_part(Shape::solid(Vec3::new(0.0, 0.4, 0.0), Vec3::splat(0.4))),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names() {
        assert_eq!(ModuleType::Floor.group_name(), "Floors");
        assert_eq!(ModuleType::Wall.group_name(), "Walls");
        assert_eq!(ModuleType::Corner.group_name(), "Walls");
        assert_eq!(ModuleType::Roof.group_name(), "Roofs");
        assert_eq!(ModuleType::Props.group_name(), "Props");
    }

    #[test]
    fn test_category_labels_round_trip() {
        for ty in ModuleType::ALL {
            assert_eq!(ModuleType::from_category(ty.category_label()), Some(ty));
        }
        assert_eq!(ModuleType::from_category("Stairs"), None);
    }

    #[test]
    fn test_infer_from_name() {
        assert_eq!(ModuleType::infer_from_name("Floor_Tile_3"), Some(ModuleType::Floor));
        assert_eq!(ModuleType::infer_from_name("Wall_Plain_1"), Some(ModuleType::Wall));
        assert_eq!(ModuleType::infer_from_name("Junction_Pillar_2"), Some(ModuleType::Corner));
        assert_eq!(ModuleType::infer_from_name("Props_Crate"), Some(ModuleType::Props));
        assert_eq!(ModuleType::infer_from_name("Barrel"), None);
    }

    #[test]
    fn test_template_has_one_child_per_part() {
        let catalog = ModuleCatalog::builtin();
        let window = catalog.find("Wall_Window").unwrap();
        let template = window.template();
        assert_eq!(template.name, "Wall_Window");
        assert_eq!(template.children.len(), 3);
        assert!(template.children.iter().all(|c| c.shape.is_some()));
    }

    #[test]
    fn test_local_bounds_include_scale() {
        let wall = ModulePrototype::new("Wall", ModuleType::Wall)
            .with_part(Shape::solid(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.1)))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));
        let bounds = wall.local_bounds();
        assert!((bounds.extents - Vec3::new(2.0, 1.0, 0.1)).length() < 1e-5);
        assert!((bounds.center - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_empty_prototype_bounds_are_a_point() {
        let empty = ModulePrototype::new("Marker", ModuleType::Props);
        assert_eq!(empty.local_bounds(), BoundingVolume::point(Vec3::ZERO));
    }

    #[test]
    fn test_from_json_skips_unknown_categories() {
        let json = r#"{
            "categories": [
                { "category": "Walls", "modules": [
                    { "name": "Wall_A", "parts": [ { "center": [0, 1, 0], "half_extents": [1, 1, 0.1] } ] },
                    { "name": "Wall_B", "scale": [2, 1, 1] }
                ] },
                { "category": "Stairs", "modules": [ { "name": "Stair_A" } ] },
                { "category": "Junctions", "modules": [ { "name": "Junction_A" } ] }
            ]
        }"#;
        let catalog = ModuleCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find("Stair_A").is_none());

        let walls = catalog.prototypes(ModuleType::Wall);
        assert_eq!(walls[0].name, "Wall_A");
        assert_eq!(walls[1].scale, Vec3::new(2.0, 1.0, 1.0));
        assert!(walls[0].parts[0].collider);
        assert_eq!(catalog.find("Junction_A").unwrap().module_type, ModuleType::Corner);
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let dir = std::env::temp_dir().join("modular_builder_catalog_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("catalog.json");
        std::fs::write(
            &path,
            r#"{ "categories": [ { "category": "Floor", "modules": [ { "name": "Floor_A" } ] } ] }"#,
        )
        .unwrap();

        let catalog = ModuleCatalog::load(&path).unwrap();
        assert_eq!(catalog.prototypes(ModuleType::Floor).len(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_builtin_covers_every_type() {
        let catalog = ModuleCatalog::builtin();
        for ty in ModuleType::ALL {
            assert!(!catalog.prototypes(ty).is_empty(), "no {ty} prototypes");
        }
    }
}
