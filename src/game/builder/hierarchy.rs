//! Construction Site
//!
//! The named root a building is assembled under, and its category groups
//! (`Floors`, `Walls`, `Roofs`, `Props`). Groups are looked up by exact
//! child name once when a building is opened and created on first use
//! after that.

use std::collections::HashMap;

use tracing::{debug, info};

use super::BuildError;
use super::module::ModuleType;
use crate::world::{NodeId, SceneGraph};

#[derive(Debug, Clone)]
pub struct ConstructionSite {
    name: String,
    root: NodeId,
    groups: HashMap<ModuleType, NodeId>,
    resumed: bool,
}

impl ConstructionSite {
    /// Reuse the top-level node called `name` with whatever groups it
    /// already has, or create a fresh root.
    pub fn open<S: SceneGraph + ?Sized>(scene: &mut S, name: &str) -> Self {
        if let Some(root) = scene.find_root(name) {
            let groups: HashMap<_, _> = ModuleType::ALL
                .iter()
                .filter_map(|&ty| scene.find_child(root, ty.group_name()).map(|g| (ty, g)))
                .collect();
            info!(building = name, %root, groups = groups.len(), "resumed building");
            return Self {
                name: name.to_string(),
                root,
                groups,
                resumed: true,
            };
        }

        let root = scene.create_empty(name, None);
        info!(building = name, %root, "started new building");
        Self {
            name: name.to_string(),
            root,
            groups: HashMap::new(),
            resumed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the root already existed when the site was opened.
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    /// Group for `module_type` if it has been resolved already.
    pub fn group(&self, module_type: ModuleType) -> Option<NodeId> {
        self.groups.get(&module_type).copied()
    }

    /// Distinct group nodes known so far.
    pub fn group_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.groups.values().copied().collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    /// Group that modules of `module_type` are parented under, created
    /// under the root on first use. Types sharing a group name share the
    /// node.
    pub fn group_for<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, module_type: ModuleType) -> Result<NodeId, BuildError> {
        if !scene.contains(self.root) {
            return Err(BuildError::MissingRoot(self.root));
        }
        if let Some(group) = self.group(module_type).filter(|g| scene.contains(*g)) {
            return Ok(group);
        }

        let name = module_type.group_name();
        let group = match scene.find_child(self.root, name) {
            Some(existing) => existing,
            None => {
                let created = scene.create_empty(name, Some(self.root));
                debug!(group = name, node = %created, "created module group");
                created
            }
        };
        self.groups.insert(module_type, group);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Scene;

    #[test]
    fn test_open_creates_root() {
        let mut scene = Scene::new();
        let site = ConstructionSite::open(&mut scene, "House");
        assert!(!site.was_resumed());
        assert_eq!(scene.name(site.root()), Some("House"));
        assert!(site.group_nodes().is_empty());
    }

    #[test]
    fn test_groups_created_lazily_and_shared() {
        let mut scene = Scene::new();
        let mut site = ConstructionSite::open(&mut scene, "House");

        let walls = site.group_for(&mut scene, ModuleType::Wall).unwrap();
        let corners = site.group_for(&mut scene, ModuleType::Corner).unwrap();
        let roofs = site.group_for(&mut scene, ModuleType::Roof).unwrap();

        assert_eq!(walls, corners);
        assert_eq!(scene.name(roofs), Some("Roofs"));
        assert_eq!(scene.child_count(site.root()), 2);
        assert_eq!(site.group_nodes().len(), 2);
    }

    #[test]
    fn test_resume_reuses_existing_groups() {
        let mut scene = Scene::new();
        let root = scene.create_empty("House", None);
        let floors = scene.create_empty("Floors", Some(root));
        let roofs = scene.create_empty("Roofs", Some(root));
        // Substring matches are not groups
        scene.create_empty("Walls_old", Some(root));

        let mut site = ConstructionSite::open(&mut scene, "House");
        assert!(site.was_resumed());
        assert_eq!(site.root(), root);
        assert_eq!(site.group(ModuleType::Floor), Some(floors));
        assert_eq!(site.group(ModuleType::Roof), Some(roofs));
        assert_eq!(site.group(ModuleType::Wall), None);

        assert_eq!(site.group_for(&mut scene, ModuleType::Floor).unwrap(), floors);
        let walls = site.group_for(&mut scene, ModuleType::Wall).unwrap();
        assert_eq!(scene.name(walls), Some("Walls"));
        assert_eq!(scene.child_count(root), 4);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let mut scene = Scene::new();
        let mut site = ConstructionSite::open(&mut scene, "House");
        scene.destroy(site.root());
        assert!(matches!(
            site.group_for(&mut scene, ModuleType::Props),
            Err(BuildError::MissingRoot(_))
        ));
    }
}
