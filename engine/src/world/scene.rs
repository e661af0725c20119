//! In-memory Scene
//!
//! A small scene graph with box geometry: enough of a host scene to drive
//! the placement session headless, in tests and in the `building_tool` demo.
//! The broad phase is a linear scan over collidable shapes, which is fine for
//! the few hundred modules a building holds.

use glam::{Affine3A, Quat, Vec3};

use super::graph::{NodeId, NodeTemplate, SceneGraph, SceneQuery, Shape, SpawnMode, Transform};
use crate::physics::{BoundingVolume, OrientedBox};

/// A node stored in the scene arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local: Transform,
    pub shape: Option<Shape>,
    /// Hidden from the hierarchy (preview instances)
    pub hidden: bool,
    /// Display color override
    pub tint: Option<[f32; 4]>,
}

impl Node {
    fn new(name: &str, local: Transform) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            local,
            shape: None,
            hidden: false,
            tint: None,
        }
    }
}

/// Arena-backed scene graph.
#[derive(Debug, Default)]
pub struct Scene {
    /// Slot `i` holds node `NodeId(i)`; destroyed nodes leave `None`
    nodes: Vec<Option<Node>>,
    /// Top-level nodes in creation order
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(|slot| slot.as_mut())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level nodes, hidden ones included.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Add a single box node. Convenience for scene setup.
    pub fn add_box(&mut self, name: &str, parent: Option<NodeId>, transform: Transform, shape: Shape) -> NodeId {
        let id = self.alloc(Node::new(name, transform));
        if let Some(node) = self.node_mut(id) {
            node.shape = Some(shape);
        }
        self.attach(id, parent);
        id
    }

    /// World transform decomposed into translation / rotation / scale.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        self.world_matrix(id).map(|m| Transform::from_affine(&m))
    }

    pub fn tint(&self, id: NodeId) -> Option<[f32; 4]> {
        self.node(id).and_then(|n| n.tint)
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.hidden)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    /// Link an unattached node under `parent` (or make it a root).
    fn attach(&mut self, id: NodeId, parent: Option<NodeId>) {
        let parent = parent.filter(|p| self.contains(*p));
        match parent {
            Some(p) => {
                if let Some(pn) = self.node_mut(p) {
                    pn.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = parent;
        }
    }

    fn detach(&mut self, id: NodeId) {
        match self.node(id).and_then(|n| n.parent) {
            Some(p) => {
                if let Some(pn) = self.node_mut(p) {
                    pn.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    fn spawn_template(&mut self, template: &NodeTemplate, parent: Option<NodeId>, mode: SpawnMode) -> NodeId {
        let mut node = Node::new(&template.name, template.transform);
        node.shape = template.shape.map(|mut shape| {
            if mode == SpawnMode::Preview {
                shape.collider = false;
            }
            shape
        });
        node.hidden = mode == SpawnMode::Preview;

        let id = self.alloc(node);
        self.attach(id, parent);
        for child in &template.children {
            self.spawn_template(child, Some(id), mode);
        }
        id
    }

    /// `id` plus every node below it, parents before children.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.node(n) {
                out.push(n);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl SceneGraph for Scene {
    fn instantiate(&mut self, template: &NodeTemplate, mode: SpawnMode) -> NodeId {
        self.spawn_template(template, None, mode)
    }

    fn create_empty(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc(Node::new(name, Transform::IDENTITY));
        self.attach(id, parent);
        id
    }

    fn destroy(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        for n in self.subtree(node) {
            if let Some(slot) = self.nodes.get_mut(n.0 as usize) {
                *slot = None;
            }
        }
    }

    fn reparent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if !self.contains(node) {
            return;
        }
        // Refuse cycles
        if let Some(p) = parent {
            if self.is_descendant_of(p, node) {
                return;
            }
        }

        let world = self.world_matrix(node).unwrap_or(Affine3A::IDENTITY);
        let parent_world = parent
            .and_then(|p| self.world_matrix(p))
            .unwrap_or(Affine3A::IDENTITY);
        let local = Transform::from_affine(&(parent_world.inverse() * world));

        self.detach(node);
        self.attach(node, parent);
        if let Some(n) = self.node_mut(node) {
            n.local = local;
        }
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.name = name.to_string();
        }
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.children.len())
    }

    fn find_root(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|r| self.node(*r).is_some_and(|n| !n.hidden && n.name == name))
    }

    fn local_transform(&self, node: NodeId) -> Option<Transform> {
        self.node(node).map(|n| n.local)
    }

    fn set_local_transform(&mut self, node: NodeId, transform: Transform) {
        if let Some(n) = self.node_mut(node) {
            n.local = transform;
        }
    }

    fn world_matrix(&self, node: NodeId) -> Option<Affine3A> {
        let n = self.node(node)?;
        let local = n.local.to_affine();
        match n.parent {
            Some(p) => Some(self.world_matrix(p)? * local),
            None => Some(local),
        }
    }

    fn renderable_bounds(&self, node: NodeId) -> Vec<BoundingVolume> {
        self.subtree(node)
            .into_iter()
            .filter_map(|n| {
                let shape = self.node(n)?.shape?;
                let world = self.world_matrix(n)?;
                Some(shape.local_volume().transformed(&world))
            })
            .collect()
    }

    fn set_tint(&mut self, node: NodeId, rgba: [f32; 4]) {
        for n in self.subtree(node) {
            if let Some(n) = self.node_mut(n) {
                if n.shape.is_some() {
                    n.tint = Some(rgba);
                }
            }
        }
    }

    fn remove_colliders(&mut self, node: NodeId) -> usize {
        let mut removed = 0;
        for n in self.subtree(node) {
            if let Some(shape) = self.node_mut(n).and_then(|n| n.shape.as_mut()) {
                if shape.collider {
                    shape.collider = false;
                    removed += 1;
                }
            }
        }
        removed
    }
}

impl SceneQuery for Scene {
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, rotation: Quat) -> Vec<NodeId> {
        let query = OrientedBox::from_volume(&BoundingVolume::new(center, half_extents), rotation);

        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let node = slot.as_ref()?;
                let shape = node.shape.filter(|s| s.collider)?;
                let id = NodeId(i as u32);
                let world = self.world_matrix(id)?;
                let collider = OrientedBox::from_local(shape.center, shape.half_extents, &world);
                collider.intersects(&query).then_some(id)
            })
            .collect()
    }
}
