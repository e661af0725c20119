//! Scene Graph Contracts
//!
//! Node handles, transforms, templates and the two collaborator traits the
//! placement core talks to: [`SceneGraph`] for hierarchy mutation and
//! lookup, [`SceneQuery`] for spatial overlap. [`super::Scene`] is the
//! in-memory implementation; a host engine can implement both traits over
//! its own scene instead.

use std::fmt;

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::BoundingVolume;

/// Opaque handle to a scene node. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local translation / rotation / non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_affine(affine: &Affine3A) -> Self {
        let (scale, rotation, translation) = affine.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

/// Box-shaped renderable geometry attached to a node, in the node's local
/// space. Collidable shapes take part in overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub center: Vec3,
    pub half_extents: Vec3,
    #[serde(default = "default_collider")]
    pub collider: bool,
}

fn default_collider() -> bool {
    true
}

impl Shape {
    /// Collidable box centered at `center`.
    pub fn solid(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            collider: true,
        }
    }

    /// Render-only box.
    pub fn visual(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            collider: false,
        }
    }

    pub fn local_volume(&self) -> BoundingVolume {
        BoundingVolume::new(self.center, self.half_extents)
    }
}

/// A tree of nodes to stamp into the scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }
}

/// How an instantiated template participates in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Regular, collidable, visible in the hierarchy
    Permanent,
    /// Transient preview: hidden from the hierarchy and never registered
    /// with the collision set
    Preview,
}

/// Hierarchy mutation and lookup.
pub trait SceneGraph {
    /// Stamp `template` into the scene at the top level.
    fn instantiate(&mut self, template: &NodeTemplate, mode: SpawnMode) -> NodeId;

    /// Create an empty grouping node.
    fn create_empty(&mut self, name: &str, parent: Option<NodeId>) -> NodeId;

    /// Remove `node` and its whole subtree. Unknown handles are ignored.
    fn destroy(&mut self, node: NodeId);

    /// Move `node` under `parent` (or to the top level), keeping its world
    /// transform.
    fn reparent(&mut self, node: NodeId, parent: Option<NodeId>);

    fn set_name(&mut self, node: NodeId, name: &str);

    fn name(&self, node: NodeId) -> Option<&str>;

    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// First top-level node named exactly `name`.
    fn find_root(&self, name: &str) -> Option<NodeId>;

    /// Direct child of `parent` named exactly `name`.
    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .find(|&c| self.name(c) == Some(name))
    }

    /// `node == ancestor` or `node` lies somewhere below it.
    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn local_transform(&self, node: NodeId) -> Option<Transform>;

    fn set_local_transform(&mut self, node: NodeId, transform: Transform);

    fn world_matrix(&self, node: NodeId) -> Option<Affine3A>;

    fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.world_matrix(node).map(|m| m.translation.into())
    }

    /// World-space boxes of every renderable shape in `node`'s subtree.
    fn renderable_bounds(&self, node: NodeId) -> Vec<BoundingVolume>;

    /// Override the display color of every renderable in the subtree.
    fn set_tint(&mut self, node: NodeId, rgba: [f32; 4]);

    /// Strip the collider flag from every shape in the subtree; returns how
    /// many were removed.
    fn remove_colliders(&mut self, node: NodeId) -> usize;
}

/// Spatial queries against collidable geometry.
pub trait SceneQuery {
    /// Every collidable node whose box intersects the oriented box
    /// (`center`, `half_extents`, `rotation`), in enumeration order.
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, rotation: Quat) -> Vec<NodeId>;
}
