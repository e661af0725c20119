//! Neighbor Search
//!
//! Finds the placed module the ghost should snap to. Horizontal search
//! looks around the ghost with an oriented box three uniform half-widths
//! wide; vertical search probes a thin column under the ghost.
//!
//! Hits come back as raw colliders, usually a part deep inside a module.
//! [`ModuleIndex`] maps them back to the placed module and its type.

use std::collections::{HashMap, HashSet};

use glam::{Quat, Vec3};

use super::geometry::{bottom_center, compute_bounds, uniform};
use super::module::ModuleType;
use crate::physics::BoundingVolume;
use crate::world::{NodeId, SceneGraph, SceneQuery};

/// In vertical mode the last acceptable candidate in enumeration order is
/// taken, not the nearest one.
pub const VERTICAL_SNAP_LAST_WINS: bool = true;

// ============================================================================
// MODULE INDEX
// ============================================================================

/// Explicit module types for committed modules plus the set of category
/// group nodes. Modules missing from the index fall back to name-based
/// inference.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    tags: HashMap<NodeId, ModuleType>,
    groups: HashSet<NodeId>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(&mut self, node: NodeId, module_type: ModuleType) {
        self.tags.insert(node, module_type);
    }

    pub fn tag_of(&self, node: NodeId) -> Option<ModuleType> {
        self.tags.get(&node).copied()
    }

    pub fn register_group(&mut self, group: NodeId) {
        self.groups.insert(group);
    }

    pub fn is_group(&self, node: NodeId) -> bool {
        self.groups.contains(&node)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.groups.clear();
    }

    /// Map a collider hit to the module it belongs to.
    ///
    /// Walks up from `hit` until it meets a tagged node or a direct child of
    /// a registered group. Untagged colliders outside any building resolve
    /// to themselves.
    pub fn resolve<S: SceneGraph + ?Sized>(&self, scene: &S, hit: NodeId) -> (NodeId, ModuleType) {
        let mut current = Some(hit);
        while let Some(node) = current {
            if let Some(ty) = self.tag_of(node) {
                return (node, ty);
            }
            match scene.parent(node) {
                Some(parent) if self.is_group(parent) => {
                    return (node, infer_module_type(scene, node));
                }
                parent => current = parent,
            }
        }
        (hit, infer_module_type(scene, hit))
    }
}

/// Type of `node` guessed from its own name or, failing that, the nearest
/// ancestor whose name carries a category keyword. Defaults to
/// [`ModuleType::Props`].
pub fn infer_module_type<S: SceneGraph + ?Sized>(scene: &S, node: NodeId) -> ModuleType {
    let mut current = Some(node);
    while let Some(n) = current {
        if let Some(ty) = scene.name(n).and_then(ModuleType::infer_from_name) {
            return ty;
        }
        current = scene.parent(n);
    }
    ModuleType::Props
}

// ============================================================================
// SEARCH
// ============================================================================

/// Search parameters for one tick.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// Type of the module being placed
    pub module_type: ModuleType,
    /// Vertical snap mode toggle
    pub vertical: bool,
    /// Current ghost rotation, orients the horizontal search box
    pub rotation: Quat,
    pub search_multiplier: f32,
    pub vertical_probe_depth: f32,
    pub uniform_epsilon: f32,
}

/// The snap partner chosen for the ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Placed module (not the raw collider)
    pub node: NodeId,
    pub module_type: ModuleType,
    /// Distance between the bottom centers of the uniformed ghost bounds
    /// and the neighbor bounds
    pub distance: f32,
}

/// Query box for the neighbor search: center, half-extents and rotation.
pub fn search_volume(ghost_bounds: &BoundingVolume, params: &SearchParams) -> (BoundingVolume, Quat) {
    if params.vertical {
        let ext = ghost_bounds.extents;
        let depth = params.vertical_probe_depth;
        let probe = BoundingVolume::new(
            ghost_bounds.center - Vec3::Y * depth,
            Vec3::new(ext.x * 0.5, ext.y + depth, ext.z * 0.5),
        );
        (probe, Quat::IDENTITY)
    } else {
        let u = uniform(ghost_bounds, params.uniform_epsilon);
        let reach = params.search_multiplier;
        let area = BoundingVolume::new(
            u.center,
            Vec3::new(u.extents.x * reach, ghost_bounds.extents.y, u.extents.z * reach),
        );
        (area, params.rotation)
    }
}

/// Whether a module of type `candidate` may serve as a partner for one of
/// type `placing`. Corners only attach to walls.
fn is_compatible(placing: ModuleType, candidate: ModuleType) -> bool {
    placing != ModuleType::Corner || candidate == ModuleType::Wall
}

/// Pick the neighbor to snap `ghost` against.
///
/// Hits belonging to the ghost are skipped, as are incompatible types.
/// Horizontal mode keeps the nearest candidate by bottom-center distance;
/// vertical mode keeps the last one enumerated. A ghost without geometry
/// has no neighbors.
pub fn find_closest_neighbor<S>(
    scene: &S,
    ghost: NodeId,
    ghost_bounds: &BoundingVolume,
    index: &ModuleIndex,
    params: &SearchParams,
) -> Option<Neighbor>
where
    S: SceneGraph + SceneQuery + ?Sized,
{
    if ghost_bounds.extents == Vec3::ZERO {
        return None;
    }

    let (area, rotation) = search_volume(ghost_bounds, params);
    let anchor = bottom_center(&uniform(ghost_bounds, params.uniform_epsilon));

    let mut best: Option<Neighbor> = None;
    for hit in scene.overlap_box(area.center, area.extents, rotation) {
        if scene.is_descendant_of(hit, ghost) {
            continue;
        }
        let (node, module_type) = index.resolve(scene, hit);
        if !is_compatible(params.module_type, module_type) {
            continue;
        }

        let distance = bottom_center(&compute_bounds(scene, node)).distance(anchor);
        let candidate = Neighbor {
            node,
            module_type,
            distance,
        };

        best = match best {
            _ if params.vertical && VERTICAL_SNAP_LAST_WINS => Some(candidate),
            Some(current) if current.distance <= distance => Some(current),
            _ => Some(candidate),
        };
    }
    best
}
