//! Placement Session
//!
//! Owns the ghost preview and drives one placement step per host frame:
//!
//! 1. Idle unless a building is open and a prototype is selected.
//! 2. Re-create the ghost if it is missing or was stamped from another
//!    prototype.
//! 3. Project the pointer ray onto the current floor plane and move the
//!    ghost there (skipped when the ray misses the plane).
//! 4. Search for a neighbor and snap to it.
//! 5. Validate and tint the ghost.
//! 6. Run this frame's commands: place, rescale, rotate, change floor.
//!
//! The session never deletes a placed module except through an explicit
//! [`PlacementSession::discard_building`].

use std::time::Duration;

use glam::{Quat, Vec3};
use tracing::{debug, info, trace, warn};

use super::commands::BuildCommand;
use super::floor::{CommandCooldown, FloorState};
use super::geometry::compute_bounds;
use super::ghost::{Ghost, GhostMaterial};
use super::hierarchy::ConstructionSite;
use super::module::{ModuleCatalog, ModulePrototype};
use super::neighbor::{ModuleIndex, Neighbor, SearchParams, find_closest_neighbor};
use super::prefs::{ToolState, ToolStateStore};
use super::snap::{SnapBody, SnapResolution, resolve_snap, should_snap};
use super::undo::UndoLedger;
use super::validator::is_valid_placement;
use super::BuildError;
use crate::camera::{Ray, ray_plane_intersection};
use crate::game::config::BuilderConfig;
use crate::world::{NodeId, SceneGraph, SceneQuery, SpawnMode};

/// Everything the host hands over for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pointer ray in world space, `None` when the pointer is outside the view
    pub pointer_ray: Option<Ray>,
    /// Decoded commands, in the order they happened
    pub commands: Vec<BuildCommand>,
    /// Host clock, used to debounce floor changes. Must advance every
    /// frame: with a clock stuck at zero only the first floor change goes
    /// through.
    pub now: Duration,
}

/// What happened during one frame.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Live ghost node, if the session is active
    pub ghost: Option<NodeId>,
    /// Where the pointer ray met the floor plane
    pub pointer_hit: Option<Vec3>,
    /// Neighbor chosen by the search, snapped to or not
    pub neighbor: Option<Neighbor>,
    /// Snap applied to the ghost this frame
    pub snap: Option<SnapResolution>,
    /// Placement validity after everything ran
    pub valid: bool,
    /// Modules committed this frame
    pub placed: Vec<NodeId>,
    /// Position the host camera should refocus on after a floor change
    pub refocus: Option<Vec3>,
    /// Commits that failed
    pub errors: Vec<BuildError>,
}

/// The interactive building tool.
pub struct PlacementSession {
    config: BuilderConfig,
    catalog: ModuleCatalog,
    prefs: Box<dyn ToolStateStore>,
    state: ToolState,
    site: Option<ConstructionSite>,
    selected: Option<ModulePrototype>,
    ghost: Option<Ghost>,
    material: GhostMaterial,
    floor: FloorState,
    snap_threshold: f32,
    index: ModuleIndex,
    elevation_gate: CommandCooldown,
}

impl PlacementSession {
    /// Start a session with the persisted tool state loaded from `prefs`.
    pub fn start(catalog: ModuleCatalog, config: BuilderConfig, prefs: Box<dyn ToolStateStore>) -> Self {
        let state = prefs.load().map(ToolState::from_flag).unwrap_or_default();
        info!(?state, modules = catalog.len(), "placement session started");

        Self {
            floor: FloorState::new(config.floor_step),
            material: GhostMaterial::new(config.ghost_alpha),
            snap_threshold: config.snap_threshold,
            elevation_gate: CommandCooldown::new(config.elevation_cooldown()),
            config,
            catalog,
            prefs,
            state,
            site: None,
            selected: None,
            ghost: None,
            index: ModuleIndex::new(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn tool_state(&self) -> ToolState {
        self.state
    }

    /// A building is open and the tool is in build mode.
    pub fn is_building(&self) -> bool {
        self.state == ToolState::BuildInitiated && self.site.is_some()
    }

    pub fn site(&self) -> Option<&ConstructionSite> {
        self.site.as_ref()
    }

    pub fn floor(&self) -> &FloorState {
        &self.floor
    }

    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    pub fn ghost(&self) -> Option<NodeId> {
        self.ghost.as_ref().map(|g| g.node)
    }

    pub fn material(&self) -> &GhostMaterial {
        &self.material
    }

    pub fn selected(&self) -> Option<&ModulePrototype> {
        self.selected.as_ref()
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Open the building `name`, resuming it if a root with that name is
    /// already in the scene. Returns the root node.
    pub fn begin_building<S>(&mut self, scene: &mut S, name: &str) -> NodeId
    where
        S: SceneGraph + ?Sized,
    {
        let site = ConstructionSite::open(scene, name);
        self.index.clear();
        for group in site.group_nodes() {
            self.index.register_group(group);
        }
        let root = site.root();
        self.site = Some(site);
        self.set_state(ToolState::BuildInitiated);
        root
    }

    /// Delete the building, the ghost and the selection.
    pub fn discard_building<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        if let Some(site) = self.site.take() {
            scene.destroy(site.root());
            info!(building = site.name(), "discarded building");
        }
        self.destroy_ghost(scene);
        self.selected = None;
        self.index.clear();
        self.floor.reset();
        self.elevation_gate.reset();
        self.set_state(ToolState::NoBuild);
    }

    /// Strip every collider from the open building. Returns how many were
    /// removed.
    pub fn remove_all_colliders<S>(&mut self, scene: &mut S) -> usize
    where
        S: SceneGraph + ?Sized,
    {
        let Some(site) = self.site.as_ref() else {
            return 0;
        };
        let removed = scene.remove_colliders(site.root());
        info!(building = site.name(), removed, "removed colliders");
        removed
    }

    /// Shut the tool down: the ghost goes, the building stays in the scene,
    /// and the persisted state returns to no-build.
    pub fn end<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        self.destroy_ghost(scene);
        self.site = None;
        self.set_state(ToolState::NoBuild);
        info!("placement session ended");
    }

    fn set_state(&mut self, state: ToolState) {
        self.state = state;
        if let Err(e) = self.prefs.save(state.flag()) {
            warn!(error = %e, "failed to persist tool state");
        }
        debug!(?state, "tool state changed");
    }

    // ========================================================================
    // SELECTION & GHOST
    // ========================================================================

    /// Select the prototype called `name`. The ghost follows on the next
    /// tick.
    pub fn select(&mut self, name: &str) -> Result<(), BuildError> {
        let prototype = self
            .catalog
            .find(name)
            .cloned()
            .ok_or_else(|| BuildError::UnknownPrototype(name.to_string()))?;
        debug!(prototype = name, module_type = %prototype.module_type, "selected prototype");
        self.selected = Some(prototype);
        Ok(())
    }

    /// Drop the selection and its ghost.
    pub fn clear_selection<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        self.selected = None;
        self.destroy_ghost(scene);
    }

    fn destroy_ghost<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        if let Some(ghost) = self.ghost.take() {
            scene.destroy(ghost.node);
        }
    }

    /// The ghost node, but only if it was stamped from the selected
    /// prototype. A ghost left over from an earlier selection is stale
    /// until the next tick replaces it.
    fn live_ghost(&self) -> Option<NodeId> {
        let prototype = self.selected.as_ref()?;
        self.ghost.as_ref().filter(|g| g.matches(&prototype.name)).map(|g| g.node)
    }

    /// Make sure a ghost of the selected prototype exists. A fresh ghost
    /// starts at the authored scale, so the snap threshold starts over too.
    fn ensure_ghost<S>(&mut self, scene: &mut S) -> Option<NodeId>
    where
        S: SceneGraph + ?Sized,
    {
        let prototype = self.selected.as_ref()?;
        let fresh = self
            .ghost
            .as_ref()
            .is_some_and(|g| g.matches(&prototype.name) && scene.contains(g.node));

        if !fresh {
            if let Some(old) = self.ghost.take() {
                scene.destroy(old.node);
            }
            let node = scene.instantiate(&prototype.template(), SpawnMode::Preview);
            scene.set_name(node, &format!("{}_preview", prototype.name));
            scene.set_tint(node, self.material.set_feedback(false));
            self.snap_threshold = self.config.snap_threshold;
            debug!(prototype = %prototype.name, %node, "created ghost");
            self.ghost = Some(Ghost {
                node,
                prototype: prototype.name.clone(),
            });
        }
        self.ghost.as_ref().map(|g| g.node)
    }

    /// Re-validate the ghost and update its tint.
    fn refresh_feedback<S>(&mut self, scene: &mut S, ghost: NodeId) -> bool
    where
        S: SceneGraph + SceneQuery + ?Sized,
    {
        let valid = is_valid_placement(&*scene, ghost, self.config.validation_tolerance);
        scene.set_tint(ghost, self.material.set_feedback(valid));
        valid
    }

    // ========================================================================
    // TICK
    // ========================================================================

    /// Run one frame.
    pub fn tick<S, U>(&mut self, scene: &mut S, undo: &mut U, frame: &FrameInput) -> TickReport
    where
        S: SceneGraph + SceneQuery + ?Sized,
        U: UndoLedger + ?Sized,
    {
        let mut report = TickReport::default();
        if !self.is_building() {
            return report;
        }
        let Some(ghost) = self.ensure_ghost(scene) else {
            return report;
        };
        report.ghost = Some(ghost);

        let hit = frame
            .pointer_ray
            .as_ref()
            .and_then(|ray| ray_plane_intersection(ray, self.floor.plane_height()));
        match hit {
            Some(hit) => {
                report.pointer_hit = Some(hit);
                self.update_preview(scene, ghost, hit, &mut report);
            }
            None => report.valid = self.material.is_valid(),
        }

        for command in &frame.commands {
            self.apply(scene, undo, *command, frame.now, &mut report);
        }
        if !frame.commands.is_empty() {
            if let Some(ghost) = self.ghost() {
                report.valid = self.refresh_feedback(scene, ghost);
            }
        }
        report
    }

    /// Move the ghost to `hit`, snap it and validate it.
    fn update_preview<S>(&mut self, scene: &mut S, ghost: NodeId, hit: Vec3, report: &mut TickReport)
    where
        S: SceneGraph + SceneQuery + ?Sized,
    {
        let Some(module_type) = self.selected.as_ref().map(|p| p.module_type) else {
            return;
        };
        let Some(mut transform) = scene.local_transform(ghost) else {
            return;
        };
        transform.translation = hit;
        scene.set_local_transform(ghost, transform);

        let bounds = compute_bounds(&*scene, ghost);
        let params = SearchParams {
            module_type,
            vertical: self.floor.vertical_snap(),
            rotation: transform.rotation,
            search_multiplier: self.config.search_multiplier,
            vertical_probe_depth: self.config.vertical_probe_depth,
            uniform_epsilon: self.config.uniform_epsilon,
        };
        let neighbor = find_closest_neighbor(&*scene, ghost, &bounds, &self.index, &params);
        report.neighbor = neighbor;

        if let Some(neighbor) = neighbor.filter(|n| should_snap(Some(n), params.vertical, self.snap_threshold)) {
            let target = SnapBody {
                position: scene.world_position(neighbor.node).unwrap_or(Vec3::ZERO),
                extents: compute_bounds(&*scene, neighbor.node).extents,
            };
            let body = SnapBody {
                position: hit,
                extents: bounds.extents,
            };
            let snap = resolve_snap(&body, &target, module_type, params.vertical);

            transform.translation = snap.position;
            if let Some(rotation) = snap.rotation() {
                transform.rotation = rotation;
            }
            scene.set_local_transform(ghost, transform);
            trace!(neighbor = %neighbor.node, distance = neighbor.distance, mode = ?snap.mode, "snapped ghost");
            report.snap = Some(snap);
        }

        report.valid = self.refresh_feedback(scene, ghost);
    }

    fn apply<S, U>(&mut self, scene: &mut S, undo: &mut U, command: BuildCommand, now: Duration, report: &mut TickReport)
    where
        S: SceneGraph + SceneQuery + ?Sized,
        U: UndoLedger + ?Sized,
    {
        match command {
            BuildCommand::Place => match self.commit(scene, undo) {
                Ok(Some(node)) => report.placed.push(node),
                Ok(None) => {}
                Err(e) => report.errors.push(e),
            },
            BuildCommand::Rescale(delta) => {
                self.rescale(scene, delta);
            }
            BuildCommand::ResetScale => self.reset_scale(scene),
            BuildCommand::RotatePreview(degrees) => self.rotate(scene, degrees),
            BuildCommand::ElevateUp | BuildCommand::ElevateDown => {
                if self.elevate(command == BuildCommand::ElevateUp, now).is_some() {
                    report.refocus = self.ghost().and_then(|g| scene.world_position(g));
                }
            }
            BuildCommand::ToggleSnapMode => {
                self.toggle_snap_mode();
            }
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Stamp a permanent copy of the ghost into the building.
    ///
    /// Returns `Ok(None)` without touching the scene or the undo ledger when
    /// the tool is idle, nothing is selected, the ghost has not caught up
    /// with the selection yet, or the ghost overlaps something. The ghost
    /// stays live either way.
    ///
    /// # Errors
    ///
    /// [`BuildError::NoActiveBuilding`] when the tool is in build mode but no
    /// building was opened, [`BuildError::MissingRoot`] when the building
    /// root was removed from the scene.
    pub fn commit<S, U>(&mut self, scene: &mut S, undo: &mut U) -> Result<Option<NodeId>, BuildError>
    where
        S: SceneGraph + SceneQuery + ?Sized,
        U: UndoLedger + ?Sized,
    {
        if self.state != ToolState::BuildInitiated {
            return Ok(None);
        }
        if self.site.is_none() {
            return Err(BuildError::NoActiveBuilding);
        }
        let Some(ghost) = self.live_ghost() else {
            debug!("nothing to place: no ghost for the current selection");
            return Ok(None);
        };
        let (Some(prototype), Some(site)) = (self.selected.as_ref(), self.site.as_mut()) else {
            return Ok(None);
        };
        let Some(transform) = scene.local_transform(ghost) else {
            return Ok(None);
        };
        if !is_valid_placement(&*scene, ghost, self.config.validation_tolerance) {
            debug!(prototype = %prototype.name, "placement blocked: ghost overlaps");
            return Ok(None);
        }

        let group = site.group_for(scene, prototype.module_type).inspect_err(|e| {
            warn!(prototype = %prototype.name, error = %e, "no group for module, placement skipped");
        })?;
        self.index.register_group(group);

        let placed = scene.instantiate(&prototype.template(), SpawnMode::Permanent);
        scene.set_local_transform(placed, transform);
        scene.reparent(placed, Some(group));
        let name = format!("{}_{}", prototype.name, scene.child_count(group));
        scene.set_name(placed, &name);
        self.index.tag(placed, prototype.module_type);

        undo.register_creation(placed, &format!("Object Spawned: {name}"));
        info!(module = %name, node = %placed, module_type = %prototype.module_type, "placed module");
        Ok(Some(placed))
    }

    /// Grow or shrink the ghost footprint by one step in the direction of
    /// `delta`. Square prototypes scale on both horizontal axes, others on
    /// their longer one. A step that would overlap something is rolled
    /// back. Returns whether the scale changed.
    pub fn rescale<S>(&mut self, scene: &mut S, delta: f32) -> bool
    where
        S: SceneGraph + SceneQuery + ?Sized,
    {
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }
        let (Some(node), Some(prototype)) = (self.live_ghost(), self.selected.as_ref()) else {
            return false;
        };
        let Some(mut transform) = scene.local_transform(node) else {
            return false;
        };

        let step = delta.signum() * self.config.scale_step;
        let size = prototype.local_bounds().size();
        let min = self.config.min_scale;
        let current = transform.scale;
        let mut scale = current;

        if (size.x - size.z).abs() < self.config.square_epsilon {
            scale.x = (current.x + step).max(min);
            scale.z = (current.z + step).max(min);
        } else if size.x > size.z {
            scale.x = (current.x + step).max(min);
        } else {
            scale.z = (current.z + step).max(min);
        }
        if scale == current {
            return false;
        }

        transform.scale = scale;
        scene.set_local_transform(node, transform);
        if !is_valid_placement(&*scene, node, self.config.validation_tolerance) {
            transform.scale = current;
            scene.set_local_transform(node, transform);
            debug!("scaling blocked: not enough space");
            return false;
        }

        self.snap_threshold += step;
        trace!(?scale, threshold = self.snap_threshold, "rescaled ghost");
        true
    }

    /// Back to the authored scale and the default snap threshold.
    pub fn reset_scale<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        let (Some(node), Some(prototype)) = (self.live_ghost(), self.selected.as_ref()) else {
            return;
        };
        if let Some(mut transform) = scene.local_transform(node) {
            transform.scale = prototype.scale;
            scene.set_local_transform(node, transform);
        }
        self.snap_threshold = self.config.snap_threshold;
        debug!("ghost scale reset");
    }

    /// Yaw the ghost by `degrees` about its up axis.
    pub fn rotate<S>(&mut self, scene: &mut S, degrees: f32)
    where
        S: SceneGraph + ?Sized,
    {
        let Some(node) = self.ghost() else {
            return;
        };
        if let Some(mut transform) = scene.local_transform(node) {
            transform.rotation = (transform.rotation * Quat::from_rotation_y(degrees.to_radians())).normalize();
            scene.set_local_transform(node, transform);
        }
    }

    /// Move the floor plane one step up or down. Returns the new elevation,
    /// or `None` while the debounce interval is running.
    pub fn elevate(&mut self, up: bool, now: Duration) -> Option<i32> {
        if !self.elevation_gate.ready(now) {
            debug!("floor change ignored: cooling down");
            return None;
        }
        let elevation = if up { self.floor.raise() } else { self.floor.lower() };
        info!(floor = self.floor.floor_index(), elevation, "current floor");
        Some(elevation)
    }

    /// Returns `true` when vertical snapping is now on.
    pub fn toggle_snap_mode(&mut self) -> bool {
        let vertical = self.floor.toggle_snap_mode();
        let mode = if vertical { "vertical" } else { "horizontal" };
        info!(mode, "snap mode");
        vertical
    }
}
