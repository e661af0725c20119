//! Building Tool - Headless Placement Demo
//!
//! Drives a [`PlacementSession`] through a scripted sequence of pointer
//! positions and commands to assemble a small two-storey house, then logs
//! the resulting hierarchy.
//!
//! Run with: `cargo run --bin building_tool -- [--catalog FILE] [--config FILE] [--prefs FILE]`
//!
//! Set `RUST_LOG=debug` to see every snap and validation decision.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use tracing::{info, warn};

use modular_builder_engine::camera::Ray;
use modular_builder_engine::game::builder::{
    BuildCommand, BuildError, FrameInput, JsonPrefs, MemoryPrefs, ModuleCatalog, PlacementSession, ToolStateStore,
    UndoStack,
};
use modular_builder_engine::game::config::BuilderConfig;
use modular_builder_engine::world::{NodeId, Scene, SceneGraph};

const CAMERA: Vec3 = Vec3::new(0.0, 20.0, -20.0);
const FRAME: Duration = Duration::from_millis(250);

#[derive(Default)]
struct CliOptions {
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    prefs: Option<PathBuf>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => options.catalog = args.next().map(PathBuf::from),
                "--config" => options.config = args.next().map(PathBuf::from),
                "--prefs" => options.prefs = args.next().map(PathBuf::from),
                other => warn!("ignoring unknown argument {other}"),
            }
        }
        options
    }
}

/// Scripted frame clock plus the scene the session works on.
struct Driver {
    scene: Scene,
    undo: UndoStack,
    session: PlacementSession,
    now: Duration,
    placed: usize,
}

impl Driver {
    fn frame(&mut self, target: Option<Vec3>, commands: Vec<BuildCommand>) {
        self.now += FRAME;
        let input = FrameInput {
            pointer_ray: target.map(|t| Ray::towards(CAMERA, t)),
            commands,
            now: self.now,
        };
        let report = self.session.tick(&mut self.scene, &mut self.undo, &input);
        self.placed += report.placed.len();
        for err in &report.errors {
            warn!("{err}");
        }
        if let Some(focus) = report.refocus {
            info!("camera refocus on {focus}");
        }
    }

    /// Hover `target` for one frame, then place.
    fn place(&mut self, module: &str, target: Vec3) -> Result<(), BuildError> {
        self.session.select(module)?;
        self.frame(Some(target), Vec::new());
        self.frame(Some(target), vec![BuildCommand::Place]);
        Ok(())
    }
}

fn log_tree(scene: &Scene, node: NodeId, depth: usize) {
    let name = scene.name(node).unwrap_or("?");
    let pos = scene.world_position(node).unwrap_or(Vec3::ZERO);
    info!("{:indent$}{name} @ ({:.2}, {:.2}, {:.2})", "", pos.x, pos.y, pos.z, indent = depth * 2);
    for child in scene.children(node) {
        log_tree(scene, child, depth + 1);
    }
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = CliOptions::parse(env::args().skip(1));

    let catalog = match &cli.catalog {
        Some(path) => ModuleCatalog::load(path)?,
        None => ModuleCatalog::builtin(),
    };
    let config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::default(),
    };
    let prefs: Box<dyn ToolStateStore> = match cli.prefs {
        Some(path) => Box::new(JsonPrefs::new(path)),
        None => Box::new(MemoryPrefs::default()),
    };
    info!("catalog has {} modules", catalog.len());

    let mut driver = Driver {
        scene: Scene::new(),
        undo: UndoStack::new(),
        session: PlacementSession::start(catalog, config, prefs),
        now: Duration::ZERO,
        placed: 0,
    };

    let root = driver.session.begin_building(&mut driver.scene, "Demo House");

    // Ground floor: 2x2 tiles, each snapped against the previous one.
    for target in [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(3.2, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 3.2),
        Vec3::new(3.2, 0.0, 3.2),
    ] {
        driver.place("Floor_Tile", target)?;
    }

    // Front walls along X, with a pillar closing the corner.
    driver.place("Wall_Plain", Vec3::new(0.0, 0.0, -1.6))?;
    driver.place("Wall_Window", Vec3::new(3.2, 0.0, -1.6))?;
    driver.place("Junction_Pillar", Vec3::new(4.8, 0.0, -1.6))?;
    driver.place("Props_Crate", Vec3::new(1.0, 0.0, 1.0))?;

    // Up one floor, stack a second tile layer vertically.
    driver.frame(None, vec![BuildCommand::ElevateUp, BuildCommand::ToggleSnapMode]);
    let level = driver.session.floor().elevation() as f32;
    driver.place("Floor_Tile", Vec3::new(0.0, level, 0.0))?;
    driver.frame(None, vec![BuildCommand::ToggleSnapMode]);

    // A slightly wider roof panel.
    driver.session.select("Roof_Flat")?;
    driver.frame(Some(Vec3::new(3.2, level, 0.0)), vec![BuildCommand::Rescale(0.2)]);
    driver.frame(Some(Vec3::new(3.2, level, 0.0)), vec![BuildCommand::Place]);

    driver.session.end(&mut driver.scene);

    info!("placed {} modules ({} undo entries)", driver.placed, driver.undo.undo_count());
    log_tree(&driver.scene, root, 0);
    Ok(())
}
