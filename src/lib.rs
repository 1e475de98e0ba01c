// WGF
// copyright zipxing@hotmail.com 2022～2025

//! WGF (whatever game framework) is a small 2D game framework.
//! It is suitable for prototyping little games whose states are switched
//! through a scene tree and whose timing logic lives in frame-driven tasks.
//!
//! Everything that happens in a frame runs on one thread, in a fixed order:
//! input events are drained, the task manager runs, the scene tree updates,
//! the collected draw list is flushed onto the screen surface and the screen
//! is presented by the render adapter.
//!
//! There is no global mutable state. A single [`context::Context`] is created
//! by the [`game::GameWindow`] and passed by reference to every scene callback
//! and every task.
//!
//! # Example
//!
//! ```ignore
//! use wgf::{game::GameWindow, scene::Scene};
//!
//! let mut game = GameWindow::new("My Game", ());
//! game.init()?;
//! let mut intro = Scene::new("intro");
//! intro.on_init(|_scene, ctx| ctx.assets.load_all());
//! game.tree.add(intro, true);
//! game.run()?;
//! ```

/// framerate per second, set to moderate number to save CPUs
pub const GAME_FRAME: u32 = 60;

/// common value types: point, size, rect
pub mod util;

/// input events: keyboard, mouse, quit and resize
pub mod event;

/// timer, task and task manager driven by the frame clock
pub mod task;

/// surfaces, colors, sprites, animations, fonts and render adapters
pub mod render;

/// loads images, sounds and fonts from disk into name-keyed catalogs
pub mod asset;

/// plays sounds loaded by the asset loader
pub mod audio;

/// window settings and their toml persistence
pub mod config;

/// the explicit application context shared by scenes and tasks
pub mod context;

/// node and scene lifecycle, scene tree
pub mod scene;

/// owns the frame loop, ties context, tree and adapter together
pub mod game;

/// log
pub mod log;
