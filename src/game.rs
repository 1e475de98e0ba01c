// WGF
// copyright zipxing@hotmail.com 2022～2025

//! GameWindow ties the context, the scene tree and the render adapter
//! together and implements the main loop.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> Result<(), Box<dyn Error>> {
//!    init_log(log::LevelFilter::Info, Some("log/slasher.log"))?;
//!    let mut game = GameWindow::new("Slasher", ());
//!    game.init()?;
//!    game.tree.add(intro_scene(), true);
//!    game.run()?;
//!    Ok(())
//! }
//! ```

use crate::{
    config::WindowMode,
    context::{Context, SceneRequest},
    event::Event,
    render::{adapter::Adapter, style::Rgba, surface::Surface},
    scene::{SceneError, SceneTree},
    task::TaskManager,
    util::{Point, Size},
    GAME_FRAME,
};
use log::{debug, info, warn};
use std::{
    fmt,
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Debug)]
pub enum GameError {
    Adapter(String),
    Scene(SceneError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Adapter(s) => write!(f, "Render adapter error: {}", s),
            GameError::Scene(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<SceneError> for GameError {
    fn from(e: SceneError) -> Self {
        GameError::Scene(e)
    }
}

#[cfg(cross_backend)]
fn default_adapter() -> Box<dyn Adapter> {
    Box::new(crate::render::adapter::cross::CrosstermAdapter::new())
}

#[cfg(headless_backend)]
fn default_adapter() -> Box<dyn Adapter> {
    Box::new(crate::render::adapter::HeadlessAdapter::new().sleeping(true))
}

/// GameWindow owns a Context, a SceneTree and the adapter presenting frames
pub struct GameWindow<S> {
    pub ctx: Context<S>,
    pub tree: SceneTree<Context<S>>,
    /// frames per second
    pub clock_speed: u32,
    pub icon_path: Option<PathBuf>,
    pub adapter: Box<dyn Adapter>,
    initialized: bool,
    active: bool,
    pending_events: Vec<Event>,
}

impl<S> GameWindow<S> {
    /// Game window with the default adapter of the enabled features
    pub fn new(title: &str, shared: S) -> Self {
        Self::with_adapter(title, shared, default_adapter())
    }

    pub fn with_adapter(title: &str, shared: S, adapter: Box<dyn Adapter>) -> Self {
        info!("{}(wgf) start...", title);
        Self {
            ctx: Context::new(title, shared),
            tree: SceneTree::new(),
            clock_speed: GAME_FRAME,
            icon_path: None,
            adapter,
            initialized: false,
            active: false,
            pending_events: vec![],
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Open the window with the current settings. Calling it again does nothing.
    pub fn init(&mut self) -> Result<(), GameError> {
        if self.initialized {
            return Ok(());
        }
        info!("Init game window...");
        self.configure(None, None, &[])?;
        if let Some(path) = self.icon_path.clone() {
            match Surface::load(&path) {
                Ok(icon) => {
                    if let Err(e) = self.adapter.set_icon(&icon) {
                        warn!("Unable to set icon {:?}: {}", path, e);
                    }
                }
                Err(e) => warn!("Unable to load icon {:?}: {}", path, e),
            }
        }
        self.initialized = true;
        Ok(())
    }

    /// Apply window settings, `None` keeps the current value.
    /// The screen surface is recreated and the adapter opened again.
    pub fn configure(
        &mut self,
        size: Option<Size>,
        vsync: Option<bool>,
        modes: &[(WindowMode, bool)],
    ) -> Result<(), GameError> {
        let settings = self.ctx.settings.get_mut();
        if let Some(size) = size {
            settings.size = size;
        }
        if let Some(vsync) = vsync {
            settings.vsync = vsync;
        }
        for (mode, on) in modes {
            settings.window_modes.set(*mode, *on);
        }
        let settings = settings.clone();
        debug!(
            "Configure window {:?} vsync={} modes={:?}",
            settings.size,
            settings.vsync,
            settings.window_modes.flags()
        );
        self.ctx.screen = Surface::new(settings.size);
        self.adapter
            .init(&self.ctx.title, &settings)
            .map_err(GameError::Adapter)
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<(), GameError> {
        self.adapter
            .set_cursor_visible(visible)
            .map_err(GameError::Adapter)
    }

    /// Queue an input event for the next frame
    pub fn push_event(&mut self, event: Event) {
        self.pending_events.push(event);
    }

    /// Switch the scene shown by the tree right away
    pub fn switch(&mut self, name: &str) -> Result<(), GameError> {
        self.tree.switch(&mut self.ctx, name)?;
        Ok(())
    }

    /// Start the tree, playing its default scene
    pub fn start(&mut self) {
        self.tree.start(&mut self.ctx);
    }

    /// Main loop, polling input events and calling on_tick at a constant
    /// framerate per second. Returns when quit is requested.
    pub fn run(&mut self) -> Result<(), GameError> {
        if !self.initialized {
            warn!("Game window is not initialized, call init() first");
            return Ok(());
        }
        info!("Begin run...");
        self.active = true;
        self.ctx.resume();

        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_nanos(1_000_000_000 / self.clock_speed.max(1) as u64);

        let result = loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_nanos(100));

            if self.adapter.poll_event(timeout, &mut self.pending_events) {
                break Ok(());
            }

            let et = last_tick.elapsed();
            if et >= tick_rate {
                last_tick = Instant::now();
                if let Err(e) = self.on_tick(et.as_millis() as u64) {
                    break Err(e);
                }
                if !self.ctx.is_running() {
                    break Ok(());
                }
            }
        };
        self.exit();
        result
    }

    /// One frame: events, tasks, scene tree, drawing, scene switch, present
    pub fn on_tick(&mut self, delta_ms: u64) -> Result<(), GameError> {
        let ctx = &mut self.ctx;
        ctx.stage += 1;
        ctx.delta_ms = delta_ms;

        ctx.events.clear();
        ctx.events.append(&mut self.pending_events);
        for e in ctx.events.iter() {
            if let Some((x, y)) = e.mouse_pos() {
                ctx.mouse = Point::new(x, y);
            }
        }
        if ctx.events.contains(&Event::Quit) {
            ctx.quit();
        }

        TaskManager::update_in(ctx, delta_ms, |c| &mut c.tasks);

        if !self.tree.is_started() {
            self.tree.start(ctx);
        }
        self.tree.update(ctx, delta_ms);

        ctx.screen.fill(Rgba::TRANSPARENT);
        self.tree.draw(&mut ctx.screen, &ctx.camera);

        match ctx.take_scene_request() {
            Some(SceneRequest::Switch(name)) => self.tree.switch(ctx, &name)?,
            Some(SceneRequest::Previous) => self.tree.show_previous(ctx),
            None => {}
        }
        if let Some(visible) = ctx.take_cursor_request() {
            self.adapter
                .set_cursor_visible(visible)
                .map_err(GameError::Adapter)?;
        }

        self.adapter
            .present(&self.ctx.screen)
            .map_err(GameError::Adapter)
    }

    /// Give the output device back
    pub fn exit(&mut self) {
        self.adapter.reset();
        self.active = false;
        info!("{}(wgf) exit after {} frames", self.ctx.title, self.ctx.stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::{adapter::HeadlessAdapter, style::Rgb},
        scene::Scene,
    };

    fn headless(game: &mut GameWindow<u32>) -> &mut HeadlessAdapter {
        game.adapter
            .as_any()
            .downcast_mut::<HeadlessAdapter>()
            .unwrap()
    }

    fn game() -> GameWindow<u32> {
        GameWindow::with_adapter("test", 0, Box::new(HeadlessAdapter::new()))
    }

    #[test]
    fn init_is_idempotent() {
        let mut g = game();
        g.init().unwrap();
        g.init().unwrap();
        assert!(g.is_initialized());
        assert_eq!(headless(&mut g).inits, 1);
        assert_eq!(headless(&mut g).title, "test");
    }

    #[test]
    fn configure_recreates_screen() {
        let mut g = game();
        g.init().unwrap();
        g.configure(Some(Size::new(40, 30)), Some(true), &[(WindowMode::HIDDEN, true)])
            .unwrap();
        assert_eq!(g.ctx.screen.size(), Size::new(40, 30));
        let settings = g.ctx.settings.get().clone();
        assert!(settings.vsync);
        assert!(settings.window_modes.hidden);
        assert_eq!(headless(&mut g).settings, settings);
        assert_eq!(headless(&mut g).inits, 2);
    }

    #[test]
    fn missing_icon_only_warns() {
        let mut g = game();
        g.icon_path = Some(PathBuf::from("does/not/exist.png"));
        assert!(g.init().is_ok());
        assert!(headless(&mut g).icon.is_none());
    }

    #[test]
    fn run_refuses_before_init() {
        let mut g = game();
        headless(&mut g).push_events(vec![Event::Quit]);
        g.run().unwrap();
        assert_eq!(g.ctx.stage, 0);
        assert_eq!(headless(&mut g).pending(), 1);
    }

    #[test]
    fn tick_draws_and_presents() {
        let mut g = game();
        g.configure(Some(Size::new(8, 8)), None, &[]).unwrap();
        g.tree
            .add(Scene::new("s").with_background(Surface::filled(Size::new(8, 8), Rgb::WHITE)), true);
        g.on_tick(16).unwrap();
        assert_eq!(g.ctx.stage, 1);
        assert_eq!(g.ctx.delta_ms, 16);
        assert_eq!(g.tree.current(), Some("s"));
        let frame = headless(&mut g).last_frame.clone().unwrap();
        assert_eq!(frame.pixel(3, 3).unwrap().rgb(), Rgb::WHITE);
        assert_eq!(headless(&mut g).presented, 1);
    }

    #[test]
    fn tasks_added_inside_tasks_survive() {
        let mut g = game();
        g.ctx.tasks.task("spawner", |ctx: &mut Context<u32>| {
            ctx.shared += 1;
            ctx.tasks.task("child", |ctx: &mut Context<u32>| ctx.shared += 10);
        });
        g.on_tick(16).unwrap();
        assert_eq!(g.ctx.shared, 1);
        assert!(g.ctx.tasks.contains("child"));
        g.on_tick(16).unwrap();
        // the spawner runs again and re-registers a fresh child
        assert_eq!(g.ctx.shared, 12);
    }

    #[test]
    fn task_can_stop_another_task() {
        let mut g = game();
        g.ctx.tasks.task("count", |ctx: &mut Context<u32>| ctx.shared += 1);
        g.ctx.tasks.timed_task("referee", 40, |ctx: &mut Context<u32>| {
            if let Some(t) = ctx.tasks.get_mut("count") {
                t.stop();
            }
        });
        g.ctx.tasks.remove_complete = true;
        for _ in 0..5 {
            g.on_tick(16).unwrap();
        }
        // counted on frames 1 to 3, the referee fires on frame 3
        assert_eq!(g.ctx.shared, 3);
        assert!(!g.ctx.tasks.contains("count"));
        assert!(g.ctx.tasks.contains("referee"));
    }

    #[test]
    fn quit_event_stops_the_context() {
        let mut g = game();
        g.push_event(Event::Quit);
        g.on_tick(16).unwrap();
        assert!(!g.ctx.is_running());
        assert_eq!(g.ctx.events, vec![Event::Quit]);
    }

    #[test]
    fn cursor_request_reaches_adapter() {
        let mut g = game();
        g.ctx.set_cursor_visible(false);
        g.on_tick(16).unwrap();
        assert!(!headless(&mut g).cursor_visible);
    }

    #[test]
    fn deferred_switch_to_unknown_scene_fails() {
        let mut g = game();
        g.tree.add(Scene::new("a"), true);
        g.ctx.switch_scene("zzz");
        assert!(matches!(g.on_tick(16), Err(GameError::Scene(_))));
    }
}
