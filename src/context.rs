// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Context encapsulates the state shared by everything running in a frame:
//! settings, assets, the screen surface, camera, the input events of the
//! current frame, mouse position and the task manager.
//! `shared` is free for the game to keep its own state in, the way other
//! frameworks offer a global `g` object.
//!
//! Scene switches requested through the context are applied by the game
//! window right after the scene tree update of the frame.

use crate::{
    asset::{AssetsConfig, AssetsLoader},
    config::SettingsManager,
    event::Event,
    render::{draw_list::Camera, surface::Surface},
    task::TaskManager,
    util::Point,
};

pub struct Context<S> {
    pub title: String,
    pub settings: SettingsManager,
    pub assets: AssetsLoader,
    pub screen: Surface,
    pub camera: Camera,
    /// input events received since the previous frame
    pub events: Vec<Event>,
    pub mouse: Point,
    pub tasks: TaskManager<Context<S>>,
    /// frame counter
    pub stage: u32,
    /// elapsed time of the current frame
    pub delta_ms: u64,
    pub shared: S,
    pending_scene: Option<String>,
    back_requested: bool,
    cursor_request: Option<bool>,
    running: bool,
}

impl<S> Context<S> {
    pub fn new(title: &str, shared: S) -> Self {
        let settings = SettingsManager::new();
        let screen = Surface::new(settings.get().size);
        Self {
            title: title.to_string(),
            settings,
            assets: AssetsLoader::new(AssetsConfig::default()),
            screen,
            camera: Camera::default(),
            events: vec![],
            mouse: Point::default(),
            tasks: TaskManager::new(),
            stage: 0,
            delta_ms: 0,
            shared,
            pending_scene: None,
            back_requested: false,
            cursor_request: None,
            running: true,
        }
    }

    /// Ask the tree to switch to scene `name` at the end of this frame
    pub fn switch_scene(&mut self, name: &str) {
        self.pending_scene = Some(name.to_string());
        self.back_requested = false;
    }

    /// Ask the tree to go back to the previous scene at the end of this frame
    pub fn show_previous(&mut self) {
        self.pending_scene = None;
        self.back_requested = true;
    }

    pub(crate) fn take_scene_request(&mut self) -> Option<SceneRequest> {
        if self.back_requested {
            self.back_requested = false;
            return Some(SceneRequest::Previous);
        }
        self.pending_scene.take().map(SceneRequest::Switch)
    }

    /// Show or hide the mouse cursor once this frame is presented
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_request = Some(visible);
    }

    pub(crate) fn take_cursor_request(&mut self) -> Option<bool> {
        self.cursor_request.take()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forget a previous quit request, used when a window is run again
    pub(crate) fn resume(&mut self) {
        self.running = true;
    }

    /// Register a callback fired once after `ms` of frame time
    pub fn do_later<F>(&mut self, ms: i64, f: F)
    where
        F: FnOnce(&mut Context<S>) + 'static,
    {
        self.tasks.do_later(ms, f);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SceneRequest {
    Switch(String),
    Previous,
}
