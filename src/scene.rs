// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Scenes and the scene tree.
//!
//! A [`Scene`] is a node managing a single current child: switching stops
//! the old child and plays the new one, so every game state keeps its own
//! init/show/hide logic. The [`SceneTree`] is the root scene of a game.
//!
//! Per frame the tree clears its draw list, updates the root, and only
//! after every update of the frame is done the draw list is flushed.
//! A scene pushes its background before its children update, so the
//! background always ends up below whatever the children draw.

use crate::render::{
    draw_list::{Camera, DrawList},
    surface::Surface,
};
use log::{debug, warn};
use std::{
    fmt,
    ops::{Deref, DerefMut},
    rc::Rc,
};

mod node;
pub mod widgets;
pub use node::{Hook, Node};
pub use widgets::{Label, TextRender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownChild { scene: String, child: String },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownChild { scene, child } => {
                write!(f, "Scene '{}' has no child named '{}'", scene, child)
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Per-frame data passed down the tree during update
#[derive(Debug, Default)]
pub struct Frame {
    pub delta_ms: u64,
    pub draw_list: DrawList,
}

/// A child in the hierarchy is either a plain node or a scene
pub enum Child<C> {
    Node(Node<C>),
    Scene(Scene<C>),
}

impl<C> fmt::Debug for Child<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Child::Scene(s) => f.debug_tuple("Scene").field(&s.node).finish(),
        }
    }
}

impl<C> From<Node<C>> for Child<C> {
    fn from(n: Node<C>) -> Self {
        Child::Node(n)
    }
}

impl<C> From<Scene<C>> for Child<C> {
    fn from(s: Scene<C>) -> Self {
        Child::Scene(s)
    }
}

impl<C> Child<C> {
    pub fn base(&self) -> &Node<C> {
        match self {
            Child::Node(n) => n,
            Child::Scene(s) => &s.node,
        }
    }

    pub fn base_mut(&mut self) -> &mut Node<C> {
        match self {
            Child::Node(n) => n,
            Child::Scene(s) => &mut s.node,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn init(&mut self, ctx: &mut C) {
        self.base_mut().init(ctx);
    }

    /// Show and activate
    pub fn show(&mut self, ctx: &mut C) {
        self.base_mut().show(ctx, true);
    }

    pub fn play(&mut self, ctx: &mut C) {
        match self {
            Child::Node(n) => n.play(ctx),
            Child::Scene(s) => s.play(ctx),
        }
    }

    pub fn stop(&mut self, ctx: &mut C) {
        match self {
            Child::Node(n) => n.stop(ctx),
            Child::Scene(s) => s.stop(ctx),
        }
    }

    pub fn update(&mut self, ctx: &mut C, frame: &mut Frame) -> bool {
        match self {
            Child::Node(n) => n.update(ctx, frame),
            Child::Scene(s) => s.update(ctx, frame),
        }
    }
}

/// Node with an optional background and a single current child
pub struct Scene<C> {
    node: Node<C>,
    pub background: Option<Rc<Surface>>,
    current: Option<String>,
    default: Option<String>,
    previous: Option<String>,
}

impl<C> fmt::Debug for Scene<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("node", &self.node)
            .field("current", &self.current)
            .field("default", &self.default)
            .field("previous", &self.previous)
            .finish()
    }
}

impl<C> Deref for Scene<C> {
    type Target = Node<C>;
    fn deref(&self) -> &Node<C> {
        &self.node
    }
}

impl<C> DerefMut for Scene<C> {
    fn deref_mut(&mut self) -> &mut Node<C> {
        &mut self.node
    }
}

impl<C> Scene<C> {
    pub fn new(name: &str) -> Self {
        Self {
            node: Node::new(name),
            background: None,
            current: None,
            default: None,
            previous: None,
        }
    }

    pub fn with_background(mut self, background: Surface) -> Self {
        self.background = Some(Rc::new(background));
        self
    }

    /// Attach a child without running its lifecycle. With `default` it
    /// becomes the child played when the scene starts.
    pub fn add<T: Into<Child<C>>>(&mut self, child: T, default: bool) {
        let child = child.into();
        let name = child.name().to_string();
        if default {
            self.default = Some(name.clone());
        }
        self.node.insert_child(&name, child);
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn default_child(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn current_child(&self) -> Option<&Child<C>> {
        self.current.as_deref().and_then(|n| self.node.child(n))
    }

    pub fn current_child_mut(&mut self) -> Option<&mut Child<C>> {
        match self.current.clone() {
            Some(n) => self.node.child_mut(&n),
            None => None,
        }
    }

    /// Initialize and run the scene together with its current child.
    /// Calling it on a running scene only re-asserts the state.
    pub fn play(&mut self, ctx: &mut C) {
        self.node.init(ctx);
        if !self.node.shown {
            self.node.show(ctx, true);
        } else {
            self.node.active = true;
        }
        if self.current.is_none() {
            self.current = self.default.clone();
        }
        if let Some(child) = self.current_child_mut() {
            child.play(ctx);
        }
    }

    /// Stop the current child, then the scene itself
    pub fn stop(&mut self, ctx: &mut C) {
        if let Some(child) = self.current_child_mut() {
            child.stop(ctx);
        }
        self.node.stop(ctx);
    }

    /// Switch to a specific child, stopping the current one first
    pub fn switch(&mut self, ctx: &mut C, name: &str) -> Result<(), SceneError> {
        if !self.node.contains(name) {
            return Err(SceneError::UnknownChild {
                scene: self.node.name.clone(),
                child: name.to_string(),
            });
        }
        if let Some(child) = self.current_child_mut() {
            child.stop(ctx);
        }
        self.previous = self.current.replace(name.to_string());
        if let Some(child) = self.current_child_mut() {
            child.play(ctx);
        }
        debug!("{} switched to '{}'", self.node.name, name);
        Ok(())
    }

    /// Show previous child, if available
    pub fn show_previous(&mut self, ctx: &mut C) {
        if self.previous.is_none() {
            warn!("There are no previous children in {}", self.node.name);
            return;
        }
        if let Some(child) = self.current_child_mut() {
            child.stop(ctx);
        }
        std::mem::swap(&mut self.current, &mut self.previous);
        if let Some(child) = self.current_child_mut() {
            child.play(ctx);
        }
        debug!("{} went back to {:?}", self.node.name, self.current);
    }

    pub fn update(&mut self, ctx: &mut C, frame: &mut Frame) -> bool {
        if !self.node.active {
            return false;
        }
        if let Some(bg) = &self.background {
            frame.draw_list.push_background(bg.clone());
        }
        self.node.update_active(ctx, frame);
        true
    }
}

/// Root of the game's hierarchy
pub struct SceneTree<C> {
    pub root: Scene<C>,
    frame: Frame,
    started: bool,
}

impl<C> Default for SceneTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SceneTree<C> {
    pub fn new() -> Self {
        debug!("Initializing scene tree");
        Self {
            root: Scene::new("root"),
            frame: Frame::default(),
            started: false,
        }
    }

    pub fn add<T: Into<Child<C>>>(&mut self, scene: T, default: bool) {
        self.root.add(scene, default);
    }

    /// Plays the root, which starts the default scene
    pub fn start(&mut self, ctx: &mut C) {
        self.root.play(ctx);
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn switch(&mut self, ctx: &mut C, name: &str) -> Result<(), SceneError> {
        self.root.switch(ctx, name)
    }

    pub fn show_previous(&mut self, ctx: &mut C) {
        self.root.show_previous(ctx);
    }

    /// Name of the scene currently shown
    pub fn current(&self) -> Option<&str> {
        self.root.current()
    }

    pub fn get(&self, name: &str) -> Option<&Child<C>> {
        self.root.child(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Child<C>> {
        self.root.child_mut(name)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Updates the whole tree, collecting what to draw in this frame
    pub fn update(&mut self, ctx: &mut C, delta_ms: u64) -> bool {
        self.frame.delta_ms = delta_ms;
        self.frame.draw_list.clear();
        self.root.update(ctx, &mut self.frame)
    }

    pub fn draw(&self, screen: &mut Surface, camera: &Camera) {
        self.frame.draw_list.flush(screen, camera);
    }
}
