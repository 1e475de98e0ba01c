// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Node is the unit of the scene hierarchy.
//!
//! A node owns its children, in insertion order, and carries three flags:
//! `initialized`, `shown` and `active`. Behaviour is attached through hooks
//! set with `on_init`, `on_show`, `on_update`, `on_hide` and `on_pause`,
//! plus `on_click` run by [`Node::click`].
//! Every hook receives the node itself and the caller's context, so it can
//! reach its children, sprite and animation as well as the assets or task
//! manager kept in the context.

use crate::{
    render::{animation::Animation, sprite::Sprite},
    scene::{widgets::Label, Child, Frame, Scene},
    util::Point,
};
use std::{collections::HashMap, fmt};

pub type Hook<C> = Box<dyn FnMut(&mut Node<C>, &mut C)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookKind {
    Init = 0,
    Show = 1,
    Update = 2,
    Hide = 3,
    Pause = 4,
    Click = 5,
}

pub struct Node<C> {
    pub name: String,
    pub initialized: bool,
    pub shown: bool,
    pub active: bool,
    /// drawn after the node and its children updated
    pub sprite: Option<Sprite>,
    /// replaces the sprite's surface whenever a new frame is due
    pub animation: Option<Animation>,
    /// text re-rendered into the sprite when it changes
    pub label: Option<Label>,
    children: Vec<(String, Child<C>)>,
    child_index: HashMap<String, usize>,
    counter: usize,
    hooks: [Option<Hook<C>>; 6],
}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("initialized", &self.initialized)
            .field("shown", &self.shown)
            .field("active", &self.active)
            .field(
                "children",
                &self.children.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<C> Node<C> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            initialized: false,
            shown: false,
            active: false,
            sprite: None,
            animation: None,
            label: None,
            children: vec![],
            child_index: HashMap::new(),
            counter: 0,
            hooks: Default::default(),
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Node playing `animation` at `pos`, starting with its current frame
    pub fn animated(name: &str, animation: Animation, pos: Point) -> Self {
        let mut node = Self::new(name);
        if let Some(frame) = animation.current_frame() {
            node.sprite = Some(Sprite::new(frame, pos));
        }
        node.animation = Some(animation);
        node
    }

    /// Node showing `label` centered on `pos`
    pub fn text(name: &str, label: Label, pos: Point) -> Self {
        let mut node = Self::new(name);
        node.sprite = Some(Sprite::new(label.surface(), pos));
        node.label = Some(label);
        node
    }

    fn set_hook(&mut self, kind: HookKind, hook: Hook<C>) -> &mut Self {
        self.hooks[kind as usize] = Some(hook);
        self
    }

    /// Runs a hook with the node lent to it. A hook replaced from
    /// inside itself keeps the replacement.
    fn run_hook(&mut self, kind: HookKind, ctx: &mut C) -> bool {
        let idx = kind as usize;
        match self.hooks[idx].take() {
            Some(mut hook) => {
                hook(self, ctx);
                if self.hooks[idx].is_none() {
                    self.hooks[idx] = Some(hook);
                }
                true
            }
            None => false,
        }
    }

    pub fn on_init<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Init, Box::new(f))
    }

    pub fn on_show<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Show, Box::new(f))
    }

    pub fn on_update<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Update, Box::new(f))
    }

    pub fn on_click<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Click, Box::new(f))
    }

    /// Runs the click hook of an active node, true if it ran
    pub fn click(&mut self, ctx: &mut C) -> bool {
        self.active && self.run_hook(HookKind::Click, ctx)
    }

    pub fn on_hide<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Hide, Box::new(f))
    }

    pub fn on_pause<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Node<C>, &mut C) + 'static,
    {
        self.set_hook(HookKind::Pause, Box::new(f))
    }

    /// Single-use initializer, runs again only after stop
    pub fn init(&mut self, ctx: &mut C) {
        if self.initialized {
            return;
        }
        self.run_hook(HookKind::Init, ctx);
        self.initialized = true;
    }

    pub fn show(&mut self, ctx: &mut C, play: bool) {
        if self.shown || !self.initialized {
            return;
        }
        self.run_hook(HookKind::Show, ctx);
        self.shown = true;
        self.active = play;
    }

    /// Initializes if needed and activates, visibility is left alone
    pub fn play(&mut self, ctx: &mut C) {
        self.init(ctx);
        self.active = true;
    }

    pub fn pause(&mut self, ctx: &mut C) {
        self.run_hook(HookKind::Pause, ctx);
        self.active = false;
    }

    pub fn hide(&mut self, ctx: &mut C, pause: bool) {
        if !self.shown {
            return;
        }
        self.run_hook(HookKind::Hide, ctx);
        self.shown = false;
        self.active = !pause;
    }

    pub fn stop(&mut self, ctx: &mut C) {
        self.hide(ctx, true);
        self.active = false;
        self.initialized = false;
    }

    pub fn toggle_pause(&mut self) {
        self.active = !self.active;
    }

    pub fn toggle_hide(&mut self) {
        self.shown = !self.shown;
    }

    /// Update children, then this node. Does nothing while inactive.
    pub fn update(&mut self, ctx: &mut C, frame: &mut Frame) -> bool {
        if !self.active {
            return false;
        }
        self.update_active(ctx, frame);
        true
    }

    pub(crate) fn update_active(&mut self, ctx: &mut C, frame: &mut Frame) {
        for (_, child) in self.children.iter_mut() {
            child.update(ctx, frame);
        }
        self.run_hook(HookKind::Update, ctx);
        if let (Some(label), Some(sprite)) = (&self.label, self.sprite.as_mut()) {
            sprite.set_surface(label.surface());
        }
        if let Some(anim) = self.animation.as_mut() {
            if let Some(next) = anim.update(frame.delta_ms) {
                if let Some(sprite) = self.sprite.as_mut() {
                    sprite.set_surface(next);
                }
            }
        }
        if let Some(sprite) = &self.sprite {
            frame.draw_list.push_sprite(sprite);
        }
    }

    /// Store `child` under `key` without running its lifecycle
    pub fn insert_child(&mut self, key: &str, child: Child<C>) {
        match self.child_index.get(key) {
            Some(&i) => self.children[i].1 = child,
            None => {
                self.child_index.insert(key.to_string(), self.children.len());
                self.children.push((key.to_string(), child));
            }
        }
    }

    /// Initializes the child (and shows it when `show`) then stores it
    /// under its own name, replacing a child of the same name
    pub fn add_child<T: Into<Child<C>>>(&mut self, ctx: &mut C, child: T, show: bool) {
        let mut child = child.into();
        child.init(ctx);
        if show {
            child.show(ctx);
        }
        let key = child.name().to_string();
        self.insert_child(&key, child);
    }

    /// Group behaviour: stores the child as `{name}_{n}`, returns the key
    pub fn add_numbered_child<T: Into<Child<C>>>(&mut self, ctx: &mut C, child: T, show: bool) -> String {
        let mut child = child.into();
        child.init(ctx);
        if show {
            child.show(ctx);
        }
        let key = format!("{}_{}", self.name, self.counter);
        self.counter += 1;
        self.insert_child(&key, child);
        key
    }

    pub fn remove_child(&mut self, key: &str) -> Option<Child<C>> {
        let idx = self.child_index.remove(key)?;
        let (_, child) = self.children.remove(idx);
        for (i, (k, _)) in self.children.iter().enumerate().skip(idx) {
            self.child_index.insert(k.clone(), i);
        }
        Some(child)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.child_index.contains_key(key)
    }

    pub fn child(&self, key: &str) -> Option<&Child<C>> {
        self.child_index.get(key).map(|&i| &self.children[i].1)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut Child<C>> {
        match self.child_index.get(key) {
            Some(&i) => Some(&mut self.children[i].1),
            None => None,
        }
    }

    /// The child's node, a scene child gives its base node
    pub fn node(&self, key: &str) -> Option<&Node<C>> {
        self.child(key).map(Child::base)
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut Node<C>> {
        self.child_mut(key).map(Child::base_mut)
    }

    pub fn scene(&self, key: &str) -> Option<&Scene<C>> {
        match self.child(key) {
            Some(Child::Scene(s)) => Some(s),
            _ => None,
        }
    }

    pub fn scene_mut(&mut self, key: &str) -> Option<&mut Scene<C>> {
        match self.child_mut(key) {
            Some(Child::Scene(s)) => Some(s),
            _ => None,
        }
    }

    /// Children with their keys, in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Child<C>)> {
        self.children.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = (&str, &mut Child<C>)> {
        self.children.iter_mut().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
