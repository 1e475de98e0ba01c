// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Deferred drawing. Nodes push draw calls while the tree updates, the
//! list is flushed in push order once the whole update pass is over.

use crate::{
    render::{
        sprite::{place, Align, Sprite},
        surface::Surface,
    },
    util::Point,
};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    pub pos: Point,
}

impl Camera {
    pub fn new(pos: Point) -> Self {
        Self { pos }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.pos = self.pos.offset(dx, dy);
    }
}

#[derive(Debug, Clone)]
pub struct DrawCall {
    pub surface: Rc<Surface>,
    pub pos: Point,
    pub align: Align,
    pub distance: f32,
}

#[derive(Debug, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    pub fn push_sprite(&mut self, sprite: &Sprite) {
        self.calls.push(DrawCall {
            surface: sprite.surface.clone(),
            pos: sprite.pos,
            align: sprite.align,
            distance: sprite.distance,
        });
    }

    /// Background covering the screen from its top-left corner
    pub fn push_background(&mut self, surface: Rc<Surface>) {
        self.calls.push(DrawCall {
            surface,
            pos: Point::default(),
            align: Align::TopLeft,
            distance: 0.0,
        });
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter()
    }

    /// Blit every call onto `screen`, first pushed is drawn first
    pub fn flush(&self, screen: &mut Surface, camera: &Camera) {
        for call in &self.calls {
            let rect = place(&call.surface, call.pos, call.align, call.distance, camera);
            screen.blit(&call.surface, rect.topleft());
        }
    }
}
