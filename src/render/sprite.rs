// WGF
// copyright zipxing@hotmail.com 2022～2025

//! A Sprite is a surface placed somewhere on screen. Its position is an
//! anchor point, the [`Align`] tells which point of the image sits on it.
//!
//! `distance` couples the sprite to the camera: 0.0 is unaffected by camera
//! movement, 1.0 moves together with the camera. Values in between give a
//! parallax effect to backgrounds.

use crate::{
    render::{draw_list::Camera, surface::Surface},
    util::{Point, Rect},
};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Center,
    TopLeft,
    TopRight,
    MidTop,
}

impl Align {
    /// Place a rect of the given size so its anchor lands on `anchor`
    pub fn place(self, anchor: Point, width: i32, height: i32) -> Rect {
        let r = Rect::new(0, 0, width, height);
        match self {
            Align::Center => r.with_center(anchor),
            Align::TopLeft => r.move_by(anchor.x, anchor.y),
            Align::TopRight => r.move_by(anchor.x - width, anchor.y),
            Align::MidTop => r.with_midtop(anchor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    pub surface: Rc<Surface>,
    pub pos: Point,
    pub align: Align,
    pub distance: f32,
}

impl Sprite {
    pub fn new(surface: Rc<Surface>, pos: Point) -> Self {
        Self {
            surface,
            pos,
            align: Align::Center,
            distance: 0.0,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn set_surface(&mut self, surface: Rc<Surface>) {
        self.surface = surface;
    }

    /// Screen rect the sprite covers with the camera at `camera`
    pub fn rect(&self, camera: &Camera) -> Rect {
        place(&self.surface, self.pos, self.align, self.distance, camera)
    }

    /// Screen rect ignoring the camera, used for collisions in world space
    pub fn world_rect(&self) -> Rect {
        self.align.place(
            self.pos,
            self.surface.width() as i32,
            self.surface.height() as i32,
        )
    }
}

pub(crate) fn place(
    surface: &Surface,
    pos: Point,
    align: Align,
    distance: f32,
    camera: &Camera,
) -> Rect {
    let anchor = Point::new(
        (camera.pos.x as f32 * distance) as i32 + pos.x,
        (camera.pos.y as f32 * distance) as i32 + pos.y,
    );
    align.place(anchor, surface.width() as i32, surface.height() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Size;

    #[test]
    fn align_anchors() {
        let a = Point::new(50, 20);
        assert_eq!(Align::Center.place(a, 10, 4), Rect::new(45, 18, 10, 4));
        assert_eq!(Align::TopLeft.place(a, 10, 4), Rect::new(50, 20, 10, 4));
        assert_eq!(Align::TopRight.place(a, 10, 4), Rect::new(40, 20, 10, 4));
        assert_eq!(Align::MidTop.place(a, 10, 4), Rect::new(45, 20, 10, 4));
    }

    #[test]
    fn camera_distance() {
        let s = Sprite::new(Rc::new(Surface::new(Size::new(4, 4))), Point::new(10, 10))
            .with_align(Align::TopLeft);
        let cam = Camera::new(Point::new(100, -20));
        assert_eq!(s.rect(&cam).topleft(), Point::new(10, 10));
        let far = s.clone().with_distance(0.5);
        assert_eq!(far.rect(&cam).topleft(), Point::new(60, 0));
        assert_eq!(far.world_rect().topleft(), Point::new(10, 10));
    }
}
