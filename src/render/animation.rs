// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Animation consisting of multiple frames, advanced by frame time.

use crate::{render::surface::Surface, task::Timer};
use std::{ops::Index, rc::Rc};

/// milliseconds each frame stays on screen
pub const DEFAULT_FRAME_TIME: i64 = 160;

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Rc<Surface>>,
    pub looped: bool,
    /// next frame handed out by update
    current: usize,
    /// last frame handed out by update
    shown: Option<usize>,
    timer: Timer,
}

impl Animation {
    pub fn new(frames: Vec<Surface>) -> Self {
        Self::with_speed(frames, DEFAULT_FRAME_TIME)
    }

    pub fn with_speed(frames: Vec<Surface>, frame_time_ms: i64) -> Self {
        Self {
            frames: frames.into_iter().map(Rc::new).collect(),
            looped: true,
            current: 0,
            shown: None,
            timer: Timer::new(frame_time_ms),
        }
    }

    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Integer upscale of every frame
    pub fn scaled(mut self, scale: u32) -> Self {
        self.frames = self
            .frames
            .iter()
            .map(|f| Rc::new(f.scaled(scale)))
            .collect();
        self
    }

    pub fn start_at(mut self, frame: usize) -> Self {
        self.current = frame.min(self.frames.len());
        self.shown = None;
        self
    }

    /// Returns the next frame when it's due, None otherwise. A finished
    /// non-looping animation returns None forever.
    pub fn update(&mut self, delta_ms: u64) -> Option<Rc<Surface>> {
        if !self.timer.update(delta_ms) {
            return None;
        }
        self.timer.restart();

        if self.current >= self.frames.len() {
            if !self.looped || self.frames.is_empty() {
                return None;
            }
            self.current = 0;
        }
        let frame = self.frames[self.current].clone();
        self.shown = Some(self.current);
        self.current += 1;
        Some(frame)
    }

    /// Mirror all frames in place
    pub fn flip(&mut self, horizontal: bool, vertical: bool) {
        if !(horizontal || vertical) {
            return;
        }
        for f in self.frames.iter_mut() {
            *f = Rc::new(f.flipped(horizontal, vertical));
        }
    }

    /// The frame currently shown: the last one handed out by update,
    /// or the starting frame before that
    pub fn current_frame(&self) -> Option<Rc<Surface>> {
        let idx = self
            .shown
            .unwrap_or(self.current)
            .min(self.frames.len().saturating_sub(1));
        self.frames.get(idx).cloned()
    }

    pub fn frame_index(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.shown = None;
        self.timer.restart();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Surface>> {
        self.frames.iter()
    }
}

impl Index<usize> for Animation {
    type Output = Rc<Surface>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a Animation {
    type Item = &'a Rc<Surface>;
    type IntoIter = std::slice::Iter<'a, Rc<Surface>>;
    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::style::Rgb, util::Size};

    fn frames() -> Vec<Surface> {
        (0..3)
            .map(|i| Surface::filled(Size::new(2, 1), Rgb::new(i * 100, 0, 0)))
            .collect()
    }

    fn red_of(s: &Rc<Surface>) -> u8 {
        s.pixel(0, 0).unwrap().red
    }

    #[test]
    fn non_looping_stops_after_last() {
        let mut anim = Animation::with_speed(frames(), 10).looped(false);
        let mut seen = vec![];
        for _ in 0..6 {
            if let Some(f) = anim.update(10) {
                seen.push(red_of(&f));
            }
        }
        assert_eq!(seen, vec![0, 100, 200]);
        assert!(anim.update(10).is_none());
    }

    #[test]
    fn looping_cycles() {
        let mut anim = Animation::with_speed(frames(), 10);
        let seen: Vec<u8> = (0..5)
            .filter_map(|_| anim.update(10))
            .map(|f| red_of(&f))
            .collect();
        assert_eq!(seen, vec![0, 100, 200, 0, 100]);
    }

    #[test]
    fn frames_wait_for_timer() {
        let mut anim = Animation::new(frames());
        assert!(anim.update(100).is_none());
        assert!(anim.update(60).is_some());
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn flip_twice_restores() {
        let mut s = Surface::new(Size::new(2, 1));
        s.put_pixel(0, 0, Rgb::WHITE);
        let mut anim = Animation::new(vec![s.clone()]);
        anim.flip(true, false);
        assert_ne!(*anim[0], s);
        anim.flip(true, false);
        assert_eq!(*anim[0], s);
        assert_eq!(anim.iter().count(), 1);
    }

    #[test]
    fn scale_and_index() {
        let anim = Animation::new(frames()).scaled(2);
        assert_eq!(anim.len(), 3);
        assert_eq!(anim[2].size(), Size::new(4, 2));
        assert_eq!(red_of(&anim.current_frame().unwrap()), 0);
    }

    #[test]
    fn current_frame_honors_start() {
        let mut anim = Animation::with_speed(frames(), 10).start_at(2);
        assert_eq!(red_of(&anim.current_frame().unwrap()), 200);
        // shown frame 2, wrapped around to hand out frame 0 next
        assert_eq!(red_of(&anim.update(10).unwrap()), 200);
        assert_eq!(red_of(&anim.current_frame().unwrap()), 200);
        assert_eq!(red_of(&anim.update(10).unwrap()), 0);
        assert_eq!(red_of(&anim.current_frame().unwrap()), 0);
        anim.reset();
        assert_eq!(red_of(&anim.current_frame().unwrap()), 0);
    }

    #[test]
    fn current_frame_of_empty_animation() {
        assert!(Animation::new(vec![]).start_at(3).current_frame().is_none());
    }
}
