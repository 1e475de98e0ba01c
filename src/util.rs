// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Common value types: Point, Size and Rect.
//! Point and Size can be read both list-like (`p[0]`) and dict-like
//! (`p.get("x")`), the way callers that expect tuples use them.

use serde::{Deserialize, Serialize};
use std::{
    cmp::{max, min},
    ops::Index,
};

/// Get value in between provided range
pub fn clamp<T: PartialOrd>(val: T, minval: T, maxval: T) -> T {
    if val > maxval {
        maxval
    } else if val < minval {
        minval
    } else {
        val
    }
}

/// Some specific x, y location on screen
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn len(&self) -> usize {
        2
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        match key {
            "x" => Some(self.x),
            "y" => Some(self.y),
            _ => None,
        }
    }

    pub fn to_tuple(self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Index<usize> for Point {
    type Output = i32;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Point index out of range: {}", index),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from(p: (i32, i32)) -> Self {
        Point::new(p.0, p.1)
    }
}

/// Abstract width and height values
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn len(&self) -> usize {
        2
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        match key {
            "width" => Some(self.width),
            "height" => Some(self.height),
            _ => None,
        }
    }

    pub fn to_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Index<usize> for Size {
    type Output = u32;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.width,
            1 => &self.height,
            _ => panic!("Size index out of range: {}", index),
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from(s: (u32, u32)) -> Self {
        Size::new(s.0, s.1)
    }
}

/// Axis aligned rectangle in screen pixels, used for placement and collisions
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Rect {
        Rect::new(0, 0, size.width as i32, size.height as i32)
    }

    pub fn left(self) -> i32 {
        self.x
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn top(self) -> i32 {
        self.y
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn topleft(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn size(self) -> Size {
        Size::new(self.width.max(0) as u32, self.height.max(0) as u32)
    }

    pub fn with_center(self, c: Point) -> Rect {
        Rect::new(c.x - self.width / 2, c.y - self.height / 2, self.width, self.height)
    }

    pub fn with_midtop(self, p: Point) -> Rect {
        Rect::new(p.x - self.width / 2, p.y, self.width, self.height)
    }

    pub fn move_by(self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn move_ip(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow or shrink the rect around its center
    pub fn inflate(self, dw: i32, dh: i32) -> Rect {
        Rect::new(
            self.x - dw / 2,
            self.y - dh / 2,
            self.width + dw,
            self.height + dh,
        )
    }

    pub fn contains(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn union(self, other: Rect) -> Rect {
        let x1 = min(self.x, other.x);
        let y1 = min(self.y, other.y);
        let x2 = max(self.right(), other.right());
        let y2 = max(self.bottom(), other.bottom());
        Rect {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Overlapping area, zero sized when the rects don't intersect
    pub fn intersection(self, other: Rect) -> Rect {
        let x1 = max(self.x, other.x);
        let y1 = max(self.y, other.y);
        let x2 = min(self.right(), other.right());
        let y2 = min(self.bottom(), other.bottom());
        Rect {
            x: x1,
            y: y1,
            width: max(0, x2 - x1),
            height: max(0, y2 - y1),
        }
    }

    pub fn intersects(self, other: Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
