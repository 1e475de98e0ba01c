// WGF
// copyright zipxing@hotmail.com 2022～2025

use std::rc::Rc;
use wgf::{
    render::{Align, Sprite, Surface},
    util::{Point, Rect},
};

/// Where a freshly spawned enemy stands, from its top left corner
pub const ENEMY_SPAWN: Point = Point::new(10, 400);

pub struct Enemy {
    image: Rc<Surface>,
    /// image the spin rotates from
    original: Rc<Surface>,
    pub rect: Rect,
    area: Rect,
    horizontal_speed: i32,
    /// rotation angle, the enemy spins while it is not 0
    angle: i32,
}

impl Enemy {
    pub const SCALE: u32 = 4;

    pub fn new(image: &Surface, area: Rect) -> Self {
        let image = Rc::new(image.scaled(Self::SCALE));
        let mut rect = image.rect();
        // keep the spawn point inside small screens
        let y = ENEMY_SPAWN.y.min(area.bottom() - rect.height).max(area.top());
        rect.move_ip(ENEMY_SPAWN.x, y);
        Self {
            original: image.clone(),
            image,
            rect,
            area,
            horizontal_speed: 4,
            angle: 0,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.angle != 0
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn speed(&self) -> i32 {
        self.horizontal_speed
    }

    pub fn update(&mut self) {
        if self.is_spinning() {
            self.spin();
        } else {
            self.walk();
        }
    }

    /// Walk horizontally, turning around at the edges of the area
    pub fn walk(&mut self) {
        let mut pos = self.rect.move_by(self.horizontal_speed, 0);
        if !self.area.contains(pos) {
            self.horizontal_speed = -self.horizontal_speed;
            pos = self.rect.move_by(self.horizontal_speed, 0);
            self.image = Rc::new(self.image.flipped(true, false));
        }
        self.rect = pos;
    }

    /// Rotate by another 12 degrees around the center
    pub fn spin(&mut self) {
        let center = self.rect.center();
        self.angle += 12;
        if self.angle >= 360 {
            self.angle = 0;
            self.image = self.original.clone();
        } else {
            self.image = Rc::new(self.original.rotated(self.angle as f32));
        }
        self.rect = self.image.rect().with_center(center);
    }

    /// Start spinning. Returns false if already spinning.
    pub fn damaged(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.angle = 1;
        self.original = self.image.clone();
        true
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.image.clone(), self.rect.topleft()).with_align(Align::TopLeft)
    }
}

pub struct Greatsword {
    image: Rc<Surface>,
    pub rect: Rect,
    attacking: bool,
}

impl Greatsword {
    pub const SCALE: u32 = 2;

    pub fn new(image: &Surface) -> Self {
        let image = Rc::new(image.scaled(Self::SCALE));
        Self {
            rect: image.rect(),
            image,
            attacking: false,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Follow the mouse, hanging from its mid top
    pub fn update(&mut self, mouse: Point) {
        self.rect = self.rect.with_midtop(mouse);
        if self.attacking {
            self.rect.move_ip(5, 10);
        }
    }

    /// Swing at `target`, true on a hit. A swing already in progress
    /// never hits.
    pub fn hit(&mut self, target: &Enemy) -> bool {
        if self.attacking {
            return false;
        }
        self.attacking = true;
        let hitbox = self.rect.inflate(-5, 5);
        hitbox.intersects(target.rect)
    }

    pub fn pullback(&mut self) {
        self.attacking = false;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.image.clone(), self.rect.topleft()).with_align(Align::TopLeft)
    }
}
