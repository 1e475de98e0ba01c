// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Surface is the owned RGBA pixel buffer every image, text and the screen
//! itself are stored in, reference https://docs.rs/image
//!
//! Blitting does alpha src-over compositing and silently clips against the
//! destination bounds, so sprites may be partly or fully off screen.

use crate::{
    render::style::{Rgb, Rgba},
    util::{Point, Rect, Size},
};
use image::{
    imageops::{self, FilterType},
    DynamicImage, ImageResult, RgbaImage,
};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    img: RgbaImage,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(Size::new(0, 0))
    }
}

/// alpha src-over of one pixel onto another
fn blend(dst: image::Rgba<u8>, src: image::Rgba<u8>) -> image::Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst[3] as u32 * (255 - sa) / 255;
    let oa = sa + da;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = ((src[i] as u32 * sa + dst[i] as u32 * da) / oa) as u8;
    }
    out[3] = oa as u8;
    image::Rgba(out)
}

impl Surface {
    /// Fully transparent surface
    pub fn new(size: Size) -> Self {
        Self {
            img: RgbaImage::new(size.width, size.height),
        }
    }

    pub fn filled<C: Into<Rgba>>(size: Size, color: C) -> Self {
        let c: Rgba = color.into();
        Self {
            img: RgbaImage::from_pixel(size.width, size.height, c.into()),
        }
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn from_dynamic(img: DynamicImage) -> Self {
        Self {
            img: img.into_rgba8(),
        }
    }

    /// Decode an image file, format is guessed from the content
    pub fn load<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        Ok(Self::from_dynamic(image::open(path)?))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.img.width(), self.img.height())
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.img.get_pixel_checked(x, y).map(|p| Rgba::from(*p))
    }

    /// out of bounds writes are ignored
    pub fn put_pixel<C: Into<Rgba>>(&mut self, x: u32, y: u32, color: C) {
        if x < self.width() && y < self.height() {
            let c: Rgba = color.into();
            self.img.put_pixel(x, y, c.into());
        }
    }

    pub fn fill<C: Into<Rgba>>(&mut self, color: C) {
        let c: Rgba = color.into();
        let p: image::Rgba<u8> = c.into();
        for px in self.img.pixels_mut() {
            *px = p;
        }
    }

    /// Draw `src` with its top-left corner at `pos`
    pub fn blit(&mut self, src: &Surface, pos: Point) {
        let area = self.rect().intersection(src.rect().move_by(pos.x, pos.y));
        if area.width == 0 || area.height == 0 {
            return;
        }
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let sp = *src.img.get_pixel((x - pos.x) as u32, (y - pos.y) as u32);
                let dp = self.img.get_pixel_mut(x as u32, y as u32);
                *dp = blend(*dp, sp);
            }
        }
    }

    pub fn flip(&mut self, horizontal: bool, vertical: bool) {
        if horizontal {
            imageops::flip_horizontal_in_place(&mut self.img);
        }
        if vertical {
            imageops::flip_vertical_in_place(&mut self.img);
        }
    }

    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Surface {
        let mut s = self.clone();
        s.flip(horizontal, vertical);
        s
    }

    /// Integer upscale, pixels stay sharp
    pub fn scaled(&self, factor: u32) -> Surface {
        self.resized(Size::new(self.width() * factor, self.height() * factor))
    }

    pub fn resized(&self, size: Size) -> Surface {
        Self {
            img: imageops::resize(&self.img, size.width, size.height, FilterType::Nearest),
        }
    }

    /// Counterclockwise rotation around the center. The result grows to
    /// hold the whole rotated image, uncovered corners are transparent.
    pub fn rotated(&self, degrees: f32) -> Surface {
        let turns = degrees.rem_euclid(360.0);
        if turns == 0.0 {
            return self.clone();
        }
        let (sin, cos) = turns.to_radians().sin_cos();
        let (w, h) = (self.width() as f32, self.height() as f32);
        // tiny epsilon so 90 degree steps don't grow by a pixel
        let nw = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(0.0) as u32;
        let nh = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(0.0) as u32;
        let mut img = RgbaImage::new(nw, nh);
        let (cx, cy) = (nw as f32 / 2.0, nh as f32 / 2.0);
        for (dx, dy, px) in img.enumerate_pixels_mut() {
            let x = dx as f32 + 0.5 - cx;
            let y = dy as f32 + 0.5 - cy;
            let sx = (x * cos - y * sin + w / 2.0).floor();
            let sy = (x * sin + y * cos + h / 2.0).floor();
            if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                *px = *self.img.get_pixel(sx as u32, sy as u32);
            }
        }
        Self { img }
    }

    /// Copy of the area covered by `rect`, clipped to this surface
    pub fn subsurface(&self, rect: Rect) -> Surface {
        let area = self.rect().intersection(rect);
        Self {
            img: imageops::crop_imm(
                &self.img,
                area.x as u32,
                area.y as u32,
                area.width as u32,
                area.height as u32,
            )
            .to_image(),
        }
    }

    /// Every pixel of exactly this color becomes transparent
    pub fn set_colorkey(&mut self, key: Rgb) {
        for px in self.img.pixels_mut() {
            if px[0] == key.red && px[1] == key.green && px[2] == key.blue {
                px[3] = 0;
            }
        }
    }

    /// Drops the alpha channel
    pub fn make_opaque(&mut self) {
        for px in self.img.pixels_mut() {
            px[3] = 255;
        }
    }
}
