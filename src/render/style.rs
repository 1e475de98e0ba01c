// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Defines colors. Channels are always kept in the valid 0..=255 range,
//! out of range input is clamped on construction.

use crate::util::clamp;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index};

#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// hex string is not exactly 6 hex digits (with optional leading '#')
    InvalidHex(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "Invalid hex color: {:?}", s),
        }
    }
}

impl std::error::Error for ColorError {}

fn channel(v: i32) -> u8 {
    clamp(v, 0, 255) as u8
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        red: 0,
        green: 0,
        blue: 0,
    };
    pub const WHITE: Rgb = Rgb {
        red: 255,
        green: 255,
        blue: 255,
    };

    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self {
            red: channel(red),
            green: channel(green),
            blue: channel(blue),
        }
    }

    /// Create color from "#rrggbb" or "rrggbb"
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(color.to_string()));
        }
        let part = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(color.to_string()))
        };
        Ok(Self {
            red: part(0)?,
            green: part(2)?,
            blue: part(4)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    pub const fn len(&self) -> usize {
        3
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        match key {
            "red" => Some(self.red),
            "green" => Some(self.green),
            "blue" => Some(self.blue),
            _ => None,
        }
    }

    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }
}

impl Index<usize> for Rgb {
    type Output = u8;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            _ => panic!("Rgb index out of range: {}", index),
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(c: (u8, u8, u8)) -> Self {
        Self {
            red: c.0,
            green: c.1,
            blue: c.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            alpha: 255,
        }
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0,
    };

    pub fn new(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Self {
            red: channel(red),
            green: channel(green),
            blue: channel(blue),
            alpha: channel(alpha),
        }
    }

    pub const fn len(&self) -> usize {
        4
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        match key {
            "red" => Some(self.red),
            "green" => Some(self.green),
            "blue" => Some(self.blue),
            "alpha" => Some(self.alpha),
            _ => None,
        }
    }

    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.alpha)
    }

    pub fn rgb(self) -> Rgb {
        Rgb {
            red: self.red,
            green: self.green,
            blue: self.blue,
        }
    }
}

impl Index<usize> for Rgba {
    type Output = u8;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            3 => &self.alpha,
            _ => panic!("Rgba index out of range: {}", index),
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.red, c.green, c.blue, c.alpha])
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(p: image::Rgba<u8>) -> Self {
        Rgba {
            red: p.0[0],
            green: p.0[1],
            blue: p.0[2],
            alpha: p.0[3],
        }
    }
}
