// WGF
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! Everything visible is a [`Surface`], a CPU-side RGBA image. Nodes don't
//! draw directly: during the update pass they enqueue their sprites on a
//! [`DrawList`], which is flushed onto the screen surface once all updates
//! of the frame are done. The screen is then handed to an [`Adapter`].
//!
//! ## Submodules
//! - `style`: colors
//! - `surface`: pixel buffer with blit, scale, rotate and flip
//! - `spritesheet`: slicing a surface into equally sized tiles
//! - `font`: rasterizing text into surfaces
//! - `sprite`: positioned surfaces and alignment
//! - `draw_list`: per-frame deferred draw calls and the camera
//! - `animation`: time-gated frame sequences
//! - `adapter`: render adapter interface (crossterm, headless)

pub mod adapter;
pub mod animation;
pub mod draw_list;
pub mod font;
pub mod sprite;
pub mod spritesheet;
pub mod style;
pub mod surface;

pub use adapter::{Adapter, HeadlessAdapter};
pub use animation::Animation;
pub use draw_list::{Camera, DrawList};
pub use font::Font;
pub use sprite::{Align, Sprite};
pub use spritesheet::SpritesheetError;
pub use style::{ColorError, Rgb, Rgba};
pub use surface::Surface;
