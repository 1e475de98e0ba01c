// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Asset module provides the loader for images, sounds and fonts.
//!
//! Files are stored under their base name without extension, so
//! `assets/enemy.png` becomes `images["enemy"]`. Single item getters
//! propagate errors, directory loaders log and skip files that fail and
//! only give up when the directory itself can't be read.

use crate::{
    audio::Sound,
    render::{
        font::Font,
        spritesheet::{self, SpritesheetError},
        style::Rgb,
        surface::Surface,
    },
    util::Size,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt, fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

#[derive(Debug)]
pub enum AssetError {
    Io(io::Error),
    Image(image::ImageError),
    Font(String),
    Sound(String),
    Spritesheet(SpritesheetError),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(e) => write!(f, "IO error: {}", e),
            AssetError::Image(e) => write!(f, "Image error: {}", e),
            AssetError::Font(s) => write!(f, "Font error: {}", s),
            AssetError::Sound(s) => write!(f, "Sound error: {}", s),
            AssetError::Spritesheet(e) => write!(f, "Spritesheet error: {}", e),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<io::Error> for AssetError {
    fn from(e: io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::Image(e)
    }
}

impl From<SpritesheetError> for AssetError {
    fn from(e: SpritesheetError) -> Self {
        AssetError::Spritesheet(e)
    }
}

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Where assets live and what to look for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub assets_directory: PathBuf,
    /// falls back to `assets_directory`
    pub images_directory: Option<PathBuf>,
    pub sounds_directory: Option<PathBuf>,
    pub fonts_directory: Option<PathBuf>,
    pub image_extensions: Vec<String>,
    pub sound_extensions: Vec<String>,
    pub font_extensions: Vec<String>,
    pub font_size: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            assets_directory: PathBuf::from("assets"),
            images_directory: None,
            sounds_directory: None,
            fonts_directory: None,
            image_extensions: exts(&["png", "jpg", "jpeg", "bmp"]),
            sound_extensions: exts(&["wav", "ogg", "mp3", "flac"]),
            font_extensions: exts(&["ttf", "otf"]),
            font_size: 10,
        }
    }
}

impl AssetsConfig {
    pub fn with_directory<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            assets_directory: dir.into(),
            ..Self::default()
        }
    }

    pub fn images_dir(&self) -> &Path {
        self.images_directory
            .as_deref()
            .unwrap_or(&self.assets_directory)
    }

    pub fn sounds_dir(&self) -> &Path {
        self.sounds_directory
            .as_deref()
            .unwrap_or(&self.assets_directory)
    }

    pub fn fonts_dir(&self) -> &Path {
        self.fonts_directory
            .as_deref()
            .unwrap_or(&self.assets_directory)
    }
}

/// Directory scanning options. Empty `extensions` means the loader's
/// default list for the asset kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub include_subdirs: bool,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    /// pixels of this color become transparent
    pub colorkey: Option<Rgb>,
    pub has_alpha: bool,
    pub scale: Option<u32>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            colorkey: None,
            has_alpha: true,
            scale: None,
        }
    }
}

fn normalize_ext(e: &str, case_insensitive: bool) -> String {
    let e = e.trim_start_matches('.');
    if case_insensitive {
        e.to_lowercase()
    } else {
        e.to_string()
    }
}

/// Fetch sorted list of files from provided directory
pub fn get_files<P: AsRef<Path>>(path: P, opts: &ScanOptions) -> io::Result<Vec<PathBuf>> {
    let path = path.as_ref();
    debug!("Attempting to parse directory {}", path.display());
    let wanted: Vec<String> = opts
        .extensions
        .iter()
        .map(|e| normalize_ext(e, opts.case_insensitive))
        .collect();

    let mut files = vec![];
    for entry in fs::read_dir(path)? {
        let itempath = entry?.path();
        if itempath.is_dir() {
            if opts.include_subdirs {
                files.extend(get_files(&itempath, opts)?);
            }
            continue;
        }
        if wanted.is_empty() {
            files.push(itempath);
            continue;
        }
        let ext = itempath
            .extension()
            .map(|e| normalize_ext(&e.to_string_lossy(), opts.case_insensitive));
        if let Some(ext) = ext {
            if wanted.contains(&ext) {
                files.push(itempath);
            }
        }
    }
    files.sort();
    debug!("Fetched {} files from {}", files.len(), path.display());
    Ok(files)
}

/// Turn filename into storage name
pub fn storage_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Process provided files with provided loader, failures are skipped
pub fn get_from_files<T, F>(files: &[PathBuf], loader: F) -> HashMap<String, T>
where
    F: Fn(&Path) -> Result<T, AssetError>,
{
    let mut data = HashMap::new();
    for f in files {
        match loader(f) {
            Ok(item) => {
                data.insert(storage_name(f), item);
            }
            Err(e) => warn!("Unable to load {}: {}", f.display(), e),
        }
    }
    data
}

#[derive(Debug, Default)]
pub struct AssetsLoader {
    pub config: AssetsConfig,
    pub images: HashMap<String, Rc<Surface>>,
    pub sounds: HashMap<String, Sound>,
    pub fonts: HashMap<String, Font>,
}

impl AssetsLoader {
    pub fn new(config: AssetsConfig) -> Self {
        debug!("Initializing assets loader");
        Self {
            config,
            ..Self::default()
        }
    }

    fn scan(&self, dir: &Path, defaults: &[String], opts: &ScanOptions) -> io::Result<Vec<PathBuf>> {
        let mut opts = opts.clone();
        if opts.extensions.is_empty() {
            opts.extensions = defaults.to_vec();
        }
        get_files(dir, &opts)
    }

    pub fn get_image<P: AsRef<Path>>(&self, path: P, opts: &ImageOptions) -> Result<Surface, AssetError> {
        let mut img = Surface::load(path)?;
        if let Some(scale) = opts.scale {
            img = img.scaled(scale);
        }
        if !opts.has_alpha {
            img.make_opaque();
        }
        if let Some(key) = opts.colorkey {
            img.set_colorkey(key);
        }
        Ok(img)
    }

    pub fn load_image<P: AsRef<Path>>(&mut self, path: P, opts: &ImageOptions) -> Result<(), AssetError> {
        let path = path.as_ref();
        let img = self.get_image(path, opts)?;
        self.images.insert(storage_name(path), Rc::new(img));
        Ok(())
    }

    pub fn get_images(
        &self,
        path: Option<&Path>,
        img: &ImageOptions,
        scan: &ScanOptions,
    ) -> Result<HashMap<String, Surface>, AssetError> {
        let dir = path.unwrap_or(self.config.images_dir());
        let files = self.scan(dir, &self.config.image_extensions, scan)?;
        Ok(get_from_files(&files, |f| self.get_image(f, img)))
    }

    pub fn load_images(
        &mut self,
        path: Option<&Path>,
        img: &ImageOptions,
        scan: &ScanOptions,
    ) -> Result<(), AssetError> {
        let images = self.get_images(path, img, scan)?;
        self.images
            .extend(images.into_iter().map(|(k, v)| (k, Rc::new(v))));
        Ok(())
    }

    /// Load a sheet and cut it into tiles
    pub fn get_spritesheet<P: AsRef<Path>>(
        &self,
        path: P,
        tile: Size,
        opts: &ImageOptions,
    ) -> Result<Vec<Surface>, AssetError> {
        let sheet = self.get_image(path, opts)?;
        Ok(spritesheet::slice(&sheet, tile)?)
    }

    pub fn get_sound<P: AsRef<Path>>(&self, path: P) -> Result<Sound, AssetError> {
        let sound = Sound::load(path)?;
        sound.validate().map_err(AssetError::Sound)?;
        Ok(sound)
    }

    pub fn load_sound<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AssetError> {
        let path = path.as_ref();
        let s = self.get_sound(path)?;
        self.sounds.insert(storage_name(path), s);
        Ok(())
    }

    pub fn get_sounds(&self, path: Option<&Path>, scan: &ScanOptions) -> Result<HashMap<String, Sound>, AssetError> {
        let dir = path.unwrap_or(self.config.sounds_dir());
        let files = self.scan(dir, &self.config.sound_extensions, scan)?;
        Ok(get_from_files(&files, |f| self.get_sound(f)))
    }

    pub fn load_sounds(&mut self, path: Option<&Path>, scan: &ScanOptions) -> Result<(), AssetError> {
        let sounds = self.get_sounds(path, scan)?;
        self.sounds.extend(sounds);
        Ok(())
    }

    /// `size` of None uses the configured default
    pub fn get_font<P: AsRef<Path>>(&self, path: P, size: Option<u32>) -> Result<Font, AssetError> {
        Font::load(path, size.unwrap_or(self.config.font_size)).map_err(AssetError::Font)
    }

    pub fn load_font<P: AsRef<Path>>(&mut self, path: P, size: Option<u32>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let f = self.get_font(path, size)?;
        self.fonts.insert(storage_name(path), f);
        Ok(())
    }

    pub fn get_fonts(
        &self,
        path: Option<&Path>,
        size: Option<u32>,
        scan: &ScanOptions,
    ) -> Result<HashMap<String, Font>, AssetError> {
        let dir = path.unwrap_or(self.config.fonts_dir());
        let files = self.scan(dir, &self.config.font_extensions, scan)?;
        Ok(get_from_files(&files, |f| self.get_font(f, size)))
    }

    pub fn load_fonts(&mut self, path: Option<&Path>, size: Option<u32>, scan: &ScanOptions) -> Result<(), AssetError> {
        let fonts = self.get_fonts(path, size, scan)?;
        self.fonts.extend(fonts);
        Ok(())
    }

    /// Load all valid media from configured paths into relevant storages
    pub fn load_all(&mut self) {
        let scan = ScanOptions::default();
        if let Err(e) = self.load_images(None, &ImageOptions::default(), &scan) {
            warn!("Unable to load images: {}", e);
        }
        if let Err(e) = self.load_sounds(None, &scan) {
            warn!("Unable to load sounds: {}", e);
        }
        if let Err(e) = self.load_fonts(None, None, &scan) {
            warn!("Unable to load fonts: {}", e);
        }
        info!(
            "Assets loaded: {} images, {} sounds, {} fonts",
            self.images.len(),
            self.sounds.len(),
            self.fonts.len()
        );
    }

    /// Clean all local storages
    pub fn clean_all(&mut self) {
        self.images.clear();
        self.sounds.clear();
        self.fonts.clear();
    }

    pub fn image(&self, name: &str) -> Option<Rc<Surface>> {
        self.images.get(name).cloned()
    }

    pub fn sound(&self, name: &str) -> Option<&Sound> {
        self.sounds.get(name)
    }

    pub fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }
}
