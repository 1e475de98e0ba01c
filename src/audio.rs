// WGF
// copyright zipxing@hotmail.com 2022～2025

//! audio provides playing sound effects loaded by the asset loader, reference
//! https://docs.rs/rodio
//!
//! A Sound keeps the encoded file in memory and decodes it on every play,
//! playback runs on its own thread and is fire-and-forget.

#[cfg(audio_support)]
use rodio::{Decoder, OutputStreamBuilder, Source};
use std::{fs, io, path::Path, sync::Arc};
#[cfg(audio_support)]
use std::{io::Cursor, thread, time::Duration};

#[derive(Clone)]
pub struct Sound {
    pub name: String,
    pub volume: f32,
    data: Arc<[u8]>,
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Sound {
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            volume: 1.0,
            data: data.into(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(&name, fs::read(path)?))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// check the data can be decoded, always ok without audio support
    pub fn validate(&self) -> Result<(), String> {
        #[cfg(audio_support)]
        {
            Decoder::new(Cursor::new(self.data.clone()))
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        #[cfg(not(audio_support))]
        {
            Ok(())
        }
    }

    #[cfg(audio_support)]
    pub fn play(&self) {
        let data = self.data.clone();
        let name = self.name.clone();
        let volume = self.volume;
        log::debug!("play sound {}", name);
        thread::spawn(move || match OutputStreamBuilder::open_default_stream() {
            Ok(stream_handle) => match Decoder::new(Cursor::new(data)) {
                Ok(source) => {
                    let length = source
                        .total_duration()
                        .unwrap_or(Duration::from_secs(10));
                    stream_handle.mixer().add(source.amplify(volume));
                    // the stream stops when its handle is dropped
                    thread::sleep(length + Duration::from_millis(100));
                }
                Err(e) => log::warn!("Failed to decode sound '{}': {}", name, e),
            },
            Err(e) => log::warn!("Failed to open audio stream: {}", e),
        });
    }

    #[cfg(not(audio_support))]
    pub fn play(&self) {
        log::info!("Audio playback not supported on this build: {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("damage.wav");
        fs::write(&path, [1u8, 2, 3]).unwrap();
        let s = Sound::load(&path).unwrap();
        assert_eq!(s.name, "damage");
        assert_eq!(s.len(), 3);
        assert!(Sound::load(dir.path().join("missing.wav")).is_err());
    }

    #[cfg(audio_support)]
    #[test]
    fn garbage_is_rejected() {
        let s = Sound::from_bytes("noise", vec![0u8; 16]);
        assert!(s.validate().is_err());
    }
}
