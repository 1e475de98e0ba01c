// WGF
// copyright zipxing@hotmail.com 2022～2025

//! # Render adapter module
//!
//! The adapter is the only part of the framework that talks to an output
//! device. It receives the finished screen surface once per frame and turns
//! device input into unified [`Event`]s.
//!
//! ## Supported backends
//! - **Crossterm**: terminal rendering, two pixels per character cell using
//!   half-block glyphs (feature `term`, default)
//! - **Headless**: no output, replays scripted input and keeps the presented
//!   frames in memory; used by tests and the `headless` feature
//!
//! The `hidden` window mode is handled by the crossterm adapter itself,
//! which then leaves the terminal alone.

use crate::{config::Settings, event::Event, render::surface::Surface};
use log::debug;
use std::{any::Any, collections::VecDeque, time::Duration};

/// Crossterm adapter module - terminal rendering backend
#[cfg(cross_backend)]
pub mod cross;

pub trait Adapter {
    /// Open the output with the size and modes of `settings`. Called again
    /// when the window is reconfigured.
    fn init(&mut self, title: &str, settings: &Settings) -> Result<(), String>;

    /// Poll input events
    ///
    /// Waits at most `timeout` for input and appends converted events to
    /// `es`. Returns true if the device asked the game to exit.
    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool;

    /// Show one finished frame
    fn present(&mut self, screen: &Surface) -> Result<(), String>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), String>;

    fn set_icon(&mut self, icon: &Surface) -> Result<(), String> {
        debug!("Icon {:?} ignored by this adapter", icon.size());
        Ok(())
    }

    /// Give the device back, called once on exit
    fn reset(&mut self);

    fn as_any(&mut self) -> &mut dyn Any;
}

/// helping method to convert error msg
pub fn to_error<E: std::fmt::Display>(error: Result<(), E>) -> Result<(), String> {
    error.map_err(|e| e.to_string())
}

/// Adapter with no output device
#[derive(Debug, Default)]
pub struct HeadlessAdapter {
    pub title: String,
    pub settings: Settings,
    /// how many times init was called
    pub inits: usize,
    pub presented: usize,
    pub last_frame: Option<Surface>,
    pub cursor_visible: bool,
    pub icon: Option<Surface>,
    pub was_reset: bool,
    script: VecDeque<Vec<Event>>,
    sleep: bool,
}

impl HeadlessAdapter {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Self::default()
        }
    }

    /// Every poll hands out the next batch of events
    pub fn with_script(script: Vec<Vec<Event>>) -> Self {
        Self {
            script: script.into(),
            ..Self::new()
        }
    }

    /// Sleep out the poll timeout when there is no scripted input,
    /// so a running loop doesn't spin
    pub fn sleeping(mut self, sleep: bool) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn push_events(&mut self, events: Vec<Event>) {
        self.script.push_back(events);
    }

    pub fn pending(&self) -> usize {
        self.script.len()
    }
}

impl Adapter for HeadlessAdapter {
    fn init(&mut self, title: &str, settings: &Settings) -> Result<(), String> {
        self.title = title.to_string();
        self.settings = settings.clone();
        self.inits += 1;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool {
        match self.script.pop_front() {
            Some(batch) => {
                let quit = batch.contains(&Event::Quit);
                es.extend(batch);
                quit
            }
            None => {
                if self.sleep {
                    std::thread::sleep(timeout);
                }
                false
            }
        }
    }

    fn present(&mut self, screen: &Surface) -> Result<(), String> {
        self.presented += 1;
        self.last_frame = Some(screen.clone());
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), String> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_icon(&mut self, icon: &Surface) -> Result<(), String> {
        self.icon = Some(icon.clone());
        Ok(())
    }

    fn reset(&mut self) {
        self.was_reset = true;
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}
