// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Log module provides the log initialisation, reference
//! https://docs.rs/log4rs
//!
//! With a file path all records go to that file, otherwise they are written
//! to stderr so they don't garble a terminal backend drawing on stdout.

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::error::Error;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system
pub fn init_log(level: LevelFilter, file_path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let encoder = Box::new(PatternEncoder::new(LOG_PATTERN));
    let appender: Box<dyn log4rs::append::Append> = match file_path {
        Some(fp) => Box::new(FileAppender::builder().encoder(encoder).build(fp)?),
        None => Box::new(
            ConsoleAppender::builder()
                .encoder(encoder)
                .target(Target::Stderr)
                .build(),
        ),
    };
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("wgf", appender),
        )
        .build(Root::builder().appender("wgf").build(level))?;
    let _handle = log4rs::init_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wgf.log");
        let path_str = path.to_str().unwrap();
        init_log(LevelFilter::Info, Some(path_str)).unwrap();
        log::info!("hello log");
        log::debug!("filtered out");
        log::logger().flush();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("hello log"));
        assert!(!content.contains("filtered out"));
        // a second logger can't be installed
        assert!(init_log(LevelFilter::Info, None).is_err());
    }
}
