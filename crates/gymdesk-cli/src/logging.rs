use std::path::Path;

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::settings::Settings;

/// Initialize logging from the configured log4rs file, or log
/// to stderr at the configured level if there is none.
pub fn init(settings: &Settings) -> Result<()> {
    if let Some(path) = settings.log_config.as_deref() {
        if Path::new(path).exists() {
            log4rs::init_file(path, Default::default())?;
            log::debug!("logging configured from {}", path);
            return Ok(());
        }
    }

    let level = settings
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Warn);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;

    if let Some(path) = settings.log_config.as_deref() {
        log::warn!("log configuration {} not found, logging to stderr", path);
    }
    Ok(())
}
