//! Command-line command handlers.
//!
//! Each command lives in its own submodule. The helpers here load the
//! configuration once and assemble a [`LandingPage`] on a given event loop.

pub mod check;
pub mod help;
pub mod run;
pub mod simulate;
pub mod snapshot;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use crate::animation::Animator;
use crate::config::{self, Config};
use crate::page::LandingPage;
use crate::scheduler::{EventLoop, Scheduler};
use crate::time_source::TimeSource;

/// Configuration together with the file it was read from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when the built-in defaults are in use
    pub source: Option<PathBuf>,
    /// File consulted on reload, present or not
    pub path: Option<PathBuf>,
    /// Whether `path` came from `--config`, so a missing file is an error
    pub explicit: bool,
}

impl LoadedConfig {
    /// Register the `--config` path and load the configuration it points to.
    pub fn load(config_path: Option<String>) -> Result<Self> {
        config::set_config_path(config_path)?;
        Self::from_path(config::get_config_path()?, config::is_explicit())
    }

    /// Load from `path`. Only an implicit path may be missing.
    pub fn from_path(path: PathBuf, explicit: bool) -> Result<Self> {
        let config = config::load_or_default(&path, explicit)?;
        let source = path.exists().then(|| path.clone());
        Ok(Self {
            config,
            source,
            path: Some(path),
            explicit,
        })
    }

    /// Reload from the same path after the file changed.
    pub fn reload(&self) -> Result<Self> {
        match &self.path {
            Some(path) => Self::from_path(path.clone(), self.explicit),
            None => Ok(Self::default()),
        }
    }

    pub fn log(&self) {
        self.config.log_config(self.source.as_deref());
    }
}

/// Event loop on `clock` plus a landing page wired to it.
pub fn build_page(
    loaded: &LoadedConfig,
    clock: Arc<dyn TimeSource>,
    animator: Box<dyn Animator>,
) -> (Rc<EventLoop>, LandingPage) {
    let event_loop = Rc::new(EventLoop::new(clock));
    let scheduler: Rc<dyn Scheduler> = event_loop.clone();
    let page = LandingPage::new(
        loaded.config.content(),
        loaded.config.timing(),
        scheduler,
        animator,
    );
    (event_loop, page)
}

/// Build and mount a page, turning a setup failure into a reportable error.
pub fn mount_page(
    loaded: &LoadedConfig,
    clock: Arc<dyn TimeSource>,
    animator: Box<dyn Animator>,
) -> Result<(Rc<EventLoop>, LandingPage)> {
    let (event_loop, mut page) = build_page(loaded, clock, animator);
    page.mount().context("Failed to start the hero carousel")?;
    Ok((event_loop, page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reload_picks_up_changes() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, "interval_ms = 4000").unwrap();

        let loaded = LoadedConfig::from_path(path.clone(), true).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));

        fs::write(&path, "interval_ms = 3000").unwrap();
        let reloaded = loaded.reload().unwrap();
        assert_eq!(reloaded.config.interval_ms, Some(3000));
        assert!(reloaded.explicit);
    }

    #[test]
    fn test_reload_missing_explicit_file_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, "brand = \"Harbor\"").unwrap();

        let loaded = LoadedConfig::from_path(path.clone(), true).unwrap();
        fs::remove_file(&path).unwrap();

        let err = loaded.reload().unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
    }

    #[test]
    fn test_reload_missing_default_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, "brand = \"Harbor\"").unwrap();

        let loaded = LoadedConfig::from_path(path.clone(), false).unwrap();
        fs::remove_file(&path).unwrap();

        let reloaded = loaded.reload().unwrap();
        assert_eq!(reloaded.config, Config::default());
        assert_eq!(reloaded.source, None);
        assert_eq!(reloaded.path, Some(path));
    }

    #[test]
    fn test_explicit_missing_file_fails_to_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(LoadedConfig::from_path(path, true).is_err());
    }
}
