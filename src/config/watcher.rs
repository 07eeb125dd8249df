//! File watching for hot config reloading.
//!
//! Watches the directory that holds the configuration file and asks the main
//! loop to reload whenever the file is written, created or removed. Editors
//! often replace files in several steps, so bursts of events are debounced.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::CONFIG_DEBOUNCE_MS;
use crate::signals::SignalMessage;

/// Configuration file watcher that triggers reloads.
pub struct ConfigWatcher {
    config_path: PathBuf,
    signal_sender: Sender<SignalMessage>,
    debug_enabled: bool,
}

impl ConfigWatcher {
    pub fn new(
        config_path: PathBuf,
        signal_sender: Sender<SignalMessage>,
        debug_enabled: bool,
    ) -> Self {
        Self {
            config_path,
            signal_sender,
            debug_enabled,
        }
    }

    /// Start watching in a background thread.
    ///
    /// Does nothing if the directory holding the config file does not exist.
    pub fn start(self) -> Result<()> {
        let Some(watch_dir) = self.config_path.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        if !watch_dir.is_dir() {
            if self.debug_enabled {
                log_pipe!();
                log_debug!("No configuration directory to watch for hot reload");
            }
            return Ok(());
        }

        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    )
                {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_dir.display()))?;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Watching configuration for hot reload:");
            log_indented!("{}", self.config_path.display());
        }

        let config_path = self.config_path;
        let signal_sender = self.signal_sender;
        let debounce = Duration::from_millis(CONFIG_DEBOUNCE_MS);

        thread::spawn(move || {
            // The watcher stops when dropped, so it lives in this thread
            let _watcher = watcher;
            let mut last_reload: Option<Instant> = None;

            for event in &rx {
                if !affects_config(&event, &config_path) {
                    continue;
                }
                if last_reload.is_some_and(|at| at.elapsed() < debounce) {
                    continue;
                }

                // Let the editor finish writing
                thread::sleep(debounce);
                while rx.try_recv().is_ok() {}

                last_reload = Some(Instant::now());
                if signal_sender.send(SignalMessage::Reload).is_err() {
                    break;
                }
            }
        });

        Ok(())
    }
}

/// Whether a filesystem event touches the configuration file.
///
/// Editors that save through a temporary sibling (`landing.toml~`,
/// `landing.toml.swp`) count as touching it too.
pub fn affects_config(event: &Event, config_path: &Path) -> bool {
    let Some(config_name) = config_path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    event.paths.iter().any(|path| {
        path.parent() == config_path.parent()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with(config_name))
    })
}
