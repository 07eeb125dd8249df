//! Implementation of the live run command.
//!
//! Mounts the landing page on the real clock and keeps the hero autoplay going
//! until a shutdown signal arrives. Between timer deadlines the loop blocks on
//! the signal channel, so reloads and shutdowns are handled promptly.

use anyhow::Result;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use super::LoadedConfig;
use crate::animation::LogAnimator;
use crate::config::ConfigWatcher;
use crate::constants::RUN_POLL_INTERVAL_MS;
use crate::page::{LandingPage, PageChange, PageEvent};
use crate::scheduler::{EventLoop, Scheduler};
use crate::signals::{SignalMessage, SignalState, setup_signal_handler};
use crate::time_source::RealTimeSource;

/// Run the landing page until interrupted.
pub fn handle_run_command(loaded: LoadedConfig, debug_enabled: bool) -> Result<()> {
    log_version!();
    loaded.log();

    let signal_state = setup_signal_handler(debug_enabled)?;
    if let Some(path) = &loaded.source {
        ConfigWatcher::new(
            path.clone(),
            signal_state.signal_sender.clone(),
            debug_enabled,
        )
        .start()?;
    }

    let (event_loop, page) =
        super::mount_page(&loaded, Arc::new(RealTimeSource::new()), Box::new(LogAnimator))?;
    log_block_start!("Hero autoplay started: {}", page.carousel().transition());
    log_indented!("Press Ctrl-C to stop");

    let mut runner = LiveRunner {
        event_loop,
        page,
        loaded,
        debug_enabled,
    };
    runner.main_loop(&signal_state)?;

    runner.page.unmount();
    log_block_start!(
        "Hero autoplay stopped on slide {}",
        runner.page.carousel().current_index() + 1
    );
    if debug_enabled {
        log_pipe!();
        log_debug!("Timers left after unmount: {}", runner.event_loop.pending());
    }
    log_end!();
    Ok(())
}

/// State owned by the live loop.
struct LiveRunner {
    event_loop: Rc<EventLoop>,
    page: LandingPage,
    loaded: LoadedConfig,
    debug_enabled: bool,
}

impl LiveRunner {
    fn main_loop(&mut self, signal_state: &SignalState) -> Result<()> {
        let poll = Duration::from_millis(RUN_POLL_INTERVAL_MS);

        while signal_state.is_running() {
            while let Some(event) = self.event_loop.pop_due() {
                if self.page.handle(PageEvent::Timer(event))? == PageChange::Hero {
                    log_decorated!("{}", self.page.carousel().transition());
                }
            }

            // Sleep until the next timer, waking early for signals
            let now = self.event_loop.now();
            let timeout = self
                .event_loop
                .next_deadline()
                .map_or(poll, |due| due.saturating_sub(now).min(poll));

            match signal_state.signal_receiver.recv_timeout(timeout) {
                Ok(SignalMessage::Shutdown) => break,
                Ok(SignalMessage::Reload) => self.reload(),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok(())
    }

    /// Apply a changed configuration. An invalid file keeps the current page.
    fn reload(&mut self) {
        log_block_start!("Reloading configuration");
        let reloaded = match self.loaded.reload() {
            Ok(reloaded) => reloaded,
            Err(e) => {
                log_warning!("Keeping current configuration: {:#}", e);
                return;
            }
        };
        if reloaded.config == self.loaded.config {
            log_indented!("No changes");
            return;
        }
        reloaded.log();

        if reloaded.config.timing() != self.page.timing() {
            // Timing is fixed for the life of a carousel, so remount
            self.page.unmount();
            let scheduler: Rc<dyn Scheduler> = self.event_loop.clone();
            let mut page = LandingPage::new(
                reloaded.config.content(),
                reloaded.config.timing(),
                scheduler,
                Box::new(LogAnimator),
            );
            if let Err(e) = page.mount() {
                log_warning!("Keeping current configuration: {}", e);
                if let Err(e) = self.page.mount() {
                    log_error!("Failed to restart the hero carousel: {}", e);
                }
                return;
            }
            self.page = page;
        } else if let Err(e) = self.page.apply_content(reloaded.config.content()) {
            log_warning!("Keeping current configuration: {}", e);
            return;
        }

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Hero after reload: {}", self.page.carousel().transition());
        }
        self.loaded = reloaded;
    }
}

/// Display detailed help for the run command.
pub fn display_help() {
    log_version!();
    log_block_start!("run - Run the landing page on the real clock");
    log_block_start!("Usage: hospital-landing [--debug] [--config <path>] [run]");
    log_block_start!("Behavior:");
    log_indented!("Cross-fades the hero slides at the configured interval");
    log_indented!("Reloads the configuration when the file changes or on SIGUSR2");
    log_indented!("Stops on Ctrl-C, SIGTERM or SIGHUP");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NoopAnimator;
    use crate::carousel::Timing;
    use crate::logger::Log;
    use crate::time_source::VirtualClock;
    use serial_test::serial;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const INITIAL_CONFIG: &str = "interval_ms = 4000\nfade_ms = 800\nbrand = \"Harbor\"";

    fn runner_for(path: &Path) -> LiveRunner {
        let loaded = LoadedConfig::from_path(path.to_path_buf(), true).unwrap();
        let (event_loop, page) = super::super::mount_page(
            &loaded,
            Arc::new(VirtualClock::new()),
            Box::new(NoopAnimator),
        )
        .unwrap();
        LiveRunner {
            event_loop,
            page,
            loaded,
            debug_enabled: false,
        }
    }

    fn run_until(runner: &mut LiveRunner, ms: u64) {
        let event_loop = runner.event_loop.clone();
        let page = &mut runner.page;
        event_loop.run_until(Duration::from_millis(ms), |event| {
            page.handle(PageEvent::Timer(event)).unwrap();
        });
    }

    #[test]
    #[serial]
    fn test_reload_with_new_timing_remounts() {
        Log::set_enabled(false);
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, INITIAL_CONFIG).unwrap();
        let mut runner = runner_for(&path);
        run_until(&mut runner, 5000);

        fs::write(&path, "interval_ms = 3000\nfade_ms = 500").unwrap();
        runner.reload();
        Log::set_enabled(true);

        assert_eq!(runner.page.timing(), Timing::from_millis(3000, 500));
        assert!(runner.page.is_mounted());
        assert_eq!(runner.page.carousel().current_index(), 0);
        assert_eq!(runner.event_loop.pending(), 1);
        assert_eq!(runner.loaded.config.interval_ms, Some(3000));
    }

    #[test]
    #[serial]
    fn test_reload_with_same_timing_swaps_content() {
        Log::set_enabled(false);
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, INITIAL_CONFIG).unwrap();
        let mut runner = runner_for(&path);
        run_until(&mut runner, 4500);

        fs::write(&path, "interval_ms = 4000\nfade_ms = 800\nbrand = \"Lakeside\"").unwrap();
        runner.reload();
        Log::set_enabled(true);

        assert_eq!(runner.page.content().brand, "Lakeside");
        assert_eq!(runner.page.carousel().current_index(), 1);
    }

    #[test]
    #[serial]
    fn test_invalid_reload_keeps_current_page() {
        Log::set_enabled(false);
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, INITIAL_CONFIG).unwrap();
        let mut runner = runner_for(&path);
        run_until(&mut runner, 5000);

        fs::write(&path, "interval_ms = 1000\nfade_ms = 2000").unwrap();
        runner.reload();
        Log::set_enabled(true);

        assert_eq!(runner.page.timing(), Timing::from_millis(4000, 800));
        assert_eq!(runner.page.content().brand, "Harbor");
        assert_eq!(runner.page.carousel().current_index(), 1);
        assert!(runner.page.is_mounted());
        assert_eq!(runner.loaded.config.interval_ms, Some(4000));
    }

    #[test]
    #[serial]
    fn test_deleted_explicit_file_keeps_current_configuration() {
        Log::set_enabled(false);
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("landing.toml");
        fs::write(&path, INITIAL_CONFIG).unwrap();
        let mut runner = runner_for(&path);

        fs::remove_file(&path).unwrap();
        runner.reload();
        Log::set_enabled(true);

        assert_eq!(runner.page.content().brand, "Harbor");
        assert_eq!(runner.page.timing(), Timing::from_millis(4000, 800));
        assert_eq!(runner.loaded.source.as_deref(), Some(path.as_path()));
    }
}
