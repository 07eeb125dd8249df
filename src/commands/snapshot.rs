//! Implementation of the snapshot command.
//!
//! Mounts the page on a virtual clock, lets `at_ms` of simulated time pass and
//! prints what a renderer would paint at that moment as JSON.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::LoadedConfig;
use crate::animation::NoopAnimator;
use crate::page::{PageEvent, PageSnapshot};
use crate::time_source::VirtualClock;

/// Page snapshot after `at_ms` of simulated autoplay.
pub fn take_snapshot(loaded: &LoadedConfig, at_ms: u64) -> Result<PageSnapshot> {
    let clock = Arc::new(VirtualClock::new());
    let (event_loop, mut page) = super::mount_page(loaded, clock, Box::new(NoopAnimator))?;

    while let Some(event) = event_loop.wait_next(Duration::from_millis(at_ms)) {
        page.handle(PageEvent::Timer(event))?;
    }

    let snapshot = page.snapshot();
    page.unmount();
    Ok(snapshot)
}

/// Run the snapshot command, writing pretty JSON to stdout.
pub fn handle_snapshot_command(loaded: &LoadedConfig, at_ms: u64) -> Result<()> {
    let snapshot = take_snapshot(loaded, at_ms)?;
    let json =
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize page snapshot")?;
    println!("{json}");
    Ok(())
}

/// Display detailed help for the snapshot command.
pub fn display_help() {
    log_version!();
    log_block_start!("snapshot - Print the page state at a simulated time");
    log_block_start!("Usage: hospital-landing snapshot [--at <ms>]");
    log_block_start!("Options:");
    log_indented!("--at <ms>  Simulated time of the snapshot (default 0)");
    log_block_start!("Output:");
    log_indented!("JSON with the header, the hero carousel view, the sections");
    log_indented!("with their reveal delays, and the footer");
    log_block_start!("Examples:");
    log_indented!("# Halfway through the first cross-fade");
    log_indented!("hospital-landing snapshot --at 5600");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::TransitionState;

    #[test]
    fn test_snapshot_mid_fade() {
        let snapshot = take_snapshot(&LoadedConfig::default(), 5_600).unwrap();

        assert_eq!(snapshot.at_ms, 5_600);
        assert_eq!(snapshot.hero.view.current_index, 1);
        assert_eq!(
            snapshot.hero.view.transition,
            TransitionState::Transitioning {
                from: 0,
                to: 1,
                elapsed: Duration::from_millis(600),
            }
        );
        assert!(snapshot.hero.exiting_slide.is_some());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = take_snapshot(&LoadedConfig::default(), 0).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["hero"]["current_index"], 0);
        assert_eq!(value["hero"]["transition"]["state"], "idle");
        assert_eq!(value["header"]["menu_open"], false);
        assert_eq!(value["doctors"][3]["reveal_delay_ms"], 300);
    }
}
