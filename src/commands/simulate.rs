//! Implementation of the simulate command.
//!
//! Runs the landing page against a virtual clock that jumps straight to each
//! timer deadline, so a minute of autoplay completes instantly. Every hero
//! and menu change is logged with its simulated timestamp.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use super::LoadedConfig;
use crate::animation::{Animator, LogAnimator, NoopAnimator};
use crate::carousel::{CarouselView, TransitionState};
use crate::logger::Log;
use crate::page::{LandingPage, PageChange, PageEvent};
use crate::scheduler::EventLoop;
use crate::time_source::{TimeSource, VirtualClock};

/// Outcome of a finished simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    /// Autoplay ticks delivered
    pub ticks: usize,
    /// Cross-fades that ran to completion
    pub fades_completed: usize,
    pub final_view: CarouselView,
    pub menu_open: bool,
}

/// Clears the logger's simulation clock when the simulation ends, however it ends.
struct SimulationClockGuard;

impl SimulationClockGuard {
    fn install(clock: Arc<dyn TimeSource>) -> Self {
        Log::set_simulation_clock(clock);
        Self
    }
}

impl Drop for SimulationClockGuard {
    fn drop(&mut self) {
        Log::clear_simulation_clock();
    }
}

/// Run the simulate command.
///
/// # Arguments
/// * `duration_ms` - Simulated time to run for
/// * `toggle_at_ms` - Sorted simulated times at which the menu button is pressed
/// * `debug_enabled` - Also log every animation request
pub fn handle_simulate_command(
    loaded: &LoadedConfig,
    duration_ms: u64,
    toggle_at_ms: &[u64],
    debug_enabled: bool,
) -> Result<SimulationSummary> {
    log_version!();
    loaded.log();
    log_block_start!("Simulating {}ms of landing page time", duration_ms);

    let clock = Arc::new(VirtualClock::new());
    let _clock_guard = SimulationClockGuard::install(clock.clone());

    let animator: Box<dyn Animator> = if debug_enabled {
        Box::new(LogAnimator)
    } else {
        Box::new(NoopAnimator)
    };
    let (event_loop, mut page) = super::mount_page(loaded, clock, animator)?;
    log_block_start!("Mounted: {}", page.carousel().transition());

    let mut summary = SimulationSummary {
        ticks: 0,
        fades_completed: 0,
        final_view: page.carousel().view(),
        menu_open: false,
    };

    let end = Duration::from_millis(duration_ms);
    for toggle_ms in toggle_at_ms.iter().copied().filter(|ms| *ms <= duration_ms) {
        run_timers_until(&event_loop, &mut page, Duration::from_millis(toggle_ms), &mut summary)?;
        page.handle(PageEvent::ToggleMenu)?;
        log_menu(&page);
    }
    run_timers_until(&event_loop, &mut page, end, &mut summary)?;

    summary.final_view = page.carousel().view();
    summary.menu_open = page.nav().is_open();
    page.unmount();

    log_block_start!("Simulation complete");
    log_indented!("Autoplay ticks: {}", summary.ticks);
    log_indented!("Completed cross-fades: {}", summary.fades_completed);
    log_indented!("Final state: {}", summary.final_view.transition);
    if debug_enabled {
        log_pipe!();
        log_debug!("Timers left after unmount: {}", event_loop.pending());
    }
    log_end!();

    Ok(summary)
}

/// Deliver every timer due up to `until`, logging the hero changes.
fn run_timers_until(
    event_loop: &EventLoop,
    page: &mut LandingPage,
    until: Duration,
    summary: &mut SimulationSummary,
) -> Result<()> {
    while let Some(event) = event_loop.wait_next(until) {
        let before = page.carousel().transition();
        if page.handle(PageEvent::Timer(event))? != PageChange::Hero {
            continue;
        }

        let after = page.carousel().transition();
        match (&before, &after) {
            // Fades only complete from a running transition; anything else is a tick
            (TransitionState::Transitioning { .. }, TransitionState::Idle { .. }) => {
                summary.fades_completed += 1;
                log_decorated!("Settled: {}", after);
            }
            (_, TransitionState::Transitioning { from, to, .. }) => {
                summary.ticks += 1;
                log_decorated!("Tick: cross-fading slide {} → {}", from + 1, to + 1);
                if let Some(slide) = page.carousel().current_slide() {
                    log_indented!("\"{}\"", slide.caption);
                }
            }
            _ => {
                summary.ticks += 1;
                log_decorated!("Tick: {}", after);
            }
        }
    }
    Ok(())
}

fn log_menu(page: &LandingPage) {
    if page.nav().is_open() {
        log_decorated!("Menu opened {}", page.nav().glyph());
        let labels: Vec<&str> = page
            .content()
            .nav_items
            .iter()
            .map(|item| item.label.as_str())
            .collect();
        log_indented!("{}", labels.join(" · "));
    } else {
        log_decorated!("Menu closed {}", page.nav().glyph());
    }
}

/// Display detailed help for the simulate command.
pub fn display_help() {
    log_version!();
    log_block_start!("simulate - Run the landing page on a virtual clock");
    log_block_start!("Usage: hospital-landing simulate [--for <ms>] [--toggle-at <ms>]...");
    log_block_start!("Options:");
    log_indented!("--for <ms>        Simulated time to run for (default 15000)");
    log_indented!("--toggle-at <ms>  Press the menu button at this time, repeatable");
    log_block_start!("Examples:");
    log_indented!("# Three full autoplay cycles");
    log_indented!("hospital-landing simulate --for 15000");
    log_pipe!();
    log_indented!("# Open the menu at 2s and close it at 4s");
    log_indented!("hospital-landing simulate --toggle-at 2000 --toggle-at 4000");
    log_end!();
}
