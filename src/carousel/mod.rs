//! Hero carousel: autoplay timer and cross-fade sequencing.
//!
//! [`CarouselController`] cycles through an ordered, non-empty sequence of
//! slides on a fixed interval. Each index change starts a cross-fade that the
//! controller hands to an [`Animator`]; a one-shot timer marks the end of the
//! fade, at which point the carousel settles on the new slide.
//!
//! ## Lifecycle
//!
//! ```text
//!   new ──start()──▶ Idle(0) ──tick──▶ Transitioning(0→1) ──fade done──▶ Idle(1) ──tick──▶ …
//!                      ▲                                                              │
//!                      └───────────────────── stop() / drop ──────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - At most one autoplay timer and at most one fade timer exist per controller;
//!   both are [`TimerGuard`]s, so they are released on every exit path.
//! - The fade is strictly shorter than the interval, checked in [`CarouselController::start`],
//!   so a tick never lands while the previous cross-fade is still running.
//! - Events from a released timer are ignored. Once `stop()` returns, nothing
//!   can change the index or start a fade, even an event that was already dequeued.
//! - With a single slide a tick keeps index 0 and does not fade the slide onto itself.
//! - Replacing the slides with a sequence of a different length resets to
//!   `Idle(0)` and restarts the interval; the same length keeps index and phase.

mod transition;

#[cfg(test)]
mod tests;

pub use transition::{CarouselView, TransitionState};

use std::rc::Rc;
use std::time::Duration;

use crate::animation::{Animator, Opacity};
use crate::constants::{DEFAULT_FADE_MS, DEFAULT_INTERVAL_MS};
use crate::content::Slide;
use crate::error::ConfigurationError;
use crate::scheduler::{Scheduler, TimerEvent, TimerGuard, TimerKind};

/// Default autoplay interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(DEFAULT_INTERVAL_MS);

/// Default cross-fade duration
pub const DEFAULT_FADE: Duration = Duration::from_millis(DEFAULT_FADE_MS);

/// Autoplay interval and cross-fade duration of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub interval: Duration,
    pub fade: Duration,
}

impl Timing {
    pub fn from_millis(interval_ms: u64, fade_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            fade: Duration::from_millis(fade_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_timing(self.interval, self.fade)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            fade: DEFAULT_FADE,
        }
    }
}

/// Check that an interval and fade can drive a carousel without overlapping fades.
pub fn validate_timing(interval: Duration, fade: Duration) -> Result<(), ConfigurationError> {
    if interval.is_zero() {
        return Err(ConfigurationError::ZeroInterval);
    }
    if fade.is_zero() {
        return Err(ConfigurationError::ZeroFade);
    }
    if fade >= interval {
        return Err(ConfigurationError::OverlappingFade { interval, fade });
    }
    Ok(())
}

enum Phase {
    Idle,
    Transitioning {
        from: usize,
        to: usize,
        started_at: Duration,
        fade_timer: TimerGuard,
    },
}

/// Owner of the hero carousel's index and timers.
pub struct CarouselController {
    scheduler: Rc<dyn Scheduler>,
    animator: Box<dyn Animator>,
    fade: Duration,
    interval: Duration,
    slides: Vec<Slide>,
    current_index: usize,
    phase: Phase,
    autoplay: Option<TimerGuard>,
}

impl CarouselController {
    /// Create a stopped carousel using the default fade duration.
    pub fn new(scheduler: Rc<dyn Scheduler>, animator: Box<dyn Animator>) -> Self {
        Self {
            scheduler,
            animator,
            fade: DEFAULT_FADE,
            interval: DEFAULT_INTERVAL,
            slides: Vec::new(),
            current_index: 0,
            phase: Phase::Idle,
            autoplay: None,
        }
    }

    /// Use `fade` for every cross-fade. Takes effect at the next `start()`.
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Mount the carousel: show the first slide and begin autoplay.
    ///
    /// Fails without scheduling anything if `slides` is empty or the timing is
    /// unusable. Starting an already running carousel restarts it from slide 0.
    pub fn start(
        &mut self,
        slides: Vec<Slide>,
        interval: Duration,
    ) -> Result<(), ConfigurationError> {
        if slides.is_empty() {
            return Err(ConfigurationError::EmptySlides);
        }
        validate_timing(interval, self.fade)?;

        self.stop();
        self.slides = slides;
        self.interval = interval;
        self.show_first_slide();
        self.autoplay = Some(TimerGuard::acquire(
            &self.scheduler,
            TimerKind::Repeating(interval),
        ));
        Ok(())
    }

    /// Unmount: release the autoplay timer and any running fade.
    ///
    /// A fade in progress is completed instantly, so the carousel rests on the
    /// slide it was moving to. Safe to call at any time and more than once.
    pub fn stop(&mut self) {
        self.autoplay = None;
        self.settle_now();
    }

    pub fn is_running(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Route a fired timer event. Returns `true` if it belonged to this carousel.
    pub fn on_timer(&mut self, event: &TimerEvent) -> bool {
        if self.autoplay.as_ref().is_some_and(|timer| timer.owns(event)) {
            self.advance();
            return true;
        }

        let owns_fade = matches!(
            &self.phase,
            Phase::Transitioning { fade_timer, .. } if fade_timer.owns(event)
        );
        if owns_fade {
            // The fade timer has already fired; dropping the guard is just bookkeeping
            self.phase = Phase::Idle;
            return true;
        }

        false
    }

    /// Jump to slide `index` with a cross-fade. The autoplay cadence is unchanged.
    ///
    /// On a stopped carousel the jump is instant.
    pub fn reset(&mut self, index: usize) -> Result<(), ConfigurationError> {
        if index >= self.slides.len() {
            return Err(ConfigurationError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        if index == self.current_index {
            return Ok(());
        }

        if self.is_running() {
            self.begin_transition(index);
        } else {
            // Unmounted carousels never schedule anything, so jump without a fade
            let from = self.current_index;
            self.current_index = index;
            self.animator.set_opacity(from, Opacity::HIDDEN);
            self.animator.set_opacity(index, Opacity::VISIBLE);
        }
        Ok(())
    }

    /// Replace the slide sequence while mounted.
    ///
    /// A different slide count resets the carousel to the first slide and
    /// restarts the interval from zero. The same count only swaps content.
    pub fn set_slides(&mut self, slides: Vec<Slide>) -> Result<(), ConfigurationError> {
        if slides.is_empty() {
            return Err(ConfigurationError::EmptySlides);
        }
        if slides.len() == self.slides.len() {
            self.slides = slides;
            return Ok(());
        }

        let was_running = self.is_running();
        self.autoplay = None;
        self.settle_now();
        self.slides = slides;
        self.show_first_slide();
        if was_running {
            self.autoplay = Some(TimerGuard::acquire(
                &self.scheduler,
                TimerKind::Repeating(self.interval),
            ));
        }
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fade(&self) -> Duration {
        self.fade
    }

    pub fn transition(&self) -> TransitionState {
        match &self.phase {
            Phase::Idle => TransitionState::Idle {
                index: self.current_index,
            },
            Phase::Transitioning {
                from,
                to,
                started_at,
                ..
            } => TransitionState::Transitioning {
                from: *from,
                to: *to,
                elapsed: self
                    .scheduler
                    .now()
                    .saturating_sub(*started_at)
                    .min(self.fade),
            },
        }
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> CarouselView {
        CarouselView {
            current_index: self.current_index,
            slide_count: self.slides.len(),
            transition: self.transition(),
        }
    }

    fn advance(&mut self) {
        let count = self.slides.len();
        if count <= 1 {
            self.current_index = 0;
            return;
        }
        self.begin_transition((self.current_index + 1) % count);
    }

    fn begin_transition(&mut self, to: usize) {
        // A manual jump can land mid-fade; finish that fade first
        self.settle_now();

        let from = self.current_index;
        self.current_index = to;
        self.animator
            .fade(from, Opacity::VISIBLE, Opacity::HIDDEN, self.fade);
        self.animator
            .fade(to, Opacity::HIDDEN, Opacity::VISIBLE, self.fade);

        self.phase = Phase::Transitioning {
            from,
            to,
            started_at: self.scheduler.now(),
            fade_timer: TimerGuard::acquire(&self.scheduler, TimerKind::Once(self.fade)),
        };
    }

    /// Jump to slide 0 without a fade-in, hiding the slide shown before.
    fn show_first_slide(&mut self) {
        if self.current_index != 0 {
            self.animator.set_opacity(self.current_index, Opacity::HIDDEN);
        }
        self.current_index = 0;
        self.animator.set_opacity(0, Opacity::VISIBLE);
    }

    fn settle_now(&mut self) {
        if let Phase::Transitioning { from, to, .. } =
            std::mem::replace(&mut self.phase, Phase::Idle)
        {
            self.animator.set_opacity(from, Opacity::HIDDEN);
            self.animator.set_opacity(to, Opacity::VISIBLE);
        }
    }
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("current_index", &self.current_index)
            .field("slide_count", &self.slides.len())
            .field("transition", &self.transition())
            .field("running", &self.is_running())
            .finish()
    }
}
