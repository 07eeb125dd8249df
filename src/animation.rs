//! Boundary to the animation capability that actually renders fades.
//!
//! The carousel decides *when* a slide fades and between which opacities; the
//! [`Animator`] behind this trait does the interpolation. Nothing in this crate
//! computes intermediate opacity values.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Opacity of a rendered element, `0.0` (hidden) to `1.0` (fully visible).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Opacity(f32);

impl Opacity {
    pub const HIDDEN: Opacity = Opacity(0.0);
    pub const VISIBLE: Opacity = Opacity(1.0);

    /// Build an opacity, clamping into `[0, 1]`
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Capability that animates element opacity.
///
/// Slides are addressed by their index in the carousel's sequence.
#[cfg_attr(test, mockall::automock)]
pub trait Animator {
    /// Fade slide `slide` from `from` to `to` over `duration`
    fn fade(&mut self, slide: usize, from: Opacity, to: Opacity, duration: Duration);

    /// Show slide `slide` at `value` immediately, stopping any fade on it
    fn set_opacity(&mut self, slide: usize, value: Opacity);
}

/// Animator that drops every request, for headless use.
#[derive(Debug, Default)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn fade(&mut self, _slide: usize, _from: Opacity, _to: Opacity, _duration: Duration) {}

    fn set_opacity(&mut self, _slide: usize, _value: Opacity) {}
}

/// Animator that reports each request through the logger.
#[derive(Debug, Default)]
pub struct LogAnimator;

impl Animator for LogAnimator {
    fn fade(&mut self, slide: usize, from: Opacity, to: Opacity, duration: Duration) {
        let direction = if to > from { "in" } else { "out" };
        log_indented!(
            "fade {} slide {} ({:.1} → {:.1} over {}ms)",
            direction,
            slide + 1,
            from.value(),
            to.value(),
            duration.as_millis()
        );
    }

    fn set_opacity(&mut self, slide: usize, value: Opacity) {
        log_indented!("show slide {} at opacity {:.1}", slide + 1, value.value());
    }
}

/// A request received by a [`RecordingAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationRequest {
    Fade {
        slide: usize,
        from: Opacity,
        to: Opacity,
        duration: Duration,
    },
    Set {
        slide: usize,
        value: Opacity,
    },
}

/// Animator that keeps every request in a shared log.
///
/// Clones share the same log, so a test can hand one clone to the carousel and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    requests: Rc<RefCell<Vec<AnimationRequest>>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<AnimationRequest> {
        self.requests.borrow().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<AnimationRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }
}

impl Animator for RecordingAnimator {
    fn fade(&mut self, slide: usize, from: Opacity, to: Opacity, duration: Duration) {
        self.requests.borrow_mut().push(AnimationRequest::Fade {
            slide,
            from,
            to,
            duration,
        });
    }

    fn set_opacity(&mut self, slide: usize, value: Opacity) {
        self.requests
            .borrow_mut()
            .push(AnimationRequest::Set { slide, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(Opacity::new(1.7), Opacity::VISIBLE);
        assert_eq!(Opacity::new(-0.3), Opacity::HIDDEN);
        assert_eq!(Opacity::new(0.5).value(), 0.5);
    }

    #[test]
    fn test_recording_animator_clones_share_log() {
        let recorder = RecordingAnimator::new();
        let mut handle = recorder.clone();

        handle.set_opacity(0, Opacity::VISIBLE);
        handle.fade(0, Opacity::VISIBLE, Opacity::HIDDEN, Duration::from_millis(1200));

        assert_eq!(recorder.requests().len(), 2);
        assert_eq!(
            recorder.take()[0],
            AnimationRequest::Set {
                slide: 0,
                value: Opacity::VISIBLE
            }
        );
        assert!(recorder.requests().is_empty());
    }
}
