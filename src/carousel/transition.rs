//! Cross-fade state exposed to renderers.
//!
//! A carousel is either settled on one slide or cross-fading between two. The
//! two fades of a cross-fade (outgoing slide to transparent, incoming slide to
//! opaque) always start together and end together, so they are one variant
//! rather than two flags.

use serde::Serialize;
use std::time::Duration;

/// What a renderer should show for the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransitionState {
    /// Slide `index` is fully visible and nothing is moving
    Idle { index: usize },
    /// Slide `from` is fading out while slide `to` fades in
    Transitioning {
        from: usize,
        to: usize,
        #[serde(serialize_with = "serialize_millis")]
        elapsed: Duration,
    },
}

impl TransitionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle { .. })
    }

    /// Slide currently fading out, if any
    pub fn exiting(&self) -> Option<usize> {
        match self {
            TransitionState::Idle { .. } => None,
            TransitionState::Transitioning { from, .. } => Some(*from),
        }
    }

    /// Slide currently fading in, if any
    pub fn entering(&self) -> Option<usize> {
        match self {
            TransitionState::Idle { .. } => None,
            TransitionState::Transitioning { to, .. } => Some(*to),
        }
    }
}

impl std::fmt::Display for TransitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionState::Idle { index } => write!(f, "idle on slide {}", index + 1),
            TransitionState::Transitioning { from, to, elapsed } => write!(
                f,
                "cross-fading slide {} → {} ({}ms in)",
                from + 1,
                to + 1,
                elapsed.as_millis()
            ),
        }
    }
}

/// Snapshot of a carousel for one repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub current_index: usize,
    pub slide_count: usize,
    pub transition: TransitionState,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
