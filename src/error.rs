//! Errors reported by the interactive core.
//!
//! The core has exactly one failure class: a configuration that cannot drive
//! the carousel. It surfaces synchronously when the carousel is started (or
//! asked to jump to a slide or menu entry that does not exist) and never at tick time.

use std::time::Duration;
use thiserror::Error;

/// The carousel cannot be set up with the given slides or timings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("the carousel needs at least one slide")]
    EmptySlides,

    #[error("the autoplay interval must be greater than zero")]
    ZeroInterval,

    #[error("the fade duration must be greater than zero")]
    ZeroFade,

    #[error(
        "the fade duration ({} ms) must be shorter than the autoplay interval ({} ms)",
        .fade.as_millis(),
        .interval.as_millis()
    )]
    OverlappingFade { interval: Duration, fade: Duration },

    #[error("slide {index} does not exist (the carousel has {len} slides)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("navigation entry {index} does not exist (the menu has {len} entries)")]
    NavItemOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_fade_message_names_both_timings() {
        let error = ConfigurationError::OverlappingFade {
            interval: Duration::from_millis(1000),
            fade: Duration::from_millis(1200),
        };
        let message = error.to_string();
        assert!(message.contains("1200 ms"));
        assert!(message.contains("1000 ms"));
    }
}
