//! # Hospital Landing Library
//!
//! Interactive core of a hospital landing page, plus the harness that drives it
//!
//! This library keeps all state and timing out of the binary so it can be
//! tested against a virtual clock, and provides clean separation between CLI
//! dispatch (main.rs) and page logic.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Time**: `time_source` (real and virtual clocks) and `scheduler` (timer
//!   queue with scoped timer guards)
//! - **Core**: `carousel` (hero autoplay with cross-fades) and `nav` (mobile
//!   menu toggle), composed by `page` into a snapshot for renderers
//! - **Boundaries**: `animation` receives fade requests, `content` holds the
//!   static page data
//! - **Configuration**: `config` module for TOML-based content with hot-reload
//! - **Commands**: `commands` module for the CLI (run, simulate, snapshot, check)
//! - **Infrastructure**: Signal handling, logging, and constants

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod animation;
pub mod args;
pub mod carousel;
pub mod commands;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod nav;
pub mod page;
pub mod scheduler;
pub mod signals;
pub mod time_source;

// Re-exports for the binary and integration tests
pub use carousel::{CarouselController, CarouselView, Timing, TransitionState};
pub use error::ConfigurationError;
pub use page::{LandingPage, PageChange, PageEvent, PageSnapshot};
