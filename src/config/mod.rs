//! Configuration system for the landing page harness.
//!
//! Page content and carousel timing come from an optional TOML file. Every
//! field is optional; anything left out falls back to the built-in MAX
//! Hospital content and the default timing.
//!
//! ## Configuration Sources
//!
//! 1. The path given with `--config <path>`
//! 2. **XDG_CONFIG_HOME**/hospital-landing/landing.toml
//! 3. Built-in defaults when neither exists
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Carousel]
//! interval_ms = 5000   # Time each slide stays before the next one (100-600000)ms
//! fade_ms = 1200       # Cross-fade duration, must be shorter than interval_ms (1-60000)ms
//!
//! #[Branding]
//! brand = "MAX"
//! logo = "/logo.png"
//!
//! #[Hero]
//! [[slides]]
//! image = "/home1.jpg"
//! caption = "Healing with compassion, powered by innovation."  # `quote` also accepted
//!
//! #[Navigation]
//! nav_items = ["Home", "About", "Departments", "Doctors", "Testimonials", "Contact"]
//!
//! #[Sections]
//! [[departments]]
//! title = "Cardiology"
//! image = "/dept1.jpg"
//!
//! [[doctors]]
//! name = "Dr. Anjali Nair"
//! role = "Cardiologist"
//! image = "/doc1.jpg"
//!
//! [[testimonials]]
//! name = "Priya Rajan"
//! image = "/patient1.jpg"
//! quote = "The doctors were extremely professional and caring."
//! ```
//!
//! ## Validation
//!
//! Loading rejects an empty slide list, blank image references or captions,
//! timings outside their limits, and a fade that is not shorter than the
//! interval. The message names the offending field.

pub mod loading;
pub mod validation;
pub mod watcher;


use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::carousel::Timing;
use crate::constants::*;
use crate::content::{AboutSection, Department, Doctor, NavItem, PageContent, Slide, Testimonial};

pub use loading::{
    get_config_path, is_explicit, load, load_from_path, load_or_default, parse, set_config_path,
};
pub use watcher::ConfigWatcher;

/// Settings loaded from `landing.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Milliseconds each slide stays before autoplay advances
    pub interval_ms: Option<u64>,
    /// Milliseconds of the cross-fade between two slides
    pub fade_ms: Option<u64>,

    pub brand: Option<String>,
    pub logo: Option<String>,

    pub slides: Option<Vec<Slide>>,
    pub nav_items: Option<Vec<NavItem>>,
    pub about: Option<AboutSection>,
    pub departments: Option<Vec<Department>>,
    pub doctors: Option<Vec<Doctor>>,
    pub testimonials: Option<Vec<Testimonial>>,
}

impl Config {
    /// Load using automatic path detection, see [`loading::load`].
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    /// Carousel timing with defaults applied
    pub fn timing(&self) -> Timing {
        Timing::from_millis(
            self.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS),
            self.fade_ms.unwrap_or(DEFAULT_FADE_MS),
        )
    }

    /// Page content with every missing part taken from the built-in content
    pub fn content(&self) -> PageContent {
        let defaults = PageContent::default();
        PageContent {
            brand: self.brand.clone().unwrap_or(defaults.brand),
            logo_ref: self.logo.clone().unwrap_or(defaults.logo_ref),
            slides: self.slides.clone().unwrap_or(defaults.slides),
            nav_items: self.nav_items.clone().unwrap_or(defaults.nav_items),
            about: self.about.clone().unwrap_or(defaults.about),
            departments: self.departments.clone().unwrap_or(defaults.departments),
            doctors: self.doctors.clone().unwrap_or(defaults.doctors),
            testimonials: self.testimonials.clone().unwrap_or(defaults.testimonials),
        }
    }

    /// Log the effective configuration.
    pub fn log_config(&self, source: Option<&Path>) {
        let timing = self.timing();
        let content = self.content();

        log_block_start!("Loaded configuration");
        match source {
            Some(path) => log_indented!("Source: {}", path.display()),
            None => log_indented!("Source: built-in defaults"),
        }
        log_indented!("Brand: {}", content.brand);
        log_indented!(
            "Carousel: {} slides, {}ms interval, {}ms fade",
            content.slides.len(),
            timing.interval.as_millis(),
            timing.fade.as_millis()
        );
        log_indented!(
            "Sections: {} departments, {} doctors, {} testimonials",
            content.departments.len(),
            content.doctors.len(),
            content.testimonials.len()
        );
    }
}
