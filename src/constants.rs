// Application-wide constants and defaults

// # Carousel timing
pub const DEFAULT_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_FADE_MS: u64 = 1200;

// Hard limits accepted from configuration
pub const MINIMUM_INTERVAL_MS: u64 = 100;
pub const MAXIMUM_INTERVAL_MS: u64 = 600_000;
pub const MINIMUM_FADE_MS: u64 = 1;
pub const MAXIMUM_FADE_MS: u64 = 60_000;

// # Content defaults
pub const DEFAULT_BRAND: &str = "MAX";
pub const DEFAULT_LOGO: &str = "/logo.png";

// Stagger between list items when a section scrolls into view
pub const DEPARTMENT_REVEAL_STEP_MS: u64 = 200;
pub const DOCTOR_REVEAL_STEP_MS: u64 = 100;
pub const TESTIMONIAL_REVEAL_STEP_MS: u64 = 200;

// # Navigation glyphs
pub const NAV_GLYPH_CLOSED: &str = "☰";
pub const NAV_GLYPH_OPEN: &str = "✕";

// # Configuration files
pub const APP_DIR_NAME: &str = "hospital-landing";
pub const CONFIG_FILE_NAME: &str = "landing.toml";
pub const CONFIG_DEBOUNCE_MS: u64 = 500;

// # Harness
pub const DEFAULT_SIMULATION_MS: u64 = 15_000;
pub const RUN_POLL_INTERVAL_MS: u64 = 100;

pub const EXIT_FAILURE: i32 = 1;

#[cfg(test)]
pub mod test_constants {
    pub const TEST_INTERVAL_MS: u64 = 5000;
    pub const TEST_FADE_MS: u64 = 1200;
    pub const TEST_SLIDE_IMAGES: [&str; 3] = ["/home1.jpg", "/home2.jpg", "/home3.jpeg"];
}
