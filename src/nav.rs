//! Mobile navigation toggle.
//!
//! On narrow screens the header collapses its menu behind a button. The only
//! state involved is whether the overlay is open. Choosing a destination always
//! closes it, independent of how it was opened.

use crate::constants::{NAV_GLYPH_CLOSED, NAV_GLYPH_OPEN};

/// Open/closed flag of the mobile navigation overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavToggle {
    is_open: bool,
}

impl NavToggle {
    /// A closed menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag (the header button)
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Force the menu closed
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// A navigation entry was chosen: close the menu and pass the choice through.
    pub fn select(&mut self, item: usize) -> usize {
        self.close();
        item
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Glyph the toggle button shows in the current state
    pub fn glyph(&self) -> &'static str {
        if self.is_open {
            NAV_GLYPH_OPEN
        } else {
            NAV_GLYPH_CLOSED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let nav = NavToggle::new();
        assert!(!nav.is_open());
        assert_eq!(nav.glyph(), "☰");
    }

    #[test]
    fn test_double_toggle_restores_state() {
        for initially_open in [false, true] {
            let mut nav = NavToggle::new();
            if initially_open {
                nav.toggle();
            }
            nav.toggle();
            nav.toggle();
            assert_eq!(nav.is_open(), initially_open);
        }
    }

    #[test]
    fn test_close_always_closes() {
        let mut nav = NavToggle::new();
        nav.close();
        assert!(!nav.is_open());

        nav.toggle();
        assert_eq!(nav.glyph(), "✕");
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn test_select_closes_menu() {
        let mut nav = NavToggle::new();
        nav.toggle();
        assert_eq!(nav.select(3), 3);
        assert!(!nav.is_open());

        // Selecting with the menu already closed keeps it closed
        nav.select(0);
        assert!(!nav.is_open());
    }
}
