//! Landing page composition.
//!
//! [`LandingPage`] owns the page content and the two independent state owners,
//! routes incoming events to them one at a time, and produces a
//! [`PageSnapshot`] that a renderer can paint without touching any state.

use serde::Serialize;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::Animator;
use crate::carousel::{CarouselController, CarouselView, Timing};
use crate::content::{
    AboutSection, Department, Doctor, PageContent, RevealSection, Slide, Testimonial,
};
use crate::error::ConfigurationError;
use crate::nav::NavToggle;
use crate::scheduler::{Scheduler, TimerEvent};

/// Something that happened to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// A scheduled timer came due
    Timer(TimerEvent),
    /// The mobile menu button was pressed
    ToggleMenu,
    /// Navigation entry `index` was chosen
    SelectNav(usize),
    /// Manual jump to hero slide `index`
    ShowSlide(usize),
}

/// What changed as the result of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    None,
    Hero,
    Menu,
}

pub struct LandingPage {
    content: PageContent,
    timing: Timing,
    scheduler: Rc<dyn Scheduler>,
    carousel: CarouselController,
    nav: NavToggle,
}

impl LandingPage {
    pub fn new(
        content: PageContent,
        timing: Timing,
        scheduler: Rc<dyn Scheduler>,
        animator: Box<dyn Animator>,
    ) -> Self {
        let carousel =
            CarouselController::new(Rc::clone(&scheduler), animator).with_fade(timing.fade);
        Self {
            content,
            timing,
            scheduler,
            carousel,
            nav: NavToggle::new(),
        }
    }

    /// Start the hero autoplay.
    pub fn mount(&mut self) -> Result<(), ConfigurationError> {
        self.carousel
            .start(self.content.slides.clone(), self.timing.interval)
    }

    /// Stop everything that runs on its own. The page can be mounted again.
    pub fn unmount(&mut self) {
        self.carousel.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.carousel.is_running()
    }

    /// Apply one event. Only a jump to a missing slide or menu entry can fail,
    /// and a failed event leaves the page untouched.
    pub fn handle(&mut self, event: PageEvent) -> Result<PageChange, ConfigurationError> {
        match event {
            PageEvent::Timer(timer) => {
                if self.carousel.on_timer(&timer) {
                    Ok(PageChange::Hero)
                } else {
                    Ok(PageChange::None)
                }
            }
            PageEvent::ToggleMenu => {
                self.nav.toggle();
                Ok(PageChange::Menu)
            }
            PageEvent::SelectNav(index) => {
                let len = self.content.nav_items.len();
                if index >= len {
                    return Err(ConfigurationError::NavItemOutOfRange { index, len });
                }
                let was_open = self.nav.is_open();
                self.nav.select(index);
                Ok(if was_open {
                    PageChange::Menu
                } else {
                    PageChange::None
                })
            }
            PageEvent::ShowSlide(index) => {
                let before = self.carousel.view();
                self.carousel.reset(index)?;
                Ok(if self.carousel.view() == before {
                    PageChange::None
                } else {
                    PageChange::Hero
                })
            }
        }
    }

    /// Replace the page content, e.g. after the configuration file changed.
    ///
    /// The hero follows the carousel's rule: a different slide count restarts
    /// it from the first slide, the same count keeps its position.
    pub fn apply_content(&mut self, content: PageContent) -> Result<(), ConfigurationError> {
        self.carousel.set_slides(content.slides.clone())?;
        self.content = content;
        Ok(())
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn nav(&self) -> &NavToggle {
        &self.nav
    }

    /// Everything a renderer needs for one repaint.
    pub fn snapshot(&self) -> PageSnapshot {
        let view = self.carousel.view();
        let slides = self.carousel.slides();
        let nav_labels: Vec<String> = self
            .content
            .nav_items
            .iter()
            .map(|item| item.label.clone())
            .collect();

        PageSnapshot {
            at_ms: millis(self.scheduler.now()),
            header: HeaderSnapshot {
                brand: self.content.brand.clone(),
                logo_ref: self.content.logo_ref.clone(),
                toggle_glyph: self.nav.glyph(),
                menu_open: self.nav.is_open(),
                mobile_menu: self.nav.is_open().then(|| nav_labels.clone()),
                nav_items: nav_labels,
            },
            hero: HeroSnapshot {
                slide: slides.get(view.current_index).cloned(),
                exiting_slide: view
                    .transition
                    .exiting()
                    .and_then(|index| slides.get(index).cloned()),
                view,
            },
            about: self.content.about.clone(),
            departments: revealed(&self.content.departments, RevealSection::Departments),
            doctors: revealed(&self.content.doctors, RevealSection::Doctors),
            testimonials: revealed(&self.content.testimonials, RevealSection::Testimonials),
            footer: self.content.footer(),
        }
    }
}

impl std::fmt::Debug for LandingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("brand", &self.content.brand)
            .field("timing", &self.timing)
            .field("carousel", &self.carousel)
            .field("nav", &self.nav)
            .finish()
    }
}

/// Header state for one repaint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSnapshot {
    pub brand: String,
    pub logo_ref: String,
    pub nav_items: Vec<String>,
    pub toggle_glyph: &'static str,
    pub menu_open: bool,
    /// Entries of the mobile menu panel; absent while the panel is not mounted
    pub mobile_menu: Option<Vec<String>>,
}

/// Hero state for one repaint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSnapshot {
    #[serde(flatten)]
    pub view: CarouselView,
    pub slide: Option<Slide>,
    /// Slide fading out during a cross-fade
    pub exiting_slide: Option<Slide>,
}

/// A list item together with the delay of its scroll-in reveal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revealed<T> {
    #[serde(flatten)]
    pub item: T,
    pub reveal_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub at_ms: u64,
    pub header: HeaderSnapshot,
    pub hero: HeroSnapshot,
    pub about: AboutSection,
    pub departments: Vec<Revealed<Department>>,
    pub doctors: Vec<Revealed<Doctor>>,
    pub testimonials: Vec<Revealed<Testimonial>>,
    pub footer: String,
}

fn revealed<T: Clone>(items: &[T], section: RevealSection) -> Vec<Revealed<T>> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| Revealed {
            item: item.clone(),
            reveal_delay_ms: millis(section.reveal_delay(position)),
        })
        .collect()
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
