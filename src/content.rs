//! Static page content.
//!
//! Everything here is opaque, immutable data supplied from outside the
//! interactive core: the hero slides, the navigation entries and the lists
//! shown in the informational sections. The built-in values are the MAX
//! Hospital landing page; a configuration file can replace any part of it.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::*;

/// One hero slide: a background image and the quote shown over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Opaque reference to the background image
    #[serde(rename = "image")]
    pub image_ref: String,
    /// Quote shown over the image
    #[serde(alias = "quote")]
    pub caption: String,
}

impl Slide {
    pub fn new(image_ref: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image_ref: image_ref.into(),
            caption: caption.into(),
        }
    }
}

/// Entry of the header navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavItem {
    pub label: String,
}

impl NavItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub title: String,
    #[serde(rename = "image")]
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub role: String,
    #[serde(rename = "image")]
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub quote: String,
    #[serde(rename = "image")]
    pub image_ref: String,
}

/// The "About" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    pub heading: String,
    #[serde(rename = "image")]
    pub image_ref: String,
    pub paragraphs: Vec<String>,
}

/// Sections whose items appear with a stagger when scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealSection {
    Departments,
    Doctors,
    Testimonials,
}

impl RevealSection {
    /// Delay before item `position` of this section starts its reveal
    pub fn reveal_delay(&self, position: usize) -> Duration {
        let step = match self {
            RevealSection::Departments => DEPARTMENT_REVEAL_STEP_MS,
            RevealSection::Doctors => DOCTOR_REVEAL_STEP_MS,
            RevealSection::Testimonials => TESTIMONIAL_REVEAL_STEP_MS,
        };
        Duration::from_millis(step.saturating_mul(position as u64))
    }
}

/// All static content of the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
    pub brand: String,
    pub logo_ref: String,
    pub slides: Vec<Slide>,
    pub nav_items: Vec<NavItem>,
    pub about: AboutSection,
    pub departments: Vec<Department>,
    pub doctors: Vec<Doctor>,
    pub testimonials: Vec<Testimonial>,
}

impl PageContent {
    /// Footer line for the given year
    pub fn footer_for_year(&self, year: i32) -> String {
        format!("© {year} {} Hospital | All Rights Reserved", self.brand)
    }

    /// Footer line for the current local year
    pub fn footer(&self) -> String {
        self.footer_for_year(chrono::Local::now().year())
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            logo_ref: DEFAULT_LOGO.to_string(),
            slides: default_slides(),
            nav_items: default_nav_items(),
            about: default_about(),
            departments: default_departments(),
            doctors: default_doctors(),
            testimonials: default_testimonials(),
        }
    }
}

pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "/home1.jpg",
            "Healing with compassion, powered by innovation.",
        ),
        Slide::new(
            "/home2.jpg",
            "Your health, our priority — every heartbeat matters.",
        ),
        Slide::new(
            "/home3.jpeg",
            "Trusted care for a healthier, happier tomorrow.",
        ),
    ]
}

pub fn default_nav_items() -> Vec<NavItem> {
    [
        "Home",
        "About",
        "Departments",
        "Doctors",
        "Testimonials",
        "Contact",
    ]
    .into_iter()
    .map(NavItem::new)
    .collect()
}

fn default_about() -> AboutSection {
    AboutSection {
        heading: "About Our Hospital".to_string(),
        image_ref: "/about.jpg".to_string(),
        paragraphs: vec![
            "For over 20 years, we’ve been committed to providing exceptional medical care \
             through advanced technology, expert doctors, and compassionate service."
                .to_string(),
            "From emergency care to specialty treatments, we ensure your well-being with \
             world-class facilities and a caring approach."
                .to_string(),
        ],
    }
}

fn default_departments() -> Vec<Department> {
    [
        ("Cardiology", "/dept1.jpg"),
        ("Neurology", "/dept2.jpg"),
        ("Orthopedics", "/dept3.jpg"),
    ]
    .into_iter()
    .map(|(title, image)| Department {
        title: title.to_string(),
        image_ref: image.to_string(),
    })
    .collect()
}

fn default_doctors() -> Vec<Doctor> {
    [
        ("Dr. Anjali Nair", "Cardiologist", "/doc1.jpg"),
        ("Dr. Rahul Menon", "Neurologist", "/doc2.jpg"),
        ("Dr. Sneha Varma", "Orthopedic Surgeon", "/doc3.jpg"),
        ("Dr. Vivek Pillai", "Pediatrician", "/doc4.jpg"),
        ("Dr. Asha Kurian", "Dermatologist", "/doc5.jpg"),
        ("Dr. Ramesh Krishnan", "General Surgeon", "/doc6.jpg"),
    ]
    .into_iter()
    .map(|(name, role, image)| Doctor {
        name: name.to_string(),
        role: role.to_string(),
        image_ref: image.to_string(),
    })
    .collect()
}

fn default_testimonials() -> Vec<Testimonial> {
    [
        (
            "Priya Rajan",
            "/patient1.jpg",
            "The doctors were extremely professional and caring. The facilities were clean \
             and modern. I’m grateful for the excellent treatment I received.",
        ),
        (
            "Anoop Varghese",
            "/patient2.jpg",
            "From the moment I walked in, the staff made me feel safe and cared for. The \
             surgery went smoothly and recovery was quick. Highly recommend!",
        ),
        (
            "Meera Nandakumar",
            "/patient3.jpg",
            "Amazing experience! The pediatric department took such good care of my child — \
             truly compassionate and skilled doctors.",
        ),
    ]
    .into_iter()
    .map(|(name, image, quote)| Testimonial {
        name: name.to_string(),
        quote: quote.to_string(),
        image_ref: image.to_string(),
    })
    .collect()
}
