//! Configuration validation functionality.
//!
//! Rejects configurations that could not drive the page: no slides, blank
//! content references, out-of-range timings and fades that would overlap the
//! next autoplay tick.

use anyhow::{Context, Result};

use super::Config;
use crate::constants::*;

/// Validate every field that is present; absent fields fall back to valid defaults.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval_ms) = config.interval_ms
        && !(MINIMUM_INTERVAL_MS..=MAXIMUM_INTERVAL_MS).contains(&interval_ms)
    {
        anyhow::bail!(
            "interval_ms ({} ms) must be between {} and {} milliseconds",
            interval_ms,
            MINIMUM_INTERVAL_MS,
            MAXIMUM_INTERVAL_MS
        );
    }

    if let Some(fade_ms) = config.fade_ms
        && !(MINIMUM_FADE_MS..=MAXIMUM_FADE_MS).contains(&fade_ms)
    {
        anyhow::bail!(
            "fade_ms ({} ms) must be between {} and {} milliseconds",
            fade_ms,
            MINIMUM_FADE_MS,
            MAXIMUM_FADE_MS
        );
    }

    // The fade has to finish before the next tick, whichever side came from defaults
    config
        .timing()
        .validate()
        .context("fade_ms must be shorter than interval_ms")?;

    if let Some(slides) = &config.slides {
        if slides.is_empty() {
            anyhow::bail!("slides must contain at least one slide");
        }
        for (position, slide) in slides.iter().enumerate() {
            if slide.image_ref.trim().is_empty() {
                anyhow::bail!("slide {} has an empty image reference", position + 1);
            }
            if slide.caption.trim().is_empty() {
                anyhow::bail!("slide {} has an empty caption", position + 1);
            }
        }
    }

    if let Some(items) = &config.nav_items
        && let Some(position) = items.iter().position(|item| item.label.trim().is_empty())
    {
        anyhow::bail!("navigation entry {} has an empty label", position + 1);
    }

    if let Some(brand) = &config.brand
        && brand.trim().is_empty()
    {
        anyhow::bail!("brand cannot be empty");
    }

    Ok(())
}
