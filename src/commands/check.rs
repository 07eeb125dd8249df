//! Implementation of the check command.
//!
//! Loading already validates the file, so by the time this runs the
//! configuration is known to be usable; the command reports what it found.

use anyhow::Result;

use super::LoadedConfig;

/// Report the validated configuration.
pub fn handle_check_command(loaded: &LoadedConfig, debug_enabled: bool) -> Result<()> {
    log_version!();
    loaded.log();

    if debug_enabled {
        let content = loaded.config.content();
        log_pipe!();
        log_debug!("Hero slides:");
        for (position, slide) in content.slides.iter().enumerate() {
            log_indented!("{}. {} \"{}\"", position + 1, slide.image_ref, slide.caption);
        }
    }

    match &loaded.source {
        Some(path) => log_block_start!("Configuration is valid: {}", path.display()),
        None => log_block_start!("No configuration file found, built-in content is valid"),
    }
    log_end!();
    Ok(())
}

/// Display detailed help for the check command.
pub fn display_help() {
    log_version!();
    log_block_start!("check - Validate the configuration file");
    log_block_start!("Usage: hospital-landing [--config <path>] check");
    log_block_start!("Checks:");
    log_indented!("At least one slide, with non-empty image and caption");
    log_indented!("interval_ms and fade_ms within their limits");
    log_indented!("fade_ms shorter than interval_ms");
    log_end!();
}
