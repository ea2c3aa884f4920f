//! Static expansion of the per-image boot checks.
//!
//! The boot scenario runs once per configured image. Expanding the table up
//! front keeps check names stable across runs, so results can be compared
//! even when the skip pattern changes.

use regex::Regex;
use tracing::warn;

use crate::config::SuiteConfig;

/// One planned boot check, possibly skipped before it runs.
#[derive(Debug, Clone)]
pub struct ImageCheck {
    /// Stable check name derived from the image.
    pub name: String,
    /// Image reference handed to the boot request.
    pub image: String,
    /// Present when the skip pattern matched; the check must not run.
    pub skip_reason: Option<String>,
}

impl ImageCheck {
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}

/// Expand the configured images into the boot check table.
///
/// An invalid skip pattern is logged and treated as matching nothing; a bad
/// regex should cost the skip feature, not the whole suite.
#[must_use]
pub fn image_checks(config: &SuiteConfig) -> Vec<ImageCheck> {
    let skip = config
        .image_skip_pattern
        .as_deref()
        .and_then(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(error) => {
                warn!(%error, pattern, "invalid image skip pattern, skipping nothing");
                None
            }
        });

    config
        .image_names
        .iter()
        .map(|image| {
            let skip_reason = skip
                .as_ref()
                .filter(|regex| regex.is_match(image))
                .map(|regex| format!("image {image} matches skip pattern {}", regex.as_str()));
            ImageCheck {
                name: format!("boot_reserved_instance_{}", sanitize(image)),
                image: image.clone(),
                skip_reason,
            }
        })
        .collect()
}

/// Lowercase alphanumerics survive; everything else becomes `_`.
fn sanitize(image: &str) -> String {
    image
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
