//! Runtime configuration for the conformance suites.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable holding the suite configuration as JSON.
pub const CONFIG_ENV: &str = "RESV_SUITE_CONFIG";

fn default_image_names() -> Vec<String> {
    vec!["cirros".to_string()]
}

fn default_flavor_ref() -> String {
    "m1.nano".to_string()
}

fn default_true() -> bool {
    true
}

/// Suite-level knobs, usually sourced from [`CONFIG_ENV`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Which resource plugins the target deployment has enabled.
    #[serde(default)]
    pub plugins: PluginToggles,
    /// Images the boot checks iterate over.
    #[serde(default = "default_image_names")]
    pub image_names: Vec<String>,
    /// Flavor used when booting onto a reservation.
    #[serde(default = "default_flavor_ref")]
    pub flavor_ref: String,
    /// Regex over image names; matches are skipped with a recorded reason.
    #[serde(default)]
    pub image_skip_pattern: Option<String>,
    /// Whether the deployment rejects boots that carry no reservation hint.
    #[serde(default = "default_true")]
    pub reservation_required: bool,
}

impl SuiteConfig {
    /// Read the configuration from [`CONFIG_ENV`].
    ///
    /// An unset variable yields the defaults; malformed JSON is logged and
    /// also falls back to the defaults rather than failing the whole run.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(CONFIG_ENV).map_or_else(|_| Self::default(), |raw| Self::from_json(&raw))
    }

    fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "malformed suite config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            plugins: PluginToggles::default(),
            image_names: default_image_names(),
            flavor_ref: default_flavor_ref(),
            image_skip_pattern: None,
            reservation_required: true,
        }
    }
}

/// Per-resource-plugin availability on the target deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginToggles {
    #[serde(default = "default_true")]
    pub host: bool,
    #[serde(default = "default_true")]
    pub device: bool,
    #[serde(default = "default_true")]
    pub network: bool,
    #[serde(default = "default_true")]
    pub floatingip: bool,
    #[serde(default = "default_true")]
    pub flavor_instance: bool,
}

impl Default for PluginToggles {
    fn default() -> Self {
        Self {
            host: true,
            device: true,
            network: true,
            floatingip: true,
            flavor_instance: true,
        }
    }
}
