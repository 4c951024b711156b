//! Site configuration used to build deep links.

use serde::{Deserialize, Serialize};

/// Settings describing the learning platform the reports link back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public root URL of the platform, without a trailing slash.
    #[serde(default = "default_wwwroot")]
    pub wwwroot: String,
}

impl SiteConfig {
    /// Root URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.wwwroot.trim_end_matches('/')
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            wwwroot: default_wwwroot(),
        }
    }
}

fn default_wwwroot() -> String {
    "http://localhost".to_string()
}
