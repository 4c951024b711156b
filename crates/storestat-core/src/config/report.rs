//! Usage report configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the usage reports.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows per page when the caller does not ask for a page size.
    #[validate(range(min = 1, max = 1000))]
    pub default_page_size: u64,

    /// Upper bound for a caller-supplied page size.
    #[validate(range(min = 1, max = 1000))]
    pub max_page_size: u64,

    /// Component tag identifying personal user files.
    #[validate(length(min = 1))]
    pub user_component: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            user_component: default_user_component(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_user_component() -> String {
    "user".to_string()
}
