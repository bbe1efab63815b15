// src/config/options.rs
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    /// Base address of the parts-database service.
    pub api_base: String,
    /// Capture only; never contact the parts database.
    pub offline: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            api_base: s!(DEFAULT_API_BASE),
            offline: false,
        }
    }
}

impl AppOptions {
    /// Normalized base: always one trailing slash, so endpoint paths
    /// can be appended directly.
    pub fn api_base_normalized(&self) -> String {
        let trimmed = self.api_base.trim().trim_end_matches('/');
        join!(trimmed, "/")
    }
}
