//! Frontend configuration module
//!
//! This module provides configuration for frontend-specific URLs and settings.

/// Frontend configuration for URLs and settings
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL for API requests
    pub api_base_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("PARLEY_API_URL").unwrap_or("/api").to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the API base URL
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
