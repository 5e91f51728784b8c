use std::env::{self, VarError};

use crate::chrome::theme::Theme;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_PER_PAGE: u32 = 100;
const MAX_PER_PAGE: u32 = 100;
const DEFAULT_OUTPUT_PATH: &str = "projects.html";
const DEFAULT_PREFERENCES_PATH: &str = "data/preferences.json";

/// Represents the application configuration.
#[derive(Debug)]
pub struct Config {
    /// The GitHub account whose public repositories are listed.
    pub github_username: String,
    /// The base URL of the GitHub REST API.
    pub github_api_url: String,
    /// The number of repositories requested in the single page.
    pub per_page: u32,
    /// The initial search text.
    pub search_query: String,
    /// Whether forks are hidden initially.
    pub hide_forks: bool,
    /// Where the rendered projects section is written.
    pub output_path: String,
    /// Where the theme preference is persisted.
    pub preferences_path: String,
    /// The color scheme reported by the platform.
    pub prefers_color_scheme: Theme,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, VarError> {
        Ok(Self {
            github_username: env::var("GITHUB_USERNAME")?,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            per_page: env::var("PER_PAGE")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
            search_query: env::var("SEARCH_QUERY").unwrap_or_default(),
            hide_forks: env::var("HIDE_FORKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            output_path: env::var("OUTPUT_PATH")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string()),
            preferences_path: env::var("PREFERENCES_PATH")
                .unwrap_or_else(|_| DEFAULT_PREFERENCES_PATH.to_string()),
            prefers_color_scheme: env::var("PREFERS_COLOR_SCHEME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Theme::Light),
        })
    }
}
