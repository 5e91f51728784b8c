//! The projects section of a personal portfolio page.
//!
//! Fetches a user's public GitHub repositories, filters and sorts them by the
//! page's search box and hide-forks toggle, and renders them as HTML cards.
//! The surrounding page chrome (theme, scroll-spy navigation, citation modal)
//! lives in [`chrome`].
#![warn(missing_docs)]

/// The repository browser controller.
pub mod browser;
/// Theme preference, scroll-spy navigation and the citation modal.
pub mod chrome;
/// The configuration for the application.
pub mod config;
/// The client for the GitHub REST API.
pub mod github;
/// HTML rendering of repository cards.
pub mod render;
/// The repository model and the filter/sort engine.
pub mod repository;
/// The page elements the browser writes to.
pub mod view;

use std::{path::Path, sync::Arc};

use crate::{
    browser::{LoadState, RepositoryBrowser},
    chrome::theme::{FilePreferenceStore, ThemeController},
    config::Config,
    github::DefaultGithubClient,
    view::MemoryView,
};

/// Loads the repository list once and writes the rendered projects section
/// to the configured output file.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let github_client = Arc::new(DefaultGithubClient::new(&config.github_api_url)?);
    let view = Arc::new(MemoryView::default());

    let mut browser = RepositoryBrowser::new(
        github_client,
        view.clone(),
        &config.github_username,
        config.per_page,
    )
    .with_controls(&config.search_query, config.hide_forks);

    if browser.load().await == LoadState::Failed {
        tracing::warn!("Writing the projects section with the failure status.");
    }

    let store = Arc::new(FilePreferenceStore::new(&config.preferences_path));
    let theme = ThemeController::new(store, config.prefers_color_scheme);

    let section = render::render_section(theme.current(), &view.status(), &view.list_html());
    let output_dir = Path::new(&config.output_path).parent();
    if let Some(dir) = output_dir.filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&config.output_path, section).await?;
    tracing::info!("Wrote projects section to {}", config.output_path);

    Ok(())
}
