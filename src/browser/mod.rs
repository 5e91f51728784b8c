
use std::sync::Arc;

use crate::{
    github::{GithubClient, GithubError},
    render,
    repository::{self, FilterState, Repository},
    view::PageView,
};

/// Status text while the repository list is being fetched.
pub const LOADING_MSG: &str = "Loading projects…";
/// Status text after a failed fetch.
pub const FETCH_FAILED_MSG: &str = "Failed to load projects from GitHub.";

/// Where the browser is in its one-shot fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has been started.
    Idle,
    /// The single fetch is in flight.
    Loading,
    /// The fetch succeeded and the collection is populated.
    Loaded,
    /// The fetch failed; it is never retried.
    Failed,
}

type Subscriber = Box<dyn Fn(&[Repository]) + Send + Sync>;

/// Owns the fetched repository collection and keeps the page in sync with
/// the search box and the hide-forks checkbox.
///
/// The collection is written once, when the single fetch started by
/// [`RepositoryBrowser::load`] completes; everything else reads it.
pub struct RepositoryBrowser {
    github_client: Arc<dyn GithubClient>,
    view: Arc<dyn PageView>,
    username: String,
    per_page: u32,
    repos: Vec<Repository>,
    search_input: String,
    hide_forks: bool,
    state: LoadState,
    subscribers: Vec<Subscriber>,
}

impl RepositoryBrowser {
    /// Creates a browser for the public repositories of `username`.
    pub fn new(
        github_client: Arc<dyn GithubClient>,
        view: Arc<dyn PageView>,
        username: &str,
        per_page: u32,
    ) -> Self {
        Self {
            github_client,
            view,
            username: username.to_string(),
            per_page,
            repos: Vec::new(),
            search_input: String::new(),
            hide_forks: false,
            state: LoadState::Idle,
            subscribers: Vec::new(),
        }
    }

    /// Sets the initial control values without rendering.
    pub fn with_controls(mut self, search_input: &str, hide_forks: bool) -> Self {
        self.search_input = search_input.to_string();
        self.hide_forks = hide_forks;
        self
    }

    /// The fetched collection, in fetch order.
    pub fn repositories(&self) -> &[Repository] {
        &self.repos
    }

    /// The current fetch lifecycle state.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// The filter state derived from the current control values.
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(&self.search_input, self.hide_forks)
    }

    /// Registers a callback that receives the visible list after every render.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&[Repository]) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Search box `input` handler.
    pub fn on_search_input(&mut self, value: &str) -> usize {
        self.search_input = value.to_string();
        self.apply_filters()
    }

    /// Hide-forks checkbox `change` handler.
    pub fn on_hide_forks_change(&mut self, checked: bool) -> usize {
        self.hide_forks = checked;
        self.apply_filters()
    }

    /// Fetches the repository list once and renders it.
    ///
    /// Only the first call fetches; later calls return the current state.
    pub async fn load(&mut self) -> LoadState {
        if self.state != LoadState::Idle {
            tracing::warn!(
                "Repository list already requested ({:?}); not fetching again",
                self.state
            );
            return self.state;
        }

        self.state = LoadState::Loading;
        self.view.set_status(LOADING_MSG);

        let result = self.fetch().await;
        self.accept(result)
    }

    /// Requests the repository list without touching any state.
    async fn fetch(&self) -> Result<Vec<Repository>, GithubError> {
        tracing::debug!("Fetching repositories for {}", self.username);
        self.github_client.user_repos(&self.username, self.per_page).await
    }

    /// Consumes a fetch result: replaces the collection and renders on
    /// success, reports the failure and leaves the list untouched otherwise.
    ///
    /// Results arriving outside `Loading` are dropped.
    fn accept(&mut self, result: Result<Vec<Repository>, GithubError>) -> LoadState {
        if self.state != LoadState::Loading {
            tracing::warn!("Ignoring fetch result while {:?}", self.state);
            return self.state;
        }

        match result {
            Ok(repos) => {
                tracing::info!("Loaded {} repositories for {}", repos.len(), self.username);
                self.repos = repos;
                self.state = LoadState::Loaded;
                self.apply_filters();
            }
            Err(e) => {
                tracing::error!("Fetch error: {e}");
                self.view.set_status(FETCH_FAILED_MSG);
                self.state = LoadState::Failed;
            }
        }

        self.state
    }

    /// Filters, sorts and renders the collection for the current controls.
    /// Returns the number of visible repositories.
    pub fn apply_filters(&self) -> usize {
        let visible = repository::apply_filters(&self.repos, &self.filter_state());
        let rendered = render::render(&visible);

        self.view.set_list_html(&rendered.list_html);
        self.view.set_status(&rendered.status);

        for subscriber in &self.subscribers {
            subscriber(&visible);
        }

        visible.len()
    }
}
