
use async_trait::async_trait;
use mockall::automock;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use thiserror::Error;
use url::Url;

use crate::repository::Repository;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = "portfolio-projects";

/// Failure to list repositories.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The API URL cannot have path segments, e.g. `mailto:`.
    #[error("Invalid GitHub API URL: {0}")]
    InvalidApiUrl(String),
    /// The API URL does not parse.
    #[error("Failed to parse GitHub API URL: {0}")]
    UrlParse(#[from] url::ParseError),
    /// The request never got a response.
    #[error("Request error: {source}")]
    RequestError {
        /// Underlying transport error.
        #[from]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("GitHub API error: {0}")]
    Status(StatusCode),
    /// The body is not a JSON array of repositories.
    #[error("Failed to parse repository list: {source}")]
    SerializationError {
        /// Underlying parse error.
        #[from]
        source: serde_json::Error,
    },
}

type Result<T> = std::result::Result<T, GithubError>;

/// Read access to the GitHub REST API.
#[automock]
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// List the public repositories of `username`, most recently updated
    /// first, in a single page of at most `per_page` records.
    async fn user_repos(&self, username: &str, per_page: u32) -> Result<Vec<Repository>>;
}

/// `GithubClient` over `reqwest`, unauthenticated.
#[derive(Clone)]
pub struct DefaultGithubClient {
    client: Client,
    api_url: Url,
}

impl DefaultGithubClient {
    /// Builds a client for the API rooted at `api_url`, which may carry a
    /// path prefix such as `/api/v3`.
    pub fn new(api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(GithubError::InvalidApiUrl(api_url.to_string()));
        }

        // No token: only public data is listed.
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;
        tracing::debug!("HTTP client built successfully.");

        Ok(Self { client, api_url })
    }

    /// `{api}/users/{username}/repos?per_page={per_page}&sort=updated`
    fn user_repos_url(&self, username: &str, per_page: u32) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidApiUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("sort", "updated");

        Ok(url)
    }
}

#[async_trait]
impl GithubClient for DefaultGithubClient {
    async fn user_repos(&self, username: &str, per_page: u32) -> Result<Vec<Repository>> {
        let url = self.user_repos_url(username, per_page)?;
        tracing::debug!("Fetching repositories from {url}");

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GithubError::Status(status));
        }

        // Parse from bytes so a malformed body is reported as a parse error and
        // not as a transport error.
        let body = resp.bytes().await?;
        let repos: Vec<Repository> = serde_json::from_slice(&body)?;
        tracing::debug!("Fetched {} repositories for {username}", repos.len());

        Ok(repos)
    }
}
