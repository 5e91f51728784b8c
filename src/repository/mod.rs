
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A repository record as returned by the GitHub listing API.
///
/// Only the fields the page displays are kept. Every field tolerates being
/// missing or `null` so that one odd record never fails the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Topic tags, in API order.
    #[serde(default, deserialize_with = "topics_or_empty")]
    pub topics: Vec<String>,
    /// Whether the repository is a fork.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fork: bool,
    /// Last update as an ISO-8601 timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    /// Link to the repository on GitHub.
    #[serde(default, deserialize_with = "null_as_default")]
    pub html_url: String,
    /// Project homepage, possibly empty.
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC
/// and a bare date means midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Repository {
    /// Parsed `updated_at`, or `None` when it is not a timestamp.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// The homepage URL, if it is set to something non-empty.
    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }

    /// Case-insensitive substring match against the name, the description and
    /// the space-joined topics. `query` must already be lowercased.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.as_deref().unwrap_or_default().to_lowercase().contains(query)
            || self.topics.join(" ").to_lowercase().contains(query)
    }
}

/// The search text and the hide-forks toggle, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    hide_forks: bool,
}

impl FilterState {
    /// Builds the state from raw control values.
    pub fn new(query: &str, hide_forks: bool) -> Self {
        Self { query: query.to_lowercase().trim().to_string(), hide_forks }
    }

    /// Lowercased, trimmed search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether forks are filtered out.
    pub fn hide_forks(&self) -> bool {
        self.hide_forks
    }
}

/// Returns the visible repositories for `state`, most recently updated first.
///
/// The source slice is never touched. Records with identical timestamps keep
/// their relative order and records with an unparseable timestamp go last.
pub fn apply_filters(repos: &[Repository], state: &FilterState) -> Vec<Repository> {
    let mut filtered: Vec<Repository> = repos
        .iter()
        .filter(|r| !(state.hide_forks && r.fork))
        .filter(|r| state.query.is_empty() || r.matches(&state.query))
        .cloned()
        .collect();

    // `sort_by_key` is stable.
    filtered.sort_by_key(|r| std::cmp::Reverse(r.updated()));

    filtered
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Anything other than an array counts as "no topics"; non-string entries are
// dropped.
fn topics_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            items.into_iter().filter_map(|t| t.as_str().map(str::to_string)).collect()
        }
        _ => Vec::new(),
    };

    Ok(topics)
}
