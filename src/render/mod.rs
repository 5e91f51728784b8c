mod utils;

pub use utils::{escape_html, format_date};

use crate::{chrome::theme::Theme, repository::Repository};

/// Status text shown when no repository survives filtering.
pub const NO_PROJECTS_MSG: &str = "No projects found.";
/// Placeholder body for repositories without a description.
pub const NO_DESCRIPTION_MSG: &str = "No description yet.";
/// Placeholder tag for repositories without topics.
pub const NO_TOPICS_MSG: &str = "No topics";
/// At most this many topics are shown per card.
pub const MAX_TAGS: usize = 6;

/// The status line and the list markup for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedList {
    /// Text for the status line.
    pub status: String,
    /// Card markup for the list container; empty when nothing is visible.
    pub list_html: String,
}

/// Renders the given repositories, in order, as project cards.
pub fn render(repos: &[Repository]) -> RenderedList {
    if repos.is_empty() {
        return RenderedList { status: NO_PROJECTS_MSG.to_string(), list_html: String::new() };
    }

    RenderedList {
        status: format!("{} project(s)", repos.len()),
        list_html: repos.iter().map(render_card).collect::<Vec<_>>().join("\n"),
    }
}

fn render_card(repo: &Repository) -> String {
    let name = escape_html(&repo.name);
    let desc = match repo.description.as_deref() {
        Some(d) if !d.trim().is_empty() => escape_html(d),
        _ => escape_html(NO_DESCRIPTION_MSG),
    };
    let updated = escape_html(&format_date(&repo.updated_at));

    let tags = if repo.topics.is_empty() {
        format!(r#"<span class="tag muted">{}</span>"#, escape_html(NO_TOPICS_MSG))
    } else {
        repo.topics
            .iter()
            .take(MAX_TAGS)
            .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
            .collect::<String>()
    };

    let homepage_link = repo
        .homepage_url()
        .map(|url| {
            format!(r#"<a href="{}" target="_blank" rel="noopener">Live</a>"#, escape_html(url))
        })
        .unwrap_or_default();

    format!(
        r#"<div class="project-card">
  <h3 class="proj-title">{name}</h3>
  <p class="proj-desc">{desc}</p>
  <div class="proj-tags">{tags}</div>
  <div class="proj-meta"><span><strong>Updated:</strong> {updated}</span></div>
  <div class="project-links">
    <a href="{html_url}" target="_blank" rel="noopener">GitHub</a>{homepage_link}
  </div>
</div>"#,
        html_url = escape_html(&repo.html_url),
    )
}

/// Wraps a render pass in the projects section, with the status element and
/// the list container the page script targets.
pub fn render_section(theme: Theme, status: &str, list_html: &str) -> String {
    format!(
        r#"<section id="projects" class="{theme}">
<p id="status">{status}</p>
<div id="projectsList">
{list_html}
</div>
</section>
"#,
        status = escape_html(status),
    )
}
