//! Navigation highlight that follows the section in view.

/// Page sections tracked by the navigation bar, in page order.
pub const SECTION_IDS: [&str; 5] =
    ["aboutme", "projects", "certifications", "publications", "contact"];
/// Section highlighted when the URL carries no fragment.
pub const DEFAULT_SECTION: &str = "aboutme";
/// Observer root margin: skips the fixed header and biases toward the upper
/// part of the viewport.
pub const ROOT_MARGIN: &str = "-90px 0px -55% 0px";
/// Visibility ratios at which the observer reports.
pub const THRESHOLDS: [f64; 4] = [0.2, 0.35, 0.5, 0.65];

/// One intersection observer report for a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    /// Section element id.
    pub id: String,
    /// Whether the section crosses the observer root.
    pub is_intersecting: bool,
    /// Visible fraction of the section, `0.0..=1.0`.
    pub intersection_ratio: f64,
}

impl SectionEntry {
    /// Builds a report for section `id`.
    pub fn new(id: &str, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self { id: id.to_string(), is_intersecting, intersection_ratio }
    }
}

/// Tracks which navigation link is highlighted.
///
/// `observed` is the section the observer last picked; `active_link` is what
/// the navigation bar shows, which a fragment change can also set.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<String>,
    observed: Option<String>,
    active_link: Option<String>,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(SECTION_IDS)
    }
}

impl ScrollSpy {
    /// Observes the given sections; pass only those present on the page.
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            observed: None,
            active_link: None,
        }
    }

    /// The observed section ids.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// The section whose link is highlighted.
    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }

    /// Handles a batch of observer reports. Highlights the most visible
    /// intersecting section and returns it, if it changed.
    pub fn observe(&mut self, entries: &[SectionEntry]) -> Option<&str> {
        let mut best: Option<&SectionEntry> = None;
        for entry in entries.iter().filter(|e| e.is_intersecting && self.is_observed(&e.id)) {
            // Strictly greater, so the earliest entry wins a tie.
            if best.is_none_or(|b| entry.intersection_ratio > b.intersection_ratio) {
                best = Some(entry);
            }
        }

        let id = &best?.id;
        if self.observed.as_ref() == Some(id) {
            return None;
        }

        tracing::debug!("Active section: {id}");
        self.observed = Some(id.clone());
        self.active_link = Some(id.clone());
        self.active_link.as_deref()
    }

    /// Highlights the section named by a URL fragment such as `#projects`,
    /// falling back to the default section when it is empty.
    pub fn on_fragment<'a>(&mut self, fragment: &'a str) -> &'a str {
        let id = fragment.trim_start_matches('#');
        let id = if id.is_empty() { DEFAULT_SECTION } else { id };
        self.active_link = Some(id.to_string());
        id
    }

    /// Handles a click on an in-page navigation link. Returns the fragment to
    /// push onto the history after scrolling, or `None` when the link does
    /// not point at a known section and should keep its default behavior.
    pub fn navigate(&self, href: &str) -> Option<String> {
        let id = href.strip_prefix('#')?;
        self.is_observed(id).then(|| format!("#{id}"))
    }

    /// Class attribute of the navigation link for `section_id`.
    pub fn link_class(&self, section_id: &str) -> &'static str {
        if self.active_link() == Some(section_id) { "active" } else { "" }
    }

    fn is_observed(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s == id)
    }
}
