//! Cross-realm tab search.
//!
//! [`SearchEngine::rank`] turns a snapshot and a query into a capped list of
//! [`SearchResult`]s ordered by score. [`SearchSession`] sits between the
//! engine and the search UI: it drops results for superseded queries and tracks
//! the keyboard selection.

use std::cmp::Ordering;

use url::Url;

use crate::config::SearchConfig;
use crate::core::fuzzy;
use crate::error::RealmsResult;
use crate::model::{Dock, Realm, Snapshot, Tab};
use crate::services::session::SessionProvider;

/// A matched tab with its owning realm and dock resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub tab: Tab,
    pub realm: Option<Realm>,
    pub dock: Option<Dock>,
    pub score: f64,
}

impl SearchResult {
    /// Title to show, falling back to `placeholder` for untitled tabs
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.tab.title.is_empty() {
            placeholder
        } else {
            &self.tab.title
        }
    }

    /// "Realm › Dock", with whichever parts resolved
    pub fn breadcrumb(&self) -> String {
        let parts: Vec<&str> = [
            self.realm.as_ref().map(|r| r.name.as_str()),
            self.dock.as_ref().map(|d| d.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();

        parts.join(" › ")
    }

    pub fn favicon_url(&self, service: &str) -> Option<String> {
        favicon_url(&self.tab, service)
    }
}

/// Favicon for a tab: its own icon if set, otherwise one derived from the host
/// through `service` (`{domain}` is substituted). Malformed or host-less URLs
/// give `None`.
pub fn favicon_url(tab: &Tab, service: &str) -> Option<String> {
    if let Some(favicon) = tab.favicon.as_deref().filter(|f| !f.is_empty()) {
        return Some(favicon.to_string());
    }

    let url = match Url::parse(&tab.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!(tab = %tab.id, url = %tab.url, "No favicon for unparsable URL: {}", e);
            return None;
        }
    };

    let host = url.host_str()?;
    Some(service.replace("{domain}", &urlencoding::encode(host)))
}

/// Rank tabs against a query with the default search settings.
pub fn rank(tabs: &[Tab], realms: &[Realm], docks: &[Dock], query: &str) -> Vec<SearchResult> {
    SearchEngine::default().rank_tabs(tabs, realms, docks, query)
}

/// Scores and orders tabs for the search palette
#[derive(Debug, Clone)]
pub struct SearchEngine {
    max_results: usize,
    url_weight: f64,
}

impl SearchEngine {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            max_results: config.max_results,
            url_weight: config.url_weight,
        }
    }

    pub fn rank(&self, snapshot: &Snapshot, query: &str) -> Vec<SearchResult> {
        self.rank_tabs(&snapshot.tabs, &snapshot.realms, &snapshot.docks, query)
    }

    pub fn rank_tabs(
        &self,
        tabs: &[Tab],
        realms: &[Realm],
        docks: &[Dock],
        query: &str,
    ) -> Vec<SearchResult> {
        let enrich = |tab: &Tab, score: f64| SearchResult {
            tab: tab.clone(),
            realm: tab
                .realm_id
                .as_deref()
                .and_then(|id| realms.iter().find(|r| r.id == id))
                .cloned(),
            dock: tab
                .dock_id
                .as_deref()
                .and_then(|id| docks.iter().find(|d| d.id == id))
                .cloned(),
            score,
        };

        // Whitespace-only queries list everything in session order
        if query.trim().is_empty() {
            return tabs
                .iter()
                .take(self.max_results)
                .map(|tab| enrich(tab, f64::from(fuzzy::MATCH_ALL)))
                .collect();
        }

        let mut results: Vec<SearchResult> = tabs
            .iter()
            .filter_map(|tab| {
                let score = self.score_tab(tab, query);
                (score > 0.0).then(|| enrich(tab, score))
            })
            .collect();

        // Stable: equal scores keep snapshot order
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(self.max_results);

        tracing::debug!(query, matches = results.len(), "Ranked tabs");
        results
    }

    /// Best of the title score and the weighted URL score
    pub fn score_tab(&self, tab: &Tab, query: &str) -> f64 {
        let title_score = f64::from(fuzzy::score(&tab.title, query));
        let url_score = f64::from(fuzzy::score(&tab.url, query)) * self.url_weight;
        title_score.max(url_score)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

/// Identifies one rank request issued by a [`SearchSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: String,
}

impl QueryTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Last-query-wins result holder with a keyboard selection cursor
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: u64,
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query; any earlier ticket becomes stale
    pub fn begin(&mut self, query: &str) -> QueryTicket {
        self.latest += 1;
        self.query = query.to_string();
        QueryTicket {
            generation: self.latest,
            query: self.query.clone(),
        }
    }

    /// Accept results for `ticket` unless a newer query was issued since.
    ///
    /// Returns whether the results were accepted.
    pub fn complete(&mut self, ticket: &QueryTicket, results: Vec<SearchResult>) -> bool {
        if ticket.generation != self.latest {
            tracing::trace!(
                stale = ticket.generation,
                latest = self.latest,
                "Discarding results for superseded query"
            );
            return false;
        }

        self.results = results;
        self.selected = 0;
        true
    }

    /// Begin a query and rank it in one step
    pub fn search(&mut self, engine: &SearchEngine, snapshot: &Snapshot, query: &str) {
        let ticket = self.begin(query);
        let results = engine.rank(snapshot, query);
        self.complete(&ticket, results);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Point the selection at `index` (e.g. on hover), ignoring out-of-range values
    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = index;
        }
    }
}

/// Switch to the result's tab, entering its realm first when it has one
pub fn activate<P: SessionProvider + ?Sized>(
    provider: &mut P,
    result: &SearchResult,
) -> RealmsResult<()> {
    if let Some(realm_id) = result.tab.realm_id.as_deref() {
        provider.set_active_realm(realm_id)?;
    }
    provider.switch_tab(&result.tab.id)
}
