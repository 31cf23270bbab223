use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::Recipe;

/// Where the most recent search stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SearchStatus {
    /// No search has been run yet
    #[default]
    Idle,
    Loading,
    /// The last applied search succeeded (possibly with zero matches)
    Ready,
    /// The last applied search failed
    Failed(String),
}

/// The process-wide search session: results, selection and status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSession {
    /// Results of the last applied search, in response order
    pub results: Vec<Recipe>,
    pub selected: Option<Recipe>,
    pub status: SearchStatus,
    /// When the last search was applied
    pub updated_at: Option<DateTime<Utc>>,
}

impl SearchSession {
    pub fn find(&self, id: i64) -> Option<&Recipe> {
        self.results.iter().find(|recipe| recipe.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// Replaces the results and drops a selection the new results no longer contain.
    pub(crate) fn replace_results(&mut self, results: Vec<Recipe>) {
        self.results = results;
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|selected| self.results.iter().any(|r| r.id == selected.id));
        if !still_present {
            self.selected = None;
        }
        self.updated_at = Some(Utc::now());
    }

    /// Empties the results after a failed search. The selection belongs to
    /// the last successful results and is kept.
    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.updated_at = Some(Utc::now());
    }
}
