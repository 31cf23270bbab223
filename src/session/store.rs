use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::client::{CatalogError, Recipe, RecipeCatalog, SearchQuery};
use crate::session::state::{SearchSession, SearchStatus};

/// How the store treats a search response that arrives after a newer search
/// was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SupersedePolicy {
    /// Only the most recently started search may change the session.
    #[default]
    DiscardStale,
    /// Every completed search is applied; the last to finish wins.
    LastCompletionWins,
}

/// What happened to a search that completed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The results were stored in the session.
    Applied { count: usize },
    /// A newer search had started; the response was dropped.
    Superseded,
}

/// Owns the single authoritative copy of search results and selection.
///
/// Observers subscribe through [`SearchSessionStore::subscribe`] and are
/// notified on every change.
pub struct SearchSessionStore {
    catalog: Arc<dyn RecipeCatalog>,
    state: watch::Sender<SearchSession>,
    latest_ticket: AtomicU64,
    /// Status of the last applied search, restored when a search is cancelled
    settled_status: Mutex<SearchStatus>,
    policy: SupersedePolicy,
}

/// Held by a running search. Dropping it before the catalog answered means
/// the search was cancelled, and a `Loading` status it left behind is undone.
struct PendingSearch<'a> {
    store: &'a SearchSessionStore,
    ticket: u64,
    answered: bool,
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if self.answered {
            return;
        }

        let store = self.store;
        let ticket = self.ticket;
        let restored = store.state.send_if_modified(|session| {
            if store.latest_ticket.load(Ordering::SeqCst) != ticket || !session.is_loading() {
                return false;
            }
            session.status = store.settled_status();
            true
        });

        if restored {
            tracing::debug!(ticket, "Search cancelled before completion; status restored");
        }
    }
}

impl SearchSessionStore {
    pub fn new(catalog: Arc<dyn RecipeCatalog>) -> Self {
        Self::with_policy(catalog, SupersedePolicy::default())
    }

    pub fn with_policy(catalog: Arc<dyn RecipeCatalog>, policy: SupersedePolicy) -> Self {
        let (state, _) = watch::channel(SearchSession::default());
        Self {
            catalog,
            state,
            latest_ticket: AtomicU64::new(0),
            settled_status: Mutex::new(SearchStatus::Idle),
            policy,
        }
    }

    pub fn policy(&self) -> SupersedePolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    pub fn results(&self) -> Vec<Recipe> {
        self.state.borrow().results.clone()
    }

    pub fn selected(&self) -> Option<Recipe> {
        self.state.borrow().selected.clone()
    }

    pub fn status(&self) -> SearchStatus {
        self.state.borrow().status.clone()
    }

    /// Runs a search and stores its results.
    ///
    /// A failure clears the results and is returned to the caller. Under
    /// [`SupersedePolicy::DiscardStale`] a response that is no longer the
    /// latest leaves the session untouched. Dropping the returned future
    /// before it completes restores the status the session had settled on.
    pub async fn run_search(&self, query: SearchQuery) -> Result<SearchOutcome, CatalogError> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, text = %query.text, "Starting recipe search");

        let mut pending = PendingSearch {
            store: self,
            ticket,
            answered: false,
        };
        self.state.send_modify(|session| session.status = SearchStatus::Loading);

        let response = self.catalog.search(&query).await;
        pending.answered = true;

        let mut applied = false;
        self.state.send_if_modified(|session| {
            if !self.accepts(ticket) {
                return false;
            }
            applied = true;
            match &response {
                Ok(recipes) => {
                    session.replace_results(recipes.clone());
                    session.status = SearchStatus::Ready;
                }
                Err(e) => {
                    session.clear_results();
                    session.status = SearchStatus::Failed(e.to_string());
                }
            }
            self.settle(session.status.clone());
            true
        });

        match response {
            Ok(recipes) if applied => {
                tracing::info!(ticket, "Search applied with {} results", recipes.len());
                Ok(SearchOutcome::Applied { count: recipes.len() })
            }
            Ok(_) => {
                tracing::warn!(ticket, "Discarding results of a superseded search");
                Ok(SearchOutcome::Superseded)
            }
            Err(e) => {
                if applied {
                    tracing::warn!(ticket, "Search failed, results cleared: {}", e);
                } else {
                    tracing::warn!(ticket, "Superseded search failed: {}", e);
                }
                Err(e)
            }
        }
    }

    fn accepts(&self, ticket: u64) -> bool {
        match self.policy {
            SupersedePolicy::DiscardStale => self.latest_ticket.load(Ordering::SeqCst) == ticket,
            SupersedePolicy::LastCompletionWins => true,
        }
    }

    fn settled_status(&self) -> SearchStatus {
        self.settled_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn settle(&self, status: SearchStatus) {
        *self
            .settled_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = status;
    }

    /// Selects the recipe with `id` from the current results, or clears the
    /// selection when no result has that id. Never calls the catalog.
    ///
    /// Observers are only notified when the selection actually changes.
    pub fn select_by_id(&self, id: i64) -> Option<Recipe> {
        let mut selected = None;
        self.state.send_if_modified(|session| {
            selected = session.find(id).cloned();
            if session.selected == selected {
                return false;
            }
            session.selected = selected.clone();
            true
        });

        if selected.is_none() {
            tracing::debug!("Recipe {} is not in the current results; selection cleared", id);
        }
        selected
    }

    /// Fetches ingredients and instructions for `id` and stores them.
    ///
    /// The result entry keeps its id, and its thumbnail when the detail has
    /// none. The selection only moves to the detailed recipe when nothing
    /// else was selected while the detail was loading. Returns `None` when
    /// the results no longer contain `id`; the session is then left as it is.
    pub async fn load_details(&self, id: i64) -> Result<Option<Recipe>, CatalogError> {
        let detailed = self.catalog.recipe_details(id).await?;

        let mut stored = None;
        self.state.send_if_modified(|session| {
            let Some(entry) = session.results.iter_mut().find(|recipe| recipe.id == id) else {
                return false;
            };
            let merged = Recipe {
                id: entry.id,
                image: detailed.image.clone().or_else(|| entry.image.take()),
                ..detailed.clone()
            };
            *entry = merged.clone();

            let other_selection = session
                .selected
                .as_ref()
                .map(|selected| selected.id)
                .filter(|&selected_id| selected_id != id);
            match other_selection {
                Some(other) => tracing::debug!(
                    "Recipe {} was selected while details for {} loaded; keeping it",
                    other,
                    id
                ),
                None => session.selected = Some(merged.clone()),
            }
            stored = Some(merged);
            true
        });

        if stored.is_none() {
            tracing::debug!("Recipe {} left the results before its details arrived", id);
        }
        Ok(stored)
    }
}
