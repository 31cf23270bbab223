#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use recipe_finder::client::{
    CatalogConfig, CatalogError, Ingredient, Recipe, RecipeCatalog, RecipeCatalogClient,
    ResponseFailure, SearchQuery,
};
use tokio::sync::{mpsc, oneshot};

pub const TEST_API_KEY: &str = "test-key";

pub type SearchResult = Result<Vec<Recipe>, CatalogError>;

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub fn recipe(id: i64, title: &str) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        image: Some(format!("https://img.example/{}.jpg", id)),
        ingredients: None,
        instructions: None,
    }
}

pub fn detailed_recipe(id: i64, title: &str) -> Recipe {
    Recipe {
        ingredients: Some(vec![
            Ingredient {
                amount: "200 g".to_string(),
                name: "spaghetti".to_string(),
            },
            Ingredient {
                amount: "2".to_string(),
                name: "eggs".to_string(),
            },
        ]),
        instructions: Some("Boil the pasta. Mix with eggs.".to_string()),
        ..recipe(id, title)
    }
}

pub fn server_error() -> CatalogError {
    ResponseFailure::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
    .into()
}

/// HTTP client pointed at a mockito server.
pub fn client_for(server: &mockito::ServerGuard) -> RecipeCatalogClient {
    let config = CatalogConfig::new(&server.url(), TEST_API_KEY).expect("valid test config");
    RecipeCatalogClient::new(config).expect("client builds")
}

pub type DetailResult = Result<Recipe, CatalogError>;

enum Scripted {
    Immediate(SearchResult),
    Gated(oneshot::Receiver<SearchResult>),
}

enum ScriptedDetail {
    Ready(Recipe),
    Gated(oneshot::Receiver<DetailResult>),
}

/// In-memory catalog with per-query scripted responses.
///
/// A gated response is held until the test releases it, which makes
/// overlapping searches deterministic. Every search reports its query text
/// on the `started` channel once it has reached the catalog; detail fetches
/// report `details:{id}`.
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, Scripted>>,
    details: Mutex<HashMap<i64, ScriptedDetail>>,
    started: mpsc::UnboundedSender<String>,
    calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        let catalog = Arc::new(Self {
            searches: Mutex::new(HashMap::new()),
            details: Mutex::new(HashMap::new()),
            started,
            calls: AtomicUsize::new(0),
        });
        (catalog, started_rx)
    }

    pub fn respond(&self, text: &str, result: SearchResult) {
        self.searches
            .lock()
            .unwrap()
            .insert(text.to_string(), Scripted::Immediate(result));
    }

    pub fn gate(&self, text: &str) -> oneshot::Sender<SearchResult> {
        let (tx, rx) = oneshot::channel();
        self.searches
            .lock()
            .unwrap()
            .insert(text.to_string(), Scripted::Gated(rx));
        tx
    }

    pub fn with_details(&self, recipe: Recipe) {
        self.with_details_for(recipe.id, recipe);
    }

    /// Answers detail requests for `id` with `recipe`, whatever its own id.
    pub fn with_details_for(&self, id: i64, recipe: Recipe) {
        self.details
            .lock()
            .unwrap()
            .insert(id, ScriptedDetail::Ready(recipe));
    }

    pub fn gate_details(&self, id: i64) -> oneshot::Sender<DetailResult> {
        let (tx, rx) = oneshot::channel();
        self.details
            .lock()
            .unwrap()
            .insert(id, ScriptedDetail::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeCatalog for ScriptedCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.searches.lock().unwrap().remove(&query.text);
        let _ = self.started.send(query.text.clone());

        match scripted {
            Some(Scripted::Immediate(result)) => result,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
            None => Ok(Vec::new()),
        }
    }

    async fn recipe_details(&self, id: i64) -> Result<Recipe, CatalogError> {
        let scripted = {
            let mut details = self.details.lock().unwrap();
            if matches!(details.get(&id), Some(ScriptedDetail::Gated(_))) {
                details.remove(&id)
            } else if let Some(ScriptedDetail::Ready(recipe)) = details.get(&id) {
                Some(ScriptedDetail::Ready(recipe.clone()))
            } else {
                None
            }
        };
        let _ = self.started.send(format!("details:{}", id));

        match scripted {
            Some(ScriptedDetail::Ready(recipe)) => Ok(recipe),
            Some(ScriptedDetail::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(not_found(id))),
            None => Err(not_found(id)),
        }
    }
}

fn not_found(id: i64) -> CatalogError {
    ResponseFailure::Status {
        status: reqwest::StatusCode::NOT_FOUND,
        body: format!("recipe {} not found", id),
    }
    .into()
}
