//! # Recipe Finder
//!
//! Search a remote recipe catalog by ingredients, cuisine, diet and calorie
//! ceiling, and view the details of a selected recipe.
//!
//! ## Client Module
//!
//! The [`client`] module wraps the catalog's search and detail endpoints and
//! maps their JSON into typed [`client::Recipe`] records.
//!
//! ## Session Module
//!
//! The [`session`] module holds the process-wide search session: the latest
//! results, the selected recipe and the search status. Observers are
//! notified through a watch channel.
//!
//! ## Presenter and Server
//!
//! The [`presenter`] module projects a session snapshot into list and detail
//! views, and the [`server`] module exposes search and selection as MCP tools.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use recipe_finder::{CatalogConfig, RecipeCatalogClient, SearchQuery, SearchSessionStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RecipeCatalogClient::new(CatalogConfig::from_env()?)?;
//! let store = SearchSessionStore::new(Arc::new(client));
//!
//! store.run_search(SearchQuery::new("chickpea").diet("vegan").max_calories(600)).await?;
//! if let Some(first) = store.results().first() {
//!     store.select_by_id(first.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod presenter;
pub mod server;
pub mod session;

pub use client::{CatalogConfig, RecipeCatalog, RecipeCatalogClient, SearchQuery};
pub use server::RecipeFinderMcpServer;
pub use session::SearchSessionStore;
