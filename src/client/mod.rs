//! # Recipe Catalog Client
//!
//! This module provides a typed HTTP client for the Spoonacular recipe catalog.
//!
//! ## Modules
//!
//! - [`client`] - The [`RecipeCatalog`] trait and its HTTP implementation
//! - [`config`] - Base URL, credential and timeout, loaded from the environment
//! - [`error`] - Request/response failure taxonomy
//! - [`types`] - Recipes, queries and response wrappers
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_finder::client::{CatalogConfig, RecipeCatalog, RecipeCatalogClient, SearchQuery};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RecipeCatalogClient::new(CatalogConfig::from_env()?)?;
//!
//! let recipes = client.search(&SearchQuery::new("pasta").cuisine("Italian")).await?;
//! println!("Found {} recipes", recipes.len());
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{RecipeCatalog, RecipeCatalogClient};
pub use config::CatalogConfig;
pub use error::{CatalogError, ConfigError, ResponseFailure};
pub use types::*;
