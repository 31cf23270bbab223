use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::client::{
    config::CatalogConfig,
    error::{CatalogError, ResponseFailure},
    types::*,
};

const SEARCH_PATH: &str = "recipes/complexSearch";

/// A source of recipes. The session store only talks to the catalog through
/// this trait, so tests can substitute a scripted double.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Runs one search. Attempted exactly once.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, CatalogError>;

    /// Fetches a recipe with ingredients and instructions filled in.
    async fn recipe_details(&self, id: i64) -> Result<Recipe, CatalogError>;
}

pub struct RecipeCatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl RecipeCatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(CatalogError::RequestFailure)?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Full request URL for `path` with the credential first and `params` after it.
    fn request_url(&self, path: &str, params: &[(&'static str, String)]) -> String {
        let mut url = format!(
            "{}/{}?apiKey={}",
            self.config.base_url(),
            path,
            urlencoding::encode(self.config.api_key())
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, CatalogError> {
        let url = self.request_url(path, params);

        // The URL carries the credential; log the path and parameters only.
        tracing::debug!(path, ?params, "Requesting recipe catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL so the credential never reaches logs or callers.
                let e = e.without_url();
                tracing::error!("Network error calling recipe catalog: {}", e);
                CatalogError::RequestFailure(e)
            })?;

        let status = response.status();
        tracing::debug!("Recipe catalog response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!("Recipe catalog request failed with status {}: {}", status, body);
            return Err(ResponseFailure::Status { status, body }.into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::RequestFailure(e.without_url()))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse recipe catalog response: {}", e);
            ResponseFailure::MalformedBody(e).into()
        })
    }
}

#[async_trait]
impl RecipeCatalog for RecipeCatalogClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, CatalogError> {
        let response: SearchResponse = self.get_json(SEARCH_PATH, &query.query_pairs()).await?;
        tracing::debug!("Recipe catalog returned {} results", response.results.len());
        Ok(response.results)
    }

    async fn recipe_details(&self, id: i64) -> Result<Recipe, CatalogError> {
        let path = format!("recipes/{}/information", id);
        let info: RecipeInformation = self.get_json(&path, &[]).await?;
        tracing::debug!(
            "Fetched details for recipe {} ({} ingredients)",
            info.id,
            info.extended_ingredients.len()
        );
        Ok(info.into())
    }
}
