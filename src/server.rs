use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::json;

use crate::client::{non_blank, CatalogError, SearchQuery};
use crate::presenter::{self, DetailView, RecipeListView};
use crate::session::{SearchOutcome, SearchSessionStore};

// Parameter structs for tools
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchRecipesParams {
    /// Ingredients or recipe name
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub intolerances: Option<String>,
    #[serde(default)]
    pub include_ingredients: Option<String>,
    #[serde(default)]
    pub exclude_ingredients: Option<String>,
    #[serde(default)]
    pub max_calories: Option<u32>,
}

impl SearchRecipesParams {
    /// Blank optional fields count as absent.
    pub fn into_query(self) -> SearchQuery {
        let blank_to_none = |value: Option<String>| value.as_deref().and_then(non_blank);
        SearchQuery {
            text: self.query,
            cuisine: blank_to_none(self.cuisine),
            diet: blank_to_none(self.diet),
            intolerances: blank_to_none(self.intolerances),
            include_ingredients: blank_to_none(self.include_ingredients),
            exclude_ingredients: blank_to_none(self.exclude_ingredients),
            max_calories: self.max_calories,
        }
    }
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SelectRecipeParams {
    pub id: i64,
    /// Also fetch ingredients and instructions from the catalog
    #[serde(default)]
    pub fetch_details: bool,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetRecipeDetailsParams {
    pub id: i64,
}

/// MCP surface over one shared search session.
///
/// Every connection gets a clone of this server; all clones share the same
/// [`SearchSessionStore`].
#[derive(Clone)]
pub struct RecipeFinderMcpServer {
    store: Arc<SearchSessionStore>,
    tool_router: ToolRouter<RecipeFinderMcpServer>,
}

#[tool_router]
impl RecipeFinderMcpServer {
    pub fn new(store: Arc<SearchSessionStore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    pub fn store(&self) -> &Arc<SearchSessionStore> {
        &self.store
    }

    /// Runs a search and returns the list view it produced.
    ///
    /// A superseded search returns the list view of whichever search did
    /// win, which is what a screen would be showing.
    pub async fn search(&self, params: SearchRecipesParams) -> Result<RecipeListView, CatalogError> {
        let outcome = self.store.run_search(params.into_query()).await?;
        if outcome == SearchOutcome::Superseded {
            tracing::debug!("Search was superseded; returning current results");
        }
        Ok(self.list())
    }

    pub fn list(&self) -> RecipeListView {
        presenter::list_view(&self.store.snapshot())
    }

    pub async fn select(&self, params: SelectRecipeParams) -> Result<DetailView, CatalogError> {
        if self.store.select_by_id(params.id).is_some() && params.fetch_details {
            self.store.load_details(params.id).await?;
        }
        Ok(presenter::detail_view(&self.store.snapshot(), params.id))
    }

    /// Detail screen behaviour: select the recipe unless it already is the selection.
    pub fn details(&self, id: i64) -> DetailView {
        let already_selected = self.store.selected().is_some_and(|recipe| recipe.id == id);
        if !already_selected {
            self.store.select_by_id(id);
        }
        presenter::detail_view(&self.store.snapshot(), id)
    }

    #[tool(description = "Search the recipe catalog by ingredients or name, cuisine, diet and calorie ceiling")]
    async fn search_recipes(
        &self,
        Parameters(params): Parameters<SearchRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: search_recipes");

        match self.search(params).await {
            Ok(view) => json_success(&view),
            Err(e) => catalog_error("Failed to search recipes", &e),
        }
    }

    #[tool(description = "Select a recipe from the current search results and show its details")]
    async fn select_recipe(
        &self,
        Parameters(params): Parameters<SelectRecipeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: select_recipe {}", params.id);

        match self.select(params).await {
            Ok(view) => json_success(&view),
            Err(e) => catalog_error("Failed to load recipe details", &e),
        }
    }

    #[tool(description = "Show the details of a recipe from the current search results")]
    async fn get_recipe_details(
        &self,
        Parameters(params): Parameters<GetRecipeDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        json_success(&self.details(params.id))
    }

    #[tool(description = "Get the results of the most recent search")]
    async fn get_search_results(&self) -> Result<CallToolResult, McpError> {
        json_success(&self.list())
    }
}

fn json_success<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to encode response: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn catalog_error(message: &str, e: &CatalogError) -> Result<CallToolResult, McpError> {
    tracing::error!("{}: {}", message, e);

    let suggestion = match e {
        CatalogError::RequestFailure(_) => "Check network connectivity and SPOONACULAR_BASE_URL",
        _ => match e.status().map(|s| s.as_u16()) {
            Some(401) => "Check that SPOONACULAR_API_KEY is valid",
            Some(402) => "The daily catalog quota is exhausted; try again tomorrow",
            Some(404) => "The recipe no longer exists in the catalog",
            _ => "Check server logs for more details",
        },
    };

    let error = json!({
        "error": message,
        "details": e.to_string(),
        "suggestion": suggestion
    });
    Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
}

#[tool_handler]
impl ServerHandler for RecipeFinderMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server searches a recipe catalog and keeps one search session: run search_recipes to fill the result list, then select_recipe or get_recipe_details to view a recipe from it. get_search_results shows the current list.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
