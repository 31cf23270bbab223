//! View data for the recipe list and detail screens.
//!
//! Everything here is a pure function of a [`SearchSession`] snapshot.

use serde::Serialize;

use crate::client::Recipe;
use crate::session::{SearchSession, SearchStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeListItem {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeListView {
    pub items: Vec<RecipeListItem>,
    pub status: SearchStatus,
    /// Shown instead of the list when there is nothing to list
    pub empty_message: Option<String>,
    pub selected_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetailView {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    /// `"- {amount} {name}"` lines, empty when details were never fetched
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub has_details: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "recipe", rename_all = "snake_case")]
pub enum DetailView {
    /// The requested recipe is not the current selection
    Loading,
    Ready(RecipeDetailView),
}

pub fn list_view(session: &SearchSession) -> RecipeListView {
    let items: Vec<RecipeListItem> = session
        .results
        .iter()
        .map(|recipe| RecipeListItem {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
        })
        .collect();

    let empty_message = if items.is_empty() {
        match &session.status {
            SearchStatus::Idle => Some("Search for recipes by ingredient or name".to_string()),
            SearchStatus::Loading => Some("Searching...".to_string()),
            SearchStatus::Ready => Some("No recipes matched your search".to_string()),
            SearchStatus::Failed(reason) => Some(format!("Search failed: {}", reason)),
        }
    } else {
        None
    };

    RecipeListView {
        items,
        status: session.status.clone(),
        empty_message,
        selected_id: session.selected.as_ref().map(|recipe| recipe.id),
    }
}

pub fn detail_view(session: &SearchSession, id: i64) -> DetailView {
    match &session.selected {
        Some(recipe) if recipe.id == id => DetailView::Ready(recipe_detail(recipe)),
        _ => DetailView::Loading,
    }
}

fn recipe_detail(recipe: &Recipe) -> RecipeDetailView {
    let ingredients = recipe
        .ingredients
        .iter()
        .flatten()
        .map(|ingredient| {
            if ingredient.amount.is_empty() {
                format!("- {}", ingredient.name)
            } else {
                format!("- {} {}", ingredient.amount, ingredient.name)
            }
        })
        .collect();

    RecipeDetailView {
        id: recipe.id,
        title: recipe.title.clone(),
        image: recipe.image.clone(),
        ingredients,
        instructions: recipe.instructions.clone(),
        has_details: recipe.has_details(),
    }
}
