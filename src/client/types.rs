//! Type definitions for the recipe catalog API.
//!
//! Response types are deliberately lenient: the catalog returns many more
//! fields than the finder uses, and everything unknown is ignored.
//!
//! ## Key Types
//!
//! - [`Recipe`] - A catalog entry, optionally carrying ingredient and instruction detail
//! - [`SearchQuery`] - The structured search a user submits
//! - [`SearchResponse`] - Wrapper around the `results` array of `complexSearch`
//! - [`RecipeInformation`] - Detail payload of `recipes/{id}/information`

use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity and unit as display text, e.g. `"2 cups"`
    pub amount: String,
    /// Ingredient name
    pub name: String,
}

/// A recipe as returned by the catalog.
///
/// Search responses only carry `id`, `title` and `image`. `ingredients` and
/// `instructions` are filled in once the detail endpoint has been queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier assigned by the catalog
    pub id: i64,
    /// Display title
    pub title: String,
    /// Thumbnail URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Recipe {
    pub fn has_details(&self) -> bool {
        self.ingredients.is_some() || self.instructions.is_some()
    }
}

/// Body of a `recipes/complexSearch` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Recipe>,
}

/// One entry of `extendedIngredients` in a detail response.
#[derive(Debug, Deserialize)]
pub struct ExtendedIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl ExtendedIngredient {
    /// Renders amount and unit as one display string: `2.0` + `cups` -> `"2 cups"`.
    pub fn display_amount(&self) -> String {
        let amount = self.amount.map(format_amount).unwrap_or_default();
        match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() && !amount.is_empty() => format!("{} {}", amount, unit),
            Some(unit) if !unit.is_empty() => unit.to_string(),
            _ => amount,
        }
    }
}

fn format_amount(amount: f64) -> String {
    let text = format!("{:.3}", amount);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    // A non-zero quantity never displays as zero
    if trimmed == "0" && amount != 0.0 {
        amount.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Body of a `recipes/{id}/information` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl From<RecipeInformation> for Recipe {
    fn from(info: RecipeInformation) -> Self {
        let ingredients = info
            .extended_ingredients
            .iter()
            .map(|ingredient| Ingredient {
                amount: ingredient.display_amount(),
                name: ingredient.name.clone(),
            })
            .collect();

        Recipe {
            id: info.id,
            title: info.title,
            image: info.image,
            ingredients: Some(ingredients),
            instructions: info.instructions.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// A structured recipe search.
///
/// `text` is always sent; every other field is only sent when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Ingredients or recipe name (may be empty)
    pub text: String,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub intolerances: Option<String>,
    pub include_ingredients: Option<String>,
    pub exclude_ingredients: Option<String>,
    /// Upper calorie bound per serving
    pub max_calories: Option<u32>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builds a query from the two-field search form: a blank cuisine means "any".
    pub fn from_form(text: &str, cuisine: &str) -> Self {
        Self::new(text).cuisine_opt(non_blank(cuisine))
    }

    pub fn cuisine(self, cuisine: impl Into<String>) -> Self {
        self.cuisine_opt(Some(cuisine.into()))
    }

    pub fn cuisine_opt(mut self, cuisine: Option<String>) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn intolerances(mut self, intolerances: impl Into<String>) -> Self {
        self.intolerances = Some(intolerances.into());
        self
    }

    pub fn include_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.include_ingredients = Some(ingredients.into());
        self
    }

    pub fn exclude_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.exclude_ingredients = Some(ingredients.into());
        self
    }

    pub fn max_calories(mut self, max_calories: u32) -> Self {
        self.max_calories = Some(max_calories);
        self
    }

    /// Query parameters under the catalog's names, in a stable order.
    /// Absent fields are omitted. The credential is not included.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("query", self.text.clone())];
        let optional = [
            ("cuisine", &self.cuisine),
            ("diet", &self.diet),
            ("intolerances", &self.intolerances),
            ("includeIngredients", &self.include_ingredients),
            ("excludeIngredients", &self.exclude_ingredients),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                pairs.push((name, value.clone()));
            }
        }
        if let Some(max_calories) = self.max_calories {
            pairs.push(("maxCalories", max_calories.to_string()));
        }
        pairs
    }
}

/// Maps blank form input to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
