//! Recipe records as supplied by TheMealDB

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Highest numbered ingredient/measure slot in a record
pub const MAX_INGREDIENTS: usize = 20;

/// A meal record
///
/// Filter responses only carry id, name and thumbnail; lookup responses add
/// the category, instructions and the numbered `strIngredientN` /
/// `strMeasureN` fields, which are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Meal {
    /// Ingredient in slot `index` (1-based), if present and non-blank
    pub fn ingredient(&self, index: usize) -> Option<&str> {
        self.field(&format!("strIngredient{}", index))
    }

    /// Measure in slot `index` (1-based), if present and non-blank
    pub fn measure(&self, index: usize) -> Option<&str> {
        self.field(&format!("strMeasure{}", index))
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Case-insensitive check against a list of lower-cased keywords
    pub fn name_matches_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let name = self.name.to_lowercase();
        keywords.iter().any(|k| name.contains(k.as_ref()))
    }
}

/// Envelope of both endpoints: `{ "meals": [...] | null }`
#[derive(Debug, Deserialize)]
pub(crate) struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<Meal>>,
}
