//! Recipe Finder
//!
//! Searches TheMealDB for dishes in a themed subset and renders the results.
//!
//! ## Architecture
//!
//! - **Client**: `MealApi` trait and the reqwest-backed `MealDbClient`
//! - **Search**: primary search, keyword filter, known-id fallback, popular load
//! - **View**: result board, cards and the detail overlay
//!
//! ## Search Flow
//!
//! 1. Filter-by-ingredient request, keep names containing a keyword
//! 2. Nothing relevant: match the query against the keywords
//! 3. Any keyword matched: look up the known ids concurrently and keep matches
//! 4. Otherwise: no results

mod client;
mod search;
mod types;
mod view;

pub use client::{MealApi, MealDbClient, MealDbConfig, RecipeError, RecipeResult};
pub use search::{
    RecipeSearch, RetryAction, SearchOutcome, SearchTicket, DEFAULT_KEYWORDS, DEFAULT_KNOWN_IDS,
};
pub use types::{Meal, MAX_INGREDIENTS};
pub use view::{
    ingredient_lines, ClickTarget, DetailOverlay, RecipeBoard, RecipeCard, RecipeDetailView,
    RecipeView,
};
