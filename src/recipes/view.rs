//! Recipe View
//!
//! View models for the recipe finder: the results board (grid or one of the
//! loading/empty/error states) and the detail overlay.

use super::search::{RetryAction, SearchOutcome};
use super::types::{Meal, MAX_INGREDIENTS};
use serde::Serialize;

/// Category label for records that carry none
pub const DEFAULT_CATEGORY: &str = "Kenyan Dish";

pub const VIEW_RECIPE_LABEL: &str = "View Recipe";

pub const NO_RESULTS_MESSAGE: &str =
    "No recipes found for that ingredient. Try something else or browse the popular dishes.";

pub const CONNECTION_ERROR_TITLE: &str = "Connection Error";

pub const CONNECTION_ERROR_MESSAGE: &str =
    "We couldn't reach the recipe service. Check your connection and try again.";

/// One result card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub action_label: &'static str,
}

impl From<&Meal> for RecipeCard {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id.clone(),
            name: meal.name.clone(),
            thumbnail: meal.thumbnail.clone(),
            category: meal
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            action_label: VIEW_RECIPE_LABEL,
        }
    }
}

/// What the results area shows
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeView {
    Loading,
    Grid(Vec<RecipeCard>),
    Empty {
        message: &'static str,
        retry: RetryAction,
    },
    Error {
        title: &'static str,
        message: &'static str,
        retry: RetryAction,
    },
}

impl RecipeView {
    /// Map a settled outcome; `None` for superseded invocations
    pub fn from_outcome(outcome: &SearchOutcome) -> Option<Self> {
        match outcome {
            SearchOutcome::Found(meals) => {
                Some(RecipeView::Grid(meals.iter().map(RecipeCard::from).collect()))
            }
            SearchOutcome::NoResults => Some(RecipeView::Empty {
                message: NO_RESULTS_MESSAGE,
                retry: RetryAction::Popular,
            }),
            SearchOutcome::Failed { retry, .. } => Some(RecipeView::Error {
                title: CONNECTION_ERROR_TITLE,
                message: CONNECTION_ERROR_MESSAGE,
                retry: retry.clone(),
            }),
            SearchOutcome::Superseded => None,
        }
    }

    pub fn retry_action(&self) -> Option<&RetryAction> {
        match self {
            RecipeView::Empty { retry, .. } | RecipeView::Error { retry, .. } => Some(retry),
            RecipeView::Loading | RecipeView::Grid(_) => None,
        }
    }
}

/// Holder of the currently displayed results
#[derive(Debug, Clone)]
pub struct RecipeBoard {
    view: RecipeView,
}

impl Default for RecipeBoard {
    fn default() -> Self {
        Self {
            view: RecipeView::Loading,
        }
    }
}

impl RecipeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &RecipeView {
        &self.view
    }

    pub fn begin_loading(&mut self) {
        self.view = RecipeView::Loading;
    }

    /// Display an outcome. Returns `false` if it was superseded and ignored.
    pub fn apply(&mut self, outcome: &SearchOutcome) -> bool {
        match RecipeView::from_outcome(outcome) {
            Some(view) => {
                self.view = view;
                true
            }
            None => false,
        }
    }

    pub fn retry_action(&self) -> Option<&RetryAction> {
        self.view.retry_action()
    }
}

/// Expanded single recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetailView {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

impl RecipeDetailView {
    pub fn from_meal(meal: &Meal) -> Self {
        Self {
            id: meal.id.clone(),
            name: meal.name.clone(),
            thumbnail: meal.thumbnail.clone(),
            category: meal
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            ingredients: ingredient_lines(meal),
            instructions: meal.instructions.clone().unwrap_or_default(),
        }
    }
}

/// `"{measure} {ingredient}"` for slots 1..=20, skipping blank ingredients
pub fn ingredient_lines(meal: &Meal) -> Vec<String> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|i| {
            let ingredient = meal.ingredient(i)?;
            let line = match meal.measure(i) {
                Some(measure) => format!("{} {}", measure, ingredient),
                None => ingredient.to_string(),
            };
            Some(line)
        })
        .collect()
}

/// Where a click inside the overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the modal
    Backdrop,
    /// Inside the modal content
    Content,
}

/// The detail modal
#[derive(Debug, Clone, Default)]
pub struct DetailOverlay {
    open: Option<RecipeDetailView>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, detail: RecipeDetailView) {
        self.open = Some(detail);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&RecipeDetailView> {
        self.open.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::client::RecipeError;
    use crate::recipes::search::tests::meal;
    use serde_json::json;

    fn detail_meal() -> Meal {
        serde_json::from_value(json!({
            "idMeal": "7",
            "strMeal": "Pilau",
            "strCategory": null,
            "strInstructions": "Toast the spices.",
            "strIngredient1": "Beef",
            "strMeasure1": "500g",
            "strIngredient2": "Pilau masala",
            "strMeasure2": "",
            "strIngredient3": "Rice",
            "strMeasure3": "2 cups",
            "strIngredient4": "",
            "strMeasure4": "1 tsp",
            "strIngredient5": null,
            "strIngredient20": "Salt",
            "strMeasure20": "pinch"
        }))
        .unwrap()
    }

    #[test]
    fn test_ingredient_lines() {
        let lines = ingredient_lines(&detail_meal());
        assert_eq!(
            lines,
            vec!["500g Beef", "Pilau masala", "2 cups Rice", "pinch Salt"]
        );
    }

    #[test]
    fn test_detail_view() {
        let detail = RecipeDetailView::from_meal(&detail_meal());
        assert_eq!(detail.name, "Pilau");
        assert_eq!(detail.category, DEFAULT_CATEGORY);
        assert_eq!(detail.instructions, "Toast the spices.");
        assert_eq!(detail.ingredients[2], "2 cups Rice");
    }

    #[test]
    fn test_board_states() {
        let mut board = RecipeBoard::new();
        assert_eq!(board.view(), &RecipeView::Loading);

        assert!(board.apply(&SearchOutcome::Found(vec![meal("1", "Nyama Choma")])));
        match board.view() {
            RecipeView::Grid(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].category, "Beef");
                assert_eq!(cards[0].action_label, "View Recipe");
            }
            other => panic!("expected grid, got {:?}", other),
        }
        assert_eq!(board.retry_action(), None);

        assert!(board.apply(&SearchOutcome::NoResults));
        assert_eq!(board.retry_action(), Some(&RetryAction::Popular));

        assert!(board.apply(&SearchOutcome::Failed {
            error: RecipeError::Timeout,
            retry: RetryAction::Search("beef".into()),
        }));
        assert!(matches!(
            board.view(),
            RecipeView::Error { title: "Connection Error", .. }
        ));
        assert_eq!(
            board.retry_action(),
            Some(&RetryAction::Search("beef".into()))
        );

        board.begin_loading();
        assert_eq!(board.view(), &RecipeView::Loading);
    }

    #[test]
    fn test_board_ignores_superseded() {
        let mut board = RecipeBoard::new();
        board.apply(&SearchOutcome::Found(vec![meal("1", "Ugali")]));

        assert!(!board.apply(&SearchOutcome::Superseded));
        assert!(matches!(board.view(), RecipeView::Grid(cards) if cards[0].name == "Ugali"));
    }

    #[test]
    fn test_overlay_close_behaviour() {
        let mut overlay = DetailOverlay::new();
        overlay.open(RecipeDetailView::from_meal(&detail_meal()));
        assert!(overlay.is_open());

        overlay.click(ClickTarget::Content);
        assert!(overlay.is_open());

        overlay.click(ClickTarget::Backdrop);
        assert!(!overlay.is_open());

        overlay.open(RecipeDetailView::from_meal(&detail_meal()));
        overlay.close();
        assert!(overlay.current().is_none());
    }
}
