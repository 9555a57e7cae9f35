//! Recipe search
//!
//! Each invocation is independent: primary ingredient search, keyword filter,
//! then a fallback over the known recipe ids. Every `search`/`popular` call
//! takes a generation ticket; results from an invocation that has since been
//! superseded come back as [`SearchOutcome::Superseded`].

use super::client::{MealApi, RecipeError, RecipeResult};
use super::types::Meal;
use futures_util::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default fallback recipe ids
pub const DEFAULT_KNOWN_IDS: [&str; 3] = ["53065", "52795", "52806"];

/// Default dish-name keywords defining the themed subset
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "nyama choma",
    "ugali",
    "sukuma wiki",
    "pilau",
    "chapati",
    "mandazi",
    "githeri",
    "mukimo",
    "samosa",
    "kachumbari",
];

/// What a retry control re-runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    Search(String),
    Popular,
}

/// Result of one search or popular-load invocation
#[derive(Debug)]
pub enum SearchOutcome {
    Found(Vec<Meal>),
    NoResults,
    Failed {
        error: RecipeError,
        retry: RetryAction,
    },
    /// A newer invocation started before this one finished
    Superseded,
}

/// Monotonic invocation token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Search orchestration over a [`MealApi`]
pub struct RecipeSearch<A: MealApi> {
    api: A,
    known_ids: Vec<String>,
    keywords: Vec<String>,
    generation: AtomicU64,
}

impl<A: MealApi> RecipeSearch<A> {
    /// Search with the default ids and keywords
    pub fn new(api: A) -> Self {
        Self::with_reference_lists(api, DEFAULT_KNOWN_IDS, DEFAULT_KEYWORDS)
    }

    pub fn with_reference_lists<I, K>(api: A, known_ids: I, keywords: K) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            api,
            known_ids: known_ids.into_iter().map(Into::into).collect(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn known_ids(&self) -> &[String] {
        &self.known_ids
    }

    /// Start a new invocation, superseding any in flight
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Keywords related to `query`: either one contains the other
    pub fn matching_keywords(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.keywords
            .iter()
            .filter(|k| k.contains(&query) || query.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Ingredient search with keyword filter and known-id fallback
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let ticket = self.begin();
        let query = query.trim();

        if query.is_empty() {
            return self.settle(ticket, SearchOutcome::NoResults);
        }

        let outcome = match self.search_inner(query).await {
            Ok(meals) if meals.is_empty() => SearchOutcome::NoResults,
            Ok(meals) => SearchOutcome::Found(meals),
            Err(error) => {
                tracing::warn!(query, "Recipe search failed: {}", error);
                SearchOutcome::Failed {
                    error,
                    retry: RetryAction::Search(query.to_string()),
                }
            }
        };

        self.settle(ticket, outcome)
    }

    /// All known recipes, unfiltered
    pub async fn popular(&self) -> SearchOutcome {
        let ticket = self.begin();

        let outcome = match self.fetch_known().await {
            Ok(meals) if meals.is_empty() => SearchOutcome::NoResults,
            Ok(meals) => SearchOutcome::Found(meals),
            Err(error) => {
                tracing::warn!("Loading popular recipes failed: {}", error);
                SearchOutcome::Failed {
                    error,
                    retry: RetryAction::Popular,
                }
            }
        };

        self.settle(ticket, outcome)
    }

    /// Run whatever a retry control points at
    pub async fn retry(&self, action: &RetryAction) -> SearchOutcome {
        match action {
            RetryAction::Search(query) => self.search(query).await,
            RetryAction::Popular => self.popular().await,
        }
    }

    /// Full record for one meal
    pub async fn detail(&self, id: &str) -> RecipeResult<Meal> {
        self.api
            .lookup(id)
            .await?
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))
    }

    async fn search_inner(&self, query: &str) -> RecipeResult<Vec<Meal>> {
        let primary = self.api.filter_by_ingredient(query).await?;
        let total = primary.len();

        let relevant: Vec<Meal> = primary
            .into_iter()
            .filter(|m| m.name_matches_any(self.keywords.as_slice()))
            .collect();

        tracing::debug!(query, total, relevant = relevant.len(), "Primary search");

        if !relevant.is_empty() {
            return Ok(relevant);
        }

        self.backup(query).await
    }

    async fn backup(&self, query: &str) -> RecipeResult<Vec<Meal>> {
        let matched = self.matching_keywords(query);
        if matched.is_empty() {
            tracing::debug!(query, "No keyword matches; skipping backup search");
            return Ok(Vec::new());
        }

        tracing::debug!(query, ?matched, "Backup search over known recipes");

        let meals = self.fetch_known().await?;
        Ok(meals
            .into_iter()
            .filter(|m| m.name_matches_any(matched.as_slice()))
            .collect())
    }

    /// Look up every known id concurrently; any failure fails the batch
    async fn fetch_known(&self) -> RecipeResult<Vec<Meal>> {
        let lookups = self.known_ids.iter().map(|id| self.api.lookup(id));
        let results = try_join_all(lookups).await?;

        Ok(results
            .into_iter()
            .zip(&self.known_ids)
            .filter_map(|(meal, id)| {
                if meal.is_none() {
                    tracing::warn!(id = %id, "Known recipe id returned no meal");
                }
                meal
            })
            .collect())
    }

    fn settle(&self, ticket: SearchTicket, outcome: SearchOutcome) -> SearchOutcome {
        if self.is_current(ticket) {
            outcome
        } else {
            tracing::debug!(ticket = ticket.0, "Discarding superseded result");
            SearchOutcome::Superseded
        }
    }
}
