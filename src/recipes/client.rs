//! TheMealDB REST API client
//!
//! HTTP client for the public, unauthenticated meal database. Only the two
//! read endpoints the recipe finder needs are wrapped.

use super::types::{Meal, MealsResponse};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Read access to a meal database
#[async_trait]
pub trait MealApi: Send + Sync {
    /// Meals using `ingredient`. An empty result is `Ok(vec![])`.
    async fn filter_by_ingredient(&self, ingredient: &str) -> RecipeResult<Vec<Meal>>;

    /// Full record for `id`, or `None` when the API has no such meal
    async fn lookup(&self, id: &str) -> RecipeResult<Option<Meal>>;
}

/// Configuration for the MealDB client
#[derive(Debug, Clone)]
pub struct MealDbConfig {
    /// Base URL, e.g. "https://www.themealdb.com/api/json/v1/1"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.themealdb.com/api/json/v1/1".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed [`MealApi`]
pub struct MealDbClient {
    client: Client,
    config: MealDbConfig,
}

impl MealDbClient {
    pub fn new(config: MealDbConfig) -> RecipeResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("Keepsake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RecipeError::Request)?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), name)
    }

    async fn get_meals(&self, endpoint: &str, param: &str) -> RecipeResult<Vec<Meal>> {
        let url = self.endpoint(endpoint);
        tracing::debug!(%url, param, "Requesting meals");

        let response = self
            .client
            .get(&url)
            .query(&[("i", param)])
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RecipeError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(classify)?;
        let parsed: MealsResponse =
            serde_json::from_str(&body).map_err(|e| RecipeError::Parse(e.to_string()))?;

        Ok(parsed.meals.unwrap_or_default())
    }
}

#[async_trait]
impl MealApi for MealDbClient {
    async fn filter_by_ingredient(&self, ingredient: &str) -> RecipeResult<Vec<Meal>> {
        self.get_meals("filter.php", ingredient).await
    }

    async fn lookup(&self, id: &str) -> RecipeResult<Option<Meal>> {
        Ok(self.get_meals("lookup.php", id).await?.into_iter().next())
    }
}

fn classify(e: reqwest::Error) -> RecipeError {
    if e.is_timeout() {
        RecipeError::Timeout
    } else if e.is_connect() {
        RecipeError::Unavailable
    } else {
        RecipeError::Request(e)
    }
}

/// Errors that can occur when talking to the recipe API
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// Result type alias for recipe operations
pub type RecipeResult<T> = Result<T, RecipeError>;
