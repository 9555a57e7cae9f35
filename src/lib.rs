//! # Keepsake
//!
//! A personal memories journal with a themed recipe finder.
//!
//! ## Features
//!
//! - **Journal**: newest-first memory entries, written through to a local key-value store
//! - **Theme**: persisted light/dark preference
//! - **Recipes**: TheMealDB search restricted to a keyword-defined set of dishes,
//!   with a known-recipe fallback and stale-result suppression
//! - **Views**: UI-independent view models plus a terminal renderer
//!
//! ## Modules
//!
//! - [`storage`]: Key-value stores (file-backed and in-memory)
//! - [`journal`]: Journal store, views and celebration burst
//! - [`theme`]: Theme switcher
//! - [`recipes`]: Recipe API client, search and views
//! - [`config`]: TOML + environment configuration
//! - [`terminal`]: Text rendering for the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keepsake::journal::{Journal, NewMemory};
//! use keepsake::recipes::{MealDbClient, MealDbConfig, RecipeSearch, SearchOutcome};
//! use keepsake::storage::FileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./keepsake_data")?;
//!
//!     let mut journal = Journal::load(&store)?;
//!     journal.create(NewMemory::new("Safari", "2024-08-10", "Lions at dawn"))?;
//!
//!     let search = RecipeSearch::new(MealDbClient::new(MealDbConfig::default())?);
//!     if let SearchOutcome::Found(meals) = search.search("nyama").await {
//!         println!("Found {} dishes", meals.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod journal;
pub mod recipes;
pub mod storage;
pub mod terminal;
pub mod theme;

// Re-export top-level types for convenience
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use journal::{
    Celebration, Journal, JournalError, JournalScreen, JournalView, MemoryEntry, NewMemory,
};

pub use theme::{Theme, ThemeSwitcher, ThemeToggles};

pub use recipes::{
    MealApi, MealDbClient, RecipeBoard, RecipeError, RecipeSearch, RecipeView, SearchOutcome,
};

pub use config::{
    Config, ConfigError, Discovered, LoggingConfig, RecipesConfig, StorageConfig,
};
