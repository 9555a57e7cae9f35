//! Keepsake Storage
//!
//! A small string key-value layer standing in for browser local storage:
//!
//! - **kv**: the `KeyValueStore` trait, a file-backed store and an in-memory store
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   memories.json   serialized array of memory entries (newest first)
//!   theme.json      "light" | "dark"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use keepsake::storage::{FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./data")?;
//!     store.set("theme", "dark")?;
//!     assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
