//! Memories Journal
//!
//! - **types**: `MemoryEntry` and `NewMemory`
//! - **store**: the write-through `Journal` over a key-value store
//! - **view**: view models, the form panel and the `JournalScreen` session
//! - **celebrate**: the confetti burst played on save
//!
//! # Example
//!
//! ```rust
//! use keepsake::journal::{render_journal, Journal, NewMemory};
//! use keepsake::storage::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let mut journal = Journal::load(&store).unwrap();
//! journal.create(NewMemory::new("Beach", "2024-03-05", "Sunset swim")).unwrap();
//!
//! let view = render_journal(journal.entries());
//! assert_eq!(view.cards()[0].date_label, "March 5, 2024");
//! ```

pub mod celebrate;
pub mod error;
pub mod store;
pub mod types;
pub mod view;

pub use celebrate::{Celebration, Particle, CONFETTI_COLORS};
pub use error::{JournalError, JournalResult};
pub use store::{Journal, MEMORIES_KEY};
pub use types::{MemoryEntry, NewMemory};
pub use view::{
    format_date, render_journal, FormPanel, JournalScreen, JournalView, MemoryCard, PanelState,
};
