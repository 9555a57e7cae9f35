//! Journal View
//!
//! Pure rendering from journal state to a declarative view model, plus the
//! two UI state machines around it: the entry form panel and the delete
//! exit transition. Transitions never complete on a timer; the host calls
//! the `*_finished` signal once its animation has actually ended.

use super::celebrate::Celebration;
use super::error::JournalResult;
use super::store::Journal;
use super::types::{MemoryEntry, NewMemory};
use crate::storage::KeyValueStore;
use chrono::{DateTime, NaiveDate};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

/// Placeholder shown when the journal is empty
pub const EMPTY_MESSAGE: &str = "No memories yet. Start capturing your special moments!";

/// Label of the per-card delete control
pub const DELETE_LABEL: &str = "Delete Memory";

/// Shown for dates that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// One rendered memory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryCard {
    pub id: i64,
    pub title: String,
    pub date_label: String,
    pub content: String,
    pub delete_label: &'static str,
    /// Card is playing its exit animation
    pub exiting: bool,
}

impl MemoryCard {
    fn from_entry(entry: &MemoryEntry, exiting: bool) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            date_label: format_date(&entry.date),
            content: entry.content.clone(),
            delete_label: DELETE_LABEL,
            exiting,
        }
    }
}

/// What the memories list shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalView {
    Empty { message: &'static str },
    Cards(Vec<MemoryCard>),
}

impl JournalView {
    pub fn cards(&self) -> &[MemoryCard] {
        match self {
            JournalView::Empty { .. } => &[],
            JournalView::Cards(cards) => cards,
        }
    }
}

/// Render entries in stored order
pub fn render_journal(entries: &[MemoryEntry]) -> JournalView {
    render_with_exiting(entries, &BTreeSet::new())
}

fn render_with_exiting(entries: &[MemoryEntry], exiting: &BTreeSet<i64>) -> JournalView {
    if entries.is_empty() {
        return JournalView::Empty {
            message: EMPTY_MESSAGE,
        };
    }

    JournalView::Cards(
        entries
            .iter()
            .map(|e| MemoryCard::from_entry(e, exiting.contains(&e.id)))
            .collect(),
    )
}

/// Calendar layouts accepted for typed-in dates
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Long-form date label, e.g. `2024-03-05` -> "March 5, 2024"
///
/// Accepts ISO and slash-separated calendar dates, US `MM/DD/YYYY`, month
/// names ("March 5, 2024", "Mar 5 2024") and RFC 3339 timestamps; anything
/// else renders as "Invalid Date".
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()));

    match parsed {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Visibility of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Hidden,
    Opening,
    Open,
    Closing,
}

/// The show/hide entry form
#[derive(Debug, Clone)]
pub struct FormPanel {
    state: PanelState,
    draft: NewMemory,
}

impl Default for FormPanel {
    fn default() -> Self {
        Self {
            state: PanelState::Hidden,
            draft: NewMemory::default(),
        }
    }
}

impl FormPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn draft(&self) -> &NewMemory {
        &self.draft
    }

    /// Whether the "new memory" button is shown
    pub fn new_button_visible(&self) -> bool {
        self.state == PanelState::Hidden
    }

    pub fn form_visible(&self) -> bool {
        self.state != PanelState::Hidden
    }

    pub fn show(&mut self) {
        if matches!(self.state, PanelState::Hidden | PanelState::Closing) {
            self.state = PanelState::Opening;
        }
    }

    pub fn hide(&mut self) {
        if matches!(self.state, PanelState::Open | PanelState::Opening) {
            self.state = PanelState::Closing;
        }
    }

    /// Update the draft. Ignored while the form is hidden.
    pub fn set_draft(&mut self, draft: NewMemory) -> bool {
        if !self.form_visible() {
            return false;
        }
        self.draft = draft;
        true
    }

    /// Completion signal for the running transition
    ///
    /// Finishing a close discards the draft.
    pub fn transition_finished(&mut self) {
        match self.state {
            PanelState::Opening => self.state = PanelState::Open,
            PanelState::Closing => {
                self.state = PanelState::Hidden;
                self.draft = NewMemory::default();
            }
            PanelState::Hidden | PanelState::Open => {}
        }
    }
}

/// The journal page: store, form and in-flight card exits
pub struct JournalScreen<S: KeyValueStore> {
    journal: Journal<S>,
    form: FormPanel,
    exiting: BTreeSet<i64>,
}

impl<S: KeyValueStore> JournalScreen<S> {
    pub fn new(journal: Journal<S>) -> Self {
        Self {
            journal,
            form: FormPanel::new(),
            exiting: BTreeSet::new(),
        }
    }

    pub fn journal(&self) -> &Journal<S> {
        &self.journal
    }

    pub fn form(&self) -> &FormPanel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormPanel {
        &mut self.form
    }

    /// Save the current draft, start closing the form, and return the burst to play
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> JournalResult<(MemoryEntry, Celebration)> {
        let entry = self.journal.create(self.form.draft().clone())?;
        self.form.hide();
        Ok((entry, Celebration::burst(rng)))
    }

    /// Start the exit animation for a card. Returns `false` for unknown ids;
    /// repeating a request for a card that is already exiting is harmless.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.journal.get(id).is_none() {
            return false;
        }
        self.exiting.insert(id);
        true
    }

    /// Completion signal for a card exit; performs the actual delete
    pub fn exit_finished(&mut self, id: i64) -> JournalResult<bool> {
        if !self.exiting.remove(&id) {
            return Ok(false);
        }
        self.journal.delete(id)
    }

    pub fn view(&self) -> JournalView {
        render_with_exiting(self.journal.entries(), &self.exiting)
    }
}
