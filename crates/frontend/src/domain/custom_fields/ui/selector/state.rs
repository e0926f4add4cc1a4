use contracts::domain::custom_fields::{CustomField, DisplayFieldRef, PageCursor};
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct SelectorState {
    pub catalog: Vec<CustomField>,
    pub search_query: String,
    pub cursor: PageCursor,
    pub is_loaded: bool,
}

/// The saved-fields grid paginates independently of the selector table.
#[derive(Clone, Debug, Default)]
pub struct SavedGridState {
    pub items: Vec<DisplayFieldRef>,
    pub cursor: PageCursor,
}

pub fn create_state() -> RwSignal<SelectorState> {
    RwSignal::new(SelectorState::default())
}

pub fn create_saved_state() -> RwSignal<SavedGridState> {
    RwSignal::new(SavedGridState::default())
}
