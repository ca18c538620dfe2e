use crate::api::Image;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SearchIntent {
    Toggle,
    /// Open with every filter and result cleared.
    Open,
    Close,
    Input(char),
    Backspace,
    FocusNext,
    FocusPrev,
    ToggleFavorite,
    MoveUp,
    MoveDown,
    Started { seq: u64 },
    Results { seq: u64, images: Vec<Image> },
    Failed { seq: u64 },
}

impl Intent for SearchIntent {}

impl SearchIntent {
    /// Edits re-arm the debounce timer.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            SearchIntent::Input(_) | SearchIntent::Backspace | SearchIntent::ToggleFavorite
        )
    }
}
