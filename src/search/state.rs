use crate::api::{Image, SearchQuery};
use crate::mvi::UiState;

/// Input focused inside the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Query,
    Tags,
    Person,
    Favorite,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Query,
        SearchField::Tags,
        SearchField::Person,
        SearchField::Favorite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Query => "Search",
            SearchField::Tags => "Tags",
            SearchField::Person => "Person",
            SearchField::Favorite => "Favorites only",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPanelState {
    pub open: bool,
    pub query: SearchQuery,
    pub focus: SearchField,
    pub results: Vec<Image>,
    pub is_searching: bool,
    pub selected: usize,
    /// Sequence number of the newest search sent.
    pub last_issued: u64,
}

impl UiState for SearchPanelState {}

impl SearchPanelState {
    pub fn selected_image(&self) -> Option<&Image> {
        self.results.get(self.selected)
    }
}
