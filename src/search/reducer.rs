use crate::mvi::Reducer;
use crate::search::intent::SearchIntent;
use crate::search::state::{SearchField, SearchPanelState};

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchPanelState;
    type Intent = SearchIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::Toggle if state.open => return Self::reduce(state, SearchIntent::Close),
            SearchIntent::Toggle | SearchIntent::Open => {
                return SearchPanelState {
                    open: true,
                    last_issued: state.last_issued,
                    ..SearchPanelState::default()
                };
            }
            SearchIntent::Close => {
                // Searches still in flight must not land in the next panel.
                state.last_issued += 1;
                state.open = false;
                state.is_searching = false;
            }
            SearchIntent::Input(c) if state.open => match state.focus {
                SearchField::Query => state.query.query.push(c),
                SearchField::Tags => state.query.tags.push(c),
                SearchField::Person => state.query.person.push(c),
                SearchField::Favorite => {
                    if c == ' ' {
                        state.query.favorite = !state.query.favorite;
                    }
                }
            },
            SearchIntent::Backspace if state.open => match state.focus {
                SearchField::Query => {
                    state.query.query.pop();
                }
                SearchField::Tags => {
                    state.query.tags.pop();
                }
                SearchField::Person => {
                    state.query.person.pop();
                }
                SearchField::Favorite => {}
            },
            SearchIntent::FocusNext => state.focus = state.focus.next(),
            SearchIntent::FocusPrev => state.focus = state.focus.prev(),
            SearchIntent::ToggleFavorite if state.open => {
                state.query.favorite = !state.query.favorite;
            }
            SearchIntent::MoveUp => state.selected = state.selected.saturating_sub(1),
            SearchIntent::MoveDown => {
                if state.selected + 1 < state.results.len() {
                    state.selected += 1;
                }
            }
            SearchIntent::Started { seq } => {
                state.last_issued = seq;
                state.is_searching = true;
            }
            SearchIntent::Results { seq, images } if seq == state.last_issued => {
                state.results = images;
                state.selected = 0;
                state.is_searching = false;
            }
            SearchIntent::Failed { seq } if seq == state.last_issued => {
                state.results.clear();
                state.selected = 0;
                state.is_searching = false;
            }
            _ => {}
        }
        state
    }
}
