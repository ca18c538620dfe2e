use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::api::SearchQuery;
use crate::mvi::Reducer;
use crate::search::debounce::Debouncer;
use crate::search::intent::SearchIntent;
use crate::search::reducer::SearchReducer;
use crate::search::state::SearchPanelState;

/// Callback invoked when a debounced search is due.
pub type DueCallback = Arc<dyn Fn() + Send + Sync>;

/// Search panel state plus its debounce timer.
///
/// Every edit while the panel is open re-arms the timer. When it fires,
/// `on_due` runs (the TUI posts an event); the owner then calls
/// [`begin_search`](Self::begin_search) and runs the returned query.
pub struct SearchController {
    state: SearchPanelState,
    debouncer: Debouncer,
    on_due: DueCallback,
}

impl SearchController {
    pub fn new(handle: Handle, delay: Duration, on_due: DueCallback) -> Self {
        Self {
            state: SearchPanelState::default(),
            debouncer: Debouncer::new(handle, delay),
            on_due,
        }
    }

    pub fn state(&self) -> &SearchPanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.debouncer.set_delay(delay);
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_armed()
    }

    pub fn dispatch(&mut self, intent: SearchIntent) {
        let edit = intent.is_edit();
        let state = std::mem::take(&mut self.state);
        self.state = SearchReducer::reduce(state, intent);

        if !self.state.open {
            self.debouncer.cancel();
        } else if edit {
            let on_due = self.on_due.clone();
            self.debouncer.arm(move || on_due());
        }
    }

    /// Issue the next search if the panel is open and any filter is set.
    pub fn begin_search(&mut self) -> Option<(u64, SearchQuery)> {
        if !self.state.open || self.state.query.is_empty() {
            return None;
        }
        let seq = self.state.last_issued + 1;
        let query = self.state.query.clone();
        self.dispatch(SearchIntent::Started { seq });
        tracing::debug!(seq, "Search issued");
        Some((seq, query))
    }

    /// Search now, skipping the remaining debounce delay.
    pub fn submit(&mut self) -> Option<(u64, SearchQuery)> {
        self.debouncer.cancel();
        self.begin_search()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller() -> (SearchController, Arc<AtomicUsize>) {
        let due = Arc::new(AtomicUsize::new(0));
        let counter = due.clone();
        let controller = SearchController::new(
            Handle::current(),
            Duration::from_millis(500),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (controller, due)
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_is_due_once() {
        let (mut search, due) = controller();
        search.dispatch(SearchIntent::Open);
        for c in "beach".chars() {
            search.dispatch(SearchIntent::Input(c));
            tokio::time::sleep(Duration::from_millis(120)).await;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(due.load(Ordering::SeqCst), 1);

        search.dispatch(SearchIntent::Input('s'));
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(due.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_cancels_timer() {
        let (mut search, due) = controller();
        search.dispatch(SearchIntent::Open);
        search.dispatch(SearchIntent::Input('a'));
        search.dispatch(SearchIntent::Close);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(due.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn begin_search_needs_a_filter() {
        let (mut search, _) = controller();
        assert!(search.begin_search().is_none());

        search.dispatch(SearchIntent::Open);
        search.dispatch(SearchIntent::Input(' '));
        assert!(search.begin_search().is_none());

        search.dispatch(SearchIntent::ToggleFavorite);
        let (seq, query) = search.begin_search().expect("favorite filter is enough");
        assert_eq!(seq, 1);
        assert!(query.favorite);
        assert!(search.state().is_searching);
        assert_eq!(search.submit().map(|(seq, _)| seq), Some(2));
    }
}
