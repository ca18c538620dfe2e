use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::api::{ErrorPayload, Image};
use crate::config::ConfigStore;
use crate::routes::{Guarded, Route, RouteGuard};
use crate::search::{SearchController, SearchIntent, SearchPanelState};
use crate::store::auth::AuthOperation;
use crate::store::{Action, AppState, Operation, Store};
use crate::ui::events::{AppEvent, EventSender};
use crate::ui::screens::{Command, Screen};

const SEARCH_FAILED: &str = "Failed to search images";

/// Short-lived status line shown in the footer.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub message: String,
    pub is_error: bool,
    since: Instant,
}

pub struct App {
    should_quit: bool,
    store: Store,
    route: Route,
    screen: Screen,
    search: SearchController,
    search_error: Option<String>,
    runtime: Handle,
    events: EventSender,
    config: ConfigStore,
    /// Cancels every request still running when the app exits.
    root: CancellationToken,
    /// Child of `root`, replaced on every navigation. Fetches for the
    /// current screen run under it.
    screen_token: CancellationToken,
    redirect: Option<(Instant, Route)>,
    flash: Option<Flash>,
}

impl App {
    pub fn new(runtime: Handle, config: ConfigStore, store: Store, events: EventSender) -> Self {
        let settings = config.get();
        let due = events.clone();
        let search = SearchController::new(
            runtime.clone(),
            Duration::from_millis(settings.search.debounce_ms),
            Arc::new(move || {
                let _ = due.send(AppEvent::SearchDue);
            }),
        );
        let root = CancellationToken::new();
        let screen_token = root.child_token();
        let screen = Screen::for_route(&Route::Home, store.state());
        Self {
            should_quit: false,
            store,
            route: Route::Home,
            screen,
            search,
            search_error: None,
            runtime,
            events,
            config,
            root,
            screen_token,
            redirect: None,
            flash: None,
        }
    }

    /// Verify a restored session, then show the home screen.
    pub fn start(&mut self) {
        if self.store.session().is_signed_in() {
            self.spawn(AuthOperation::CurrentUser.into());
        }
        self.navigate(Route::Home);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
        self.root.cancel();
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn search_state(&self) -> &SearchPanelState {
        self.search.state()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn is_search_open(&self) -> bool {
        self.search.is_open()
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.config.get().ui.tick_rate_ms)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Show `route`, or the login form if it needs a session we don't have.
    pub fn navigate(&mut self, route: Route) {
        let route = match RouteGuard::resolve(route, &self.store.state().auth) {
            Guarded::Render(route) => route,
            Guarded::Redirect(route) => route,
        };

        self.screen_token.cancel();
        self.screen_token = self.root.child_token();
        self.redirect = None;

        tracing::debug!(route = route.title(), "Navigating");
        self.screen = Screen::for_route(&route, self.store.state());
        self.route = route;
        let commands = self.screen.on_enter();
        self.run_commands(commands);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let commands = self.screen.handle_key(key, self.store.state());
        self.run_commands(commands);
    }

    pub fn on_tick(&mut self, now: Instant) {
        let ui = self.config.get().ui;

        if let Some((at, _)) = &self.redirect {
            if now >= *at {
                if let Some((_, route)) = self.redirect.take() {
                    self.navigate(route);
                }
            }
        }

        if let Some(flash) = &self.flash {
            if now.duration_since(flash.since) >= Duration::from_millis(ui.notice_ms) {
                self.flash = None;
            }
        }

        let commands =
            self.screen
                .on_tick(self.store.state(), now, Duration::from_millis(ui.notice_ms));
        self.run_commands(commands);
    }

    fn run_commands(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Dispatch(op) => self.spawn(op),
                Command::Reject(kind, error) => {
                    self.store.reject(kind, error);
                    self.sync_screen();
                }
                Command::Apply(action) => self.on_action(action),
                Command::Navigate(route) => self.navigate(route),
                Command::RedirectLater(route) => {
                    let delay = Duration::from_millis(self.config.get().ui.redirect_ms);
                    self.redirect = Some((Instant::now() + delay, route));
                }
            }
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Issue `op` on the runtime. Its outcome comes back as an
    /// [`AppEvent::Action`].
    ///
    /// Fetches are tied to the current screen and abandoned when it goes
    /// away; mutations and session checks run to completion.
    fn spawn(&mut self, op: Operation) {
        let screen_scoped = op.kind().replaces() && !matches!(op, Operation::Auth(_));
        let token = if screen_scoped {
            self.screen_token.clone()
        } else {
            self.root.clone()
        };
        let pending = self.store.begin(op);
        let tx = self.events.clone();
        self.runtime.spawn(async move {
            let abandoned = pending.abandoned();
            let action = tokio::select! {
                _ = token.cancelled() => abandoned,
                action = pending.execute() => action,
            };
            let _ = tx.send(AppEvent::Action(action));
        });
    }

    /// Apply a settled request, then let the screen react.
    pub fn on_action(&mut self, action: Action) {
        if let Some(error) = action.error() {
            tracing::warn!(message = %error.message, detail = ?error.error, "Request failed");
        }
        let was_authenticated = self.store.state().auth.is_authenticated;
        self.store.apply(action);

        if was_authenticated && !self.store.state().auth.is_authenticated {
            self.search.dispatch(SearchIntent::Close);
            self.search_error = None;
            if self.route.requires_auth() {
                self.navigate(Route::login());
                return;
            }
        }
        self.sync_screen();
    }

    fn sync_screen(&mut self) {
        let commands = self.screen.on_state(self.store.state());
        self.run_commands(commands);
    }

    pub fn logout(&mut self) {
        if !self.store.state().auth.is_authenticated {
            return;
        }
        self.spawn(AuthOperation::Logout.into());
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn toggle_search(&mut self) {
        if !self.store.state().auth.is_authenticated {
            self.navigate(Route::login());
            return;
        }
        self.search_error = None;
        self.search.dispatch(SearchIntent::Toggle);
    }

    pub fn dispatch_search(&mut self, intent: SearchIntent) {
        self.search.dispatch(intent);
    }

    /// The debounce timer fired.
    pub fn on_search_due(&mut self) {
        if let Some((seq, query)) = self.search.begin_search() {
            self.spawn_search(seq, query);
        }
    }

    /// Search now without waiting for the debounce delay.
    pub fn submit_search(&mut self) {
        if let Some((seq, query)) = self.search.submit() {
            self.spawn_search(seq, query);
        }
    }

    fn spawn_search(&mut self, seq: u64, query: crate::api::SearchQuery) {
        let api = self.store.api().clone();
        let tx = self.events.clone();
        let token = self.root.clone();
        self.runtime.spawn(async move {
            let search = async {
                api.search_images(&query)
                    .await
                    .map_err(|e| e.into_rejection(SEARCH_FAILED))
            };
            let result = tokio::select! {
                _ = token.cancelled() => return,
                result = search => result,
            };
            let _ = tx.send(AppEvent::SearchSettled { seq, result });
        });
    }

    pub fn on_search_settled(&mut self, seq: u64, result: Result<Vec<Image>, ErrorPayload>) {
        let latest = seq == self.search.state().last_issued;
        match result {
            Ok(images) => {
                if latest {
                    self.search_error = None;
                }
                self.search.dispatch(SearchIntent::Results { seq, images });
            }
            Err(error) => {
                tracing::warn!(seq, message = %error.message, "Search failed");
                if latest {
                    self.search_error = Some(error.message);
                }
                self.search.dispatch(SearchIntent::Failed { seq });
            }
        }
    }

    /// Jump to the album holding the selected result, with the image
    /// highlighted.
    pub fn open_search_result(&mut self) -> bool {
        let Some(image) = self.search.state().selected_image().cloned() else {
            return false;
        };
        let shared = self
            .store
            .state()
            .album
            .shared_albums
            .iter()
            .any(|album| album.id == image.album_id);
        self.search.dispatch(SearchIntent::Close);
        self.navigate(Route::AlbumDetails {
            album_id: image.album_id,
            highlight: Some(image.id),
            shared,
        });
        true
    }

    // ========================================================================
    // Config
    // ========================================================================

    /// Re-read the config file. The base URL stays as started.
    pub fn reload_config(&mut self) {
        let (message, is_error) = match self.config.reload() {
            Ok(()) => {
                let config = self.config.get();
                self.search
                    .set_delay(Duration::from_millis(config.search.debounce_ms));
                tracing::info!(path = %self.config.path().display(), "Config reloaded");
                ("Config reloaded".to_string(), false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Config reload failed");
                (e.to_string(), true)
            }
        };
        self.flash = Some(Flash {
            message,
            is_error,
            since: Instant::now(),
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::SessionStore;
    use crate::store::auth::{AuthIntent, AuthKind};
    use crate::store::Ticket;
    use std::sync::mpsc;

    fn make_app(runtime: &tokio::runtime::Runtime) -> (App, mpsc::Receiver<AppEvent>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::open(dir.path().join("session.json")).unwrap());
        let store = Store::open("http://127.0.0.1:9", session).unwrap();
        let config = ConfigStore::new(Config::default(), dir.path().join("config.toml"));
        let (tx, rx) = mpsc::channel();
        let app = App::new(runtime.handle().clone(), config, store, tx);
        (app, rx, dir)
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn guarded_route_redirects_to_login() {
        let runtime = runtime();
        let (mut app, _rx, _dir) = make_app(&runtime);
        app.navigate(Route::Profile);
        assert_eq!(app.route(), &Route::login());
    }

    #[test]
    fn search_requires_a_session() {
        let runtime = runtime();
        let (mut app, _rx, _dir) = make_app(&runtime);
        app.toggle_search();
        assert!(!app.is_search_open());
        assert_eq!(app.route(), &Route::login());
    }

    #[test]
    fn redirect_fires_after_delay() {
        let runtime = runtime();
        let (mut app, _rx, _dir) = make_app(&runtime);
        let now = Instant::now();
        app.redirect = Some((now + Duration::from_millis(100), Route::login()));

        app.on_tick(now);
        assert_eq!(app.route(), &Route::Home);
        app.on_tick(now + Duration::from_millis(100));
        assert_eq!(app.route(), &Route::login());
    }

    #[test]
    fn losing_the_session_leaves_guarded_screens() {
        let runtime = runtime();
        let (mut app, _rx, _dir) = make_app(&runtime);
        let ticket = Ticket {
            kind: AuthKind::Login,
            seq: 1,
        };
        app.on_action(Action::Auth(AuthIntent::Started(ticket)));
        app.on_action(Action::Auth(AuthIntent::LoggedIn {
            ticket,
            token: crate::config::SecureString::new("t".into()),
            user: crate::api::User {
                id: "u1".into(),
                name: "Ann".into(),
                username: "ann".into(),
                profile_picture: None,
            },
        }));
        assert!(app.state().auth.is_authenticated);

        app.screen = Screen::for_route(&Route::Profile, app.store.state());
        app.route = Route::Profile;

        let logout = Ticket {
            kind: AuthKind::Logout,
            seq: 2,
        };
        app.on_action(Action::Auth(AuthIntent::Started(logout)));
        app.on_action(Action::Auth(AuthIntent::LoggedOut(logout)));
        assert!(!app.state().auth.is_authenticated);
        assert_eq!(app.route(), &Route::login());
    }
}
