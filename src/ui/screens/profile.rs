use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::api::User;
use crate::mvi::Reducer;
use crate::store::profile::{ProfileIntent, ProfileKind, ProfileOperation};
use crate::store::{Action, AppState, OperationKind};
use crate::ui::form::{intent_for_key, FormField, FormIntent, FormReducer, FormState};
use crate::ui::screens::Command;
use crate::ui::theme::{BRAND, HEADER_SEPARATOR};
use crate::ui::widgets::{dim_line, error_line, render_form, success_line};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Profile,
    Password,
}

/// When a success message was first seen, so it can be cleared later.
#[derive(Debug, Default)]
struct Notice {
    since: Option<Instant>,
}

impl Notice {
    /// Whether a message shown since an earlier tick has now expired.
    fn expired(&mut self, shown: bool, now: Instant, ttl: Duration) -> bool {
        if !shown {
            self.since = None;
            return false;
        }
        let since = *self.since.get_or_insert(now);
        if now.duration_since(since) >= ttl {
            self.since = None;
            return true;
        }
        false
    }
}

fn profile_fields(user: Option<&User>) -> Vec<FormField> {
    let (name, picture) = user
        .map(|u| (u.name.clone(), u.profile_picture.clone().unwrap_or_default()))
        .unwrap_or_default();
    vec![
        FormField::text("Name").with_value(name),
        FormField::text("Profile picture URL").with_value(picture),
    ]
}

fn password_fields() -> Vec<FormField> {
    vec![
        FormField::secret("Current password"),
        FormField::secret("New password"),
        FormField::secret("Confirm password"),
    ]
}

/// Profile details and password change, one tab each.
pub struct ProfileScreen {
    tab: Tab,
    profile: FormState,
    password: FormState,
    loaded: Option<User>,
    changing_password: bool,
    message: Notice,
    password_message: Notice,
}

impl ProfileScreen {
    pub fn new(state: &AppState) -> Self {
        let user = state.profile.user.as_ref().or(state.auth.user.as_ref());
        Self {
            tab: Tab::Profile,
            profile: FormState::new(profile_fields(user)),
            password: FormState::new(password_fields()),
            loaded: user.cloned(),
            changing_password: false,
            message: Notice::default(),
            password_message: Notice::default(),
        }
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![
            Command::Apply(Action::Profile(ProfileIntent::ClearError)),
            Command::Apply(Action::Profile(ProfileIntent::ClearPasswordError)),
            Command::Dispatch(ProfileOperation::Fetch.into()),
        ]
    }

    fn form_mut(&mut self) -> &mut FormState {
        match self.tab {
            Tab::Profile => &mut self.profile,
            Tab::Password => &mut self.password,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
            self.tab = match self.tab {
                Tab::Profile => Tab::Password,
                Tab::Password => Tab::Profile,
            };
            return Vec::new();
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            _ => {
                if let Some(intent) = intent_for_key(key) {
                    let form = self.form_mut();
                    *form = FormReducer::reduce(std::mem::take(form), intent);
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        match self.tab {
            Tab::Profile => {
                match validation::profile_update(self.profile.value(0), self.profile.value(1)) {
                    Ok(update) => vec![Command::Dispatch(ProfileOperation::Update(update).into())],
                    Err(e) => vec![Command::Reject(OperationKind::Profile(ProfileKind::Update), e)],
                }
            }
            Tab::Password => {
                let change = validation::password_change(
                    self.password.value(0),
                    self.password.value(1),
                    self.password.value(2),
                );
                match change {
                    Ok(change) => {
                        self.changing_password = true;
                        vec![Command::Dispatch(
                            ProfileOperation::ChangePassword(change).into(),
                        )]
                    }
                    Err(e) => vec![Command::Reject(
                        OperationKind::Profile(ProfileKind::ChangePassword),
                        e,
                    )],
                }
            }
        }
    }

    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        let user = state.profile.user.as_ref();
        if user.is_some() && user != self.loaded.as_ref() {
            self.loaded = user.cloned();
            if !self.profile.dirty || state.profile.message.is_some() {
                self.profile = FormReducer::reduce(
                    std::mem::take(&mut self.profile),
                    FormIntent::Load {
                        fields: profile_fields(user),
                    },
                );
            }
        }
        if self.changing_password && state.profile.password_message.is_some() {
            self.changing_password = false;
            self.password =
                FormReducer::reduce(std::mem::take(&mut self.password), FormIntent::Clear);
        }
        Vec::new()
    }

    pub fn on_tick(&mut self, state: &AppState, now: Instant, notice: Duration) -> Vec<Command> {
        let mut commands = Vec::new();
        if self
            .message
            .expired(state.profile.message.is_some(), now, notice)
        {
            commands.push(Command::Apply(Action::Profile(ProfileIntent::ClearMessage)));
        }
        if self
            .password_message
            .expired(state.profile.password_message.is_some(), now, notice)
        {
            commands.push(Command::Apply(Action::Profile(
                ProfileIntent::ClearPasswordMessage,
            )));
        }
        commands
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let tab_style = |tab: Tab| {
            if tab == self.tab {
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(HEADER_SEPARATOR)
            }
        };
        let username = state
            .profile
            .user
            .as_ref()
            .or(state.auth.user.as_ref())
            .map(|u| format!("@{}", u.username))
            .unwrap_or_default();
        let tabs = Line::from(vec![
            Span::styled(" Profile ", tab_style(Tab::Profile)),
            Span::raw("│"),
            Span::styled(" Password ", tab_style(Tab::Password)),
            Span::styled(format!("   {}", username), Style::default().fg(HEADER_SEPARATOR)),
        ]);
        frame.render_widget(Paragraph::new(tabs), chunks[0]);

        let profile = &state.profile;
        match self.tab {
            Tab::Profile => {
                let mut status = Vec::new();
                if let Some(message) = &profile.message {
                    status.push(success_line(message));
                }
                if let Some(error) = profile.lifecycle.error_message() {
                    status.push(error_line(error));
                }
                if profile.lifecycle.is_loading() {
                    status.push(dim_line("Saving..."));
                }
                render_form(frame, chunks[1], "Profile", &self.profile, status);
            }
            Tab::Password => {
                let mut status = Vec::new();
                if let Some(message) = &profile.password_message {
                    status.push(success_line(message));
                }
                if let Some(error) = profile.password.error_message() {
                    status.push(error_line(error));
                }
                if profile.password.is_loading() {
                    status.push(dim_line("Updating password..."));
                }
                render_form(frame, chunks[1], "Change password", &self.password, status);
            }
        }
    }
}
