use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::Frame;

use crate::mvi::Reducer;
use crate::routes::Route;
use crate::store::auth::{AuthIntent, AuthKind, AuthOperation, REGISTERED_NOTICE};
use crate::store::{Action, AppState, Operation, OperationKind, Status};
use crate::ui::form::{intent_for_key, FormField, FormIntent, FormReducer, FormState};
use crate::ui::screens::Command;
use crate::ui::widgets::{dim_line, error_line, render_form, success_line};
use crate::validation;

/// Login and registration form.
pub struct AuthScreen {
    login: bool,
    form: FormState,
    submitted: bool,
    notice: Option<&'static str>,
}

fn fields(login: bool, username: &str) -> Vec<FormField> {
    let mut fields = Vec::new();
    if !login {
        fields.push(FormField::text("Name"));
    }
    fields.push(FormField::text("Username").with_value(username));
    fields.push(FormField::secret("Password"));
    fields
}

impl AuthScreen {
    pub fn new(login: bool) -> Self {
        Self {
            login,
            form: FormState::new(fields(login, "")),
            submitted: false,
            notice: None,
        }
    }

    pub fn is_login(&self) -> bool {
        self.login
    }

    pub fn on_enter(&self) -> Vec<Command> {
        vec![Command::Apply(Action::Auth(AuthIntent::ClearError))]
    }

    fn username(&self) -> &str {
        self.form.value(if self.login { 0 } else { 1 })
    }

    fn switch_mode(&mut self, login: bool) {
        let username = self.username().to_string();
        self.login = login;
        self.form = FormState::new(fields(login, &username));
        self.form.focused = if login && !username.is_empty() { 1 } else { 0 };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
            self.switch_mode(!self.login);
            self.notice = None;
            return vec![Command::Apply(Action::Auth(AuthIntent::ClearError))];
        }

        match key.code {
            KeyCode::Esc => vec![Command::Navigate(Route::Home)],
            KeyCode::Enter => self.submit(),
            _ => {
                if let Some(intent) = intent_for_key(key) {
                    self.form = FormReducer::reduce(std::mem::take(&mut self.form), intent);
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        self.notice = None;
        self.submitted = true;
        if self.login {
            let request = validation::login_request(self.form.value(0), self.form.value(1));
            match request {
                Ok(request) => vec![Command::Dispatch(Operation::Auth(AuthOperation::Login(
                    request,
                )))],
                Err(e) => vec![Command::Reject(OperationKind::Auth(AuthKind::Login), e)],
            }
        } else {
            let request = validation::register_request(
                self.form.value(0),
                self.form.value(1),
                self.form.value(2),
            );
            match request {
                Ok(request) => vec![Command::Dispatch(Operation::Auth(
                    AuthOperation::Register(request),
                ))],
                Err(e) => vec![Command::Reject(OperationKind::Auth(AuthKind::Register), e)],
            }
        }
    }

    pub fn on_state(&mut self, state: &AppState) -> Vec<Command> {
        if state.auth.registered && !self.login {
            self.switch_mode(true);
            self.submitted = false;
            self.notice = Some(REGISTERED_NOTICE);
            return vec![Command::Apply(Action::Auth(AuthIntent::ClearRegistered))];
        }
        if self.submitted
            && self.login
            && state.auth.is_authenticated
            && state.auth.lifecycle.status == Status::Succeeded
        {
            self.submitted = false;
            return vec![Command::Navigate(Route::Home)];
        }
        if self.submitted && state.auth.lifecycle.status == Status::Failed {
            self.submitted = false;
            self.form = FormReducer::reduce(
                std::mem::take(&mut self.form),
                FormIntent::Set {
                    index: if self.login { 1 } else { 2 },
                    value: String::new(),
                },
            );
        }
        Vec::new()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let mut status: Vec<Line<'static>> = Vec::new();
        if let Some(notice) = self.notice {
            status.push(success_line(notice));
        }
        if let Some(error) = state.auth.lifecycle.error_message() {
            status.push(error_line(error));
        }
        if state.auth.lifecycle.is_loading() {
            status.push(dim_line(if self.login {
                "Logging in..."
            } else {
                "Creating account..."
            }));
        }
        let title = if self.login { "Login" } else { "Register" };
        render_form(frame, area, title, &self.form, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut AuthScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_login_is_rejected_locally() {
        let mut screen = AuthScreen::new(true);
        let commands = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(
            commands,
            vec![Command::Reject(
                OperationKind::Auth(AuthKind::Login),
                ValidationError::MissingField { field: "username" }
            )]
        );
    }

    #[test]
    fn login_dispatches_credentials() {
        let mut screen = AuthScreen::new(true);
        type_text(&mut screen, "ann");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "secret");
        let commands = screen.handle_key(key(KeyCode::Enter));
        match commands.as_slice() {
            [Command::Dispatch(Operation::Auth(AuthOperation::Login(request)))] => {
                assert_eq!(request.username, "ann");
                assert_eq!(request.password, "secret");
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn registration_switches_to_login_keeping_username() {
        let mut screen = AuthScreen::new(false);
        type_text(&mut screen, "Ann");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "ann");

        let mut state = AppState::default();
        state.auth.registered = true;
        let commands = screen.on_state(&state);

        assert!(screen.is_login());
        assert_eq!(screen.username(), "ann");
        assert_eq!(screen.notice, Some(REGISTERED_NOTICE));
        assert_eq!(
            commands,
            vec![Command::Apply(Action::Auth(AuthIntent::ClearRegistered))]
        );
    }
}
