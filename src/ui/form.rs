//! Text forms shared by the auth, album, image and profile screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Rendered masked.
    Secret,
    /// Yes/no checkbox toggled with Space.
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            value: String::new(),
            checked: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(label)
        }
    }

    pub fn toggle(label: &'static str) -> Self {
        Self {
            kind: FieldKind::Toggle,
            ..Self::text(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Text as it should appear on screen.
    pub fn display(&self) -> String {
        match self.kind {
            FieldKind::Text => self.value.clone(),
            FieldKind::Secret => "•".repeat(self.value.chars().count()),
            FieldKind::Toggle => (if self.checked { "[x]" } else { "[ ]" }).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub focused: usize,
    /// Set by any edit; cleared when the form is (re)loaded.
    pub dirty: bool,
}

impl UiState for FormState {}

impl FormState {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focused: 0,
            dirty: false,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn checked(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|f| f.checked)
    }
}

#[derive(Debug, Clone)]
pub enum FormIntent {
    Load { fields: Vec<FormField> },
    Input(char),
    Backspace,
    MoveUp,
    MoveDown,
    Toggle,
    Set { index: usize, value: String },
    /// Empty every field; focus returns to the first one.
    Clear,
}

impl Intent for FormIntent {}

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Load { fields } => return FormState::new(fields),
            FormIntent::Input(c) => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    match field.kind {
                        FieldKind::Toggle if c == ' ' => field.checked = !field.checked,
                        FieldKind::Toggle => return state,
                        FieldKind::Text | FieldKind::Secret => field.value.push(c),
                    }
                    state.dirty = true;
                }
            }
            FormIntent::Backspace => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    if field.value.pop().is_some() {
                        state.dirty = true;
                    }
                }
            }
            FormIntent::MoveUp => {
                state.focused = if state.focused == 0 {
                    state.fields.len().saturating_sub(1)
                } else {
                    state.focused - 1
                };
            }
            FormIntent::MoveDown => {
                state.focused = if state.focused + 1 >= state.fields.len() {
                    0
                } else {
                    state.focused + 1
                };
            }
            FormIntent::Toggle => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    if field.kind == FieldKind::Toggle {
                        field.checked = !field.checked;
                        state.dirty = true;
                    }
                }
            }
            FormIntent::Set { index, value } => {
                if let Some(field) = state.fields.get_mut(index) {
                    field.value = value;
                }
            }
            FormIntent::Clear => {
                for field in &mut state.fields {
                    field.value.clear();
                    field.checked = false;
                }
                state.focused = 0;
                state.dirty = false;
            }
        }
        state
    }
}

/// Editing intent for a key press, if the key edits or moves within a form.
pub fn intent_for_key(key: KeyEvent) -> Option<FormIntent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(FormIntent::MoveDown),
        KeyCode::BackTab | KeyCode::Up => Some(FormIntent::MoveUp),
        KeyCode::Backspace => Some(FormIntent::Backspace),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(FormIntent::Input(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(vec![
            FormField::text("Name"),
            FormField::secret("Password"),
            FormField::toggle("Favorite"),
        ])
    }

    #[test]
    fn focus_wraps_both_ways() {
        let state = FormReducer::reduce(form(), FormIntent::MoveUp);
        assert_eq!(state.focused, 2);
        let state = FormReducer::reduce(state, FormIntent::MoveDown);
        assert_eq!(state.focused, 0);
    }

    #[test]
    fn toggle_field_ignores_text() {
        let mut state = form();
        state.focused = 2;
        let state = FormReducer::reduce(state, FormIntent::Input('x'));
        assert!(!state.checked(2));
        assert!(!state.dirty);
        let state = FormReducer::reduce(state, FormIntent::Input(' '));
        assert!(state.checked(2));
    }

    #[test]
    fn secret_is_masked() {
        let mut state = form();
        state.focused = 1;
        let state = "abc"
            .chars()
            .fold(state, |s, c| FormReducer::reduce(s, FormIntent::Input(c)));
        assert_eq!(state.value(1), "abc");
        assert_eq!(state.fields[1].display(), "•••");
    }
}
