//! # Add-Quote Form
//!
//! Two free-text inputs and the submit rule: both must be non-empty after
//! trimming. On success the inputs are cleared; on failure they are left as
//! typed and the user gets an error notification.

use crate::core::action::{Action, Effect, update};
use crate::core::notification::Notification;
use crate::core::quote::Quote;
use crate::core::state::App;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in both fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Category,
}

#[derive(Debug, Default, Clone)]
pub struct FormController {
    pub text: String,
    pub category: String,
    pub focus: FormField,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Text => &mut self.text,
            FormField::Category => &mut self.category,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn insert_str(&mut self, s: &str) {
        // Inputs are single-line.
        let cleaned: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.focused_mut().push_str(&cleaned);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Text,
        };
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.category.clear();
        self.focus = FormField::Text;
    }

    /// Returns the resulting effect when the quote was accepted, `None` when
    /// validation rejected it.
    pub fn submit(&mut self, app: &mut App) -> Option<Effect> {
        match Quote::new(&self.text, &self.category) {
            Ok(quote) => {
                self.clear();
                Some(update(app, Action::AddQuote(quote)))
            }
            Err(_) => {
                app.notify(Notification::error(MISSING_FIELDS_MESSAGE));
                None
            }
        }
    }
}
