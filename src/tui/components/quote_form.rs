//! # QuoteForm Component
//!
//! Two single-line inputs, quote text and category, side by side. Editing
//! goes to whichever field has focus; Tab moves focus. Submission rules live
//! in `core::form::FormController`, this component only drives it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::form::{FormController, FormField};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Cancel,
}

#[derive(Default)]
pub struct QuoteForm {
    pub controller: FormController,
    /// Prop: whether the form currently receives keys.
    pub active: bool,
}

impl QuoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width-aware tail of `value` that fits `width` columns with room for the cursor.
    fn visible_tail(value: &str, width: u16) -> &str {
        let budget = width.saturating_sub(1) as usize;
        let mut start = 0;
        while value[start..].width() > budget {
            match value[start..].chars().next() {
                Some(c) => start += c.len_utf8(),
                None => break,
            }
        }
        &value[start..]
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        field: FormField,
    ) {
        let focused = self.active && self.controller.focus == field;
        let border_style = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title.to_string());
        let inner = block.inner(area);
        let shown = Self::visible_tail(value, inner.width);

        frame.render_widget(Paragraph::new(shown.to_string()).block(block), area);

        if focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (shown.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}

impl Component for QuoteForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [text_area, category_area] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(area);
        self.render_field(
            frame,
            text_area,
            " Enter a new quote ",
            &self.controller.text,
            FormField::Text,
        );
        self.render_field(
            frame,
            category_area,
            " Enter quote category ",
            &self.controller.category,
            FormField::Category,
        );
    }
}

impl EventHandler for QuoteForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.controller.insert_char(*c),
            TuiEvent::Paste(text) => self.controller.insert_str(text),
            TuiEvent::Backspace => self.controller.backspace(),
            TuiEvent::Tab => self.controller.toggle_focus(),
            TuiEvent::Submit => return Some(FormEvent::Submit),
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_helpers::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = QuoteForm::new();
        for c in "Be kind.".chars() {
            assert_eq!(form.handle_event(&TuiEvent::InputChar(c)), None);
        }
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Paste("Ethics".into()));
        assert_eq!(form.controller.text, "Be kind.");
        assert_eq!(form.controller.category, "Ethics");
    }

    #[test]
    fn test_enter_and_escape_emit_events() {
        let mut form = QuoteForm::new();
        assert_eq!(form.handle_event(&TuiEvent::Submit), Some(FormEvent::Submit));
        assert_eq!(form.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancel));
    }

    #[test]
    fn test_visible_tail_keeps_end_of_long_input() {
        assert_eq!(QuoteForm::visible_tail("abcdef", 4), "def");
        assert_eq!(QuoteForm::visible_tail("abc", 10), "abc");
        assert_eq!(QuoteForm::visible_tail("", 0), "");
    }

    #[test]
    fn test_render_shows_both_fields() {
        let mut form = QuoteForm::new();
        form.active = true;
        form.controller.text = "Stay curious.".into();
        form.controller.category = "Learning".into();

        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        terminal.draw(|f| form.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Enter a new quote"));
        assert!(text.contains("Stay curious."));
        assert!(text.contains("Learning"));
    }
}
