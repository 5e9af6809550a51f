//! # PathPrompt Component
//!
//! Centered overlay asking for a file path before an import or export.
//! Opened with `i` / `e` from browse mode, dismissed with Esc.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    Import,
    Export,
}

impl PromptPurpose {
    fn title(&self) -> &'static str {
        match self {
            PromptPurpose::Import => " Import quotes from ",
            PromptPurpose::Export => " Export quotes to ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Confirm(PathBuf),
    Cancel,
}

pub struct PathPrompt {
    pub purpose: PromptPurpose,
    pub buffer: String,
}

impl PathPrompt {
    pub fn new(purpose: PromptPurpose, initial: impl Into<String>) -> Self {
        Self {
            purpose,
            buffer: initial.into(),
        }
    }
}

impl EventHandler for PathPrompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.buffer.push(*c),
            TuiEvent::Paste(text) => self.buffer.push_str(text.trim()),
            TuiEvent::Backspace => {
                self.buffer.pop();
            }
            TuiEvent::Escape => return Some(PromptEvent::Cancel),
            TuiEvent::Submit => {
                let path = self.buffer.trim();
                // An empty path is not a path; keep the prompt open.
                if path.is_empty() {
                    return None;
                }
                return Some(PromptEvent::Confirm(PathBuf::from(path)));
            }
            _ => {}
        }
        None
    }
}

impl Component for PathPrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let [overlay] = Layout::horizontal([Constraint::Percentage(70)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(self.purpose.title())
            .title_bottom(Line::from(" Enter Confirm  Esc Cancel ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(Paragraph::new(self.buffer.as_str()).block(block), overlay);

        if inner.width > 0 && inner.height > 0 {
            let x = inner.x + (self.buffer.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}
