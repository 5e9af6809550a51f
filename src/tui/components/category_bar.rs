//! # CategoryBar Component
//!
//! One-line strip listing "All Categories" followed by every distinct
//! category in first-appearance order. The active filter is highlighted.
//! Left/Right cycle through it from the main loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::category::CategoryFilter;
use crate::tui::component::Component;

pub struct CategoryBar<'a> {
    pub categories: &'a [String],
    pub filter: &'a CategoryFilter,
}

impl<'a> CategoryBar<'a> {
    pub fn new(categories: &'a [String], filter: &'a CategoryFilter) -> Self {
        Self { categories, filter }
    }

    fn entry(label: &str, selected: bool) -> Span<'static> {
        let style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {label} "), style)
    }
}

impl Component for CategoryBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Self::entry(
                CategoryFilter::All.label(),
                *self.filter == CategoryFilter::All,
            ),
        ];
        for category in self.categories {
            spans.push(Span::raw(" "));
            spans.push(Self::entry(
                category,
                matches!(self.filter, CategoryFilter::Category(c) if c == category),
            ));
        }
        spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));

        frame.render_widget(Line::from(spans), area);
    }
}
