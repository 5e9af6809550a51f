//! # QuoteView Component
//!
//! Main display area. Shows either every quote matching the current filter
//! or the single quote picked by the last random draw.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `QuoteViewState` lives in `TuiState` and owns the scroll position
//! - `QuoteDisplay` is created each frame with borrowed props

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::quote::Quote;
use crate::core::render::{NO_QUOTES_MESSAGE, render_one};
use crate::core::state::QuoteView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Scroll position over the full list, in rows.
///
/// Kept as `usize` because an imported or appended store can hold more
/// rows than a `u16` canvas can address. Only the rows in view are laid
/// out into a `ScrollView` each frame.
#[derive(Default)]
pub struct QuoteViewState {
    pub offset: usize,
    /// Total content height from the last render, for clamping.
    pub content_height: usize,
    pub viewport_height: u16,
}

impl QuoteViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_scroll(&mut self) {
        self.offset = 0;
    }

    fn clamp_scroll(&mut self) {
        let max_y = self
            .content_height
            .saturating_sub(usize::from(self.viewport_height));
        self.offset = self.offset.min(max_y);
    }
}

impl EventHandler for QuoteViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = usize::from(self.viewport_height);
        match event {
            TuiEvent::CursorUp => self.offset = self.offset.saturating_sub(1),
            TuiEvent::CursorDown => self.offset = self.offset.saturating_add(1),
            TuiEvent::ScrollPageUp => self.offset = self.offset.saturating_sub(page),
            TuiEvent::ScrollPageDown => self.offset = self.offset.saturating_add(page),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// Indices of the quotes overlapping rows `offset..offset + viewport`.
///
/// `prefix_heights[i]` is the row just past quote `i`.
fn visible_range(prefix_heights: &[usize], offset: usize, viewport: usize) -> Range<usize> {
    let end_row = offset.saturating_add(viewport);
    let start = prefix_heights.partition_point(|&end| end <= offset);
    let end = prefix_heights
        .partition_point(|&end| end < end_row)
        .saturating_add(1)
        .min(prefix_heights.len());
    start..end.max(start)
}

fn quote_paragraph(quote: &Quote) -> Paragraph<'static> {
    Paragraph::new(render_one(quote)).wrap(Wrap { trim: true })
}

pub struct QuoteDisplay<'a> {
    state: &'a mut QuoteViewState,
    view: QuoteView,
    visible: &'a [&'a Quote],
    last_viewed: Option<&'a Quote>,
}

impl<'a> QuoteDisplay<'a> {
    pub fn new(
        state: &'a mut QuoteViewState,
        view: QuoteView,
        visible: &'a [&'a Quote],
        last_viewed: Option<&'a Quote>,
    ) -> Self {
        Self {
            state,
            view,
            visible,
            last_viewed,
        }
    }

    fn render_empty(frame: &mut Frame, area: Rect, title: &str) {
        let empty = Paragraph::new(NO_QUOTES_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title.to_string()));
        frame.render_widget(empty, area);
    }

    fn render_single(frame: &mut Frame, area: Rect, quote: &Quote) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{}\"", quote.text),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("- {}", quote.category),
                Style::default().fg(Color::Cyan),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Random quote "));
        frame.render_widget(paragraph, area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(format!(" Quotes ({}) ", self.visible.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = inner.width.saturating_sub(1); // scrollbar column
        let prefix_heights: Vec<usize> = self
            .visible
            .iter()
            .scan(0usize, |acc, quote| {
                *acc = acc.saturating_add(quote_paragraph(quote).line_count(content_width));
                Some(*acc)
            })
            .collect();
        let row_start = |i: usize| if i > 0 { prefix_heights[i - 1] } else { 0 };

        self.state.content_height = prefix_heights.last().copied().unwrap_or(0);
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();

        // The canvas only covers the quotes in view.
        let range = visible_range(&prefix_heights, self.state.offset, usize::from(inner.height));
        let window_start = row_start(range.start);
        let window_end = range.end.checked_sub(1).map_or(window_start, |i| prefix_heights[i]);
        let window_height = u16::try_from(window_end - window_start).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for i in range {
            let height = u16::try_from(prefix_heights[i] - row_start(i)).unwrap_or(u16::MAX);
            let height = height.min(window_height - y_offset);
            scroll_view.render_widget(
                quote_paragraph(self.visible[i]),
                Rect::new(0, y_offset, content_width, height),
            );
            y_offset = y_offset.saturating_add(height);
        }

        let mut view_state = ScrollViewState::default();
        view_state.set_offset(Position {
            x: 0,
            y: u16::try_from(self.state.offset.saturating_sub(window_start)).unwrap_or(u16::MAX),
        });
        frame.render_stateful_widget(scroll_view, inner, &mut view_state);

        let max_scroll = self
            .state
            .content_height
            .saturating_sub(usize::from(inner.height));
        if max_scroll > 0 {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.state.offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                inner,
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for QuoteDisplay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match (self.view, self.last_viewed) {
            (QuoteView::Single, Some(quote)) => Self::render_single(frame, area, quote),
            _ if self.visible.is_empty() => Self::render_empty(frame, area, " Quotes "),
            _ => self.render_list(frame, area),
        }
    }
}
