//! # TitleBar Component
//!
//! Top status line: quote count, sync state, active policy, last sync time
//! and the transient status message.
//!
//! Purely presentational. Every field is a prop copied from `App` each frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     quote_count: app.store.len(),
//!     sync_state: app.sync_state,
//!     ..
//! };
//! title_bar.render(frame, title_area);
//! ```

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::SyncPolicy;
use crate::sync::SyncState;
use crate::tui::component::Component;

pub struct TitleBar {
    pub quote_count: usize,
    pub sync_state: SyncState,
    /// `None` when sync is disabled.
    pub policy: Option<SyncPolicy>,
    pub last_synced_at: Option<DateTime<Local>>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(quote_count: usize, sync_state: SyncState, policy: Option<SyncPolicy>) -> Self {
        Self {
            quote_count,
            sync_state,
            policy,
            last_synced_at: None,
            status_message: String::new(),
        }
    }

    fn sync_text(&self) -> String {
        let Some(policy) = self.policy else {
            return "sync off".to_string();
        };
        let last = match self.last_synced_at {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "never".to_string(),
        };
        format!(
            "sync {} ({}, last {})",
            self.sync_state.label(),
            policy.label(),
            last
        )
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sync_style = match self.sync_state {
            SyncState::Syncing => Style::default().fg(Color::Yellow),
            SyncState::Idle => Style::default().fg(Color::DarkGray),
        };

        let mut spans = vec![
            Span::styled("Quotebook", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({} quotes) | ", self.quote_count)),
            Span::styled(self.sync_text(), sync_style),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
