//! # NotificationBanner Component
//!
//! Single line showing the front of the notification queue, colored by
//! level. Expiry is handled by `App::prune_notifications`; the banner only
//! draws what it's given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::notification::{Notification, NotificationLevel};
use crate::tui::component::Component;

pub struct NotificationBanner<'a> {
    pub notification: Option<&'a Notification>,
    /// Notifications waiting behind the visible one.
    pub queued: usize,
}

impl<'a> NotificationBanner<'a> {
    pub fn new(notification: Option<&'a Notification>, queued: usize) -> Self {
        Self {
            notification,
            queued,
        }
    }
}

fn level_style(level: NotificationLevel) -> (Style, &'static str) {
    match level {
        NotificationLevel::Info => (Style::default().fg(Color::Green), "✓"),
        NotificationLevel::Warn => (Style::default().fg(Color::Yellow), "!"),
        NotificationLevel::Error => (
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            "✗",
        ),
    }
}

impl Component for NotificationBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(notification) = self.notification else {
            return;
        };
        let (style, icon) = level_style(notification.level);
        let mut spans = vec![Span::styled(
            format!(" {icon} {}", notification.message),
            style,
        )];
        if self.queued > 0 {
            spans.push(Span::styled(
                format!("  (+{} more)", self.queued),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
