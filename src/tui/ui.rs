use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{CategoryBar, NotificationBanner, QuoteDisplay, TitleBar};
use crate::tui::{InputMode, TuiState};

fn help_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Browse => {
            " r Random  l List  ←/→ Category  a Add  s Sync  e Export  i Import  q Quit"
        }
        InputMode::Form => " Tab Switch field  Enter Add quote  Esc Back",
        InputMode::Prompt => " Enter Confirm  Esc Cancel",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(1),
        Length(3),
        Length(1),
    ]);
    let [title_area, category_area, main_area, banner_area, form_area, help_area] =
        layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.store.len(),
        app.sync_state,
        app.sync.enabled.then_some(app.sync.policy),
    );
    title_bar.last_synced_at = app.last_synced_at;
    title_bar.status_message = app.status_message.clone();
    title_bar.render(frame, title_area);

    CategoryBar::new(&app.categories, &app.filter).render(frame, category_area);

    let visible = app.visible_quotes();
    QuoteDisplay::new(
        &mut tui.quote_view,
        app.view,
        &visible,
        app.last_viewed.as_ref(),
    )
    .render(frame, main_area);

    let queued = app.notifications.len().saturating_sub(1);
    NotificationBanner::new(app.notifications.front(), queued).render(frame, banner_area);

    tui.form.active = tui.input_mode == InputMode::Form;
    tui.form.render(frame, form_area);

    frame.render_widget(
        Span::styled(help_text(tui.input_mode), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlay last so it sits on top
    if let Some(prompt) = tui.prompt.as_mut() {
        prompt.render(frame, main_area);
    }
}
