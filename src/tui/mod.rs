//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Sync cycles, push-on-add requests and the periodic timer run as tokio
//! tasks. They never touch `App`; they send `Action`s over an mpsc channel
//! that the loop drains between frames.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 250ms waiting for input and only redraws after an
//! event, a background action, or when a notification is on screen (so it
//! disappears on time).

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::notification::Notification;
use crate::core::quote::Quote;
use crate::core::state::App;
use crate::core::store::QuoteStore;
use crate::core::transfer::{export_store, import_into};
use crate::sync::{HttpRemote, RemoteSource, SyncJob, SyncScheduler, run_cycle};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FormEvent, PathPrompt, PromptEvent, PromptPurpose, QuoteForm, QuoteViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands; arrows move between categories and scroll.
    Browse,
    /// Typing goes into the add-quote form. Esc returns to Browse.
    Form,
    /// The import/export path overlay is open.
    Prompt,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub quote_view: QuoteViewState,
    pub form: QuoteForm,
    pub input_mode: InputMode,
    /// Path overlay (None = hidden)
    pub prompt: Option<PathPrompt>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            quote_view: QuoteViewState::new(),
            form: QuoteForm::new(),
            input_mode: InputMode::Browse,
            prompt: None,
        }
    }
}

/// What a key press means in browse mode.
#[derive(Debug, Clone, PartialEq)]
enum BrowseCommand {
    Dispatch(Action),
    Scroll,
    OpenForm,
    OpenPrompt(PromptPurpose),
    Ignore,
}

fn browse_command(event: &TuiEvent) -> BrowseCommand {
    match event {
        TuiEvent::InputChar('r') | TuiEvent::InputChar(' ') => {
            BrowseCommand::Dispatch(Action::ShowRandom)
        }
        TuiEvent::InputChar('l') => BrowseCommand::Dispatch(Action::ShowList),
        TuiEvent::CursorLeft => BrowseCommand::Dispatch(Action::CycleCategory { forward: false }),
        TuiEvent::CursorRight => BrowseCommand::Dispatch(Action::CycleCategory { forward: true }),
        TuiEvent::InputChar('s') => BrowseCommand::Dispatch(Action::SyncRequested),
        TuiEvent::InputChar('q') => BrowseCommand::Dispatch(Action::Quit),
        TuiEvent::InputChar('a') | TuiEvent::Tab => BrowseCommand::OpenForm,
        TuiEvent::InputChar('e') => BrowseCommand::OpenPrompt(PromptPurpose::Export),
        TuiEvent::InputChar('i') => BrowseCommand::OpenPrompt(PromptPurpose::Import),
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => BrowseCommand::Scroll,
        _ => BrowseCommand::Ignore,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            // Non-blinking: continuous redraws would keep resetting the blink timer
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
    }
}

/// Build the HTTP remote, or `None` when sync is off or the client can't be created.
fn build_remote(config: &ResolvedConfig, app: &mut App) -> Option<Arc<dyn RemoteSource>> {
    if !config.sync_enabled {
        info!("Sync disabled by configuration");
        return None;
    }
    match HttpRemote::new(config.endpoint.clone(), config.request_timeout) {
        Ok(remote) => Some(Arc::new(remote)),
        Err(e) => {
            app.sync.enabled = false;
            app.notify(Notification::error(format!("Sync unavailable: {e}")));
            None
        }
    }
}

/// Owns the background tasks started by effects.
struct Dispatcher {
    remote: Option<Arc<dyn RemoteSource>>,
    tx: mpsc::Sender<Action>,
    handles: Vec<tokio::task::AbortHandle>,
}

impl Dispatcher {
    /// Starts whatever I/O an effect asks for. Returns true on `Effect::Quit`.
    fn run(&mut self, app: &mut App, effect: Effect) -> bool {
        self.handles.retain(|h| !h.is_finished());
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::SpawnSync(job) => {
                match &self.remote {
                    Some(remote) => {
                        self.handles
                            .push(spawn_sync(job, remote.clone(), self.tx.clone()));
                    }
                    None => {
                        // Nothing will ever report back; unwind the Syncing state now.
                        let effect = update(app, Action::SyncFailed("sync is disabled".into()));
                        return self.run(app, effect);
                    }
                }
                false
            }
            Effect::PushQuotes(quotes) => {
                if let Some(remote) = &self.remote {
                    self.handles
                        .push(spawn_push(quotes, remote.clone(), self.tx.clone()));
                }
                false
            }
        }
    }

    fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let store = QuoteStore::open(&config.data_dir).map_err(io::Error::other)?;
    let mut app = App::from_config(store, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let remote = build_remote(&config, &mut app);
    let _scheduler = remote.as_ref().map(|_| {
        let tick_tx = tx.clone();
        SyncScheduler::start(config.sync_interval, move || {
            tick_tx.send(Action::SyncRequested).is_ok()
        })
    });
    let mut dispatcher = Dispatcher {
        remote,
        tx,
        handles: Vec::new(),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Keep redrawing while a banner is up so it expires on time
        if !app.notifications.is_empty() {
            app.prune_notifications();
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                let effect = update(&mut app, Action::Quit);
                if dispatcher.run(&mut app, effect) {
                    break 'main;
                }
                continue;
            }

            match tui.input_mode {
                InputMode::Browse => match browse_command(&event) {
                    BrowseCommand::Dispatch(action) => {
                        let reset_scroll = matches!(
                            action,
                            Action::CycleCategory { .. } | Action::ShowList
                        );
                        let effect = update(&mut app, action);
                        if reset_scroll {
                            tui.quote_view.reset_scroll();
                        }
                        if dispatcher.run(&mut app, effect) {
                            break 'main;
                        }
                    }
                    BrowseCommand::Scroll => {
                        tui.quote_view.handle_event(&event);
                    }
                    BrowseCommand::OpenForm => tui.input_mode = InputMode::Form,
                    BrowseCommand::OpenPrompt(purpose) => {
                        let initial = match purpose {
                            PromptPurpose::Export => config.export_path.display().to_string(),
                            PromptPurpose::Import => String::new(),
                        };
                        tui.prompt = Some(PathPrompt::new(purpose, initial));
                        tui.input_mode = InputMode::Prompt;
                    }
                    BrowseCommand::Ignore => {}
                },
                InputMode::Form => match tui.form.handle_event(&event) {
                    Some(FormEvent::Submit) => {
                        if let Some(effect) = tui.form.controller.submit(&mut app) {
                            tui.input_mode = InputMode::Browse;
                            if dispatcher.run(&mut app, effect) {
                                break 'main;
                            }
                        }
                    }
                    Some(FormEvent::Cancel) => tui.input_mode = InputMode::Browse,
                    None => {}
                },
                InputMode::Prompt => {
                    let Some(prompt) = tui.prompt.as_mut() else {
                        tui.input_mode = InputMode::Browse;
                        continue;
                    };
                    let purpose = prompt.purpose;
                    match prompt.handle_event(&event) {
                        Some(PromptEvent::Confirm(path)) => {
                            // Failures are already reported as notifications.
                            let _ = match purpose {
                                PromptPurpose::Export => export_store(&mut app, &path),
                                PromptPurpose::Import => import_into(&mut app, &path),
                            };
                            tui.prompt = None;
                            tui.input_mode = InputMode::Browse;
                        }
                        Some(PromptEvent::Cancel) => {
                            tui.prompt = None;
                            tui.input_mode = InputMode::Browse;
                        }
                        None => {}
                    }
                }
            }
        }

        // Handle background task actions (sync results, timer ticks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if dispatcher.run(&mut app, effect) {
                break 'main;
            }
        }
    }

    dispatcher.abort_all();
    ratatui::restore();
    info!("Quotebook TUI exited");
    Ok(())
}

fn spawn_sync(
    job: SyncJob,
    remote: Arc<dyn RemoteSource>,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning sync cycle ({:?})", job.policy);
    let handle = tokio::spawn(async move {
        let action = match run_cycle(remote.as_ref(), &job).await {
            Ok(outcome) => Action::SyncCompleted(outcome),
            Err(e) => {
                warn!("Sync cycle failed: {}", e);
                Action::SyncFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send sync result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_push(
    quotes: Vec<Quote>,
    remote: Arc<dyn RemoteSource>,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning push of {} quotes", quotes.len());
    let handle = tokio::spawn(async move {
        for quote in &quotes {
            let action = match remote.push_quote(quote).await {
                Ok(ack) => {
                    debug!("Remote acknowledged quote: {}", ack);
                    Action::QuotePushed
                }
                Err(e) => Action::QuotePushFailed(e.to_string()),
            };
            if tx.send(action).is_err() {
                warn!("Failed to send push result: receiver dropped");
                return;
            }
        }
    });
    handle.abort_handle()
}
