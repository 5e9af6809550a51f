//! # Actions
//!
//! Everything that can happen in Quotebook becomes an `Action`.
//! User picks a category? That's `Action::SelectCategory(filter)`.
//! A sync cycle finishes? That's `Action::SyncCompleted(outcome)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the adapter has to start. Network work never
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Sync exclusion
//!
//! While a cycle is in flight, adds and imports are parked in `App::pending`
//! and applied once the cycle finishes. A replace therefore never discards a
//! quote the user added mid-sync.

use chrono::Local;
use log::{debug, info, warn};

use crate::core::category::CategoryFilter;
use crate::core::notification::Notification;
use crate::core::quote::Quote;
use crate::core::render::{NO_QUOTES_RANDOM_MESSAGE, pick_random};
use crate::core::state::{App, PendingWrite, QuoteView};
use crate::sync::{SyncJob, SyncOutcome, SyncState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowRandom,
    ShowList,
    SelectCategory(CategoryFilter),
    CycleCategory { forward: bool },
    AddQuote(Quote),
    ImportQuotes(Vec<Quote>),
    Notify(Notification),
    SyncRequested,
    SyncCompleted(SyncOutcome),
    SyncFailed(String),
    QuotePushed,
    QuotePushFailed(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnSync(SyncJob),
    PushQuotes(Vec<Quote>),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::ShowRandom => {
            let picked = {
                let visible = app.visible_quotes();
                pick_random(&visible, &mut rand::rng()).cloned()
            };
            match picked {
                Some(quote) => {
                    app.last_viewed = Some(quote);
                    app.view = QuoteView::Single;
                }
                None => app.notify(Notification::warn(NO_QUOTES_RANDOM_MESSAGE)),
            }
            Effect::None
        }
        Action::ShowList => {
            app.view = QuoteView::List;
            Effect::None
        }
        Action::SelectCategory(filter) => {
            let filter = filter.resolve(&app.categories);
            app.status_message = format!("Category: {}", filter.label());
            app.set_filter(filter);
            app.view = QuoteView::List;
            Effect::None
        }
        Action::CycleCategory { forward } => {
            let next = app.filter.cycle(&app.categories, forward);
            update(app, Action::SelectCategory(next))
        }
        Action::AddQuote(quote) => {
            if app.is_syncing() {
                app.pending.push(PendingWrite::Add(quote));
                app.notify(Notification::info(
                    "Sync in progress; quote will be added when it finishes.",
                ));
                return Effect::None;
            }
            let added = add_quotes(app, vec![quote]);
            app.refresh_categories();
            app.notify(Notification::info("New quote added successfully!"));
            push_effect(app, added)
        }
        Action::ImportQuotes(quotes) => {
            if app.is_syncing() {
                app.pending.push(PendingWrite::Import(quotes));
                app.notify(Notification::info(
                    "Sync in progress; import will be applied when it finishes.",
                ));
                return Effect::None;
            }
            let count = quotes.len();
            import_quotes(app, quotes);
            app.refresh_categories();
            app.notify(Notification::info(format!("Imported {count} quotes successfully!")));
            Effect::None
        }
        Action::Notify(notification) => {
            app.notify(notification);
            Effect::None
        }
        Action::SyncRequested => {
            if app.is_syncing() {
                debug!("Sync already in flight, ignoring trigger");
                return Effect::None;
            }
            app.sync_state = SyncState::Syncing;
            app.status_message = "Syncing...".to_string();
            Effect::SpawnSync(app.plan_sync())
        }
        Action::SyncCompleted(outcome) => {
            let message = match outcome {
                SyncOutcome::Replace(quotes) => {
                    let count = quotes.len();
                    if let Err(e) = app.store.replace_all(quotes) {
                        app.notify(Notification::warn(format!(
                            "Could not save synced quotes: {e}"
                        )));
                    }
                    format!("Quotes synced with server: {count} quotes (local list replaced).")
                }
                SyncOutcome::Append(quotes) => {
                    let count = quotes.len();
                    import_quotes(app, quotes);
                    format!("Quotes fetched from server: {count} added.")
                }
                SyncOutcome::Pushed { sent } => format!("Quotes synced with server: {sent} sent."),
            };
            app.last_synced_at = Some(Local::now());
            app.notify(Notification::info(message));
            finish_sync(app)
        }
        Action::SyncFailed(reason) => {
            app.notify(Notification::error(format!(
                "Failed to sync quotes with server: {reason}"
            )));
            finish_sync(app)
        }
        Action::QuotePushed => {
            app.notify(Notification::info("Quote sent to the server successfully!"));
            Effect::None
        }
        Action::QuotePushFailed(reason) => {
            app.notify(Notification::error(format!(
                "Failed to send quote to the server: {reason}"
            )));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Back to Idle, then apply everything that was parked during the cycle.
fn finish_sync(app: &mut App) -> Effect {
    app.sync_state = SyncState::Idle;
    app.status_message = "Idle".to_string();

    let pending = std::mem::take(&mut app.pending);
    if !pending.is_empty() {
        info!("Applying {} writes deferred during sync", pending.len());
    }
    let mut added = Vec::new();
    for write in pending {
        match write {
            PendingWrite::Add(quote) => added.extend(add_quotes(app, vec![quote])),
            PendingWrite::Import(quotes) => import_quotes(app, quotes),
        }
    }
    app.refresh_categories();
    push_effect(app, added)
}

/// Appends quotes one at a time, returning those that were stored.
fn add_quotes(app: &mut App, quotes: Vec<Quote>) -> Vec<Quote> {
    let mut added = Vec::with_capacity(quotes.len());
    for quote in quotes {
        if let Err(e) = app.store.push(quote.clone()) {
            warn!("Quote kept in memory only: {}", e);
            app.notify(Notification::warn(format!("Quote added but not saved: {e}")));
        }
        added.push(quote);
    }
    added
}

fn import_quotes(app: &mut App, quotes: Vec<Quote>) {
    if let Err(e) = app.store.import_all(quotes) {
        app.notify(Notification::warn(format!("Quotes added but not saved: {e}")));
    }
}

fn push_effect(app: &App, added: Vec<Quote>) -> Effect {
    if app.sync.push_on_add && app.sync.enabled && !added.is_empty() {
        Effect::PushQuotes(added)
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyncPolicy;
    use crate::core::category::categories_of;
    use crate::core::notification::NotificationLevel;
    use crate::test_support::{quote, test_app, test_app_with};

    fn last_message(app: &App) -> &str {
        &app.notifications.back().unwrap().message
    }

    #[test]
    fn test_add_quote_appends_and_refreshes() {
        let mut app = test_app_with(vec![
            quote("Keep going.", "Motivation"),
            quote("Life is short.", "Life"),
        ]);
        let effect = update(&mut app, Action::AddQuote(quote("Live well.", "Life")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.categories, vec!["Motivation", "Life"]);

        update(&mut app, Action::SelectCategory(CategoryFilter::parse("Life")));
        assert_eq!(app.visible_quotes().len(), 2);
        assert_eq!(last_message(&app), "New quote added successfully!");
    }

    #[test]
    fn test_add_new_category_shows_up() {
        let mut app = test_app();
        update(&mut app, Action::AddQuote(quote("Be kind.", "Ethics")));
        assert!(app.categories.contains(&"Ethics".to_string()));
    }

    #[test]
    fn test_add_with_push_on_add_emits_push() {
        let mut app = test_app();
        app.sync.push_on_add = true;
        let q = quote("Be kind.", "Ethics");
        assert_eq!(
            update(&mut app, Action::AddQuote(q.clone())),
            Effect::PushQuotes(vec![q])
        );
    }

    #[test]
    fn test_show_random_sets_last_viewed() {
        let mut app = test_app_with(vec![quote("Only.", "One")]);
        update(&mut app, Action::ShowRandom);
        assert_eq!(app.last_viewed, Some(quote("Only.", "One")));
        assert_eq!(app.view, QuoteView::Single);
    }

    #[test]
    fn test_show_random_respects_filter() {
        let mut app = test_app_with(vec![quote("A.", "x"), quote("B.", "y")]);
        update(&mut app, Action::SelectCategory(CategoryFilter::parse("y")));
        for _ in 0..20 {
            update(&mut app, Action::ShowRandom);
            assert_eq!(app.last_viewed.as_ref().unwrap().category, "y");
        }
    }

    #[test]
    fn test_show_random_on_empty_store_notifies() {
        let mut app = test_app_with(Vec::new());
        update(&mut app, Action::ShowRandom);
        assert!(app.last_viewed.is_none());
        assert_eq!(app.view, QuoteView::List);
        assert_eq!(last_message(&app), NO_QUOTES_RANDOM_MESSAGE);
    }

    #[test]
    fn test_select_category_persists_and_switches_view() {
        let mut app = test_app();
        update(&mut app, Action::ShowRandom);
        update(&mut app, Action::SelectCategory(CategoryFilter::parse("Love")));
        assert_eq!(app.view, QuoteView::List);
        assert_eq!(app.store.selected_category(), &CategoryFilter::parse("Love"));
    }

    #[test]
    fn test_select_unknown_category_falls_back() {
        let mut app = test_app();
        update(&mut app, Action::SelectCategory(CategoryFilter::parse("Nope")));
        assert_eq!(app.filter, CategoryFilter::All);
    }

    #[test]
    fn test_cycle_category() {
        let mut app = test_app();
        update(&mut app, Action::CycleCategory { forward: true });
        assert_eq!(app.filter, CategoryFilter::parse("Love"));
        update(&mut app, Action::CycleCategory { forward: false });
        assert_eq!(app.filter, CategoryFilter::All);
    }

    #[test]
    fn test_import_appends_all() {
        let mut app = test_app();
        update(
            &mut app,
            Action::ImportQuotes(vec![quote("One.", "A"), quote("Two.", "B")]),
        );
        assert_eq!(app.store.len(), 5);
        assert_eq!(last_message(&app), "Imported 2 quotes successfully!");
    }

    #[test]
    fn test_sync_request_transitions_to_syncing() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SyncRequested);
        assert!(matches!(effect, Effect::SpawnSync(ref job) if job.policy == SyncPolicy::Replace));
        assert_eq!(app.sync_state, SyncState::Syncing);

        // A second trigger while in flight is ignored.
        assert_eq!(update(&mut app, Action::SyncRequested), Effect::None);
    }

    #[test]
    fn test_replace_sync_discards_local_quotes() {
        let mut app = test_app();
        update(&mut app, Action::SyncRequested);
        let remote = vec![quote("a", "Server"), quote("b", "Server"), quote("c", "Server")];
        update(&mut app, Action::SyncCompleted(SyncOutcome::Replace(remote.clone())));

        assert_eq!(app.store.quotes(), remote.as_slice());
        assert_eq!(app.categories, vec!["Server"]);
        assert_eq!(app.sync_state, SyncState::Idle);
        assert!(app.last_synced_at.is_some());
    }

    #[test]
    fn test_append_sync_keeps_local_quotes() {
        let mut app = test_app();
        update(&mut app, Action::SyncRequested);
        update(
            &mut app,
            Action::SyncCompleted(SyncOutcome::Append(vec![quote("a", "Server")])),
        );
        assert_eq!(app.store.len(), 4);
        assert_eq!(categories_of(app.store.quotes()).last().unwrap(), "Server");
    }

    #[test]
    fn test_add_during_sync_survives_replace() {
        let mut app = test_app();
        update(&mut app, Action::SyncRequested);
        update(&mut app, Action::AddQuote(quote("Mine.", "Local")));
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.pending.len(), 1);

        update(
            &mut app,
            Action::SyncCompleted(SyncOutcome::Replace(vec![quote("a", "Server")])),
        );
        assert_eq!(app.store.quotes(), &[quote("a", "Server"), quote("Mine.", "Local")]);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_import_during_sync_is_deferred() {
        let mut app = test_app();
        update(&mut app, Action::SyncRequested);
        update(&mut app, Action::ImportQuotes(vec![quote("One.", "A")]));
        assert_eq!(app.store.len(), 3);
        update(&mut app, Action::SyncFailed("boom".into()));
        assert_eq!(app.store.len(), 4);
    }

    #[test]
    fn test_sync_failure_notifies_once_and_returns_idle() {
        let mut app = test_app();
        update(&mut app, Action::SyncRequested);
        let before = app.store.export_all();
        update(&mut app, Action::SyncFailed("network error: refused".into()));

        assert_eq!(app.sync_state, SyncState::Idle);
        assert_eq!(app.store.export_all(), before);
        let errors: Vec<_> = app
            .notifications
            .iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("refused"));
        assert!(app.last_synced_at.is_none());
    }

    #[test]
    fn test_deferred_adds_pushed_when_enabled() {
        let mut app = test_app();
        app.sync.push_on_add = true;
        update(&mut app, Action::SyncRequested);
        update(&mut app, Action::AddQuote(quote("Mine.", "Local")));
        let effect = update(&mut app, Action::SyncCompleted(SyncOutcome::Pushed { sent: 3 }));
        assert_eq!(effect, Effect::PushQuotes(vec![quote("Mine.", "Local")]));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
