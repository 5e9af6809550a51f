//! # Application State
//!
//! Core business state for Quotebook. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: QuoteStore               // canonical quotes + persistence
//! ├── categories: Vec<String>         // derived, recomputed after each mutation
//! ├── filter: CategoryFilter          // current selection (persisted via store)
//! ├── view: QuoteView                 // filtered list or one random quote
//! ├── last_viewed: Option<Quote>      // session-scoped, never persisted
//! ├── status_message: String          // status bar text
//! ├── notifications: VecDeque         // popup queue
//! ├── sync_state: SyncState           // Idle / Syncing
//! ├── sync: SyncSettings              // policy, batch size, label
//! ├── pending: Vec<PendingWrite>      // writes deferred while Syncing
//! └── last_synced_at: Option<DateTime>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use log::{error, info, warn};

use crate::SyncPolicy;
use crate::core::category::{CategoryFilter, apply_filter, categories_of};
use crate::core::config::{DEFAULT_BATCH_SIZE, DEFAULT_CATEGORY_LABEL, ResolvedConfig};
use crate::core::notification::{Notification, NotificationLevel};
use crate::core::quote::Quote;
use crate::core::store::QuoteStore;
use crate::sync::{SyncJob, SyncState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteView {
    /// Every quote matching the current filter.
    List,
    /// The last randomly picked quote.
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    pub enabled: bool,
    pub policy: SyncPolicy,
    pub batch_size: usize,
    pub category_label: String,
    pub push_on_add: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            policy: SyncPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            category_label: DEFAULT_CATEGORY_LABEL.to_string(),
            push_on_add: false,
        }
    }
}

impl From<&ResolvedConfig> for SyncSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            enabled: config.sync_enabled,
            policy: config.policy,
            batch_size: config.batch_size,
            category_label: config.category_label.clone(),
            push_on_add: config.push_on_add,
        }
    }
}

/// A store write that arrived while a sync cycle was in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    Add(Quote),
    Import(Vec<Quote>),
}

pub struct App {
    pub store: QuoteStore,
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
    pub view: QuoteView,
    pub last_viewed: Option<Quote>,
    pub status_message: String,
    pub notifications: VecDeque<Notification>,
    pub sync_state: SyncState,
    pub sync: SyncSettings,
    pub pending: Vec<PendingWrite>,
    pub last_synced_at: Option<DateTime<Local>>,
}

impl App {
    pub fn new(store: QuoteStore, sync: SyncSettings) -> Self {
        let categories = categories_of(store.quotes());
        let filter = store.selected_category().clone().resolve(&categories);
        Self {
            store,
            categories,
            filter,
            view: QuoteView::List,
            last_viewed: None,
            status_message: String::from("Welcome to Quotebook!"),
            notifications: VecDeque::new(),
            sync_state: SyncState::Idle,
            sync,
            pending: Vec::new(),
            last_synced_at: None,
        }
    }

    pub fn from_config(store: QuoteStore, config: &ResolvedConfig) -> Self {
        Self::new(store, SyncSettings::from(config))
    }

    /// Quotes matching the current filter.
    pub fn visible_quotes(&self) -> Vec<&Quote> {
        apply_filter(self.store.quotes(), &self.filter)
    }

    pub fn is_syncing(&self) -> bool {
        self.sync_state == SyncState::Syncing
    }

    pub fn plan_sync(&self) -> SyncJob {
        SyncJob::plan(
            self.sync.policy,
            self.store.quotes(),
            self.sync.batch_size,
            &self.sync.category_label,
        )
    }

    /// Queues a notification and mirrors it to the log.
    pub fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!("Notify: {}", notification.message),
            NotificationLevel::Warn => warn!("Notify: {}", notification.message),
            NotificationLevel::Error => error!("Notify: {}", notification.message),
        }
        self.notifications.push_back(notification);
    }

    /// Drops expired notifications and marks the new front as displayed.
    pub fn prune_notifications(&mut self) {
        while self.notifications.front().is_some_and(|n| n.is_expired()) {
            self.notifications.pop_front();
        }
        if let Some(front) = self.notifications.front_mut() {
            front.mark_displayed();
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Recomputes the category index and downgrades a stale filter to `All`.
    pub fn refresh_categories(&mut self) {
        self.categories = categories_of(self.store.quotes());
        let resolved = self.filter.clone().resolve(&self.categories);
        if resolved != self.filter {
            info!("Selected category '{}' no longer exists", self.filter.label());
            self.set_filter(resolved);
        }
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if let Err(e) = self.store.set_selected_category(filter.clone()) {
            warn!("Failed to persist selected category: {}", e);
        }
        self.filter = filter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{KeyValueStore, MemoryStore};
    use crate::core::store::SELECTED_CATEGORY_KEY;
    use crate::test_support::{quote, test_app, test_app_with};
    use std::time::Duration;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Quotebook!");
        assert_eq!(app.sync_state, SyncState::Idle);
        assert_eq!(app.filter, CategoryFilter::All);
        assert_eq!(app.view, QuoteView::List);
        assert_eq!(app.categories, vec!["Love", "Education", "Motivation"]);
    }

    #[test]
    fn test_stale_persisted_filter_resolves_to_all() {
        let mut storage = MemoryStore::new();
        storage.set(SELECTED_CATEGORY_KEY, "\"Gone\"").unwrap();
        let store = QuoteStore::load(Box::new(storage));
        let app = App::new(store, SyncSettings::default());
        assert_eq!(app.filter, CategoryFilter::All);
    }

    #[test]
    fn test_persisted_filter_is_restored() {
        let mut storage = MemoryStore::new();
        storage.set(SELECTED_CATEGORY_KEY, "\"Love\"").unwrap();
        let store = QuoteStore::load(Box::new(storage));
        let app = App::new(store, SyncSettings::default());
        assert_eq!(app.filter, CategoryFilter::parse("Love"));
        assert_eq!(app.visible_quotes().len(), 1);
    }

    #[test]
    fn test_refresh_categories_drops_vanished_filter() {
        let mut app = test_app_with(vec![quote("A.", "Life")]);
        app.set_filter(CategoryFilter::parse("Life"));
        app.store.replace_all(vec![quote("B.", "Server")]).unwrap();
        app.refresh_categories();
        assert_eq!(app.categories, vec!["Server"]);
        assert_eq!(app.filter, CategoryFilter::All);
    }

    #[test]
    fn test_prune_notifications() {
        let mut app = test_app();
        app.notify(Notification::info("first").with_duration(Duration::from_nanos(1)));
        app.notify(Notification::info("second"));

        app.prune_notifications();
        assert_eq!(app.notifications.len(), 2);
        std::thread::sleep(Duration::from_millis(2));
        app.prune_notifications();
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].message, "second");
        assert!(app.notifications[0].displayed_at.is_some());
    }
}
