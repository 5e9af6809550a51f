//! # Core Application Logic
//!
//! This module contains Quotebook's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • QuoteStore (data)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    CLI     │      │    Sync    │
//!     │  Adapter   │      │ (headless) │      │  (tokio)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quote`]: the `Quote` value type and the seed set
//! - [`storage`]: the `KeyValueStore` persistence seam
//! - [`store`]: `QuoteStore`, the owner of the quote list
//! - [`category`]: category index and filter
//! - [`render`]: random pick and text projection
//! - [`form`]: the add-quote form controller
//! - [`transfer`]: JSON export/import
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`

pub mod action;
pub mod category;
pub mod config;
pub mod form;
pub mod notification;
pub mod quote;
pub mod render;
pub mod state;
pub mod storage;
pub mod store;
pub mod transfer;
