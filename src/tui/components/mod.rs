//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: quote count, sync state and status
//! - `CategoryBar`: category strip with the active filter highlighted
//! - `NotificationBanner`: front of the notification queue
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `QuoteForm`: the two add-quote inputs
//! - `QuoteViewState` / `QuoteDisplay`: scrollable quote list or single quote
//! - `PathPrompt`: import/export path overlay
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! CategoryBar::new(&app.categories, &app.filter).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs                  (this file)
//! ├── title_bar.rs
//! ├── category_bar.rs
//! ├── quote_view.rs
//! ├── quote_form.rs
//! ├── path_prompt.rs
//! └── notification_banner.rs
//! ```

mod category_bar;
mod notification_banner;
pub mod path_prompt;
pub mod quote_form;
pub mod quote_view;
mod title_bar;

pub use category_bar::CategoryBar;
pub use notification_banner::NotificationBanner;
pub use path_prompt::{PathPrompt, PromptEvent, PromptPurpose};
pub use quote_form::{FormEvent, QuoteForm};
pub use quote_view::{QuoteDisplay, QuoteViewState};
pub use title_bar::TitleBar;
