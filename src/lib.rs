//! Content access layer for the SAIVO marketing site.
//!
//! Wraps the site's Firestore `news` collection behind a small service:
//! published-only listings, featured and category views, substring search,
//! counter mutations, and a reachability probe. Read paths degrade to a
//! hard-coded fallback dataset when the store is unreachable, so a transient
//! outage renders as stale content instead of an error page. The contact-form
//! forwarder to the Telegram Bot API lives here too.
//!
//! The presentation layer owns loading/error UI, debouncing, and timeouts:
//! it races these futures against a timer and drops them on expiry, which
//! cancels the underlying request.

pub mod config;
pub mod fallback;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use config::{Config, ConfigError, FirestoreConfig, TelegramConfig};
pub use model::{Article, ArticleUpdate, Author, NewsStats};
pub use notify::{ContactMessage, ContactNotifier, NotifyError};
pub use service::{NewsService, ServiceOptions, DEFAULT_RECENT_LIMIT};
pub use store::{ArticleStore, Counter, FirestoreClient, StoreError};
