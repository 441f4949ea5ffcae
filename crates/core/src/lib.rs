//! `storefront-core`: shared client building blocks.
//!
//! This crate contains **pure** primitives (no network, no storage): identifiers,
//! navigation targets and the user notification seam.

pub mod id;
pub mod notification;
pub mod route;

pub use id::{IdError, UserId};
pub use notification::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use route::Route;
