//! `storefront-auth`: client-side authentication state and the view gate.
//!
//! This crate is decoupled from HTTP; obtaining a token is the caller's job.

pub mod context;
pub mod gate;
pub mod session;
pub mod store;

pub use context::AuthContext;
pub use gate::{Gate, ProtectedView, protect, resolve_route};
pub use session::{AccessToken, EmptyToken, Session};
pub use store::{
    FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError, TOKEN_KEY, USER_ID_KEY,
};
