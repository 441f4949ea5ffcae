//! Explicitly passed authentication context.
//!
//! There is no ambient/global session: whoever needs to know "who is logged
//! in" is handed an [`AuthContext`]. Only `login` and `logout` mutate it.

use std::sync::Arc;

use storefront_core::{Notification, Notifier, Route, UserId};

use crate::session::{AccessToken, Session};
use crate::store::{SessionStore, SessionStoreError, TOKEN_KEY, USER_ID_KEY};

pub struct AuthContext {
    session: Option<Session>,
    store: Arc<dyn SessionStore>,
}

impl core::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthContext")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    /// A logged-out context backed by `store`. Nothing is read from the store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { session: None, store }
    }

    /// Rehydrate the session persisted by a previous `login`.
    ///
    /// Both the token and the user id slot must be present and non-blank,
    /// otherwise the context starts logged out. A corrupt store also starts
    /// logged out; the next `login` or `logout` overwrites it.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self, SessionStoreError> {
        let slots = store
            .get(TOKEN_KEY)
            .and_then(|token| Ok((token, store.get(USER_ID_KEY)?)));
        let (token, user_id) = match slots {
            Ok(slots) => slots,
            Err(SessionStoreError::Corrupt { path, source }) => {
                tracing::warn!(
                    path = ?path,
                    error = %source,
                    "persisted session is unreadable; starting logged out"
                );
                (None, None)
            }
            Err(e) => return Err(e),
        };

        let session = match (token, user_id) {
            (Some(token), Some(user_id)) => {
                match (AccessToken::new(token), UserId::new(user_id)) {
                    (Ok(token), Ok(user_id)) => Some(Session::new(token, user_id)),
                    _ => {
                        tracing::warn!("persisted session is incomplete; starting logged out");
                        None
                    }
                }
            }
            (Some(_), None) => {
                tracing::warn!("persisted token has no user id; starting logged out");
                None
            }
            _ => None,
        };

        if let Some(session) = &session {
            tracing::info!(user_id = %session.user_id(), "session restored");
        }

        Ok(Self { session, store })
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Make `session` current and persist it.
    ///
    /// The session is current even when persisting fails; the error tells the
    /// caller it will not survive a restart.
    pub fn login(&mut self, session: Session) -> Result<(), SessionStoreError> {
        let persisted = self
            .store
            .set(TOKEN_KEY, session.token().as_str())
            .and_then(|()| self.store.set(USER_ID_KEY, session.user_id().as_str()));

        tracing::info!(user_id = %session.user_id(), "logged in");
        self.session = Some(session);

        if let Err(e) = &persisted {
            tracing::warn!(error = %e, "failed to persist session");
        }
        persisted
    }

    /// Drop the session and its persisted copy.
    ///
    /// Always succeeds from the caller's point of view and returns the view
    /// to navigate to. In-flight requests are not cancelled.
    pub fn logout(&mut self, notifier: &dyn Notifier) -> Route {
        let previous = self.session.take();

        for key in [TOKEN_KEY, USER_ID_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(error = %e, key, "failed to clear persisted session slot");
            }
        }

        match previous {
            Some(session) => tracing::info!(user_id = %session.user_id(), "logged out"),
            None => tracing::debug!("logout without an active session"),
        }

        notifier.notify(Notification::success("Logged out successfully"));
        Route::Login
    }
}
