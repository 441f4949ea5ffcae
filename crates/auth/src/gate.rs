//! Protected-view gate.
//!
//! A pure function of the [`AuthContext`]: either the view is rendered with
//! the current session, or the caller is told where to redirect.

use storefront_core::Route;

use crate::context::AuthContext;
use crate::session::Session;

/// Outcome of gating a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<T> {
    Render(T),
    Redirect(Route),
}

impl<T> Gate<T> {
    pub fn is_render(&self) -> bool {
        matches!(self, Gate::Render(_))
    }

    pub fn redirect_target(&self) -> Option<Route> {
        match self {
            Gate::Redirect(route) => Some(*route),
            Gate::Render(_) => None,
        }
    }

    pub fn into_rendered(self) -> Option<T> {
        match self {
            Gate::Render(v) => Some(v),
            Gate::Redirect(_) => None,
        }
    }
}

/// Anything that renders only for an authenticated session.
pub trait ProtectedView {
    type Output;

    fn render(&self, session: &Session) -> Self::Output;
}

impl<F, T> ProtectedView for F
where
    F: Fn(&Session) -> T,
{
    type Output = T;

    fn render(&self, session: &Session) -> T {
        self(session)
    }
}

/// Render `view` if a session is present, otherwise redirect to the login view.
pub fn protect<V>(ctx: &AuthContext, view: &V) -> Gate<V::Output>
where
    V: ProtectedView + ?Sized,
{
    match ctx.current_session() {
        Some(session) => Gate::Render(view.render(session)),
        None => {
            tracing::debug!("no session; redirecting to login");
            Gate::Redirect(Route::Login)
        }
    }
}

/// Where navigating to `requested` actually lands.
pub fn resolve_route(ctx: &AuthContext, requested: Route) -> Route {
    if requested.is_protected() && !ctx.is_authenticated() {
        Route::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::AccessToken;
    use crate::store::MemorySessionStore;
    use storefront_core::{NotificationLog, UserId};

    fn logged_in() -> AuthContext {
        let mut ctx = AuthContext::new(Arc::new(MemorySessionStore::new()));
        ctx.login(Session::new(
            AccessToken::new("jwt").unwrap(),
            UserId::new("user-1").unwrap(),
        ))
        .unwrap();
        ctx
    }

    struct Greeting;

    impl ProtectedView for Greeting {
        type Output = String;

        fn render(&self, session: &Session) -> String {
            format!("hello {}", session.user_id())
        }
    }

    #[test]
    fn renders_with_session() {
        let ctx = logged_in();
        assert_eq!(protect(&ctx, &Greeting), Gate::Render("hello user-1".to_string()));
    }

    #[test]
    fn closures_are_views() {
        let ctx = logged_in();
        let gate = protect(&ctx, &|s: &Session| s.user_id().to_string());
        assert_eq!(gate.into_rendered().as_deref(), Some("user-1"));
    }

    #[test]
    fn redirects_after_logout() {
        let mut ctx = logged_in();
        ctx.logout(&NotificationLog::new());

        let gate = protect(&ctx, &Greeting);
        assert!(!gate.is_render());
        assert_eq!(gate.redirect_target(), Some(Route::Login));
        assert_eq!(resolve_route(&ctx, Route::Products), Route::Login);
    }

    #[test]
    fn public_routes_resolve_unchanged() {
        let ctx = AuthContext::new(Arc::new(MemorySessionStore::new()));
        assert_eq!(resolve_route(&ctx, Route::Login), Route::Login);
        assert_eq!(resolve_route(&logged_in(), Route::Products), Route::Products);
    }
}
