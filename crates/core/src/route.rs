//! Client-side navigation targets.

use serde::{Deserialize, Serialize};

/// A view the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Public login view.
    Login,
    /// Protected product submission view.
    Products,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Products => "/products",
        }
    }

    /// Whether the view requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Products)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
