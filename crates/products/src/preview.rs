//! Preview URLs for selected images.
//!
//! A preview URL is a transient display handle (think `blob:` URL). Each
//! [`PreviewUrl`] is registered with the [`PreviewUrls`] allocator that
//! created it and is released when dropped, so whoever owns the handle owns
//! the resource.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use uuid::Uuid;

use crate::file::FileHandle;

type Registry = Mutex<HashMap<String, String>>;

/// Allocator and registry of live preview URLs.
///
/// Cloning yields a handle to the same registry.
#[derive(Debug, Default, Clone)]
pub struct PreviewUrls {
    live: Arc<Registry>,
}

impl PreviewUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a fresh preview URL for `file`.
    pub fn create(&self, file: &FileHandle) -> PreviewUrl {
        let url = format!("blob:storefront/{}", Uuid::now_v7());
        lock(&self.live).insert(url.clone(), file.name().to_string());
        tracing::debug!(%url, file = file.name(), "preview allocated");

        PreviewUrl {
            url,
            registry: Arc::downgrade(&self.live),
        }
    }

    /// Number of previews not yet released.
    pub fn live_count(&self) -> usize {
        lock(&self.live).len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        lock(&self.live).contains_key(url)
    }
}

/// An allocated preview URL. Released on drop.
pub struct PreviewUrl {
    url: String,
    registry: Weak<Registry>,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl core::fmt::Debug for PreviewUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("PreviewUrl").field(&self.url).finish()
    }
}

impl core::fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.url)
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).remove(&self.url);
            tracing::debug!(url = %self.url, "preview released");
        }
    }
}

fn lock(registry: &Registry) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_preview() {
        let previews = PreviewUrls::new();
        let file = FileHandle::in_memory("a.png", vec![1, 2, 3]);

        let first = previews.create(&file);
        let second = previews.create(&file);
        assert_ne!(first.as_str(), second.as_str());
        assert_eq!(previews.live_count(), 2);

        let url = first.as_str().to_string();
        drop(first);
        assert!(!previews.is_live(&url));
        assert_eq!(previews.live_count(), 1);
    }

    #[test]
    fn preview_outliving_allocator_is_harmless() {
        let previews = PreviewUrls::new();
        let preview = previews.create(&FileHandle::in_memory("a.png", vec![0]));
        drop(previews);
        drop(preview);
    }
}
