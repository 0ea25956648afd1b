//! Last good feed, replaced atomically.

use crate::core::feed::Feed;
use crate::errors::AppResult;
use std::sync::{Arc, RwLock};

/// Readers always see either the previous or the next complete feed.
#[derive(Debug, Default)]
pub struct FeedCache {
    current: RwLock<Option<Arc<Feed>>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<Feed>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn replace(&self, feed: Feed) -> Arc<Feed> {
        let feed = Arc::new(feed);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(Arc::clone(&feed));
        feed
    }

    /// Build a new feed off to the side; swap it in only on success.
    pub fn refresh<F>(&self, build: F) -> AppResult<Arc<Feed>>
    where
        F: FnOnce() -> AppResult<Feed>,
    {
        match build() {
            Ok(feed) => Ok(self.replace(feed)),
            Err(e) => {
                log::warn!("Refresh failed, keeping previous feed: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn feed(ics: &str) -> Feed {
        Feed {
            events: Vec::new(),
            ics: ics.to_string(),
        }
    }

    #[test]
    fn empty_until_first_replace() {
        let cache = FeedCache::new();
        assert!(cache.current().is_none());
        cache.replace(feed("A"));
        assert_eq!(cache.current().unwrap().ics, "A");
    }

    #[test]
    fn failed_refresh_keeps_previous_feed() {
        let cache = FeedCache::new();
        cache.refresh(|| Ok(feed("A"))).unwrap();
        let err = cache
            .refresh(|| Err(AppError::Retrieval("link expired".into())))
            .unwrap_err();
        assert!(err.to_string().contains("link expired"));
        assert_eq!(cache.current().unwrap().ics, "A");
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let cache = FeedCache::new();
        cache.replace(feed("A"));
        let held = cache.current().unwrap();
        cache.replace(feed("B"));
        assert_eq!(held.ics, "A");
        assert_eq!(cache.current().unwrap().ics, "B");
    }
}
