//! Memoized text-fit checks.

use crate::Result;
use crate::text::{RenderResult, TextMeasurer, TextStyle, UnavailableTextMeasurer};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Number of measurements kept by [`MetricsChecker::default`].
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(512).unwrap();

/// Everything that influences a measurement; doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderQuery {
    pub style: TextStyle,
    pub text: String,
    pub max_width: u32,
    pub max_lines: u32,
    /// Caller supplied discriminator, e.g. to keep per-translation entries apart.
    pub cache_key: Option<String>,
}

impl RenderQuery {
    pub const DEFAULT_MAX_WIDTH: u32 = 1000;
    pub const DEFAULT_MAX_LINES: u32 = 1;

    pub fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            max_width: Self::DEFAULT_MAX_WIDTH,
            max_lines: Self::DEFAULT_MAX_LINES,
            cache_key: None,
        }
    }

    pub fn with_limits(mut self, max_width: u32, max_lines: u32) -> Self {
        self.max_width = max_width;
        self.max_lines = max_lines;
        self
    }

    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = Some(cache_key.into());
        self
    }
}

/// Answers "does this text fit", memoizing measurements in a bounded LRU cache.
///
/// The backend runs outside the cache lock; concurrent misses on one key may both measure, and
/// both store the same result.
pub struct MetricsChecker {
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    cache: Mutex<LruCache<RenderQuery, RenderResult>>,
}

impl Default for MetricsChecker {
    /// A checker without a rendering backend: every measurement fails.
    fn default() -> Self {
        Self::new(Arc::new(UnavailableTextMeasurer))
    }
}

impl std::fmt::Debug for MetricsChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsChecker")
            .field("cached", &self.cache_len())
            .finish_non_exhaustive()
    }
}

impl MetricsChecker {
    pub fn new(measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        Self::with_capacity(measurer, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            measurer,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Measures the query's text wrapped at `max_width`.
    ///
    /// Equal queries are answered from the cache without calling the backend. Failures are not
    /// cached.
    pub fn measure(&self, query: &RenderQuery) -> Result<RenderResult> {
        if let Some(hit) = self.lock_cache().get(query) {
            return Ok(*hit);
        }

        tracing::debug!(text = %query.text, font = %query.style.font, "measuring text");
        let result = self.measurer.measure(
            &query.text,
            &query.style,
            Some(f64::from(query.max_width)),
        )?;
        self.lock_cache().put(query.clone(), result);
        Ok(result)
    }

    /// Whether the text fits within the query's `max_width` and `max_lines`.
    pub fn fits(&self, query: &RenderQuery) -> Result<bool> {
        let result = self.measure(query)?;
        Ok(result.width <= f64::from(query.max_width) && result.lines <= query.max_lines as usize)
    }

    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<RenderQuery, RenderResult>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
