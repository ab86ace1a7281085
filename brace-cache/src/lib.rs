//! # brace-cache
//!
//! Memoizing [`RendererCache`] keyed by template text.
//!
//! Guarantees at most one compilation per distinct template, even when many
//! threads ask for the same template at once: the map lock is held only long
//! enough to fetch or insert a per-template slot, and the slot's `OnceLock`
//! serializes the compilation itself.
//!
//! ```rust
//! use std::collections::HashMap;
//! use brace_cache::RendererCache;
//!
//! let cache = RendererCache::default();
//! let ctx = HashMap::from([("name", "graef")]);
//! assert_eq!(cache.render("Hi {{ name }}", &ctx).unwrap(), "Hi graef");
//! assert_eq!(cache.stats().misses, 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use serde::Serialize;

use brace_core::{compile_with, BraceError, DataContext, Options, Renderer, TemplateError};

/// Memoized outcome of compiling one template. Failures are kept too:
/// compiling the same text again would fail the same way.
type CompileResult = Result<Arc<Renderer>, TemplateError>;

type Slot = Arc<OnceLock<CompileResult>>;

/// Hit/miss counters since construction (or the last [`RendererCache::clear`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe compiled-renderer cache.
///
/// Every renderer in a cache is compiled under the same [`Options`].
#[derive(Debug, Default)]
pub struct RendererCache {
    options: Options,
    slots: Mutex<HashMap<String, Slot>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RendererCache {
    pub fn new(options: Options) -> Self {
        RendererCache { options, ..Default::default() }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Return the renderer for `template`, compiling it on first request.
    pub fn get_or_compile(&self, template: &str) -> Result<Arc<Renderer>, TemplateError> {
        let slot = self.slot(template);
        let mut compiled_here = false;
        let result = slot.get_or_init(|| {
            compiled_here = true;
            compile_with(template, &self.options).map(Arc::new)
        });

        if compiled_here {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(len = template.len(), ok = result.is_ok(), "renderer cache miss");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(len = template.len(), "renderer cache hit");
        }
        result.clone()
    }

    /// Compile (or reuse) `template` and apply it to `ctx`.
    pub fn render<C: DataContext + ?Sized>(
        &self,
        template: &str,
        ctx: &C,
    ) -> Result<String, BraceError> {
        Ok(self.get_or_compile(template)?.apply(ctx)?)
    }

    /// Whether `template` has a slot, compiled or in progress.
    pub fn contains(&self, template: &str) -> bool {
        self.lock().contains_key(template)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached renderer and reset the counters.
    ///
    /// Renderers already handed out stay valid; they are reference counted.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, template: &str) -> Slot {
        let mut slots = self.lock();
        if let Some(slot) = slots.get(template) {
            return Arc::clone(slot);
        }
        let slot = Slot::default();
        slots.insert(template.to_owned(), Arc::clone(&slot));
        slot
    }

    /// The map holds no invariants a panicking holder could break, so a
    /// poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brace_core::{Context, MissingFieldPolicy};

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = RendererCache::default();
        let a = cache.get_or_compile("{{ x }}").unwrap();
        let b = cache.get_or_compile("{{ x }}").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_memoized() {
        let cache = RendererCache::default();
        let first = cache.get_or_compile("{{ 1 + 1 }}").unwrap_err();
        let second = cache.get_or_compile("{{ 1 + 1 }}").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn cache_options_apply_to_every_renderer() {
        let cache = RendererCache::new(
            Options::default().with_missing_field(MissingFieldPolicy::EmptyString),
        );
        assert_eq!(cache.render("<{{ gone }}>", &Context::new()).unwrap(), "<>");
    }

    #[test]
    fn clear_resets_entries_and_counters() {
        let cache = RendererCache::default();
        let held = cache.get_or_compile("hi {{ name }}").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains("hi {{ name }}"));
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(held.fields(), vec!["name"]);
    }
}
