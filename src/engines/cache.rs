/*!
 * In-memory cache of engine translations.
 *
 * Entries are keyed by a SHA-256 digest of the source text and language pair,
 * so repeated strings within a run hit the engines only once.
 */

use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::EngineRequest;

type CacheKey = [u8; 32];

/// Hit/miss counters of a cache
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Translation cache shared between concurrent requests
#[derive(Debug, Clone)]
pub struct TranslationCache {
    entries: Arc<RwLock<HashMap<CacheKey, String>>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
    enabled: bool,
}

fn cache_key(request: &EngineRequest) -> CacheKey {
    let mut hasher = Sha256::new();
    // separators keep ("ab", "c") and ("a", "bc") apart
    hasher.update(request.source_language.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.target_language.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.text.as_bytes());
    hasher.finalize().into()
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}

impl TranslationCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Look up a translation, counting the hit or miss
    pub fn get(&self, request: &EngineRequest) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let found = self.entries.read().get(&cache_key(request)).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(
                "Cache hit for '{}' ({} -> {})",
                truncate_text(&request.text, 30),
                request.source_language,
                request.target_language
            );
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a translation
    pub fn store(&self, request: &EngineRequest, translation: &str) {
        if !self.enabled {
            return;
        }
        self.entries.write().insert(cache_key(request), translation.to_string());
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Translation cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}
