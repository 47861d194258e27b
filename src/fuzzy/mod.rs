//! Approximate string matching for identifiers.
//!
//! Edit-distance scoring is O(candidates × query length × candidate length),
//! so callers try exact lookup first and use this as an explicit fallback.

mod levenshtein;
mod normalize;

pub use levenshtein::{levenshtein_distance, levenshtein_ratio};
pub use normalize::normalize_text;

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::{check_unit_interval, LexMapError, Result};
use crate::memo::{CacheStats, LruCache};

/// A candidate that scored at or above the requested threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub candidate: String,
    pub score: f64,
}

/// Usage counters of the matcher's two memo caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyCacheStats {
    pub normalize: CacheStats,
    pub ratio: CacheStats,
}

/// Edit-distance matcher with memoized normalization and scoring.
#[derive(Debug)]
pub struct FuzzyMatcher {
    normalized: Mutex<LruCache<(String, bool), String>>,
    ratios: Mutex<LruCache<(String, String), f64>>,
}

impl FuzzyMatcher {
    pub const DEFAULT_CAPACITY: usize = 8192;
    /// Threshold used by [`FuzzyMatcher::best_match`] when no exact match exists.
    pub const BEST_MATCH_THRESHOLD: f64 = 0.6;

    pub fn new(capacity: usize) -> Self {
        Self {
            normalized: Mutex::new(LruCache::new(capacity)),
            ratios: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Memoized [`normalize_text`].
    pub fn normalize(&self, text: &str, preserve_case: bool) -> String {
        let key = (text.to_string(), preserve_case);
        let mut cache = self.normalized.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = cache.get(&key) {
            return hit;
        }
        let normalized = normalize_text(text, preserve_case);
        cache.put(key, normalized.clone());
        normalized
    }

    /// Similarity in `[0, 1]` derived from Levenshtein distance.
    ///
    /// With `normalize` set both inputs go through [`FuzzyMatcher::normalize`]
    /// (lower-cased) first.
    pub fn edit_ratio(&self, a: &str, b: &str, normalize: bool) -> f64 {
        if normalize {
            let a = self.normalize(a, false);
            let b = self.normalize(b, false);
            self.ratio(&a, &b)
        } else {
            self.ratio(a, b)
        }
    }

    /// Ranks candidates by similarity to `query`.
    ///
    /// Keeps scores at or above `threshold`, sorted by score descending and
    /// then candidate ascending, truncated to `limit`.
    pub fn rank<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        threshold: f64,
        limit: Option<usize>,
    ) -> Result<Vec<FuzzyMatch>> {
        if !check_unit_interval(threshold) {
            return Err(LexMapError::InvalidThreshold { value: threshold });
        }

        let normalized_query = self.normalize(query, false);
        let mut matches: Vec<FuzzyMatch> = candidates
            .iter()
            .filter_map(|candidate| {
                let candidate = candidate.as_ref();
                let normalized = self.normalize(candidate, false);
                let score = self.ratio(&normalized_query, &normalized);
                (score >= threshold).then(|| FuzzyMatch {
                    candidate: candidate.to_string(),
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.cmp(&b.candidate))
        });
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    /// Returns an exact normalized match if one exists, otherwise the top
    /// ranked candidate scoring at least [`Self::BEST_MATCH_THRESHOLD`].
    pub fn best_match<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Option<String> {
        let normalized_query = self.normalize(query, false);
        let exact = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|candidate| self.normalize(candidate, false) == normalized_query)
            .min();
        if let Some(candidate) = exact {
            return Some(candidate.to_string());
        }

        self.rank(query, candidates, Self::BEST_MATCH_THRESHOLD, Some(1))
            .ok()
            .and_then(|mut ranked| ranked.pop())
            .map(|m| m.candidate)
    }

    pub fn stats(&self) -> FuzzyCacheStats {
        FuzzyCacheStats {
            normalize: self
                .normalized
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .stats(),
            ratio: self.ratios.lock().unwrap_or_else(|e| e.into_inner()).stats(),
        }
    }

    /// Memoized ratio keyed by the ordered pair, so `(a, b)` and `(b, a)`
    /// share one entry.
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        let mut cache = self.ratios.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = cache.get(&key) {
            return hit;
        }
        let ratio = levenshtein_ratio(&key.0, &key.1);
        cache.put(key, ratio);
        ratio
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
