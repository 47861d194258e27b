use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::cache::{self, CacheLoad, CacheMiss};
use crate::config::{load_config, LexMapConfig};
use crate::errors::Result;
use crate::extraction::{ExtractOptions, ProgressFn, ReferenceExtractor};
use crate::fingerprint::RecordSource;
use crate::fuzzy::FuzzyMatcher;
use crate::graph::{IndexQueries, IndexSnapshot, IndexStats, MappingConflict, MappingIndex};
use crate::resolution::{ReferenceResolver, ResolveOptions};
use crate::symbols::SymbolParser;
use crate::types::{Namespace, ResolvedReference};

/// Why an index has to be extracted instead of loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractReason {
    Forced,
    Miss(CacheMiss),
}

impl fmt::Display for ExtractReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractReason::Forced => f.write_str("forced"),
            ExtractReason::Miss(miss) => write!(f, "{miss}"),
        }
    }
}

/// Decision taken by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexPlan {
    UseCache,
    Extract { reason: ExtractReason },
}

/// Decides between using a loaded cache and re-extracting.
pub fn plan(cache: &CacheLoad, force: bool) -> IndexPlan {
    if force {
        return IndexPlan::Extract {
            reason: ExtractReason::Forced,
        };
    }
    match cache {
        CacheLoad::Hit(_) => IndexPlan::UseCache,
        CacheLoad::Miss(miss) => IndexPlan::Extract {
            reason: ExtractReason::Miss(miss.clone()),
        },
    }
}

/// Result of building or loading the index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOutcome {
    pub plan: IndexPlan,
    /// Number of distinct ids in the new snapshot.
    pub ids: usize,
    /// Number of distinct unordered pairs in the new snapshot.
    pub edges: usize,
    /// Links skipped during extraction; zero for a cache hit.
    pub skipped: usize,
    /// Records visited during extraction; zero for a cache hit.
    pub records_processed: usize,
    /// Whether the index on disk matches the live snapshot.
    pub persisted: bool,
}

/// Ties together parsing, extraction, caching and resolution.
///
/// Holds the live index as an immutable snapshot behind an `Arc`. Rebuilding
/// swaps the whole snapshot, so a reader that took one keeps a consistent
/// view. The cache file assumes a single writer; callers running several
/// processes against one data directory must serialize forced rebuilds
/// themselves.
pub struct LexMap {
    config: LexMapConfig,
    parser: SymbolParser,
    matcher: FuzzyMatcher,
    snapshot: RwLock<Arc<IndexSnapshot>>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl LexMap {
    /// Creates an orchestrator with an empty index.
    pub fn new(config: LexMapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: SymbolParser::new(config.parser_cache_size),
            matcher: FuzzyMatcher::new(config.fuzzy_cache_size),
            snapshot: RwLock::new(Arc::new(IndexSnapshot::default())),
            config,
        })
    }

    /// Creates an orchestrator from the configuration stored under `root`.
    pub fn open(root: &Path) -> Result<Self> {
        Self::new(load_config(root)?)
    }

    pub fn config(&self) -> &LexMapConfig {
        &self.config
    }

    pub fn cache_path(&self) -> PathBuf {
        self.config.cache_path()
    }

    pub fn parser(&self) -> &SymbolParser {
        &self.parser
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// The current index snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(|e| e.into_inner()))
    }

    fn install(&self, index: MappingIndex) -> Arc<IndexSnapshot> {
        let snapshot = Arc::new(IndexSnapshot::new(index));
        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = Arc::clone(&snapshot);
        snapshot
    }
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

impl LexMap {
    /// Makes sure an index is loaded, from the cache when it is usable and
    /// by extraction otherwise.
    ///
    /// A freshly extracted index replaces the live snapshot even when it
    /// cannot be written to the cache; see [`IndexOutcome::persisted`].
    pub fn ensure_index<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        force: bool,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<IndexOutcome> {
        let path = self.cache_path();
        let fingerprint = source.fingerprint()?;
        let loaded = cache::load(&path, fingerprint.as_deref())?;

        let reason = match (plan(&loaded, force), loaded) {
            (IndexPlan::UseCache, CacheLoad::Hit(index)) => {
                let snapshot = self.install(index);
                info!(
                    path = %path.display(),
                    ids = snapshot.index.len(),
                    "using cached mapping index"
                );
                return Ok(IndexOutcome {
                    plan: IndexPlan::UseCache,
                    ids: snapshot.index.len(),
                    edges: snapshot.index.edge_count(),
                    skipped: 0,
                    records_processed: 0,
                    persisted: true,
                });
            }
            (IndexPlan::Extract { reason }, _) => reason,
            (IndexPlan::UseCache, CacheLoad::Miss(miss)) => ExtractReason::Miss(miss),
        };

        debug!(%reason, "extracting mapping index");
        let options = ExtractOptions {
            progress_interval: self.config.progress_interval,
            cancel: None,
        };
        self.rebuild(source, fingerprint, &options, progress, reason)
    }

    /// Re-extracts every record from `source` and persists the result.
    ///
    /// On cancellation neither the live snapshot nor the cache file changes.
    /// A failed cache write is logged and leaves the new snapshot live.
    pub fn extract_all<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        options: &ExtractOptions,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<IndexOutcome> {
        let fingerprint = source.fingerprint()?;
        self.rebuild(source, fingerprint, options, progress, ExtractReason::Forced)
    }

    fn rebuild<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        fingerprint: Option<String>,
        options: &ExtractOptions,
        progress: Option<&mut ProgressFn<'_>>,
        reason: ExtractReason,
    ) -> Result<IndexOutcome> {
        let records = source.records()?;
        let result = ReferenceExtractor::new(&self.parser).extract(&records, options, progress)?;

        let index = MappingIndex::from_edges(result.edges)?;
        let path = self.cache_path();
        let persisted = match cache::save(&index, &path, fingerprint.as_deref()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "could not persist mapping index; keeping it in memory only"
                );
                false
            }
        };
        let snapshot = self.install(index);

        Ok(IndexOutcome {
            plan: IndexPlan::Extract { reason },
            ids: snapshot.index.len(),
            edges: snapshot.index.edge_count(),
            skipped: result.skipped,
            records_processed: result.records_processed,
            persisted,
        })
    }

    /// Deletes the cache file. The live snapshot is kept.
    pub fn invalidate_cache(&self) -> Result<()> {
        cache::invalidate(&self.cache_path())
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl LexMap {
    /// Exact lookup with the configured fuzzy threshold and no expansion.
    pub fn default_options(&self) -> ResolveOptions {
        ResolveOptions {
            threshold: self.config.default_threshold,
            ..ResolveOptions::default()
        }
    }

    /// Like [`LexMap::default_options`] with the configured hop cap.
    pub fn transitive_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_hops: self.config.max_hops,
            ..self.default_options()
        }
    }

    pub fn resolve(
        &self,
        raw: &str,
        source: Namespace,
        options: &ResolveOptions,
    ) -> Result<ResolvedReference> {
        let snapshot = self.snapshot();
        ReferenceResolver::new(&snapshot, &self.parser, &self.matcher)
            .resolve(raw, source, options)
    }

    pub fn stats(&self) -> IndexStats {
        IndexQueries::new(&self.snapshot().index).stats()
    }

    pub fn detect_conflicts(&self, min_confidence: f64) -> Result<Vec<MappingConflict>> {
        IndexQueries::new(&self.snapshot().index).detect_conflicts(min_confidence)
    }
}
