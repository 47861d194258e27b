//! On-disk snapshot of the mapping index.
//!
//! The cache holds every stored `Direct` edge once, plus a format version and
//! an optional fingerprint of the records it was extracted from. Anything the
//! loader cannot use is reported as a [`CacheMiss`], never as an error, so
//! the caller can fall back to extraction.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{LexMapError, Result};
use crate::graph::MappingIndex;
use crate::symbols::parse_symbol;
use crate::types::{MappingEdge, Namespace};

/// Version written by [`save`]; any other value is a miss on load.
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    format_version: u32,
    fingerprint: Option<String>,
    edges: Vec<CachedEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedEdge {
    source: String,
    source_namespace: Namespace,
    target: String,
    target_namespace: Namespace,
    confidence: f64,
}

impl From<&MappingEdge> for CachedEdge {
    fn from(edge: &MappingEdge) -> Self {
        Self {
            source: edge.source.as_str().to_string(),
            source_namespace: edge.source.namespace(),
            target: edge.target.as_str().to_string(),
            target_namespace: edge.target.namespace(),
            confidence: edge.confidence,
        }
    }
}

/// Why a cache could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMiss {
    NotFound,
    VersionMismatch { found: u32, expected: u32 },
    Corrupt { reason: String },
    /// Written for different records than the ones now expected.
    Stale,
}

impl fmt::Display for CacheMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheMiss::NotFound => f.write_str("cache file not found"),
            CacheMiss::VersionMismatch { found, expected } => {
                write!(f, "cache format version {found} (expected {expected})")
            }
            CacheMiss::Corrupt { reason } => write!(f, "corrupt cache: {reason}"),
            CacheMiss::Stale => f.write_str("cache fingerprint does not match records"),
        }
    }
}

/// Outcome of [`load`].
#[derive(Debug)]
pub enum CacheLoad {
    Hit(MappingIndex),
    Miss(CacheMiss),
}

impl CacheLoad {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLoad::Hit(_))
    }
}

/// Loads the index cached at `path`.
///
/// With `expected_fingerprint` set, a cache carrying any other fingerprint
/// (or none) is [`CacheMiss::Stale`]. I/O failures other than a missing file
/// are returned as errors.
pub fn load(path: &Path, expected_fingerprint: Option<&str>) -> Result<CacheLoad> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no mapping cache");
            return Ok(CacheLoad::Miss(CacheMiss::NotFound));
        }
        Err(e) => return Err(e.into()),
    };

    let file: CacheFile = match serde_json::from_slice(&contents) {
        Ok(file) => file,
        Err(e) => return Ok(corrupt(path, format!("undecodable: {e}"))),
    };

    if file.format_version != CACHE_FORMAT_VERSION {
        debug!(
            path = %path.display(),
            found = file.format_version,
            expected = CACHE_FORMAT_VERSION,
            "mapping cache version mismatch"
        );
        return Ok(CacheLoad::Miss(CacheMiss::VersionMismatch {
            found: file.format_version,
            expected: CACHE_FORMAT_VERSION,
        }));
    }

    if let Some(expected) = expected_fingerprint {
        if file.fingerprint.as_deref() != Some(expected) {
            debug!(path = %path.display(), "mapping cache is stale");
            return Ok(CacheLoad::Miss(CacheMiss::Stale));
        }
    }

    let mut index = MappingIndex::new();
    for (i, cached) in file.edges.iter().enumerate() {
        let source = match parse_symbol(&cached.source, cached.source_namespace) {
            Ok(id) => id,
            Err(e) => return Ok(corrupt(path, format!("edge {i}: {e}"))),
        };
        let target = match parse_symbol(&cached.target, cached.target_namespace) {
            Ok(id) => id,
            Err(e) => return Ok(corrupt(path, format!("edge {i}: {e}"))),
        };
        if let Err(e) = index.insert(MappingEdge::direct(source, target, cached.confidence)) {
            return Ok(corrupt(path, format!("edge {i}: {e}")));
        }
    }

    info!(
        path = %path.display(),
        ids = index.len(),
        edges = index.edge_count(),
        "loaded mapping cache"
    );
    Ok(CacheLoad::Hit(index))
}

fn corrupt(path: &Path, reason: String) -> CacheLoad {
    warn!(path = %path.display(), %reason, "ignoring corrupt mapping cache");
    CacheLoad::Miss(CacheMiss::Corrupt { reason })
}

/// Writes `index` to `path` through a temporary file and a rename, so a
/// reader never observes a partial cache.
pub fn save(index: &MappingIndex, path: &Path, fingerprint: Option<&str>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| cache_error(path, "failed to create directory", e))?;
    }

    let file = CacheFile {
        format_version: CACHE_FORMAT_VERSION,
        fingerprint: fingerprint.map(str::to_string),
        edges: index.edges().iter().map(CachedEdge::from).collect(),
    };
    let json = serde_json::to_vec(&file)?;

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &json).map_err(|e| cache_error(&tmp_path, "failed to write", e))?;
    fs::rename(&tmp_path, path).map_err(|e| cache_error(path, "failed to rename into", e))?;

    info!(
        path = %path.display(),
        edges = file.edges.len(),
        "saved mapping cache"
    );
    Ok(())
}

/// Removes the cache at `path`; a missing file is not an error.
pub fn invalidate(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed mapping cache");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(cache_error(path, "failed to remove", e)),
    }
}

fn cache_error(path: &Path, what: &str, e: io::Error) -> LexMapError {
    LexMapError::Cache {
        message: format!("{what}: {e}"),
        path: path.display().to_string(),
    }
}
