//! Identifier grammars for the four resources.
//!
//! Every raw identifier is decomposed into a structured [`Symbol`]; the
//! structured form must re-serialize to exactly the raw input, otherwise the
//! input is rejected as non-canonical.

mod framenet;
mod propbank;
mod verbnet;
mod wordnet;

pub use framenet::{normalize_frame_name, FrameNetSymbol};
pub use propbank::{ArgNumber, ArgPrefix, PropBankArg, PropBankSymbol};
pub use verbnet::VerbNetSymbol;
pub use wordnet::{SatelliteHead, SsType, WordNetSymbol};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Mutex;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{ParseError, Result};
use crate::memo::{CacheStats, LruCache};
use crate::types::Namespace;

/// Structured fields of an identifier, one variant per namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    FrameNet(FrameNetSymbol),
    PropBank(PropBankSymbol),
    VerbNet(VerbNetSymbol),
    WordNet(WordNetSymbol),
}

impl Symbol {
    pub fn namespace(&self) -> Namespace {
        match self {
            Symbol::FrameNet(_) => Namespace::FrameNet,
            Symbol::PropBank(_) => Namespace::PropBank,
            Symbol::VerbNet(_) => Namespace::VerbNet,
            Symbol::WordNet(_) => Namespace::WordNet,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::FrameNet(s) => s.fmt(f),
            Symbol::PropBank(s) => s.fmt(f),
            Symbol::VerbNet(s) => s.fmt(f),
            Symbol::WordNet(s) => s.fmt(f),
        }
    }
}

/// Namespace-qualified identifier string; the key type of the mapping index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolKey {
    pub namespace: Namespace,
    pub id: String,
}

impl SymbolKey {
    pub fn new(namespace: Namespace, id: &str) -> Self {
        Self {
            namespace,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

/// A parsed identifier together with the raw string it was parsed from.
///
/// Ordering is by namespace, then by raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    raw: String,
    symbol: Symbol,
}

impl ResourceId {
    /// Parses `raw` in `namespace` without memoization.
    pub fn parse(raw: &str, namespace: Namespace) -> std::result::Result<Self, ParseError> {
        parse_symbol(raw, namespace)
    }

    pub fn namespace(&self) -> Namespace {
        self.symbol.namespace()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(self.namespace(), &self.raw)
    }

    pub fn as_framenet(&self) -> Option<&FrameNetSymbol> {
        match &self.symbol {
            Symbol::FrameNet(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_propbank(&self) -> Option<&PropBankSymbol> {
        match &self.symbol {
            Symbol::PropBank(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_verbnet(&self) -> Option<&VerbNetSymbol> {
        match &self.symbol {
            Symbol::VerbNet(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_wordnet(&self) -> Option<&WordNetSymbol> {
        match &self.symbol {
            Symbol::WordNet(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace()
            .cmp(&other.namespace())
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResourceId", 2)?;
        state.serialize_field("namespace", &self.namespace())?;
        state.serialize_field("id", &self.raw)?;
        state.end()
    }
}

/// Parses `raw` according to the grammar of `namespace`.
///
/// The structured result must render back to `raw` byte-for-byte.
pub fn parse_symbol(raw: &str, namespace: Namespace) -> std::result::Result<ResourceId, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::new(raw, namespace, "empty identifier"));
    }
    if raw.trim() != raw {
        return Err(ParseError::new(
            raw,
            namespace,
            "leading or trailing whitespace",
        ));
    }

    let parsed = match namespace {
        Namespace::FrameNet => framenet::parse(raw).map(Symbol::FrameNet),
        Namespace::PropBank => propbank::parse(raw).map(Symbol::PropBank),
        Namespace::VerbNet => verbnet::parse(raw).map(Symbol::VerbNet),
        Namespace::WordNet => wordnet::parse(raw).map(Symbol::WordNet),
    };
    let symbol = parsed.map_err(|reason| ParseError::new(raw, namespace, reason))?;

    let rendered = symbol.to_string();
    if rendered != raw {
        return Err(ParseError::new(
            raw,
            namespace,
            format!("non-canonical form (canonical: {rendered:?})"),
        ));
    }

    Ok(ResourceId {
        raw: raw.to_string(),
        symbol,
    })
}

/// Memoizing front-end to [`parse_symbol`].
///
/// The same identifiers recur across thousands of links, so outcomes
/// (including failures) are kept in a bounded LRU cache.
#[derive(Debug)]
pub struct SymbolParser {
    cache: Mutex<LruCache<(Namespace, String), std::result::Result<ResourceId, ParseError>>>,
}

impl SymbolParser {
    pub const DEFAULT_CAPACITY: usize = 4096;

    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn parse(&self, raw: &str, namespace: Namespace) -> std::result::Result<ResourceId, ParseError> {
        let key = (namespace, raw.to_string());
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = cache.get(&key) {
            return hit;
        }
        let outcome = parse_symbol(raw, namespace);
        cache.put(key, outcome.clone());
        outcome
    }

    /// Parses with a textual namespace tag, rejecting unknown tags.
    pub fn parse_tagged(&self, raw: &str, namespace: &str) -> Result<ResourceId> {
        let namespace = Namespace::parse(namespace)?;
        Ok(self.parse(raw, namespace)?)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .stats()
    }
}

impl Default for SymbolParser {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
