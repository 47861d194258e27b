use std::collections::BTreeMap;

use crate::errors::{check_unit_interval, LexMapError, Result};
use crate::symbols::{ResourceId, SymbolKey};
use crate::types::{EdgeKind, MappingEdge, Namespace};

#[derive(Debug, Clone)]
struct Neighbor {
    id: ResourceId,
    confidence: f64,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    id: ResourceId,
    neighbors: BTreeMap<SymbolKey, Neighbor>,
}

/// Adjacency structure of `Direct` edges, keyed by namespace-qualified id.
///
/// Every edge is stored in both directions with the same confidence, and a
/// pair inserted twice keeps the larger confidence. Fuzzy and transitive
/// edges are computed at query time and never stored here.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    entries: BTreeMap<SymbolKey, IndexEntry>,
    pair_count: usize,
}

impl MappingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from `Direct` edges.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = MappingEdge>,
    {
        let mut index = Self::new();
        for edge in edges {
            index.insert(edge)?;
        }
        Ok(index)
    }

    /// Inserts a `Direct` edge in both directions.
    ///
    /// Returns `true` when the pair is new or its confidence was raised.
    /// Self-loops are ignored.
    pub fn insert(&mut self, edge: MappingEdge) -> Result<bool> {
        if edge.kind != EdgeKind::Direct {
            return Err(LexMapError::NonDirectEdge {
                kind: edge.kind.to_string(),
            });
        }
        if !check_unit_interval(edge.confidence) {
            return Err(LexMapError::InvalidConfidence {
                value: edge.confidence,
            });
        }
        if edge.source == edge.target {
            return Ok(false);
        }

        let previous = self.upsert(&edge.source, &edge.target, edge.confidence);
        self.upsert(&edge.target, &edge.source, edge.confidence);

        match previous {
            None => {
                self.pair_count += 1;
                Ok(true)
            }
            Some(old) => Ok(edge.confidence > old),
        }
    }

    /// Returns the confidence stored before this call, if the pair existed.
    fn upsert(&mut self, from: &ResourceId, to: &ResourceId, confidence: f64) -> Option<f64> {
        let entry = self
            .entries
            .entry(from.key())
            .or_insert_with(|| IndexEntry {
                id: from.clone(),
                neighbors: BTreeMap::new(),
            });

        match entry.neighbors.get_mut(&to.key()) {
            Some(existing) => {
                let old = existing.confidence;
                existing.confidence = old.max(confidence);
                Some(old)
            }
            None => {
                entry.neighbors.insert(
                    to.key(),
                    Neighbor {
                        id: to.clone(),
                        confidence,
                    },
                );
                None
            }
        }
    }

    /// Outgoing edges of `id`, ordered by target.
    pub fn edges_from(&self, id: &ResourceId) -> Vec<MappingEdge> {
        self.entries
            .get(&id.key())
            .map(|entry| {
                entry
                    .neighbors
                    .values()
                    .map(|n| MappingEdge::direct(entry.id.clone(), n.id.clone(), n.confidence))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Borrowing view of the neighbours of `key`, ordered by key.
    pub fn neighbors<'a>(
        &'a self,
        key: &SymbolKey,
    ) -> impl Iterator<Item = (&'a ResourceId, f64)> + 'a {
        self.entries
            .get(key)
            .into_iter()
            .flat_map(|entry| entry.neighbors.values().map(|n| (&n.id, n.confidence)))
    }

    /// Every id of `namespace` that has at least one edge, in key order.
    pub fn all_ids(&self, namespace: Namespace) -> Vec<ResourceId> {
        self.ids_in(namespace).cloned().collect()
    }

    pub(crate) fn ids_in(&self, namespace: Namespace) -> impl Iterator<Item = &ResourceId> {
        self.entries
            .range(SymbolKey::new(namespace, "")..)
            .take_while(move |(key, _)| key.namespace == namespace)
            .map(|(_, entry)| &entry.id)
    }

    pub fn lookup(&self, key: &SymbolKey) -> Option<&ResourceId> {
        self.entries.get(key).map(|entry| &entry.id)
    }

    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of outgoing edges of `key`.
    pub fn degree(&self, key: &SymbolKey) -> usize {
        self.entries
            .get(key)
            .map_or(0, |entry| entry.neighbors.len())
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct unordered pairs.
    pub fn edge_count(&self) -> usize {
        self.pair_count
    }

    /// Each unordered pair once, with `source < target`, in sorted order.
    pub fn edges(&self) -> Vec<MappingEdge> {
        self.entries
            .iter()
            .flat_map(|(key, entry)| {
                entry
                    .neighbors
                    .range((
                        std::ops::Bound::Excluded(key.clone()),
                        std::ops::Bound::Unbounded,
                    ))
                    .map(move |(_, n)| {
                        MappingEdge::direct(entry.id.clone(), n.id.clone(), n.confidence)
                    })
            })
            .collect()
    }
}

/// Per-namespace sorted candidate lists for fuzzy search.
#[derive(Debug, Clone, Default)]
pub struct FuzzyCandidateSet {
    by_namespace: BTreeMap<Namespace, Vec<String>>,
}

impl FuzzyCandidateSet {
    /// Collects every key of `index`; keys are visited in order, so each list
    /// comes out sorted.
    pub fn from_index(index: &MappingIndex) -> Self {
        let mut by_namespace: BTreeMap<Namespace, Vec<String>> = BTreeMap::new();
        for key in index.entries.keys() {
            by_namespace
                .entry(key.namespace)
                .or_default()
                .push(key.id.clone());
        }
        Self { by_namespace }
    }

    pub fn candidates(&self, namespace: Namespace) -> &[String] {
        self.by_namespace
            .get(&namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_namespace.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An immutable index together with the candidate lists derived from it.
///
/// Rebuilding produces a new snapshot; readers holding the old one are
/// unaffected.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    pub index: MappingIndex,
    pub candidates: FuzzyCandidateSet,
}

impl IndexSnapshot {
    pub fn new(index: MappingIndex) -> Self {
        let candidates = FuzzyCandidateSet::from_index(&index);
        Self { index, candidates }
    }
}
