use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::errors::{check_unit_interval, LexMapError, Result};
use crate::graph::index::MappingIndex;
use crate::symbols::{ResourceId, SymbolKey};
use crate::types::Namespace;

/// Id and edge counts for one namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceStats {
    pub ids: usize,
    /// Edges with an endpoint in this namespace.
    pub edges: usize,
}

/// Summary statistics of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_ids: usize,
    pub total_edges: usize,
    pub by_namespace: BTreeMap<Namespace, NamespaceStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Several strong counterparts in one target namespace.
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingConflict {
    pub source: ResourceId,
    pub namespace: Namespace,
    pub kind: ConflictKind,
    /// Competing targets, best first.
    pub candidates: Vec<(ResourceId, f64)>,
}

/// Read-only analytics over a [`MappingIndex`].
pub struct IndexQueries<'a> {
    index: &'a MappingIndex,
}

impl<'a> IndexQueries<'a> {
    pub const DEFAULT_CONFLICT_CONFIDENCE: f64 = 0.7;

    pub fn new(index: &'a MappingIndex) -> Self {
        Self { index }
    }

    pub fn stats(&self) -> IndexStats {
        let mut by_namespace = BTreeMap::new();
        for namespace in Namespace::ALL {
            let mut stats = NamespaceStats::default();
            for id in self.index.ids_in(namespace) {
                stats.ids += 1;
                stats.edges += self.index.degree(&id.key());
            }
            if stats.ids > 0 {
                by_namespace.insert(namespace, stats);
            }
        }

        IndexStats {
            total_ids: self.index.len(),
            total_edges: self.index.edge_count(),
            by_namespace,
        }
    }

    /// Ids mapped to two or more targets of the same namespace at or above
    /// `min_confidence`.
    pub fn detect_conflicts(&self, min_confidence: f64) -> Result<Vec<MappingConflict>> {
        if !check_unit_interval(min_confidence) {
            return Err(LexMapError::InvalidThreshold {
                value: min_confidence,
            });
        }

        let mut conflicts = Vec::new();
        for namespace in Namespace::ALL {
            for id in self.index.ids_in(namespace) {
                let mut grouped: BTreeMap<Namespace, Vec<(ResourceId, f64)>> = BTreeMap::new();
                for (neighbor, confidence) in self.index.neighbors(&id.key()) {
                    if confidence >= min_confidence {
                        grouped
                            .entry(neighbor.namespace())
                            .or_default()
                            .push((neighbor.clone(), confidence));
                    }
                }

                for (target_namespace, mut candidates) in grouped {
                    if candidates.len() < 2 {
                        continue;
                    }
                    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                    conflicts.push(MappingConflict {
                        source: id.clone(),
                        namespace: target_namespace,
                        kind: ConflictKind::Ambiguous,
                        candidates,
                    });
                }
            }
        }
        Ok(conflicts)
    }

    /// Index ids missing from `known`, in key order.
    pub fn dangling(&self, known: &BTreeSet<SymbolKey>) -> Vec<ResourceId> {
        Namespace::ALL
            .iter()
            .flat_map(|ns| self.index.ids_in(*ns))
            .filter(|id| !known.contains(&id.key()))
            .cloned()
            .collect()
    }
}
