use std::collections::{BTreeMap, BTreeSet};

use crate::graph::index::MappingIndex;
use crate::symbols::{ResourceId, SymbolKey};
use crate::types::{EdgeKind, Namespace, ResolvedTarget};

/// Best result found so far per target id.
pub type Reached = BTreeMap<SymbolKey, ResolvedTarget>;

/// Walks the mapping index outward from a set of anchors.
pub struct GraphTraverser<'a> {
    index: &'a MappingIndex,
}

impl<'a> GraphTraverser<'a> {
    pub fn new(index: &'a MappingIndex) -> Self {
        Self { index }
    }

    /// Neighbours of each anchor, with confidence scaled by the anchor's
    /// score. Anchors themselves are never reported.
    pub fn first_hop(&self, anchors: &[(ResourceId, f64)], kind: EdgeKind) -> Reached {
        let blocked: BTreeSet<SymbolKey> = anchors.iter().map(|(id, _)| id.key()).collect();
        let mut reached = Reached::new();

        for (anchor, score) in anchors {
            for (neighbor, confidence) in self.index.neighbors(&anchor.key()) {
                let key = neighbor.key();
                if blocked.contains(&key) {
                    continue;
                }
                merge(
                    &mut reached,
                    key,
                    ResolvedTarget {
                        id: neighbor.clone(),
                        confidence: score * confidence,
                        kind,
                        hops: 1,
                        path: vec![neighbor.clone()],
                    },
                );
            }
        }
        reached
    }

    /// Extends `reached` breadth-first up to `max_hops` edges from the anchors.
    ///
    /// Confidence decays multiplicatively along the path. A candidate is
    /// dropped when its namespace was already reached at an earlier level
    /// with equal or higher confidence, which keeps multi-hop chains from
    /// re-entering a namespace through a weaker route. Nothing happens for
    /// `max_hops < 2`.
    pub fn expand(
        &self,
        reached: &mut Reached,
        anchors: &[(ResourceId, f64)],
        source_namespace: Namespace,
        max_hops: u32,
    ) {
        if max_hops < 2 {
            return;
        }

        let blocked: BTreeSet<SymbolKey> = anchors.iter().map(|(id, _)| id.key()).collect();
        let mut best_by_namespace: BTreeMap<Namespace, f64> = BTreeMap::new();
        best_by_namespace.insert(source_namespace, 1.0);
        for target in reached.values() {
            raise(&mut best_by_namespace, target.id.namespace(), target.confidence);
        }

        let mut frontier: Vec<ResolvedTarget> = reached.values().cloned().collect();

        for hops in 2..=max_hops {
            let mut next = Reached::new();

            for node in &frontier {
                for (neighbor, confidence) in self.index.neighbors(&node.id.key()) {
                    let key = neighbor.key();
                    if blocked.contains(&key) {
                        continue;
                    }
                    let decayed = node.confidence * confidence;
                    let namespace_best = best_by_namespace
                        .get(&neighbor.namespace())
                        .copied()
                        .unwrap_or(0.0);
                    if namespace_best >= decayed {
                        continue;
                    }
                    if reached
                        .get(&key)
                        .is_some_and(|known| known.confidence >= decayed)
                    {
                        continue;
                    }

                    let mut path = node.path.clone();
                    path.push(neighbor.clone());
                    merge(
                        &mut next,
                        key,
                        ResolvedTarget {
                            id: neighbor.clone(),
                            confidence: decayed,
                            kind: EdgeKind::Transitive,
                            hops,
                            path,
                        },
                    );
                }
            }

            if next.is_empty() {
                break;
            }

            for target in next.values() {
                raise(&mut best_by_namespace, target.id.namespace(), target.confidence);
            }
            frontier = next.values().cloned().collect();
            for (key, target) in next {
                merge(reached, key, target);
            }
        }
    }
}

/// Keeps the higher confidence; on a tie, the shorter path.
fn merge(reached: &mut Reached, key: SymbolKey, candidate: ResolvedTarget) {
    match reached.get(&key) {
        Some(existing)
            if existing.confidence > candidate.confidence
                || (existing.confidence == candidate.confidence
                    && existing.hops <= candidate.hops) => {}
        _ => {
            reached.insert(key, candidate);
        }
    }
}

fn raise(best: &mut BTreeMap<Namespace, f64>, namespace: Namespace, confidence: f64) {
    let slot = best.entry(namespace).or_insert(0.0);
    if confidence > *slot {
        *slot = confidence;
    }
}
