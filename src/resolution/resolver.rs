use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{check_unit_interval, LexMapError, Result};
use crate::fuzzy::{FuzzyMatch, FuzzyMatcher};
use crate::graph::traversal::Reached;
use crate::graph::{FuzzyCandidateSet, GraphTraverser, IndexSnapshot, MappingIndex};
use crate::symbols::{ResourceId, SymbolParser};
use crate::types::{
    EdgeKind, MatchedVia, Namespace, ResolvedReference, ResolvedTarget, TargetNamespace,
};

/// Per-query knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    pub target: TargetNamespace,
    /// Fall back to edit-distance anchoring when exact lookup finds nothing.
    pub fuzzy: bool,
    /// Minimum fuzzy score in `[0, 1]`; checked even when `fuzzy` is off.
    pub threshold: f64,
    /// Values below 2 disable transitive expansion.
    pub max_hops: u32,
}

impl ResolveOptions {
    pub const DEFAULT_THRESHOLD: f64 = 0.8;
    pub const DEFAULT_MAX_HOPS: u32 = 2;

    /// Default options with transitive expansion up to two hops.
    pub fn transitive() -> Self {
        Self {
            max_hops: Self::DEFAULT_MAX_HOPS,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<TargetNamespace>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_fuzzy(mut self, threshold: f64) -> Self {
        self.fuzzy = true;
        self.threshold = threshold;
        self
    }

    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !check_unit_interval(self.threshold) {
            return Err(LexMapError::InvalidThreshold {
                value: self.threshold,
            });
        }
        Ok(())
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            target: TargetNamespace::All,
            fuzzy: false,
            threshold: Self::DEFAULT_THRESHOLD,
            max_hops: 0,
        }
    }
}

/// Resolves identifiers of one namespace to their counterparts in others.
///
/// Borrows an immutable index snapshot together with the shared parser and
/// matcher, so it is cheap to construct per call.
pub struct ReferenceResolver<'a> {
    index: &'a MappingIndex,
    candidates: &'a FuzzyCandidateSet,
    parser: &'a SymbolParser,
    matcher: &'a FuzzyMatcher,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        snapshot: &'a IndexSnapshot,
        parser: &'a SymbolParser,
        matcher: &'a FuzzyMatcher,
    ) -> Self {
        Self {
            index: &snapshot.index,
            candidates: &snapshot.candidates,
            parser,
            matcher,
        }
    }

    /// Resolves `raw` from `source`.
    ///
    /// Stages, in order:
    /// 1. **Exact** -- parse `raw` and use its stored edges
    ///    (`matched_via = Direct`). A parse failure is an error unless
    ///    `fuzzy` is set.
    /// 2. **Fuzzy** -- when exact lookup found nothing and `fuzzy` is set,
    ///    anchor on every `source` id scoring at least `threshold` against
    ///    `raw`; edge confidences are multiplied by the anchor's score
    ///    (`matched_via = Fuzzy`).
    /// 3. **Transitive** -- with `max_hops >= 2`, expand from the first-hop
    ///    results breadth-first.
    ///
    /// An empty result is not an error.
    pub fn resolve(
        &self,
        raw: &str,
        source: Namespace,
        options: &ResolveOptions,
    ) -> Result<ResolvedReference> {
        options.validate()?;

        let parsed = match self.parser.parse(raw, source) {
            Ok(id) => Some(id),
            Err(err) if options.fuzzy => {
                debug!(
                    raw,
                    namespace = %source,
                    reason = %err.reason,
                    "query did not parse; trying fuzzy match"
                );
                None
            }
            Err(err) => return Err(err.into()),
        };

        let direct_anchor = parsed.filter(|id| self.index.degree(&id.key()) > 0);

        let (anchors, matched_via, fuzzy_candidates) = match direct_anchor {
            Some(id) => (vec![(id, 1.0)], MatchedVia::Direct, Vec::new()),
            None if options.fuzzy => {
                let matches = self.fuzzy_anchors(raw, source, options.threshold)?;
                let anchors: Vec<(ResourceId, f64)> = matches
                    .iter()
                    .filter_map(|m| {
                        self.parser
                            .parse(&m.candidate, source)
                            .ok()
                            .map(|id| (id, m.score))
                    })
                    .collect();
                (anchors, MatchedVia::Fuzzy, matches)
            }
            None => (Vec::new(), MatchedVia::Direct, Vec::new()),
        };

        let traverser = GraphTraverser::new(self.index);
        let first_kind = match matched_via {
            MatchedVia::Direct => EdgeKind::Direct,
            MatchedVia::Fuzzy => EdgeKind::Fuzzy,
        };
        let mut reached = traverser.first_hop(&anchors, first_kind);
        traverser.expand(&mut reached, &anchors, source, options.max_hops);

        let resolved = group_by_namespace(reached, &options.target);
        debug!(
            raw,
            namespace = %source,
            anchors = anchors.len(),
            results = resolved.values().map(Vec::len).sum::<usize>(),
            "resolved query"
        );

        Ok(ResolvedReference {
            query_id: raw.to_string(),
            source,
            resolved,
            matched_via,
            fuzzy_candidates,
        })
    }

    /// Resolves with textual namespace tags (`"propbank"`, `"all"`, ...).
    pub fn resolve_tagged(
        &self,
        raw: &str,
        source: &str,
        target: &str,
        options: &ResolveOptions,
    ) -> Result<ResolvedReference> {
        let source = Namespace::parse(source)?;
        let options = ResolveOptions {
            target: TargetNamespace::from_str(target)?,
            ..options.clone()
        };
        self.resolve(raw, source, &options)
    }

    fn fuzzy_anchors(
        &self,
        raw: &str,
        source: Namespace,
        threshold: f64,
    ) -> Result<Vec<FuzzyMatch>> {
        let candidates = self.candidates.candidates(source);
        let matches = self.matcher.rank(raw, candidates, threshold, None)?;
        debug!(
            raw,
            namespace = %source,
            candidates = candidates.len(),
            matches = matches.len(),
            "fuzzy anchoring"
        );
        Ok(matches)
    }
}

/// Filters to `target` and orders each group by confidence descending,
/// then hop count, then id.
fn group_by_namespace(
    reached: Reached,
    target: &TargetNamespace,
) -> BTreeMap<Namespace, Vec<ResolvedTarget>> {
    let mut grouped: BTreeMap<Namespace, Vec<ResolvedTarget>> = BTreeMap::new();
    for result in reached.into_values() {
        let namespace = result.id.namespace();
        if target.includes(namespace) {
            grouped.entry(namespace).or_default().push(result);
        }
    }

    for results in grouped.values_mut() {
        results.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.hops.cmp(&b.hops))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
    grouped
}
