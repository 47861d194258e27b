mod common;

use lexmap::errors::LexMapError;
use lexmap::fuzzy::FuzzyMatcher;
use lexmap::graph::{IndexSnapshot, MappingIndex};
use lexmap::resolution::{ReferenceResolver, ResolveOptions};
use lexmap::symbols::{parse_symbol, ResourceId, SymbolParser};
use lexmap::types::*;

use common::init_tracing;

fn id(raw: &str, namespace: Namespace) -> ResourceId {
    parse_symbol(raw, namespace).expect("valid test id")
}

/// Builds a snapshot from `(source, source ns, target, target ns, confidence)`.
fn snapshot(edges: &[(&str, Namespace, &str, Namespace, f64)]) -> IndexSnapshot {
    let edges = edges.iter().map(|(s, sn, t, tn, c)| {
        MappingEdge::direct(id(s, *sn), id(t, *tn), *c)
    });
    IndexSnapshot::new(MappingIndex::from_edges(edges).expect("valid edges"))
}

fn give_snapshot() -> IndexSnapshot {
    snapshot(&[(
        "give.01",
        Namespace::PropBank,
        "give-13.1",
        Namespace::VerbNet,
        1.0,
    )])
}

/// Rendered `(id, confidence)` pairs for one namespace.
fn pairs(result: &ResolvedReference, namespace: Namespace) -> Vec<(String, f64)> {
    result
        .targets(namespace)
        .iter()
        .map(|t| (t.id.as_str().to_string(), t.confidence))
        .collect()
}

#[test]
fn test_exact_lookup_returns_direct_edge() {
    init_tracing();
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let options = ResolveOptions::default().with_target(Namespace::VerbNet);
    let result = resolver
        .resolve("give.01", Namespace::PropBank, &options)
        .unwrap();

    assert_eq!(result.matched_via, MatchedVia::Direct);
    assert_eq!(
        pairs(&result, Namespace::VerbNet),
        vec![("give-13.1".to_string(), 1.0)]
    );
    let target = &result.targets(Namespace::VerbNet)[0];
    assert_eq!(target.kind, EdgeKind::Direct);
    assert_eq!(target.hops, 1);
    assert!(result.fuzzy_candidates.is_empty());
}

#[test]
fn test_exact_confidence_is_preserved() {
    let snap = snapshot(&[(
        "give.01",
        Namespace::PropBank,
        "Giving",
        Namespace::FrameNet,
        0.73,
    )]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let result = resolver
        .resolve("give.01", Namespace::PropBank, &ResolveOptions::default())
        .unwrap();
    assert_eq!(result.targets(Namespace::FrameNet)[0].confidence, 0.73);
}

#[test]
fn test_fuzzy_fallback_discounts_by_match_score() {
    init_tracing();
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let options = ResolveOptions::default()
        .with_target(Namespace::VerbNet)
        .with_fuzzy(0.6);
    let result = resolver
        .resolve("giv.01", Namespace::PropBank, &options)
        .unwrap();

    let expected = matcher.edit_ratio("giv.01", "give.01", true);
    assert_eq!(result.matched_via, MatchedVia::Fuzzy);
    let targets = result.targets(Namespace::VerbNet);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].id.as_str(), "give-13.1");
    assert!((targets[0].confidence - expected).abs() < 1e-12);
    assert_eq!(targets[0].kind, EdgeKind::Fuzzy);
    assert_eq!(result.fuzzy_candidates[0].candidate, "give.01");
}

#[test]
fn test_transitive_expansion_from_fuzzy_anchor_carries_match_score() {
    let snap = snapshot(&[
        ("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 0.9),
        ("give-13.1", Namespace::VerbNet, "Giving", Namespace::FrameNet, 0.8),
    ]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let options = ResolveOptions::transitive().with_fuzzy(0.6);
    let result = resolver
        .resolve("giv.01", Namespace::PropBank, &options)
        .unwrap();

    let score = matcher.edit_ratio("giv.01", "give.01", true);
    assert_eq!(result.matched_via, MatchedVia::Fuzzy);

    let verbnet = &result.targets(Namespace::VerbNet)[0];
    assert_eq!(verbnet.kind, EdgeKind::Fuzzy);
    assert_eq!(verbnet.hops, 1);
    assert!((verbnet.confidence - score * 0.9).abs() < 1e-12);

    let framenet = result.targets(Namespace::FrameNet);
    assert_eq!(framenet.len(), 1);
    assert_eq!(framenet[0].id.as_str(), "Giving");
    assert_eq!(framenet[0].kind, EdgeKind::Transitive);
    assert_eq!(framenet[0].hops, 2);
    assert!((framenet[0].confidence - score * 0.9 * 0.8).abs() < 1e-12);
    let path: Vec<&str> = framenet[0].path.iter().map(|id| id.as_str()).collect();
    assert_eq!(path, vec!["give-13.1", "Giving"]);

    // The fuzzy anchor itself is not reported back.
    assert!(result.targets(Namespace::PropBank).is_empty());
}

#[test]
fn test_fuzzy_accepts_unparseable_queries() {
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let result = resolver
        .resolve(
            "give 01",
            Namespace::PropBank,
            &ResolveOptions::default().with_fuzzy(0.8),
        )
        .unwrap();
    assert_eq!(
        pairs(&result, Namespace::VerbNet),
        vec![("give-13.1".to_string(), 1.0)]
    );
}

#[test]
fn test_fuzzy_below_threshold_yields_empty() {
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let result = resolver
        .resolve(
            "zzzzzzzzzz",
            Namespace::PropBank,
            &ResolveOptions::default().with_fuzzy(0.9),
        )
        .unwrap();
    assert!(result.is_empty());
    assert!(result.resolved.is_empty());
    assert!(result.fuzzy_candidates.is_empty());
}

#[test]
fn test_parse_failure_without_fuzzy_is_an_error() {
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    match resolver.resolve("zzzzzzzzzz", Namespace::PropBank, &ResolveOptions::default()) {
        Err(LexMapError::Parse(err)) => {
            assert_eq!(err.raw, "zzzzzzzzzz");
            assert_eq!(err.namespace, Namespace::PropBank);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_but_valid_id_resolves_to_nothing() {
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let result = resolver
        .resolve("take.01", Namespace::PropBank, &ResolveOptions::default())
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.matched_via, MatchedVia::Direct);
}

#[test]
fn test_threshold_is_validated_before_any_work() {
    let snap = give_snapshot();
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    for threshold in [-0.5, 1.01] {
        let options = ResolveOptions {
            threshold,
            ..ResolveOptions::default()
        };
        // Even an unparseable query reports the threshold first.
        match resolver.resolve("%%%", Namespace::PropBank, &options) {
            Err(LexMapError::InvalidThreshold { value }) => assert_eq!(value, threshold),
            other => panic!("expected InvalidThreshold, got {other:?}"),
        }
    }
    assert_eq!(parser.stats().misses, 0);
}

#[test]
fn test_two_hop_confidence_is_the_product() {
    let snap = snapshot(&[
        ("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 0.9),
        ("give-13.1", Namespace::VerbNet, "Giving", Namespace::FrameNet, 0.8),
    ]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let direct_only = resolver
        .resolve("give.01", Namespace::PropBank, &ResolveOptions::default())
        .unwrap();
    assert!(direct_only.targets(Namespace::FrameNet).is_empty());

    let result = resolver
        .resolve("give.01", Namespace::PropBank, &ResolveOptions::transitive())
        .unwrap();
    let giving = &result.targets(Namespace::FrameNet)[0];
    assert!((giving.confidence - 0.9 * 0.8).abs() < 1e-9);
    assert!(giving.confidence <= 0.9 && giving.confidence <= 0.8);
    assert_eq!(giving.kind, EdgeKind::Transitive);
    assert_eq!(giving.hops, 2);
    assert_eq!(
        giving
            .path
            .iter()
            .map(ResourceId::as_str)
            .collect::<Vec<_>>(),
        vec!["give-13.1", "Giving"]
    );
}

#[test]
fn test_target_filter_limits_namespaces() {
    let snap = snapshot(&[
        ("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 1.0),
        ("give.01", Namespace::PropBank, "Giving", Namespace::FrameNet, 0.9),
    ]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let all = resolver
        .resolve("give.01", Namespace::PropBank, &ResolveOptions::default())
        .unwrap();
    assert_eq!(all.len(), 2);

    let only_fn = resolver
        .resolve_tagged("give.01", "pb", "framenet", &ResolveOptions::default())
        .unwrap();
    assert_eq!(
        only_fn.resolved.keys().copied().collect::<Vec<_>>(),
        vec![Namespace::FrameNet]
    );

    assert!(matches!(
        resolver.resolve_tagged("give.01", "pb", "ontonotes", &ResolveOptions::default()),
        Err(LexMapError::UnknownNamespace { .. })
    ));
}

#[test]
fn test_results_sort_by_confidence_then_id() {
    let snap = snapshot(&[
        ("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 0.7),
        ("give.01", Namespace::PropBank, "contribute-13.2", Namespace::VerbNet, 0.9),
        ("give.01", Namespace::PropBank, "future_having-13.3", Namespace::VerbNet, 0.7),
    ]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let result = resolver
        .resolve("give.01", Namespace::PropBank, &ResolveOptions::default())
        .unwrap();
    let order: Vec<String> = pairs(&result, Namespace::VerbNet)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(order, vec!["contribute-13.2", "future_having-13.3", "give-13.1"]);
}

#[test]
fn test_repeated_queries_serialize_identically() {
    let snap = snapshot(&[
        ("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 0.9),
        ("give-13.1", Namespace::VerbNet, "Giving", Namespace::FrameNet, 0.8),
        ("give.01", Namespace::PropBank, "give%2:40:00::", Namespace::WordNet, 1.0),
    ]);
    let parser = SymbolParser::default();
    let matcher = FuzzyMatcher::default();
    let resolver = ReferenceResolver::new(&snap, &parser, &matcher);

    let options = ResolveOptions::transitive();
    let first = resolver.resolve("give.01", Namespace::PropBank, &options).unwrap();
    let second = resolver.resolve("give.01", Namespace::PropBank, &options).unwrap();

    let first = serde_json::to_string(&first).unwrap();
    let second = serde_json::to_string(&second).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\"matched_via\":\"direct\""));
}
