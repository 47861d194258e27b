use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LexMapError, Result};
use crate::fuzzy::FuzzyMatch;
use crate::symbols::ResourceId;

/// The four identifier spaces unified by the mapping index.
///
/// Declaration order doubles as sort order for keys and result maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    FrameNet,
    PropBank,
    VerbNet,
    WordNet,
}

#[allow(clippy::should_implement_trait)]
impl Namespace {
    /// All namespaces, in sort order.
    pub const ALL: [Namespace; 4] = [
        Namespace::FrameNet,
        Namespace::PropBank,
        Namespace::VerbNet,
        Namespace::WordNet,
    ];

    /// Returns the string representation of this namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::FrameNet => "framenet",
            Namespace::PropBank => "propbank",
            Namespace::VerbNet => "verbnet",
            Namespace::WordNet => "wordnet",
        }
    }

    /// Parses a namespace tag (case-insensitive, short forms accepted),
    /// returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Namespace> {
        match s.trim().to_ascii_lowercase().as_str() {
            "framenet" | "fn" => Some(Namespace::FrameNet),
            "propbank" | "pb" => Some(Namespace::PropBank),
            "verbnet" | "vn" => Some(Namespace::VerbNet),
            "wordnet" | "wn" => Some(Namespace::WordNet),
            _ => None,
        }
    }

    /// Like [`Namespace::from_str`] but reports unknown tags as an error.
    pub fn parse(s: &str) -> Result<Namespace> {
        Self::from_str(s).ok_or_else(|| LexMapError::UnknownNamespace {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which namespaces a query should report results for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetNamespace {
    #[default]
    All,
    Only(Namespace),
}

#[allow(clippy::should_implement_trait)]
impl TargetNamespace {
    /// Parses `"all"` or any namespace tag accepted by [`Namespace::from_str`].
    pub fn from_str(s: &str) -> Result<TargetNamespace> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TargetNamespace::All);
        }
        Namespace::parse(s).map(TargetNamespace::Only)
    }

    pub fn includes(&self, namespace: Namespace) -> bool {
        match self {
            TargetNamespace::All => true,
            TargetNamespace::Only(ns) => *ns == namespace,
        }
    }
}

impl From<Namespace> for TargetNamespace {
    fn from(namespace: Namespace) -> Self {
        TargetNamespace::Only(namespace)
    }
}

/// Provenance of a mapping edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Asserted by a source record.
    Direct,
    /// Inferred at query time by approximate matching of the query.
    Fuzzy,
    /// Composed from two or more hops.
    Transitive,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Direct => "direct",
            EdgeKind::Fuzzy => "fuzzy",
            EdgeKind::Transitive => "transitive",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the query id was anchored in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedVia {
    Direct,
    Fuzzy,
}

/// A weighted edge between two identifiers in different namespaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingEdge {
    pub source: ResourceId,
    pub target: ResourceId,
    pub confidence: f64,
    pub kind: EdgeKind,
}

impl MappingEdge {
    /// Creates a `Direct` edge.
    pub fn direct(source: ResourceId, target: ResourceId, confidence: f64) -> Self {
        Self {
            source,
            target,
            confidence,
            kind: EdgeKind::Direct,
        }
    }

    /// The same edge with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            confidence: self.confidence,
            kind: self.kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Validated input records
// ---------------------------------------------------------------------------

/// A cross-namespace link embedded in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Raw identifier of the linked symbol.
    pub target: String,
    /// Namespace the target identifier belongs to.
    pub namespace: Namespace,
    /// Confidence asserted by the dataset, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Link {
    pub fn new(target: &str, namespace: Namespace) -> Self {
        Self {
            target: target.to_string(),
            namespace,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A FrameNet frame with its frame-level links and lexical units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameNetFrame {
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub lexical_units: Vec<FrameNetLexicalUnit>,
}

/// A lexical unit (`give.v`) and its sense links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameNetLexicalUnit {
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A PropBank frameset: every roleset of one predicate lemma.
///
/// The lemma itself is not stored; each roleset id already carries it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankFrameset {
    #[serde(default)]
    pub rolesets: Vec<PropBankRoleset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankRoleset {
    pub id: String,
    /// Roleset-level links (VerbNet classes, FrameNet frames).
    #[serde(default)]
    pub lexlinks: Vec<Link>,
    #[serde(default)]
    pub roles: Vec<PropBankRole>,
}

/// A numbered or modifier argument of a roleset with its role links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankRole {
    /// Argument label, e.g. `ARG0` or `ARGM-LOC`.
    pub argument: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A VerbNet class; subclasses nest recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbNetClass {
    pub id: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub members: Vec<VerbNetMember>,
    #[serde(default)]
    pub subclasses: Vec<VerbNetClass>,
}

/// A verb member (`give#2`) and its sense links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbNetMember {
    pub key: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A WordNet sense and the links asserted for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordNetSense {
    pub sense_key: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// The validated record streams of all four resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub framenet: Vec<FrameNetFrame>,
    #[serde(default)]
    pub propbank: Vec<PropBankFrameset>,
    #[serde(default)]
    pub verbnet: Vec<VerbNetClass>,
    #[serde(default)]
    pub wordnet: Vec<WordNetSense>,
}

impl RecordSet {
    /// Number of top-level records in the given namespace.
    pub fn record_count(&self, namespace: Namespace) -> usize {
        match namespace {
            Namespace::FrameNet => self.framenet.len(),
            Namespace::PropBank => self.propbank.len(),
            Namespace::VerbNet => self.verbnet.len(),
            Namespace::WordNet => self.wordnet.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Namespace::ALL.iter().all(|ns| self.record_count(*ns) == 0)
    }
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// One resolved counterpart of a query id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTarget {
    pub id: ResourceId,
    pub confidence: f64,
    pub kind: EdgeKind,
    /// Number of edges between the anchored query and `id`.
    pub hops: u32,
    /// Ids traversed after the anchor; the last element is `id`.
    pub path: Vec<ResourceId>,
}

/// Result of a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedReference {
    pub query_id: String,
    pub source: Namespace,
    /// Results per target namespace; namespaces without results are absent.
    pub resolved: BTreeMap<Namespace, Vec<ResolvedTarget>>,
    pub matched_via: MatchedVia,
    /// Candidates the query was fuzzily anchored to, best first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fuzzy_candidates: Vec<FuzzyMatch>,
}

impl ResolvedReference {
    /// Results for one namespace (empty when there are none).
    pub fn targets(&self, namespace: Namespace) -> &[ResolvedTarget] {
        self.resolved
            .get(&namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.values().all(Vec::is_empty)
    }

    /// Total number of targets across all namespaces.
    pub fn len(&self) -> usize {
        self.resolved.values().map(Vec::len).sum()
    }
}
