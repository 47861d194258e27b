//! Reference extraction from validated records.
//!
//! Each resource stores its cross-namespace links differently; the
//! [`LinkSource`] implementations flatten them into [`RawLink`]s, and the
//! [`ReferenceExtractor`] turns those into parsed `Direct` edges.

mod framenet;
mod propbank;
mod verbnet;
mod wordnet;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::errors::{check_unit_interval, LexMapError, Result};
use crate::symbols::SymbolParser;
use crate::types::{Link, MappingEdge, Namespace, RecordSet};

/// A link as found in a record, before any parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLink<'a> {
    /// Raw id of the record (or sub-record) carrying the link.
    pub source: String,
    pub link: &'a Link,
}

/// A record type that embeds cross-namespace links.
pub trait LinkSource {
    /// Namespace of the record's own identifiers.
    const NAMESPACE: Namespace;

    /// Appends every link carried by this record and its sub-records.
    fn collect_links<'a>(&'a self, out: &mut Vec<RawLink<'a>>);
}

/// Progress report passed to the extraction callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub namespace: Namespace,
    pub processed: usize,
    pub total: usize,
}

/// Callback invoked during extraction.
pub type ProgressFn<'a> = dyn FnMut(Progress) + 'a;

/// Knobs for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Report progress every this many records (0 disables intermediate reports).
    pub progress_interval: usize,
    /// Checked at every record boundary; setting it aborts the run.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            progress_interval: 1000,
            cancel: None,
        }
    }
}

impl ExtractOptions {
    /// Options with a fresh cancellation flag; the flag is returned for the caller.
    pub fn cancellable() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        let options = Self {
            cancel: Some(Arc::clone(&flag)),
            ..Self::default()
        };
        (options, flag)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Outcome of a full extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub edges: Vec<MappingEdge>,
    /// Links dropped because an endpoint or confidence was malformed.
    pub skipped: usize,
    pub records_processed: usize,
    pub duration_ms: u64,
}

/// Walks record streams and emits `Direct` mapping edges.
pub struct ReferenceExtractor<'p> {
    parser: &'p SymbolParser,
}

/// Running totals for one extraction.
#[derive(Default)]
struct ExtractState {
    edges: Vec<MappingEdge>,
    skipped: usize,
    processed: usize,
}

impl<'p> ReferenceExtractor<'p> {
    pub fn new(parser: &'p SymbolParser) -> Self {
        Self { parser }
    }

    /// Extracts edges from every namespace of `records`.
    ///
    /// Returns [`LexMapError::Cancelled`] (and no edges) if the cancellation
    /// flag is raised while records are being walked.
    pub fn extract(
        &self,
        records: &RecordSet,
        options: &ExtractOptions,
        mut progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut state = ExtractState::default();

        self.extract_namespace(&records.framenet, options, &mut progress, &mut state)?;
        self.extract_namespace(&records.propbank, options, &mut progress, &mut state)?;
        self.extract_namespace(&records.verbnet, options, &mut progress, &mut state)?;
        self.extract_namespace(&records.wordnet, options, &mut progress, &mut state)?;

        if state.skipped > 0 {
            warn!(skipped = state.skipped, "skipped malformed links during extraction");
        }
        info!(
            records = state.processed,
            edges = state.edges.len(),
            "extraction finished"
        );

        Ok(ExtractionResult {
            edges: state.edges,
            skipped: state.skipped,
            records_processed: state.processed,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Extracts edges from a single record stream.
    pub fn extract_records<R: LinkSource>(&self, records: &[R]) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut state = ExtractState::default();
        self.extract_namespace(records, &ExtractOptions::default(), &mut None, &mut state)?;
        Ok(ExtractionResult {
            edges: state.edges,
            skipped: state.skipped,
            records_processed: state.processed,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn extract_namespace<R: LinkSource>(
        &self,
        records: &[R],
        options: &ExtractOptions,
        progress: &mut Option<&mut ProgressFn<'_>>,
        state: &mut ExtractState,
    ) -> Result<()> {
        let namespace = R::NAMESPACE;
        let total = records.len();
        let mut report = |processed: usize| {
            if let Some(callback) = progress.as_mut() {
                callback(Progress {
                    namespace,
                    processed,
                    total,
                });
            }
        };

        report(0);
        let mut links = Vec::new();
        for (i, record) in records.iter().enumerate() {
            if options.is_cancelled() {
                info!(namespace = %namespace, records = state.processed, "extraction cancelled");
                return Err(LexMapError::Cancelled {
                    records: state.processed,
                });
            }

            links.clear();
            record.collect_links(&mut links);
            for raw in &links {
                match self.edge_for(namespace, raw) {
                    Some(edge) => state.edges.push(edge),
                    None => state.skipped += 1,
                }
            }
            state.processed += 1;

            let done = i + 1;
            if options.progress_interval > 0 && done % options.progress_interval == 0 && done < total
            {
                report(done);
            }
        }
        if total > 0 {
            report(total);
        }
        Ok(())
    }

    /// Parses both endpoints of a link; `None` means the link is skipped.
    fn edge_for(&self, namespace: Namespace, raw: &RawLink<'_>) -> Option<MappingEdge> {
        let source = match self.parser.parse(&raw.source, namespace) {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "skipping link with malformed source");
                return None;
            }
        };
        let target = match self.parser.parse(&raw.link.target, raw.link.namespace) {
            Ok(id) => id,
            Err(e) => {
                debug!(source = %source, error = %e, "skipping link with malformed target");
                return None;
            }
        };
        if target.namespace() == namespace {
            debug!(source = %source, target = %target, "skipping intra-namespace link");
            return None;
        }

        let confidence = raw.link.confidence.unwrap_or(1.0);
        if !check_unit_interval(confidence) {
            debug!(
                source = %source,
                target = %target,
                confidence,
                "skipping link with invalid confidence"
            );
            return None;
        }

        Some(MappingEdge::direct(source, target, confidence))
    }
}
