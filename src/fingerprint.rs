use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::types::RecordSet;

/// SHA-256 of `content`, hex encoded.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    hex::encode(result)
}

impl RecordSet {
    /// Content hash of the serialized record set.
    ///
    /// Two record sets with equal contents always hash alike, so the value
    /// can tell whether a cached index is still current.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(content_hash(&bytes))
    }
}

/// Supplier of validated records for extraction.
///
/// Loading and validating the raw resources happens elsewhere; this trait is
/// the seam through which they reach the extractor.
pub trait RecordSource {
    fn records(&self) -> Result<RecordSet>;

    /// Identifies the current contents of the source.
    ///
    /// When present, a cache written for a different fingerprint is treated
    /// as stale. Sources that cannot compute one cheaply return `None`.
    fn fingerprint(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

impl RecordSource for RecordSet {
    fn records(&self) -> Result<RecordSet> {
        Ok(self.clone())
    }

    fn fingerprint(&self) -> Result<Option<String>> {
        RecordSet::fingerprint(self).map(Some)
    }
}
