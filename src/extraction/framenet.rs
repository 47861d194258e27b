use super::{LinkSource, RawLink};
use crate::types::{FrameNetFrame, Namespace};

/// Frame-level links plus the sense links of each lexical unit.
impl LinkSource for FrameNetFrame {
    const NAMESPACE: Namespace = Namespace::FrameNet;

    fn collect_links<'a>(&'a self, out: &mut Vec<RawLink<'a>>) {
        out.extend(self.links.iter().map(|link| RawLink {
            source: self.name.clone(),
            link,
        }));
        for lu in &self.lexical_units {
            out.extend(lu.links.iter().map(|link| RawLink {
                source: lu.name.clone(),
                link,
            }));
        }
    }
}
