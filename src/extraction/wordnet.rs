use super::{LinkSource, RawLink};
use crate::types::{Namespace, WordNetSense};

impl LinkSource for WordNetSense {
    const NAMESPACE: Namespace = Namespace::WordNet;

    fn collect_links<'a>(&'a self, out: &mut Vec<RawLink<'a>>) {
        out.extend(self.links.iter().map(|link| RawLink {
            source: self.sense_key.clone(),
            link,
        }));
    }
}
