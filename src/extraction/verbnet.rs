use super::{LinkSource, RawLink};
use crate::types::{Namespace, VerbNetClass};

/// Class links and member sense links, walking subclasses depth-first.
impl LinkSource for VerbNetClass {
    const NAMESPACE: Namespace = Namespace::VerbNet;

    fn collect_links<'a>(&'a self, out: &mut Vec<RawLink<'a>>) {
        let mut stack: Vec<&'a VerbNetClass> = vec![self];
        while let Some(class) = stack.pop() {
            out.extend(class.links.iter().map(|link| RawLink {
                source: class.id.clone(),
                link,
            }));
            for member in &class.members {
                out.extend(member.links.iter().map(|link| RawLink {
                    source: member.key.clone(),
                    link,
                }));
            }
            // Reversed so subclasses are visited in declaration order.
            stack.extend(class.subclasses.iter().rev());
        }
    }
}
