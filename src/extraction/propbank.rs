use super::{LinkSource, RawLink};
use crate::types::{Namespace, PropBankFrameset};

/// Roleset lexlinks, and argument-role links keyed `<roleset>.<ARG>`.
impl LinkSource for PropBankFrameset {
    const NAMESPACE: Namespace = Namespace::PropBank;

    fn collect_links<'a>(&'a self, out: &mut Vec<RawLink<'a>>) {
        for roleset in &self.rolesets {
            out.extend(roleset.lexlinks.iter().map(|link| RawLink {
                source: roleset.id.clone(),
                link,
            }));
            for role in &roleset.roles {
                let source = format!("{}.{}", roleset.id, role.argument);
                out.extend(role.links.iter().map(|link| RawLink {
                    source: source.clone(),
                    link,
                }));
            }
        }
    }
}
