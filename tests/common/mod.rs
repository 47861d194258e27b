#![allow(dead_code)]

use std::sync::Once;

use lexmap::types::*;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output to the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A small record set spanning all four namespaces:
///
/// - `give.01` -> `give-13.1` (1.0), `Giving` (0.9)
/// - `give.01.ARG0` -> `Giving.Donor` (0.95)
/// - `give-13.1` -> `Giving` (0.8); member `give#2` -> `give%2:40:00::`
/// - `give-13.1-1` -> `Giving` (0.7)
/// - `Giving` LU `give.v` -> `give%2:40:00::`
/// - `give%2:40:00::` -> `give.01` (0.9)
pub fn sample_records() -> RecordSet {
    RecordSet {
        framenet: vec![FrameNetFrame {
            name: "Giving".to_string(),
            links: vec![],
            lexical_units: vec![FrameNetLexicalUnit {
                name: "give.v".to_string(),
                links: vec![Link::new("give%2:40:00::", Namespace::WordNet)],
            }],
        }],
        propbank: vec![PropBankFrameset {
            rolesets: vec![PropBankRoleset {
                id: "give.01".to_string(),
                lexlinks: vec![
                    Link::new("give-13.1", Namespace::VerbNet).with_confidence(1.0),
                    Link::new("Giving", Namespace::FrameNet).with_confidence(0.9),
                ],
                roles: vec![PropBankRole {
                    argument: "ARG0".to_string(),
                    links: vec![
                        Link::new("Giving.Donor", Namespace::FrameNet).with_confidence(0.95)
                    ],
                }],
            }],
        }],
        verbnet: vec![VerbNetClass {
            id: "give-13.1".to_string(),
            links: vec![Link::new("Giving", Namespace::FrameNet).with_confidence(0.8)],
            members: vec![VerbNetMember {
                key: "give#2".to_string(),
                links: vec![Link::new("give%2:40:00::", Namespace::WordNet)],
            }],
            subclasses: vec![VerbNetClass {
                id: "give-13.1-1".to_string(),
                links: vec![Link::new("Giving", Namespace::FrameNet).with_confidence(0.7)],
                members: vec![],
                subclasses: vec![],
            }],
        }],
        wordnet: vec![WordNetSense {
            sense_key: "give%2:40:00::".to_string(),
            links: vec![Link::new("give.01", Namespace::PropBank).with_confidence(0.9)],
        }],
    }
}
