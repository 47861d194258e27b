use std::fmt;

/// Part-of-speech suffixes used by FrameNet lexical unit names.
const LU_POS: &[&str] = &[
    "v", "n", "a", "adv", "prep", "num", "c", "art", "intj", "scon", "pron",
];

/// A FrameNet frame, frame element or lexical unit name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameNetSymbol {
    /// `Giving`
    Frame { name: String },
    /// `Giving.Donor`
    FrameElement { frame: String, element: String },
    /// `give.v`
    LexicalUnit { lemma: String, pos: String },
}

impl FrameNetSymbol {
    /// The frame this symbol belongs to; absent for lexical units.
    pub fn frame(&self) -> Option<&str> {
        match self {
            FrameNetSymbol::Frame { name } => Some(name),
            FrameNetSymbol::FrameElement { frame, .. } => Some(frame),
            FrameNetSymbol::LexicalUnit { .. } => None,
        }
    }

    pub fn element(&self) -> Option<&str> {
        match self {
            FrameNetSymbol::FrameElement { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn lemma(&self) -> Option<&str> {
        match self {
            FrameNetSymbol::LexicalUnit { lemma, .. } => Some(lemma),
            _ => None,
        }
    }

    pub fn pos(&self) -> Option<&str> {
        match self {
            FrameNetSymbol::LexicalUnit { pos, .. } => Some(pos),
            _ => None,
        }
    }

    /// Lower-cased, space separated name suitable for matching.
    pub fn normalized_name(&self) -> String {
        match self {
            FrameNetSymbol::Frame { name } => normalize_frame_name(name),
            FrameNetSymbol::FrameElement { element, .. } => normalize_frame_name(element),
            FrameNetSymbol::LexicalUnit { lemma, .. } => lemma.to_lowercase(),
        }
    }
}

impl fmt::Display for FrameNetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameNetSymbol::Frame { name } => f.write_str(name),
            FrameNetSymbol::FrameElement { frame, element } => write!(f, "{frame}.{element}"),
            FrameNetSymbol::LexicalUnit { lemma, pos } => write!(f, "{lemma}.{pos}"),
        }
    }
}

pub(super) fn parse(raw: &str) -> Result<FrameNetSymbol, String> {
    let starts_upper = raw.chars().next().is_some_and(|c| c.is_ascii_uppercase());

    if starts_upper {
        return match raw.split_once('.') {
            None => {
                check_name(raw, "frame")?;
                Ok(FrameNetSymbol::Frame {
                    name: raw.to_string(),
                })
            }
            Some((frame, element)) => {
                check_name(frame, "frame")?;
                check_name(element, "frame element")?;
                Ok(FrameNetSymbol::FrameElement {
                    frame: frame.to_string(),
                    element: element.to_string(),
                })
            }
        };
    }

    let (lemma, pos) = raw
        .rsplit_once('.')
        .ok_or_else(|| "expected a frame name or a lexical unit like 'give.v'".to_string())?;
    if !LU_POS.contains(&pos) {
        return Err(format!("unknown lexical unit part of speech {pos:?}"));
    }
    check_lemma(lemma)?;
    Ok(FrameNetSymbol::LexicalUnit {
        lemma: lemma.to_string(),
        pos: pos.to_string(),
    })
}

/// `^[A-Z][A-Za-z0-9_]*$`
fn check_name(name: &str, what: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return Err(format!("{what} name must start with an upper-case letter")),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(format!("invalid character in {what} name {name:?}"))
    }
}

fn check_lemma(lemma: &str) -> Result<(), String> {
    let first_ok = lemma
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !first_ok {
        return Err("lexical unit lemma must start with a lower-case letter or digit".to_string());
    }
    if lemma.ends_with(' ') || lemma.contains("  ") {
        return Err("lexical unit lemma has irregular spacing".to_string());
    }
    let valid = lemma.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '\'' | '-' | ' ')
    });
    if valid {
        Ok(())
    } else {
        Err(format!("invalid character in lexical unit lemma {lemma:?}"))
    }
}

/// Normalizes a frame or element name: underscores and CamelCase boundaries
/// become single spaces and the result is lower-cased.
///
/// `Cause_motion`, `CauseMotion` and `cause motion` all yield `cause motion`.
pub fn normalize_frame_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c.is_whitespace() {
            out.push(' ');
            continue;
        }
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // aB -> a B, and ABc -> A Bc
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
