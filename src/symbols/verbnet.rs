use std::fmt;

/// A VerbNet class id or member key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VerbNetSymbol {
    /// `give-13.1-1`: name `give`, number `[13, 1]`, subclass `[1]`.
    Class {
        name: String,
        number: Vec<u32>,
        subclass: Vec<u32>,
    },
    /// `give#2`
    Member { lemma: String, sense: u32 },
}

impl VerbNetSymbol {
    pub fn is_class(&self) -> bool {
        matches!(self, VerbNetSymbol::Class { .. })
    }

    /// The enclosing class of a subclass; absent for top-level classes and
    /// members.
    pub fn parent(&self) -> Option<VerbNetSymbol> {
        match self {
            VerbNetSymbol::Class {
                name,
                number,
                subclass,
            } if !subclass.is_empty() => Some(VerbNetSymbol::Class {
                name: name.clone(),
                number: number.clone(),
                subclass: subclass[..subclass.len() - 1].to_vec(),
            }),
            _ => None,
        }
    }

    /// Subclass nesting depth; 0 for top-level classes and members.
    pub fn depth(&self) -> usize {
        match self {
            VerbNetSymbol::Class { subclass, .. } => subclass.len(),
            VerbNetSymbol::Member { .. } => 0,
        }
    }
}

impl fmt::Display for VerbNetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbNetSymbol::Class {
                name,
                number,
                subclass,
            } => {
                write!(f, "{name}-")?;
                for (i, n) in number.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{n}")?;
                }
                for s in subclass {
                    write!(f, "-{s}")?;
                }
                Ok(())
            }
            VerbNetSymbol::Member { lemma, sense } => write!(f, "{lemma}#{sense}"),
        }
    }
}

pub(super) fn parse(raw: &str) -> Result<VerbNetSymbol, String> {
    if let Some((lemma, sense)) = raw.rsplit_once('#') {
        let lemma_ok = lemma
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && lemma
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '\''));
        if !lemma_ok {
            return Err(format!("invalid member lemma {lemma:?}"));
        }
        return Ok(VerbNetSymbol::Member {
            lemma: lemma.to_string(),
            sense: parse_number(sense)?,
        });
    }

    let (name, rest) = raw
        .split_once('-')
        .ok_or_else(|| "expected a class id like 'give-13.1'".to_string())?;

    let name_ok = name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && name.chars().all(|c| c.is_ascii_lowercase() || c == '_');
    if !name_ok {
        return Err(format!("invalid class name {name:?}"));
    }

    let mut parts = rest.split('-');
    let dotted = parts.next().unwrap_or_default();
    let number = dotted
        .split('.')
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    let subclass = parts.map(parse_number).collect::<Result<Vec<_>, _>>()?;

    Ok(VerbNetSymbol::Class {
        name: name.to_string(),
        number,
        subclass,
    })
}

fn parse_number(digits: &str) -> Result<u32, String> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("expected digits, found {digits:?}"));
    }
    digits
        .parse()
        .map_err(|_| format!("number {digits:?} is out of range"))
}
