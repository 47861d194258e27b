use std::fmt;

/// `C-` (continuation) or `R-` (reference) argument prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgPrefix {
    Continuation,
    Reference,
}

impl ArgPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgPrefix::Continuation => "C-",
            ArgPrefix::Reference => "R-",
        }
    }
}

/// Number of a core argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgNumber {
    /// `ARG0` through `ARG7`.
    Numbered(u8),
    /// `ARGA`, the secondary agent.
    Agent,
}

/// A parsed argument label such as `ARG0`, `ARGM-LOC` or `C-ARG1`.
///
/// Exactly one of `number` and `modifier` is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropBankArg {
    pub prefix: Option<ArgPrefix>,
    pub number: Option<ArgNumber>,
    pub modifier: Option<String>,
}

impl PropBankArg {
    pub fn is_core(&self) -> bool {
        self.number.is_some()
    }

    pub fn is_modifier(&self) -> bool {
        self.modifier.is_some()
    }

    pub fn parse(label: &str) -> Result<Self, String> {
        let (prefix, rest) = if let Some(rest) = label.strip_prefix("C-") {
            (Some(ArgPrefix::Continuation), rest)
        } else if let Some(rest) = label.strip_prefix("R-") {
            (Some(ArgPrefix::Reference), rest)
        } else {
            (None, label)
        };

        if rest == "ARGA" {
            return Ok(Self {
                prefix,
                number: Some(ArgNumber::Agent),
                modifier: None,
            });
        }

        if let Some(kind) = rest.strip_prefix("ARGM-") {
            let valid = !kind.is_empty()
                && kind
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
            if !valid {
                return Err(format!("invalid modifier type {kind:?}"));
            }
            return Ok(Self {
                prefix,
                number: None,
                modifier: Some(kind.to_string()),
            });
        }

        if let Some(digit) = rest.strip_prefix("ARG") {
            let mut chars = digit.chars();
            if let (Some(d @ '0'..='7'), None) = (chars.next(), chars.next()) {
                return Ok(Self {
                    prefix,
                    number: Some(ArgNumber::Numbered(d as u8 - b'0')),
                    modifier: None,
                });
            }
        }

        Err(format!("unrecognized argument label {label:?}"))
    }
}

impl fmt::Display for PropBankArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            f.write_str(prefix.as_str())?;
        }
        match (&self.number, &self.modifier) {
            (Some(ArgNumber::Numbered(n)), _) => write!(f, "ARG{n}"),
            (Some(ArgNumber::Agent), _) => f.write_str("ARGA"),
            (None, Some(kind)) => write!(f, "ARGM-{kind}"),
            (None, None) => f.write_str("ARG"),
        }
    }
}

/// A roleset id (`give.01`), optionally qualified by an argument
/// (`give.01.ARG0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropBankSymbol {
    pub lemma: String,
    pub sense: u32,
    /// Digit count of the sense number as written (`01` has width 2).
    pub sense_width: usize,
    pub argument: Option<PropBankArg>,
}

impl PropBankSymbol {
    /// The roleset id without any argument qualifier.
    pub fn roleset_id(&self) -> String {
        format!("{}.{:0width$}", self.lemma, self.sense, width = self.sense_width)
    }

    pub fn is_argument(&self) -> bool {
        self.argument.is_some()
    }
}

impl fmt::Display for PropBankSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.roleset_id())?;
        if let Some(arg) = &self.argument {
            write!(f, ".{arg}")?;
        }
        Ok(())
    }
}

pub(super) fn parse(raw: &str) -> Result<PropBankSymbol, String> {
    let (roleset, argument) = match raw.rsplit_once('.') {
        Some((head, tail)) if looks_like_argument(tail) => {
            (head, Some(PropBankArg::parse(tail)?))
        }
        _ => (raw, None),
    };

    let (lemma, digits) = roleset
        .rsplit_once('.')
        .ok_or_else(|| "expected a roleset id like 'give.01'".to_string())?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("roleset sense {digits:?} is not numeric"));
    }
    let sense: u32 = digits
        .parse()
        .map_err(|_| format!("roleset sense {digits:?} is out of range"))?;

    let lemma_ok = lemma.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    });
    if !lemma_ok {
        return Err(format!("invalid predicate lemma {lemma:?}"));
    }

    Ok(PropBankSymbol {
        lemma: lemma.to_string(),
        sense,
        sense_width: digits.len(),
        argument,
    })
}

fn looks_like_argument(segment: &str) -> bool {
    let bare = segment
        .strip_prefix("C-")
        .or_else(|| segment.strip_prefix("R-"))
        .unwrap_or(segment);
    bare.starts_with("ARG")
}
