use std::fmt;

/// WordNet synset type, numbered as in sense keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SsType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Satellite,
}

impl SsType {
    /// Digit used in sense keys (`1`..`5`).
    pub fn digit(&self) -> char {
        match self {
            SsType::Noun => '1',
            SsType::Verb => '2',
            SsType::Adjective => '3',
            SsType::Adverb => '4',
            SsType::Satellite => '5',
        }
    }

    /// Letter used in synset ids (`n v a r s`).
    pub fn letter(&self) -> char {
        match self {
            SsType::Noun => 'n',
            SsType::Verb => 'v',
            SsType::Adjective => 'a',
            SsType::Adverb => 'r',
            SsType::Satellite => 's',
        }
    }

    pub fn from_digit(c: char) -> Option<SsType> {
        match c {
            '1' => Some(SsType::Noun),
            '2' => Some(SsType::Verb),
            '3' => Some(SsType::Adjective),
            '4' => Some(SsType::Adverb),
            '5' => Some(SsType::Satellite),
            _ => None,
        }
    }

    pub fn from_letter(c: char) -> Option<SsType> {
        match c {
            'n' => Some(SsType::Noun),
            'v' => Some(SsType::Verb),
            'a' => Some(SsType::Adjective),
            'r' => Some(SsType::Adverb),
            's' => Some(SsType::Satellite),
            _ => None,
        }
    }
}

/// Head word of a satellite adjective sense key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SatelliteHead {
    pub word: String,
    pub id: u8,
}

/// A WordNet sense key or synset id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WordNetSymbol {
    /// `give%2:40:00::`
    SenseKey {
        lemma: String,
        ss_type: SsType,
        lex_filenum: u8,
        lex_id: u8,
        head: Option<SatelliteHead>,
    },
    /// `02232813-v`
    Synset { offset: u32, ss_type: SsType },
}

impl WordNetSymbol {
    pub fn ss_type(&self) -> SsType {
        match self {
            WordNetSymbol::SenseKey { ss_type, .. } | WordNetSymbol::Synset { ss_type, .. } => {
                *ss_type
            }
        }
    }

    pub fn lemma(&self) -> Option<&str> {
        match self {
            WordNetSymbol::SenseKey { lemma, .. } => Some(lemma),
            WordNetSymbol::Synset { .. } => None,
        }
    }

    /// Lemma with underscores, hyphens and apostrophes folded for matching.
    pub fn normalized_lemma(&self) -> Option<String> {
        self.lemma().map(|lemma| {
            lemma
                .replace(['_', '-'], " ")
                .replace('\'', "")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        })
    }
}

impl fmt::Display for WordNetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordNetSymbol::SenseKey {
                lemma,
                ss_type,
                lex_filenum,
                lex_id,
                head,
            } => {
                write!(
                    f,
                    "{lemma}%{}:{lex_filenum:02}:{lex_id:02}:",
                    ss_type.digit()
                )?;
                match head {
                    Some(head) => write!(f, "{}:{:02}", head.word, head.id),
                    None => f.write_str(":"),
                }
            }
            WordNetSymbol::Synset { offset, ss_type } => {
                write!(f, "{offset:08}-{}", ss_type.letter())
            }
        }
    }
}

pub(super) fn parse(raw: &str) -> Result<WordNetSymbol, String> {
    match raw.split_once('%') {
        Some((lemma, rest)) => parse_sense_key(lemma, rest),
        None => parse_synset(raw),
    }
}

fn parse_sense_key(lemma: &str, rest: &str) -> Result<WordNetSymbol, String> {
    if lemma.is_empty() || lemma.chars().any(|c| c.is_whitespace() || c == ':') {
        return Err(format!("invalid sense key lemma {lemma:?}"));
    }

    let fields: Vec<&str> = rest.split(':').collect();
    let [ss, filenum, lex_id, head_word, head_id] = fields.as_slice() else {
        return Err(format!(
            "sense key must have 5 ':'-separated fields after '%', found {}",
            fields.len()
        ));
    };

    let mut ss_chars = ss.chars();
    let ss_type = match (ss_chars.next(), ss_chars.next()) {
        (Some(c), None) => SsType::from_digit(c),
        _ => None,
    }
    .ok_or_else(|| format!("invalid synset type {ss:?}"))?;

    let lex_filenum = two_digits(filenum, "lex_filenum")?;
    let lex_id = two_digits(lex_id, "lex_id")?;

    let head = match (head_word.is_empty(), head_id.is_empty()) {
        (true, true) => None,
        (false, false) => {
            if ss_type != SsType::Satellite {
                return Err("head word is only allowed for satellite adjectives".to_string());
            }
            Some(SatelliteHead {
                word: head_word.to_string(),
                id: two_digits(head_id, "head_id")?,
            })
        }
        _ => return Err("head word and head id must both be present or both empty".to_string()),
    };

    Ok(WordNetSymbol::SenseKey {
        lemma: lemma.to_string(),
        ss_type,
        lex_filenum,
        lex_id,
        head,
    })
}

fn parse_synset(raw: &str) -> Result<WordNetSymbol, String> {
    let (offset, pos) = raw
        .split_once('-')
        .ok_or_else(|| "expected a sense key or a synset id like '02232813-v'".to_string())?;

    if offset.len() != 8 || !offset.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("synset offset {offset:?} must be 8 digits"));
    }
    let mut pos_chars = pos.chars();
    let ss_type = match (pos_chars.next(), pos_chars.next()) {
        (Some(c), None) => SsType::from_letter(c),
        _ => None,
    }
    .ok_or_else(|| format!("invalid synset part of speech {pos:?}"))?;

    let offset = offset
        .parse()
        .map_err(|_| format!("synset offset {offset:?} is out of range"))?;
    Ok(WordNetSymbol::Synset { offset, ss_type })
}

fn two_digits(field: &str, what: &str) -> Result<u8, String> {
    if field.len() != 2 || !field.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{what} {field:?} must be two digits"));
    }
    field
        .parse()
        .map_err(|_| format!("{what} {field:?} is out of range"))
}
