/*! Lexicon based tagger.

Units are looked up in a full-form lexicon (`surface<TAB>UPOS<TAB>lemma`, one entry
per line, `#` comments allowed). Units missing from it go through a small built-in
table of German function words, then through shape rules (punctuation, numbers,
capitalization). Unknown lowercase words are tagged `X` with their surface as lemma.
!*/
use std::{collections::HashMap, fs::File, io::Read, path::Path};

use lazy_static::lazy_static;
use log::info;
use serde::Deserialize;

use crate::error::Error;

use super::segment::{is_abbreviation, segments};
use super::{Tagger, Token, Upos};

lazy_static! {
    /// German closed-class words, keyed in lowercase.
    static ref FUNCTION_WORDS: HashMap<&'static str, (Upos, &'static str)> = {
        use Upos::*;
        let mut m = HashMap::new();
        for w in ["der", "die", "das", "den", "dem", "des"] {
            m.insert(w, (Det, "der"));
        }
        for w in ["ein", "eine", "einen", "einem", "einer", "eines"] {
            m.insert(w, (Det, "ein"));
        }
        for w in ["kein", "keine", "keinen", "keinem", "keiner", "keines"] {
            m.insert(w, (Det, "kein"));
        }
        for (w, l) in [
            ("ich", "ich"), ("du", "du"), ("er", "er"), ("sie", "sie"), ("es", "es"),
            ("wir", "wir"), ("ihr", "ihr"), ("sich", "sich"), ("ihm", "er"), ("ihn", "er"),
            ("ihnen", "sie"), ("diese", "dieser"), ("dieser", "dieser"), ("dieses", "dieser"),
            ("diesen", "dieser"), ("diesem", "dieser"), ("welche", "welcher"),
        ] {
            m.insert(w, (Pron, l));
        }
        for (w, l) in [
            ("in", "in"), ("im", "in"), ("ins", "in"), ("an", "an"), ("am", "an"),
            ("auf", "auf"), ("aus", "aus"), ("bei", "bei"), ("beim", "bei"), ("mit", "mit"),
            ("nach", "nach"), ("von", "von"), ("vom", "von"), ("zu", "zu"), ("zum", "zu"),
            ("zur", "zu"), ("über", "über"), ("unter", "unter"), ("für", "für"),
            ("gegen", "gegen"), ("ohne", "ohne"), ("um", "um"), ("durch", "durch"),
            ("vor", "vor"), ("zwischen", "zwischen"), ("gemäß", "gemäß"), ("seit", "seit"),
            ("wegen", "wegen"), ("trotz", "trotz"), ("bis", "bis"),
        ] {
            m.insert(w, (Adp, l));
        }
        for w in ["und", "oder", "aber", "sondern", "sowie", "bzw."] {
            m.insert(w, (Cconj, w));
        }
        for w in ["dass", "wenn", "weil", "ob", "sofern", "soweit", "falls", "als", "wie"] {
            m.insert(w, (Sconj, w));
        }
        m.insert("nicht", (Part, "nicht"));
        for (w, l) in [
            ("ist", "sein"), ("sind", "sein"), ("war", "sein"), ("waren", "sein"),
            ("sein", "sein"), ("wird", "werden"), ("werden", "werden"), ("wurde", "werden"),
            ("wurden", "werden"), ("worden", "werden"), ("hat", "haben"), ("haben", "haben"),
            ("hatte", "haben"), ("kann", "können"), ("können", "können"), ("muss", "müssen"),
            ("müssen", "müssen"), ("darf", "dürfen"), ("dürfen", "dürfen"), ("soll", "sollen"),
            ("sollen", "sollen"),
        ] {
            m.insert(w, (Aux, l));
        }
        m
    };
}

const SYMBOLS: [&str; 9] = ["§", "§§", "€", "$", "%", "&", "+", "=", "°"];

#[derive(Debug, Deserialize)]
struct LexiconEntry {
    surface: String,
    tag: String,
    lemma: String,
}

#[derive(Debug, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, (Upos, String)>,
}

impl LexiconTagger {
    /// Tagger with only the built-in function words and shape rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let tagger = Self::from_reader(File::open(path)?)?;
        info!(
            "loaded {} lexicon entries from {:?}",
            tagger.entries.len(),
            path
        );
        Ok(tagger)
    }

    pub fn from_reader<R: Read>(src: R) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(src);

        let mut entries = HashMap::new();
        for entry in reader.deserialize::<LexiconEntry>() {
            let entry = entry?;
            let tag = entry.tag.parse::<Upos>()?;
            // first entry wins for ambiguous forms
            entries.entry(entry.surface).or_insert((tag, entry.lemma));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup<'a>(&'a self, surface: &'a str) -> Token<'a> {
        if let Some((tag, lemma)) = self.entries.get(surface) {
            return Token::new(surface, *tag, lemma.as_str());
        }
        let lower = surface.to_lowercase();
        if let Some((tag, lemma)) = self.entries.get(&lower) {
            return Token::new(surface, *tag, lemma.as_str());
        }
        if let Some((tag, lemma)) = FUNCTION_WORDS.get(lower.as_str()) {
            return Token::new(surface, *tag, *lemma);
        }
        Token::new(surface, Self::by_shape(surface), surface)
    }

    fn by_shape(surface: &str) -> Upos {
        let mut chars = surface.chars();
        let first = match chars.clone().next() {
            Some(c) => c,
            None => return Upos::X,
        };

        if surface.chars().all(char::is_whitespace) {
            Upos::Space
        } else if SYMBOLS.contains(&surface) {
            Upos::Sym
        } else if chars.all(|c| !c.is_alphanumeric()) {
            Upos::Punct
        } else if first.is_ascii_digit()
            && surface
                .chars()
                .all(|c| c.is_ascii_digit() || ".,/:-".contains(c))
        {
            Upos::Num
        } else if is_abbreviation(surface) || first.is_uppercase() {
            Upos::Noun
        } else {
            Upos::X
        }
    }
}

impl Tagger for LexiconTagger {
    fn tag<'a>(&'a self, text: &'a str) -> Result<Vec<Token<'a>>, Error> {
        Ok(segments(text)
            .into_iter()
            .map(|surface| self.lookup(surface))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "# surface\ttag\tlemma
Hund\tNOUN\tHund
läuft\tVERB\tlaufen
Gericht\tNOUN\tGericht
";

    fn lines(tagger: &LexiconTagger, text: &str) -> Vec<String> {
        tagger
            .tag(text)
            .unwrap()
            .iter()
            .map(|t| {
                let mut s = String::new();
                t.write_vertical(&mut s);
                s
            })
            .collect()
    }

    #[test]
    fn der_hund_laeuft() {
        let tagger = LexiconTagger::from_reader(LEXICON.as_bytes()).unwrap();
        assert_eq!(tagger.len(), 3);
        assert_eq!(
            lines(&tagger, "Der Hund läuft"),
            vec!["Der\tDET\tder", "Hund\tNOUN\tHund", "läuft\tVERB\tlaufen"]
        );
    }

    #[test]
    fn shapes() {
        let tagger = LexiconTagger::new();
        let tags: Vec<Upos> = tagger
            .tag("§ 3 Abs. 1: Verträge\nwerden")
            .unwrap()
            .iter()
            .map(|t| t.tag)
            .collect();
        assert_eq!(
            tags,
            vec![
                Upos::Sym,
                Upos::Num,
                Upos::Noun,
                Upos::Num,
                Upos::Punct,
                Upos::Noun,
                Upos::Space,
                Upos::Aux
            ]
        );
    }

    #[test]
    fn unknown_lowercase_word() {
        let tagger = LexiconTagger::new();
        let tokens = tagger.tag("grundsätzlich").unwrap();
        assert_eq!(tokens, vec![Token::new("grundsätzlich", Upos::X, "grundsätzlich")]);
    }

    #[test]
    fn bad_tag_in_lexicon() {
        assert!(LexiconTagger::from_reader("Hund\tNN\tHund\n".as_bytes()).is_err());
    }
}
