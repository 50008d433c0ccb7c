//! Word segmentation.
//!
//! Splits on Unicode word boundaries (UAX #29), then glues known abbreviations
//! back to their trailing period so that `Abs.` or `z.B.` stay one unit.
use std::collections::HashSet;

use lazy_static::lazy_static;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        [
            "Abs", "Alt", "Anm", "Art", "Aufl", "Bd", "Buchst", "Dr", "Halbs", "Nr", "Nrn",
            "Prof", "Rn", "Rdnr", "S", "Var", "Ziff", "bzw", "ca", "d.h", "etc", "evtl", "f",
            "ff", "gem", "ggf", "i.S.d", "i.S.v", "i.V.m", "m.w.N", "sog", "u.a", "usw", "v",
            "vgl", "z.B",
        ]
        .into_iter()
        .collect()
    };
}

/// Segments of `text`, in order, covering all of it except single spaces.
///
/// Line breaks and runs of whitespace come out as their own segments.
pub fn segments(text: &str) -> Vec<&str> {
    let bounds: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
    let mut out = Vec::with_capacity(bounds.len());
    let mut i = 0;
    while i < bounds.len() {
        let (start, seg) = bounds[i];
        if seg == " " {
            i += 1;
            continue;
        }
        if ABBREVIATIONS.contains(seg) && bounds.get(i + 1).map(|(_, s)| *s) == Some(".") {
            out.push(&text[start..start + seg.len() + 1]);
            i += 2;
            continue;
        }
        out.push(seg);
        i += 1;
    }
    out
}

pub fn is_abbreviation(segment: &str) -> bool {
    segment
        .strip_suffix('.')
        .map_or(false, |s| ABBREVIATIONS.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_sentence() {
        assert_eq!(segments("Der Hund läuft."), vec!["Der", "Hund", "läuft", "."]);
    }

    #[test]
    fn newlines_are_kept() {
        assert_eq!(
            segments("Satz eins\nSatz\r\nzwei"),
            vec!["Satz", "eins", "\n", "Satz", "\r\n", "zwei"]
        );
    }

    #[test]
    fn legal_citation() {
        assert_eq!(
            segments("§ 3 Abs. 1 Nr. 2 i.V.m. Art. 5 vom 23.06.2016"),
            vec![
                "§",
                "3",
                "Abs.",
                "1",
                "Nr.",
                "2",
                "i.V.m.",
                "Art.",
                "5",
                "vom",
                "23.06.2016"
            ]
        );
    }

    #[test]
    fn sentence_final_period_stays_apart() {
        assert_eq!(segments("Das Gericht."), vec!["Das", "Gericht", "."]);
        assert!(is_abbreviation("vgl."));
        assert!(!is_abbreviation("Gericht."));
    }
}
