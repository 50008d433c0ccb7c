/*! Court decision metadata extraction.

Decisions are published as XML documents with one element per metadata field
(`gertyp`, `spruchkoerper`, `entsch-datum`, `aktenzeichen`, `doktyp`, `ecli`,
`titelzeile`) followed by the text sections of the decision.
!*/
use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;
use scraper::Selector;

use crate::document::{normalize, DocType, DocumentBuilder, DocumentRecord, DraftingDate};
use crate::error::Error;
use crate::sources::DECISION_DATABASE;

use super::page::Page;
use super::Extract;

pub const DATE_ELEMENT: &str = "entsch-datum";

lazy_static! {
    static ref COURT: Selector = Selector::parse("gertyp").unwrap();
    static ref CHAMBER: Selector = Selector::parse("spruchkoerper").unwrap();
    static ref DATE: Selector = Selector::parse(DATE_ELEMENT).unwrap();
    static ref REFERENCE: Selector = Selector::parse("aktenzeichen").unwrap();
    static ref DECISION_TYPE: Selector = Selector::parse("doktyp").unwrap();
    static ref ECLI: Selector = Selector::parse("ecli").unwrap();
    static ref TITLE: Selector = Selector::parse("titelzeile").unwrap();
    static ref SECTIONS: Selector = Selector::parse(
        "leitsatz, sonstosatz, tenor, tatbestand, entscheidungsgruende, gruende, abwmeinung, sonstlt"
    )
    .unwrap();
}

fn collapse(text: &str) -> String {
    text.split_whitespace().join(" ")
}

pub struct DecisionExtractor {
    level: String,
}

impl DecisionExtractor {
    pub fn new(level: &str) -> Self {
        Self {
            level: level.to_string(),
        }
    }

    fn field(page: &Page, selector: &Selector) -> Option<String> {
        page.select_text(selector)
            .map(|t| collapse(&t))
            .filter(|t| !t.is_empty())
    }

    /// `YYYYMMDD` in the source data, `DD.MM.YYYY` on some mirrors.
    fn drafting_date(page: &Page) -> Result<DraftingDate, Error> {
        let raw = Self::field(page, &DATE).ok_or(Error::MetadataNotFound(DATE_ELEMENT))?;
        DraftingDate::from_compact(&raw)
            .or_else(|| DraftingDate::parse(&raw))
            .ok_or(Error::MetadataNotFound(DATE_ELEMENT))
    }

    /// Text of the decision sections, falling back to the whole document.
    fn body(page: &Page) -> String {
        let sections = page.select_all_text(&SECTIONS);
        if sections.is_empty() {
            page.visible_text()
        } else {
            sections.join("\n")
        }
    }
}

impl Extract for DecisionExtractor {
    fn extract(&self, page: &Page) -> Result<DocumentRecord, Error> {
        let date = Self::drafting_date(page)?;
        let court = Self::field(page, &COURT);
        let chamber = Self::field(page, &CHAMBER);
        let court_detail = match (&court, &chamber) {
            (Some(court), Some(chamber)) => Some(format!("{court} {chamber}")),
            (Some(court), None) => Some(court.clone()),
            _ => None,
        };
        let reference = Self::field(page, &REFERENCE);
        debug!("decision {reference:?} of {court_detail:?} from {date}");

        let attr = |v: Option<String>| v.map(|v| normalize::attribute(&v));
        let mut doc =
            DocumentBuilder::new(DocType::CourtDecision, &self.level, DECISION_DATABASE);
        doc.set_title(attr(Self::field(page, &TITLE)))
            .set_drafting_date(Some(date))
            .set_court(attr(court))
            .set_court_detail(attr(court_detail))
            .set_case_reference(attr(reference))
            .set_decision_type(attr(Self::field(page, &DECISION_TYPE)))
            .set_ecli(attr(Self::field(page, &ECLI)))
            .set_body(&Self::body(page));
        Ok(doc.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NA;

    const DECISION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<dokument>
<doknr>KORE312812016</doknr>
<ecli>ECLI:DE:BGH:2016:230616B4STR75.16.0</ecli>
<gertyp>BGH</gertyp>
<gerort></gerort>
<spruchkoerper>4. Strafsenat</spruchkoerper>
<entsch-datum>20160623</entsch-datum>
<aktenzeichen>4 StR 75/16</aktenzeichen>
<doktyp>Beschluss</doktyp>
<titelzeile><p>Konkurrenzverhältnis bei Betrug: Einreichung mehrerer
Kreditanträge am selben Tag bei demselben Bankinstitut ohne Rückzahlungswillen</p></titelzeile>
<leitsatz><p>Leitsatz &amp; mehr</p></leitsatz>
<tenor><p>Die Revision wird verworfen.</p></tenor>
</dokument>"#;

    #[test]
    fn decision_fields() {
        let page = Page::parse(DECISION.as_bytes());
        let doc = DecisionExtractor::new("Bund").extract(&page).unwrap();
        assert_eq!(doc.doc_type(), DocType::CourtDecision);
        assert_eq!(doc.court(), "BGH");
        assert_eq!(doc.court_detail(), "BGH 4. Strafsenat");
        assert_eq!(doc.case_reference(), "4 StR 75/16");
        assert_eq!(doc.decision_type(), "Beschluss");
        assert_eq!(doc.ecli(), "ECLI:DE:BGH:2016:230616B4STR75.16.0");
        assert_eq!(doc.drafting_date(), "23.06.2016");
        assert_eq!(doc.year(), "2016");
        assert_eq!(doc.decade(), "2010");
        assert_eq!(doc.title_abbreviation(), NA);
        assert_eq!(
            doc.title(),
            "Konkurrenzverhältnis bei Betrug: Einreichung mehrerer Kreditanträge am selben Tag \
             bei demselben Bankinstitut ohne Rückzahlungswillen"
        );
        assert_eq!(
            doc.body(),
            "Leitsatz &amp; mehr\nDie Revision wird verworfen."
        );
    }

    #[test]
    fn missing_date() {
        let page = Page::parse(b"<dokument><gertyp>BVerfG</gertyp></dokument>");
        assert!(matches!(
            DecisionExtractor::new("Bund").extract(&page),
            Err(Error::MetadataNotFound(DATE_ELEMENT))
        ));
    }

    #[test]
    fn court_without_chamber() {
        let page = Page::parse(
            b"<dokument><gertyp>BVerfG</gertyp><entsch-datum>19.05.2020</entsch-datum></dokument>",
        );
        let doc = DecisionExtractor::new("Bund").extract(&page).unwrap();
        assert_eq!(doc.court_detail(), "BVerfG");
        assert_eq!(doc.case_reference(), NA);
        assert_eq!(doc.drafting_date(), "19.05.2020");
    }
}
