/*! Statute metadata extraction.

Layout of a federal statute page, as far as we rely on it:

```html
<div class="jnheader">
  <h1><span class="jnlangue">Title</span><br><span class="jnamtabk">ABBR</span></h1>
  <p>Ausfertigungsdatum: DD.MM.YYYY</p>
</div>
```
!*/
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use scraper::Selector;

use crate::document::{normalize, DocType, DocumentBuilder, DocumentRecord, DraftingDate};
use crate::error::Error;
use crate::sources::STATUTE_DATABASE;

use super::page::{NodePosition, Page};
use super::Extract;

pub const DATE_LABEL: &str = "Ausfertigungsdatum";

lazy_static! {
    static ref TITLE: Selector = Selector::parse(".jnlangue").unwrap();
    static ref ABBREVIATION: Selector = Selector::parse(".jnamtabk").unwrap();
    static ref LABEL: Regex = Regex::new(DATE_LABEL).unwrap();
    static ref DATE: Regex = Regex::new(r"Ausfertigungsdatum:\s(\d{2}\.\d{2}\.\d{4})").unwrap();
}

/// Longest text accepted from the structural fallback.
const MAX_ABBREVIATION_LEN: usize = 64;

/// Ways to find the title abbreviation, tried in order.
#[derive(Debug, Clone)]
pub enum AbbreviationLocator {
    /// Named element.
    Selector(Selector),
    /// Walk this many nodes backwards in document order from the date label.
    /// Only short, single-line results are accepted.
    Backward(usize),
}

impl AbbreviationLocator {
    fn locate(&self, page: &Page, label: NodePosition) -> Option<String> {
        let found = match self {
            AbbreviationLocator::Selector(sel) => page.select_text(sel),
            AbbreviationLocator::Backward(steps) => page
                .text_before(label, *steps)
                .filter(|t| looks_like_abbreviation(t)),
        };
        found.filter(|t| !t.trim().is_empty())
    }
}

fn looks_like_abbreviation(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.contains('\n') && text.chars().count() <= MAX_ABBREVIATION_LEN
}

pub struct StatuteExtractor {
    level: String,
    abbreviation: Vec<AbbreviationLocator>,
}

impl StatuteExtractor {
    pub fn new(level: &str) -> Self {
        Self {
            level: level.to_string(),
            abbreviation: Self::default_locators(),
        }
    }

    pub fn with_locators(level: &str, abbreviation: Vec<AbbreviationLocator>) -> Self {
        Self {
            level: level.to_string(),
            abbreviation,
        }
    }

    /// `.jnamtabk`, then two steps back from the date label.
    pub fn default_locators() -> Vec<AbbreviationLocator> {
        vec![
            AbbreviationLocator::Selector(ABBREVIATION.clone()),
            AbbreviationLocator::Backward(2),
        ]
    }

    /// Locate the date label node and read the date that follows it.
    fn drafting_date(page: &Page) -> Result<(NodePosition, DraftingDate), Error> {
        let (position, text) = page
            .find_text(&LABEL)
            .ok_or(Error::MetadataNotFound(DATE_LABEL))?;
        let date = DATE
            .captures(&text)
            .and_then(|caps| DraftingDate::parse(&caps[1]))
            .ok_or(Error::MetadataNotFound(DATE_LABEL))?;
        Ok((position, date))
    }

    fn title_abbreviation(&self, page: &Page, label: NodePosition) -> Option<String> {
        self.abbreviation
            .iter()
            .find_map(|locator| locator.locate(page, label))
            .map(|abbr| normalize::attribute(&abbr))
    }
}

impl Extract for StatuteExtractor {
    fn extract(&self, page: &Page) -> Result<DocumentRecord, Error> {
        let title = page.select_text(&TITLE).and_then(|t| normalize::title(&t));
        let (label, date) = Self::drafting_date(page)?;
        let abbreviation = self.title_abbreviation(page, label);
        debug!("statute {title:?} ({abbreviation:?}) from {date}");

        let mut doc = DocumentBuilder::new(DocType::Statute, &self.level, STATUTE_DATABASE);
        doc.set_title(title)
            .set_title_abbreviation(abbreviation)
            .set_drafting_date(Some(date))
            .set_body(&page.visible_text());
        Ok(doc.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NA;

    fn page(header: &str) -> Page {
        let html = format!(
            "<html><body><div class=\"jnheader\">{header}</div>\
             <div class=\"jnhtml\"><p>§ 1 Anwendungsbereich</p></div></body></html>"
        );
        Page::parse(html.as_bytes())
    }

    #[test]
    fn full_header() {
        let p = page(
            "<h1><span class=\"jnlangue\">Gesetz über \"Kosten\" &amp; Gebühren</span><br>\
             <span class=\"jnamtabk\">KostGebG</span></h1><p>Ausfertigungsdatum: 23.06.2016</p>",
        );
        let doc = StatuteExtractor::new("Bund").extract(&p).unwrap();
        assert_eq!(doc.title(), "Gesetz über 'Kosten' &amp; Gebühren");
        assert_eq!(doc.title_abbreviation(), "KostGebG");
        assert_eq!(doc.drafting_date(), "23.06.2016");
        assert_eq!(doc.year(), "2016");
        assert_eq!(doc.decade(), "2010");
        assert_eq!(doc.court(), NA);
        assert!(doc.body().ends_with("§ 1 Anwendungsbereich"));
    }

    #[test]
    fn multi_line_title_is_na() {
        let p = page(
            "<h1><span class=\"jnlangue\">Verordnung über\ndie Dinge</span></h1>\
             <p>Ausfertigungsdatum: 01.01.2001</p>",
        );
        let doc = StatuteExtractor::new("Bund").extract(&p).unwrap();
        assert_eq!(doc.title(), NA);
    }

    #[test]
    fn missing_label_is_an_error() {
        let p = page("<h1><span class=\"jnlangue\">Ohne Datum</span></h1>");
        match StatuteExtractor::new("Bund").extract(&p) {
            Err(Error::MetadataNotFound(marker)) => assert_eq!(marker, DATE_LABEL),
            other => panic!("expected MetadataNotFound, got {other:?}"),
        }
    }

    #[test]
    fn label_without_date_is_an_error() {
        let p = page("<p>Ausfertigungsdatum: unbekannt</p>");
        assert!(matches!(
            StatuteExtractor::new("Bund").extract(&p),
            Err(Error::MetadataNotFound(_))
        ));
    }

    #[test]
    fn structural_fallback() {
        // no .jnamtabk: two nodes back from the label text is the abbreviation text
        let p = page("<h1><span>AbbrG</span><p>Ausfertigungsdatum: 02.03.1950</p></h1>");
        let doc = StatuteExtractor::new("Bund").extract(&p).unwrap();
        assert_eq!(doc.title_abbreviation(), "AbbrG");
    }

    #[test]
    fn fallback_rejects_long_text() {
        let long = "Dies ist ganz sicher keine Abkürzung, sondern ein längerer Absatz mit Text.";
        let p = page(&format!(
            "<h1><span>{long}</span><p>Ausfertigungsdatum: 02.03.1950</p></h1>"
        ));
        let doc = StatuteExtractor::new("Bund").extract(&p).unwrap();
        assert_eq!(doc.title_abbreviation(), NA);
    }

    #[test]
    fn legacy_offset_only() {
        let p = page(
            "<h1><span class=\"jnlangue\">T</span><span class=\"jnamtabk\">X</span></h1><p>Ausfertigungsdatum: 02.03.1950</p>",
        );
        let extractor =
            StatuteExtractor::with_locators("Land", vec![AbbreviationLocator::Backward(2)]);
        let doc = extractor.extract(&p).unwrap();
        assert_eq!(doc.title_abbreviation(), "X");
    }
}
