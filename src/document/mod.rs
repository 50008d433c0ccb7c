/*! Corpus documents.

A [DocumentRecord] is the extracted form of one source document: a fixed set of
bibliographic attributes and a plain-text body. It serializes as a single
`<text …>` block of the tagged corpus.

Every attribute always carries either a value or the [NA] sentinel, so that
downstream tools can parse records uniformly.
!*/
mod date;
pub mod normalize;

use std::fmt;

pub use date::DraftingDate;

/// Placeholder for a field that is not applicable or not recoverable.
pub const NA: &str = "NA";

/// Attribute names, in serialization order.
pub const ATTRIBUTES: [&str; 13] = [
    "type",
    "level",
    "title",
    "title_abbreviation",
    "drafting_date",
    "decade",
    "database_URL",
    "court",
    "court_detail",
    "reference",
    "year",
    "decision_type",
    "ECLI",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Statute,
    CourtDecision,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Statute => "Gesetz",
            DocType::CourtDecision => "Gerichtsentscheidung",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One harvested document.
///
/// Attribute values are stored in their serialized (escaped) form.
/// Built through [DocumentBuilder] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    doc_type: DocType,
    level: String,
    title: String,
    title_abbreviation: String,
    drafting_date: String,
    decade: String,
    source_database: String,
    court: String,
    court_detail: String,
    case_reference: String,
    year: String,
    decision_type: String,
    ecli: String,
    body: String,
}

impl DocumentRecord {
    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_abbreviation(&self) -> &str {
        &self.title_abbreviation
    }

    pub fn drafting_date(&self) -> &str {
        &self.drafting_date
    }

    pub fn decade(&self) -> &str {
        &self.decade
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn court(&self) -> &str {
        &self.court
    }

    pub fn court_detail(&self) -> &str {
        &self.court_detail
    }

    pub fn case_reference(&self) -> &str {
        &self.case_reference
    }

    pub fn decision_type(&self) -> &str {
        &self.decision_type
    }

    pub fn ecli(&self) -> &str {
        &self.ecli
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// `(name, value)` pairs in serialization order.
    pub fn attributes(&self) -> [(&'static str, &str); 13] {
        [
            (ATTRIBUTES[0], self.doc_type.as_str()),
            (ATTRIBUTES[1], &self.level),
            (ATTRIBUTES[2], &self.title),
            (ATTRIBUTES[3], &self.title_abbreviation),
            (ATTRIBUTES[4], &self.drafting_date),
            (ATTRIBUTES[5], &self.decade),
            (ATTRIBUTES[6], &self.source_database),
            (ATTRIBUTES[7], &self.court),
            (ATTRIBUTES[8], &self.court_detail),
            (ATTRIBUTES[9], &self.case_reference),
            (ATTRIBUTES[10], &self.year),
            (ATTRIBUTES[11], &self.decision_type),
            (ATTRIBUTES[12], &self.ecli),
        ]
    }
}

impl fmt::Display for DocumentRecord {
    /// Writes the `<text …>` block, without trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<text")?;
        for (name, value) in self.attributes() {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">\n{}\n</text>", self.body)
    }
}

/// Collects extracted values, filling the gaps with [NA].
///
/// Values passed to the setters must already be normalized
/// (see [normalize::attribute]); empty values are turned into [NA].
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    doc_type: DocType,
    level: String,
    source_database: String,
    title: Option<String>,
    title_abbreviation: Option<String>,
    drafting_date: Option<DraftingDate>,
    court: Option<String>,
    court_detail: Option<String>,
    case_reference: Option<String>,
    decision_type: Option<String>,
    ecli: Option<String>,
    body: String,
}

impl DocumentBuilder {
    pub fn new(doc_type: DocType, level: &str, source_database: &str) -> Self {
        Self {
            doc_type,
            level: normalize::attribute(level),
            source_database: normalize::attribute(source_database),
            title: None,
            title_abbreviation: None,
            drafting_date: None,
            court: None,
            court_detail: None,
            case_reference: None,
            decision_type: None,
            ecli: None,
            body: String::new(),
        }
    }

    pub fn set_title(&mut self, title: Option<String>) -> &mut Self {
        self.title = title;
        self
    }

    pub fn set_title_abbreviation(&mut self, abbreviation: Option<String>) -> &mut Self {
        self.title_abbreviation = abbreviation;
        self
    }

    pub fn set_drafting_date(&mut self, date: Option<DraftingDate>) -> &mut Self {
        self.drafting_date = date;
        self
    }

    pub fn set_court(&mut self, court: Option<String>) -> &mut Self {
        self.court = court;
        self
    }

    pub fn set_court_detail(&mut self, detail: Option<String>) -> &mut Self {
        self.court_detail = detail;
        self
    }

    pub fn set_case_reference(&mut self, reference: Option<String>) -> &mut Self {
        self.case_reference = reference;
        self
    }

    pub fn set_decision_type(&mut self, decision_type: Option<String>) -> &mut Self {
        self.decision_type = decision_type;
        self
    }

    pub fn set_ecli(&mut self, ecli: Option<String>) -> &mut Self {
        self.ecli = ecli;
        self
    }

    /// Sets the body from plain text. Escaping happens here.
    pub fn set_body(&mut self, body: &str) -> &mut Self {
        self.body = normalize::body(body);
        self
    }

    pub fn build(&self) -> DocumentRecord {
        fn or_na(value: Option<&str>) -> String {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => NA.to_string(),
            }
        }

        let (drafting_date, year, decade) = match &self.drafting_date {
            Some(date) => (
                date.as_str().to_string(),
                date.year().to_string(),
                date.decade(),
            ),
            None => (NA.to_string(), NA.to_string(), NA.to_string()),
        };

        DocumentRecord {
            doc_type: self.doc_type,
            level: or_na(Some(&self.level)),
            title: or_na(self.title.as_deref()),
            title_abbreviation: or_na(self.title_abbreviation.as_deref()),
            drafting_date,
            decade,
            source_database: or_na(Some(&self.source_database)),
            court: or_na(self.court.as_deref()),
            court_detail: or_na(self.court_detail.as_deref()),
            case_reference: or_na(self.case_reference.as_deref()),
            year,
            decision_type: or_na(self.decision_type.as_deref()),
            ecli: or_na(self.ecli.as_deref()),
            body: self.body.clone(),
        }
    }
}
