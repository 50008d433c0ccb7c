/*! Document sources.

A harvester run pulls every document from one [Source], which fixes the document type,
the database name written into each record and the extraction rules to apply.
!*/
mod fetch;
mod locators;

use std::str::FromStr;

pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use locators::read_locators;

use crate::document::DocType;

/// Federal statutes portal.
pub const STATUTE_DATABASE: &str = "gesetze-im-internet.de";
/// Federal case-law portal.
pub const DECISION_DATABASE: &str = "rechtsprechung-im-internet.de";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Statutes,
    CourtDecisions,
}

impl Source {
    pub fn doc_type(&self) -> DocType {
        match self {
            Source::Statutes => DocType::Statute,
            Source::CourtDecisions => DocType::CourtDecision,
        }
    }

    pub fn database(&self) -> &'static str {
        match self {
            Source::Statutes => STATUTE_DATABASE,
            Source::CourtDecisions => DECISION_DATABASE,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Statutes
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statutes" | "gesetze" => Ok(Source::Statutes),
            "decisions" | "rechtsprechung" => Ok(Source::CourtDecisions),
            other => Err(format!(
                "unknown source {other:?} (expected statutes or decisions)"
            )),
        }
    }
}
