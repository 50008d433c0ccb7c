/*! Metadata extraction.

Turns a fetched [Page] into a [DocumentRecord], following the layout rules of
the document's [Source].
!*/
mod decision;
pub mod page;
mod statute;

pub use decision::DecisionExtractor;
pub use page::Page;
pub use statute::{AbbreviationLocator, StatuteExtractor, DATE_LABEL};

use crate::document::DocumentRecord;
use crate::error::Error;
use crate::sources::Source;

pub trait Extract {
    fn extract(&self, page: &Page) -> Result<DocumentRecord, Error>;
}

/// Extractor for the documents of `source`, tagging records with jurisdiction `level`.
pub fn for_source(source: Source, level: &str) -> Box<dyn Extract> {
    match source {
        Source::Statutes => Box::new(StatuteExtractor::new(level)),
        Source::CourtDecisions => Box::new(DecisionExtractor::new(level)),
    }
}
