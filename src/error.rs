//! Error enum
use std::fmt;

use crate::sources::FetchError;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Fetch(FetchError),
    /// A line of the locator file is not an absolute URL.
    InvalidLocator {
        line: usize,
        value: String,
        reason: url::ParseError,
    },
    /// A required structural marker is missing from a fetched document.
    MetadataNotFound(&'static str),
    /// Failure while processing a single source document.
    Document { locator: String, source: Box<Error> },
    /// The corpus handed to the annotator is not a well-formed tree.
    MalformedCorpus { position: u64, reason: String },
    /// The tagger failed on a text payload.
    Annotation {
        payload: u64,
        position: u64,
        source: Box<Error>,
    },
    Csv(csv::Error),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Fetch(e) => write!(f, "fetch error: {e}"),
            Error::InvalidLocator {
                line,
                value,
                reason,
            } => write!(f, "invalid locator {value:?} on line {line}: {reason}"),
            Error::MetadataNotFound(marker) => write!(f, "metadata not found: {marker}"),
            Error::Document { locator, source } => write!(f, "{locator}: {source}"),
            Error::MalformedCorpus { position, reason } => {
                write!(f, "malformed corpus at byte {position}: {reason}")
            }
            Error::Annotation {
                payload,
                position,
                source,
            } => write!(
                f,
                "annotation failed on text payload #{payload} (byte {position}): {source}"
            ),
            Error::Csv(e) => write!(f, "lexicon error: {e}"),
            Error::Custom(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Fetch(e) => Some(e),
            Error::InvalidLocator { reason, .. } => Some(reason),
            Error::Document { source, .. } | Error::Annotation { source, .. } => {
                Some(source.as_ref())
            }
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Attach the locator of the document being processed.
    pub fn in_document(self, locator: &str) -> Self {
        Error::Document {
            locator: locator.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Error {
        Error::Fetch(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Error {
        Error::Io(e.error)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
