//! # Korpus
//!
//! Builds an annotated corpus of German legal texts.
//!
//! Corpus construction happens in two independent stages:
//!
//! 1. **Harvest**: a list of document locators is fetched from one of the federal
//!    legal databases, each page's metadata and text is extracted, and the
//!    documents are written as a single XML corpus (one `<text>` element per document).
//! 1. **Annotate**: a corpus file is streamed, every text payload being replaced by
//!    its vertical annotation (`surface\ttag\tlemma`, one unit per line).
//!
//! Both stages are usable as a library through [pipelines], or from the `korpus` binary.
pub mod document;
pub mod error;
pub mod extract;
pub mod io;
pub mod pipelines;
pub mod sources;
pub mod tagger;
