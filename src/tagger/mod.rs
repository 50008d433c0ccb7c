/*! Linguistic annotation.

A [Tagger] splits a text into units and gives each one a coarse part-of-speech
tag and a lemma. Only segmentation and coarse tagging are part of the contract;
no parsing or entity recognition happens here.

The shipped implementation is [LexiconTagger].
!*/
mod lexicon;
mod segment;
mod upos;

use std::borrow::Cow;

pub use lexicon::LexiconTagger;
pub use segment::segments;
pub use upos::Upos;

use crate::error::Error;

/// One annotation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub surface: Cow<'a, str>,
    pub tag: Upos,
    pub lemma: Cow<'a, str>,
}

impl<'a> Token<'a> {
    pub fn new(surface: impl Into<Cow<'a, str>>, tag: Upos, lemma: impl Into<Cow<'a, str>>) -> Self {
        Self {
            surface: surface.into(),
            tag,
            lemma: lemma.into(),
        }
    }

    /// Segmentation artifacts that must not appear in the output.
    pub fn is_whitespace(&self) -> bool {
        self.surface.chars().all(char::is_whitespace)
    }

    /// Appends `surface\ttag\tlemma` to `out`.
    pub fn write_vertical(&self, out: &mut String) {
        out.push_str(&self.surface);
        out.push('\t');
        out.push_str(self.tag.as_str());
        out.push('\t');
        out.push_str(&self.lemma);
    }
}

pub trait Tagger {
    /// Units of `text` in left-to-right order.
    fn tag<'a>(&'a self, text: &'a str) -> Result<Vec<Token<'a>>, Error>;
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag<'a>(&'a self, text: &'a str) -> Result<Vec<Token<'a>>, Error> {
        (**self).tag(text)
    }
}
