//! Streaming annotation pipeline
//!
//! Replaces every text payload of a corpus tree with its vertical annotation
//! block (`surface\ttag\tlemma`, one unit per line), leaving elements and
//! attributes as they are.
//!
//! The corpus is processed as a stream of parse events: only the payload being
//! tagged and its annotation block are held in memory, and both buffers are
//! reused from one payload to the next. Peak memory thus follows the largest
//! single payload, not the corpus size.
//!
//! Whitespace-only payloads are dropped. Whitespace units returned by the tagger
//! (line breaks in the source text) are never written.
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    str::FromStr,
};

use log::{debug, info, warn};
use quick_xml::{
    escape::partial_escape,
    events::{BytesText, Event},
    Reader, Writer,
};

use crate::error::Error;
use crate::io::{tagged_path, PendingOutput};
use crate::tagger::{LexiconTagger, Tagger};

use super::Pipeline;

/// Approximate number of units in the full legal corpus, for progress reporting.
pub const EXPECTED_TOKENS: u64 = 200_358_000;
const PROGRESS_EVERY: u64 = 100_000;

/// What to do when the tagger fails on a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run.
    #[default]
    Abort,
    /// Keep the payload un-annotated and go on.
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            other => Err(format!("unknown policy {other:?} (expected abort or skip)")),
        }
    }
}

/// Annotator run parameters.
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    pub corpus: PathBuf,
    pub overwrite: bool,
    pub lexicon: Option<PathBuf>,
    pub on_error: FailurePolicy,
    pub expected_tokens: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationStats {
    /// Text payloads annotated.
    pub payloads: u64,
    /// Units written.
    pub units: u64,
    /// Payloads left un-annotated after a tagger failure.
    pub skipped: u64,
}

fn malformed(position: u64, reason: impl Display) -> Error {
    Error::MalformedCorpus {
        position,
        reason: reason.to_string(),
    }
}

fn write_error(e: impl Display) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

pub struct Annotator<T: Tagger> {
    tagger: T,
    policy: FailurePolicy,
    expected_tokens: u64,
}

impl<T: Tagger> Annotator<T> {
    pub fn new(tagger: T) -> Self {
        Self {
            tagger,
            policy: FailurePolicy::default(),
            expected_tokens: EXPECTED_TOKENS,
        }
    }

    pub fn on_error(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn expected_tokens(mut self, expected: u64) -> Self {
        self.expected_tokens = expected.max(1);
        self
    }

    /// Annotate the corpus read from `src`, writing the result to `dst`.
    pub fn annotate<R: BufRead, W: Write>(
        &self,
        src: R,
        dst: W,
    ) -> Result<AnnotationStats, Error> {
        let mut reader = Reader::from_reader(src);
        let mut writer = Writer::new(dst);
        let mut stats = AnnotationStats::default();

        let mut buf = Vec::new();
        let mut payload = String::new();
        let mut payload_start = 0u64;
        let mut block = String::new();
        let mut depth = 0usize;
        let mut roots = 0usize;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| malformed(reader.buffer_position() as u64, e))?;

            match event {
                Event::Text(e) => {
                    if payload.is_empty() {
                        payload_start = position;
                    }
                    let text = e.unescape().map_err(|err| malformed(position, err))?;
                    payload.push_str(&text);
                }
                Event::CData(e) => {
                    if payload.is_empty() {
                        payload_start = position;
                    }
                    let text = std::str::from_utf8(&e).map_err(|err| malformed(position, err))?;
                    payload.push_str(text);
                }
                other => {
                    self.flush_payload(
                        &mut payload,
                        payload_start,
                        depth,
                        &mut block,
                        &mut writer,
                        &mut stats,
                    )?;

                    match &other {
                        Event::Start(_) | Event::Empty(_) if depth == 0 => {
                            roots += 1;
                            if roots > 1 {
                                return Err(malformed(
                                    position,
                                    "more than one root element (is the corpus wrapped?)",
                                ));
                            }
                        }
                        _ => (),
                    }
                    match &other {
                        Event::Start(_) => depth += 1,
                        Event::End(_) => depth = depth.saturating_sub(1),
                        Event::Eof => break,
                        _ => (),
                    }
                    writer.write_event(other).map_err(write_error)?;
                }
            }
            buf.clear();
        }

        let end = reader.buffer_position() as u64;
        if depth != 0 {
            return Err(malformed(end, format!("{depth} unclosed element(s)")));
        }
        if roots == 0 {
            return Err(malformed(end, "no root element"));
        }

        writer.into_inner().flush()?;
        info!(
            "{} units tagged in {} payloads",
            stats.units, stats.payloads
        );
        Ok(stats)
    }

    /// Tag the pending payload (if any) and write its block.
    fn flush_payload<W: Write>(
        &self,
        payload: &mut String,
        position: u64,
        depth: usize,
        block: &mut String,
        writer: &mut Writer<W>,
        stats: &mut AnnotationStats,
    ) -> Result<(), Error> {
        if payload.trim().is_empty() {
            payload.clear();
            return Ok(());
        }
        if depth == 0 {
            return Err(malformed(position, "text outside of the root element"));
        }

        stats.payloads += 1;
        block.clear();
        match self.tagger.tag(payload) {
            Ok(tokens) => {
                for token in tokens.iter().filter(|t| !t.is_whitespace()) {
                    if !block.is_empty() {
                        block.push('\n');
                    }
                    token.write_vertical(block);
                    stats.units += 1;
                    if stats.units % PROGRESS_EVERY == 0 {
                        info!(
                            "{} out of approx {} tokens tagged ({:.2}%)",
                            stats.units,
                            self.expected_tokens,
                            stats.units as f64 / self.expected_tokens as f64 * 100.0
                        );
                    }
                }
            }
            Err(e) => match self.policy {
                FailurePolicy::Abort => {
                    return Err(Error::Annotation {
                        payload: stats.payloads,
                        position,
                        source: Box::new(e),
                    })
                }
                FailurePolicy::Skip => {
                    warn!(
                        "leaving payload #{} (byte {position}) un-annotated: {e}",
                        stats.payloads
                    );
                    stats.skipped += 1;
                    block.push_str(payload);
                }
            },
        }
        debug!("payload #{}: {} bytes", stats.payloads, block.len());

        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(
                block.as_str(),
            ))))
            .map_err(write_error)?;
        payload.clear();
        Ok(())
    }
}

/// Stage B entry point.
pub struct AnnotatePipeline {
    config: AnnotateConfig,
}

impl AnnotatePipeline {
    pub fn new(config: AnnotateConfig) -> Self {
        Self { config }
    }
}

impl Pipeline<AnnotationStats> for AnnotatePipeline {
    fn run(&self) -> Result<AnnotationStats, Error> {
        let tagger = match &self.config.lexicon {
            Some(path) => LexiconTagger::from_path(path)?,
            None => {
                warn!("No lexicon specified! Only function words and shape rules will be used.");
                LexiconTagger::new()
            }
        };

        let dst = tagged_path(&self.config.corpus, self.config.overwrite);
        let src = BufReader::new(File::open(&self.config.corpus)?);
        let mut out = PendingOutput::new(&dst)?;
        info!("tagging {:?} into {:?}", self.config.corpus, dst);

        let stats = Annotator::new(tagger)
            .on_error(self.config.on_error)
            .expected_tokens(self.config.expected_tokens)
            .annotate(src, &mut out)?;
        out.persist()?;

        info!("Tokens written: {}", stats.units);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::tagger::{Token, Upos};

    /// Splits on spaces, keeping line breaks as units.
    struct Spaces;

    impl Tagger for Spaces {
        fn tag<'a>(&'a self, text: &'a str) -> Result<Vec<Token<'a>>, Error> {
            let mut out = Vec::new();
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    out.push(Token::new("\n", Upos::Space, "\n"));
                }
                for word in line.split(' ').filter(|w| !w.is_empty()) {
                    out.push(Token::new(word, Upos::X, Cow::Owned(word.to_lowercase())));
                }
            }
            Ok(out)
        }
    }

    struct Failing;

    impl Tagger for Failing {
        fn tag<'a>(&'a self, _text: &'a str) -> Result<Vec<Token<'a>>, Error> {
            Err(Error::Custom("model crashed".to_string()))
        }
    }

    fn run<T: Tagger>(annotator: &Annotator<T>, src: &str) -> Result<(String, AnnotationStats), Error> {
        let mut out = Vec::new();
        let stats = annotator.annotate(src.as_bytes(), &mut out)?;
        Ok((String::from_utf8(out).unwrap(), stats))
    }

    #[test]
    fn replaces_text_and_keeps_structure() {
        let src = "<corpus>\n<text type=\"Gesetz\" title=\"A &amp; B\">\nDer Hund\nläuft\n</text>\n</corpus>";
        let (out, stats) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(
            out,
            "<corpus><text type=\"Gesetz\" title=\"A &amp; B\">Der\tX\tder\nHund\tX\thund\nläuft\tX\tläuft</text></corpus>"
        );
        assert_eq!(stats.units, 3);
        assert_eq!(stats.payloads, 1);
    }

    #[test]
    fn newline_units_are_dropped() {
        let src = "<c><s>a\nb\n\nc</s></c>";
        let (out, stats) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(stats.units, 3);
        assert_eq!(out, "<c><s>a\tX\ta\nb\tX\tb\nc\tX\tc</s></c>");
    }

    #[test]
    fn every_payload_is_annotated() {
        let src = "<c><text><s>Erster Satz</s><s>Zweiter</s></text></c>";
        let (out, stats) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(stats.payloads, 2);
        assert!(out.contains("<s>Erster\tX\terster\nSatz\tX\tsatz</s>"));
    }

    #[test]
    fn escapes_annotated_text() {
        let src = "<c><t>A &amp; B&lt;</t></c>";
        let (out, _) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(out, "<c><t>A\tX\ta\n&amp;\tX\t&amp;\nB&lt;\tX\tb&lt;</t></c>");
    }

    #[test]
    fn cdata_is_merged_with_text() {
        let src = "<c><t>eins <![CDATA[zwei]]> drei</t></c>";
        let (out, stats) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(stats.payloads, 1);
        assert_eq!(out, "<c><t>eins\tX\teins\nzwei\tX\tzwei\ndrei\tX\tdrei</t></c>");
    }

    #[test]
    fn unwrapped_corpus_is_rejected() {
        let src = "<text>a</text>\n<text>b</text>";
        assert!(matches!(
            run(&Annotator::new(Spaces), src),
            Err(Error::MalformedCorpus { .. })
        ));
    }

    #[test]
    fn unescaped_ampersand_is_rejected() {
        let src = "<c><t>Kosten & Gebühren</t></c>";
        assert!(matches!(
            run(&Annotator::new(Spaces), src),
            Err(Error::MalformedCorpus { .. })
        ));
    }

    #[test]
    fn mismatched_and_unclosed_tags_are_rejected() {
        for src in ["<c><t>a</x></c>", "<c><t>a</t>"] {
            assert!(matches!(
                run(&Annotator::new(Spaces), src),
                Err(Error::MalformedCorpus { .. })
            ));
        }
    }

    #[test]
    fn tagger_failure_aborts_by_default() {
        let src = "<c><t>a</t></c>";
        match run(&Annotator::new(Failing), src) {
            Err(Error::Annotation { payload, .. }) => assert_eq!(payload, 1),
            other => panic!("expected an annotation error, got {other:?}"),
        }
    }

    #[test]
    fn tagger_failure_can_be_skipped() {
        let src = "<c><t>a &amp; b</t></c>";
        let annotator = Annotator::new(Failing).on_error(FailurePolicy::Skip);
        let (out, stats) = run(&annotator, src).unwrap();
        assert_eq!(out, "<c><t>a &amp; b</t></c>");
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn declaration_and_comments_pass_through() {
        let src = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<c><!-- note --><t>x</t></c>\n";
        let (out, _) = run(&Annotator::new(Spaces), src).unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><c><!-- note --><t>x\tX\tx</t></c>"
        );
    }
}
