//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use korpus::pipelines::{annotate::EXPECTED_TOKENS, AnnotateConfig, FailurePolicy, HarvestConfig};
use korpus::sources::Source;

#[derive(Debug, StructOpt)]
#[structopt(name = "korpus", about = "German legal corpus builder.")]
/// Holds every command that is callable by the `korpus` command.
pub enum Korpus {
    #[structopt(about = "Harvest documents into a corpus")]
    Harvest(Harvest),
    #[structopt(about = "Annotate a corpus")]
    Annotate(Annotate),
}

#[derive(Debug, StructOpt)]
/// Harvest command and parameters.
///
/// ```sh
/// korpus-harvest 0.1.0
/// Harvest documents into a corpus
///
/// USAGE:
///     korpus harvest [FLAGS] [OPTIONS] <locators> <dst>
///
/// FLAGS:
///     -h, --help           Prints help information
///         --no-root        do not wrap documents in a root element
///         --skip-failed    leave failing documents out instead of aborting
///     -V, --version        Prints version information
///
/// OPTIONS:
///         --level <level>        value of the level attribute [default: Bund]
///         --retries <retries>    attempts per document on transient errors [default: 10]
///     -s, --source <source>      statutes or decisions [default: statutes]
///
/// ARGS:
///     <locators>    file holding one document locator per line
///     <dst>         corpus destination
/// ```
pub struct Harvest {
    #[structopt(parse(from_os_str), help = "file holding one document locator per line")]
    pub locators: PathBuf,
    #[structopt(parse(from_os_str), help = "corpus destination")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "source",
        help = "statutes or decisions",
        default_value = "statutes"
    )]
    pub source: Source,
    #[structopt(long = "level", help = "value of the level attribute", default_value = "Bund")]
    pub level: String,
    #[structopt(
        long = "retries",
        help = "attempts per document on transient errors",
        default_value = "10"
    )]
    pub retries: usize,
    #[structopt(long = "skip-failed", help = "leave failing documents out instead of aborting")]
    pub skip_failed: bool,
    #[structopt(long = "no-root", help = "do not wrap documents in a root element")]
    pub no_root: bool,
}

impl From<Harvest> for HarvestConfig {
    fn from(h: Harvest) -> Self {
        HarvestConfig {
            locators: h.locators,
            dst: h.dst,
            source: h.source,
            level: h.level,
            retries: h.retries,
            skip_failed: h.skip_failed,
            root: !h.no_root,
        }
    }
}

#[derive(Debug, StructOpt)]
/// Annotate command and parameters.
///
/// ```sh
/// korpus-annotate 0.1.0
/// Annotate a corpus
///
/// USAGE:
///     korpus annotate [FLAGS] [OPTIONS] <corpus>
///
/// FLAGS:
///     -h, --help         Prints help information
///     -o, --overwrite    replace the input corpus instead of writing <stem>_taggedAnnotation.xml
///     -V, --version      Prints version information
///
/// OPTIONS:
///         --expected-tokens <expected-tokens>    approximate corpus size, for progress reporting
///         --lexicon <lexicon>                    tab separated surface/tag/lemma lexicon
///         --on-tag-error <on-error>              abort or skip [default: abort]
///
/// ARGS:
///     <corpus>    corpus to annotate
/// ```
pub struct Annotate {
    #[structopt(parse(from_os_str), help = "corpus to annotate")]
    pub corpus: PathBuf,
    #[structopt(
        short = "o",
        long = "overwrite",
        help = "replace the input corpus instead of writing <stem>_taggedAnnotation.xml"
    )]
    pub overwrite: bool,
    #[structopt(
        parse(from_os_str),
        long = "lexicon",
        help = "tab separated surface/tag/lemma lexicon"
    )]
    pub lexicon: Option<PathBuf>,
    #[structopt(long = "on-tag-error", help = "abort or skip", default_value = "abort")]
    pub on_error: FailurePolicy,
    #[structopt(
        long = "expected-tokens",
        help = "approximate corpus size, for progress reporting"
    )]
    pub expected_tokens: Option<u64>,
}

impl From<Annotate> for AnnotateConfig {
    fn from(a: Annotate) -> Self {
        AnnotateConfig {
            corpus: a.corpus,
            overwrite: a.overwrite,
            lexicon: a.lexicon,
            on_error: a.on_error,
            expected_tokens: a.expected_tokens.unwrap_or(EXPECTED_TOKENS),
        }
    }
}
