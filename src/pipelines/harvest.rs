//! Document harvesting pipeline
//!
//! Builds the tagged corpus from a list of locators.
//!
//! # Processing
//! 1. Every locator is fetched, in file order.
//! 1. The document is parsed and its metadata extracted according to the run's [Source].
//! 1. The resulting record is appended to the in-memory corpus.
//! 1. Once every locator has been processed, the corpus is written in one go.
//!
//! By default the first failing document aborts the run and nothing is written.
//! With `skip_failed`, failures are logged and the document is left out.
use std::{fs::File, io::BufReader, path::PathBuf};

use log::{debug, error, info};
use reqwest::Url;

use crate::document::DocumentRecord;
use crate::error::Error;
use crate::extract::{self, Extract, Page};
use crate::io::Corpus;
use crate::sources::{read_locators, Fetch, HttpFetcher, Source};

use super::Pipeline;

/// Harvester run parameters.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub locators: PathBuf,
    pub dst: PathBuf,
    pub source: Source,
    pub level: String,
    pub retries: usize,
    pub skip_failed: bool,
    pub root: bool,
}

/// Result of a harvest: the corpus, plus the documents left out.
#[derive(Debug)]
pub struct Harvest {
    pub corpus: Corpus,
    pub skipped: Vec<Error>,
}

/// Fetches and extracts documents, one after the other.
pub struct Harvester<F: Fetch> {
    fetcher: F,
    extractor: Box<dyn Extract>,
    skip_failed: bool,
}

impl<F: Fetch> Harvester<F> {
    pub fn new(fetcher: F, source: Source, level: &str) -> Self {
        Self {
            fetcher,
            extractor: extract::for_source(source, level),
            skip_failed: false,
        }
    }

    pub fn with_extractor(fetcher: F, extractor: Box<dyn Extract>) -> Self {
        Self {
            fetcher,
            extractor,
            skip_failed: false,
        }
    }

    pub fn skip_failed(mut self, skip: bool) -> Self {
        self.skip_failed = skip;
        self
    }

    fn harvest_one(&self, url: &Url) -> Result<DocumentRecord, Error> {
        let raw = self.fetcher.fetch(url)?;
        debug!("{url}: {} bytes", raw.len());
        let page = Page::parse(&raw);
        self.extractor.extract(&page)
    }

    /// Process `locators` in order. Output order is input order.
    pub fn harvest(&self, locators: &[Url]) -> Result<Harvest, Error> {
        let total = locators.len();
        let mut corpus = Corpus::new();
        let mut skipped = Vec::new();

        for (idx, url) in locators.iter().enumerate() {
            match self.harvest_one(url) {
                Ok(record) => corpus.push(record),
                Err(e) => {
                    let e = e.in_document(url.as_str());
                    if !self.skip_failed {
                        return Err(e);
                    }
                    error!("skipping document: {e}");
                    skipped.push(e);
                }
            }
            info!(
                "{} out of {} ({:.2}%)",
                idx + 1,
                total,
                (idx + 1) as f64 / total as f64 * 100.0
            );
        }

        Ok(Harvest { corpus, skipped })
    }
}

/// Stage A entry point.
pub struct HarvestPipeline {
    config: HarvestConfig,
}

impl HarvestPipeline {
    pub fn new(config: HarvestConfig) -> Self {
        Self { config }
    }
}

impl Pipeline<Harvest> for HarvestPipeline {
    fn run(&self) -> Result<Harvest, Error> {
        let locators = read_locators(BufReader::new(File::open(&self.config.locators)?))?;
        info!(
            "harvesting {} documents from {}",
            locators.len(),
            self.config.source.database()
        );

        let fetcher = HttpFetcher::new(self.config.retries)?;
        let harvester = Harvester::new(fetcher, self.config.source, &self.config.level)
            .skip_failed(self.config.skip_failed);
        let harvest = harvester.harvest(&locators)?;

        harvest.corpus.write_to(&self.config.dst, self.config.root)?;
        if !harvest.skipped.is_empty() {
            info!("{} documents skipped", harvest.skipped.len());
        }
        Ok(harvest)
    }
}
