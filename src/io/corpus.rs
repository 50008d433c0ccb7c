/*! Tagged corpus assembly.

The harvester accumulates [DocumentRecord]s in a [Corpus] and writes it to disk
once, at the end of the run.
!*/
use std::{fs::File, io::Write, path::Path};

use log::info;

use crate::document::DocumentRecord;
use crate::error::Error;

/// Name of the element wrapping all `<text>` records.
pub const ROOT: &str = "corpus";

/// Append-only, ordered sequence of records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Corpus {
    records: Vec<DocumentRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DocumentRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records joined by newlines, optionally wrapped in a `<corpus>` root.
    pub fn render(&self, root: bool) -> String {
        let mut out = String::new();
        if root {
            out.push_str(&format!("<{ROOT}>\n"));
        }
        for (idx, record) in self.records.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&record.to_string());
        }
        if root {
            out.push_str(&format!("\n</{ROOT}>\n"));
        }
        out
    }

    /// Single write of the whole corpus.
    pub fn write_to(&self, dst: &Path, root: bool) -> Result<(), Error> {
        let mut file = File::create(dst)?;
        file.write_all(self.render(root).as_bytes())?;
        file.flush()?;
        info!("wrote {} documents to {:?}", self.len(), dst);
        Ok(())
    }
}
