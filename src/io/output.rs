/*! Annotated corpus destinations.

Output is streamed into a temporary file next to its destination and only moved
into place once complete, so an aborted run leaves the destination untouched.
!*/
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::Error;

/// Suffix appended to the input stem when not overwriting.
pub const TAGGED_SUFFIX: &str = "_taggedAnnotation.xml";

/// Destination of the annotated corpus for `input`.
pub fn tagged_path(input: &Path, overwrite: bool) -> PathBuf {
    if overwrite {
        return input.to_path_buf();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{TAGGED_SUFFIX}"))
}

/// Writer that only lands on `dst` when [PendingOutput::persist] is called.
pub struct PendingOutput {
    dst: PathBuf,
    inner: BufWriter<NamedTempFile>,
}

impl PendingOutput {
    pub fn new(dst: &Path) -> Result<Self, Error> {
        let dir = match dst.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        debug!("staging output for {:?} in {:?}", dst, tmp.path());
        Ok(Self {
            dst: dst.to_path_buf(),
            inner: BufWriter::new(tmp),
        })
    }

    /// Flush and atomically move onto the destination.
    pub fn persist(self) -> Result<File, Error> {
        let tmp = self.inner.into_inner().map_err(|e| e.into_error())?;
        Ok(tmp.persist(&self.dst)?)
    }
}

impl Write for PendingOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
