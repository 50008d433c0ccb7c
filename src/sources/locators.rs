//! Locator file parsing.
use std::io::BufRead;

use log::debug;
use reqwest::Url;

use crate::error::Error;

/// Read one absolute URL per line, keeping file order.
///
/// Blank lines are skipped. The first line that doesn't parse as an absolute URL
/// fails the whole read, so that a run never starts on a partial list.
pub fn read_locators<R: BufRead>(src: R) -> Result<Vec<Url>, Error> {
    let mut urls = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let url = Url::parse(value).map_err(|reason| Error::InvalidLocator {
            line: idx + 1,
            value: value.to_string(),
            reason,
        })?;
        urls.push(url);
    }

    debug!("read {} locators", urls.len());
    Ok(urls)
}
