//! Drafting dates.
use std::fmt;

/// A `DD.MM.YYYY` date, kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftingDate(String);

impl DraftingDate {
    /// Accepts exactly `DD.MM.YYYY` (ASCII digits, dot separators).
    pub fn parse(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        let shape_ok = b.len() == 10
            && b[2] == b'.'
            && b[5] == b'.'
            && b
                .iter()
                .enumerate()
                .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit());
        shape_ok.then(|| Self(s.to_string()))
    }

    /// Court documents carry compact `YYYYMMDD` dates.
    pub fn from_compact(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Self::parse(&format!("{}.{}.{}", &s[6..8], &s[4..6], &s[0..4]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `YYYY`
    pub fn year(&self) -> &str {
        &self.0[6..10]
    }

    /// First three digits of the year followed by `0`.
    pub fn decade(&self) -> String {
        format!("{}0", &self.0[6..9])
    }
}

impl fmt::Display for DraftingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_and_decade() {
        let d = DraftingDate::parse("23.06.2016").unwrap();
        assert_eq!(d.year(), "2016");
        assert_eq!(d.decade(), "2010");

        let d = DraftingDate::parse("01.01.1900").unwrap();
        assert_eq!(d.decade(), "1900");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(DraftingDate::parse("23.6.2016").is_none());
        assert!(DraftingDate::parse("2016-06-23").is_none());
        assert!(DraftingDate::parse("NA").is_none());
        assert!(DraftingDate::parse("23.06.20x6").is_none());
    }

    #[test]
    fn compact_dates() {
        let d = DraftingDate::from_compact("20160623").unwrap();
        assert_eq!(d.as_str(), "23.06.2016");
        assert!(DraftingDate::from_compact("2016062").is_none());
    }
}
