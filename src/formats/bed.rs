//! BED-style genomic interval records
//!
//! A [`BedRecord`] holds one whitespace-delimited interval line with its
//! chromosome normalized to genome-reference notation. The record only
//! types its coordinates; it does not validate interval semantics, and
//! `start <= end` is deliberately not enforced.

use crate::core::chrom::{normalize_chrom, ChromError, ChromNotation};
use std::fmt;
use std::io::BufRead;
use thiserror::Error;

/// BED parsing error
#[derive(Debug, Error)]
pub enum BedParseError {
    /// Field count of exactly 1, or start/end not parseable as integers
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Chromosome field could not be normalized
    #[error("Invalid chromosome in interval: {0}")]
    Chrom(#[from] ChromError),

    /// I/O error while reading records
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A BED-style genomic interval
///
/// Constructed from a delimited line or a field sequence:
///
/// ```
/// use annotab::formats::bed::BedRecord;
///
/// let rec = BedRecord::parse_line("chr1\t10000\t20000\t+").unwrap();
/// assert_eq!(rec.chrom.as_deref(), Some("1"));
/// assert_eq!(rec.start, Some(10000));
/// assert_eq!(rec.end, Some(20000));
/// assert_eq!(rec.extra_fields, vec!["+".to_string()]);
/// ```
///
/// A two-field input is read as `(start, end)` with no chromosome; an
/// empty input yields the empty record. Inverted intervals
/// (`start > end`) are accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BedRecord {
    /// Chromosome in genome-reference notation, absent for two-field input
    pub chrom: Option<String>,
    /// Start coordinate
    pub start: Option<u64>,
    /// End coordinate
    pub end: Option<u64>,
    /// Fields beyond the third, kept verbatim
    pub extra_fields: Vec<String>,
}

impl BedRecord {
    /// The empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-delimited interval line
    pub fn parse_line(line: &str) -> Result<Self, BedParseError> {
        Self::from_fields(line.split_whitespace())
    }

    /// Build a record from an ordered sequence of string fields
    pub fn from_fields<I, S>(fields: I) -> Result<Self, BedParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<String> = fields.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::from_field_slice(&fields)
    }

    fn from_field_slice(fields: &[String]) -> Result<Self, BedParseError> {
        match fields.len() {
            0 => Ok(Self::new()),
            1 => Err(BedParseError::InvalidInterval(format!(
                "a single field {:?} cannot form an interval",
                fields[0]
            ))),
            2 => {
                let start = parse_coord(&fields[0])?;
                let end = parse_coord(&fields[1])?;
                if start > 0 && start < 30 {
                    log::warn!(
                        "interval start is {}; check whether a chromosome field is missing",
                        start
                    );
                }
                Ok(Self {
                    chrom: None,
                    start: Some(start),
                    end: Some(end),
                    extra_fields: Vec::new(),
                })
            }
            _ => {
                // Coordinates are checked before the chromosome so that
                // integer failures surface first
                let start = parse_coord(&fields[1])?;
                let end = parse_coord(&fields[2])?;
                let chrom = normalize_chrom(&fields[0], ChromNotation::GenomeReference)?;
                Ok(Self {
                    chrom: Some(chrom),
                    start: Some(start),
                    end: Some(end),
                    extra_fields: fields[3..].to_vec(),
                })
            }
        }
    }

    /// Whether this is the empty record
    pub fn is_empty(&self) -> bool {
        self.chrom.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.extra_fields.is_empty()
    }

    /// Render the record as a tab-joined data line; the empty record
    /// renders as an empty string
    pub fn as_line(&self) -> String {
        let mut fields: Vec<String> = Vec::with_capacity(3 + self.extra_fields.len());
        if let Some(chrom) = &self.chrom {
            fields.push(chrom.clone());
        }
        if let Some(start) = self.start {
            fields.push(start.to_string());
        }
        if let Some(end) = self.end {
            fields.push(end.to_string());
        }
        fields.extend(self.extra_fields.iter().cloned());
        fields.join("\t")
    }
}

impl fmt::Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "BedRecord()");
        }
        match &self.chrom {
            Some(chrom) => write!(f, "BedRecord({:?}", chrom)?,
            None => write!(f, "BedRecord(None")?,
        }
        if let Some(start) = self.start {
            write!(f, ", {}", start)?;
        }
        if let Some(end) = self.end {
            write!(f, ", {}", end)?;
        }
        for extra in &self.extra_fields {
            write!(f, ", {:?}", extra)?;
        }
        write!(f, ")")
    }
}

fn parse_coord(field: &str) -> Result<u64, BedParseError> {
    field.parse::<u64>().map_err(|_| {
        BedParseError::InvalidInterval(format!("coordinate {:?} is not an integer", field))
    })
}

/// Iterator over the BED records of a line-oriented reader
///
/// Skips blank lines and `#`/`track`/`browser` lines; every other line
/// is parsed as a [`BedRecord`].
pub struct BedReader<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::with_capacity(256),
        }
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for BedReader<R> {
    type Item = Result<BedRecord, BedParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            let trimmed = self.line.trim_end_matches(|c| c == '\n' || c == '\r');
            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with("track")
                || trimmed.starts_with("browser")
            {
                continue;
            }
            return Some(BedRecord::parse_line(trimmed));
        }
    }
}
