//! Title/header detection for tab-delimited annotation files
//!
//! Annotation files (VCF-like or TSV) carry an unknown number of leading
//! comment lines, a single column-title line, and sometimes trailing
//! comment lines before the data. [`TitleScanner`] locates the title
//! line, builds a name-to-index mapping over the column names, resolves
//! caller-supplied column patterns, and derives the VCF sample-name
//! sublist from the `FORMAT`/`ORI_REF` column positions.
//!
//! The scanner repositions the stream so that the caller's next read
//! returns the first data line. Streams without seek support (for
//! example gzip input) degrade gracefully: no rewind, no trailing
//! comment absorption, no comeback. Concurrent use of one stream handle
//! by multiple callers is not arbitrated here and must be serialized by
//! the caller.

use memchr::{memchr_iter, memmem};
use regex::Regex;
use std::collections::HashMap;
use std::io::{self, BufRead, Read, Seek, SeekFrom};
use thiserror::Error;

/// Errors from title scanning
#[derive(Debug, Error)]
pub enum TitleScanError {
    /// A special-column pattern failed to compile
    #[error("Invalid pattern for special column {name:?}: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// I/O error while reading lines (positioning errors are swallowed,
    /// read errors are not)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// How a resolved column index of exactly 0 is treated during sample
/// derivation
///
/// The historical behavior treats a `FORMAT` or `ORI_REF` column sitting
/// in the first position as if the column were absent. That is a latent
/// defect, kept as the default for compatibility with existing
/// pipelines; [`ZeroColumnPolicy::TreatAsPosition`] opts into the
/// corrected behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroColumnPolicy {
    /// Index 0 counts as "column not present" (compatible default)
    #[default]
    TreatAsMissing,
    /// Index 0 is an ordinary position
    TreatAsPosition,
}

/// Result of scanning an annotation file's header
#[derive(Debug, Clone, Default)]
pub struct TitleInfo {
    /// Number of columns on the title line; 0 when no title line was found
    pub column_count: usize,
    /// Column names in original case
    pub columns: Vec<String>,
    /// Column names lowercased and trimmed
    pub columns_lower: Vec<String>,
    /// Sample names derived from the FORMAT/ORI_REF column positions
    pub samples: Vec<String>,
    /// All header/comment lines plus the title line, verbatim, in file order
    pub header: String,
    /// Merged name-to-index lookup over both name lists
    index: HashMap<String, usize>,
    /// Resolved special columns, by caller-supplied name
    specials: HashMap<String, Option<usize>>,
}

impl TitleInfo {
    /// Look up a column by name, original-case or lowercase
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Look up a special column by the name it was registered under
    pub fn special_column(&self, name: &str) -> Option<usize> {
        self.specials.get(name).copied().flatten()
    }

    /// All registered special columns with their resolved indices
    pub fn special_columns(&self) -> &HashMap<String, Option<usize>> {
        &self.specials
    }

    /// Whether no title line was found
    pub fn is_empty(&self) -> bool {
        self.column_count == 0
    }
}

/// Conventional priority order of in-column value delimiters
pub const VALUE_DELIMITERS: [&str; 3] = [";", ",", "|"];

/// Find the delimiter used inside a column value.
///
/// Returns the first `priority` entry occurring in `text`; the order of
/// `priority` matters when several candidates occur.
///
/// ```
/// use annotab::formats::title::{detect_delimiter, VALUE_DELIMITERS};
///
/// assert_eq!(detect_delimiter("a;b,c", &VALUE_DELIMITERS), Some(";"));
/// assert_eq!(detect_delimiter("a b c", &VALUE_DELIMITERS), None);
/// ```
pub fn detect_delimiter<'a>(text: &str, priority: &[&'a str]) -> Option<&'a str> {
    priority
        .iter()
        .copied()
        .find(|mark| memmem::find(text.as_bytes(), mark.as_bytes()).is_some())
}

/// Configurable scanner for annotation-file headers
///
/// ```
/// use annotab::formats::title::TitleScanner;
/// use std::io::Cursor;
///
/// let mut stream = Cursor::new("# a comment\nName\tAge\tGender\ndata\tdata\tdata\n");
/// let info = TitleScanner::new().scan(&mut stream).unwrap();
/// assert_eq!(info.column_count, 3);
/// assert_eq!(info.column_index("age"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct TitleScanner {
    min_columns: usize,
    header_mark: String,
    comeback: bool,
    zero_policy: ZeroColumnPolicy,
    specials: Vec<(String, Regex)>,
}

impl Default for TitleScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleScanner {
    pub fn new() -> Self {
        Self {
            min_columns: 3,
            header_mark: "#".to_string(),
            comeback: false,
            zero_policy: ZeroColumnPolicy::default(),
            specials: Vec::new(),
        }
    }

    /// Minimum tab-separated field count for the title line (default 3)
    pub fn min_columns(mut self, min: usize) -> Self {
        self.min_columns = min;
        self
    }

    /// Comment/header line marker (default `#`)
    pub fn header_mark<S: Into<String>>(mut self, mark: S) -> Self {
        self.header_mark = mark.into();
        self
    }

    /// Restore the stream to its pre-scan position after scanning, when
    /// that position was nonzero and the stream supports seeking
    pub fn comeback(mut self, comeback: bool) -> Self {
        self.comeback = comeback;
        self
    }

    /// How index 0 is treated during sample derivation
    pub fn zero_policy(mut self, policy: ZeroColumnPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Register special columns as an ordered sequence of
    /// `(name, pattern)` pairs
    ///
    /// Each pattern is matched anchored at the start of every lowercase
    /// column name; the first matching column's index is recorded under
    /// `name`. A later duplicate name overwrites an earlier one.
    pub fn special_columns<I, N, P>(mut self, pairs: I) -> Result<Self, TitleScanError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        for (name, pattern) in pairs {
            let name = name.into();
            let anchored = format!(r"\A(?:{})", pattern.as_ref());
            let regex = Regex::new(&anchored).map_err(|source| TitleScanError::Pattern {
                name: name.clone(),
                source,
            })?;
            self.specials.push((name, regex));
        }
        Ok(self)
    }

    /// Scan a seekable stream for its title line.
    ///
    /// The stream is rewound to its start, scanned, and left positioned
    /// at the first data line after the header block (or restored to its
    /// pre-scan position under [`comeback`](Self::comeback)). Streams
    /// whose positioning calls fail are treated as forward-only; read
    /// errors propagate.
    pub fn scan<R: BufRead + Seek>(&self, reader: &mut R) -> Result<TitleInfo, TitleScanError> {
        let mut ori_pos = 0u64;
        if let Ok(pos) = reader.stream_position() {
            ori_pos = pos;
            let _ = reader.seek(SeekFrom::Start(0));
        }

        let mut header = String::new();
        let mut line = String::new();
        let mut title_line: Option<String> = None;

        // Find the first line with enough tab-separated fields. A line
        // that strips down to nothing never qualifies, whatever the
        // minimum, so blank lines are skipped rather than looped on.
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                log::debug!("no title line found before end of stream");
                break;
            }
            let stripped = strip_header_marks(line.strip_suffix('\n').unwrap_or(&line), &self.header_mark);
            let field_count = memchr_iter(b'\t', stripped.as_bytes()).count() + 1;
            if !stripped.is_empty() && field_count >= self.min_columns {
                title_line = Some(line.clone());
                break;
            }
            if line.starts_with(&self.header_mark) {
                header.push_str(&line);
            }
        }

        let mut columns: Vec<String> = Vec::new();
        if let Some(title) = &title_line {
            // The title line joins the header text exactly once, even
            // when it carries the mark itself (a VCF "#CHROM" line)
            header.push_str(title);
            let stripped =
                strip_header_marks(title.strip_suffix('\n').unwrap_or(title), &self.header_mark);
            columns = stripped.split('\t').map(|s| s.to_string()).collect();
            log::debug!("title line found with {} columns", columns.len());

            // Absorb the trailing comment block so the next read returns
            // the first data line. Positioning failures abandon the step.
            if let Ok(mut after) = reader.stream_position() {
                loop {
                    line.clear();
                    if reader.read_line(&mut line)? == 0 || !line.starts_with(&self.header_mark) {
                        break;
                    }
                    header.push_str(&line);
                    match reader.stream_position() {
                        Ok(pos) => after = pos,
                        Err(_) => break,
                    }
                }
                let _ = reader.seek(SeekFrom::Start(after));
            } else {
                log::debug!("stream does not support positioning; header block not absorbed");
            }
        }

        let columns_lower: Vec<String> = columns
            .iter()
            .map(|c| c.to_lowercase().trim().to_string())
            .collect();

        // Merged lookup: original-case names first, then lowercase names,
        // so lowercase wins ties. Within each list the first occurrence
        // of a duplicate name wins.
        let mut index: HashMap<String, usize> = HashMap::new();
        for list in [&columns, &columns_lower] {
            let mut from_list: HashMap<String, usize> = HashMap::new();
            for (i, name) in list.iter().enumerate() {
                if name.trim().is_empty() {
                    continue;
                }
                from_list.entry(name.clone()).or_insert(i);
            }
            index.extend(from_list);
        }

        let mut specials: HashMap<String, Option<usize>> = HashMap::new();
        for (name, regex) in &self.specials {
            let found = columns_lower.iter().position(|c| regex.is_match(c));
            specials.insert(name.clone(), found);
        }

        let samples = self.derive_samples(&columns, &index, &specials);

        if self.comeback && ori_pos != 0 {
            let _ = reader.seek(SeekFrom::Start(ori_pos));
        }

        Ok(TitleInfo {
            column_count: columns.len(),
            columns,
            columns_lower,
            samples,
            header,
            index,
            specials,
        })
    }

    /// Scan a forward-only stream.
    ///
    /// Every positioning step degrades as on an unseekable file: the
    /// stream is not rewound, the trailing comment block is not
    /// absorbed, and comeback is skipped.
    pub fn scan_forward<R: BufRead>(&self, reader: &mut R) -> Result<TitleInfo, TitleScanError> {
        self.scan(&mut NoSeek(reader))
    }

    /// Sample names sit after the FORMAT column, bounded by the ORI_REF
    /// column when one is present. A special-column entry takes
    /// precedence over a plain column of the same name.
    fn derive_samples(
        &self,
        columns: &[String],
        index: &HashMap<String, usize>,
        specials: &HashMap<String, Option<usize>>,
    ) -> Vec<String> {
        let resolve = |name: &str| -> Option<usize> {
            let found = match specials.get(name) {
                Some(resolved) => *resolved,
                None => index.get(name).copied(),
            };
            match (found, self.zero_policy) {
                (Some(0), ZeroColumnPolicy::TreatAsMissing) => None,
                _ => found,
            }
        };

        let Some(format_idx) = resolve("format") else {
            return Vec::new();
        };
        let upper = match resolve("ori_ref") {
            Some(ori_ref_idx) => ori_ref_idx.min(columns.len()),
            None => columns.len(),
        };
        if upper > format_idx + 1 {
            columns[format_idx + 1..upper].to_vec()
        } else {
            Vec::new()
        }
    }
}

/// Strip any number of leading header-mark occurrences
fn strip_header_marks<'a>(mut line: &'a str, mark: &str) -> &'a str {
    if mark.is_empty() {
        return line;
    }
    while let Some(rest) = line.strip_prefix(mark) {
        line = rest;
    }
    line
}

/// Adapter that reports every positioning call as unsupported
struct NoSeek<R>(R);

impl<R: Read> Read for NoSeek<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: BufRead> BufRead for NoSeek<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.0.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.0.consume(amt)
    }
}

impl<R> Seek for NoSeek<R> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream is forward-only",
        ))
    }
}
