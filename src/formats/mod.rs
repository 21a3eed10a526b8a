//! File format handling
//!
//! BED-style interval records and title/header detection for
//! tab-delimited annotation files (VCF-like or TSV).

pub mod bed;
pub mod title;

pub use bed::{BedParseError, BedReader, BedRecord};
pub use title::{
    detect_delimiter, TitleInfo, TitleScanError, TitleScanner, ZeroColumnPolicy, VALUE_DELIMITERS,
};
