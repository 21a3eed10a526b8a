//! Annotab - genomics annotation-file utilities
//!
//! Utilities for bioinformatics pipelines that consume loosely
//! structured annotation files:
//!
//! - Chromosome name normalization across naming conventions
//! - BED-style genomic interval records
//! - Title/header detection for tab-delimited annotation files
//!   (VCF-like or TSV) whose header depth and column set vary
//!   between sources
//!
//! # Example
//!
//! ```
//! use annotab::{BedRecord, ChromNotation, TitleScanner, normalize_chrom};
//! use std::io::Cursor;
//!
//! // Normalize a chromosome name
//! assert_eq!(normalize_chrom("chrX", ChromNotation::GenomeReference).unwrap(), "X");
//!
//! // Parse a BED-style interval
//! let record = BedRecord::parse_line("chr1\t10000\t20000\t+").unwrap();
//! assert_eq!(record.chrom.as_deref(), Some("1"));
//!
//! // Detect the header of an annotation file
//! let mut stream = Cursor::new("# comment\nName\tAge\tGender\ndata\tdata\tdata\n");
//! let info = TitleScanner::new().scan(&mut stream).unwrap();
//! assert_eq!(info.column_index("age"), Some(1));
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    chrom_id_from_int, chrom_to_id, detect_compression, id_to_chrom, normalize_chrom,
    AnnotabError, AnnotationReader, ChromError, ChromNotation, Compression, Result,
};
pub use crate::formats::{
    bed, detect_delimiter, title, BedParseError, BedReader, BedRecord, TitleInfo, TitleScanError,
    TitleScanner, ZeroColumnPolicy,
};
