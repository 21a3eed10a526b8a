//! Error types for annotab
//!
//! Each concern defines its own error enum next to its code; this module
//! provides the umbrella error and the result aliases.

use thiserror::Error;

use crate::core::chrom::ChromError;
use crate::formats::bed::BedParseError;
use crate::formats::title::TitleScanError;

/// Main error type for annotab operations
#[derive(Debug, Error)]
pub enum AnnotabError {
    /// Chromosome name normalization errors
    #[error("Chromosome error: {0}")]
    Chrom(#[from] ChromError),

    /// BED record parsing errors
    #[error("BED parse error: {0}")]
    Bed(#[from] BedParseError),

    /// Title/header scanning errors
    #[error("Title scan error: {0}")]
    Title(#[from] TitleScanError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for annotab operations
pub type Result<T> = std::result::Result<T, AnnotabError>;

/// Result type alias for BED parsing operations
pub type BedResult<T> = std::result::Result<T, BedParseError>;

/// Result type alias for title scanning operations
pub type TitleResult<T> = std::result::Result<T, TitleScanError>;
