//! Chromosome name normalization
//!
//! Maps the many textual representations of human chromosomes ("chr1",
//! "1", "chrX", "MT", "chr1_gl000191_random", ...) onto a canonical
//! integer id and back to one of two naming conventions.
//!
//! Canonical ids: 1-22 are the autosomes, 23 is X, 24 is Y, 25 is
//! mitochondrial DNA.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from chromosome name handling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChromError {
    /// Value cannot be mapped into the 1-25 range
    #[error("Invalid chromosome: {0:?}")]
    InvalidChromosome(String),

    /// Unrecognized notation convention
    #[error("Unsupported chromosome notation convention: {0:?}")]
    UnsupportedConvention(String),
}

/// Result type alias for chromosome operations
pub type ChromResult<T> = std::result::Result<T, ChromError>;

/// Chromosome naming convention for rendering canonical ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromNotation {
    /// UCSC style with "chr" prefix: "chr1".."chr22", "chrX", "chrY", "chrM"
    Ucsc,
    /// Genome Reference Consortium style: "1".."22", "X", "Y", "MT"
    #[default]
    GenomeReference,
}

impl ChromNotation {
    /// All known conventions, for error messages and CLI help
    pub const ALL: [ChromNotation; 2] = [ChromNotation::Ucsc, ChromNotation::GenomeReference];
}

impl FromStr for ChromNotation {
    type Err = ChromError;

    fn from_str(s: &str) -> ChromResult<Self> {
        match s.to_lowercase().as_str() {
            // "hg19" and "b37" are the assembly names these conventions
            // are usually known by in variant-calling pipelines
            "ucsc" | "hg19" => Ok(ChromNotation::Ucsc),
            "genome-reference" | "grc" | "b37" => Ok(ChromNotation::GenomeReference),
            _ => Err(ChromError::UnsupportedConvention(s.to_string())),
        }
    }
}

impl fmt::Display for ChromNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromNotation::Ucsc => write!(f, "ucsc"),
            ChromNotation::GenomeReference => write!(f, "genome-reference"),
        }
    }
}

/// Lowest valid canonical chromosome id
pub const MIN_CHROM_ID: u8 = 1;
/// Highest valid canonical chromosome id (mitochondrial)
pub const MAX_CHROM_ID: u8 = 25;
/// Canonical id of chromosome X
pub const CHROM_X: u8 = 23;
/// Canonical id of chromosome Y
pub const CHROM_Y: u8 = 24;
/// Canonical id of the mitochondrial chromosome
pub const CHROM_MT: u8 = 25;

/// Convert a chromosome name to its canonical integer id.
///
/// Accepts any of the common spellings: with or without a `chr` prefix,
/// `X`/`Y`, the mitochondrial aliases `M`/`MT`/`MITO`/`MITOCHONDRIA`
/// (case-insensitive), and alternate-contig names such as
/// `1_gl000191_random`, which are truncated at the first underscore.
/// The MHC alternate locus `HSCHR6_MHC_COX` maps to chromosome 6.
///
/// # Examples
/// ```
/// use annotab::core::chrom_to_id;
///
/// assert_eq!(chrom_to_id("chr1").unwrap(), 1);
/// assert_eq!(chrom_to_id("chrX").unwrap(), 23);
/// assert_eq!(chrom_to_id("MT").unwrap(), 25);
/// assert_eq!(chrom_to_id("chr1_random").unwrap(), 1);
/// assert!(chrom_to_id("26").is_err());
/// ```
pub fn chrom_to_id(chrom: &str) -> ChromResult<u8> {
    let trimmed = chrom.trim();
    // Strip the "chr" prefix exactly once, case-sensitively
    let stripped = trimmed.strip_prefix("chr").unwrap_or(trimmed);

    if stripped == "X" {
        return Ok(CHROM_X);
    }
    if stripped == "Y" {
        return Ok(CHROM_Y);
    }
    if ["M", "MT", "MITO", "MITOCHONDRIA"]
        .iter()
        .any(|alias| stripped.eq_ignore_ascii_case(alias))
    {
        return Ok(CHROM_MT);
    }
    // MHC alternate locus, checked before underscore truncation
    if stripped.eq_ignore_ascii_case("HSCHR6_MHC_COX") {
        return Ok(6);
    }

    // Alternate contigs like "1_gl000191_random": keep the part before
    // the first underscore
    let numeric = match stripped.split_once('_') {
        Some((prefix, _)) => prefix,
        None => stripped,
    };

    numeric
        .parse::<i64>()
        .ok()
        .and_then(|n| chrom_id_from_int(n).ok())
        .ok_or_else(|| ChromError::InvalidChromosome(chrom.to_string()))
}

/// Validate an integer as a canonical chromosome id.
pub fn chrom_id_from_int(n: i64) -> ChromResult<u8> {
    if n >= MIN_CHROM_ID as i64 && n <= MAX_CHROM_ID as i64 {
        Ok(n as u8)
    } else {
        Err(ChromError::InvalidChromosome(n.to_string()))
    }
}

/// Render a canonical chromosome id in the given notation.
///
/// # Examples
/// ```
/// use annotab::core::{id_to_chrom, ChromNotation};
///
/// assert_eq!(id_to_chrom(1, ChromNotation::Ucsc).unwrap(), "chr1");
/// assert_eq!(id_to_chrom(23, ChromNotation::Ucsc).unwrap(), "chrX");
/// assert_eq!(id_to_chrom(25, ChromNotation::Ucsc).unwrap(), "chrM");
/// assert_eq!(id_to_chrom(25, ChromNotation::GenomeReference).unwrap(), "MT");
/// ```
pub fn id_to_chrom(id: u8, notation: ChromNotation) -> ChromResult<String> {
    if !(MIN_CHROM_ID..=MAX_CHROM_ID).contains(&id) {
        return Err(ChromError::InvalidChromosome(id.to_string()));
    }
    let rendered = match notation {
        ChromNotation::Ucsc => match id {
            CHROM_X => "chrX".to_string(),
            CHROM_Y => "chrY".to_string(),
            CHROM_MT => "chrM".to_string(),
            n => format!("chr{}", n),
        },
        ChromNotation::GenomeReference => match id {
            CHROM_X => "X".to_string(),
            CHROM_Y => "Y".to_string(),
            CHROM_MT => "MT".to_string(),
            n => n.to_string(),
        },
    };
    Ok(rendered)
}

/// Normalize any accepted chromosome spelling to the given notation.
///
/// Composition of [`chrom_to_id`] and [`id_to_chrom`].
///
/// # Examples
/// ```
/// use annotab::core::{normalize_chrom, ChromNotation};
///
/// assert_eq!(
///     normalize_chrom("chr1", ChromNotation::GenomeReference).unwrap(),
///     "1"
/// );
/// assert_eq!(normalize_chrom("MT", ChromNotation::Ucsc).unwrap(), "chrM");
/// ```
pub fn normalize_chrom(chrom: &str, notation: ChromNotation) -> ChromResult<String> {
    id_to_chrom(chrom_to_id(chrom)?, notation)
}
