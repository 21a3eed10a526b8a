//! Core functionality
//!
//! This module contains chromosome name normalization, the error
//! umbrella, and the annotation-file I/O layer.

pub mod chrom;
mod error;
pub mod io;

pub use chrom::{
    chrom_id_from_int, chrom_to_id, id_to_chrom, normalize_chrom, ChromError, ChromNotation,
    ChromResult, CHROM_MT, CHROM_X, CHROM_Y, MAX_CHROM_ID, MIN_CHROM_ID,
};
pub use error::{AnnotabError, BedResult, Result, TitleResult};
pub use io::{
    detect_compression, AnnotationReader, Compression, MappedReader, DEFAULT_BUFFER_SIZE,
};
