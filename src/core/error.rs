//! Error types for sv-breakends
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sv-breakends operations
#[derive(Debug, Error)]
pub enum SvBreakendsError {
    /// Breakpoint extraction or alignment errors
    #[error("Breakend error: {0}")]
    Breakend(#[from] BreakendError),

    /// VCF text parsing errors
    #[error("VCF parse error: {0}")]
    Vcf(#[from] VcfParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors raised while converting records into breakends.
///
/// Any of these aborts the whole conversion; no partial result is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakendError {
    /// Record carries more than one ALT allele
    #[error("record {id} has {count} ALT alleles; exactly one ALT allele per record is required (split multi-allelic records first)")]
    MultipleAlts { id: String, count: usize },

    /// Symbolic allele without SVLEN and without END
    #[error("record {id}: SV length is undefined (no SVLEN and no END)")]
    MissingSvLength { id: String },

    /// Mandatory INFO field missing for the record's SV type
    #[error("record {id}: {svtype} record is missing mandatory INFO field {field}")]
    MissingInfoField {
        id: String,
        svtype: &'static str,
        field: &'static str,
    },

    /// INFO value could not be interpreted
    #[error("record {id}: invalid value '{value}' for INFO field {field}")]
    InvalidInfoValue {
        id: String,
        field: String,
        value: String,
    },

    /// POS outside the accepted coordinate range
    #[error("record {id}: position {pos} is out of range")]
    PositionOutOfRange { id: String, pos: i64 },

    /// TRA connection type is not one of 3to3, 3to5, 5to3, 5to5
    #[error("record {id}: unknown CT connection type '{value}'")]
    InvalidConnectionType { id: String, value: String },

    /// No geometry rule claims the record
    #[error("record {id}: unrecognized structural variant format (SVTYPE={svtype}, ALT={alt})")]
    UnrecognizedFormat {
        id: String,
        svtype: String,
        alt: String,
    },

    /// Internal invariant breach detected during partner validation
    #[error("sanity check failure: {0}")]
    SanityCheck(String),

    /// Aligner needs CIPOS on every record
    #[error("record {id} has no 2-valued CIPOS; alignment requires CIPOS on every record")]
    MissingConfidenceInterval { id: String },

    /// Only centre alignment is implemented
    #[error("unsupported alignment mode '{0}': only centre alignment is implemented")]
    UnsupportedAlignment(String),
}

/// Errors that can occur while reading VCF text
#[derive(Debug, Error)]
pub enum VcfParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid UTF-8 in field {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },

    #[error("Invalid number in field {field} at line {line}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("VCF file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sv-breakends operations
pub type Result<T> = std::result::Result<T, SvBreakendsError>;

/// Result type alias for breakpoint extraction
pub type BreakendResult<T> = std::result::Result<T, BreakendError>;

/// Result type alias for VCF parsing
pub type VcfResult<T> = std::result::Result<T, VcfParseError>;
