//! sv-breakends - VCF structural variants as paired breakends
//!
//! Converts structural-variant records in any of the common VCF notations
//! (plain indels, symbolic alleles, bracket breakends, single breakends,
//! caller-specific translocations) into strand-oriented breakends with
//! confidence intervals, linked into breakpoints.
//!
//! # Features
//!
//! - One geometry rule per SV family over disjoint record batches
//! - Partner resolution with optional mate inference
//! - Centre alignment of imprecise bracket breakends
//! - Parallel batches with rayon, output independent of thread count
//!
//! # Example
//!
//! ```
//! use sv_breakends::{extract_breakpoints, ExtractOptions, VariantRecord};
//!
//! let records = vec![
//!     VariantRecord::new("chr1", 10, Some("inv1"), "N", "<INV>").with_info("SVLEN", "20"),
//! ];
//! let out = extract_breakpoints(&records, &ExtractOptions::default())?;
//! let positions: Vec<i64> = out.breakends.iter().map(|b| b.pos).collect();
//! assert_eq!(positions, vec![11, 10, 31, 30]);
//! # Ok::<(), sv_breakends::BreakendError>(())
//! ```

pub mod breakpoint;
pub mod core;
pub mod formats;

// Re-export commonly used types
pub use breakpoint::{
    align_breakpoints, align_breakpoints_with, extract_breakends, extract_breakpoints, AlignMode,
    Extraction, ExtractionStats, ExtractionWarning,
};
pub use core::{
    Breakend, BreakendError, ConfidenceInterval, ExtractOptions, InfoValue, Strand,
    SvBreakendsError, SvType, VariantRecord,
};
pub use formats::{read_vcf, write_breakend_table, write_vcf};
