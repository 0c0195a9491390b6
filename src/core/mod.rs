//! Core data model
//!
//! This module contains the input record, the breakend output type,
//! SV type tags, options, errors and the I/O helpers.

mod breakend;
pub mod dna;
mod error;
pub mod io;
mod options;
mod record;
mod svtype;

pub use breakend::{Breakend, ConfidenceInterval, Strand};
pub use error::{
    BreakendError, BreakendResult, Result, SvBreakendsError, VcfParseError, VcfResult,
};
pub use options::{ExtractOptions, DEFAULT_PLACEHOLDER_NAME, DEFAULT_SUFFIX};
pub use record::{InfoValue, VariantRecord, MAX_COORDINATE};
pub use svtype::SvType;
