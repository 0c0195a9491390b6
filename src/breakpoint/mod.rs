//! Breakpoint engine
//!
//! Classification, breakend notation parsing, confidence intervals,
//! per-family geometry, partner resolution and centre alignment.

pub mod align;
pub mod classify;
pub mod confidence;
pub mod extract;
pub mod geometry;
pub mod notation;
pub mod partner;
mod warnings;

pub use align::{align_breakpoints, align_breakpoints_with, id_above_mate, AlignMode};
pub use classify::{classify, is_structural, is_symbolic, root_type_tag, RecordClass};
pub use extract::{extract_breakends, extract_breakpoints, Extraction};
pub use warnings::{ExtractionStats, ExtractionWarning};
