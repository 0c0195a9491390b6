//! Confidence interval propagation
//!
//! Start interval priority: CIPOS, then HOMLEN, then the length of HOMSEQ,
//! then exact. End interval priority: CIEND, then the start interval
//! widened by CILEN (not for insertions), then the start interval itself.

use crate::core::{BreakendResult, ConfidenceInterval, SvType, VariantRecord};

/// Microhomology length from HOMLEN, falling back to the length of HOMSEQ
pub fn homology_length(record: &VariantRecord) -> BreakendResult<Option<i64>> {
    if let Some(len) = record.info_int("HOMLEN")? {
        return Ok(Some(len.abs()));
    }
    Ok(record.info_str("HOMSEQ").map(|seq| seq.len() as i64))
}

/// Interval around the record's own position
pub fn start_interval(record: &VariantRecord) -> BreakendResult<ConfidenceInterval> {
    if let Some((lower, upper)) = record.info_int_pair("CIPOS")? {
        return Ok(ConfidenceInterval::from_bounds(lower, upper));
    }
    if let Some(len) = homology_length(record)? {
        return Ok(ConfidenceInterval::homology(len));
    }
    Ok(ConfidenceInterval::default())
}

/// Interval around the far end of the record's breakpoint
pub fn end_interval(
    record: &VariantRecord,
    start: ConfidenceInterval,
    sv_type: SvType,
) -> BreakendResult<ConfidenceInterval> {
    if let Some((lower, upper)) = record.info_int_pair("CIEND")? {
        return Ok(ConfidenceInterval::from_bounds(lower, upper));
    }
    if sv_type != SvType::Ins {
        if let Some((lower, upper)) = record.info_int_pair("CILEN")? {
            return Ok(ConfidenceInterval::new(
                start.start_offset + lower,
                start.width + (upper - lower),
            ));
        }
    }
    Ok(start)
}
