//! Breakpoint position alignment
//!
//! Callers report imprecise breakpoints at an arbitrary point inside
//! CIPOS. Centre alignment moves each bracket-notation record to the middle
//! of its interval so that the same event reported by different callers
//! lands on the same base.

use crate::breakpoint::notation::parse_bracket;
use crate::core::dna::unknown_bases;
use crate::core::{BreakendError, BreakendResult, InfoValue, VariantRecord};
use std::collections::HashMap;
use std::str::FromStr;

/// INFO fields holding offsets relative to POS
const RELATIVE_FIELDS: [&str; 3] = ["CIPOS", "CIEND", "IHOMPOS"];

/// Alignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// Move to the midpoint of CIPOS
    #[default]
    Centre,
}

impl FromStr for AlignMode {
    type Err = BreakendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "centre" | "center" => Ok(AlignMode::Centre),
            _ => Err(BreakendError::UnsupportedAlignment(s.to_string())),
        }
    }
}

/// Default ordering of the two sides of a breakpoint: ID greater than MATEID
pub fn id_above_mate(record: &VariantRecord) -> bool {
    match (record.id.as_deref(), record.info_str("MATEID")) {
        (Some(id), Some(mate)) => id > mate,
        _ => false,
    }
}

fn mate_id(record: &VariantRecord) -> Option<&str> {
    record
        .info_str("MATEID")
        .or_else(|| record.info_str("PARID"))
}

/// Centre-align bracket-notation records using [`id_above_mate`]
///
/// # Examples
/// ```
/// use sv_breakends::breakpoint::{align_breakpoints, AlignMode};
/// use sv_breakends::core::VariantRecord;
///
/// let records = vec![
///     VariantRecord::new("chr1", 100, Some("a"), "A", "A[chr2:50[")
///         .with_info("MATEID", "b")
///         .with_info("CIPOS", "0,10"),
///     VariantRecord::new("chr2", 50, Some("b"), "C", "]chr1:100]C")
///         .with_info("MATEID", "a")
///         .with_info("CIPOS", "-4,0"),
/// ];
/// let aligned = align_breakpoints(&records, AlignMode::Centre).unwrap();
/// assert_eq!(aligned[0].pos, 105);
/// assert_eq!(aligned[0].alt(), Some("N[chr2:48["));
/// assert_eq!(aligned[1].pos, 48);
/// ```
pub fn align_breakpoints(
    records: &[VariantRecord],
    mode: AlignMode,
) -> BreakendResult<Vec<VariantRecord>> {
    align_breakpoints_with(records, mode, id_above_mate)
}

/// Centre-align bracket-notation records with a caller-supplied ordering
///
/// `is_higher` decides which side of a same-strand (`++`/`--`) breakpoint
/// rounds its shift up; every other breakend rounds down. Records with any
/// other ALT form pass through unchanged.
pub fn align_breakpoints_with<F>(
    records: &[VariantRecord],
    mode: AlignMode,
    is_higher: F,
) -> BreakendResult<Vec<VariantRecord>>
where
    F: Fn(&VariantRecord) -> bool,
{
    let AlignMode::Centre = mode;

    let mut shifts = Vec::with_capacity(records.len());
    for record in records {
        record.check_position()?;
        let (lower, upper) = record
            .info_int_pair("CIPOS")?
            .ok_or_else(|| BreakendError::MissingConfidenceInterval {
                id: record.display_id(),
            })?;

        let shift = match record.alt().and_then(parse_bracket) {
            Some(bnd) => {
                let sum = lower + upper;
                if is_higher(record) && bnd.local_strand() == bnd.remote_strand() {
                    (sum + 1).div_euclid(2)
                } else {
                    sum.div_euclid(2)
                }
            }
            None => 0,
        };
        shifts.push(shift);
    }

    let by_id: HashMap<&str, i64> = records
        .iter()
        .zip(&shifts)
        .filter_map(|(r, &shift)| r.id.as_deref().map(|id| (id, shift)))
        .collect();

    records
        .iter()
        .zip(&shifts)
        .map(|(record, &shift)| {
            let partner_shift = mate_id(record)
                .and_then(|mate| by_id.get(mate).copied())
                .unwrap_or(0);
            shift_record(record, shift, partner_shift)
        })
        .collect()
}

fn shift_record(
    record: &VariantRecord,
    shift: i64,
    partner_shift: i64,
) -> BreakendResult<VariantRecord> {
    let mut out = record.clone();
    let mut bnd = match record.alt().and_then(parse_bracket) {
        Some(bnd) => bnd,
        None => return Ok(out),
    };

    out.pos += shift;
    for field in RELATIVE_FIELDS {
        if let Some((lower, upper)) = record.info_int_pair(field)? {
            out.set_info(
                field,
                InfoValue::Values(vec![
                    (lower - shift).to_string(),
                    (upper - shift).to_string(),
                ]),
            );
        }
    }

    bnd.remote_pos += partner_shift;
    if shift != 0 {
        bnd.mask_anchor(record.ref_allele.len());
        out.ref_allele = unknown_bases(record.ref_allele.len());
    }
    out.alt_alleles = vec![bnd.to_alt()];
    Ok(out)
}
