//! Partner resolution and validation
//!
//! Bracket breakends name their mate through PARID/MATEID. Resolution keeps
//! only reciprocal claims, optionally infers the missing side, and the final
//! validation pass enforces that every reported breakpoint is symmetric.

use crate::breakpoint::geometry::BracketBreakend;
use crate::breakpoint::warnings::ExtractionWarning;
use crate::core::{Breakend, BreakendError, BreakendResult, ExtractOptions};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Breakends tagged with the input index of their source record
pub type IndexedBreakend = (usize, Breakend);

/// Outcome of pairing the bracket-notation batch
#[derive(Debug, Default)]
pub struct PairedBrackets {
    pub breakends: Vec<IndexedBreakend>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Link bracket breakends to their mates
///
/// A candidate that names a breakend outside the batch is treated as
/// missing. When two breakends both name the same mate, the one the mate
/// names back keeps the link; the other loses its partner.
pub fn pair_bracket_breakends(
    items: Vec<BracketBreakend>,
    options: &ExtractOptions,
) -> PairedBrackets {
    let ids: HashSet<&str> = items.iter().map(|item| item.breakend.id.as_str()).collect();

    let claims: HashMap<&str, &str> = items
        .iter()
        .filter_map(|item| {
            let id = item.breakend.id.as_str();
            item.mate_candidate
                .as_deref()
                .filter(|mate| *mate != id && ids.contains(mate))
                .map(|mate| (id, mate))
        })
        .collect();

    let multiple_mates: Vec<String> = items
        .iter()
        .filter(|item| item.multiple_mates)
        .map(|item| item.breakend.id.clone())
        .collect();

    let mut non_reciprocal = Vec::new();
    let partners: Vec<Option<String>> = items
        .iter()
        .map(|item| {
            let id = item.breakend.id.as_str();
            let mate = claims.get(id)?;
            if claims.get(mate) == Some(&id) {
                Some(mate.to_string())
            } else {
                non_reciprocal.push(id.to_string());
                None
            }
        })
        .collect();

    let mut unpaired = Vec::new();
    let mut breakends = Vec::with_capacity(items.len());
    for (item, partner) in items.into_iter().zip(partners) {
        let mut breakend = item.breakend;
        match partner {
            Some(partner) => {
                breakend.partner = Some(partner);
                breakends.push((item.index, breakend));
            }
            None if options.unpartnered_breakends => {
                breakends.push((item.index, breakend));
            }
            None if options.infer_missing_breakends => {
                let record_id = breakend.id.clone();
                breakend.id = options.breakend_id(&record_id, 1);

                let mut mate = Breakend {
                    id: options.breakend_id(&record_id, 2),
                    chrom: item.notation.remote_chrom.clone(),
                    pos: item.notation.remote_pos,
                    start: item.notation.remote_pos,
                    end: item.notation.remote_pos,
                    strand: item.notation.remote_strand(),
                    ci: item.remote_ci,
                    ..breakend.clone()
                };
                mate.partner = Some(breakend.id.clone());
                breakend.partner = Some(mate.id.clone());
                debug!("Inferred mate {} for breakend {}", mate.id, record_id);

                breakends.push((item.index, breakend));
                breakends.push((item.index, mate));
            }
            None => unpaired.push(breakend.id),
        }
    }

    let mut warnings = Vec::new();
    if !multiple_mates.is_empty() {
        warnings.push(ExtractionWarning::MultipleMates { ids: multiple_mates });
    }
    if !non_reciprocal.is_empty() {
        warnings.push(ExtractionWarning::NonReciprocalPartners { ids: non_reciprocal });
    }
    if !unpaired.is_empty() {
        warnings.push(ExtractionWarning::UnpairedBreakends { ids: unpaired });
    }

    PairedBrackets { breakends, warnings }
}

fn check_unique_ids(breakends: &[IndexedBreakend]) -> BreakendResult<()> {
    let mut seen = HashSet::with_capacity(breakends.len());
    for (_, breakend) in breakends {
        if !seen.insert(breakend.id.as_str()) {
            return Err(BreakendError::SanityCheck(format!(
                "breakend id {} is not unique",
                breakend.id
            )));
        }
    }
    Ok(())
}

/// Check that every partner exists and points back
fn check_symmetric(breakends: &[IndexedBreakend]) -> BreakendResult<()> {
    let by_id: HashMap<&str, &Breakend> = breakends
        .iter()
        .map(|(_, b)| (b.id.as_str(), b))
        .collect();

    for (_, breakend) in breakends {
        let partner_id = breakend.partner.as_deref().ok_or_else(|| {
            BreakendError::SanityCheck(format!("breakend {} has no partner", breakend.id))
        })?;
        let partner = by_id.get(partner_id).ok_or_else(|| {
            BreakendError::SanityCheck(format!(
                "partner {} of breakend {} is missing",
                partner_id, breakend.id
            ))
        })?;
        if !breakend.is_mate_of(partner) {
            return Err(BreakendError::SanityCheck(format!(
                "breakends {} and {} are not mutual partners",
                breakend.id, partner_id
            )));
        }
    }
    Ok(())
}

/// Final breakpoint validation for paired output
///
/// Duplicate ids, missing partners and partners absent from the output are
/// fatal. Breakends whose partner points elsewhere are dropped with a
/// warning, after which the survivors must be fully symmetric.
pub fn validate_partners(
    breakends: Vec<IndexedBreakend>,
) -> BreakendResult<(Vec<IndexedBreakend>, Option<ExtractionWarning>)> {
    check_unique_ids(&breakends)?;

    let partner_of: HashMap<&str, Option<&str>> = breakends
        .iter()
        .map(|(_, b)| (b.id.as_str(), b.partner.as_deref()))
        .collect();

    let mut dropped = Vec::new();
    for (_, breakend) in &breakends {
        let partner_id = breakend.partner.as_deref().ok_or_else(|| {
            BreakendError::SanityCheck(format!("breakend {} has no partner", breakend.id))
        })?;
        match partner_of.get(partner_id) {
            None => {
                return Err(BreakendError::SanityCheck(format!(
                    "partner {} of breakend {} is missing",
                    partner_id, breakend.id
                )))
            }
            Some(back) if *back != Some(breakend.id.as_str()) => {
                dropped.push(breakend.id.clone())
            }
            Some(_) => {}
        }
    }

    if dropped.is_empty() {
        return Ok((breakends, None));
    }

    let drop_set: HashSet<&str> = dropped.iter().map(|s| s.as_str()).collect();
    let kept: Vec<IndexedBreakend> = breakends
        .iter()
        .filter(|(_, b)| !drop_set.contains(b.id.as_str()))
        .cloned()
        .collect();
    check_symmetric(&kept)?;

    Ok((kept, Some(ExtractionWarning::NonReciprocalPartners { ids: dropped })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::classify::{classify, ClassifiedRecord};
    use crate::breakpoint::geometry::bracket_breakend;
    use crate::core::{Strand, VariantRecord};

    fn bracket(index: usize, record: &VariantRecord) -> BracketBreakend {
        let rec = ClassifiedRecord {
            index,
            id: record.id.clone().unwrap_or_default(),
            record,
            class: classify(record),
        };
        bracket_breakend(&rec, &ExtractOptions::default()).unwrap()
    }

    fn ids(paired: &PairedBrackets) -> Vec<(&str, Option<&str>)> {
        paired
            .breakends
            .iter()
            .map(|(_, b)| (b.id.as_str(), b.partner.as_deref()))
            .collect()
    }

    #[test]
    fn test_reciprocal_pair() {
        let a = VariantRecord::new("chr1", 100, Some("a"), "A", "A[chr2:50[").with_info("MATEID", "b");
        let b = VariantRecord::new("chr2", 50, Some("b"), "C", "]chr1:100]C").with_info("MATEID", "a");
        let paired = pair_bracket_breakends(vec![bracket(0, &a), bracket(1, &b)], &ExtractOptions::default());
        assert_eq!(ids(&paired), vec![("a", Some("b")), ("b", Some("a"))]);
        assert!(paired.warnings.is_empty());
    }

    #[test]
    fn test_reciprocated_claimant_wins() {
        let a = VariantRecord::new("chr1", 100, Some("a"), "A", "A[chr2:50[").with_info("MATEID", "b");
        let b = VariantRecord::new("chr2", 50, Some("b"), "C", "]chr1:100]C").with_info("MATEID", "a");
        let c = VariantRecord::new("chr3", 7, Some("c"), "G", "G[chr2:50[").with_info("MATEID", "b");
        let paired = pair_bracket_breakends(
            vec![bracket(0, &a), bracket(1, &b), bracket(2, &c)],
            &ExtractOptions::default(),
        );
        assert_eq!(ids(&paired), vec![("a", Some("b")), ("b", Some("a"))]);
        assert!(paired
            .warnings
            .contains(&ExtractionWarning::NonReciprocalPartners { ids: vec!["c".into()] }));
        assert!(paired
            .warnings
            .contains(&ExtractionWarning::UnpairedBreakends { ids: vec!["c".into()] }));
    }

    #[test]
    fn test_infer_missing_mate() {
        let a = VariantRecord::new("chr1", 200, Some("a"), "N", "N]chr2:500]");
        let options = ExtractOptions {
            infer_missing_breakends: true,
            ..Default::default()
        };
        let paired = pair_bracket_breakends(vec![bracket(0, &a)], &options);
        assert_eq!(ids(&paired), vec![("a_bp1", Some("a_bp2")), ("a_bp2", Some("a_bp1"))]);
        let mate = &paired.breakends[1].1;
        assert_eq!((mate.chrom.as_str(), mate.pos, mate.strand), ("chr2", 500, Strand::Plus));
        assert_eq!(mate.source_id, "a");
    }

    #[test]
    fn test_unpartnered_keeps_lone_breakend() {
        let a = VariantRecord::new("chr1", 200, Some("a"), "N", "N]chr2:500]").with_info("MATEID", "zz");
        let options = ExtractOptions {
            unpartnered_breakends: true,
            ..Default::default()
        };
        let paired = pair_bracket_breakends(vec![bracket(0, &a)], &options);
        assert_eq!(ids(&paired), vec![("a", None)]);
    }

    fn breakend(id: &str, partner: Option<&str>) -> IndexedBreakend {
        let record = VariantRecord::new("chr1", 1, Some(id), "N", "N[chr1:5[");
        let mut b = bracket(0, &record).breakend;
        b.partner = partner.map(|s| s.to_string());
        (0, b)
    }

    #[test]
    fn test_validate_drops_non_reciprocal() {
        let input = vec![
            breakend("a", Some("b")),
            breakend("b", Some("a")),
            breakend("c", Some("a")),
        ];
        let (kept, warning) = validate_partners(input).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(
            warning,
            Some(ExtractionWarning::NonReciprocalPartners { ids: vec!["c".into()] })
        );
    }

    #[test]
    fn test_validate_fatal_cases() {
        assert!(matches!(
            validate_partners(vec![breakend("a", None)]),
            Err(BreakendError::SanityCheck(_))
        ));
        assert!(matches!(
            validate_partners(vec![breakend("a", Some("x"))]),
            Err(BreakendError::SanityCheck(_))
        ));
        assert!(matches!(
            validate_partners(vec![breakend("a", Some("a")), breakend("a", Some("a"))]),
            Err(BreakendError::SanityCheck(_))
        ));
    }

    #[test]
    fn test_validate_partner_chains() {
        // a -> b -> c -> b: dropping a leaves b <-> c intact
        let input = vec![
            breakend("a", Some("b")),
            breakend("b", Some("c")),
            breakend("c", Some("b")),
        ];
        let (kept, _) = validate_partners(input).unwrap();
        assert_eq!(kept.len(), 2);

        // a -> b -> c -> a: nothing survives symmetric
        let input = vec![
            breakend("a", Some("b")),
            breakend("b", Some("c")),
            breakend("c", Some("a")),
        ];
        let (kept, _) = validate_partners(input).unwrap();
        assert!(kept.is_empty());
    }
}
