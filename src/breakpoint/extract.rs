//! Breakpoint extraction entry points
//!
//! Records are validated, given stable ids, classified into disjoint
//! batches and handed to the geometry engine. Bracket breakends then go
//! through partner resolution, and the combined output is validated and
//! ordered by source record.

use crate::breakpoint::classify::{
    classify, is_structural, root_type_tag, ClassifiedRecord, Partition, RecordClass,
};
use crate::breakpoint::geometry::{
    bracket_breakend, inversion, map_batch, plain_indel, simple_symbolic, single_breakend,
    translocation,
};
use crate::breakpoint::partner::{pair_bracket_breakends, validate_partners, IndexedBreakend};
use crate::breakpoint::warnings::{ExtractionStats, ExtractionWarning};
use crate::core::{Breakend, BreakendError, BreakendResult, ExtractOptions, VariantRecord};
use log::{debug, info, warn};
use rayon::ThreadPool;
use std::collections::HashSet;

/// Result of a successful extraction
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Breakends ordered by source record, then breakend number
    pub breakends: Vec<Breakend>,
    pub warnings: Vec<ExtractionWarning>,
    pub stats: ExtractionStats,
}

/// Reject multi-allelic input before anything else is computed
fn check_single_alt(records: &[VariantRecord]) -> BreakendResult<()> {
    match records.iter().find(|r| r.alt_alleles.len() > 1) {
        Some(record) => Err(BreakendError::MultipleAlts {
            id: record.display_id(),
            count: record.alt_alleles.len(),
        }),
        None => Ok(()),
    }
}

fn usable_id(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty() && *id != ".")
}

/// Assign every structural record a unique id
///
/// The first occurrence of an id keeps it. Missing and repeated ids become
/// `{placeholder}{index + 1}`, with `_N` appended while that collides with
/// any other id. Bracket and single breakends are named by their record id,
/// so a record whose suffixed breakend ids would reuse one of those ids is
/// renamed the same way. The result depends only on record order, raw ids
/// and classes.
pub fn assign_record_ids(
    records: &[VariantRecord],
    structural: &[(usize, RecordClass)],
    options: &ExtractOptions,
) -> (Vec<String>, Option<ExtractionWarning>) {
    let raw_id = |index: usize| usable_id(records[index].id.as_deref());
    let mut taken: HashSet<String> = structural
        .iter()
        .filter_map(|(i, _)| raw_id(*i))
        .map(|id| id.to_string())
        .collect();
    let verbatim: HashSet<&str> = structural
        .iter()
        .filter(|(_, class)| class.keeps_record_id())
        .filter_map(|(i, _)| raw_id(*i))
        .collect();
    let shadows_verbatim = |id: &str, class: &RecordClass| {
        (1..=class.suffixed_breakends())
            .any(|n| verbatim.contains(options.breakend_id(id, n).as_str()))
    };

    let mut claimed: HashSet<&str> = HashSet::with_capacity(structural.len());
    let mut renamed = Vec::new();

    let ids = structural
        .iter()
        .map(|(index, class)| {
            let raw = raw_id(*index);
            if let Some(id) = raw {
                if !shadows_verbatim(id, class) && claimed.insert(id) {
                    return id.to_string();
                }
            }

            let base = format!("{}{}", options.placeholder_name, index + 1);
            let mut candidate = base.clone();
            let mut n = 1;
            while taken.contains(&candidate) || shadows_verbatim(&candidate, class) {
                candidate = format!("{}_{}", base, n);
                n += 1;
            }
            taken.insert(candidate.clone());
            renamed.push((raw.unwrap_or(".").to_string(), candidate.clone()));
            candidate
        })
        .collect();

    let warning = if renamed.is_empty() {
        None
    } else {
        Some(ExtractionWarning::RenamedRecords { ids: renamed })
    };
    (ids, warning)
}

fn build_pool(threads: usize) -> Option<ThreadPool> {
    if threads <= 1 {
        return None;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("Failed to create thread pool ({}), running sequentially", e);
            None
        }
    }
}

fn unrecognized_error(rec: &ClassifiedRecord) -> BreakendError {
    BreakendError::UnrecognizedFormat {
        id: rec.id.clone(),
        svtype: root_type_tag(rec.record).unwrap_or_else(|| ".".to_string()),
        alt: rec.record.alt().unwrap_or(".").to_string(),
    }
}

type GeometryFn = fn(&ClassifiedRecord, &ExtractOptions) -> BreakendResult<Vec<Breakend>>;

/// Run one geometry family over its batch, tagging breakends with record index
fn run_batch(
    pool: Option<&ThreadPool>,
    batch: &[ClassifiedRecord],
    options: &ExtractOptions,
    geometry: GeometryFn,
) -> BreakendResult<Vec<IndexedBreakend>> {
    let per_record = map_batch(pool, batch, |rec| geometry(rec, options))?;
    Ok(batch
        .iter()
        .zip(per_record)
        .flat_map(|(rec, breakends)| breakends.into_iter().map(move |b| (rec.index, b)))
        .collect())
}

/// Convert SV records into breakpoints: pairs of mutually partnered breakends
///
/// With `options.unpartnered_breakends` set, only breakends lacking a
/// partner are reported instead (see [`extract_breakends`]).
///
/// Any fatal condition aborts the whole conversion without partial output.
///
/// # Examples
/// ```
/// use sv_breakends::breakpoint::extract_breakpoints;
/// use sv_breakends::core::{ExtractOptions, Strand, VariantRecord};
///
/// let records = vec![
///     VariantRecord::new("chr1", 100, Some("del1"), "N", "<DEL>").with_info("SVLEN", "-50"),
/// ];
/// let out = extract_breakpoints(&records, &ExtractOptions::default()).unwrap();
/// assert_eq!(out.breakends.len(), 2);
/// assert_eq!((out.breakends[0].pos, out.breakends[0].strand), (100, Strand::Plus));
/// assert_eq!((out.breakends[1].pos, out.breakends[1].strand), (151, Strand::Minus));
/// ```
pub fn extract_breakpoints(
    records: &[VariantRecord],
    options: &ExtractOptions,
) -> BreakendResult<Extraction> {
    check_single_alt(records)?;

    let mut stats = ExtractionStats {
        total: records.len(),
        ..Default::default()
    };
    let mut warnings = Vec::new();

    let structural: Vec<(usize, RecordClass)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| is_structural(r))
        .map(|(i, r)| (i, classify(r)))
        .collect();
    stats.structural = structural.len();

    let (ids, renamed) = assign_record_ids(records, &structural, options);
    warnings.extend(renamed);

    let mut partition = Partition::default();
    for ((index, class), id) in structural.into_iter().zip(ids) {
        let record = &records[index];
        record.check_position()?;
        partition.push(ClassifiedRecord {
            index,
            id,
            record,
            class,
        });
    }

    stats.ignored = partition.ignored.len();
    for rec in &partition.ignored {
        debug!("Ignoring non-breakpoint record {}", rec.id);
    }

    if let Some(rec) = partition.unrecognized.first() {
        if !options.ignore_unknown_symbolic_alleles {
            return Err(unrecognized_error(rec));
        }
    }
    stats.unrecognized = partition.unrecognized.len();
    for rec in &partition.unrecognized {
        debug!("Dropping unrecognized record: {}", unrecognized_error(rec));
    }

    let pool = build_pool(options.threads);
    let pool = pool.as_ref();

    let mut breakends: Vec<IndexedBreakend> = Vec::new();
    breakends.extend(run_batch(pool, &partition.plain_indels, options, plain_indel)?);
    breakends.extend(run_batch(pool, &partition.simple, options, simple_symbolic)?);
    breakends.extend(run_batch(pool, &partition.inversions, options, inversion)?);
    breakends.extend(run_batch(pool, &partition.translocations, options, translocation)?);
    breakends.extend(run_batch(
        pool,
        &partition.unoriented_translocations,
        options,
        translocation,
    )?);

    let brackets = map_batch(pool, &partition.bracket_breakends, |rec| {
        bracket_breakend(rec, options)
    })?;
    let paired = pair_bracket_breakends(brackets, options);
    breakends.extend(paired.breakends);
    warnings.extend(paired.warnings);

    let singles = map_batch(pool, &partition.single_breakends, |rec| {
        single_breakend(rec, options)
    })?;
    if options.unpartnered_breakends {
        breakends.extend(partition.single_breakends.iter().map(|r| r.index).zip(singles));
    } else if !singles.is_empty() {
        warnings.push(ExtractionWarning::SingleBreakendsDropped {
            ids: singles.into_iter().map(|b| b.id).collect(),
        });
    }

    // Stable: keeps per-record emission order
    breakends.sort_by_key(|(index, _)| *index);

    let breakends = if options.unpartnered_breakends {
        breakends
            .into_iter()
            .filter(|(_, b)| b.partner.is_none())
            .collect()
    } else {
        let (kept, dropped) = validate_partners(breakends)?;
        warnings.extend(dropped);
        kept
    };

    let breakends: Vec<Breakend> = breakends
        .into_iter()
        .map(|(_, mut b)| {
            b.set_interval(options.nominal_position);
            b
        })
        .collect();
    stats.breakends = breakends.len();

    for warning in &warnings {
        warn!("{}", warning);
    }
    info!(
        "Extracted {} breakends from {} structural records ({} total, {} ignored, {} unrecognized)",
        stats.breakends, stats.structural, stats.total, stats.ignored, stats.unrecognized
    );

    Ok(Extraction {
        breakends,
        warnings,
        stats,
    })
}

/// Convert SV records into breakends that have no partner
///
/// Single breakends and bracket breakends whose mate is absent are
/// reported; anything that forms a breakpoint is left out.
pub fn extract_breakends(
    records: &[VariantRecord],
    options: &ExtractOptions,
) -> BreakendResult<Extraction> {
    let options = ExtractOptions {
        unpartnered_breakends: true,
        ..options.clone()
    };
    extract_breakpoints(records, &options)
}
