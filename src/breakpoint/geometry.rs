//! Breakpoint geometry
//!
//! One function per SV family. Each turns a classified record into its
//! breakends: 1-based locus, strand, confidence interval, inserted sequence
//! and SV length. Bracket-notation records produce a single breakend plus
//! the information partner resolution needs; every other family links its
//! own mates.

use crate::breakpoint::classify::ClassifiedRecord;
use crate::breakpoint::confidence::{end_interval, homology_length, start_interval};
use crate::breakpoint::notation::{parse_bracket, parse_single, BracketNotation};
use crate::core::dna::common_prefix_len;
use crate::core::{
    Breakend, BreakendError, BreakendResult, ConfidenceInterval, ExtractOptions, Strand, SvType,
};
use rayon::prelude::*;
use rayon::ThreadPool;

/// INFO flag marking a breakend whose local orientation is not known
pub const IMPRECISE_DIRECTION_FLAG: &str = "IMPRECISEDIRECTION";

/// Map `f` over a batch, in parallel when a pool is given
///
/// Results keep batch order. When several records fail, the error of the
/// earliest one is returned regardless of scheduling.
pub(crate) fn map_batch<'a, T, F>(
    pool: Option<&ThreadPool>,
    batch: &[ClassifiedRecord<'a>],
    f: F,
) -> BreakendResult<Vec<T>>
where
    T: Send,
    F: Fn(&ClassifiedRecord<'a>) -> BreakendResult<T> + Sync + Send,
{
    let results: Vec<BreakendResult<T>> = match pool {
        Some(pool) => pool.install(|| batch.par_iter().map(|rec| f(rec)).collect()),
        None => batch.iter().map(|rec| f(rec)).collect(),
    };
    results.into_iter().collect()
}

/// Breakend at `chrom:pos` carrying the record's shared annotations
fn new_breakend(
    rec: &ClassifiedRecord,
    options: &ExtractOptions,
    id: String,
    chrom: &str,
    pos: i64,
    strand: Strand,
    ci: ConfidenceInterval,
) -> BreakendResult<Breakend> {
    let record = rec.record;
    let info = options
        .info_columns
        .iter()
        .map(|key| (key.clone(), record.info_value(key).cloned()))
        .collect();

    Ok(Breakend {
        id,
        source_id: rec.id.clone(),
        chrom: chrom.to_string(),
        pos,
        start: pos,
        end: pos,
        strand,
        ci,
        ref_allele: record.ref_allele.clone(),
        alt_allele: record.alt().unwrap_or(".").to_string(),
        sv_type: rec.sv_type(),
        sv_len: None,
        ins_seq: String::new(),
        ins_len: 0,
        hom_len: homology_length(record)?.unwrap_or(0),
        partner: None,
        event: record.info_str("EVENT").map(|s| s.to_string()),
        info,
    })
}

fn link(a: &mut Breakend, b: &mut Breakend) {
    a.partner = Some(b.id.clone());
    b.partner = Some(a.id.clone());
}

/// Literal REF/ALT indel
///
/// ```text
/// POS=100 REF=ACGT ALT=A    ->  100(+) / 104(-), svLen -3
/// POS=100 REF=A    ALT=AGG  ->  100(+) / 101(-), svLen 2, insSeq GG
/// ```
pub fn plain_indel(rec: &ClassifiedRecord, options: &ExtractOptions) -> BreakendResult<Vec<Breakend>> {
    let record = rec.record;
    let alt = record.alt().unwrap_or("");
    let prefix = common_prefix_len(&record.ref_allele, alt);
    let p = prefix as i64;
    let ref_len = record.ref_allele.len() as i64;
    let alt_len = alt.len() as i64;

    let left_pos = record.pos - 1 + p;
    let right_pos = left_pos + ref_len - p + 1;

    let start_ci = start_interval(record)?;
    let end_ci = end_interval(record, start_ci, rec.sv_type())?;

    let mut left = new_breakend(
        rec,
        options,
        options.breakend_id(&rec.id, 1),
        &record.chrom,
        left_pos,
        Strand::Plus,
        start_ci,
    )?;
    left.ins_seq = alt.get(prefix..).unwrap_or("").to_string();
    left.ins_len = alt_len - p;
    left.sv_len = Some(alt_len - ref_len);

    let mut right = Breakend {
        id: options.breakend_id(&rec.id, 2),
        pos: right_pos,
        start: right_pos,
        end: right_pos,
        strand: Strand::Minus,
        ci: end_ci,
        ..left.clone()
    };
    link(&mut left, &mut right);
    Ok(vec![left, right])
}

/// Signed SV length from SVLEN, falling back to END - POS
fn sv_length(rec: &ClassifiedRecord) -> BreakendResult<i64> {
    let record = rec.record;
    if let Some(len) = record.info_int("SVLEN")? {
        return Ok(len);
    }
    match record.info_int("END")? {
        Some(end) if rec.sv_type() == SvType::Del => Ok(-(end - record.pos)),
        Some(end) => Ok(end - record.pos),
        None => Err(BreakendError::MissingSvLength { id: rec.id.clone() }),
    }
}

/// Symbolic `<DEL>`, `<INS>`, `<DUP>`, `<RPL>` and `<UNK>`
pub fn simple_symbolic(
    rec: &ClassifiedRecord,
    options: &ExtractOptions,
) -> BreakendResult<Vec<Breakend>> {
    let record = rec.record;
    let sv_type = rec.sv_type();
    let sv_len = sv_length(rec)?;
    let end = if sv_type == SvType::Ins {
        record.pos
    } else {
        record.pos + sv_len.abs()
    };

    let ((left_pos, left_strand), (right_pos, right_strand)) = match sv_type {
        SvType::Dup => ((record.pos + 1, Strand::Minus), (end, Strand::Plus)),
        SvType::Unk => ((record.pos + 1, Strand::Unknown), (end, Strand::Unknown)),
        _ => ((record.pos, Strand::Plus), (end + 1, Strand::Minus)),
    };

    let ins_len = match record.info_int("NTLEN")? {
        Some(len) => len,
        None if sv_type == SvType::Ins => sv_len.abs(),
        None => 0,
    };

    let start_ci = start_interval(record)?;
    let end_ci = end_interval(record, start_ci, sv_type)?;

    let mut left = new_breakend(
        rec,
        options,
        options.breakend_id(&rec.id, 1),
        &record.chrom,
        left_pos,
        left_strand,
        start_ci,
    )?;
    left.sv_len = Some(sv_len);
    left.ins_len = ins_len;

    let mut right = Breakend {
        id: options.breakend_id(&rec.id, 2),
        pos: right_pos,
        start: right_pos,
        end: right_pos,
        strand: right_strand,
        ci: end_ci,
        ..left.clone()
    };
    link(&mut left, &mut right);
    Ok(vec![left, right])
}

/// Symbolic `<INV>`: two breakpoints, one at each end of the inverted segment
///
/// `INV3` and `INV5` (DELLY/Manta) restrict the output to the breakpoint
/// the caller observed; a record carrying both flags keeps all four.
pub fn inversion(rec: &ClassifiedRecord, options: &ExtractOptions) -> BreakendResult<Vec<Breakend>> {
    let record = rec.record;
    let sv_len = sv_length(rec)?;
    let end = record.pos + sv_len.abs();

    let start_ci = start_interval(record)?;
    let end_ci = end_interval(record, start_ci, SvType::Inv)?;

    let make = |n: usize, pos: i64, strand: Strand, ci: ConfidenceInterval| {
        new_breakend(
            rec,
            options,
            options.breakend_id(&rec.id, n),
            &record.chrom,
            pos,
            strand,
            ci,
        )
        .map(|mut b| {
            b.sv_len = Some(sv_len);
            b
        })
    };

    let mut bp1 = make(1, record.pos + 1, Strand::Minus, start_ci)?;
    let mut bp2 = make(2, record.pos, Strand::Plus, start_ci)?;
    let mut bp3 = make(3, end + 1, Strand::Minus, end_ci)?;
    let mut bp4 = make(4, end, Strand::Plus, end_ci)?;
    link(&mut bp1, &mut bp3);
    link(&mut bp2, &mut bp4);

    let inv3 = record.has_info("INV3");
    let inv5 = record.has_info("INV5");
    let keep_minus = !inv3 || inv5;
    let keep_plus = !inv5 || inv3;

    let mut out = Vec::with_capacity(4);
    if keep_minus {
        out.push(bp1);
    }
    if keep_plus {
        out.push(bp2);
    }
    if keep_minus {
        out.push(bp3);
    }
    if keep_plus {
        out.push(bp4);
    }
    Ok(out)
}

/// A bracket-notation breakend awaiting partner resolution
#[derive(Debug, Clone)]
pub struct BracketBreakend {
    /// Input index of the source record
    pub index: usize,
    pub breakend: Breakend,
    pub notation: BracketNotation,
    /// PARID, else the first MATEID
    pub mate_candidate: Option<String>,
    /// MATEID listed more than one id
    pub multiple_mates: bool,
    /// Interval used if the remote breakend has to be inferred
    pub remote_ci: ConfidenceInterval,
}

/// Bracket-notation `t[p[`, `t]p]`, `]p]t`, `[p[t`
pub fn bracket_breakend(
    rec: &ClassifiedRecord,
    options: &ExtractOptions,
) -> BreakendResult<BracketBreakend> {
    let record = rec.record;
    let alt = record.alt().unwrap_or("");
    let notation = parse_bracket(alt).ok_or_else(|| BreakendError::UnrecognizedFormat {
        id: rec.id.clone(),
        svtype: SvType::Bnd.to_string(),
        alt: alt.to_string(),
    })?;

    let local_strand = notation.local_strand();
    let strand = if record.has_info(IMPRECISE_DIRECTION_FLAG) {
        Strand::Unknown
    } else {
        local_strand
    };

    let start_ci = start_interval(record)?;
    let remote_ci = end_interval(record, start_ci, SvType::Bnd)?;

    let mut breakend = new_breakend(
        rec,
        options,
        rec.id.clone(),
        &record.chrom,
        record.pos,
        strand,
        start_ci,
    )?;
    breakend.ins_seq = notation.inserted_sequence(record.ref_allele.len());
    breakend.ins_len = breakend.ins_seq.len() as i64;

    if notation.remote_chrom == record.chrom {
        let distance = (record.pos - notation.remote_pos).abs() - 1;
        let deletion_like = (record.pos < notation.remote_pos
            && local_strand == Strand::Plus
            && notation.remote_strand() == Strand::Minus)
            || (record.pos > notation.remote_pos
                && local_strand == Strand::Minus
                && notation.remote_strand() == Strand::Plus);
        let signed = if deletion_like { -distance } else { distance };
        breakend.sv_len = Some(signed + breakend.ins_len);
    }

    let mate_ids = record.info_strs("MATEID");
    let par_id = record.info_str("PARID");
    let mate_candidate = par_id
        .or_else(|| mate_ids.first().copied())
        .map(|s| s.to_string());

    Ok(BracketBreakend {
        index: rec.index,
        breakend,
        notation,
        mate_candidate,
        multiple_mates: par_id.is_none() && mate_ids.len() > 1,
        remote_ci,
    })
}

/// Single breakend in dot notation, never partnered
pub fn single_breakend(rec: &ClassifiedRecord, options: &ExtractOptions) -> BreakendResult<Breakend> {
    let record = rec.record;
    let alt = record.alt().unwrap_or("");
    let notation =
        parse_single(alt, record.ref_allele.len()).ok_or_else(|| BreakendError::UnrecognizedFormat {
            id: rec.id.clone(),
            svtype: SvType::Bnd.to_string(),
            alt: alt.to_string(),
        })?;

    let mut breakend = new_breakend(
        rec,
        options,
        rec.id.clone(),
        &record.chrom,
        record.pos,
        notation.strand,
        start_interval(record)?,
    )?;
    breakend.ins_len = notation.inserted.len() as i64;
    breakend.ins_seq = notation.inserted;
    Ok(breakend)
}

fn connection_strands(rec: &ClassifiedRecord, value: &str) -> BreakendResult<(Strand, Strand)> {
    match value {
        "3to3" => Ok((Strand::Plus, Strand::Plus)),
        "3to5" => Ok((Strand::Plus, Strand::Minus)),
        "5to3" => Ok((Strand::Minus, Strand::Plus)),
        "5to5" => Ok((Strand::Minus, Strand::Minus)),
        _ => Err(BreakendError::InvalidConnectionType {
            id: rec.id.clone(),
            value: value.to_string(),
        }),
    }
}

/// Caller-specific `TRA` (with CT) and `CTX` (without orientation)
///
/// The remote locus is `CHR2:END`.
pub fn translocation(rec: &ClassifiedRecord, options: &ExtractOptions) -> BreakendResult<Vec<Breakend>> {
    let record = rec.record;
    let sv_type = rec.sv_type();
    let type_name = if sv_type == SvType::Tra { "TRA" } else { "CTX" };
    let missing = |field: &'static str| BreakendError::MissingInfoField {
        id: rec.id.clone(),
        svtype: type_name,
        field,
    };

    let chr2 = record.info_str("CHR2").ok_or_else(|| missing("CHR2"))?;
    let end = record.info_int("END")?.ok_or_else(|| missing("END"))?;
    let (local_strand, remote_strand) = if sv_type == SvType::Tra {
        let ct = record.info_str("CT").ok_or_else(|| missing("CT"))?;
        connection_strands(rec, ct)?
    } else {
        (Strand::Unknown, Strand::Unknown)
    };

    let start_ci = start_interval(record)?;
    let end_ci = end_interval(record, start_ci, sv_type)?;

    let mut left = new_breakend(
        rec,
        options,
        options.breakend_id(&rec.id, 1),
        &record.chrom,
        record.pos,
        local_strand,
        start_ci,
    )?;
    let mut right = new_breakend(
        rec,
        options,
        options.breakend_id(&rec.id, 2),
        chr2,
        end,
        remote_strand,
        end_ci,
    )?;
    link(&mut left, &mut right);
    Ok(vec![left, right])
}
