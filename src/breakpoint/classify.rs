//! SV classification
//!
//! Every structural record lands in exactly one [`RecordClass`]. The
//! partition is computed once, before any geometry runs, so each geometry
//! branch sees a disjoint batch.

use crate::breakpoint::notation::{parse_bracket, parse_single};
use crate::core::{SvType, VariantRecord};

/// ALT value used by gVCF for the reference-block gap allele
pub const NON_REF_ALLELE: &str = "<NON_REF>";

/// True if the ALT uses angle-bracket, breakend or single-breakend notation
pub fn is_symbolic(record: &VariantRecord) -> bool {
    record
        .alt()
        .map(|alt| alt.contains(['<', '[', ']', '.']))
        .unwrap_or(false)
}

/// True for records describing structural change
///
/// Missing ALTs, the gVCF `<NON_REF>` allele and same-length literal
/// substitutions are not structural.
pub fn is_structural(record: &VariantRecord) -> bool {
    match record.alt() {
        None => false,
        Some(NON_REF_ALLELE) => false,
        Some(alt) => is_symbolic(record) || alt.len() != record.ref_allele.len(),
    }
}

fn is_breakend_alt(alt: &str) -> bool {
    alt.contains(['[', ']']) || (alt.len() > 1 && (alt.starts_with('.') || alt.ends_with('.')))
}

/// Root SV type tag: SVTYPE, else the symbolic ALT, with `:subtype` removed
///
/// # Examples
/// ```
/// use sv_breakends::breakpoint::root_type_tag;
/// use sv_breakends::core::VariantRecord;
///
/// let r = VariantRecord::new("chr1", 1, None, "A", "<DUP:TANDEM>");
/// assert_eq!(root_type_tag(&r).as_deref(), Some("DUP"));
///
/// let r = VariantRecord::new("chr1", 1, None, "A", "A[chr2:5[").with_info("SVTYPE", "TRA");
/// assert_eq!(root_type_tag(&r).as_deref(), Some("BND"));
/// ```
pub fn root_type_tag(record: &VariantRecord) -> Option<String> {
    let alt = record.alt().unwrap_or("");
    if is_breakend_alt(alt) {
        return Some("BND".to_string());
    }

    let tag = match record.info_str("SVTYPE") {
        Some(svtype) => svtype,
        None if alt.len() > 2 && alt.starts_with('<') && alt.ends_with('>') => &alt[1..alt.len() - 1],
        None if alt.len() == 1 => alt,
        None => return None,
    };

    Some(tag.split(':').next().unwrap_or(tag).to_string())
}

/// Geometry family a record belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordClass {
    /// CNV/NON_REF/`*`/ambiguity codes and `SVCLAIM=D`
    Ignored,
    /// Literal REF/ALT of different lengths
    PlainIndel,
    /// `t[p[` style ALT
    BracketBreakend,
    /// `t.` / `.t` ALT
    SingleBreakend,
    /// Symbolic DEL/INS/DUP/RPL/UNK
    Simple(SvType),
    Inversion,
    /// DELLY-style TRA with a CT orientation code
    Translocation,
    /// CTX, no orientation
    UnorientedTranslocation,
    /// No rule applies
    Unrecognized,
}

impl RecordClass {
    /// Breakend id is the record id itself
    pub fn keeps_record_id(&self) -> bool {
        matches!(self, RecordClass::BracketBreakend | RecordClass::SingleBreakend)
    }

    /// Number of breakends named `{record id}{suffix}{n}`
    pub fn suffixed_breakends(&self) -> usize {
        match self {
            RecordClass::PlainIndel
            | RecordClass::Simple(_)
            | RecordClass::Translocation
            | RecordClass::UnorientedTranslocation => 2,
            RecordClass::Inversion => 4,
            _ => 0,
        }
    }
}

/// Classify a structural record
pub fn classify(record: &VariantRecord) -> RecordClass {
    let tag = root_type_tag(record);
    let sv_type = tag.as_deref().and_then(SvType::from_tag);

    if sv_type == Some(SvType::Ignored) || record.info_str("SVCLAIM") == Some("D") {
        return RecordClass::Ignored;
    }
    if !is_symbolic(record) {
        return RecordClass::PlainIndel;
    }

    let alt = record.alt().unwrap_or("");
    if parse_bracket(alt).is_some() {
        return RecordClass::BracketBreakend;
    }
    if parse_single(alt, record.ref_allele.len()).is_some() {
        return RecordClass::SingleBreakend;
    }

    match sv_type {
        Some(t @ (SvType::Del | SvType::Ins | SvType::Dup | SvType::Rpl | SvType::Unk)) => {
            RecordClass::Simple(t)
        }
        Some(SvType::Inv) => RecordClass::Inversion,
        Some(SvType::Tra) => RecordClass::Translocation,
        Some(SvType::Ctx) => RecordClass::UnorientedTranslocation,
        _ => RecordClass::Unrecognized,
    }
}

/// A structural record with its stable id and class
#[derive(Debug, Clone)]
pub struct ClassifiedRecord<'a> {
    /// Position of the record in the input
    pub index: usize,
    pub id: String,
    pub record: &'a VariantRecord,
    pub class: RecordClass,
}

impl<'a> ClassifiedRecord<'a> {
    /// SV type reported on the record's breakends
    pub fn sv_type(&self) -> SvType {
        match &self.class {
            RecordClass::Simple(t) => *t,
            RecordClass::Inversion => SvType::Inv,
            RecordClass::Translocation => SvType::Tra,
            RecordClass::UnorientedTranslocation => SvType::Ctx,
            RecordClass::BracketBreakend | RecordClass::SingleBreakend => SvType::Bnd,
            RecordClass::PlainIndel => root_type_tag(self.record)
                .as_deref()
                .and_then(SvType::from_tag)
                .unwrap_or(SvType::Indel),
            RecordClass::Ignored => SvType::Ignored,
            RecordClass::Unrecognized => SvType::Unk,
        }
    }
}

/// Disjoint per-class batches
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub ignored: Vec<ClassifiedRecord<'a>>,
    pub plain_indels: Vec<ClassifiedRecord<'a>>,
    pub bracket_breakends: Vec<ClassifiedRecord<'a>>,
    pub single_breakends: Vec<ClassifiedRecord<'a>>,
    pub simple: Vec<ClassifiedRecord<'a>>,
    pub inversions: Vec<ClassifiedRecord<'a>>,
    pub translocations: Vec<ClassifiedRecord<'a>>,
    pub unoriented_translocations: Vec<ClassifiedRecord<'a>>,
    pub unrecognized: Vec<ClassifiedRecord<'a>>,
}

impl<'a> Partition<'a> {
    pub fn push(&mut self, record: ClassifiedRecord<'a>) {
        let bucket = match record.class {
            RecordClass::Ignored => &mut self.ignored,
            RecordClass::PlainIndel => &mut self.plain_indels,
            RecordClass::BracketBreakend => &mut self.bracket_breakends,
            RecordClass::SingleBreakend => &mut self.single_breakends,
            RecordClass::Simple(_) => &mut self.simple,
            RecordClass::Inversion => &mut self.inversions,
            RecordClass::Translocation => &mut self.translocations,
            RecordClass::UnorientedTranslocation => &mut self.unoriented_translocations,
            RecordClass::Unrecognized => &mut self.unrecognized,
        };
        bucket.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ref_allele: &str, alt: &str) -> VariantRecord {
        VariantRecord::new("chr1", 100, Some("r"), ref_allele, alt)
    }

    #[test]
    fn test_is_symbolic() {
        assert!(is_symbolic(&rec("A", "<DEL>")));
        assert!(is_symbolic(&rec("A", "A[chr1:5[")));
        assert!(is_symbolic(&rec("A", "A.")));
        assert!(!is_symbolic(&rec("A", "ACGT")));
    }

    #[test]
    fn test_is_structural() {
        assert!(!is_structural(&rec("A", "G")));
        assert!(!is_structural(&rec("A", "<NON_REF>")));
        assert!(!is_structural(&rec("A", ".")));
        assert!(is_structural(&rec("A", "AG")));
        assert!(is_structural(&rec("A", "<INV>")));
        assert!(is_structural(&rec("A", ".A")));
    }

    #[test]
    fn test_classify_families() {
        assert_eq!(classify(&rec("ACGT", "A")), RecordClass::PlainIndel);
        assert_eq!(classify(&rec("A", "<DEL>")), RecordClass::Simple(SvType::Del));
        assert_eq!(classify(&rec("A", "<DUP:TANDEM>")), RecordClass::Simple(SvType::Dup));
        assert_eq!(classify(&rec("A", "<INV>")), RecordClass::Inversion);
        assert_eq!(classify(&rec("A", "A]chr2:5]")), RecordClass::BracketBreakend);
        assert_eq!(classify(&rec("A", "A.")), RecordClass::SingleBreakend);
        assert_eq!(classify(&rec("A", "<CNV>")), RecordClass::Ignored);
        assert_eq!(classify(&rec("A", "<*>")), RecordClass::Ignored);
        assert_eq!(classify(&rec("AT", "N")), RecordClass::Ignored);
        assert_eq!(classify(&rec("A", "<CPX>")), RecordClass::Unrecognized);
        assert_eq!(classify(&rec("A", "<BND>")), RecordClass::Unrecognized);
    }

    #[test]
    fn test_classify_caller_specific() {
        let tra = rec("A", "<TRA>").with_info("SVTYPE", "TRA");
        assert_eq!(classify(&tra), RecordClass::Translocation);
        let ctx = rec("A", "<CTX>");
        assert_eq!(classify(&ctx), RecordClass::UnorientedTranslocation);
    }

    #[test]
    fn test_svclaim_abundance_is_ignored() {
        let r = rec("A", "<DEL>").with_info("SVCLAIM", "D");
        assert_eq!(classify(&r), RecordClass::Ignored);
        let r = rec("A", "<DEL>").with_info("SVCLAIM", "DJ");
        assert_eq!(classify(&r), RecordClass::Simple(SvType::Del));
    }

    #[test]
    fn test_svtype_overrides_alt_tag() {
        let r = rec("A", "<DEL>").with_info("SVTYPE", "DUP");
        assert_eq!(classify(&r), RecordClass::Simple(SvType::Dup));
    }

    #[test]
    fn test_plain_indel_type() {
        let r = rec("ACGT", "A");
        let c = ClassifiedRecord { index: 0, id: "r".into(), record: &r, class: classify(&r) };
        assert_eq!(c.sv_type(), SvType::Indel);

        let r = rec("ACGT", "A").with_info("SVTYPE", "DEL");
        let c = ClassifiedRecord { index: 0, id: "r".into(), record: &r, class: classify(&r) };
        assert_eq!(c.sv_type(), SvType::Del);
    }
}
