//! Structured VCF record consumed by the breakpoint engine
//!
//! A [`VariantRecord`] is what an external VCF reader hands over: the fixed
//! columns plus an ordered INFO list. Typed accessors interpret INFO values
//! on demand, so optional fields stay `Option` until a geometry rule asks
//! for them.

use crate::core::error::{BreakendError, BreakendResult};

/// Largest magnitude accepted for positions and integer INFO values
///
/// Far beyond any assembled chromosome, and small enough that sums of a few
/// coordinates, lengths and interval bounds stay within `i64`.
pub const MAX_COORDINATE: i64 = 1 << 40;

/// Value of a single INFO entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    /// Key present without `=value`
    Flag,
    /// Comma-separated values; `.` marks a missing component
    Values(Vec<String>),
}

impl InfoValue {
    /// Parse the right-hand side of `KEY=value`
    pub fn parse(value: &str) -> Self {
        InfoValue::Values(value.split(',').map(|s| s.to_string()).collect())
    }

    /// Render as it appears in a VCF INFO column (flags render empty)
    pub fn to_info_string(&self) -> String {
        match self {
            InfoValue::Flag => String::new(),
            InfoValue::Values(values) => values.join(","),
        }
    }
}

/// One VCF data line, already split into columns
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based position
    pub pos: i64,
    /// Record ID; `None` when the column is `.`
    pub id: Option<String>,
    pub ref_allele: String,
    /// ALT alleles; empty when the column is `.`
    pub alt_alleles: Vec<String>,
    pub qual: Option<String>,
    pub filter: Option<String>,
    /// INFO entries in file order
    pub info: Vec<(String, InfoValue)>,
    /// FORMAT and sample columns, passed through untouched
    pub sample_columns: Vec<String>,
}

impl VariantRecord {
    /// Create a record with a single ALT allele and empty INFO
    pub fn new(chrom: &str, pos: i64, id: Option<&str>, ref_allele: &str, alt: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            id: id.map(|s| s.to_string()),
            ref_allele: ref_allele.to_string(),
            alt_alleles: if alt.is_empty() || alt == "." {
                Vec::new()
            } else {
                alt.split(',').map(|s| s.to_string()).collect()
            },
            qual: None,
            filter: None,
            info: Vec::new(),
            sample_columns: Vec::new(),
        }
    }

    /// Builder-style INFO setter, `KEY=value`
    pub fn with_info(mut self, key: &str, value: &str) -> Self {
        self.set_info(key, InfoValue::parse(value));
        self
    }

    /// Builder-style INFO flag setter
    pub fn with_flag(mut self, key: &str) -> Self {
        self.set_info(key, InfoValue::Flag);
        self
    }

    /// The single ALT allele, or `None` when ALT is missing
    ///
    /// Callers are expected to have rejected multi-allelic records first.
    pub fn alt(&self) -> Option<&str> {
        self.alt_alleles.first().map(|s| s.as_str())
    }

    /// Identifier used in error messages before ids are normalised
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}:{}", self.chrom, self.pos),
        }
    }

    /// Fail unless POS lies within `[0, MAX_COORDINATE]`
    pub fn check_position(&self) -> BreakendResult<()> {
        if (0..=MAX_COORDINATE).contains(&self.pos) {
            Ok(())
        } else {
            Err(BreakendError::PositionOutOfRange {
                id: self.display_id(),
                pos: self.pos,
            })
        }
    }

    /// Raw INFO entry
    pub fn info_value(&self, key: &str) -> Option<&InfoValue> {
        self.info.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace an INFO entry, keeping its position if present
    pub fn set_info(&mut self, key: &str, value: InfoValue) {
        match self.info.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.info.push((key.to_string(), value)),
        }
    }

    /// True when the INFO field is present as a flag or with any value
    pub fn has_info(&self, key: &str) -> bool {
        self.info_value(key).is_some()
    }

    /// All non-missing values of a string INFO field
    pub fn info_strs(&self, key: &str) -> Vec<&str> {
        match self.info_value(key) {
            Some(InfoValue::Values(values)) => values
                .iter()
                .map(|s| s.as_str())
                .filter(|s| !s.is_empty() && *s != ".")
                .collect(),
            _ => Vec::new(),
        }
    }

    /// First non-missing value of a string INFO field
    pub fn info_str(&self, key: &str) -> Option<&str> {
        self.info_strs(key).into_iter().next()
    }

    /// First value of an integer INFO field
    pub fn info_int(&self, key: &str) -> BreakendResult<Option<i64>> {
        match self.info_str(key) {
            Some(value) => parse_int(self, key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Two-valued integer INFO field such as CIPOS
    ///
    /// Missing, `.` or single-valued fields yield `None`; non-numeric values
    /// are an error.
    pub fn info_int_pair(&self, key: &str) -> BreakendResult<Option<(i64, i64)>> {
        let values = match self.info_value(key) {
            Some(InfoValue::Values(values)) => values,
            _ => return Ok(None),
        };
        if values.len() < 2 || values[..2].iter().any(|v| v.is_empty() || v == ".") {
            return Ok(None);
        }
        let lower = parse_int(self, key, &values[0])?;
        let upper = parse_int(self, key, &values[1])?;
        Ok(Some((lower, upper)))
    }

    /// Serialise back to a tab-separated VCF data line
    pub fn to_vcf_line(&self) -> String {
        let mut output = String::with_capacity(256);

        output.push_str(&self.chrom);
        output.push('\t');
        output.push_str(&self.pos.to_string());
        output.push('\t');
        output.push_str(self.id.as_deref().unwrap_or("."));
        output.push('\t');
        output.push_str(&self.ref_allele);
        output.push('\t');
        if self.alt_alleles.is_empty() {
            output.push('.');
        } else {
            output.push_str(&self.alt_alleles.join(","));
        }
        output.push('\t');
        output.push_str(self.qual.as_deref().unwrap_or("."));
        output.push('\t');
        output.push_str(self.filter.as_deref().unwrap_or("."));
        output.push('\t');

        if self.info.is_empty() {
            output.push('.');
        } else {
            let info: Vec<String> = self
                .info
                .iter()
                .map(|(key, value)| match value {
                    InfoValue::Flag => key.clone(),
                    InfoValue::Values(_) => format!("{}={}", key, value.to_info_string()),
                })
                .collect();
            output.push_str(&info.join(";"));
        }

        for column in &self.sample_columns {
            output.push('\t');
            output.push_str(column);
        }

        output
    }
}

fn parse_int(record: &VariantRecord, key: &str, value: &str) -> BreakendResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|v| (-MAX_COORDINATE..=MAX_COORDINATE).contains(v))
        .ok_or_else(|| BreakendError::InvalidInfoValue {
            id: record.display_id(),
            field: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_accessors() {
        let record = VariantRecord::new("chr1", 100, Some("sv1"), "A", "<DEL>")
            .with_info("SVLEN", "-50")
            .with_info("CIPOS", "-5,5")
            .with_info("MATEID", "a,b")
            .with_flag("IMPRECISE");

        assert_eq!(record.info_int("SVLEN").unwrap(), Some(-50));
        assert_eq!(record.info_int_pair("CIPOS").unwrap(), Some((-5, 5)));
        assert_eq!(record.info_strs("MATEID"), vec!["a", "b"]);
        assert_eq!(record.info_str("MATEID"), Some("a"));
        assert!(record.has_info("IMPRECISE"));
        assert_eq!(record.info_int("END").unwrap(), None);
    }

    #[test]
    fn test_missing_components() {
        let record = VariantRecord::new("chr1", 100, None, "A", "<DEL>")
            .with_info("SVLEN", ".")
            .with_info("CIPOS", "-5,.");
        assert_eq!(record.info_int("SVLEN").unwrap(), None);
        assert_eq!(record.info_int_pair("CIPOS").unwrap(), None);
    }

    #[test]
    fn test_invalid_int_is_error() {
        let record = VariantRecord::new("chr1", 100, Some("x"), "A", "<DEL>").with_info("SVLEN", "abc");
        assert!(matches!(
            record.info_int("SVLEN"),
            Err(BreakendError::InvalidInfoValue { .. })
        ));
    }

    #[test]
    fn test_out_of_range_int_is_error() {
        let record = VariantRecord::new("chr1", 100, Some("x"), "A", "<DEL>")
            .with_info("SVLEN", "-9223372036854775808")
            .with_info("CIPOS", "-5,2000000000000")
            .with_info("END", &MAX_COORDINATE.to_string());
        assert_eq!(
            record.info_int("SVLEN"),
            Err(BreakendError::InvalidInfoValue {
                id: "x".into(),
                field: "SVLEN".into(),
                value: "-9223372036854775808".into(),
            })
        );
        assert!(record.info_int_pair("CIPOS").is_err());
        assert_eq!(record.info_int("END").unwrap(), Some(MAX_COORDINATE));
    }

    #[test]
    fn test_check_position() {
        let record = VariantRecord::new("chr1", 0, Some("x"), "A", "<DEL>");
        assert!(record.check_position().is_ok());
        let record = VariantRecord::new("chr1", i64::MAX, Some("x"), "A", "<DEL>");
        assert_eq!(
            record.check_position(),
            Err(BreakendError::PositionOutOfRange { id: "x".into(), pos: i64::MAX })
        );
        let record = VariantRecord::new("chr1", -1, Some("x"), "A", "<DEL>");
        assert!(record.check_position().is_err());
    }

    #[test]
    fn test_missing_alt() {
        let record = VariantRecord::new("chr1", 100, None, "A", ".");
        assert!(record.alt_alleles.is_empty());
        assert_eq!(record.alt(), None);
        assert_eq!(record.display_id(), "chr1:100");
    }

    #[test]
    fn test_to_vcf_line() {
        let record = VariantRecord::new("chr1", 100, Some("sv1"), "A", "<DEL>")
            .with_info("SVTYPE", "DEL")
            .with_flag("IMPRECISE");
        assert_eq!(
            record.to_vcf_line(),
            "chr1\t100\tsv1\tA\t<DEL>\t.\t.\tSVTYPE=DEL;IMPRECISE"
        );
    }

    #[test]
    fn test_set_info_replaces_in_place() {
        let mut record = VariantRecord::new("chr1", 1, None, "A", "<DEL>")
            .with_info("A", "1")
            .with_info("B", "2");
        record.set_info("A", InfoValue::parse("3"));
        assert_eq!(record.info[0], ("A".to_string(), InfoValue::parse("3")));
        assert_eq!(record.info.len(), 2);
    }
}
