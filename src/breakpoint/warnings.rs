//! Recoverable extraction outcomes and run statistics

use std::fmt;

/// A data adjustment made instead of failing
///
/// Every variant carries the affected record or breakend ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionWarning {
    /// Records with a missing or duplicated ID, as `(original, assigned)`
    RenamedRecords { ids: Vec<(String, String)> },
    /// Breakends listing more than one MATEID; only the first was used
    MultipleMates { ids: Vec<String> },
    /// Bracket breakends without a partner, dropped
    UnpairedBreakends { ids: Vec<String> },
    /// Breakends whose partner does not point back, dropped or unlinked
    NonReciprocalPartners { ids: Vec<String> },
    /// Single breakends, dropped because breakpoints were requested
    SingleBreakendsDropped { ids: Vec<String> },
}

impl ExtractionWarning {
    /// Number of records or breakends affected
    pub fn len(&self) -> usize {
        match self {
            ExtractionWarning::RenamedRecords { ids } => ids.len(),
            ExtractionWarning::MultipleMates { ids }
            | ExtractionWarning::UnpairedBreakends { ids }
            | ExtractionWarning::NonReciprocalPartners { ids }
            | ExtractionWarning::SingleBreakendsDropped { ids } => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn preview(ids: &[String]) -> String {
    const SHOWN: usize = 5;
    let mut text = ids.iter().take(SHOWN).cloned().collect::<Vec<_>>().join(", ");
    if ids.len() > SHOWN {
        text.push_str(&format!(", ... ({} more)", ids.len() - SHOWN));
    }
    text
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::RenamedRecords { ids } => {
                let renamed: Vec<String> = ids
                    .iter()
                    .map(|(from, to)| format!("{} -> {}", from, to))
                    .collect();
                write!(
                    f,
                    "{} records with missing or duplicated ID renamed: {}",
                    ids.len(),
                    preview(&renamed)
                )
            }
            ExtractionWarning::MultipleMates { ids } => write!(
                f,
                "{} breakends list multiple MATEIDs, using the first: {}",
                ids.len(),
                preview(ids)
            ),
            ExtractionWarning::UnpairedBreakends { ids } => write!(
                f,
                "{} breakends have no partner and were dropped: {}",
                ids.len(),
                preview(ids)
            ),
            ExtractionWarning::NonReciprocalPartners { ids } => write!(
                f,
                "{} breakends reference a partner that does not point back: {}",
                ids.len(),
                preview(ids)
            ),
            ExtractionWarning::SingleBreakendsDropped { ids } => write!(
                f,
                "{} single breakends dropped (no partner possible): {}",
                ids.len(),
                preview(ids)
            ),
        }
    }
}

/// Record and breakend counts for one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Input records
    pub total: usize,
    /// Records describing structural change
    pub structural: usize,
    /// CNV, NON_REF and similar records skipped on purpose
    pub ignored: usize,
    /// Records dropped because no rule understands them
    pub unrecognized: usize,
    /// Breakends returned
    pub breakends: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_truncates() {
        let ids: Vec<String> = (1..=7).map(|i| format!("bnd{}", i)).collect();
        let w = ExtractionWarning::UnpairedBreakends { ids };
        assert_eq!(
            w.to_string(),
            "7 breakends have no partner and were dropped: bnd1, bnd2, bnd3, bnd4, bnd5, ... (2 more)"
        );
        assert_eq!(w.len(), 7);
    }

    #[test]
    fn test_display_renamed() {
        let w = ExtractionWarning::RenamedRecords {
            ids: vec![(".".into(), "svrecord1".into())],
        };
        assert_eq!(
            w.to_string(),
            "1 records with missing or duplicated ID renamed: . -> svrecord1"
        );
    }
}
