//! Extraction options

/// Default prefix for generated record ids
pub const DEFAULT_PLACEHOLDER_NAME: &str = "svrecord";

/// Default breakend id suffix, followed by a 1-based breakend number
pub const DEFAULT_SUFFIX: &str = "_bp";

/// Options controlling breakpoint extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Report only the nominal position instead of the CI-widened interval
    pub nominal_position: bool,
    /// Prefix for ids generated for records with a missing or duplicated ID
    pub placeholder_name: String,
    /// Suffix placed between a record id and the breakend number
    pub suffix: String,
    /// INFO fields copied onto every breakend
    pub info_columns: Vec<String>,
    /// Report breakends lacking a partner instead of breakpoints
    pub unpartnered_breakends: bool,
    /// Synthesise the mate of a bracket-notation breakend without one
    pub infer_missing_breakends: bool,
    /// Drop records no rule understands instead of failing
    pub ignore_unknown_symbolic_alleles: bool,
    /// Worker threads for per-type batches (1 = sequential)
    pub threads: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            nominal_position: false,
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            info_columns: Vec::new(),
            unpartnered_breakends: false,
            infer_missing_breakends: false,
            ignore_unknown_symbolic_alleles: false,
            threads: 1,
        }
    }
}

impl ExtractOptions {
    /// Breakend id: record id, suffix, 1-based breakend number
    pub fn breakend_id(&self, record_id: &str, n: usize) -> String {
        format!("{}{}{}", record_id, self.suffix, n)
    }
}
