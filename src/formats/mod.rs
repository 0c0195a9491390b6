//! File format adapters
//!
//! VCF input/output and the breakend table writer.

pub mod table;
pub mod vcf;

pub use table::{format_row, write_breakend_table, TABLE_COLUMNS};
pub use vcf::{parse_info, read_vcf, write_vcf, VcfFile, VcfRecordView};
