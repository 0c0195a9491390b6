//! Tab-separated breakend table

use crate::core::{Breakend, InfoValue};
use std::io::{self, Write};

/// Fixed columns, in output order
pub const TABLE_COLUMNS: [&str; 14] = [
    "id", "chrom", "start", "end", "strand", "ref", "alt", "svtype", "svlen", "insseq", "inslen",
    "homlen", "partner", "event",
];

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        "."
    } else {
        value
    }
}

fn format_info(value: &Option<InfoValue>) -> String {
    match value {
        None => ".".to_string(),
        Some(InfoValue::Flag) => "true".to_string(),
        Some(values) => or_missing(&values.to_info_string()).to_string(),
    }
}

/// Format one breakend as a table row
pub fn format_row(breakend: &Breakend) -> String {
    let mut row = String::with_capacity(256);

    row.push_str(&breakend.id);
    row.push('\t');
    row.push_str(&breakend.chrom);
    row.push('\t');
    row.push_str(&breakend.start.to_string());
    row.push('\t');
    row.push_str(&breakend.end.to_string());
    row.push('\t');
    row.push(breakend.strand.to_char());
    row.push('\t');
    row.push_str(or_missing(&breakend.ref_allele));
    row.push('\t');
    row.push_str(or_missing(&breakend.alt_allele));
    row.push('\t');
    row.push_str(breakend.sv_type.as_str());
    row.push('\t');
    match breakend.sv_len {
        Some(len) => row.push_str(&len.to_string()),
        None => row.push('.'),
    }
    row.push('\t');
    row.push_str(or_missing(&breakend.ins_seq));
    row.push('\t');
    row.push_str(&breakend.ins_len.to_string());
    row.push('\t');
    row.push_str(&breakend.hom_len.to_string());
    row.push('\t');
    row.push_str(breakend.partner.as_deref().unwrap_or("."));
    row.push('\t');
    row.push_str(breakend.event.as_deref().unwrap_or("."));

    for (_, value) in &breakend.info {
        row.push('\t');
        row.push_str(&format_info(value));
    }
    row
}

/// Write a header row and one row per breakend
pub fn write_breakend_table<W: Write>(
    writer: &mut W,
    breakends: &[Breakend],
    info_columns: &[String],
) -> io::Result<()> {
    let mut header = TABLE_COLUMNS.join("\t");
    for column in info_columns {
        header.push('\t');
        header.push_str(column);
    }
    writeln!(writer, "{}", header)?;

    for breakend in breakends {
        writeln!(writer, "{}", format_row(breakend))?;
    }
    writer.flush()
}
