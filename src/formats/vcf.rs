//! VCF text layer
//!
//! Splits data lines with memchr, converts them into [`VariantRecord`]s and
//! writes records back out. Header lines are kept verbatim.

use crate::core::io::{open_input, LineIterator};
use crate::core::{InfoValue, VariantRecord, VcfParseError, VcfResult};
use memchr::memchr;
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;

/// Lines per parallel parsing chunk
const CHUNK_SIZE: usize = 10_000;

/// Number of fixed VCF columns (CHROM through INFO)
const FIXED_COLUMNS: usize = 8;

/// Zero-copy view of a VCF data line
/// Only CHROM and POS are parsed eagerly, other fields stay as byte ranges
pub struct VcfRecordView<'a> {
    line: &'a [u8],
    /// 1-based line number, for error messages
    line_no: usize,
    pub chrom: &'a str,
    /// Position (1-based)
    pub pos: i64,
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> VcfRecordView<'a> {
    /// Split a data line on tabs
    pub fn parse(line: &'a [u8], line_no: usize) -> VcfResult<Self> {
        if line.is_empty() {
            return Err(VcfParseError::EmptyLine);
        }

        let mut field_bounds = Vec::with_capacity(10);
        let mut start = 0;
        while let Some(tab) = memchr(b'\t', &line[start..]) {
            field_bounds.push((start, start + tab));
            start += tab + 1;
        }
        field_bounds.push((start, line.len()));

        if field_bounds.len() < FIXED_COLUMNS {
            return Err(VcfParseError::TooFewFields {
                line: line_no,
                expected: FIXED_COLUMNS,
                found: field_bounds.len(),
            });
        }

        let chrom = std::str::from_utf8(&line[field_bounds[0].0..field_bounds[0].1])
            .map_err(|_| VcfParseError::InvalidUtf8 { line: line_no, field: "CHROM" })?;

        let pos_str = std::str::from_utf8(&line[field_bounds[1].0..field_bounds[1].1])
            .map_err(|_| VcfParseError::InvalidUtf8 { line: line_no, field: "POS" })?;
        let pos: i64 = pos_str.parse().map_err(|_| VcfParseError::InvalidNumber {
            line: line_no,
            field: "POS",
            value: pos_str.to_string(),
        })?;

        Ok(Self {
            line,
            line_no,
            chrom,
            pos,
            field_bounds,
        })
    }

    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    fn field(&self, index: usize, name: &'static str) -> VcfResult<&'a str> {
        let (start, end) = self.field_bounds[index];
        std::str::from_utf8(&self.line[start..end]).map_err(|_| VcfParseError::InvalidUtf8 {
            line: self.line_no,
            field: name,
        })
    }

    pub fn id(&self) -> VcfResult<&'a str> {
        self.field(2, "ID")
    }

    pub fn ref_allele(&self) -> VcfResult<&'a str> {
        self.field(3, "REF")
    }

    pub fn alt_alleles(&self) -> VcfResult<&'a str> {
        self.field(4, "ALT")
    }

    pub fn info(&self) -> VcfResult<&'a str> {
        self.field(7, "INFO")
    }

    /// Build an owned record
    pub fn to_record(&self) -> VcfResult<VariantRecord> {
        let id = self.id()?;
        let mut record =
            VariantRecord::new(self.chrom, self.pos, missing_as_none(id), self.ref_allele()?, self.alt_alleles()?);
        record.qual = missing_as_none(self.field(5, "QUAL")?).map(|s| s.to_string());
        record.filter = missing_as_none(self.field(6, "FILTER")?).map(|s| s.to_string());
        record.info = parse_info(self.info()?);
        record.sample_columns = (FIXED_COLUMNS..self.field_count())
            .map(|i| self.field(i, "SAMPLE").map(|s| s.to_string()))
            .collect::<VcfResult<Vec<_>>>()?;
        Ok(record)
    }
}

fn missing_as_none(value: &str) -> Option<&str> {
    if value.is_empty() || value == "." {
        None
    } else {
        Some(value)
    }
}

/// Parse an INFO column into ordered entries; keys without `=` are flags
pub fn parse_info(info: &str) -> Vec<(String, InfoValue)> {
    if info.is_empty() || info == "." {
        return Vec::new();
    }
    info.split(';')
        .filter(|item| !item.is_empty())
        .map(|item| match item.find('=') {
            Some(eq) => (item[..eq].to_string(), InfoValue::parse(&item[eq + 1..])),
            None => (item.to_string(), InfoValue::Flag),
        })
        .collect()
}

/// Header lines and records of a VCF file
#[derive(Debug, Clone, Default)]
pub struct VcfFile {
    /// `##` meta lines and the `#CHROM` line, verbatim
    pub header_lines: Vec<String>,
    pub records: Vec<VariantRecord>,
}

fn parse_lines(lines: &[(usize, String)]) -> VcfResult<Vec<VariantRecord>> {
    lines
        .iter()
        .map(|(line_no, line)| VcfRecordView::parse(line.as_bytes(), *line_no)?.to_record())
        .collect()
}

/// Read a plain or gzip-compressed VCF
///
/// With `threads > 1` data lines are parsed in parallel chunks; record order
/// is preserved. Any malformed data line is an error.
pub fn read_vcf<P: AsRef<Path>>(path: P, threads: usize) -> VcfResult<VcfFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(VcfParseError::FileNotFound(path.to_path_buf()));
    }

    let mut lines = LineIterator::new(open_input(path)?);
    let mut header_lines = Vec::new();
    let mut data_lines = Vec::new();
    let mut line_no = 0;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_no += 1;
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            header_lines.push(line.to_string());
        } else {
            data_lines.push((line_no, line.to_string()));
        }
    }

    let records = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| {
                VcfParseError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to create thread pool: {}", e),
                ))
            })?;
        let chunks: Vec<VcfResult<Vec<VariantRecord>>> =
            pool.install(|| data_lines.par_chunks(CHUNK_SIZE).map(parse_lines).collect());
        let mut records = Vec::with_capacity(data_lines.len());
        for chunk in chunks {
            records.extend(chunk?);
        }
        records
    } else {
        parse_lines(&data_lines)?
    };

    log::debug!(
        "Read {} header lines and {} records from {}",
        header_lines.len(),
        records.len(),
        path.display()
    );

    Ok(VcfFile {
        header_lines,
        records,
    })
}

/// Write header lines followed by one line per record
pub fn write_vcf<W: Write>(
    writer: &mut W,
    header_lines: &[String],
    records: &[VariantRecord],
) -> std::io::Result<()> {
    for header in header_lines {
        writeln!(writer, "{}", header)?;
    }
    for record in records {
        writeln!(writer, "{}", record.to_vcf_line())?;
    }
    writer.flush()
}
