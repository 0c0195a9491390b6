//! Property-based tests for the VCF text layer
//!
//! **Property 6: VCF fields survive parsing and writing unchanged**

use proptest::prelude::*;
use std::io::Write;
use sv_breakends::formats::vcf::{read_vcf, write_vcf, VcfRecordView};
use sv_breakends::{extract_breakpoints, write_breakend_table, ExtractOptions};
use tempfile::NamedTempFile;

/// Generate a valid chromosome name
fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("chrY".to_string()),
    ]
}

/// Generate a valid VCF ID field
fn arb_vcf_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        "[a-zA-Z][a-zA-Z0-9_]{0,10}".prop_map(|s| format!("sv_{}", s)),
    ]
}

/// Generate an SV ALT allele in one of the common notations
fn arb_sv_alt() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<DEL>".to_string()),
        Just("<DUP:TANDEM>".to_string()),
        Just("<INV>".to_string()),
        "[ACGT]{2,8}".prop_map(|s| s),
        (1u32..1_000_000).prop_map(|p| format!("N[chr3:{}[", p)),
        (1u32..1_000_000).prop_map(|p| format!("]chr3:{}]N", p)),
        Just("N.".to_string()),
    ]
}

/// Generate a QUAL field
fn arb_qual() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        (0u32..1000).prop_map(|n| n.to_string()),
    ]
}

/// Generate a FILTER field
fn arb_filter() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("PASS".to_string()),
        Just("q10;s50".to_string()),
    ]
}

/// Generate an INFO field
fn arb_info() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        (1i64..10_000).prop_map(|n| format!("SVTYPE=DEL;SVLEN=-{}", n)),
        (1i64..50, 1i64..50).prop_map(|(a, b)| format!("CIPOS=-{},{};IMPRECISE", a, b)),
        Just("MATEID=x,y;HOMSEQ=ACG".to_string()),
    ]
}

/// Generate a VCF data line with optional samples
fn arb_vcf_line() -> impl Strategy<Value = String> {
    (
        arb_chrom_name(),
        1u32..100_000_000,
        arb_vcf_id(),
        arb_sv_alt(),
        arb_qual(),
        arb_filter(),
        arb_info(),
        prop::option::of(prop::collection::vec("[01]/[01]:[0-9]{1,3}", 1..4)),
    )
        .prop_map(|(chrom, pos, id, alt, qual, filter, info, samples)| {
            let mut line = format!(
                "{}\t{}\t{}\tN\t{}\t{}\t{}\t{}",
                chrom, pos, id, alt, qual, filter, info
            );
            if let Some(samples) = samples {
                line.push_str("\tGT:DP");
                for s in samples {
                    line.push('\t');
                    line.push_str(&s);
                }
            }
            line
        })
}

proptest! {
    /// **Property 6: VCF fields survive parsing and writing unchanged**
    #[test]
    fn prop_vcf_line_round_trip(line in arb_vcf_line()) {
        let record = VcfRecordView::parse(line.as_bytes(), 1)
            .unwrap()
            .to_record()
            .unwrap();
        prop_assert_eq!(record.to_vcf_line(), line);
    }

    /// CHROM and POS are parsed eagerly and exactly
    #[test]
    fn prop_vcf_coordinate_parsing(line in arb_vcf_line()) {
        let view = VcfRecordView::parse(line.as_bytes(), 1).unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        prop_assert_eq!(view.chrom, fields[0]);
        prop_assert_eq!(view.pos.to_string(), fields[1]);
        prop_assert_eq!(view.field_count(), fields.len());
    }
}

const SAMPLE_VCF: &str = "##fileformat=VCFv4.2
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\tdel1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-50;CIPOS=-5,5
chr2\t321682\tbnd_V\tT\t]chr13:123456]T\t6\tPASS\tSVTYPE=BND;MATEID=bnd_U
chr13\t123456\tbnd_U\tC\tC[chr2:321682[\t6\tPASS\tSVTYPE=BND;MATEID=bnd_V
chr1\t5000\t.\tA\tG\t.\tPASS\t.
";

#[test]
fn test_read_plain_vcf() -> anyhow::Result<()> {
    let mut temp = NamedTempFile::new()?;
    temp.write_all(SAMPLE_VCF.as_bytes())?;
    temp.flush()?;

    let vcf = read_vcf(temp.path(), 1)?;
    assert_eq!(vcf.header_lines.len(), 3);
    assert_eq!(vcf.records.len(), 4);
    assert_eq!(vcf.records[3].id, None);
    Ok(())
}

#[test]
fn test_read_gzip_vcf_parallel() -> anyhow::Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut temp = tempfile::Builder::new().suffix(".vcf.gz").tempfile()?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(SAMPLE_VCF.as_bytes())?;
    temp.write_all(&encoder.finish()?)?;
    temp.flush()?;

    let sequential = read_vcf(temp.path(), 1)?;
    let parallel = read_vcf(temp.path(), 3)?;
    assert_eq!(sequential.records, parallel.records);
    assert_eq!(parallel.records[1].alt(), Some("]chr13:123456]T"));
    Ok(())
}

#[test]
fn test_malformed_line_reports_line_number() -> anyhow::Result<()> {
    let mut temp = NamedTempFile::new()?;
    writeln!(temp, "##fileformat=VCFv4.2")?;
    writeln!(temp, "chr1\t100\tx\tN")?;
    temp.flush()?;

    let err = read_vcf(temp.path(), 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Too few fields at line 2: expected at least 8, found 4"
    );
    Ok(())
}

#[test]
fn test_vcf_to_breakend_table() -> anyhow::Result<()> {
    let mut temp = NamedTempFile::new()?;
    temp.write_all(SAMPLE_VCF.as_bytes())?;
    temp.flush()?;

    let vcf = read_vcf(temp.path(), 1)?;
    let out = extract_breakpoints(&vcf.records, &ExtractOptions::default())?;
    let ids: Vec<&str> = out.breakends.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["del1_bp1", "del1_bp2", "bnd_V", "bnd_U"]);

    let mut buffer = Vec::new();
    write_breakend_table(&mut buffer, &out.breakends, &[])?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(text.lines().count(), 5);
    assert!(text
        .lines()
        .any(|l| l == "bnd_V\tchr2\t321682\t321682\t-\tT\t]chr13:123456]T\tBND\t.\t.\t0\t0\tbnd_U\t."));
    Ok(())
}

#[test]
fn test_write_vcf_keeps_headers() -> anyhow::Result<()> {
    let mut temp = NamedTempFile::new()?;
    temp.write_all(SAMPLE_VCF.as_bytes())?;
    temp.flush()?;

    let vcf = read_vcf(temp.path(), 1)?;
    let mut buffer = Vec::new();
    write_vcf(&mut buffer, &vcf.header_lines, &vcf.records)?;
    assert_eq!(String::from_utf8(buffer)?, SAMPLE_VCF);
    Ok(())
}
