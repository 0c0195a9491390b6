//! DNA sequence utilities
//!
//! Small helpers shared by the classifier, the geometry engine and the
//! position aligner.

/// Placeholder base written where the true reference base is unknown
pub const UNKNOWN_BASE: char = 'N';

/// Check if a byte is an IUPAC ambiguity code (anything but A, C, G, T)
///
/// # Examples
/// ```
/// use sv_breakends::core::dna::is_ambiguity_code;
///
/// assert!(is_ambiguity_code(b'N'));
/// assert!(is_ambiguity_code(b'r'));
/// assert!(!is_ambiguity_code(b'A'));
/// assert!(!is_ambiguity_code(b'<'));
/// ```
#[inline]
pub fn is_ambiguity_code(base: u8) -> bool {
    matches!(
        base.to_ascii_uppercase(),
        b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'V' | b'D' | b'H' | b'N'
    )
}

/// Length of the longest common prefix of two alleles, ignoring case
///
/// # Examples
/// ```
/// use sv_breakends::core::dna::common_prefix_len;
///
/// assert_eq!(common_prefix_len("ACGT", "A"), 1);
/// assert_eq!(common_prefix_len("acg", "ACGTT"), 3);
/// assert_eq!(common_prefix_len("T", "GAA"), 0);
/// ```
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}

/// A run of placeholder bases of the given length
pub fn unknown_bases(len: usize) -> String {
    std::iter::repeat(UNKNOWN_BASE).take(len).collect()
}
