//! Breakend notation parsing
//!
//! Decomposes the two textual breakend forms found in VCF ALT columns:
//!
//! ```text
//! bracket form   t[p[   t]p]   ]p]t   [p[t     (pre BRACKET chrom:pos BRACKET post)
//! dot form       t.     .t                      (single breakend)
//! ```
//!
//! Malformed input yields `None`; callers route such records elsewhere.

use crate::core::dna::unknown_bases;
use crate::core::{Strand, MAX_COORDINATE};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BRACKET_RE: Regex = Regex::new(
        r"^(?P<pre>[^\[\]]*)(?P<bracket1>[\[\]])(?P<contig>[^\[\]]+):(?P<pos>\d+)(?P<bracket2>[\[\]])(?P<post>[^\[\]]*)$"
    )
    .unwrap();
}

/// Bracket character of a breakend ALT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `[`: the joined sequence extends to the right of the remote position
    Open,
    /// `]`: the joined sequence extends to the left of the remote position
    Close,
}

impl Bracket {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "[" => Some(Bracket::Open),
            "]" => Some(Bracket::Close),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Bracket::Open => '[',
            Bracket::Close => ']',
        }
    }

    /// Orientation of the remote breakend
    pub fn remote_strand(&self) -> Strand {
        match self {
            Bracket::Open => Strand::Minus,
            Bracket::Close => Strand::Plus,
        }
    }
}

/// A parsed `pre BRACKET chrom:pos BRACKET post` ALT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketNotation {
    pub pre: String,
    pub bracket: Bracket,
    pub remote_chrom: String,
    pub remote_pos: i64,
    pub post: String,
}

impl BracketNotation {
    /// Orientation at the local position, as written in the ALT
    pub fn local_strand(&self) -> Strand {
        if self.pre.is_empty() {
            Strand::Minus
        } else {
            Strand::Plus
        }
    }

    pub fn remote_strand(&self) -> Strand {
        self.bracket.remote_strand()
    }

    /// Bases between the anchor and the bracket
    ///
    /// The anchor is the REF-length run adjacent to the local position: the
    /// start of `pre`, or the end of `post`.
    pub fn inserted_sequence(&self, ref_len: usize) -> String {
        let pre = self.pre.get(ref_len.min(self.pre.len())..).unwrap_or("");
        let post = self
            .post
            .get(..self.post.len().saturating_sub(ref_len))
            .unwrap_or("");
        format!("{}{}", pre, post)
    }

    /// Replace the REF-length anchor with unknown bases
    pub fn mask_anchor(&mut self, ref_len: usize) {
        if self.pre.is_empty() {
            let keep = self.post.len().saturating_sub(ref_len);
            let masked = self.post.len() - keep;
            self.post = format!("{}{}", self.post.get(..keep).unwrap_or(""), unknown_bases(masked));
        } else {
            let masked = ref_len.min(self.pre.len());
            self.pre = format!("{}{}", unknown_bases(masked), self.pre.get(masked..).unwrap_or(""));
        }
    }

    /// Render back to ALT text
    pub fn to_alt(&self) -> String {
        let b = self.bracket.as_char();
        format!(
            "{}{}{}:{}{}{}",
            self.pre, b, self.remote_chrom, self.remote_pos, b, self.post
        )
    }
}

/// Parse bracket notation; `None` when the ALT is not a well-formed breakend
///
/// # Examples
/// ```
/// use sv_breakends::breakpoint::notation::{parse_bracket, Bracket};
/// use sv_breakends::core::Strand;
///
/// let bnd = parse_bracket("N]chr2:500]").unwrap();
/// assert_eq!(bnd.local_strand(), Strand::Plus);
/// assert_eq!(bnd.bracket, Bracket::Close);
/// assert_eq!(bnd.remote_chrom, "chr2");
/// assert_eq!(bnd.remote_pos, 500);
/// assert!(parse_bracket("N]chr2:abc]").is_none());
/// ```
pub fn parse_bracket(alt: &str) -> Option<BracketNotation> {
    let caps = BRACKET_RE.captures(alt)?;
    let bracket = Bracket::from_str(caps.name("bracket1")?.as_str())?;
    if Bracket::from_str(caps.name("bracket2")?.as_str())? != bracket {
        return None;
    }
    let pre = caps.name("pre")?.as_str();
    let post = caps.name("post")?.as_str();
    // Exactly one side carries the local bases
    if !pre.is_empty() && !post.is_empty() {
        return None;
    }
    let remote_pos = caps
        .name("pos")?
        .as_str()
        .parse::<i64>()
        .ok()
        .filter(|pos| *pos <= MAX_COORDINATE)?;

    Some(BracketNotation {
        pre: pre.to_string(),
        bracket,
        remote_chrom: caps.name("contig")?.as_str().to_string(),
        remote_pos,
        post: post.to_string(),
    })
}

/// A parsed single-breakend ALT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleNotation {
    pub strand: Strand,
    pub inserted: String,
}

/// Parse single-breakend dot notation (`t.` or `.t`)
///
/// # Examples
/// ```
/// use sv_breakends::breakpoint::notation::parse_single;
/// use sv_breakends::core::Strand;
///
/// let sgl = parse_single("AGGT.", 1).unwrap();
/// assert_eq!(sgl.strand, Strand::Plus);
/// assert_eq!(sgl.inserted, "GGT");
///
/// let sgl = parse_single(".TCA", 1).unwrap();
/// assert_eq!(sgl.strand, Strand::Minus);
/// assert_eq!(sgl.inserted, "TC");
/// ```
pub fn parse_single(alt: &str, ref_len: usize) -> Option<SingleNotation> {
    if alt.len() < 2 || alt.contains(['[', ']', '<', '>']) {
        return None;
    }
    let leading = alt.starts_with('.');
    let trailing = alt.ends_with('.');

    match (leading, trailing) {
        (false, true) => {
            let bases = &alt[..alt.len() - 1];
            let inserted = bases.get(ref_len.min(bases.len())..).unwrap_or("");
            Some(SingleNotation {
                strand: Strand::Plus,
                inserted: inserted.to_string(),
            })
        }
        (true, false) => {
            let bases = &alt[1..];
            let inserted = bases
                .get(..bases.len().saturating_sub(ref_len))
                .unwrap_or("");
            Some(SingleNotation {
                strand: Strand::Minus,
                inserted: inserted.to_string(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_four_orientations() {
        let cases = [
            ("G[chr3:100[", Strand::Plus, Strand::Minus),
            ("G]chr3:100]", Strand::Plus, Strand::Plus),
            ("]chr3:100]G", Strand::Minus, Strand::Plus),
            ("[chr3:100[G", Strand::Minus, Strand::Minus),
        ];
        for (alt, local, remote) in cases {
            let bnd = parse_bracket(alt).unwrap();
            assert_eq!(bnd.local_strand(), local, "{}", alt);
            assert_eq!(bnd.remote_strand(), remote, "{}", alt);
            assert_eq!(bnd.remote_pos, 100);
            assert_eq!(bnd.to_alt(), alt);
        }
    }

    #[test]
    fn test_inserted_sequence() {
        let bnd = parse_bracket("GTTA[chr3:100[").unwrap();
        assert_eq!(bnd.inserted_sequence(1), "TTA");

        let bnd = parse_bracket("]chr3:100]CCAG").unwrap();
        assert_eq!(bnd.inserted_sequence(1), "CCA");

        let bnd = parse_bracket("G[chr3:100[").unwrap();
        assert_eq!(bnd.inserted_sequence(1), "");
    }

    #[test]
    fn test_contig_with_colon() {
        let bnd = parse_bracket("A[HLA-A*01:01:01:01:250[").unwrap();
        assert_eq!(bnd.remote_chrom, "HLA-A*01:01:01:01");
        assert_eq!(bnd.remote_pos, 250);
    }

    #[test]
    fn test_malformed_bracket() {
        assert!(parse_bracket("<DEL>").is_none());
        assert!(parse_bracket("A[chr1:10]").is_none());
        assert!(parse_bracket("A[chr1[").is_none());
        assert!(parse_bracket("A[chr1:10[T").is_none());
        assert!(parse_bracket("").is_none());
        // Remote position beyond the coordinate range
        assert!(parse_bracket("A[chr1:9223372036854775807[").is_none());
        assert!(parse_bracket("A[chr1:99999999999999999999[").is_none());
    }

    #[test]
    fn test_mask_anchor() {
        let mut bnd = parse_bracket("GTT[chr3:100[").unwrap();
        bnd.mask_anchor(1);
        assert_eq!(bnd.to_alt(), "NTT[chr3:100[");

        let mut bnd = parse_bracket("]chr3:100]AAG").unwrap();
        bnd.mask_anchor(2);
        assert_eq!(bnd.to_alt(), "]chr3:100]ANN");
    }

    #[test]
    fn test_single_malformed() {
        assert!(parse_single(".", 1).is_none());
        assert!(parse_single(".A.", 1).is_none());
        assert!(parse_single("ACGT", 1).is_none());
        assert!(parse_single("A[chr1:1[.", 1).is_none());
    }

    #[test]
    fn test_single_zero_length_insertion() {
        let sgl = parse_single("A.", 1).unwrap();
        assert_eq!(sgl.inserted, "");
        let sgl = parse_single(".A", 1).unwrap();
        assert_eq!(sgl.inserted, "");
    }
}
