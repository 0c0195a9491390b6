//! Breakend output records
//!
//! A breakend is one side of a novel adjacency: a strand-oriented 1-base
//! locus with a confidence interval around it. Two breakends whose
//! `partner` fields point at each other form a breakpoint.

use crate::core::record::InfoValue;
use crate::core::SvType;

/// Breakend orientation
///
/// `Plus` means the retained reference sequence ends at the breakend
/// (the adjacency continues to the right), `Minus` means it starts there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
    /// Orientation not reported by the caller
    Unknown,
}

impl Strand {
    /// Get the complement strand
    ///
    /// # Examples
    /// ```
    /// use sv_breakends::core::Strand;
    /// assert_eq!(Strand::Plus.complement(), Strand::Minus);
    /// assert_eq!(Strand::Minus.complement(), Strand::Plus);
    /// assert_eq!(Strand::Unknown.complement(), Strand::Unknown);
    /// ```
    pub fn complement(&self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
            Strand::Unknown => Strand::Unknown,
        }
    }

    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use sv_breakends::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('*'), Some(Strand::Unknown));
    /// assert_eq!(Strand::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            '*' | '.' => Some(Strand::Unknown),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '*',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Confidence interval around a nominal position, as `(start offset, width)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfidenceInterval {
    /// Offset of the interval start relative to the nominal position
    pub start_offset: i64,
    /// Interval width; never negative
    pub width: i64,
}

impl ConfidenceInterval {
    pub fn new(start_offset: i64, width: i64) -> Self {
        Self {
            start_offset,
            width: width.max(0),
        }
    }

    /// Build from a VCF-style `[lower, upper]` pair
    pub fn from_bounds(lower: i64, upper: i64) -> Self {
        Self::new(lower, upper - lower)
    }

    /// Interval spanning `len` bases of microhomology to the right of the
    /// nominal position, as callers report the leftmost possible locus
    pub fn homology(len: i64) -> Self {
        Self::new(0, len)
    }

    pub fn end_offset(&self) -> i64 {
        self.start_offset + self.width
    }
}

/// A single breakend produced by the geometry engine
#[derive(Debug, Clone, PartialEq)]
pub struct Breakend {
    /// Unique, stable identifier
    pub id: String,
    /// Id of the VCF record the breakend came from
    pub source_id: String,
    pub chrom: String,
    /// Nominal 1-based position
    pub pos: i64,
    /// Reported interval start (nominal or CI-widened)
    pub start: i64,
    /// Reported interval end
    pub end: i64,
    pub strand: Strand,
    pub ci: ConfidenceInterval,
    pub ref_allele: String,
    pub alt_allele: String,
    pub sv_type: SvType,
    /// Signed SV length; `None` when undefined (e.g. inter-chromosomal)
    pub sv_len: Option<i64>,
    pub ins_seq: String,
    pub ins_len: i64,
    pub hom_len: i64,
    pub partner: Option<String>,
    pub event: Option<String>,
    /// Pass-through INFO columns in the requested order
    pub info: Vec<(String, Option<InfoValue>)>,
}

impl Breakend {
    /// Set the reported interval from the nominal position and CI
    pub fn set_interval(&mut self, nominal_position: bool) {
        if nominal_position {
            self.start = self.pos;
            self.end = self.pos;
        } else {
            self.start = self.pos + self.ci.start_offset;
            self.end = self.pos + self.ci.end_offset();
        }
    }

    /// True when both breakends reference each other
    pub fn is_mate_of(&self, other: &Breakend) -> bool {
        self.partner.as_deref() == Some(other.id.as_str())
            && other.partner.as_deref() == Some(self.id.as_str())
    }
}
