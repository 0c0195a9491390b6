//! Root structural variant type tags

/// Root SV type of a record, suffixes after `:` already stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvType {
    Del,
    Ins,
    Dup,
    Inv,
    Bnd,
    /// DELLY-style inter-chromosomal translocation with CT orientation
    Tra,
    /// TIGRA/BreakDancer-style translocation without orientation
    Ctx,
    /// Replacement (pindel)
    Rpl,
    Unk,
    /// Non-symbolic indel without an SVTYPE
    Indel,
    /// CNV, NON_REF, `*`, ambiguity codes and abundance claims
    Ignored,
}

impl SvType {
    /// Map a root tag to a type; `None` for tags no rule understands
    ///
    /// # Examples
    /// ```
    /// use sv_breakends::core::SvType;
    ///
    /// assert_eq!(SvType::from_tag("DEL"), Some(SvType::Del));
    /// assert_eq!(SvType::from_tag("CNV"), Some(SvType::Ignored));
    /// assert_eq!(SvType::from_tag("N"), Some(SvType::Ignored));
    /// assert_eq!(SvType::from_tag("CPX"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "DEL" => Some(SvType::Del),
            "INS" => Some(SvType::Ins),
            "DUP" => Some(SvType::Dup),
            "INV" => Some(SvType::Inv),
            "BND" => Some(SvType::Bnd),
            "TRA" => Some(SvType::Tra),
            "CTX" => Some(SvType::Ctx),
            "RPL" => Some(SvType::Rpl),
            "UNK" => Some(SvType::Unk),
            "INDEL" => Some(SvType::Indel),
            "CNV" | "*" | "NON_REF" => Some(SvType::Ignored),
            t if t.len() == 1 && crate::core::dna::is_ambiguity_code(t.as_bytes()[0]) => {
                Some(SvType::Ignored)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SvType::Del => "DEL",
            SvType::Ins => "INS",
            SvType::Dup => "DUP",
            SvType::Inv => "INV",
            SvType::Bnd => "BND",
            SvType::Tra => "TRA",
            SvType::Ctx => "CTX",
            SvType::Rpl => "RPL",
            SvType::Unk => "UNK",
            SvType::Indel => "INDEL",
            SvType::Ignored => "IGNORED",
        }
    }
}

impl std::fmt::Display for SvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
