use crate::error::{Result, StoreError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Matches the full identifier grammar: type code, five digits, optional
/// `_suffix`. The suffix is cosmetic and discarded during normalization.
static ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(MRN|TRN|PRN|CRN|DRN|SRN|IRR|MRR|IRN)([0-9]{5})(?:_[A-Za-z0-9_]+)?$")
        .expect("component identifier regex")
});

/// The three-letter type code of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Mrn,
    Trn,
    Prn,
    Crn,
    Drn,
    Srn,
    Irr,
    Mrr,
    Irn,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Mrn,
        ComponentKind::Trn,
        ComponentKind::Prn,
        ComponentKind::Crn,
        ComponentKind::Drn,
        ComponentKind::Srn,
        ComponentKind::Irr,
        ComponentKind::Mrr,
        ComponentKind::Irn,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ComponentKind::Mrn => "MRN",
            ComponentKind::Trn => "TRN",
            ComponentKind::Prn => "PRN",
            ComponentKind::Crn => "CRN",
            ComponentKind::Drn => "DRN",
            ComponentKind::Srn => "SRN",
            ComponentKind::Irr => "IRR",
            ComponentKind::Mrr => "MRR",
            ComponentKind::Irn => "IRN",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }

    /// Entry components (chunk roots) are of the `IRN` type.
    #[must_use]
    pub fn is_entry(self) -> bool {
        matches!(self, ComponentKind::Irn)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A normalized component identifier: uppercase type code plus five
/// digits, with any `_suffix` stripped. Two spellings of the same
/// component (`mrn10001_init`, `MRN10001`) compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    base: String,
    kind: ComponentKind,
}

impl ComponentId {
    /// Parse and normalize a raw identifier.
    ///
    /// Fails with [`StoreError::InvalidIdentifier`] when the input does
    /// not match the type-code + five-digit grammar.
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = ID_RE
            .captures(raw.trim())
            .ok_or_else(|| StoreError::InvalidIdentifier(raw.to_string()))?;

        let code = caps[1].to_ascii_uppercase();
        let kind = ComponentKind::from_code(&code)
            .ok_or_else(|| StoreError::InvalidIdentifier(raw.to_string()))?;

        Ok(Self {
            base: format!("{code}{}", &caps[2]),
            kind,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.kind.is_entry()
    }

    /// The normalized base form, e.g. `IRN00001`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// The artifact filename this component is stored under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.base)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
