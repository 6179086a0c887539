use super::mechanism::Mechanism;
use crate::DomainError;
use std::fmt;

/// SPF version marker that starts every policy record.
pub const SPF_VERSION: &str = "v=spf1";

/// An SPF policy: the version marker followed by an ordered list of terms.
///
/// Terms are stored verbatim so unknown or malformed tokens survive a
/// round trip untouched. The marker is never stored and is written exactly
/// once by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyRecord {
    terms: Vec<String>,
}

impl PolicyRecord {
    /// Tokenizes a record on whitespace, dropping the leading version marker
    /// when present.
    pub fn parse(record: &str) -> Result<Self, DomainError> {
        if record.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "SPF record cannot be empty".to_string(),
            ));
        }

        let mut tokens = record.split_whitespace().peekable();
        if tokens
            .peek()
            .is_some_and(|first| first.eq_ignore_ascii_case(SPF_VERSION))
        {
            tokens.next();
        }

        Ok(Self {
            terms: tokens.map(str::to_string).collect(),
        })
    }

    pub fn from_terms(terms: Vec<String>) -> Self {
        Self { terms }
    }

    /// Whether a TXT string is an SPF record: exactly `v=spf1` or `v=spf1 `
    /// followed by terms.
    pub fn is_spf_record(txt: &str) -> bool {
        txt == SPF_VERSION
            || txt
                .strip_prefix(SPF_VERSION)
                .is_some_and(|rest| rest.starts_with(' '))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<String> {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms paired with their parsed mechanism, `None` for unrecognised ones.
    pub fn mechanisms(&self) -> impl Iterator<Item = (&str, Option<Mechanism>)> {
        self.terms.iter().map(|t| (t.as_str(), Mechanism::parse(t)))
    }

    /// Whether any include/redirect term is still waiting to be spliced in,
    /// or a Microsoft 365 reference still has to be collapsed.
    pub fn has_expandable_terms(&self) -> bool {
        self.mechanisms().any(|(term, mechanism)| {
            mechanism.as_ref().is_some_and(|m| {
                m.expansion_target().is_some() || m.references_outlook()
            }) && term != super::OUTLOOK_CANONICAL_INCLUDE
        })
    }

    /// Number of terms that cost a DNS lookup when the record is evaluated.
    pub fn dns_lookup_count(&self) -> usize {
        self.mechanisms()
            .filter(|(_, m)| m.as_ref().is_some_and(|m| m.kind.requires_dns_lookup()))
            .count()
    }
}

impl fmt::Display for PolicyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SPF_VERSION)?;
        for term in &self.terms {
            write!(f, " {term}")?;
        }
        Ok(())
    }
}
