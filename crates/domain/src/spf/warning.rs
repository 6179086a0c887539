use crate::RecordType;
use serde::Serialize;
use std::fmt;

/// Non-fatal problem met while expanding or flattening a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpfWarning {
    /// An include/redirect term was removed because its target had no record.
    IncludeDropped {
        term: String,
        domain: String,
        reason: String,
    },

    /// An A or AAAA lookup for an `a` / `mx` target returned nothing.
    NoAddressRecords {
        domain: String,
        record_type: RecordType,
        reason: String,
    },

    /// The MX lookup for an `mx` target returned nothing.
    NoMailExchangers { domain: String, reason: String },

    /// The flattened record still needs more lookups than receivers allow.
    TooManyLookups { count: usize, limit: usize },
}

impl fmt::Display for SpfWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpfWarning::IncludeDropped {
                term,
                domain,
                reason,
            } => write!(f, "dropped '{term}', no SPF record for {domain}: {reason}"),
            SpfWarning::NoAddressRecords {
                domain,
                record_type,
                reason,
            } => write!(f, "no {record_type} records for {domain}: {reason}"),
            SpfWarning::NoMailExchangers { domain, reason } => {
                write!(f, "no MX records for {domain}: {reason}")
            }
            SpfWarning::TooManyLookups { count, limit } => write!(
                f,
                "flattened record still needs {count} DNS lookups (limit {limit})"
            ),
        }
    }
}
