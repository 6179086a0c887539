use super::SpfWarning;
use serde::Serialize;

/// Outcome of running fetch, expand and flatten for one domain.
#[derive(Debug, Clone, Serialize)]
pub struct SpfReport {
    pub domain: String,
    pub original: String,
    pub expanded: String,
    pub flattened: String,
    pub original_lookups: usize,
    pub flattened_lookups: usize,
    pub warnings: Vec<SpfWarning>,
}
