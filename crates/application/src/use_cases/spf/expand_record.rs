use futures::future::join_all;
use spf_flattener_domain::spf::OUTLOOK_CANONICAL_INCLUDE;
use spf_flattener_domain::{DomainError, Mechanism, PolicyRecord, SpfWarning};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::FetchSpfRecordUseCase;

#[derive(Debug, Clone)]
pub struct ExpandedRecord {
    pub record: PolicyRecord,
    /// Expansion rounds actually run.
    pub rounds: u32,
    pub warnings: Vec<SpfWarning>,
}

/// What one term turns into after a round.
enum TermExpansion {
    Keep(String),
    Splice(Vec<String>),
    Drop(SpfWarning),
}

/// Replaces `include:` / `redirect=` terms with the terms of the record they
/// point at.
///
/// Each round expands every pending term of the current record. Rounds
/// repeat while pending terms remain, and at most `max_depth` extra rounds
/// run after the first. Whatever is still unexpanded then is left in place.
///
/// Includes qualified with `-`, `~` or `?` are kept as written, since their
/// terms cannot be inlined without changing the result they produce.
/// Microsoft 365 references are collapsed whatever their qualifier.
pub struct ExpandSpfRecordUseCase {
    fetcher: Arc<FetchSpfRecordUseCase>,
}

impl ExpandSpfRecordUseCase {
    pub fn new(fetcher: Arc<FetchSpfRecordUseCase>) -> Self {
        Self { fetcher }
    }

    #[instrument(skip(self, record))]
    pub async fn execute(
        &self,
        record: &str,
        max_depth: u32,
    ) -> Result<ExpandedRecord, DomainError> {
        let mut current = PolicyRecord::parse(record)?;
        let mut warnings = Vec::new();
        let mut depth = 0;

        loop {
            current = self.expand_round(current, depth, &mut warnings).await;

            if !current.has_expandable_terms() {
                break;
            }
            if depth >= max_depth {
                warn!(
                    max_depth = max_depth,
                    record = %current,
                    "Expansion depth reached, record still has include/redirect terms"
                );
                break;
            }
            depth += 1;
        }

        Ok(ExpandedRecord {
            record: current,
            rounds: depth + 1,
            warnings,
        })
    }

    async fn expand_round(
        &self,
        record: PolicyRecord,
        depth: u32,
        warnings: &mut Vec<SpfWarning>,
    ) -> PolicyRecord {
        let expansions = join_all(record.terms().iter().map(|term| self.expand_term(term))).await;

        let mut terms = Vec::with_capacity(record.terms().len());
        for expansion in expansions {
            match expansion {
                TermExpansion::Keep(term) => terms.push(term),
                TermExpansion::Splice(spliced) => terms.extend(spliced),
                TermExpansion::Drop(warning) => warnings.push(warning),
            }
        }

        let expanded = PolicyRecord::from_terms(terms);
        debug!(depth = depth, record = %expanded, "Expansion round complete");
        expanded
    }

    async fn expand_term(&self, term: &str) -> TermExpansion {
        let Some(mechanism) = Mechanism::parse(term) else {
            return TermExpansion::Keep(term.to_string());
        };

        if mechanism.references_outlook() {
            if term != OUTLOOK_CANONICAL_INCLUDE {
                debug!(term = %term, "Collapsing Microsoft 365 reference");
            }
            return TermExpansion::Keep(OUTLOOK_CANONICAL_INCLUDE.to_string());
        }

        let Some(domain) = mechanism.expansion_target().map(str::to_string) else {
            return TermExpansion::Keep(term.to_string());
        };

        match self.fetcher.fetch(&domain).await {
            Ok(record) => match PolicyRecord::parse(&record) {
                Ok(included) => TermExpansion::Splice(included.into_terms()),
                Err(_) => TermExpansion::Splice(Vec::new()),
            },
            Err(e) => {
                debug!(term = %term, error = %e, "Dropping unresolvable include");
                TermExpansion::Drop(SpfWarning::IncludeDropped {
                    term: term.to_string(),
                    domain,
                    reason: e.to_string(),
                })
            }
        }
    }
}
