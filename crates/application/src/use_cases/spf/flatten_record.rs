use futures::future::join_all;
use spf_flattener_domain::validators::require_non_empty;
use spf_flattener_domain::{
    DomainError, Mechanism, MechanismKind, PolicyRecord, RecordType, SpfWarning,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::ports::DnsLookup;

#[derive(Debug, Clone)]
pub struct FlattenedRecord {
    pub record: PolicyRecord,
    pub warnings: Vec<SpfWarning>,
}

/// Terms and warnings produced for one input term.
#[derive(Default)]
struct Flattened {
    terms: Vec<String>,
    warnings: Vec<SpfWarning>,
}

impl Flattened {
    fn keep(term: &str) -> Self {
        Self {
            terms: vec![term.to_string()],
            warnings: Vec::new(),
        }
    }

    fn append(&mut self, other: Flattened) {
        self.terms.extend(other.terms);
        self.warnings.extend(other.warnings);
    }
}

/// Rewrites `a` and `mx` mechanisms into static `ip4:` / `ip6:` terms.
///
/// Every other term, `ptr` included, is copied through untouched. Lookup
/// failures become warnings and contribute no terms.
pub struct FlattenSpfRecordUseCase {
    lookup: Arc<dyn DnsLookup>,
}

impl FlattenSpfRecordUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self, record))]
    pub async fn execute(
        &self,
        record: &str,
        base_domain: &str,
    ) -> Result<FlattenedRecord, DomainError> {
        require_non_empty(record, "SPF record")?;
        require_non_empty(base_domain, "Base domain")?;

        let policy = PolicyRecord::parse(record)?;

        let flattened = join_all(
            policy
                .terms()
                .iter()
                .map(|term| self.flatten_term(term, base_domain)),
        )
        .await;

        let mut result = Flattened::default();
        for term in flattened {
            result.append(term);
        }

        let record = PolicyRecord::from_terms(result.terms);
        debug!(record = %record, warnings = result.warnings.len(), "Record flattened");

        Ok(FlattenedRecord {
            record,
            warnings: result.warnings,
        })
    }

    async fn flatten_term(&self, term: &str, base_domain: &str) -> Flattened {
        match Mechanism::parse(term) {
            Some(mechanism) if mechanism.kind == MechanismKind::A => {
                let target = mechanism.target(base_domain);
                self.resolve_addresses(&mechanism, target).await
            }
            Some(mechanism) if mechanism.kind == MechanismKind::Mx => {
                self.resolve_mail_exchangers(&mechanism, base_domain).await
            }
            _ => Flattened::keep(term),
        }
    }

    /// A then AAAA for one host; each failed type yields one warning.
    async fn resolve_addresses(&self, mechanism: &Mechanism, host: &str) -> Flattened {
        let (v4, v6) = futures::join!(
            self.lookup.lookup_addresses(host, RecordType::A),
            self.lookup.lookup_addresses(host, RecordType::AAAA),
        );

        let mut flattened = Flattened::default();
        for (record_type, result) in RecordType::address_types().into_iter().zip([v4, v6]) {
            let reason = match result {
                Ok(addresses) if !addresses.is_empty() => {
                    flattened.terms.extend(
                        addresses
                            .into_iter()
                            .map(|address| mechanism.address_term(address)),
                    );
                    continue;
                }
                Ok(_) => "no records".to_string(),
                Err(e) => e.to_string(),
            };

            warn!(
                host = %host,
                record_type = %record_type,
                reason = %reason,
                "Address lookup returned nothing"
            );
            flattened.warnings.push(SpfWarning::NoAddressRecords {
                domain: host.to_string(),
                record_type,
                reason,
            });
        }

        flattened
    }

    async fn resolve_mail_exchangers(&self, mechanism: &Mechanism, base_domain: &str) -> Flattened {
        let target = mechanism.target(base_domain);

        let exchangers = match self.lookup.lookup_mx(target).await {
            Ok(exchangers) => exchangers,
            Err(e) => return Self::no_mail_exchangers(target, e.to_string()),
        };

        // RFC 7505 null MX publishes "." which carries no hosts.
        let hosts: Vec<&str> = exchangers
            .iter()
            .map(|mx| mx.exchange.trim_end_matches('.'))
            .filter(|host| !host.is_empty())
            .collect();

        if hosts.is_empty() {
            return Self::no_mail_exchangers(target, "no records".to_string());
        }

        let per_host = join_all(
            hosts
                .iter()
                .map(|host| self.resolve_addresses(mechanism, host)),
        )
        .await;

        let mut flattened = Flattened::default();
        for host in per_host {
            flattened.append(host);
        }
        flattened
    }

    fn no_mail_exchangers(domain: &str, reason: String) -> Flattened {
        warn!(domain = %domain, reason = %reason, "MX lookup returned nothing");
        Flattened {
            terms: Vec::new(),
            warnings: vec![SpfWarning::NoMailExchangers {
                domain: domain.to_string(),
                reason,
            }],
        }
    }
}
