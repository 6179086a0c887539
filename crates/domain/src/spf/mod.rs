//! SPF policy model
//!
//! Pure parsing and rendering of SPF records. Nothing in here performs DNS
//! lookups; the application layer drives resolution.

pub mod mechanism;
pub mod record;
pub mod report;
pub mod warning;

pub use mechanism::{Mechanism, MechanismKind, Qualifier};
pub use record::{PolicyRecord, SPF_VERSION};
pub use report::SpfReport;
pub use warning::SpfWarning;

/// Microsoft 365 record chains are deep and well known; any reference into
/// them collapses to the canonical include instead of being expanded.
pub const OUTLOOK_PROTECTION_DOMAIN: &str = "protection.outlook.com";
pub const OUTLOOK_CANONICAL_INCLUDE: &str = "include:spf.protection.outlook.com";

/// RFC 7208 §4.6.4 limit on lookup-causing terms.
pub const MAX_DNS_LOOKUPS: usize = 10;

pub fn is_outlook_protection(domain: &str) -> bool {
    domain
        .to_ascii_lowercase()
        .contains(OUTLOOK_PROTECTION_DOMAIN)
}
