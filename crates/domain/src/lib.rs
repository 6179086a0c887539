//! SPF Flattener Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod spf;
pub mod validators;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{MailExchanger, RecordType};
pub use errors::DomainError;
pub use spf::{
    Mechanism, MechanismKind, PolicyRecord, Qualifier, SpfReport, SpfWarning, SPF_VERSION,
};
