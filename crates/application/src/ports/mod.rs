pub mod dns_lookup;

pub use dns_lookup::DnsLookup;
