//! SPF Flattener Infrastructure Layer
//!
//! Wire-level DNS client backing the application's `DnsLookup` port.
pub mod dns;
