//! SPF Flattener Application Layer
//!
//! Use cases for fetching, expanding and flattening SPF records, written
//! against the `DnsLookup` port so they can run over any resolver.
pub mod ports;
pub mod services;
pub mod use_cases;
