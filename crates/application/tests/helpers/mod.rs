pub mod mock_dns_lookup;

pub use mock_dns_lookup::{MockDnsLookup, SpfTestContext};
