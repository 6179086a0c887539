use spf_flattener_application::ports::DnsLookup;
use spf_flattener_application::services::SpfRecordCache;
use spf_flattener_application::use_cases::{
    AnalyzeSpfUseCase, ExpandSpfRecordUseCase, FetchSpfRecordUseCase, FlattenSpfRecordUseCase,
};
use spf_flattener_domain::Config;
use spf_flattener_infrastructure::dns::HickoryDnsLookup;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Use cases wired over one resolver and one per-run record cache.
pub struct SpfServices {
    pub analyze: AnalyzeSpfUseCase,
}

impl SpfServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let server_addr = config.resolver.socket_addr()?;

        let lookup: Arc<dyn DnsLookup> = Arc::new(
            HickoryDnsLookup::new(server_addr, Duration::from_millis(config.resolver.timeout_ms))
                .with_tcp_fallback(config.resolver.tcp_fallback),
        );
        debug!(server = %server_addr, "DNS resolver ready");

        let cache = Arc::new(SpfRecordCache::new());
        let fetch = Arc::new(FetchSpfRecordUseCase::new(Arc::clone(&lookup), cache));
        let expand = Arc::new(ExpandSpfRecordUseCase::new(Arc::clone(&fetch)));
        let flatten = Arc::new(FlattenSpfRecordUseCase::new(lookup));

        Ok(Self {
            analyze: AnalyzeSpfUseCase::new(fetch, expand, flatten),
        })
    }
}
