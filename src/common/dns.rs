use std::collections::HashMap;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioResolver;
use thiserror::Error;

/// Upstream every query goes to. The tool exposes no way to pick another
/// resolver, timeout, or record type.
pub const UPSTREAM: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
pub const UPSTREAM_PORT: u16 = 53;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsError {
    #[error("SERVFAIL: server failure")]
    ServFail,
    #[error("timeout")]
    Timeout,
    #[error("DNS error: {0}")]
    Other(String),
}

/// DNS resolver trait for abstracting CNAME lookups.
pub trait DnsResolver: Clone + Send + Sync + 'static {
    /// CNAME targets in the answer, in answer order. An empty vec means the
    /// name resolved but the answer carried no CNAME record.
    fn query_cname(&self, host: &str)
        -> impl Future<Output = Result<Vec<String>, DnsError>> + Send;
}

/// Hickory DNS resolver implementation, pinned to [`UPSTREAM`].
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[UPSTREAM], UPSTREAM_PORT, true),
        );
        // A single resolution failure is final for a host; never retry.
        let mut opts = ResolverOpts::default();
        opts.attempts = 0;
        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(opts)
                .build();
        Ok(Self { resolver })
    }

    fn classify_error(e: &hickory_resolver::ResolveError) -> DnsError {
        let msg = e.to_string().to_lowercase();
        if msg.contains("timeout") {
            DnsError::Timeout
        } else if msg.contains("servfail") {
            DnsError::ServFail
        } else {
            DnsError::Other(e.to_string())
        }
    }

    fn is_empty_answer(e: &hickory_resolver::ResolveError) -> bool {
        let msg = e.to_string().to_lowercase();
        msg.contains("no records") || msg.contains("nxdomain")
    }
}

impl DnsResolver for HickoryResolver {
    async fn query_cname(&self, host: &str) -> Result<Vec<String>, DnsError> {
        match self.resolver.lookup(host, RecordType::CNAME).await {
            Ok(lookup) => {
                let targets: Vec<String> = lookup
                    .iter()
                    .filter_map(|rdata| rdata.as_cname())
                    .map(|cname| cname.0.to_string())
                    .collect();
                Ok(targets)
            }
            // A name with no CNAME comes back from hickory as a lookup
            // error, not as an empty answer set. Callers only care that
            // there is no CNAME, so fold both into an empty vec.
            Err(e) if Self::is_empty_answer(&e) => Ok(Vec::new()),
            Err(e) => Err(Self::classify_error(&e)),
        }
    }
}

/// Mock DNS resolver for testing
#[derive(Clone, Default)]
pub struct MockResolver {
    cname_records: Arc<Mutex<HashMap<String, Vec<String>>>>,
    errors: Arc<Mutex<HashMap<String, DnsError>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cname(&self, host: &str, targets: Vec<String>) {
        self.cname_records.lock().unwrap().insert(host.to_lowercase(), targets);
    }

    pub fn set_error(&self, host: &str, error: DnsError) {
        self.errors.lock().unwrap().insert(host.to_lowercase(), error);
    }
}

impl DnsResolver for MockResolver {
    async fn query_cname(&self, host: &str) -> Result<Vec<String>, DnsError> {
        let host_lower = host.to_lowercase();
        if let Some(e) = self.errors.lock().unwrap().get(&host_lower) {
            return Err(e.clone());
        }
        Ok(self
            .cname_records
            .lock()
            .unwrap()
            .get(&host_lower)
            .cloned()
            .unwrap_or_default())
    }
}
