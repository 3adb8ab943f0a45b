//! Batch measurement over a list of hostnames, grounded in `main.go`'s
//! `measure`/`worker`/`performDNSSECMeasurement`. Concurrency is bounded by
//! a `Semaphore` sized to the worker count rather than a fixed-size input
//! channel, per the Re-architecture guidance ("size queues/semaphores to
//! the worker count, not `len(records)`").

use std::sync::Arc;

use hickory_proto::rr::RecordType;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

use crate::chain::AuthenticationChain;
use crate::resolver::Resolver;

/// One row of the eventual report, mirroring `structs.go`'s `Record`.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub domain: String,
    pub dnssec_exists: bool,
    pub dnssec_valid: bool,
    pub reason: String,
    pub algorithms_used: Vec<String>,
    pub protocols_used: Vec<String>,
    pub key_sizes: Vec<String>,
}

impl BatchRecord {
    fn from_chain(domain: String, exists: bool, valid: bool, reason: &str, chain: Option<&AuthenticationChain>) -> Self {
        let (algorithms_used, protocols_used, key_sizes) =
            chain.map(AuthenticationChain::key_algorithms_used).unwrap_or_default();
        Self {
            domain,
            dnssec_exists: exists,
            dnssec_valid: valid,
            reason: reason.to_string(),
            algorithms_used,
            protocols_used,
            key_sizes,
        }
    }
}

/// Run `strict_ns_query(domain, A)` for every domain in `domains` across a
/// pool bounded to `workers` concurrent in-flight queries. Results are
/// collected in completion order, not input order — each carries its own
/// domain name so callers can re-associate them.
pub async fn run_batch(resolver: Arc<Resolver>, domains: Vec<String>, workers: usize) -> Vec<BatchRecord> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for domain in domains {
        let resolver = Arc::clone(&resolver);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore never closes");
            measure_one(&resolver, domain).await
        });
    }

    let mut results = Vec::new();
    while let Some(outcome) = tasks.join_next().await {
        match outcome {
            Ok(record) => results.push(record),
            Err(join_err) => {
                info!(error = %join_err, "batch worker task failed to join");
            }
        }
    }
    results
}

async fn measure_one(resolver: &Resolver, domain: String) -> BatchRecord {
    match resolver.strict_ns_query(&domain, RecordType::A).await {
        Ok((_, chain)) => BatchRecord::from_chain(domain, true, true, "", Some(&chain)),
        Err(failure) => {
            let (exists, valid, reason) = failure.error.classify();
            BatchRecord::from_chain(domain, exists, valid, reason, failure.chain_so_far.as_ref())
        }
    }
}
