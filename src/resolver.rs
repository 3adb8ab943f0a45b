//! The resolver facade: wires together transport, RRSet extraction and
//! chain construction/verification behind a single `strict_ns_query` call,
//! grounded in `resolver/query.go`'s `NewResolver` plus the overall flow of
//! `main.go`'s `query`/`performDNSSECMeasurement`.

use std::sync::Arc;

use hickory_proto::rr::{Name, Record, RecordType};

use crate::chain::AuthenticationChain;
use crate::config::ResolverConfig;
use crate::error::{QueryFailure, ValidatorError};
use crate::rrset::RRSet;
use crate::transport::{Transport, UdpTransport};

pub struct Resolver {
    transport: Arc<dyn Transport>,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            transport: Arc::new(UdpTransport::new(config)),
        }
    }

    /// Build a resolver over a caller-supplied transport — the seam tests
    /// use to inject canned responses instead of hitting the network.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Resolve `name`/`rr_type` and validate its DNSSEC chain of trust.
    ///
    /// On success, returns the answer RRset's records and the verified
    /// chain. On failure, returns a [`QueryFailure`] carrying the
    /// classified error and whatever chain was assembled before it, so
    /// callers (the batch CLI in particular) can still report partial
    /// progress.
    pub async fn strict_ns_query(
        &self,
        name: &str,
        rr_type: RecordType,
    ) -> std::result::Result<(Vec<Record>, AuthenticationChain), QueryFailure> {
        let qname = Name::from_ascii(name).map_err(|_| QueryFailure::new(ValidatorError::InvalidQuery, None))?;

        let message = self
            .transport
            .exchange(&qname, rr_type)
            .await
            .map_err(|e| QueryFailure::new(e, None))?;
        let answer = RRSet::from_answer(&message);

        if answer.records.is_empty() && !answer.is_signed() {
            return Err(QueryFailure::new(ValidatorError::NoResult, None));
        }
        if !answer.is_signed() {
            return Err(QueryFailure::new(ValidatorError::ResourceNotSigned, None));
        }

        let (chain, build_err) = AuthenticationChain::populate(self.transport.as_ref(), name).await;
        if let Some(e) = build_err {
            return Err(QueryFailure::new(e, Some(chain)));
        }

        match chain.verify(&answer) {
            Ok(()) => Ok((answer.records, chain)),
            Err(e) => Err(QueryFailure::new(e, Some(chain))),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
