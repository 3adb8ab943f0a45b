//! Unified error type for the validator core and its CLI collaborators.
//!
//! Every verification failure in [`crate::chain`] and [`crate::signed_zone`]
//! maps to exactly one of the kinds below, which in turn classifies into the
//! `(DNSSECExists, DNSSECValid, reason)` triple the batch CSV writer and the
//! single-query printer both consume.

use std::sync::Arc;
use thiserror::Error;

use crate::chain::AuthenticationChain;

pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Error taxonomy, one variant per row of spec §7's table.
#[derive(Debug, Clone, Error)]
pub enum ValidatorError {
    #[error("invalid query input")]
    InvalidQuery,

    #[error("resource is not signed with RRSIG")]
    ResourceNotSigned,

    #[error("requested RR not found")]
    NoResult,

    #[error("no name server to answer the question")]
    NoNameServer,

    #[error("DNSKEY RR does not exist")]
    DnskeyNotAvailable,

    #[error("DS RR does not exist")]
    DsNotAvailable,

    #[error("RR does not validate against RRSIG")]
    RrsigValidationError,

    #[error("invalid RRSIG validity period")]
    RrsigValidityPeriod,

    #[error("unknown DS digest type")]
    UnknownDsDigestType,

    #[error("DS RR does not match DNSKEY")]
    DsInvalid,

    #[error("AuthChain has no delegations")]
    DelegationChainEmpty,

    /// A DNS exchange failed at the transport layer (I/O, timeout, decode).
    #[error("transport error: {0}")]
    Transport(String),

    /// Failures reading the input list or writing the output report. Never
    /// classified into a CSV row — the batch run aborts outright (spec §6).
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for ValidatorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Arc::new(e))
    }
}

impl ValidatorError {
    /// Classify this error into `(exists, valid, reason)` per spec §7.
    pub fn classify(&self) -> (bool, bool, &'static str) {
        match self {
            Self::InvalidQuery => (false, false, "invalid query input"),
            Self::ResourceNotSigned => (false, false, "resource is not signed with RRSIG"),
            Self::NoResult => (false, false, "requested RR not found"),
            Self::NoNameServer => (false, false, "no name server to answer the question"),
            Self::DnskeyNotAvailable => (true, false, "DNSKEY RR does not exist"),
            Self::DsNotAvailable => (true, false, "DS RR does not exist"),
            Self::RrsigValidationError => (true, false, "RR does not validate against RRSIG"),
            Self::RrsigValidityPeriod => (true, false, "invalid RRSIG validity period"),
            Self::UnknownDsDigestType => (true, false, "unknown DS digest type"),
            Self::DsInvalid => (true, false, "DS RR does not match DNSKEY"),
            Self::DelegationChainEmpty => (true, false, "AuthChain has no delegations"),
            Self::Transport(_) => (false, false, "no name server to answer the question"),
            Self::Io(_) => (false, false, "I/O error"),
        }
    }
}

/// A query outcome paired with whatever chain was assembled before failure,
/// so callers can report what was seen even on a bogus/incomplete chain
/// (spec §2's Resolver Facade: "or a classified error plus whatever partial
/// chain was assembled").
#[derive(Debug, Clone)]
pub struct QueryFailure {
    pub error: ValidatorError,
    pub chain_so_far: Option<AuthenticationChain>,
}

impl QueryFailure {
    pub fn new(error: ValidatorError, chain_so_far: Option<AuthenticationChain>) -> Self {
        Self {
            error,
            chain_so_far,
        }
    }
}
