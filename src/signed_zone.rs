//! A single zone's DNSKEY/DS material and the operations to verify
//! signatures against it, grounded in `resolver/signedzone.go`
//! (`lookupPubKey`, `addPubKey`, `verifyRRSIG`, `verifyDS`, `checkHasDnskeys`).
//!
//! The cryptography underneath — key tag computation, DS digesting, RRSIG
//! signature verification — is `crate::dnssec`, adapted from `heimdall`'s
//! `dnssec::{key_tag, digest, algorithm}` modules to operate on
//! `hickory-proto`'s typed RR data instead of hand-parsed RDATA bytes.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use hickory_proto::dnssec::rdata::DNSSECRData;
use hickory_proto::dnssec::tbs::TBS;
use hickory_proto::rr::{DNSClass, RData, Record};
use tracing::warn;

use crate::dnssec::{calculate_key_tag, compute_ds_digest, verify_signature, DigestType};
use crate::error::{Result, ValidatorError};
use crate::rrset::RRSet;

/// One zone's authentication material. Parent linkage is implicit in the
/// owning `AuthenticationChain`'s zone ordering (leaf to root) rather than a
/// stored back-reference, per the Re-architecture guidance against
/// self-referential owned structures.
#[derive(Debug, Clone)]
pub struct SignedZone {
    pub zone_name: String,
    pub dnskey: RRSet,
    pub ds: RRSet,
    pub pubkey_lookup: HashMap<u16, Record>,
}

impl SignedZone {
    pub fn new(zone_name: String, dnskey: RRSet, ds: RRSet) -> Self {
        let mut zone = Self {
            zone_name,
            dnskey: RRSet::empty(),
            ds,
            pubkey_lookup: HashMap::new(),
        };
        for record in &dnskey.records {
            zone.add_pubkey(record.clone());
        }
        zone.dnskey = dnskey;
        zone
    }

    /// Index a DNSKEY record by its key tag. On a key-tag collision, the
    /// last record wins and the earlier one is logged (spec: "preserve this
    /// behavior but emit a diagnostic").
    pub fn add_pubkey(&mut self, record: Record) {
        let RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) = record.data() else {
            return;
        };
        let pk = dnskey.public_key();
        let tag = calculate_key_tag(dnskey.flags(), 3, u8::from(pk.algorithm()), pk.public_bytes());
        if self.pubkey_lookup.insert(tag, record).is_some() {
            warn!(zone = %self.zone_name, key_tag = tag, "duplicate DNSKEY key tag, overwriting (last-writer-wins)");
        }
    }

    pub fn lookup_pubkey(&self, key_tag: u16) -> Option<&Record> {
        self.pubkey_lookup.get(&key_tag)
    }

    pub fn has_dnskeys(&self) -> bool {
        !self.dnskey.records.is_empty()
    }

    /// Verify `rrset`'s RRSIG against a DNSKEY in this zone's key set.
    pub fn verify_rrsig(&self, rrset: &RRSet) -> Result<()> {
        let rrsig_record = rrset.rrsig.as_ref().ok_or(ValidatorError::ResourceNotSigned)?;
        let RData::DNSSEC(DNSSECRData::RRSIG(sig)) = rrsig_record.data() else {
            return Err(ValidatorError::ResourceNotSigned);
        };

        let dnskey_record = self
            .lookup_pubkey(sig.input().key_tag)
            .ok_or(ValidatorError::DnskeyNotAvailable)?;
        let RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) = dnskey_record.data() else {
            return Err(ValidatorError::DnskeyNotAvailable);
        };

        let tbs = TBS::from_input(rrsig_record.name(), DNSClass::IN, sig.input(), rrset.records.iter())
            .map_err(|_| ValidatorError::RrsigValidationError)?;

        let pk = dnskey.public_key();
        verify_signature(u8::from(sig.input().algorithm), tbs.as_ref(), sig.sig(), pk.public_bytes())?;

        let now = now_unix();
        if now < sig.input().sig_inception.get() || now > sig.input().sig_expiration.get() {
            return Err(ValidatorError::RrsigValidityPeriod);
        }

        Ok(())
    }

    /// Verify this zone's key set against the parent-published DS RRset,
    /// per the SHA-256-only tie-break rule (first SHA-256 DS seen decides).
    pub fn verify_ds(&self, ds_records: &[Record]) -> Result<()> {
        for record in ds_records {
            let RData::DNSSEC(DNSSECRData::DS(ds)) = record.data() else {
                continue;
            };
            if u8::from(ds.digest_type()) != DigestType::Sha256.to_u8() {
                continue;
            }

            let dnskey_record = self
                .lookup_pubkey(ds.key_tag())
                .ok_or(ValidatorError::DnskeyNotAvailable)?;
            let RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) = dnskey_record.data() else {
                return Err(ValidatorError::DnskeyNotAvailable);
            };

            let pk = dnskey.public_key();
            let computed = compute_ds_digest(
                &self.zone_name,
                dnskey.flags(),
                u8::from(pk.algorithm()),
                pk.public_bytes(),
                DigestType::Sha256,
            )
            .ok_or(ValidatorError::UnknownDsDigestType)?;

            return if computed == ds.digest().to_vec() {
                Ok(())
            } else {
                Err(ValidatorError::DsInvalid)
            };
        }

        Err(ValidatorError::UnknownDsDigestType)
    }
}

fn now_unix() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
