//! The authentication chain: an ordered sequence of zones from the queried
//! name's immediate parent down to (and including) the root, built by
//! walking DNSKEY/DS queries and verified leaf-to-root. Grounded in
//! `resolver/authchain.go`'s `AuthenticationChain` (`Populate`, `Verify`,
//! `SerializeKeyAlgorithmsUsed`).

use std::panic::AssertUnwindSafe;

use hickory_proto::dnssec::rdata::DNSSECRData;
use hickory_proto::rr::{Name, RData, RecordType};

use crate::error::{Result, ValidatorError};
use crate::rrset::RRSet;
use crate::signed_zone::SignedZone;
use crate::transport::Transport;

/// Split `domain_name` into its chain of enclosing zones, leaf first, root
/// last. Mirrors the original `Populate`'s `strings.Split` + suffix-join:
/// `""` yields only the root zone; `"a."` yields `["a.", "."]`.
pub fn zone_suffixes(domain_name: &str) -> Vec<String> {
    let labels: Vec<&str> = domain_name.split('.').collect();
    (0..labels.len()).map(|i| fqdn(&labels[i..].join("."))).collect()
}

fn fqdn(name: &str) -> String {
    if name.is_empty() {
        ".".to_string()
    } else if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// The verified (or partially built) delegation chain for one query.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationChain {
    /// Leaf-to-root: `zones[0]` is the zone of the queried name itself,
    /// `zones.last()` is the root zone.
    pub zones: Vec<SignedZone>,
}

impl AuthenticationChain {
    /// Build the chain by querying DNSKEY (and, best-effort, DS) for every
    /// zone from `domain_name`'s parent up to the root. On failure, returns
    /// whatever zones were assembled before the error alongside it, so
    /// callers can still report a partial chain.
    pub async fn populate(transport: &dyn Transport, domain_name: &str) -> (Self, Option<ValidatorError>) {
        let mut zones = Vec::new();

        for zone_name in zone_suffixes(domain_name) {
            let name = match Name::from_ascii(&zone_name) {
                Ok(name) => name,
                Err(_) => return (Self { zones }, Some(ValidatorError::InvalidQuery)),
            };

            let dnskey_message = match transport.exchange(&name, RecordType::DNSKEY).await {
                Ok(message) => message,
                Err(e) => return (Self { zones }, Some(e)),
            };
            let dnskey_rrset = RRSet::from_answer(&dnskey_message);

            // The DS query is best-effort at build time: a missing DS is a
            // verification-time failure (DsNotAvailable), not a build abort.
            let ds_rrset = match transport.exchange(&name, RecordType::DS).await {
                Ok(message) => RRSet::from_answer(&message),
                Err(_) => RRSet::empty(),
            };

            zones.push(SignedZone::new(zone_name, dnskey_rrset, ds_rrset));
        }

        (Self { zones }, None)
    }

    /// Walk the chain leaf to root, verifying `answer_rrset`'s signature
    /// under the leaf zone, then each zone's DNSKEY self-signature and its
    /// DS binding to its parent. Every verification step runs under
    /// `catch_unwind`, matching the original's per-zone `defer/recover`: a
    /// panic inside signature verification is treated as a validation
    /// failure, not a process abort.
    pub fn verify(&self, answer_rrset: &RRSet) -> Result<()> {
        let leaf = self.zones.first().ok_or(ValidatorError::DelegationChainEmpty)?;
        if !leaf.has_dnskeys() {
            return Err(ValidatorError::DnskeyNotAvailable);
        }

        catch_verify(|| leaf.verify_rrsig(answer_rrset))?;

        for (i, zone) in self.zones.iter().enumerate() {
            if zone.dnskey.records.is_empty() {
                return Err(ValidatorError::DnskeyNotAvailable);
            }
            catch_verify(|| zone.verify_rrsig(&zone.dnskey))?;

            if let Some(parent) = self.zones.get(i + 1) {
                if zone.ds.records.is_empty() {
                    return Err(ValidatorError::DsNotAvailable);
                }
                catch_verify(|| parent.verify_rrsig(&zone.ds))?;
                catch_verify(|| zone.verify_ds(&zone.ds.records))?;
            }
        }

        Ok(())
    }

    /// The algorithm, protocol and key-size (in octets of raw key material)
    /// of every DNSKEY seen across the chain, in chain order. Mirrors
    /// `SerializeKeyAlgorithmsUsed`'s three parallel arrays; per-zone
    /// attribution isn't retained, a known limitation carried from the
    /// original.
    pub fn key_algorithms_used(&self) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut algorithms = Vec::new();
        let mut protocols = Vec::new();
        let mut key_sizes = Vec::new();

        for zone in &self.zones {
            for record in &zone.dnskey.records {
                if let RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) = record.data() {
                    let pk = dnskey.public_key();
                    algorithms.push(u8::from(pk.algorithm()).to_string());
                    protocols.push("3".to_string());
                    key_sizes.push(pk.public_bytes().len().to_string());
                }
            }
        }

        (algorithms, protocols, key_sizes)
    }
}

fn catch_verify<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_) => Err(ValidatorError::RrsigValidationError),
    }
}
