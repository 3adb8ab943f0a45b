//! RRSet extraction from a DNS answer section, grounded in
//! `resolver/rrset.go`'s `queryRRset`/`NewSignedRRSet`.

use hickory_proto::dnssec::rdata::DNSSECRData;
use hickory_proto::op::Message;
use hickory_proto::rr::{RData, Record};

/// A resource record set together with the single RRSIG record covering it,
/// if any. When an answer section carries more than one RRSIG for the same
/// set the last one seen wins — this mirrors the original Go resolver's
/// overwrite-in-a-loop behavior (see spec's Guarantees section) rather than
/// trying every signature until one validates.
#[derive(Debug, Clone, Default)]
pub struct RRSet {
    pub records: Vec<Record>,
    pub rrsig: Option<Record>,
}

impl RRSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_signed(&self) -> bool {
        self.rrsig.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The name in whose zone this RRSet's signature was produced, read off
    /// the RRSIG's signer field.
    pub fn signer_name(&self) -> Option<String> {
        let rrsig = self.rrsig.as_ref()?;
        match rrsig.data() {
            RData::DNSSEC(DNSSECRData::RRSIG(sig)) => Some(sig.input().signer_name.to_string()),
            _ => None,
        }
    }

    /// Split a message's answer section into non-signature records and (the
    /// last) covering RRSIG, per `resolver/rrset.go`'s `queryRRset`.
    pub fn from_answer(message: &Message) -> Self {
        let mut rrset = Self::empty();
        for record in message.answers() {
            match record.data() {
                RData::DNSSEC(DNSSECRData::RRSIG(_)) => {
                    rrset.rrsig = Some(record.clone());
                }
                _ => rrset.records.push(record.clone()),
            }
        }
        rrset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rrset_is_not_signed() {
        let rrset = RRSet::empty();
        assert!(!rrset.is_signed());
        assert!(rrset.is_empty());
    }
}
