//! Shared test fixtures: a small mock DNSSEC chain (root, a TLD, and a leaf
//! zone), each zone signing its own DNSKEY set with a freshly generated
//! Ed25519 key, with DS records linking parent to child the way a live
//! resolver would see them. Served over a [`MockTransport`] so the
//! integration tests never touch the network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::dnssec::crypto::Ed25519SigningKey;
use hickory_proto::dnssec::rdata::{DNSSECRData, DS, DNSKEY, RRSIG};
use hickory_proto::dnssec::{Algorithm, DigestType, PublicKey, PublicKeyBuf, SigSigner, SigningKey};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordSet, RecordType};
use time::{Duration as TimeDuration, OffsetDateTime};

use strictns::transport::Transport;

/// A zone in the mock chain: its own signing key and the DNSKEY record it
/// publishes.
pub struct MockZone {
    pub name: Name,
    signer: SigSigner,
    dnskey_record: Record,
}

impl MockZone {
    fn new(name: &str) -> Self {
        let name = Name::from_ascii(name).unwrap();
        let pkcs8 = Ed25519SigningKey::generate_pkcs8().unwrap();
        let signing_key = Ed25519SigningKey::from_pkcs8(&pkcs8).unwrap();
        let public_key = signing_key.to_public_key().unwrap();
        let public_bytes = public_key.public_bytes().to_vec();

        let hickory_pub = PublicKeyBuf::new(public_bytes, Algorithm::ED25519);
        let dnskey = DNSKEY::with_flags(257, hickory_pub);

        let signer = SigSigner::dnssec(dnskey.clone(), Box::new(signing_key), name.clone(), Duration::from_secs(3600));
        let dnskey_record = Record::from_rdata(name.clone(), 3600, RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)));

        Self { name, signer, dnskey_record }
    }

    /// Sign `records` (all sharing `name`/`rtype`), inception 5 minutes ago.
    pub fn sign(&self, name: &Name, rtype: RecordType, records: &[Record]) -> Record {
        self.sign_at(name, rtype, records, OffsetDateTime::now_utc() - TimeDuration::minutes(5))
    }

    /// Sign `records` with an explicit inception time, for building RRSIGs
    /// outside their validity window.
    pub fn sign_at(&self, name: &Name, rtype: RecordType, records: &[Record], inception: OffsetDateTime) -> Record {
        let mut rrset = RecordSet::new(name.clone(), rtype, 0);
        for record in records {
            rrset.insert(record.clone(), 0);
        }
        let rrsig = RRSIG::from_rrset(&rrset, DNSClass::IN, inception, &self.signer).unwrap();
        Record::from_rdata(name.clone(), 3600, RData::DNSSEC(DNSSECRData::RRSIG(rrsig)))
    }

    fn dnskey_rrsig(&self) -> Record {
        self.sign(&self.name, RecordType::DNSKEY, &[self.dnskey_record.clone()])
    }

    /// This zone's own correct key tag and SHA-256 DS digest, as a parent
    /// zone would compute them from this zone's DNSKEY.
    fn ds_fields(&self) -> (u16, Vec<u8>) {
        let RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) = self.dnskey_record.data() else {
            unreachable!()
        };
        let pk = dnskey.public_key();
        let key_tag = strictns::dnssec::calculate_key_tag(dnskey.flags(), 3, u8::from(pk.algorithm()), pk.public_bytes());
        let digest = strictns::dnssec::compute_ds_digest(
            &self.name.to_string(),
            dnskey.flags(),
            u8::from(pk.algorithm()),
            pk.public_bytes(),
            strictns::dnssec::DigestType::Sha256,
        )
        .unwrap();
        (key_tag, digest)
    }

    /// The DS record a parent zone would publish for this zone, computed
    /// from this zone's own DNSKEY.
    pub fn ds_record(&self) -> Record {
        let (key_tag, digest) = self.ds_fields();
        let ds = DS::new(key_tag, Algorithm::ED25519, DigestType::SHA256, digest);
        Record::from_rdata(self.name.clone(), 3600, RData::DNSSEC(DNSSECRData::DS(ds)))
    }

    /// A DS record pointing at a key tag no DNSKEY in this zone actually has.
    pub fn ds_record_wrong_key_tag(&self) -> Record {
        let (key_tag, digest) = self.ds_fields();
        let ds = DS::new(key_tag.wrapping_add(1), Algorithm::ED25519, DigestType::SHA256, digest);
        Record::from_rdata(self.name.clone(), 3600, RData::DNSSEC(DNSSECRData::DS(ds)))
    }

    /// A DS record with the right key tag but a digest that doesn't match.
    pub fn ds_record_bad_digest(&self) -> Record {
        let (key_tag, mut digest) = self.ds_fields();
        digest[0] ^= 0xff;
        let ds = DS::new(key_tag, Algorithm::ED25519, DigestType::SHA256, digest);
        Record::from_rdata(self.name.clone(), 3600, RData::DNSSEC(DNSSECRData::DS(ds)))
    }

    /// A DS record using SHA-1, which the validator treats as unsupported.
    pub fn ds_record_sha1_only(&self) -> Record {
        let (key_tag, _) = self.ds_fields();
        let ds = DS::new(key_tag, Algorithm::ED25519, DigestType::SHA1, vec![0u8; 20]);
        Record::from_rdata(self.name.clone(), 3600, RData::DNSSEC(DNSSECRData::DS(ds)))
    }
}

/// A transport backed by a fixed table of canned responses, keyed by
/// (name, record type).
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<(Name, RecordType), Message>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: Name, rtype: RecordType, message: Message) {
        self.responses.lock().unwrap().insert((name, rtype), message);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn exchange(&self, qname: &Name, qtype: RecordType) -> strictns::error::Result<Message> {
        self.responses
            .lock()
            .unwrap()
            .get(&(qname.clone(), qtype))
            .cloned()
            .ok_or(strictns::error::ValidatorError::NoResult)
    }
}

fn empty_response(qname: &Name, qtype: RecordType, rcode: ResponseCode) -> Message {
    let mut query = Query::new();
    query.set_name(qname.clone());
    query.set_query_type(qtype);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message.set_message_type(MessageType::Response);
    message.set_op_code(OpCode::Query);
    message.set_response_code(rcode);
    message.add_query(query);
    message
}

fn answer_response(qname: &Name, qtype: RecordType, records: Vec<Record>) -> Message {
    let mut message = empty_response(qname, qtype, ResponseCode::NoError);
    for record in records {
        message.add_answer(record);
    }
    message
}

/// A fully-wired three-level chain (root, com., example.com.), each zone
/// self-signing its own DNSKEY and linked to its parent by a DS record.
pub struct MockChain {
    pub transport: MockTransport,
    pub root: MockZone,
    pub tld: MockZone,
    pub leaf: MockZone,
}

impl MockChain {
    pub fn build() -> Self {
        let root = MockZone::new(".");
        let tld = MockZone::new("com.");
        let leaf = MockZone::new("example.com.");

        let transport = MockTransport::new();

        for zone in [&root, &tld, &leaf] {
            let dnskey_rrsig = zone.dnskey_rrsig();
            transport.insert(
                zone.name.clone(),
                RecordType::DNSKEY,
                answer_response(&zone.name, RecordType::DNSKEY, vec![zone.dnskey_record.clone(), dnskey_rrsig]),
            );
        }

        // DS records live in the parent zone, signed by the parent.
        let tld_ds = tld.ds_record();
        let tld_ds_rrsig = root.sign(&tld.name, RecordType::DS, &[tld_ds.clone()]);
        transport.insert(
            tld.name.clone(),
            RecordType::DS,
            answer_response(&tld.name, RecordType::DS, vec![tld_ds, tld_ds_rrsig]),
        );

        let leaf_ds = leaf.ds_record();
        let leaf_ds_rrsig = tld.sign(&leaf.name, RecordType::DS, &[leaf_ds.clone()]);
        transport.insert(
            leaf.name.clone(),
            RecordType::DS,
            answer_response(&leaf.name, RecordType::DS, vec![leaf_ds, leaf_ds_rrsig]),
        );

        // Root has no parent to publish a DS for it.
        transport.insert(root.name.clone(), RecordType::DS, empty_response(&root.name, RecordType::DS, ResponseCode::NoError));

        Self { transport, root, tld, leaf }
    }

    /// Sign and register an A record answer for `name`, owned by `self.leaf`.
    pub fn publish_signed_a(&self, name: &Name, ip: std::net::Ipv4Addr) {
        let a_record = Record::from_rdata(name.clone(), 300, RData::A(hickory_proto::rr::rdata::A(ip)));
        let rrsig = self.leaf.sign(name, RecordType::A, &[a_record.clone()]);
        self.transport
            .insert(name.clone(), RecordType::A, answer_response(name, RecordType::A, vec![a_record, rrsig]));
    }

    /// Register an unsigned A record answer (no RRSIG) for `name`.
    pub fn publish_unsigned_a(&self, name: &Name, ip: std::net::Ipv4Addr) {
        let a_record = Record::from_rdata(name.clone(), 300, RData::A(hickory_proto::rr::rdata::A(ip)));
        self.transport
            .insert(name.clone(), RecordType::A, answer_response(name, RecordType::A, vec![a_record]));
    }

    /// Publish an A record answer for `name` signed with an inception time
    /// in the future, so its validity-period check fails.
    pub fn publish_future_signed_a(&self, name: &Name, ip: std::net::Ipv4Addr) {
        let a_record = Record::from_rdata(name.clone(), 300, RData::A(hickory_proto::rr::rdata::A(ip)));
        let inception = OffsetDateTime::now_utc() + TimeDuration::days(1);
        let rrsig = self.leaf.sign_at(name, RecordType::A, &[a_record.clone()], inception);
        self.transport
            .insert(name.clone(), RecordType::A, answer_response(name, RecordType::A, vec![a_record, rrsig]));
    }

    /// Overwrite the DS RRset served for the leaf zone with `ds`, re-signed
    /// by the TLD as its parent. Used to exercise DS-verification failure
    /// paths (wrong key tag, bad digest, unsupported digest type).
    pub fn replace_leaf_ds(&self, ds: Record) {
        let rrsig = self.tld.sign(&self.leaf.name, RecordType::DS, &[ds.clone()]);
        self.transport.insert(
            self.leaf.name.clone(),
            RecordType::DS,
            answer_response(&self.leaf.name, RecordType::DS, vec![ds, rrsig]),
        );
    }
}
