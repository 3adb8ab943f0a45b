//! Small wire-format helpers needed alongside `hickory-proto`'s own codec:
//! the DS digest is computed over the owner name plus DNSKEY rdata in their
//! canonical DNS wire form, which isn't something the RR types hand back
//! pre-built.

use super::digest::DigestType;

/// Encode a domain name in DNS wire format (length-prefixed labels, root
/// terminator), lower-cased per the canonical form RFC 4034 §3.1.8.1 and
/// RFC 4509 §2.1 / RFC 4034 §5.1.4 require for digest input.
pub fn name_to_wire(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    let trimmed = name.trim_end_matches('.');
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            let lower = label.to_ascii_lowercase();
            out.push(lower.len() as u8);
            out.extend_from_slice(lower.as_bytes());
        }
    }
    out.push(0);
    out
}

/// Compute the DS digest of a DNSKEY, per RFC 4034 §5.1.4: digest of the
/// owner name's wire form followed by the DNSKEY RDATA.
pub fn compute_ds_digest(
    owner_name: &str,
    flags: u16,
    algorithm: u8,
    public_key: &[u8],
    digest_type: DigestType,
) -> Option<Vec<u8>> {
    let mut data = name_to_wire(owner_name);
    data.extend_from_slice(&flags.to_be_bytes());
    data.push(3); // protocol is always 3 (RFC 4034 §2.1.2)
    data.push(algorithm);
    data.extend_from_slice(public_key);
    digest_type.digest(&data)
}
