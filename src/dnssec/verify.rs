//! Raw cryptographic verification of an RRSIG signature and of a DS digest,
//! given already-extracted wire bytes. The canonical "to be signed" bytes
//! and the DNSKEY/DS rdata are built by callers in [`crate::signed_zone`];
//! this module only holds the `ring` calling conventions per algorithm
//! family, which differ enough (RSA component pairs vs. fixed-length EC
//! points vs. raw Ed25519 keys) that a single dispatch table doesn't fit.
//!
//! RSA verification here goes through [`ring::signature::RsaPublicKeyComponents`]
//! rather than `UnparsedPublicKey`, because a DNSKEY's public key field is
//! already the bare (exponent, modulus) pair in RFC 3110 wire form, not a
//! DER `SubjectPublicKeyInfo`. ECDSA keys are raw, uncompressed X||Y
//! coordinates (RFC 6605) and need the SEC1 `0x04` prefix byte ring expects,
//! verified with the `_FIXED` (raw r||s) algorithms rather than the `_ASN1`
//! ones — an RRSIG signature is never DER-encoded.

use ring::signature::{self, RsaPublicKeyComponents, UnparsedPublicKey};

use crate::dnssec::algorithm::DnsSecAlgorithm;
use crate::error::{Result, ValidatorError};

/// Verify `signature` over `data` under the DNSKEY's raw wire-format
/// `public_key`, per `algorithm` (RFC 4034 Appendix A.1 numbering). Unknown
/// or unsupported algorithm numbers fail closed rather than panic.
pub fn verify_signature(algorithm: u8, data: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
    let Some(algorithm) = DnsSecAlgorithm::from_u8(algorithm).filter(DnsSecAlgorithm::is_supported) else {
        return Err(ValidatorError::RrsigValidationError);
    };

    let ok = match algorithm {
        DnsSecAlgorithm::RsaSha1 | DnsSecAlgorithm::RsaSha1Nsec3Sha1 => {
            verify_rsa(&signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY, data, signature, public_key)
        }
        DnsSecAlgorithm::RsaSha256 => verify_rsa(&signature::RSA_PKCS1_2048_8192_SHA256, data, signature, public_key),
        DnsSecAlgorithm::RsaSha512 => verify_rsa(&signature::RSA_PKCS1_2048_8192_SHA512, data, signature, public_key),
        DnsSecAlgorithm::EcdsaP256Sha256 => verify_ecdsa(&signature::ECDSA_P256_SHA256_FIXED, 64, data, signature, public_key),
        DnsSecAlgorithm::EcdsaP384Sha384 => verify_ecdsa(&signature::ECDSA_P384_SHA384_FIXED, 96, data, signature, public_key),
        DnsSecAlgorithm::Ed25519 => UnparsedPublicKey::new(&signature::ED25519, public_key)
            .verify(data, signature)
            .is_ok(),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(ValidatorError::RrsigValidationError)
    }
}

/// Split a DNSKEY's RSA public key field into (exponent, modulus), per
/// RFC 3110 §2: a one-byte exponent length, or `0x00` followed by a
/// two-byte big-endian length for exponents over 255 bytes.
fn parse_rsa_components(key: &[u8]) -> Option<(&[u8], &[u8])> {
    if key.is_empty() {
        return None;
    }
    let (exp_len, rest) = if key[0] == 0 {
        if key.len() < 3 {
            return None;
        }
        let len = u16::from_be_bytes([key[1], key[2]]) as usize;
        (len, &key[3..])
    } else {
        (key[0] as usize, &key[1..])
    };
    if rest.len() < exp_len {
        return None;
    }
    let (exponent, modulus) = rest.split_at(exp_len);
    if modulus.is_empty() {
        return None;
    }
    Some((exponent, modulus))
}

fn verify_rsa(params: &'static signature::RsaParameters, data: &[u8], sig: &[u8], key: &[u8]) -> bool {
    let Some((e, n)) = parse_rsa_components(key) else {
        return false;
    };
    RsaPublicKeyComponents { n, e }.verify(params, data, sig).is_ok()
}

fn verify_ecdsa(
    alg: &'static dyn signature::VerificationAlgorithm,
    coordinate_len: usize,
    data: &[u8],
    sig: &[u8],
    key: &[u8],
) -> bool {
    if key.len() != coordinate_len * 2 {
        return false;
    }
    let mut uncompressed = Vec::with_capacity(1 + key.len());
    uncompressed.push(0x04);
    uncompressed.extend_from_slice(key);
    UnparsedPublicKey::new(alg, &uncompressed).verify(data, sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsa_components_short_form() {
        let mut key = vec![3u8, 1, 0, 1];
        key.extend(std::iter::repeat(0xab).take(256));
        let (e, n) = parse_rsa_components(&key).unwrap();
        assert_eq!(e, &[1, 0, 1]);
        assert_eq!(n.len(), 256);
    }

    #[test]
    fn rsa_components_long_form() {
        let mut key = vec![0u8, 1, 0];
        key.extend(std::iter::repeat(0x01).take(256));
        key.extend(std::iter::repeat(0xcd).take(256));
        let (e, n) = parse_rsa_components(&key).unwrap();
        assert_eq!(e.len(), 256);
        assert_eq!(n.len(), 256);
    }

    #[test]
    fn unsupported_algorithm_fails_closed() {
        let err = verify_signature(99, b"data", b"sig", b"key").unwrap_err();
        assert!(matches!(err, ValidatorError::RrsigValidationError));
    }
}
