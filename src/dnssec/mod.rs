pub mod algorithm;
pub mod digest;
pub mod key_tag;
pub mod verify;
pub mod wire;

pub use algorithm::DnsSecAlgorithm;
pub use digest::DigestType;
pub use key_tag::calculate_key_tag;
pub use verify::verify_signature;
pub use wire::{compute_ds_digest, name_to_wire};

/// DNSSEC-related protocol constants (RFC 4035).
pub mod constants {
    /// EDNS(0) UDP payload size advertised for DNSSEC-aware queries.
    pub const DNSSEC_UDP_SIZE: u16 = 4096;
}
