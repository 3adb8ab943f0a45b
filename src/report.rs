//! Console pretty-printing for the single-query CLI, grounded in `main.go`'s
//! `singleMeasure` (its `IndentSpace`-based tree printout of the answer
//! followed by a per-zone chain dump).

use hickory_proto::rr::Record;

use crate::chain::AuthenticationChain;

const INDENT_UNIT: &str = "  ";

pub fn print_answer_and_chain(fqdn: &str, rr_type: &str, answer: &[Record], chain: &AuthenticationChain) {
    println!("Valid DNS record answer for {fqdn} ({rr_type})");
    for record in answer {
        println!("  {record}");
    }

    println!();
    println!("----------------------- CHAIN -----------------------");
    for (i, zone) in chain.zones.iter().enumerate() {
        let pad = INDENT_UNIT.repeat(i);
        println!("{pad}[Level {}] zone: {}", i + 1, zone.zone_name);

        println!("{pad}  DNSKEY (RRSET):");
        for record in &zone.dnskey.records {
            println!("{pad}    {record}");
        }
        if let Some(sig) = &zone.dnskey.rrsig {
            println!("{pad}  DNSKEY (RRSIG): {sig}");
        }

        println!("{pad}  DS (RRSET):");
        for record in &zone.ds.records {
            println!("{pad}    {record}");
        }
        if let Some(sig) = &zone.ds.rrsig {
            println!("{pad}  DS (RRSIG): {sig}");
        }

        println!("{pad}  key tags: {}", zone.pubkey_lookup.keys().map(u16::to_string).collect::<Vec<_>>().join(", "));
    }
    println!("--------------------- END CHAIN -----------------------");
}
