//! Input-list reading, grounded in `filemanager.go`'s `readFormattedInput`:
//! one hostname per line, a trailing dot appended to FQDN-normalize each
//! entry. Blank lines are not filtered out, matching the Go original, which
//! unconditionally appends every scanned line.

use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

pub fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        domains.push(format!("{}.", line.trim()));
    }
    Ok(domains)
}
