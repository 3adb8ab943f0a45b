//! CSV report writing, grounded in `filemanager.go`'s `writeToDisk`:
//! timestamped filename, header row, one line per [`crate::batch::BatchRecord`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::batch::BatchRecord;
use crate::error::Result;

const HEADER: &str = "Domain,DNSSECExists,DNSSECValid,reason,AlgorithmsUsed,ProtocolsUsed,PublicKeySizes";

pub fn write_report(records: &[BatchRecord], out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = out_dir.join(format!("results-{timestamp}.csv"));

    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "{HEADER}")?;
    for record in records {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            csv_field(&record.domain),
            record.dnssec_exists,
            record.dnssec_valid,
            csv_field(&record.reason),
            csv_field(&record.algorithms_used.join("|")),
            csv_field(&record.protocols_used.join("|")),
            csv_field(&record.key_sizes.join("|")),
        )?;
    }

    Ok(path)
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
