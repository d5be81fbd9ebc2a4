use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

/// Replaces the whole collection with the file's contents.
///
/// The old collection is discarded before the read is attempted, so a
/// failed load leaves the store empty. That is deliberate: load means
/// "forget what you had", not "merge".
pub fn run(store: &mut RecordStore, path: &Path) -> Result<CmdResult> {
    store.clear();

    let input = fs::read_to_string(path)?;
    let report = codec::decode(&input);

    let mut result = CmdResult::default();
    if report.header_mismatch {
        warn!("header mismatch in {}", path.display());
        result.add_message(CmdMessage::warning(format!(
            "Warning: file {} has an unrecognized header, data may be wrong",
            path.display()
        )));
    }
    if report.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} malformed record(s) skipped",
            report.skipped
        )));
    }

    // The file itself may carry duplicate keys; the first occurrence in
    // file order wins and the rest are reported.
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(report.records.len());
    for student in report.records {
        if seen.insert(student.nisn.clone()) {
            unique.push(student);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Duplicate NISN {} ignored",
                student.nisn
            )));
        }
    }

    info!(
        "loaded {} record(s) from {} in {:?}",
        unique.len(),
        path.display(),
        report.elapsed
    );
    result.add_message(CmdMessage::success(format!(
        "Loaded {} student(s) in {:?}",
        unique.len(),
        report.elapsed
    )));
    store.replace(unique);
    Ok(result)
}
