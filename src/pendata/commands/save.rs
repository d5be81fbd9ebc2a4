use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::codec::positional;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

const MAX_SUFFIX_ATTEMPTS: u32 = 100;

/// Writes the whole store to `path` in the positional format. The
/// in-memory collection is untouched either way.
pub fn run(store: &RecordStore, path: &Path) -> Result<CmdResult> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let report = positional::encode(&mut writer, store.list())?;
    writer.flush()?;

    info!(
        "saved {} record(s) to {} in {:?}",
        report.written,
        path.display(),
        report.elapsed
    );
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} student(s) to {} in {:?}",
        report.written,
        path.display(),
        report.elapsed
    )));
    Ok(result)
}

/// Proposes a save target: the last loaded file when there is one,
/// otherwise `<basename><ext>` in `dir`, suffixed `_1`, `_2`, … until a
/// free name turns up. Bounded so a pathological directory cannot spin
/// forever; past the cap the last candidate is proposed as-is.
pub fn propose_path(
    last_loaded: Option<&Path>,
    dir: &Path,
    basename: &str,
    ext: &str,
) -> PathBuf {
    if let Some(path) = last_loaded {
        return path.to_path_buf();
    }
    let mut candidate = dir.join(format!("{}{}", basename, ext));
    let mut n = 1;
    while candidate.exists() && n <= MAX_SUFFIX_ATTEMPTS {
        candidate = dir.join(format!("{}_{}{}", basename, n, ext));
        n += 1;
    }
    candidate
}
