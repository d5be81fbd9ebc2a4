use crate::commands::CmdResult;
use crate::error::{PendataError, Result};
use crate::model::Nisn;
use crate::store::RecordStore;

pub fn run(store: &RecordStore, nisn: &Nisn) -> Result<CmdResult> {
    let student = store
        .find(nisn)
        .cloned()
        .ok_or_else(|| PendataError::NotFound(nisn.clone()))?;
    Ok(CmdResult::default().with_records(vec![student]))
}
