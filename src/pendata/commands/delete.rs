use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Nisn;
use crate::store::RecordStore;

pub fn run(store: &mut RecordStore, nisn: &Nisn) -> Result<CmdResult> {
    let student = store.delete(nisn)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student {} ({}) deleted",
        nisn, student.name
    )));
    result.records.push(student);
    Ok(result)
}
