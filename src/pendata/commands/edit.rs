use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{FieldUpdate, Nisn};
use crate::store::RecordStore;

pub fn run(store: &mut RecordStore, nisn: &Nisn, update: FieldUpdate) -> Result<CmdResult> {
    store.update(nisn, update)?;
    let mut result = CmdResult::default();
    if let Some(student) = store.find(nisn) {
        result.records.push(student.clone());
    }
    result.add_message(CmdMessage::success(format!("Student {} updated", nisn)));
    Ok(result)
}
