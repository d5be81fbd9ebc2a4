use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Student;
use crate::store::RecordStore;

pub fn run(store: &mut RecordStore, student: Student) -> Result<CmdResult> {
    let nisn = student.nisn.clone();
    store.add(student)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Student {} added", nisn)));
    Ok(result)
}
