use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Student;
use crate::store::RecordStore;

pub fn run(store: &RecordStore) -> Result<CmdResult> {
    let records: Vec<Student> = store.list().cloned().collect();
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No students on record"));
    }
    Ok(result.with_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::student;

    #[test]
    fn lists_in_store_order() {
        let mut store = RecordStore::new();
        store.add(student("1", "Ana")).unwrap();
        store.add(student("2", "Budi")).unwrap();
        let result = run(&store).unwrap();
        let names: Vec<&str> = result.records.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Budi", "Ana"]);
    }

    #[test]
    fn empty_store_says_so() {
        let result = run(&RecordStore::new()).unwrap();
        assert!(result.records.is_empty());
        assert!(!result.messages.is_empty());
    }
}
