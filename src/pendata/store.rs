use std::collections::VecDeque;

use crate::error::{PendataError, Result};
use crate::model::{FieldUpdate, Nisn, Student};

/// The authoritative in-memory collection of student records.
///
/// Traversal order is insertion order, most recently added first: `add`
/// pushes to the front and `replace` keeps exactly the order it is
/// given, so after a load the in-memory order equals the on-disk order
/// and later adds land in front of the loaded records. Lookup is a
/// linear scan over the NISN key.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: VecDeque<Student>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// First record whose NISN matches exactly. Absence is not an error.
    pub fn find(&self, nisn: &Nisn) -> Option<&Student> {
        self.records.iter().find(|s| &s.nisn == nisn)
    }

    pub fn add(&mut self, student: Student) -> Result<()> {
        if self.find(&student.nisn).is_some() {
            return Err(PendataError::DuplicateNisn(student.nisn));
        }
        self.records.push_front(student);
        Ok(())
    }

    pub fn delete(&mut self, nisn: &Nisn) -> Result<Student> {
        let pos = self
            .records
            .iter()
            .position(|s| &s.nisn == nisn)
            .ok_or_else(|| PendataError::NotFound(nisn.clone()))?;
        self.records
            .remove(pos)
            .ok_or_else(|| PendataError::NotFound(nisn.clone()))
    }

    pub fn update(&mut self, nisn: &Nisn, update: FieldUpdate) -> Result<()> {
        let student = self
            .records
            .iter_mut()
            .find(|s| &s.nisn == nisn)
            .ok_or_else(|| PendataError::NotFound(nisn.clone()))?;
        student.apply(update)
    }

    /// Front-to-back traversal in current order. Restartable; every call
    /// starts over from the head.
    pub fn list(&self) -> impl Iterator<Item = &Student> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Wholesale replacement. The first element of `records` becomes the
    /// traversal front; used by load so file order survives.
    pub fn replace(&mut self, records: Vec<Student>) {
        self.records = records.into();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
