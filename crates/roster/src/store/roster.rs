//! The in-memory collection of student records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::student::Student;

/// An Add was refused because the id is already taken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Student with ID '{0}' already exists.")]
pub struct DuplicateId(pub String);

/// Ordered sequence of students, serialized as a bare JSON array.
///
/// Insertion order is kept for display. Lookups are linear scans on `id`
/// using exact, case-sensitive comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Whether any record has this id.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.students.iter().any(|s| s.id == id)
    }

    /// First record with this id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// First record with this id, for in-place update.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateId`] and leaves the roster unchanged if the id is
    /// already present.
    pub fn add(&mut self, student: Student) -> Result<(), DuplicateId> {
        if self.contains_id(&student.id) {
            return Err(DuplicateId(student.id));
        }
        self.students.push(student);
        Ok(())
    }

    /// Remove the record with this id, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Student> {
        let index = self.students.iter().position(|s| s.id == id)?;
        Some(self.students.remove(index))
    }
}

impl From<Vec<Student>> for Roster {
    fn from(students: Vec<Student>) -> Self {
        Self { students }
    }
}
