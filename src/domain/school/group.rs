//! School groups (grade + letter) and their teacher assignment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AccountId, GroupId, ValidationError};

/// Telesecundaria grade, 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 3;

    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range("grado", Self::MIN, Self::MAX, value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Grade {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

impl From<Grade> for i32 {
    fn from(grade: Grade) -> Self {
        grade.0 as i32
    }
}

/// Group display label, e.g. `2° B`.
pub fn group_label(grade: Grade, letter: &str) -> String {
    format!("{}° {}", grade.value(), letter)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    grade: Grade,
    letter: String,
    teacher_id: Option<AccountId>,
}

impl Group {
    /// # Errors
    ///
    /// - `InvalidFormat` unless the letter is one or two ASCII letters
    pub fn new(grade: Grade, letter: impl AsRef<str>) -> Result<Self, ValidationError> {
        let letter = letter.as_ref().trim().to_ascii_uppercase();
        if letter.is_empty() || letter.len() > 2 || !letter.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ValidationError::invalid_format(
                "grupo",
                "must be one or two letters",
            ));
        }
        Ok(Self {
            id: GroupId::new(),
            grade,
            letter,
            teacher_id: None,
        })
    }

    pub fn reconstitute(
        id: GroupId,
        grade: Grade,
        letter: String,
        teacher_id: Option<AccountId>,
    ) -> Self {
        Self {
            id,
            grade,
            letter,
            teacher_id,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }

    pub fn teacher_id(&self) -> Option<AccountId> {
        self.teacher_id
    }

    pub fn label(&self) -> String {
        group_label(self.grade, &self.letter)
    }

    pub fn assign_teacher(&mut self, teacher: AccountId) {
        self.teacher_id = Some(teacher);
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Group row on the assignment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupAssignmentRow {
    pub group_id: GroupId,
    pub label: String,
    pub teacher_id: Option<AccountId>,
    pub teacher_name: Option<String>,
}

/// One `grupo_<id> = <teacher>` pair from the assignment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeacherAssignment {
    pub group_id: GroupId,
    pub teacher_id: AccountId,
}
