//! Student entity and enrollment status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{GroupId, StudentId, ValidationError};

/// CURP length (Mexican population registry key).
pub const CURP_LENGTH: usize = 18;

/// Maximum length of a student's full name.
pub const MAX_STUDENT_NAME_LENGTH: usize = 150;

/// Population registry key, uppercase, 18 alphanumeric characters. Unique
/// per student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curp(String);

impl Curp {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = value.as_ref().trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("curp"));
        }
        if normalized.len() != CURP_LENGTH
            || !normalized.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::invalid_format(
                "curp",
                format!("must be {} letters or digits", CURP_LENGTH),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Curp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudentStatus {
    #[default]
    Activo,
    /// Temporary leave.
    Baja,
    Graduado,
    Retirado,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Activo => "ACTIVO",
            StudentStatus::Baja => "BAJA",
            StudentStatus::Graduado => "GRADUADO",
            StudentStatus::Retirado => "RETIRADO",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVO" => Ok(StudentStatus::Activo),
            "BAJA" => Ok(StudentStatus::Baja),
            "GRADUADO" => Ok(StudentStatus::Graduado),
            "RETIRADO" => Ok(StudentStatus::Retirado),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown student status '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    id: StudentId,
    group_id: GroupId,
    full_name: String,
    curp: Curp,
    status: StudentStatus,
    enrolled_on: NaiveDate,
}

impl Student {
    /// Enrolls a new, active student.
    pub fn enroll(
        group_id: GroupId,
        full_name: impl AsRef<str>,
        curp: Curp,
        enrolled_on: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.as_ref().trim();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("nombre"));
        }
        if full_name.chars().count() > MAX_STUDENT_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "nombre",
                format!("must be at most {} characters", MAX_STUDENT_NAME_LENGTH),
            ));
        }
        Ok(Self {
            id: StudentId::new(),
            group_id,
            full_name: full_name.to_string(),
            curp,
            status: StudentStatus::Activo,
            enrolled_on,
        })
    }

    pub fn reconstitute(
        id: StudentId,
        group_id: GroupId,
        full_name: String,
        curp: Curp,
        status: StudentStatus,
        enrolled_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            group_id,
            full_name,
            curp,
            status,
            enrolled_on,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn curp(&self) -> &Curp {
        &self.curp
    }

    pub fn status(&self) -> StudentStatus {
        self.status
    }

    pub fn enrolled_on(&self) -> NaiveDate {
        self.enrolled_on
    }

    /// Changes the status and returns the history line describing it, or
    /// `None` when the status is unchanged.
    pub fn change_status(&mut self, status: StudentStatus) -> Option<String> {
        if self.status == status {
            return None;
        }
        let description = format!("Cambio de estado: {} -> {}", self.status, status);
        self.status = status;
        Some(description)
    }
}
