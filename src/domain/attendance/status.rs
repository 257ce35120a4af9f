//! Attendance status values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Outcome recorded for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    /// Present on time. Check-in devices report it as `A`.
    #[serde(alias = "A")]
    Asistencia,
    Falta,
    Retardo,
    Justificado,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Asistencia,
        AttendanceStatus::Falta,
        AttendanceStatus::Retardo,
        AttendanceStatus::Justificado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Asistencia => "ASISTENCIA",
            AttendanceStatus::Falta => "FALTA",
            AttendanceStatus::Retardo => "RETARDO",
            AttendanceStatus::Justificado => "JUSTIFICADO",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "ASISTENCIA" => Ok(AttendanceStatus::Asistencia),
            "FALTA" => Ok(AttendanceStatus::Falta),
            "RETARDO" => Ok(AttendanceStatus::Retardo),
            "JUSTIFICADO" => Ok(AttendanceStatus::Justificado),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown attendance status '{}'", other),
            )),
        }
    }
}
